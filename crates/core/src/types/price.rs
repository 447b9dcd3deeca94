//! Type-safe price representation using decimal arithmetic.

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A price in euros, the storefront's only currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price {
    /// Amount in euros, not cents.
    pub amount: Decimal,
}

impl Price {
    /// Currency symbol, written after the amount.
    pub const SYMBOL: &'static str = "€";

    /// Create a price in euros.
    #[must_use]
    pub const fn eur(amount: Decimal) -> Self {
        Self { amount }
    }

    /// Format for display with two decimal places (e.g., `"25.00 €"`).
    #[must_use]
    pub fn display(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let amount = self
            .amount
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        write!(f, "{amount:.2} {}", Self::SYMBOL)
    }
}
