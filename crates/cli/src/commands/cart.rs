//! Cart editing commands.
//!
//! Each command opens the cart snapshot under the data directory, applies
//! one operation and prints the resulting cart. The storefront server and
//! the CLI share the same snapshot file, so run one at a time.
//!
//! # Usage
//!
//! ```bash
//! vitrine cart add 3       # one more "Robe élégante"
//! vitrine cart qty 0 -1    # decrement the first line
//! vitrine cart remove 1    # drop the second line
//! vitrine cart clear
//! ```

use clap::Subcommand;
use vitrine_core::ProductId;
use vitrine_storefront::cart::CartStore;
use vitrine_storefront::presentation::Presenter;

use super::CommandError;

#[derive(Debug, Subcommand)]
pub enum CartAction {
    /// Show the cart lines and total
    Show,
    /// Add one unit of a product
    Add {
        /// Product id
        id: i32,
    },
    /// Remove the line at a display position (0-based)
    Remove {
        /// Line position
        index: usize,
    },
    /// Change the quantity of a line; the line is removed at zero
    Qty {
        /// Line position
        index: usize,
        /// Quantity change, e.g. 1 or -1
        #[arg(allow_negative_numbers = true)]
        delta: i32,
    },
    /// Empty the cart and delete its snapshot
    Clear,
}

/// Apply `action` to `store` and render the resulting cart.
///
/// # Errors
///
/// Returns an error if the cart snapshot cannot be written.
pub fn run<P: Presenter>(
    store: &mut CartStore,
    action: &CartAction,
    presenter: &P,
) -> Result<P::Output, CommandError> {
    match *action {
        CartAction::Show => {}
        CartAction::Add { id } => {
            if !store.add_to_cart(ProductId::new(id))? {
                tracing::warn!(id, "No product with this id");
            }
        }
        CartAction::Remove { index } => {
            if !store.remove_from_cart(index)? {
                tracing::warn!(index, "No cart line at this position");
            }
        }
        CartAction::Qty { index, delta } => {
            if !store.change_qty(index, delta)? {
                tracing::warn!(index, "No cart line at this position");
            }
        }
        CartAction::Clear => store.clear()?,
    }

    Ok(store.render(presenter))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use vitrine_storefront::catalog::Catalog;
    use vitrine_storefront::snapshot::FileSnapshotStore;

    use super::*;
    use crate::presenter::TextPresenter;

    fn open(dir: &std::path::Path) -> CartStore {
        CartStore::open(Catalog::builtin(), FileSnapshotStore::new(dir)).unwrap()
    }

    #[test]
    fn test_actions_persist_between_invocations() {
        let dir = tempfile::tempdir().unwrap();

        for action in [
            CartAction::Add { id: 1 },
            CartAction::Add { id: 1 },
            CartAction::Add { id: 3 },
            CartAction::Qty { index: 0, delta: -1 },
        ] {
            run(&mut open(dir.path()), &action, &TextPresenter).unwrap();
        }

        let text = run(&mut open(dir.path()), &CartAction::Show, &TextPresenter).unwrap();
        assert!(text.starts_with("[0] T-shirt oversize"));
        assert!(text.contains("[1] Robe élégante"));
        assert!(text.ends_with("Total: 100.00 € (2 articles)\n"));
    }

    #[test]
    fn test_unknown_id_leaves_cart_empty() {
        let dir = tempfile::tempdir().unwrap();
        let text = run(&mut open(dir.path()), &CartAction::Add { id: 42 }, &TextPresenter).unwrap();

        assert!(text.starts_with("Votre panier est vide"));
        assert!(!dir.path().join("cart.json").exists());
    }

    #[test]
    fn test_clear_deletes_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        run(&mut open(dir.path()), &CartAction::Add { id: 2 }, &TextPresenter).unwrap();
        assert!(dir.path().join("cart.json").exists());

        run(&mut open(dir.path()), &CartAction::Clear, &TextPresenter).unwrap();
        assert!(!dir.path().join("cart.json").exists());
    }
}
