//! Integration tests for the cart fragments and cart persistence.

#![allow(clippy::unwrap_used)]

use reqwest::{Client, Response, StatusCode};
use serde_json::Value;
use vitrine_integration_tests::TestServer;

async fn post(client: &Client, server: &TestServer, path: &str, form: &[(&str, &str)]) -> Response {
    let resp = client.post(server.url(path)).form(form).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK, "POST {path}");
    resp
}

async fn add(client: &Client, server: &TestServer, id: &str) -> Response {
    post(client, server, "/cart/add", &[("product_id", id)]).await
}

async fn get_text(client: &Client, server: &TestServer, path: &str) -> String {
    let resp = client.get(server.url(path)).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK, "GET {path}");
    resp.text().await.unwrap()
}

fn trigger(resp: &Response) -> &str {
    resp.headers()["hx-trigger"].to_str().unwrap()
}

#[tokio::test]
async fn test_add_pulses_badge_and_refreshes_lines() {
    let server = TestServer::start().await;
    let client = Client::new();

    let resp = add(&client, &server, "1").await;
    assert_eq!(trigger(&resp), "cart-updated");
    let badge = resp.text().await.unwrap();
    assert!(badge.contains("cart-badge"));
    assert!(badge.contains(">1</span>"));

    add(&client, &server, "1").await;
    add(&client, &server, "3").await;

    let count = get_text(&client, &server, "/cart/count").await;
    assert!(count.contains(">3</span>"));

    let lines = get_text(&client, &server, "/cart").await;
    assert!(lines.find("T-shirt oversize").unwrap() < lines.find("Robe élégante").unwrap());
    assert!(lines.contains("50.00 €"));
    assert!(lines.contains("125.00 €"));
}

#[tokio::test]
async fn test_add_add_decrement_leaves_one() {
    let server = TestServer::start().await;
    let client = Client::new();

    add(&client, &server, "1").await;
    add(&client, &server, "1").await;
    let resp = post(&client, &server, "/cart/update", &[("index", "0"), ("delta", "-1")]).await;
    assert_eq!(trigger(&resp), "cart-count-changed");

    let html = resp.text().await.unwrap();
    assert!(html.contains(r#"<span class="qty">1</span>"#));
    assert!(html.contains("25.00 €"));
}

#[tokio::test]
async fn test_add_then_remove_empties_cart() {
    let server = TestServer::start().await;
    let client = Client::new();

    add(&client, &server, "3").await;
    let resp = post(&client, &server, "/cart/remove", &[("index", "0")]).await;
    let html = resp.text().await.unwrap();

    assert!(html.contains("Votre panier est vide"));
    assert!(html.contains("0.00 €"));

    let snapshot: Value =
        serde_json::from_str(&std::fs::read_to_string(server.snapshot_path()).unwrap()).unwrap();
    assert_eq!(snapshot, serde_json::json!([]));
}

#[tokio::test]
async fn test_stale_index_and_unknown_product_are_ignored() {
    let server = TestServer::start().await;
    let client = Client::new();

    let resp = add(&client, &server, "404").await;
    assert!(!resp.text().await.unwrap().contains("cart-badge"));
    assert!(!server.snapshot_path().exists());

    add(&client, &server, "2").await;
    post(&client, &server, "/cart/remove", &[("index", "3")]).await;
    post(&client, &server, "/cart/update", &[("index", "1"), ("delta", "5")]).await;

    let count = get_text(&client, &server, "/cart/count").await;
    assert!(count.contains(">1</span>"));
}

#[tokio::test]
async fn test_malformed_form_is_rejected() {
    let server = TestServer::start().await;
    let client = Client::new();

    let resp = client
        .post(server.url("/cart/update"))
        .form(&[("index", "first"), ("delta", "1")])
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_client_error());
}

#[tokio::test]
async fn test_snapshot_records_lines_in_order() {
    let server = TestServer::start().await;
    let client = Client::new();

    add(&client, &server, "5").await;
    add(&client, &server, "2").await;
    add(&client, &server, "5").await;

    let snapshot: Value =
        serde_json::from_str(&std::fs::read_to_string(server.snapshot_path()).unwrap()).unwrap();
    let lines = snapshot.as_array().unwrap();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["id"], 5);
    assert_eq!(lines[0]["qty"], 2);
    assert_eq!(lines[0]["name"], "T-shirt graphique");
    assert_eq!(lines[1]["id"], 2);
    assert_eq!(lines[1]["qty"], 1);
}

#[tokio::test]
async fn test_cart_survives_restart() {
    let server = TestServer::start().await;
    let client = Client::new();

    add(&client, &server, "5").await;
    add(&client, &server, "5").await;
    add(&client, &server, "2").await;

    let server = server.restart().await;
    let page = get_text(&client, &server, "/").await;

    assert!(page.contains("T-shirt graphique"));
    assert!(page.contains(r#"<span class="qty">2</span>"#));
    assert!(page.contains("105.00 €"));
}

#[tokio::test]
async fn test_clear_removes_snapshot() {
    let server = TestServer::start().await;
    let client = Client::new();

    add(&client, &server, "4").await;
    assert!(server.snapshot_path().exists());

    let resp = post(&client, &server, "/cart/clear", &[]).await;
    assert_eq!(trigger(&resp), "cart-count-changed");
    assert!(resp.text().await.unwrap().contains("Votre panier est vide"));
    assert!(!server.snapshot_path().exists());

    let server = server.restart().await;
    let count = get_text(&client, &server, "/cart/count").await;
    assert!(count.contains(">0</span>"));
}

#[tokio::test]
async fn test_corrupt_snapshot_starts_empty() {
    let server = TestServer::start().await;
    std::fs::write(server.snapshot_path(), "{not json").unwrap();

    let server = server.restart().await;
    let client = Client::new();
    let lines = get_text(&client, &server, "/cart").await;

    assert!(lines.contains("Votre panier est vide"));
    assert_eq!(
        std::fs::read_to_string(server.snapshot_path()).unwrap(),
        "{not json"
    );
}
