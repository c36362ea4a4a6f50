//! Integration tests for cart and wishlist persistence across restarts.

use axum::http::StatusCode;
use flutter_store_integration_tests::TestContext;
use serde_json::json;

#[tokio::test]
async fn test_cart_and_wishlist_survive_restart() {
    let ctx = TestContext::new();
    ctx.post(
        "/api/cart/add",
        &json!({"product_id": "hoodie-dash-mascot", "size": "L", "color": "Black", "quantity": 2}),
    )
    .await;
    ctx.post(
        "/api/wishlist/add",
        &json!({"product_id": "tshirt-fluttercon-2025"}),
    )
    .await;

    let ctx = ctx.restart();

    let (_, cart) = ctx.get("/api/cart").await;
    assert_eq!(cart["totalItems"], 2);
    assert_eq!(cart["items"][0]["productId"], "hoodie-dash-mascot");
    assert_eq!(cart["items"][0]["image"], "/images/2-h-black.png");

    let (_, wishlist) = ctx.get("/api/wishlist").await;
    assert_eq!(wishlist["items"][0]["id"], "tshirt-fluttercon-2025");
}

#[tokio::test]
async fn test_storage_files_use_well_known_keys() {
    let ctx = TestContext::new();
    ctx.post(
        "/api/cart/add",
        &json!({"product_id": "tshirt-dash-mascot", "size": "M", "color": "White"}),
    )
    .await;

    let raw = std::fs::read_to_string(ctx.data_dir.path().join("flutter-store-cart.json"))
        .expect("cart file written");
    let stored: serde_json::Value = serde_json::from_str(&raw).expect("cart file is JSON");
    assert_eq!(stored[0]["productId"], "tshirt-dash-mascot");
    assert_eq!(stored[0]["quantity"], 1);
    assert_eq!(stored[0]["category"], "tshirt");
}

#[tokio::test]
async fn test_corrupted_cart_file_starts_empty() {
    let ctx = TestContext::new();
    std::fs::write(ctx.data_dir.path().join("flutter-store-cart.json"), "{not json")
        .expect("write corrupted file");

    let ctx = ctx.restart();
    let (status, cart) = ctx.get("/api/cart").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart["totalItems"], 0);

    // The next mutation replaces the corrupted value.
    ctx.post(
        "/api/cart/add",
        &json!({"product_id": "tshirt-dash-mascot", "size": "M", "color": "White"}),
    )
    .await;
    let ctx = ctx.restart();
    let (_, cart) = ctx.get("/api/cart").await;
    assert_eq!(cart["totalItems"], 1);
}
