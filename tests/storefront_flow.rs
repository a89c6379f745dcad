mod common;

use std::time::{Duration, Instant};

use aegis_storefront::{dto::checkout::CheckoutReceipt, models::Quantity, state::Session};
use axum::http::StatusCode;
use rust_decimal::Decimal;
use serde_json::json;

const LONG_WINDOW: Duration = Duration::from_secs(60);

#[tokio::test]
async fn catalog_lists_upstream_events() {
    let (_upstream, base_url) = common::spawn_upstream().await;
    let (_state, app) = common::storefront(&base_url, LONG_WINDOW);

    let (status, body) = common::call(&app, "GET", "/storefront/events", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().map(Vec::len), Some(3));
    assert_eq!(body["data"][0]["name"], "Tech Conference 2025");
    assert_eq!(body["meta"]["count"], 3);
    assert_eq!(body["meta"]["basket_count"], 0);
}

#[tokio::test]
async fn detail_view_caps_quantity_by_availability() {
    let (_upstream, base_url) = common::spawn_upstream().await;
    let (_state, app) = common::storefront(&base_url, LONG_WINDOW);

    let (status, body) = common::call(&app, "GET", "/storefront/events/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["max_quantity"], 10);
    assert_eq!(body["data"]["sold_out"], false);
    assert!(body["data"]["event"]["description"].is_string());

    let (_, body) = common::call(&app, "GET", "/storefront/events/3", None).await;
    assert_eq!(body["data"]["max_quantity"], 6);

    let (_, body) = common::call(&app, "GET", "/storefront/events/4", None).await;
    assert_eq!(body["data"]["sold_out"], true);
}

#[tokio::test]
async fn unknown_event_is_not_found() {
    let (_upstream, base_url) = common::spawn_upstream().await;
    let (_state, app) = common::storefront(&base_url, LONG_WINDOW);

    let (status, _) = common::call(&app, "GET", "/storefront/events/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unreachable_upstream_surfaces_generic_messages() {
    let base_url = common::dead_upstream_url().await;
    let (_state, app) = common::storefront(&base_url, LONG_WINDOW);

    let (status, body) = common::call(&app, "GET", "/storefront/events", None).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(
        body["message"],
        "Failed to load events. Please try again later."
    );

    let (status, body) = common::call(&app, "GET", "/storefront/events/1", None).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["message"], "Failed to load event details.");
}

#[tokio::test]
async fn basket_add_update_remove_round() {
    let (_upstream, base_url) = common::spawn_upstream().await;
    let (_state, app) = common::storefront(&base_url, LONG_WINDOW);

    let (status, body) = common::call(
        &app,
        "POST",
        "/storefront/basket",
        Some(json!({ "event_id": 1, "quantity": 2 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["count"], 2);

    // quantity defaults to one
    let (_, body) = common::call(
        &app,
        "POST",
        "/storefront/basket",
        Some(json!({ "event_id": 2 })),
    )
    .await;
    assert_eq!(body["data"]["items"].as_array().map(Vec::len), Some(2));
    assert_eq!(body["data"]["total"], 25.0);
    assert_eq!(body["data"]["count"], 3);
    assert_eq!(body["meta"]["basket_count"], 3);

    let (status, body) = common::call(
        &app,
        "PUT",
        "/storefront/basket/1",
        Some(json!({ "quantity": "abc" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["items"][0]["quantity"], 1);
    assert_eq!(body["data"]["items"][0]["subtotal"], 10.0);

    let (_, body) = common::call(
        &app,
        "PUT",
        "/storefront/basket/1",
        Some(json!({ "quantity": 40 })),
    )
    .await;
    assert_eq!(body["data"]["items"][0]["quantity"], 10);

    let (status, body) = common::call(&app, "DELETE", "/storefront/basket/99", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["count"], 11);

    let (_, body) = common::call(&app, "DELETE", "/storefront/basket/1", None).await;
    assert_eq!(body["data"]["count"], 1);
    assert_eq!(body["data"]["items"][0]["id"], 2);
}

#[tokio::test]
async fn adds_are_capped_and_sold_out_events_rejected() {
    let (_upstream, base_url) = common::spawn_upstream().await;
    let (state, app) = common::storefront(&base_url, LONG_WINDOW);

    let (status, _) = common::call(
        &app,
        "POST",
        "/storefront/basket",
        Some(json!({ "event_id": 3, "quantity": 9 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(state.session.lock().await.basket.count(), 6);

    let (status, _) = common::call(
        &app,
        "POST",
        "/storefront/basket",
        Some(json!({ "event_id": 4 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // editing a row that is not in the basket changes nothing
    let (status, body) = common::call(
        &app,
        "PUT",
        "/storefront/basket/2",
        Some(json!({ "quantity": 2 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["count"], 6);
    assert_eq!(body["data"]["items"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn checkout_of_empty_basket_is_rejected() {
    let (_upstream, base_url) = common::spawn_upstream().await;
    let (_state, app) = common::storefront(&base_url, LONG_WINDOW);

    let (status, _) = common::call(&app, "POST", "/storefront/checkout", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn successful_checkout_clears_basket_after_window() {
    let (upstream, base_url) = common::spawn_upstream().await;
    let (state, app) = common::storefront(&base_url, Duration::from_millis(200));

    common::call(
        &app,
        "POST",
        "/storefront/basket",
        Some(json!({ "event_id": 1, "quantity": 2 })),
    )
    .await;

    let (status, body) = common::call(&app, "POST", "/storefront/checkout", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["state"], "succeeded");
    assert_eq!(body["data"]["transaction_id"], "TXN-1700000000");

    let sent = upstream.checkout_bodies();
    assert_eq!(
        sent,
        vec![json!({ "items": [{ "event_id": 1, "price": 10.0, "quantity": 2 }] })]
    );

    // still inside the success window
    let (_, body) = common::call(&app, "GET", "/storefront/basket", None).await;
    assert_eq!(body["data"]["count"], 2);
    assert_eq!(body["data"]["checkout"]["state"], "succeeded");

    let (status, _) = common::call(&app, "POST", "/storefront/checkout", None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    tokio::time::sleep(Duration::from_millis(400)).await;
    assert!(state.session.lock().await.basket.is_empty());

    let (_, body) = common::call(&app, "GET", "/storefront/checkout", None).await;
    assert_eq!(body["data"]["state"], "idle");
    assert_eq!(body["meta"]["basket_count"], 0);
}

#[tokio::test]
async fn failed_checkout_keeps_basket_for_retry() {
    let (upstream, base_url) = common::spawn_upstream().await;
    let (_state, app) = common::storefront(&base_url, LONG_WINDOW);
    upstream.set_checkout_failing(true);

    common::call(
        &app,
        "POST",
        "/storefront/basket",
        Some(json!({ "event_id": 2, "quantity": 3 })),
    )
    .await;

    let (status, body) = common::call(&app, "POST", "/storefront/checkout", None).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["message"], "Checkout failed. Please try again.");

    let (_, body) = common::call(&app, "GET", "/storefront/basket", None).await;
    assert_eq!(body["data"]["count"], 3);
    assert_eq!(body["data"]["checkout"]["state"], "failed");

    upstream.set_checkout_failing(false);
    let (status, body) = common::call(&app, "POST", "/storefront/checkout", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["state"], "succeeded");
}

#[tokio::test]
async fn abandoned_checkout_request_still_settles() {
    let (upstream, base_url) = common::spawn_upstream().await;
    let (_state, app) = common::storefront(&base_url, LONG_WINDOW);
    upstream.set_checkout_failing(true);
    upstream.set_checkout_delay(Duration::from_millis(300));

    common::call(
        &app,
        "POST",
        "/storefront/basket",
        Some(json!({ "event_id": 1 })),
    )
    .await;

    // the shopper goes away while the upstream call is in flight
    let abandoned = tokio::time::timeout(
        Duration::from_millis(50),
        common::call(&app, "POST", "/storefront/checkout", None),
    )
    .await;
    assert!(abandoned.is_err());

    tokio::time::sleep(Duration::from_millis(800)).await;
    let (_, body) = common::call(&app, "GET", "/storefront/checkout", None).await;
    assert_eq!(body["data"]["state"], "failed");

    upstream.set_checkout_failing(false);
    upstream.set_checkout_delay(Duration::ZERO);
    let (status, body) = common::call(&app, "POST", "/storefront/checkout", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["state"], "succeeded");
}

#[tokio::test]
async fn catalog_badge_reflects_elapsed_success_window() {
    let (_upstream, base_url) = common::spawn_upstream().await;
    let (state, app) = common::storefront(&base_url, Duration::ZERO);

    // a success window that is already due, with no clear timer behind it
    {
        let event = state.api.get_event(1).await.expect("event");
        let mut session = state.session.lock().await;
        session.basket.add(&event, Quantity::coerce(3));
        let Session { basket, checkout } = &mut *session;
        checkout.begin(basket).expect("begin");
        checkout.complete(
            Ok::<_, String>(CheckoutReceipt {
                message: "Checkout successful (mock)".into(),
                total: Decimal::from(30),
                transaction_id: "TXN-1".into(),
            }),
            Instant::now(),
        );
    }

    let (_, body) = common::call(&app, "GET", "/storefront/events", None).await;
    assert_eq!(body["meta"]["basket_count"], 0);

    let (_, body) = common::call(&app, "GET", "/storefront/events/2", None).await;
    assert_eq!(body["meta"]["basket_count"], 0);
    assert!(state.session.lock().await.basket.is_empty());
}
