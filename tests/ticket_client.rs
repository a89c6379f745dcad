mod common;

use std::time::Duration;

use aegis_storefront::{
    client::{ClientError, TicketApiClient},
    dto::checkout::{CheckoutItem, CheckoutRequest},
    models::Quantity,
};
use rust_decimal::Decimal;

fn client(base_url: &str) -> TicketApiClient {
    TicketApiClient::new(base_url, Duration::from_secs(2)).expect("client")
}

#[tokio::test]
async fn reads_catalog_and_detail() -> anyhow::Result<()> {
    let (_upstream, base_url) = common::spawn_upstream().await;
    let api = client(&base_url);

    let events = api.list_events().await?;
    assert_eq!(events.len(), 3);
    assert_eq!(events[2].price, Decimal::new(9999, 2));
    assert!(events.iter().all(|event| event.description.is_none()));

    let event = api.get_event(2).await?;
    assert_eq!(event.venue, "Hyde Park");
    assert_eq!(event.available_tickets, 2000);
    assert!(event.description.is_some());
    Ok(())
}

#[tokio::test]
async fn missing_event_maps_to_not_found() {
    let (_upstream, base_url) = common::spawn_upstream().await;
    let err = client(&base_url).get_event(42).await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound));
}

#[tokio::test]
async fn basket_add_is_acknowledged() -> anyhow::Result<()> {
    let (_upstream, base_url) = common::spawn_upstream().await;
    let ack = client(&base_url)
        .add_to_basket(1, Quantity::coerce(2))
        .await?;
    assert_eq!(ack.event_id, 1);
    assert_eq!(ack.quantity, 2);
    Ok(())
}

#[tokio::test]
async fn checkout_returns_receipt_or_status_error() -> anyhow::Result<()> {
    let (upstream, base_url) = common::spawn_upstream().await;
    let api = client(&base_url);
    let request = CheckoutRequest {
        items: vec![CheckoutItem {
            event_id: 1,
            price: Decimal::from(10),
            quantity: Quantity::coerce(2),
        }],
    };

    let receipt = api.checkout(&request).await?;
    assert_eq!(receipt.transaction_id, "TXN-1700000000");
    assert_eq!(receipt.total, Decimal::from(20));

    upstream.set_checkout_failing(true);
    let err = api.checkout(&request).await.unwrap_err();
    assert!(matches!(err, ClientError::Status(status) if status.as_u16() == 500));
    Ok(())
}

#[tokio::test]
async fn connection_failures_are_transport_errors() {
    let base_url = common::dead_upstream_url().await;
    let err = client(&base_url).list_events().await.unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)));
}
