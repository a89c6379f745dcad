use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    basket::Basket,
    checkout::CheckoutStatus,
    models::{EventId, LineItem, Quantity},
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddToBasketRequest {
    pub event_id: EventId,
    /// Defaults to one; coerced the same way as quantity edits.
    #[serde(default)]
    #[schema(value_type = Option<u32>)]
    pub quantity: Option<serde_json::Value>,
}

impl AddToBasketRequest {
    pub fn quantity(&self) -> Quantity {
        self.quantity
            .as_ref()
            .map(Quantity::from_json)
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateQuantityRequest {
    #[serde(default)]
    #[schema(value_type = u32)]
    pub quantity: serde_json::Value,
}

impl UpdateQuantityRequest {
    pub fn quantity(&self) -> Quantity {
        Quantity::from_json(&self.quantity)
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BasketRow {
    #[serde(flatten)]
    pub item: LineItem,
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BasketView {
    pub items: Vec<BasketRow>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub count: u64,
    pub checkout: CheckoutStatus,
}

impl BasketView {
    pub fn new(basket: &Basket, checkout: CheckoutStatus) -> Self {
        Self {
            items: basket
                .items()
                .iter()
                .map(|item| BasketRow {
                    subtotal: item.subtotal(),
                    item: item.clone(),
                })
                .collect(),
            total: basket.total(),
            count: basket.count(),
            checkout,
        }
    }
}

/// Body of `POST /api/basket` on the upstream API.
#[derive(Debug, Serialize, Deserialize)]
pub struct UpstreamBasketRequest {
    pub event_id: EventId,
    pub quantity: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpstreamBasketAck {
    pub message: String,
    pub event_id: EventId,
    pub quantity: u32,
}
