use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{EventId, Quantity};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CheckoutItem {
    pub event_id: EventId,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub quantity: Quantity,
}

/// Body of `POST /api/checkout` on the upstream API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CheckoutRequest {
    pub items: Vec<CheckoutItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CheckoutReceipt {
    #[serde(default)]
    pub message: String,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub transaction_id: String,
}
