use std::{fmt, num::NonZeroU32};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub type EventId = u64;

/// Most tickets a shopper can pick for a single basket row.
pub const MAX_TICKETS_PER_ENTRY: u32 = 10;

/// A catalog entry as served by the upstream ticket API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Event {
    pub id: EventId,
    pub name: String,
    pub venue: String,
    pub date: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub available_tickets: u32,
    /// Only present on the detail endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Event {
    pub fn is_sold_out(&self) -> bool {
        self.available_tickets == 0
    }

    /// Upper bound offered by the quantity picker on the detail view.
    pub fn max_quantity(&self) -> u32 {
        MAX_TICKETS_PER_ENTRY.min(self.available_tickets)
    }
}

/// Ticket count for a basket row. Always at least one.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
#[schema(value_type = u32)]
pub struct Quantity(NonZeroU32);

impl Quantity {
    pub const ONE: Self = Self(NonZeroU32::MIN);
    pub const MAX: Self = Self(NonZeroU32::MAX);

    pub fn new(value: u32) -> Option<Self> {
        NonZeroU32::new(value).map(Self)
    }

    /// Non-positive values fall back to one; oversized values saturate.
    pub fn coerce(value: i64) -> Self {
        if value < 1 {
            return Self::ONE;
        }
        u32::try_from(value)
            .ok()
            .and_then(Self::new)
            .unwrap_or(Self::MAX)
    }

    /// Reads the leading integer of free-form input, the way a number field
    /// reports what the user typed. Anything unusable becomes one.
    pub fn parse_lenient(input: &str) -> Self {
        let trimmed = input.trim_start();
        let (negative, rest) = match trimmed.as_bytes().first() {
            Some(b'-') => (true, &trimmed[1..]),
            Some(b'+') => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };
        let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
        let digits = &rest[..digits_len];
        if digits.is_empty() || negative {
            return Self::ONE;
        }
        match digits.parse::<u64>() {
            Ok(value) => Self::coerce(i64::try_from(value).unwrap_or(i64::MAX)),
            // only overflow is left at this point
            Err(_) => Self::MAX,
        }
    }

    /// Coerces an arbitrary JSON value from a request body.
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Number(number) => {
                if let Some(int) = number.as_i64() {
                    Self::coerce(int)
                } else if number.as_u64().is_some() {
                    Self::MAX
                } else {
                    match number.as_f64() {
                        Some(float) if float.is_finite() && float >= 1.0 => {
                            Self::coerce(float.trunc() as i64)
                        }
                        _ => Self::ONE,
                    }
                }
            }
            serde_json::Value::String(text) => Self::parse_lenient(text),
            _ => Self::ONE,
        }
    }

    pub const fn get(self) -> u32 {
        self.0.get()
    }

    pub fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.get()))
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl From<i64> for Quantity {
    fn from(value: i64) -> Self {
        Self::coerce(value)
    }
}

impl From<&str> for Quantity {
    fn from(value: &str) -> Self {
        Self::parse_lenient(value)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One basket row. Display attributes are copied from the catalog entry when
/// the row is created and are not refreshed afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LineItem {
    pub id: EventId,
    pub name: String,
    pub venue: String,
    pub date: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub quantity: Quantity,
}

impl LineItem {
    pub fn from_event(event: &Event, quantity: Quantity) -> Self {
        Self {
            id: event.id,
            name: event.name.clone(),
            venue: event.venue.clone(),
            date: event.date,
            price: event.price,
            quantity,
        }
    }

    pub fn subtotal(&self) -> Decimal {
        self.price * Decimal::from(self.quantity.get())
    }
}
