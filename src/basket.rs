use rust_decimal::Decimal;
use serde::Serialize;

use crate::{
    dto::checkout::CheckoutItem,
    models::{Event, EventId, LineItem, Quantity},
};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Basket {
    items: Vec<LineItem>,
}

impl Basket {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `quantity` tickets for `event`, merging into an existing row.
    /// Returns the row's quantity after the add.
    pub fn add(&mut self, event: &Event, quantity: Quantity) -> Quantity {
        if let Some(item) = self.items.iter_mut().find(|item| item.id == event.id) {
            item.quantity = item.quantity.saturating_add(quantity);
            return item.quantity;
        }
        self.items.push(LineItem::from_event(event, quantity));
        quantity
    }

    /// Removes the row for `id`. Absent ids leave the basket untouched.
    pub fn remove(&mut self, id: EventId) -> Option<LineItem> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }

    /// Replaces the quantity of an existing row. Raw integers and text are
    /// coerced, so zero, negatives and garbage all become one.
    pub fn set_quantity(&mut self, id: EventId, quantity: impl Into<Quantity>) -> bool {
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.quantity = quantity.into();
                true
            }
            None => false,
        }
    }

    pub fn total(&self) -> Decimal {
        self.items.iter().map(LineItem::subtotal).sum()
    }

    /// Number of tickets across all rows.
    pub fn count(&self) -> u64 {
        self.items
            .iter()
            .map(|item| u64::from(item.quantity.get()))
            .sum()
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn get(&self, id: EventId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drops every row whose id is listed, keeping the rest in order.
    pub fn retain_except(&mut self, ids: &[EventId]) {
        self.items.retain(|item| !ids.contains(&item.id));
    }

    pub fn checkout_items(&self) -> Vec<CheckoutItem> {
        self.items
            .iter()
            .map(|item| CheckoutItem {
                event_id: item.id,
                price: item.price,
                quantity: item.quantity,
            })
            .collect()
    }
}
