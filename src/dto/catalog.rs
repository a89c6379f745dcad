use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Event;

/// Body of `GET /api/events` on the upstream API.
#[derive(Debug, Deserialize, Serialize)]
pub struct EventsEnvelope {
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub count: Option<usize>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct CatalogView {
    #[schema(value_type = Vec<Event>)]
    pub events: Vec<Event>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EventDetailView {
    pub event: Event,
    pub max_quantity: u32,
    pub sold_out: bool,
}

impl From<Event> for EventDetailView {
    fn from(event: Event) -> Self {
        Self {
            max_quantity: event.max_quantity(),
            sold_out: event.is_sold_out(),
            event,
        }
    }
}
