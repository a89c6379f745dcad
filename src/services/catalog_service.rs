use std::time::Instant;

use crate::{
    client::ClientError,
    dto::catalog::{CatalogView, EventDetailView},
    error::{AppError, AppResult, LOAD_EVENT_FAILED, LOAD_EVENTS_FAILED},
    models::{Event, EventId},
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn list_events(state: &AppState) -> AppResult<ApiResponse<CatalogView>> {
    let events = state.api.list_events().await.map_err(|err| {
        tracing::warn!(error = %err, "failed to load events");
        AppError::Unavailable(LOAD_EVENTS_FAILED)
    })?;

    let basket_count = current_basket_count(state).await;
    let meta = Meta::new(events.len(), basket_count);
    Ok(ApiResponse::success("Events", CatalogView { events }, Some(meta)))
}

pub async fn get_event(state: &AppState, id: EventId) -> AppResult<ApiResponse<EventDetailView>> {
    let event = fetch_event(state, id).await?;
    let basket_count = current_basket_count(state).await;
    Ok(ApiResponse::success(
        "OK",
        EventDetailView::from(event),
        Some(Meta::basket(basket_count)),
    ))
}

async fn current_basket_count(state: &AppState) -> u64 {
    let mut session = state.session.lock().await;
    session.refresh(Instant::now());
    session.basket.count()
}

/// Loads one event from upstream, mapping failures to shopper-facing errors.
pub async fn fetch_event(state: &AppState, id: EventId) -> AppResult<Event> {
    state.api.get_event(id).await.map_err(|err| match err {
        ClientError::NotFound => AppError::NotFound,
        err => {
            tracing::warn!(event_id = id, error = %err, "failed to load event");
            AppError::Unavailable(LOAD_EVENT_FAILED)
        }
    })
}
