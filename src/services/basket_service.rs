use std::time::Instant;

use crate::{
    dto::basket::{AddToBasketRequest, BasketView, UpdateQuantityRequest},
    error::{AppError, AppResult},
    models::{EventId, MAX_TICKETS_PER_ENTRY, Quantity},
    response::{ApiResponse, Meta},
    services::catalog_service::fetch_event,
    state::{AppState, Session},
};

pub async fn view_basket(state: &AppState) -> AppResult<ApiResponse<BasketView>> {
    let mut session = state.session.lock().await;
    session.refresh(Instant::now());
    Ok(basket_response("OK", &session))
}

pub async fn add_to_basket(
    state: &AppState,
    payload: AddToBasketRequest,
) -> AppResult<ApiResponse<BasketView>> {
    // Resolve the event before taking the session lock.
    let event = fetch_event(state, payload.event_id).await?;
    if event.is_sold_out() {
        return Err(AppError::BadRequest(format!(
            "event {} is sold out",
            event.id
        )));
    }

    let cap = Quantity::new(event.max_quantity()).unwrap_or(Quantity::ONE);
    let quantity = payload.quantity().min(cap);

    let mut session = state.session.lock().await;
    session.refresh(Instant::now());
    let now_in_basket = session.basket.add(&event, quantity);
    tracing::info!(
        event_id = event.id,
        quantity = quantity.get(),
        in_basket = now_in_basket.get(),
        "added to basket"
    );

    Ok(basket_response("Added to basket", &session))
}

pub async fn update_quantity(
    state: &AppState,
    event_id: EventId,
    payload: UpdateQuantityRequest,
) -> AppResult<ApiResponse<BasketView>> {
    let cap = Quantity::new(MAX_TICKETS_PER_ENTRY).unwrap_or(Quantity::ONE);
    let quantity = payload.quantity().min(cap);

    let mut session = state.session.lock().await;
    session.refresh(Instant::now());
    if session.basket.set_quantity(event_id, quantity) {
        tracing::debug!(event_id, quantity = quantity.get(), "basket quantity updated");
    }

    Ok(basket_response("Quantity updated", &session))
}

pub async fn remove_from_basket(
    state: &AppState,
    event_id: EventId,
) -> AppResult<ApiResponse<BasketView>> {
    let mut session = state.session.lock().await;
    session.refresh(Instant::now());
    if session.basket.remove(event_id).is_some() {
        tracing::info!(event_id, "removed from basket");
    }

    Ok(basket_response("Removed from basket", &session))
}

pub(crate) fn basket_response(message: &str, session: &Session) -> ApiResponse<BasketView> {
    let view = BasketView::new(&session.basket, session.checkout.status());
    let meta = Meta::new(session.basket.len(), session.basket.count());
    ApiResponse::success(message, view, Some(meta))
}
