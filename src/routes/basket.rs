use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, put},
};

use crate::{
    dto::basket::{AddToBasketRequest, BasketView, UpdateQuantityRequest},
    error::AppResult,
    models::EventId,
    response::ApiResponse,
    services::basket_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(view_basket).post(add_to_basket))
        .route("/{event_id}", put(update_quantity).delete(remove_from_basket))
}

#[utoipa::path(
    get,
    path = "/storefront/basket",
    responses(
        (status = 200, description = "Basket rows, totals and checkout state", body = ApiResponse<BasketView>)
    ),
    tag = "Basket"
)]
pub async fn view_basket(State(state): State<AppState>) -> AppResult<Json<ApiResponse<BasketView>>> {
    Ok(Json(basket_service::view_basket(&state).await?))
}

#[utoipa::path(
    post,
    path = "/storefront/basket",
    request_body = AddToBasketRequest,
    responses(
        (status = 200, description = "Add tickets, merging with an existing row", body = ApiResponse<BasketView>),
        (status = 400, description = "Event is sold out"),
        (status = 404, description = "Event not found"),
        (status = 502, description = "Upstream API unavailable"),
    ),
    tag = "Basket"
)]
pub async fn add_to_basket(
    State(state): State<AppState>,
    Json(payload): Json<AddToBasketRequest>,
) -> AppResult<Json<ApiResponse<BasketView>>> {
    Ok(Json(basket_service::add_to_basket(&state, payload).await?))
}

#[utoipa::path(
    put,
    path = "/storefront/basket/{event_id}",
    params(
        ("event_id" = u64, Path, description = "Event ID")
    ),
    request_body = UpdateQuantityRequest,
    responses(
        (status = 200, description = "Quantity replaced; invalid input becomes 1, absent rows are left alone", body = ApiResponse<BasketView>),
    ),
    tag = "Basket"
)]
pub async fn update_quantity(
    State(state): State<AppState>,
    Path(event_id): Path<EventId>,
    Json(payload): Json<UpdateQuantityRequest>,
) -> AppResult<Json<ApiResponse<BasketView>>> {
    Ok(Json(
        basket_service::update_quantity(&state, event_id, payload).await?,
    ))
}

#[utoipa::path(
    delete,
    path = "/storefront/basket/{event_id}",
    params(
        ("event_id" = u64, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Row removed, or nothing to remove", body = ApiResponse<BasketView>),
    ),
    tag = "Basket"
)]
pub async fn remove_from_basket(
    State(state): State<AppState>,
    Path(event_id): Path<EventId>,
) -> AppResult<Json<ApiResponse<BasketView>>> {
    Ok(Json(
        basket_service::remove_from_basket(&state, event_id).await?,
    ))
}
