use axum::{Json, Router, extract::State, routing::get};

use crate::{
    checkout::CheckoutStatus, error::AppResult, response::ApiResponse,
    services::checkout_service, state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(checkout_status).post(submit_checkout))
}

#[utoipa::path(
    get,
    path = "/storefront/checkout",
    responses(
        (status = 200, description = "Current checkout state", body = ApiResponse<CheckoutStatus>)
    ),
    tag = "Checkout"
)]
pub async fn checkout_status(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<CheckoutStatus>>> {
    Ok(Json(checkout_service::checkout_status(&state).await?))
}

#[utoipa::path(
    post,
    path = "/storefront/checkout",
    responses(
        (status = 200, description = "Mock checkout accepted; basket clears after a short delay", body = ApiResponse<CheckoutStatus>),
        (status = 400, description = "Basket is empty"),
        (status = 409, description = "A checkout is already in progress"),
        (status = 502, description = "Checkout failed; basket kept for retry"),
    ),
    tag = "Checkout"
)]
pub async fn submit_checkout(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<CheckoutStatus>>> {
    Ok(Json(checkout_service::submit_checkout(&state).await?))
}
