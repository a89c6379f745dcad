use axum::{
    Json, Router,
    http::{StatusCode, Uri},
    routing::get,
};

use crate::{
    response::{ApiResponse, Meta},
    state::AppState,
};

pub mod basket;
pub mod checkout;
pub mod doc;
pub mod events;
pub mod health;

// Build the storefront router without binding state; it will be provided at the top level.
pub fn create_storefront_router() -> Router<AppState> {
    Router::new()
        .nest("/events", events::router())
        .nest("/basket", basket::router())
        .nest("/checkout", checkout::router())
}

/// Full application router with state bound. Middleware layers are added by
/// the binary.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/storefront", create_storefront_router())
        .merge(doc::scalar_docs())
        .fallback(not_found)
        .with_state(state)
}

async fn not_found(uri: Uri) -> (StatusCode, Json<ApiResponse<serde_json::Value>>) {
    let body = ApiResponse::success(
        "Not Found",
        serde_json::json!({ "path": uri.path() }),
        Some(Meta::empty()),
    );
    (StatusCode::NOT_FOUND, Json(body))
}
