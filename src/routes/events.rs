use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};

use crate::{
    dto::catalog::{CatalogView, EventDetailView},
    error::AppResult,
    models::EventId,
    response::ApiResponse,
    services::catalog_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_events))
        .route("/{id}", get(get_event))
}

#[utoipa::path(
    get,
    path = "/storefront/events",
    responses(
        (status = 200, description = "Catalog of upcoming events", body = ApiResponse<CatalogView>),
        (status = 502, description = "Upstream API unavailable"),
    ),
    tag = "Events"
)]
pub async fn list_events(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<CatalogView>>> {
    Ok(Json(catalog_service::list_events(&state).await?))
}

#[utoipa::path(
    get,
    path = "/storefront/events/{id}",
    params(
        ("id" = u64, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Event detail", body = ApiResponse<EventDetailView>),
        (status = 404, description = "Event not found"),
        (status = 502, description = "Upstream API unavailable"),
    ),
    tag = "Events"
)]
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<EventId>,
) -> AppResult<Json<ApiResponse<EventDetailView>>> {
    Ok(Json(catalog_service::get_event(&state, id).await?))
}
