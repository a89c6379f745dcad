use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    checkout::CheckoutStatus,
    dto::{
        basket::{AddToBasketRequest, BasketRow, BasketView, UpdateQuantityRequest},
        catalog::{CatalogView, EventDetailView},
        checkout::{CheckoutItem, CheckoutReceipt, CheckoutRequest},
    },
    models::{Event, LineItem, Quantity},
    response::{ApiResponse, Meta},
    routes::{basket, checkout, events, health},
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "AegisTickets Storefront",
        description = "Catalog, detail and basket views over the upstream ticket API"
    ),
    paths(
        health::health_check,
        events::list_events,
        events::get_event,
        basket::view_basket,
        basket::add_to_basket,
        basket::update_quantity,
        basket::remove_from_basket,
        checkout::checkout_status,
        checkout::submit_checkout,
    ),
    components(
        schemas(
            Event,
            LineItem,
            Quantity,
            CatalogView,
            EventDetailView,
            AddToBasketRequest,
            UpdateQuantityRequest,
            BasketRow,
            BasketView,
            CheckoutItem,
            CheckoutRequest,
            CheckoutReceipt,
            CheckoutStatus,
            Meta,
            ApiResponse<CatalogView>,
            ApiResponse<EventDetailView>,
            ApiResponse<BasketView>,
            ApiResponse<CheckoutStatus>
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Events", description = "Catalog and detail views"),
        (name = "Basket", description = "Basket endpoints"),
        (name = "Checkout", description = "Mocked checkout"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
