use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema, Clone)]
pub struct Meta {
    /// Number of records in `data`, for list views.
    pub count: Option<usize>,
    /// Tickets currently in the basket, for the header badge.
    pub basket_count: Option<u64>,
}

impl Meta {
    pub fn new(count: usize, basket_count: u64) -> Self {
        Self {
            count: Some(count),
            basket_count: Some(basket_count),
        }
    }

    pub fn basket(basket_count: u64) -> Self {
        Self {
            count: None,
            basket_count: Some(basket_count),
        }
    }

    pub fn empty() -> Self {
        Self {
            count: None,
            basket_count: None,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub message: String,
    pub data: Option<T>,
    pub meta: Option<Meta>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T, meta: Option<Meta>) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
            meta,
        }
    }
}
