use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

use crate::{
    dto::{
        basket::{UpstreamBasketAck, UpstreamBasketRequest},
        catalog::EventsEnvelope,
        checkout::{CheckoutReceipt, CheckoutRequest},
    },
    models::{Event, EventId, Quantity},
};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("upstream responded with {0}")]
    Status(StatusCode),

    #[error("upstream resource not found")]
    NotFound,
}

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Clone)]
pub struct TicketApiClient {
    http: Client,
    base_url: String,
}

impl TicketApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> ClientResult<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn list_events(&self) -> ClientResult<Vec<Event>> {
        let envelope: EventsEnvelope = self.get("/api/events").await?;
        Ok(envelope.events)
    }

    pub async fn get_event(&self, id: EventId) -> ClientResult<Event> {
        self.get(&format!("/api/events/{id}")).await
    }

    pub async fn add_to_basket(
        &self,
        event_id: EventId,
        quantity: Quantity,
    ) -> ClientResult<UpstreamBasketAck> {
        let body = UpstreamBasketRequest {
            event_id,
            quantity: quantity.get(),
        };
        self.post("/api/basket", &body).await
    }

    pub async fn checkout(&self, request: &CheckoutRequest) -> ClientResult<CheckoutReceipt> {
        self.post("/api/checkout", request).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        tracing::debug!(path, "upstream GET");
        let response = self.http.get(self.url(path)).send().await?;
        parse_response(response).await
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        tracing::debug!(path, "upstream POST");
        let response = self.http.post(self.url(path)).json(body).send().await?;
        parse_response(response).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

async fn parse_response<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return Err(ClientError::NotFound);
    }
    if !status.is_success() {
        return Err(ClientError::Status(status));
    }
    Ok(response.json().await?)
}
