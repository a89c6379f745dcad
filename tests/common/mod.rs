#![allow(dead_code)]

use std::{
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, AtomicU64, Ordering},
    },
    time::Duration,
};

use aegis_storefront::{client::TicketApiClient, routes::create_app, state::AppState};
use axum::{
    Json, Router,
    body::Body,
    extract::{Path, State},
    http::{Request, StatusCode},
    routing::{get, post},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

/// Stand-in for the ticket API, served on an ephemeral local port.
#[derive(Clone, Default)]
pub struct Upstream {
    pub fail_checkout: Arc<AtomicBool>,
    pub checkout_delay_ms: Arc<AtomicU64>,
    pub checkouts: Arc<Mutex<Vec<Value>>>,
}

impl Upstream {
    pub fn set_checkout_failing(&self, failing: bool) {
        self.fail_checkout.store(failing, Ordering::SeqCst);
    }

    pub fn set_checkout_delay(&self, delay: Duration) {
        self.checkout_delay_ms
            .store(delay.as_millis() as u64, Ordering::SeqCst);
    }

    pub fn checkout_bodies(&self) -> Vec<Value> {
        self.checkouts.lock().expect("checkout log").clone()
    }
}

fn event_json(id: u64) -> Option<Value> {
    let (name, venue, date, price, available) = match id {
        1 => ("Tech Conference 2025", "London Convention Center", "2025-11-15", json!(10), 500),
        2 => ("Summer Music Festival", "Hyde Park", "2025-07-20", json!(5), 2000),
        3 => ("Comedy Night", "O2 Arena", "2025-06-10", json!(99.99), 6),
        4 => ("Sold Out Show", "Royal Albert Hall", "2025-12-01", json!(80), 0),
        _ => return None,
    };
    Some(json!({
        "id": id,
        "name": name,
        "venue": venue,
        "date": date,
        "price": price,
        "available_tickets": available,
    }))
}

async fn list_events() -> Json<Value> {
    let events: Vec<Value> = (1..=3).filter_map(event_json).collect();
    Json(json!({ "count": events.len(), "events": events }))
}

async fn get_event(Path(id): Path<u64>) -> (StatusCode, Json<Value>) {
    match event_json(id) {
        Some(mut event) => {
            event["description"] = json!("An amazing event you won't want to miss!");
            (StatusCode::OK, Json(event))
        }
        None => (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" }))),
    }
}

async fn add_to_basket(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    (
        StatusCode::CREATED,
        Json(json!({
            "message": "Added to basket",
            "event_id": body["event_id"],
            "quantity": body.get("quantity").cloned().unwrap_or(json!(1)),
        })),
    )
}

async fn checkout(
    State(upstream): State<Upstream>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let delay = upstream.checkout_delay_ms.load(Ordering::SeqCst);
    if delay > 0 {
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }
    if upstream.fail_checkout.load(Ordering::SeqCst) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Internal server error" })),
        );
    }
    upstream.checkouts.lock().expect("checkout log").push(body.clone());
    let total: f64 = body["items"]
        .as_array()
        .map(|items| {
            items
                .iter()
                .map(|item| item["price"].as_f64().unwrap_or(0.0) * item["quantity"].as_f64().unwrap_or(1.0))
                .sum()
        })
        .unwrap_or(0.0);
    (
        StatusCode::OK,
        Json(json!({
            "message": "Checkout successful (mock)",
            "total": total,
            "transaction_id": "TXN-1700000000",
        })),
    )
}

/// Starts the stub upstream and returns its base URL.
pub async fn spawn_upstream() -> (Upstream, String) {
    let upstream = Upstream::default();
    let app = Router::new()
        .route("/api/events", get(list_events))
        .route("/api/events/{id}", get(get_event))
        .route("/api/basket", post(add_to_basket))
        .route("/api/checkout", post(checkout))
        .with_state(upstream.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub upstream");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub upstream");
    });

    (upstream, format!("http://{addr}"))
}

/// A base URL with nothing listening behind it.
pub async fn dead_upstream_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{addr}")
}

pub fn storefront(base_url: &str, clear_delay: Duration) -> (AppState, Router) {
    let api = TicketApiClient::new(base_url, Duration::from_secs(2)).expect("client");
    let state = AppState::new(api, clear_delay);
    let app = create_app(state.clone());
    (state, app)
}

pub async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    };

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, json)
}
