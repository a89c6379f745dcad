use std::time::{Duration, Instant};

use rand::{Rng, rngs::StdRng};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::{Value, json};
use tokio::sync::mpsc::UnboundedSender;

use super::{
    profile::{LoadProfile, ScenarioKind},
    report::Sample,
};

const STRESS_PATHS: [&str; 4] = [
    "/api/events",
    "/api/events/1",
    "/api/events/2",
    "/api/events/3",
];

/// Per-VU state: a shared HTTP client, the target host and its own RNG.
pub(crate) struct VirtualUser {
    pub http: Client,
    pub base_url: String,
    pub rng: StdRng,
    pub samples: UnboundedSender<Sample>,
}

/// A finished request together with its not-yet-recorded sample.
struct Exchange {
    status: Option<StatusCode>,
    body: String,
    sample: Sample,
}

impl Exchange {
    fn status_is(&self, expected: StatusCode) -> bool {
        self.status == Some(expected)
    }

    fn json(&self) -> Option<Value> {
        serde_json::from_str(&self.body).ok()
    }
}

impl VirtualUser {
    pub(crate) async fn iterate(&mut self, profile: &LoadProfile) {
        match profile.scenario {
            ScenarioKind::Happy => self.happy(profile).await,
            ScenarioKind::Stress => self.stress(profile).await,
        }
    }

    async fn happy(&mut self, profile: &LoadProfile) {
        let reply = self.send("events", self.http.get(self.url("/api/events"))).await;
        let has_events = reply
            .json()
            .and_then(|body| body.get("events").and_then(Value::as_array).map(|e| !e.is_empty()))
            .unwrap_or(false);
        let passed = reply.status_is(StatusCode::OK) && has_events;
        self.check(reply, passed);
        pause(profile, Duration::from_secs(1)).await;

        let reply = self
            .send("event_detail", self.http.get(self.url("/api/events/1")))
            .await;
        let has_id = reply
            .json()
            .is_some_and(|body| body.get("id").and_then(Value::as_u64) == Some(1));
        let passed = reply.status_is(StatusCode::OK) && has_id;
        self.check(reply, passed);
        pause(profile, Duration::from_secs(1)).await;

        let request = self
            .http
            .post(self.url("/api/basket"))
            .json(&json!({ "event_id": 1, "quantity": 2 }));
        let reply = self.send("basket_add", request).await;
        let passed = reply.status_is(StatusCode::CREATED);
        self.check(reply, passed);
        pause(profile, Duration::from_secs(1)).await;

        let request = self.http.post(self.url("/api/checkout")).json(&json!({
            "items": [{ "event_id": 1, "price": 99.99, "quantity": 2 }]
        }));
        let reply = self.send("checkout", request).await;
        let has_transaction = reply
            .json()
            .is_some_and(|body| body.get("transaction_id").is_some_and(|id| !id.is_null()));
        let passed = reply.status_is(StatusCode::OK) && has_transaction;
        self.check(reply, passed);
        pause(profile, Duration::from_secs(2)).await;
    }

    async fn stress(&mut self, profile: &LoadProfile) {
        let path = STRESS_PATHS[self.rng.gen_range(0..STRESS_PATHS.len())];
        let reply = self.send("catalog_read", self.http.get(self.url(path))).await;
        let ok = reply.status.is_some_and(|status| status.is_success());
        self.check(reply, ok);

        if self.rng.gen_bool(0.3) {
            let body = json!({
                "event_id": self.rng.gen_range(1..=3),
                "quantity": self.rng.gen_range(1..=5),
            });
            let request = self.http.post(self.url("/api/basket")).json(&body);
            let reply = self.send("basket_add", request).await;
            self.record(reply, None);
        }

        let sleep = Duration::from_secs_f64(self.rng.gen_range(0.0..2.0));
        pause(profile, sleep).await;
    }

    async fn send(&self, request: &'static str, builder: RequestBuilder) -> Exchange {
        let started = Instant::now();
        let (status, body) = match builder.send().await {
            Ok(response) => {
                let status = response.status();
                (Some(status), response.text().await.unwrap_or_default())
            }
            Err(err) => {
                tracing::debug!(request, error = %err, "load request failed");
                (None, String::new())
            }
        };
        let failed = status.is_none_or(|status| status.as_u16() >= 400);
        Exchange {
            status,
            body,
            sample: Sample {
                request,
                latency: started.elapsed(),
                failed,
                checks_passed: None,
            },
        }
    }

    fn check(&self, exchange: Exchange, passed: bool) {
        self.record(exchange, Some(passed));
    }

    fn record(&self, exchange: Exchange, checks_passed: Option<bool>) {
        let sample = Sample {
            checks_passed,
            ..exchange.sample
        };
        // The runner only drops the receiver after every VU has exited.
        let _ = self.samples.send(sample);
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

async fn pause(profile: &LoadProfile, duration: Duration) {
    let duration = profile.think_time(duration);
    if !duration.is_zero() {
        tokio::time::sleep(duration).await;
    }
}
