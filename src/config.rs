use std::{env, time::Duration};

use crate::checkout::DEFAULT_CLEAR_DELAY;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base_url: String,
    pub host: String,
    pub port: u16,
    pub checkout_clear_delay: Duration,
    pub upstream_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let api_base_url =
            env::var("API_BASE_URL").unwrap_or_else(|_| "http://localhost:8000".to_string());
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let checkout_clear_delay = env::var("CHECKOUT_CLEAR_DELAY_MS")
            .ok()
            .and_then(|ms| ms.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_CLEAR_DELAY);
        let upstream_timeout = env::var("UPSTREAM_TIMEOUT_SECS")
            .ok()
            .and_then(|secs| secs.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(10));

        if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
            anyhow::bail!("API_BASE_URL must be an http(s) URL, got {api_base_url}");
        }

        Ok(Self {
            api_base_url,
            host,
            port,
            checkout_clear_delay,
            upstream_timeout,
        })
    }
}

#[derive(Debug, Clone)]
pub struct LoadTestConfig {
    pub host: String,
}

impl LoadTestConfig {
    pub fn from_env() -> Self {
        let host = env::var("HOST").unwrap_or_else(|_| "http://localhost".to_string());
        Self {
            host: host.trim_end_matches('/').to_string(),
        }
    }
}
