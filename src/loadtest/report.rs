use std::{fmt, time::Duration};

use super::profile::Thresholds;

/// One timed request made by a virtual user.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub request: &'static str,
    pub latency: Duration,
    /// Transport error or a status of 400 and above.
    pub failed: bool,
    /// `None` when the request carried no checks.
    pub checks_passed: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    pub requests: usize,
    pub failed: usize,
    pub checked: usize,
    pub check_failures: usize,
    latencies: Vec<Duration>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdResult {
    pub metric: &'static str,
    pub limit: String,
    pub observed: String,
    pub passed: bool,
}

impl LoadReport {
    pub fn from_samples(samples: &[Sample]) -> Self {
        let mut latencies: Vec<Duration> = samples.iter().map(|s| s.latency).collect();
        latencies.sort_unstable();

        Self {
            requests: samples.len(),
            failed: samples.iter().filter(|s| s.failed).count(),
            checked: samples.iter().filter(|s| s.checks_passed.is_some()).count(),
            check_failures: samples
                .iter()
                .filter(|s| s.checks_passed == Some(false))
                .count(),
            latencies,
        }
    }

    /// Nearest-rank percentile over request latencies.
    pub fn percentile(&self, pct: f64) -> Duration {
        if self.latencies.is_empty() {
            return Duration::ZERO;
        }
        let n = self.latencies.len();
        let rank = ((pct / 100.0) * n as f64).ceil() as usize;
        self.latencies[rank.clamp(1, n) - 1]
    }

    pub fn p95(&self) -> Duration {
        self.percentile(95.0)
    }

    pub fn failed_rate(&self) -> f64 {
        ratio(self.failed, self.requests)
    }

    pub fn check_error_rate(&self) -> f64 {
        ratio(self.check_failures, self.checked)
    }

    pub fn evaluate(&self, thresholds: &Thresholds) -> Vec<ThresholdResult> {
        let p95 = self.p95();
        let mut results = vec![
            ThresholdResult {
                metric: "http_req_duration p95",
                limit: format!("< {}ms", thresholds.p95_latency.as_millis()),
                observed: format!("{}ms", p95.as_millis()),
                passed: p95 < thresholds.p95_latency,
            },
            ThresholdResult {
                metric: "http_req_failed",
                limit: format!("< {:.2}%", thresholds.max_failed_rate * 100.0),
                observed: format!("{:.2}%", self.failed_rate() * 100.0),
                passed: self.failed_rate() < thresholds.max_failed_rate,
            },
        ];
        if let Some(max) = thresholds.max_check_error_rate {
            results.push(ThresholdResult {
                metric: "errors",
                limit: format!("< {:.2}%", max * 100.0),
                observed: format!("{:.2}%", self.check_error_rate() * 100.0),
                passed: self.check_error_rate() < max,
            });
        }
        results
    }

    pub fn passed(&self, thresholds: &Thresholds) -> bool {
        self.evaluate(thresholds).iter().all(|result| result.passed)
    }
}

impl fmt::Display for ThresholdResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.passed { "ok  " } else { "FAIL" };
        write!(
            f,
            "{mark} {:<22} {:>10} (limit {})",
            self.metric, self.observed, self.limit
        )
    }
}

fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}
