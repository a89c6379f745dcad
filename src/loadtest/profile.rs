use std::time::Duration;

/// One leg of a virtual-user ramp: move linearly to `target` VUs over
/// `duration`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stage {
    pub duration: Duration,
    pub target: u32,
}

impl Stage {
    pub const fn new(duration: Duration, target: u32) -> Self {
        Self { duration, target }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub p95_latency: Duration,
    /// Ceiling for the share of requests that failed at the HTTP level.
    pub max_failed_rate: f64,
    /// Ceiling for the share of checked requests whose checks failed.
    pub max_check_error_rate: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioKind {
    /// Browse, view, add to basket, check out.
    Happy,
    /// Random catalog reads with occasional basket adds.
    Stress,
}

#[derive(Debug, Clone)]
pub struct LoadProfile {
    pub name: &'static str,
    pub scenario: ScenarioKind,
    pub stages: Vec<Stage>,
    pub thresholds: Thresholds,
    /// Multiplier applied to every think-time pause.
    pub think_time_scale: f64,
}

impl LoadProfile {
    pub fn happy() -> Self {
        Self {
            name: "happy",
            scenario: ScenarioKind::Happy,
            stages: vec![
                Stage::new(Duration::from_secs(30), 10),
                Stage::new(Duration::from_secs(60), 10),
                Stage::new(Duration::from_secs(30), 0),
            ],
            thresholds: Thresholds {
                p95_latency: Duration::from_millis(800),
                max_failed_rate: 0.01,
                max_check_error_rate: Some(0.01),
            },
            think_time_scale: 1.0,
        }
    }

    pub fn stress() -> Self {
        Self {
            name: "stress",
            scenario: ScenarioKind::Stress,
            stages: vec![
                Stage::new(Duration::from_secs(60), 50),
                Stage::new(Duration::from_secs(180), 100),
                Stage::new(Duration::from_secs(120), 100),
                Stage::new(Duration::from_secs(60), 0),
            ],
            thresholds: Thresholds {
                p95_latency: Duration::from_millis(1200),
                max_failed_rate: 0.05,
                max_check_error_rate: None,
            },
            think_time_scale: 1.0,
        }
    }

    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "happy" => Some(Self::happy()),
            "stress" => Some(Self::stress()),
            _ => None,
        }
    }

    pub fn with_stages(mut self, stages: Vec<Stage>) -> Self {
        self.stages = stages;
        self
    }

    pub fn with_think_time_scale(mut self, scale: f64) -> Self {
        self.think_time_scale = scale.max(0.0);
        self
    }

    pub fn total_duration(&self) -> Duration {
        self.stages.iter().map(|stage| stage.duration).sum()
    }

    pub fn peak_target(&self) -> u32 {
        self.stages.iter().map(|stage| stage.target).max().unwrap_or(0)
    }

    /// Desired VU count `elapsed` into the run. Ramps start from zero.
    pub fn target_at(&self, elapsed: Duration) -> u32 {
        let mut from = 0_u32;
        let mut stage_start = Duration::ZERO;
        for stage in &self.stages {
            let stage_end = stage_start + stage.duration;
            if elapsed < stage_end {
                let progress = (elapsed - stage_start).as_secs_f64() / stage.duration.as_secs_f64();
                let from = f64::from(from);
                let to = f64::from(stage.target);
                return (from + (to - from) * progress).round() as u32;
            }
            from = stage.target;
            stage_start = stage_end;
        }
        from
    }

    pub(crate) fn think_time(&self, pause: Duration) -> Duration {
        pause.mul_f64(self.think_time_scale)
    }
}
