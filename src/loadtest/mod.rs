pub mod profile;
pub mod report;
pub mod runner;
mod scenario;

pub use profile::{LoadProfile, ScenarioKind, Stage, Thresholds};
pub use report::{LoadReport, Sample, ThresholdResult};
pub use runner::run;
