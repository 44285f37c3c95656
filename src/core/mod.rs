// Threshold evaluation, metric checks and result aggregation

pub mod checks;
pub mod config;
pub mod result;
pub mod status;

// Re-export commonly used items
pub use config::{CheckConfig, Mode};
pub use result::{Overall, PartialResult, PerfData};
pub use status::{evaluate_threshold, worst_of, Status, Thresholds};
