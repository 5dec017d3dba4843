use crate::queue::error::Result;
use crate::queue::metrics::QueueMetrics;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl LoadLevel {
    pub fn from_utilization(utilization: f64) -> Self {
        match utilization {
            u if u < 0.70 => LoadLevel::Low,
            u if u < 0.85 => LoadLevel::Medium,
            u if u < 1.0 => LoadLevel::High,
            _ => LoadLevel::Critical,
        }
    }

    /// `None` when the request was rejected outright.
    pub fn from_outcome(outcome: &Result<QueueMetrics>) -> Option<Self> {
        match outcome {
            Ok(metrics) => Some(Self::from_utilization(metrics.utilization())),
            Err(err) if err.is_unstable() => Some(LoadLevel::Critical),
            Err(_) => None,
        }
    }
}
