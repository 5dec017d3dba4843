use thiserror::Error;

pub type Result<T> = std::result::Result<T, QueueError>;

/// Which input made a request non-physical.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum InvalidParameter {
    #[error("at least one server is required")]
    NoServers,
    #[error("service rate must be positive, got {0}")]
    NonPositiveServiceRate(f64),
    #[error("arrival rate must not be negative, got {0}")]
    NegativeArrivalRate(f64),
    #[error("arrival rate must be finite, got {0}")]
    NonFiniteArrivalRate(f64),
    #[error("service rate must be finite, got {0}")]
    NonFiniteServiceRate(f64),
    #[error("target wait must be finite and non-negative, got {0}")]
    InvalidTargetWait(f64),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueueError {
    #[error("invalid queue parameters: {0}")]
    InvalidParameters(#[from] InvalidParameter),

    /// The queue has no steady state; wait time grows without bound.
    #[error("unstable queue: utilization {utilization:.3} >= 1")]
    UnstableQueue { utilization: f64 },

    /// Internal numerical failure. Never mapped to a published metric.
    #[error("erlang-c computation failed: {0}")]
    Computation(String),
}

impl QueueError {
    /// How far past capacity an unstable queue is, in percent.
    pub fn overload_percent(&self) -> Option<f64> {
        match self {
            QueueError::UnstableQueue { utilization } => Some((utilization - 1.0) * 100.0),
            _ => None,
        }
    }

    pub fn is_unstable(&self) -> bool {
        matches!(self, QueueError::UnstableQueue { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_overload_percent_only_for_unstable() {
        let err = QueueError::UnstableQueue { utilization: 1.25 };
        assert_relative_eq!(25.0, err.overload_percent().unwrap());
        assert!(err.is_unstable());

        let err = QueueError::from(InvalidParameter::NoServers);
        assert_eq!(None, err.overload_percent());
        assert!(!err.is_unstable());
    }

    #[test]
    fn test_messages_name_the_offending_input() {
        let err = QueueError::from(InvalidParameter::NegativeArrivalRate(-1.0));
        assert_eq!(
            "invalid queue parameters: arrival rate must not be negative, got -1",
            err.to_string()
        );

        let err = QueueError::UnstableQueue {
            utilization: 4.0 / 3.0,
        };
        assert_eq!("unstable queue: utilization 1.333 >= 1", err.to_string());
    }
}
