//! Steady-state M/M/c queue metrics: a single FCFS queue feeding `c`
//! identical servers with Poisson arrivals and exponential service.
//!
//! ```
//! let metrics = queueflow::compute_metrics(12.0, 5.0, 3).unwrap();
//! assert!(metrics.probability_no_wait() > 0.0);
//! assert_eq!(
//!     metrics.probability_no_wait(),
//!     queueflow::probability_no_wait(12.0, 5.0, 3).unwrap()
//! );
//! ```

pub mod analysis;
pub mod config;
pub mod engine;
pub mod logging;
pub mod queue;
pub mod scenario;
pub mod tui;

pub use engine::engine::{compute_metrics, metrics_for, probability_no_wait};
pub use queue::error::{InvalidParameter, QueueError};
pub use queue::metrics::{QueueMetrics, QueueReport};
pub use queue::params::QueueParameters;
