pub mod error;
pub mod metrics;
pub mod params;
