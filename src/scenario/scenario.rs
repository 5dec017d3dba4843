use crate::engine::engine::metrics_for;
use crate::queue::error::Result;
use crate::queue::metrics::QueueMetrics;
use crate::queue::params::QueueParameters;
use serde::Deserialize;

/// A pool of identical servers (doctors, exam rooms) behind one queue.
/// Rates are per hour.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Department {
    name: String,
    arrival_rate: f64,
    service_rate: f64,
    servers: u32,
}

impl Department {
    const MIN_SERVICE_RATE: f64 = 0.5;

    pub fn new(name: impl Into<String>, arrival_rate: f64, service_rate: f64, servers: u32) -> Self {
        Self {
            name: name.into(),
            arrival_rate,
            service_rate,
            servers,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arrival_rate(&self) -> f64 {
        self.arrival_rate
    }

    pub fn service_rate(&self) -> f64 {
        self.service_rate
    }

    pub fn servers(&self) -> u32 {
        self.servers
    }

    pub fn set_arrival_rate(&mut self, arrival_rate: f64) {
        self.arrival_rate = arrival_rate.max(0.0);
    }

    /// Clamped to a small positive floor so the pool never stops serving.
    pub fn set_service_rate(&mut self, service_rate: f64) {
        self.service_rate = service_rate.max(Self::MIN_SERVICE_RATE);
    }

    pub fn set_servers(&mut self, servers: u32) {
        self.servers = servers.max(1);
    }

    pub fn params(&self) -> Result<QueueParameters> {
        QueueParameters::new(self.arrival_rate, self.service_rate, self.servers)
    }

    pub fn metrics(&self) -> Result<QueueMetrics> {
        self.params().and_then(|params| metrics_for(&params))
    }
}

pub trait Scenario {
    fn name(&self) -> &str;
    fn departments(&self) -> Vec<Department>;
}

/// Departments taken verbatim from a settings file.
pub struct ConfiguredScenario {
    departments: Vec<Department>,
}

impl ConfiguredScenario {
    pub fn new(departments: Vec<Department>) -> Self {
        Self { departments }
    }
}

impl Scenario for ConfiguredScenario {
    fn name(&self) -> &str {
        "configured"
    }

    fn departments(&self) -> Vec<Department> {
        self.departments.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queue::error::QueueError;
    use approx::assert_relative_eq;

    #[test]
    fn test_setters_clamp_to_valid_inputs() {
        let mut dept = Department::new("Emergency", 12.0, 5.0, 3);
        dept.set_servers(0);
        dept.set_arrival_rate(-3.0);
        dept.set_service_rate(0.0);

        assert_eq!(1, dept.servers());
        assert_relative_eq!(0.0, dept.arrival_rate());
        assert_relative_eq!(0.5, dept.service_rate());
        assert!(dept.metrics().is_ok());
    }

    #[test]
    fn test_metrics_follow_parameters() {
        let mut dept = Department::new("Emergency", 12.0, 5.0, 3);
        assert_relative_eq!(0.8, dept.metrics().unwrap().utilization());

        dept.set_servers(2);
        assert!(matches!(dept.metrics(), Err(QueueError::UnstableQueue { .. })));
    }

    #[test]
    fn test_configured_scenario_returns_its_departments() {
        let departments = vec![Department::new("Triage", 4.0, 6.0, 1)];
        let scenario = ConfiguredScenario::new(departments.clone());
        assert_eq!(departments, scenario.departments());
    }
}
