use serde::Serialize;

/// Steady-state performance of a stable M/M/c queue.
///
/// Values are unrounded; use [`QueueMetrics::report`] for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QueueMetrics {
    utilization: f64,
    erlang_c: f64,
    probability_no_wait: f64,
    probability_idle: f64,
    avg_wait_time: f64,
    avg_queue_length: f64,
    avg_time_in_system: f64,
    avg_patients_in_system: f64,
}

impl QueueMetrics {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        utilization: f64,
        erlang_c: f64,
        probability_no_wait: f64,
        probability_idle: f64,
        avg_wait_time: f64,
        avg_queue_length: f64,
        avg_time_in_system: f64,
        avg_patients_in_system: f64,
    ) -> Self {
        Self {
            utilization,
            erlang_c,
            probability_no_wait,
            probability_idle,
            avg_wait_time,
            avg_queue_length,
            avg_time_in_system,
            avg_patients_in_system,
        }
    }

    pub fn utilization(&self) -> f64 {
        self.utilization
    }

    /// Probability an arrival finds every server busy.
    pub fn erlang_c(&self) -> f64 {
        self.erlang_c
    }

    pub fn probability_no_wait(&self) -> f64 {
        self.probability_no_wait
    }

    /// Probability the whole pool is idle (p0).
    pub fn probability_idle(&self) -> f64 {
        self.probability_idle
    }

    /// Wq, time queueing before service starts.
    pub fn avg_wait_time(&self) -> f64 {
        self.avg_wait_time
    }

    /// Lq, excludes entities in service.
    pub fn avg_queue_length(&self) -> f64 {
        self.avg_queue_length
    }

    /// W = Wq + 1/μ
    pub fn avg_time_in_system(&self) -> f64 {
        self.avg_time_in_system
    }

    /// L = Lq + λ/μ
    pub fn avg_patients_in_system(&self) -> f64 {
        self.avg_patients_in_system
    }

    pub fn report(&self) -> QueueReport {
        QueueReport {
            utilization: round_to(self.utilization, 3),
            avg_wait_time: round_to(self.avg_wait_time, 2),
            avg_queue_length: round_to(self.avg_queue_length, 2),
            avg_patients_in_system: round_to(self.avg_patients_in_system, 2),
            avg_time_in_system: round_to(self.avg_time_in_system, 2),
            erlang_c: round_to(self.erlang_c, 3),
            prob_no_wait: round_to(self.probability_no_wait, 3),
        }
    }
}

/// Rounded view of [`QueueMetrics`] handed to presentation layers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QueueReport {
    pub utilization: f64,
    pub avg_wait_time: f64,
    pub avg_queue_length: f64,
    pub avg_patients_in_system: f64,
    pub avg_time_in_system: f64,
    pub erlang_c: f64,
    pub prob_no_wait: f64,
}

pub fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_round_to() {
        assert_relative_eq!(1.333, round_to(4.0 / 3.0, 3));
        assert_relative_eq!(0.22, round_to(0.215_73, 2));
        assert_relative_eq!(2.0, round_to(1.999, 2));
    }

    #[test]
    fn test_report_rounds_each_field() {
        let metrics = QueueMetrics::new(
            0.8,
            0.647_191,
            0.352_809,
            0.056_18,
            0.215_73,
            2.588_764,
            0.415_73,
            4.988_764,
        );
        let report = metrics.report();

        assert_relative_eq!(0.8, report.utilization);
        assert_relative_eq!(0.647, report.erlang_c);
        assert_relative_eq!(0.353, report.prob_no_wait);
        assert_relative_eq!(0.22, report.avg_wait_time);
        assert_relative_eq!(2.59, report.avg_queue_length);
        assert_relative_eq!(0.42, report.avg_time_in_system);
        assert_relative_eq!(4.99, report.avg_patients_in_system);
    }

    #[test]
    fn test_report_serializes_with_handler_field_names() {
        let metrics = QueueMetrics::new(0.5, 0.5, 0.5, 0.25, 0.1, 0.2, 0.3, 1.2);
        let json = serde_json::to_value(metrics.report()).unwrap();

        assert_eq!(0.5, json["prob_no_wait"]);
        assert_eq!(0.1, json["avg_wait_time"]);
        assert!(json.get("probability_no_wait").is_none());
    }
}
