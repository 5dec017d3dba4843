use crate::engine::erlang::{ErlangC, erlang_c_for};
use crate::queue::error::{QueueError, Result};
use crate::queue::metrics::QueueMetrics;
use crate::queue::params::QueueParameters;
use tracing::debug;

/// Steady-state metrics of an M/M/c queue.
///
/// Fails with [`QueueError::InvalidParameters`] for non-physical input and
/// [`QueueError::UnstableQueue`] when `arrival_rate >= servers * service_rate`.
pub fn compute_metrics(
    arrival_rate: f64,
    service_rate: f64,
    servers: u32,
) -> Result<QueueMetrics> {
    let params = QueueParameters::new(arrival_rate, service_rate, servers)?;
    metrics_for(&params)
}

/// Probability an arrival is served immediately, `1 - C`.
///
/// Always equal to `compute_metrics(..).probability_no_wait()` for the same
/// inputs.
pub fn probability_no_wait(arrival_rate: f64, service_rate: f64, servers: u32) -> Result<f64> {
    let params = QueueParameters::new(arrival_rate, service_rate, servers)?;
    Ok(solve(&params)?.probability_no_wait())
}

pub fn metrics_for(params: &QueueParameters) -> Result<QueueMetrics> {
    let solution = solve(params)?;
    let erlang_c = solution.erlang.probability_wait();

    let avg_wait_time = erlang_c / solution.spare_capacity;
    let avg_queue_length = params.arrival_rate() * avg_wait_time;
    let avg_time_in_system = avg_wait_time + 1.0 / params.service_rate();
    let avg_patients_in_system = avg_queue_length + params.offered_load();

    Ok(QueueMetrics::new(
        params.utilization(),
        erlang_c,
        solution.probability_no_wait(),
        solution.erlang.probability_idle(),
        avg_wait_time,
        avg_queue_length,
        avg_time_in_system,
        avg_patients_in_system,
    ))
}

struct Solution {
    erlang: ErlangC,
    spare_capacity: f64,
}

impl Solution {
    fn probability_no_wait(&self) -> f64 {
        1.0 - self.erlang.probability_wait()
    }
}

fn solve(params: &QueueParameters) -> Result<Solution> {
    debug!(
        arrival_rate = params.arrival_rate(),
        service_rate = params.service_rate(),
        servers = params.servers(),
        offered_load = params.offered_load(),
        utilization = params.utilization(),
        "evaluating erlang-c"
    );

    let spare_capacity = params.spare_capacity();
    if !(spare_capacity > 0.0) {
        return Err(QueueError::UnstableQueue {
            utilization: params.utilization(),
        });
    }

    let erlang = erlang_c_for(params)?;
    Ok(Solution {
        erlang,
        spare_capacity,
    })
}
