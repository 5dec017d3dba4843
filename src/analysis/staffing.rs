use crate::engine::engine::metrics_for;
use crate::queue::error::{InvalidParameter, QueueError, Result};
use crate::queue::metrics::QueueMetrics;
use crate::queue::params::{QueueParameters, validate};
use std::ops::RangeInclusive;
use tracing::debug;

pub struct StaffingRow {
    servers: u32,
    outcome: Result<QueueMetrics>,
}

impl StaffingRow {
    pub fn servers(&self) -> u32 {
        self.servers
    }

    pub fn outcome(&self) -> &Result<QueueMetrics> {
        &self.outcome
    }

    pub fn metrics(&self) -> Option<&QueueMetrics> {
        self.outcome.as_ref().ok()
    }
}

/// Evaluates the queue once per server count in `servers`.
pub fn staffing_table(
    arrival_rate: f64,
    service_rate: f64,
    servers: RangeInclusive<u32>,
) -> Vec<StaffingRow> {
    servers
        .map(|c| StaffingRow {
            servers: c,
            outcome: QueueParameters::new(arrival_rate, service_rate, c)
                .and_then(|params| metrics_for(&params)),
        })
        .collect()
}

/// Smallest server count that can hold a steady state, `floor(λ/μ) + 1`.
pub fn first_stable_servers(arrival_rate: f64, service_rate: f64) -> Result<u32> {
    validate(arrival_rate, service_rate, 1)?;
    let offered_load = arrival_rate / service_rate;
    if offered_load >= u32::MAX as f64 {
        return Err(QueueError::UnstableQueue {
            utilization: offered_load / u32::MAX as f64,
        });
    }
    Ok(offered_load.floor() as u32 + 1)
}

/// Smallest `c <= max_servers` whose average wait is at most `target_wait`.
pub fn min_servers_for_wait(
    arrival_rate: f64,
    service_rate: f64,
    target_wait: f64,
    max_servers: u32,
) -> Result<Option<u32>> {
    if !(target_wait >= 0.0) || !target_wait.is_finite() {
        return Err(InvalidParameter::InvalidTargetWait(target_wait).into());
    }
    let first = first_stable_servers(arrival_rate, service_rate)?;

    for servers in first..=max_servers {
        let params = match QueueParameters::new(arrival_rate, service_rate, servers) {
            Ok(params) => params,
            Err(QueueError::UnstableQueue { .. }) => continue,
            Err(err) => return Err(err),
        };
        let metrics = match metrics_for(&params) {
            Ok(metrics) => metrics,
            Err(QueueError::UnstableQueue { .. }) => continue,
            Err(err) => return Err(err),
        };
        if metrics.avg_wait_time() <= target_wait {
            debug!(servers, wait = metrics.avg_wait_time(), "staffing target met");
            return Ok(Some(servers));
        }
    }
    Ok(None)
}
