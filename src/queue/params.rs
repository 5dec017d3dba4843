use crate::queue::error::{InvalidParameter, QueueError, Result};

/// Validated inputs of an M/M/c queue. Construction fails for non-physical
/// or unstable configurations, so every instance has `0 <= utilization < 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueueParameters {
    /// arrival_rate >= 0.0
    arrival_rate: f64,
    /// service_rate > 0.0
    service_rate: f64,
    /// servers >= 1
    servers: u32,
    offered_load: f64,
    utilization: f64,
}

impl QueueParameters {
    pub fn new(arrival_rate: f64, service_rate: f64, servers: u32) -> Result<Self> {
        validate(arrival_rate, service_rate, servers)?;

        // λ/(cμ) stays below 1 whenever λ < cμ; (λ/μ)/c can round up to 1
        let capacity = servers as f64 * service_rate;
        let utilization = arrival_rate / capacity;
        if !(capacity - arrival_rate > 0.0) {
            return Err(QueueError::UnstableQueue { utilization });
        }

        Ok(Self {
            arrival_rate,
            service_rate,
            servers,
            offered_load: arrival_rate / service_rate,
            utilization,
        })
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

    /// λ/μ, demand in units of one server's capacity (Erlangs).
    pub fn offered_load(&self) -> f64 {
        self.offered_load
    }

    /// λ/(cμ)
    pub fn utilization(&self) -> f64 {
        self.utilization
    }

    /// cμ - λ, the rate at which the pool can drain a backlog.
    pub fn spare_capacity(&self) -> f64 {
        self.servers as f64 * self.service_rate - self.arrival_rate
    }
}

pub(crate) fn validate(arrival_rate: f64, service_rate: f64, servers: u32) -> Result<()> {
    if servers == 0 {
        return Err(InvalidParameter::NoServers.into());
    }
    if service_rate.is_nan() || service_rate <= 0.0 {
        return Err(InvalidParameter::NonPositiveServiceRate(service_rate).into());
    }
    if !service_rate.is_finite() {
        return Err(InvalidParameter::NonFiniteServiceRate(service_rate).into());
    }
    if arrival_rate < 0.0 {
        return Err(InvalidParameter::NegativeArrivalRate(arrival_rate).into());
    }
    if !arrival_rate.is_finite() {
        return Err(InvalidParameter::NonFiniteArrivalRate(arrival_rate).into());
    }
    Ok(())
}
