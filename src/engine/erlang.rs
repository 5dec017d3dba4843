use crate::queue::error::{InvalidParameter, QueueError, Result};
use crate::queue::params::QueueParameters;
use tracing::warn;

/// Running values are divided by this once they exceed it. The common factor
/// cancels in C, so large server counts never overflow.
const RESCALE_THRESHOLD: f64 = 1e250;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErlangC {
    probability_wait: f64,
    probability_idle: f64,
}

impl ErlangC {
    /// C(c, a), the probability an arrival finds every server busy.
    pub fn probability_wait(&self) -> f64 {
        self.probability_wait
    }

    /// p0, the probability the system is empty.
    pub fn probability_idle(&self) -> f64 {
        self.probability_idle
    }
}

/// Erlang-C for `servers` channels under `offered_load` Erlangs.
///
/// Terms a^k/k! are built by the recurrence `term_k = term_{k-1} * a / k`,
/// so neither a^c nor c! is ever formed.
///
/// Requires `0 <= offered_load < servers`.
pub fn erlang_c(servers: u32, offered_load: f64) -> Result<ErlangC> {
    if servers == 0 {
        return Err(InvalidParameter::NoServers.into());
    }
    evaluate(servers, offered_load, offered_load / servers as f64)
}

/// Erlang-C for validated parameters. Uses `λ/(cμ)` for the tail factor, so
/// an offered load λ/μ that rounds up to `c` is still handled.
pub fn erlang_c_for(params: &QueueParameters) -> Result<ErlangC> {
    evaluate(params.servers(), params.offered_load(), params.utilization())
}

fn evaluate(servers: u32, offered_load: f64, utilization: f64) -> Result<ErlangC> {
    if !(offered_load >= 0.0) || !offered_load.is_finite() {
        return Err(QueueError::Computation(format!(
            "offered load must be finite and non-negative, got {}",
            offered_load
        )));
    }
    if !(utilization < 1.0) {
        return Err(QueueError::UnstableQueue { utilization });
    }

    let mut term = 1.0;
    let mut sum_terms = 0.0;
    let mut log_scale = 0.0;
    for k in 1..=servers {
        sum_terms += term;
        term *= offered_load / k as f64;
        // past the peak the terms only shrink
        if term == 0.0 && k as f64 > offered_load {
            break;
        }
        if term > RESCALE_THRESHOLD || sum_terms > RESCALE_THRESHOLD {
            term /= RESCALE_THRESHOLD;
            sum_terms /= RESCALE_THRESHOLD;
            log_scale += RESCALE_THRESHOLD.ln();
        }
    }

    // a^c/c! * c/(c - a) with c/(c - a) = 1/(1 - ρ)
    let last_term = term / (1.0 - utilization);
    let denominator = sum_terms + last_term;
    let probability_wait = last_term / denominator;
    let probability_idle = if log_scale == 0.0 {
        1.0 / denominator
    } else {
        (-(denominator.ln() + log_scale)).exp()
    };

    if !(0.0..=1.0).contains(&probability_wait) || !(0.0..=1.0).contains(&probability_idle) {
        warn!(
            servers,
            offered_load, probability_wait, probability_idle, "erlang-c postcondition violated"
        );
        return Err(QueueError::Computation(format!(
            "probability {} outside [0, 1] for c={} a={}",
            probability_wait, servers, offered_load
        )));
    }

    Ok(ErlangC {
        probability_wait,
        probability_idle,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // Erlang-B recurrence, an independent route to C(c, a).
    fn reference_erlang_c(servers: u32, offered_load: f64) -> f64 {
        let blocking = (1..=servers).fold(1.0, |b, k| {
            offered_load * b / (k as f64 + offered_load * b)
        });
        let c = servers as f64;
        c * blocking / (c - offered_load * (1.0 - blocking))
    }

    #[test]
    fn test_two_servers_one_erlang() {
        let result = erlang_c(2, 1.0).unwrap();
        assert_relative_eq!(1.0 / 3.0, result.probability_wait(), max_relative = 1e-12);
        assert_relative_eq!(1.0 / 3.0, result.probability_idle(), max_relative = 1e-12);
    }

    #[test]
    fn test_three_servers() {
        // sum = 1 + 2.4 + 2.88, last = 2.304 * 3 / 0.6
        let result = erlang_c(3, 2.4).unwrap();
        assert_relative_eq!(11.52 / 17.8, result.probability_wait(), max_relative = 1e-12);
        assert_relative_eq!(1.0 / 17.8, result.probability_idle(), max_relative = 1e-12);
    }

    #[test]
    fn test_single_server_matches_utilization() {
        for load in [0.0, 0.1, 0.5, 0.9, 0.999] {
            let result = erlang_c(1, load).unwrap();
            assert_relative_eq!(load, result.probability_wait(), max_relative = 1e-12);
            assert_relative_eq!(1.0 - load, result.probability_idle(), max_relative = 1e-9);
        }
    }

    #[test]
    fn test_no_load_never_waits() {
        let result = erlang_c(5, 0.0).unwrap();
        assert_eq!(0.0, result.probability_wait());
        assert_eq!(1.0, result.probability_idle());
    }

    #[test]
    fn test_matches_reference_for_moderate_counts() {
        for (servers, load) in [(5, 4.2), (20, 17.5), (50, 30.0), (170, 160.0)] {
            let result = erlang_c(servers, load).unwrap();
            assert_relative_eq!(
                reference_erlang_c(servers, load),
                result.probability_wait(),
                max_relative = 1e-9
            );
        }
    }

    #[test]
    fn test_large_counts_stay_finite() {
        // 171! and 900^900 both overflow f64
        for (servers, load) in [(500, 450.0), (1_000, 900.0), (10_000, 9_900.0)] {
            let result = erlang_c(servers, load).unwrap();
            assert!(result.probability_wait().is_finite());
            assert_relative_eq!(
                reference_erlang_c(servers, load),
                result.probability_wait(),
                max_relative = 1e-9
            );
            assert!(result.probability_idle() >= 0.0);
            assert!(result.probability_idle() < 1e-100);
        }
    }

    #[test]
    fn test_tiny_load_on_many_servers() {
        let result = erlang_c(2_000, 0.5).unwrap();
        assert_eq!(0.0, result.probability_wait());
        assert_relative_eq!((-0.5f64).exp(), result.probability_idle(), max_relative = 1e-12);
    }

    #[test]
    fn test_huge_server_count_with_light_load_stops_early() {
        let result = erlang_c(u32::MAX, 0.5).unwrap();
        assert_eq!(0.0, result.probability_wait());
        assert_relative_eq!((-0.5f64).exp(), result.probability_idle(), max_relative = 1e-12);
    }

    #[test]
    fn test_offered_load_rounding_up_to_servers() {
        // λ is one ulp below cμ; (λ/μ)/c rounds to 1.0 here, λ/(cμ) does not
        let arrival = 1760.502222607952;
        let service = 92.65801171620801;
        let params = QueueParameters::new(arrival, service, 19).unwrap();
        assert!(params.utilization() < 1.0);

        let result = erlang_c_for(&params).unwrap();
        assert!(result.probability_wait() > 0.0 && result.probability_wait() <= 1.0);
        assert!(result.probability_idle() >= 0.0);
    }

    #[test]
    fn test_rejects_overloaded_and_bad_inputs() {
        assert!(matches!(
            erlang_c(3, 3.0),
            Err(QueueError::UnstableQueue { .. })
        ));
        assert!(matches!(
            erlang_c(0, 0.5),
            Err(QueueError::InvalidParameters(InvalidParameter::NoServers))
        ));
        assert!(matches!(erlang_c(3, f64::NAN), Err(QueueError::Computation(_))));
        assert!(matches!(erlang_c(3, -0.5), Err(QueueError::Computation(_))));
    }
}
