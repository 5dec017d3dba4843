use crate::scenario::scenario::{Department, Scenario};
use rand::{Rng, SeedableRng, rngs::StdRng};

const NAMES: [&str; 8] = [
    "Emergency",
    "Cardiology",
    "Orthopedics",
    "Pediatrics",
    "General Medicine",
    "Radiology",
    "Neurology",
    "Oncology",
];

/// Reproducible department set: same seed, same departments.
pub struct RandomScenario {
    departments: Vec<Department>,
}

impl RandomScenario {
    pub fn build(seed: u64) -> Box<dyn Scenario> {
        let mut rng = StdRng::seed_from_u64(seed);
        let count = rng.gen_range(3..=NAMES.len());

        let departments = NAMES
            .iter()
            .take(count)
            .map(|name| {
                let servers = rng.gen_range(1..=8u32);
                let service_rate = rng.gen_range(1.0..6.0);
                // anywhere from idle to slightly past capacity
                let utilization = rng.gen_range(0.2..1.1);
                let arrival_rate = utilization * servers as f64 * service_rate;
                Department::new(*name, round_rate(arrival_rate), round_rate(service_rate), servers)
            })
            .collect();

        Box::new(RandomScenario { departments })
    }
}

fn round_rate(rate: f64) -> f64 {
    (rate * 10.0).round() / 10.0
}

impl Scenario for RandomScenario {
    fn name(&self) -> &str {
        "random"
    }

    fn departments(&self) -> Vec<Department> {
        self.departments.clone()
    }
}
