use crate::scenario::scenario::{Department, Scenario};

/// A mid-size hospital on a weekday afternoon.
pub struct BasicScenario {
    departments: Vec<Department>,
}

impl BasicScenario {
    pub fn build() -> Box<dyn Scenario> {
        let departments = vec![
            Department::new("Emergency", 20.0, 5.0, 5),
            Department::new("Cardiology", 6.0, 2.5, 3),
            Department::new("Orthopedics", 5.0, 3.0, 2),
            Department::new("Pediatrics", 9.0, 4.0, 3),
            Department::new("General Medicine", 12.0, 5.0, 3),
        ];
        Box::new(BasicScenario { departments })
    }
}

impl Scenario for BasicScenario {
    fn name(&self) -> &str {
        "basic"
    }

    fn departments(&self) -> Vec<Department> {
        self.departments.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_department_starts_stable() {
        let scenario = BasicScenario::build();
        let departments = scenario.departments();

        assert_eq!(5, departments.len());
        assert!(departments.iter().all(|d| d.metrics().is_ok()));
    }
}
