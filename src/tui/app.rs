use crate::analysis::staffing::{StaffingRow, staffing_table};
use crate::scenario::scenario::{Department, Scenario};
use crossterm::event::KeyCode;

const ARRIVAL_STEP: f64 = 1.0;
const SERVICE_STEP: f64 = 0.5;

pub struct App {
    pub running: bool,
    scenario_name: String,
    departments: Vec<Department>,
    selected: usize,
    sweep_width: u32,
}

impl App {
    pub fn new(scenario: &dyn Scenario, sweep_width: u32) -> Self {
        Self {
            running: true,
            scenario_name: scenario.name().to_string(),
            departments: scenario.departments(),
            selected: 0,
            sweep_width,
        }
    }

    pub fn scenario_name(&self) -> &str {
        &self.scenario_name
    }

    pub fn departments(&self) -> &[Department] {
        &self.departments
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_department(&self) -> Option<&Department> {
        self.departments.get(self.selected)
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.running = false,
            KeyCode::Down => self.select_next(),
            KeyCode::Up => self.select_previous(),
            KeyCode::Char('+') => self.edit(|d| d.set_servers(d.servers().saturating_add(1))),
            KeyCode::Char('-') => self.edit(|d| d.set_servers(d.servers().saturating_sub(1))),
            KeyCode::Char('>') => self.edit(|d| d.set_arrival_rate(d.arrival_rate() + ARRIVAL_STEP)),
            KeyCode::Char('<') => self.edit(|d| d.set_arrival_rate(d.arrival_rate() - ARRIVAL_STEP)),
            KeyCode::Char(']') => self.edit(|d| d.set_service_rate(d.service_rate() + SERVICE_STEP)),
            KeyCode::Char('[') => self.edit(|d| d.set_service_rate(d.service_rate() - SERVICE_STEP)),
            _ => {}
        }
    }

    /// Staffing sweep for the selected department, one below its current
    /// server count through `sweep_width` above.
    pub fn staffing_rows(&self) -> Vec<StaffingRow> {
        match self.selected_department() {
            Some(d) => {
                let from = d.servers().saturating_sub(1).max(1);
                let to = d.servers().saturating_add(self.sweep_width);
                staffing_table(d.arrival_rate(), d.service_rate(), from..=to)
            }
            None => Vec::new(),
        }
    }

    fn select_next(&mut self) {
        if !self.departments.is_empty() {
            self.selected = (self.selected + 1) % self.departments.len();
        }
    }

    fn select_previous(&mut self) {
        if !self.departments.is_empty() {
            self.selected = (self.selected + self.departments.len() - 1) % self.departments.len();
        }
    }

    fn edit(&mut self, f: impl FnOnce(&mut Department)) {
        if let Some(d) = self.departments.get_mut(self.selected) {
            f(d);
        }
    }
}
