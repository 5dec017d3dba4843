use crate::analysis::pressure::LoadLevel;
use crate::queue::error::{QueueError, Result};
use crate::queue::metrics::QueueMetrics;
use crate::tui::app::App;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::style::Color::White;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Padding, Paragraph, Row, Table};

const UNBOUNDED: &str = "     ∞";
const MISSING: &str = "     -";

pub fn draw_app(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length((app.departments().len() + 3) as u16),
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(frame.area());

    frame.render_widget(build_header(app), chunks[0]);
    frame.render_widget(build_department_table(app), chunks[2]);
    frame.render_widget(build_staffing_table(app), chunks[4]);
    frame.render_widget(build_help(), chunks[5]);
}

fn level_style(level: Option<LoadLevel>) -> Style {
    match level {
        Some(LoadLevel::Low) => Style::default().fg(Color::Green),
        Some(LoadLevel::Medium) => Style::default().yellow(),
        Some(LoadLevel::High) => Style::default().light_red(),
        Some(LoadLevel::Critical) => Style::default().red().bold(),
        None => Style::default().add_modifier(Modifier::DIM),
    }
}

fn minutes(hours: f64) -> String {
    format!("{:>6.1}", hours * 60.0)
}

/// Util, wait, Lq and P(no wait) cells of a department row.
fn department_values(outcome: &Result<QueueMetrics>) -> [String; 4] {
    match outcome {
        Ok(m) => [
            format!("{:>6.3}", m.utilization()),
            minutes(m.avg_wait_time()),
            format!("{:>6.2}", m.avg_queue_length()),
            format!("{:>6.3}", m.probability_no_wait()),
        ],
        Err(QueueError::UnstableQueue { utilization }) => [
            format!("{:>6.3}", utilization),
            UNBOUNDED.to_string(),
            UNBOUNDED.to_string(),
            MISSING.to_string(),
        ],
        Err(_) => [(); 4].map(|_| MISSING.to_string()),
    }
}

/// Util, P(wait), wait, Lq and W cells of a staffing row.
fn staffing_values(outcome: &Result<QueueMetrics>) -> [String; 5] {
    match outcome {
        Ok(m) => [
            format!("{:>6.3}", m.utilization()),
            format!("{:>6.3}", m.erlang_c()),
            minutes(m.avg_wait_time()),
            format!("{:>6.2}", m.avg_queue_length()),
            minutes(m.avg_time_in_system()),
        ],
        Err(err @ QueueError::UnstableQueue { .. }) => [
            err.overload_percent()
                .map(|p| format!("+{:.0}%", p))
                .unwrap_or_else(|| MISSING.to_string()),
            format!("{:>6.3}", 1.0),
            UNBOUNDED.to_string(),
            UNBOUNDED.to_string(),
            UNBOUNDED.to_string(),
        ],
        Err(_) => [(); 5].map(|_| MISSING.to_string()),
    }
}

fn build_header(app: &'_ App) -> Block<'_> {
    Block::new()
        .title(Line::from(vec![
            Span::raw(" Queueflow ").style(Style::default().bold().cyan()),
            Span::raw("|").style(Style::default().add_modifier(Modifier::DIM)),
            Span::raw(" Scenario: ").style(Style::default().add_modifier(Modifier::DIM)),
            Span::raw(app.scenario_name().to_owned()).style(Style::default().bold()),
            Span::raw(" "),
        ]))
        .title_alignment(Alignment::Center)
}

fn build_department_table(app: &'_ App) -> Table<'_> {
    Table::new(
        app.departments().iter().enumerate().map(|(i, d)| {
            let outcome = d.metrics();
            let level = LoadLevel::from_outcome(&outcome);
            let style = level_style(level);

            let mut cells = vec![
                Cell::from(d.name().to_owned()),
                Cell::from(format!("{:>6.1}", d.arrival_rate())),
                Cell::from(format!("{:>6.1}", d.service_rate())),
                Cell::from(format!("{:>4}", d.servers())),
            ];
            let [util, wait, queue, no_wait] = department_values(&outcome);
            cells.extend([
                Cell::from(util).style(style),
                Cell::from(wait),
                Cell::from(queue),
                Cell::from(no_wait),
            ]);
            cells.push(
                Cell::from(level.map(|l| format!("{:?}", l)).unwrap_or_default()).style(style),
            );

            let row = Row::new(cells);
            if i == app.selected() {
                row.style(Style::default().add_modifier(Modifier::REVERSED))
            } else {
                row
            }
        }),
        [
            Constraint::Length(20),
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Length(6),
            Constraint::Length(8),
            Constraint::Length(10),
            Constraint::Length(8),
            Constraint::Length(10),
            Constraint::Length(9),
        ],
    )
    .header(
        Row::new([
            Cell::from("Department"),
            Cell::from("  λ/h"),
            Cell::from("  μ/h"),
            Cell::from("   c"),
            Cell::from("  Util"),
            Cell::from("Wait (min)"),
            Cell::from("    Lq"),
            Cell::from("P(no wait)"),
            Cell::from("Level"),
        ])
        .style(Style::default().bg(Color::DarkGray).fg(White)),
    )
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(Line::from(vec![
                Span::from(" Departments ").style(Style::default().bold()),
            ]))
            .padding(Padding::horizontal(1)),
    )
}

fn build_staffing_table(app: &'_ App) -> Table<'_> {
    let title = app
        .selected_department()
        .map(|d| format!(" Staffing: {} ", d.name()))
        .unwrap_or_else(|| " Staffing ".to_string());
    let current = app.selected_department().map(|d| d.servers());

    Table::new(
        app.staffing_rows().into_iter().map(|row| {
            let level = LoadLevel::from_outcome(row.outcome());
            let style = level_style(level);
            let marker = if Some(row.servers()) == current { "▸" } else { " " };

            let [util, wait_probability, wait, queue, in_system] = staffing_values(row.outcome());
            let cells = vec![
                Cell::from(format!("{} {:>4}", marker, row.servers())),
                Cell::from(util).style(style),
                Cell::from(wait_probability),
                Cell::from(wait),
                Cell::from(queue),
                Cell::from(in_system),
            ];
            Row::new(cells)
        }),
        [
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Length(10),
            Constraint::Length(8),
            Constraint::Length(10),
        ],
    )
    .header(
        Row::new([
            Cell::from("Servers"),
            Cell::from("  Util"),
            Cell::from("P(wait)"),
            Cell::from("Wait (min)"),
            Cell::from("    Lq"),
            Cell::from("W (min)"),
        ])
        .style(Style::default().bg(Color::DarkGray).fg(White)),
    )
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(Line::from(vec![Span::from(title).style(Style::default().bold())]))
            .padding(Padding::horizontal(1)),
    )
}

fn build_help() -> Paragraph<'static> {
    Paragraph::new(" q quit  ↑/↓ select  +/- servers  </> arrivals  [/] service rate")
        .style(Style::default().add_modifier(Modifier::DIM))
}
