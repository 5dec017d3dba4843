pub mod app;
pub mod draw;

use crate::tui::app::App;
use crate::tui::draw::draw_app;
use crossterm::event::{Event, KeyEventKind};
use std::io;
use std::time::Duration;

/// Runs the dashboard until the user quits. The terminal is restored on
/// every exit path.
pub fn run(app: &mut App) -> io::Result<()> {
    let mut terminal = ratatui::init();
    let result = event_loop(&mut terminal, app);
    ratatui::restore();
    result
}

fn event_loop(terminal: &mut ratatui::DefaultTerminal, app: &mut App) -> io::Result<()> {
    while app.running {
        terminal.draw(|frame| draw_app(frame, app))?;

        if crossterm::event::poll(Duration::from_millis(16))? {
            if let Event::Key(key) = crossterm::event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key.code);
                }
            }
        }
    }
    Ok(())
}
