use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::config::Settings;
use crate::render::Mounts;

mod event_loop;
mod settings;
mod startup;

pub use settings::load_settings;
pub use startup::build_session;

/// Run the interactive player until the user quits.
pub fn run(settings: &Settings) -> anyhow::Result<()> {
    let mut session = build_session(settings, Mounts::from_ids(&settings.ui.panes));

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = {
        let mut state = event_loop::EventLoopState::new();
        event_loop::run(&mut terminal, settings, &mut session, &mut state)
    };

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}
