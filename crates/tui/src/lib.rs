mod app;
mod async_ops;
mod settings;
mod theme;
mod ui;
mod views;

pub use app::{App, DashFocus, LoginField, Screen};
pub use async_ops::Action;

use anyhow::{Context, Result};
use crossterm::{
    ExecutableCommand,
    event::{self, Event, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use std::io::stdout;
use std::time::Duration;

use focusflow_local_store::LocalStore;

/// Startup overrides from the command line.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Server URL; falls back to the config file, then the default.
    pub server_url: Option<String>,
}

/// Launch the TUI.
pub fn run(options: RunOptions) -> Result<()> {
    let store = LocalStore::open().context("locating the config directory")?;
    let stored = store.load();
    let server_url = options.server_url.unwrap_or(stored.server.url);

    let mut app = App::new(store, server_url);
    app.apply_effects();
    if let Some(token) = stored.auth.token {
        // Try the saved session before showing the login form.
        app.login.status = Some("Restoring session...".to_string());
        app.pending = Some(Action::RestoreSession { token });
    }

    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;

    loop {
        // One queued action per frame; session mutations all happen here.
        if let Some(action) = app.pending.take() {
            rt.block_on(async_ops::dispatch(app, action));
        }

        terminal.draw(|frame| ui::render(frame, app))?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press && app.handle_key(key.code) {
                break;
            }
        }
    }
    Ok(())
}
