mod app;
mod components;
mod config;
mod error;
mod event;
mod fs;
mod handler;
mod theme;
mod tui;
mod ui;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::app::{App, NavState};
use crate::config::AppConfig;
use crate::event::{Event, EventHandler};
use crate::fs::watcher::FsWatcher;
use crate::theme::resolve_theme;
use crate::tui::{install_panic_hook, Tui};

/// A terminal file explorer with live directory refresh.
#[derive(Parser, Debug)]
#[command(name = "cfx", version, about)]
struct Cli {
    /// Start path (defaults to the home directory)
    path: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> error::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load();
    let theme = resolve_theme(&config.theme);

    let start = cli
        .path
        .or_else(|| config.default_path())
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."));
    let path = start.canonicalize().map_err(|_| {
        error::AppError::InvalidPath(format!("{} does not exist", start.display()))
    })?;

    install_panic_hook();

    let mut app = App::new(&path)?;
    let mut tui = Tui::new()?;
    let mut events = EventHandler::new(Duration::from_millis(16));
    let event_tx = events.sender();

    let mut watcher = if config.watcher_enabled() {
        match FsWatcher::new(
            &path,
            Duration::from_millis(config.debounce_ms()),
            event_tx.clone(),
        ) {
            Ok(watcher) => Some(watcher),
            Err(e) => {
                app.set_error(format!("Watcher unavailable: {e}"));
                None
            }
        }
    } else {
        None
    };

    loop {
        app.clear_expired_status();
        tui.terminal_mut().draw(|frame| {
            ui::render(&mut app, &theme, frame);
        })?;

        match events.next().await? {
            Event::Key(key) => handler::handle_key_event(&mut app, key),
            Event::Tick => {}
            Event::Resize(_, _) => {}
            Event::FsChange(_) => app.on_external_change(),
            Event::WatchError(msg) => app.set_error(format!("Watch error: {msg}")),
        }

        // Re-point the watch only after a successful navigation; a failed
        // one keeps the previous directory and therefore the previous watch.
        if let Some(ref mut watcher) = watcher {
            if app.nav_state == NavState::Idle && watcher.root() != app.current_dir.as_path() {
                if let Err(e) = watcher.repoint(&app.current_dir) {
                    app.set_error(format!(
                        "Cannot watch {}: {e}",
                        app.current_dir.display()
                    ));
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    tui.restore()?;
    Ok(())
}
