//! chatflow-tui: Terminal UI for the ChatFlow messenger
//!
//! This crate provides the ratatui front end, including:
//! - Welcome screen and the three-pane / compact messenger layout
//! - Conversation list, message thread, composer and contact panel widgets
//! - Notice toasts and a help overlay
//! - The terminal event pump and main loop

mod app;
mod event;
pub mod layout;
#[cfg(test)]
pub mod test_utils;
pub mod text;
pub mod theme;
pub mod widgets;

pub use app::{App, Screen};
pub use chatflow_engine;
pub use event::{Event, EventHandler};

use std::io::{self, stdout};
use std::sync::Arc;

use chatflow_engine::{Config, DataProvider};
use crossterm::{
    cursor::Show as ShowCursor,
    event::{
        DisableBracketedPaste, EnableBracketedPaste, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, info};

/// Poll interval of the event pump; reply events are applied at this rate.
const TICK_RATE_MS: u64 = 100;

/// Errors from running the terminal UI.
#[derive(Debug, thiserror::Error)]
pub enum TuiError {
    #[error("terminal I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("event channel closed")]
    EventsClosed,
}

/// RAII guard for terminal state restoration.
struct TerminalGuard {
    keyboard_enhanced: bool,
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if self.keyboard_enhanced {
            let _ = execute!(stdout(), PopKeyboardEnhancementFlags);
        }
        let _ = disable_raw_mode();
        let _ = execute!(stdout(), DisableBracketedPaste, LeaveAlternateScreen, ShowCursor);
    }
}

/// Run the TUI application.
///
/// Sets up the terminal, runs the event loop, and restores the terminal on
/// exit. Must be called inside a tokio runtime; reply timelines are tasks.
pub async fn run_tui(config: &Config, provider: Arc<dyn DataProvider>) -> Result<(), TuiError> {
    enable_raw_mode()?;
    // Shift+Enter is only distinguishable with the kitty keyboard protocol.
    let keyboard_enhanced = supports_keyboard_enhancement().unwrap_or(false);
    let _guard = TerminalGuard { keyboard_enhanced };

    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    if keyboard_enhanced {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )?;
    }
    info!(keyboard_enhanced, "Terminal initialized");

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config, provider);
    let size = terminal.size()?;
    app.handle_resize(size.width, size.height);

    let mut events = EventHandler::new(TICK_RATE_MS);
    let result = run_loop(&mut terminal, &mut app, &mut events).await;

    app.shutdown();
    terminal.show_cursor()?;
    info!("Terminal restored");

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &mut EventHandler,
) -> Result<(), TuiError> {
    loop {
        terminal.draw(|frame| layout::render_app(frame, app))?;

        match events.next().await.ok_or(TuiError::EventsClosed)? {
            Event::Key(key) => app.handle_key(key),
            Event::Paste(text) => app.handle_paste(&text),
            Event::Resize(width, height) => {
                debug!(width, height, "Resize");
                app.handle_resize(width, height);
            }
            Event::Tick => {}
        }
        app.tick();

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Get the TUI version.
pub fn tui_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
