//! Test utilities for rendering the TUI into an in-memory terminal.

use crate::app::App;
use crate::layout::render_app;
use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

/// Default terminal width for tests (three-pane).
pub const TEST_WIDTH: u16 = 120;

/// Default terminal height for tests.
pub const TEST_HEIGHT: u16 = 32;

/// Create a test terminal with custom dimensions.
pub fn create_test_terminal_sized(width: u16, height: u16) -> Terminal<TestBackend> {
    let backend = TestBackend::new(width, height);
    Terminal::new(backend).expect("Failed to create test terminal")
}

/// Convert a buffer to a string, one line per row, trailing spaces trimmed.
pub fn buffer_to_string(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut result = String::new();

    for y in area.y..area.y + area.height {
        for x in area.x..area.x + area.width {
            let cell = buffer.cell((x, y)).unwrap();
            result.push_str(cell.symbol());
        }
        while result.ends_with(' ') {
            result.pop();
        }
        result.push('\n');
    }

    if result.ends_with('\n') {
        result.pop();
    }

    result
}

/// Render the app at the default size.
pub fn render_app_to_string(app: &App) -> String {
    render_app_to_string_sized(app, TEST_WIDTH, TEST_HEIGHT)
}

/// Render the app into a terminal of the given size.
pub fn render_app_to_string_sized(app: &App, width: u16, height: u16) -> String {
    let mut terminal = create_test_terminal_sized(width, height);
    terminal
        .draw(|frame| render_app(frame, app))
        .expect("Failed to draw");
    buffer_to_string(terminal.backend().buffer())
}
