//! Layout for the ChatFlow TUI.
//!
//! - [`FocusedPane`] - which pane receives keys in the three-pane layout
//! - [`render_app`] - draws the current screen

mod panes;
mod shell;

pub use panes::FocusedPane;
pub use shell::{
    centered_fixed, render_app, side_width, thread_viewport, MIN_HEIGHT, MIN_WIDTH,
};
