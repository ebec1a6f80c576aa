//! Bordered pane frame shared by the three panes.
//!
//! Supports focused/unfocused states with different border styles.

use ratatui::{
    style::{Modifier, Style},
    widgets::{Block, Borders},
};

use crate::theme::{BorderSet, Theme};

/// Frame for a pane with an optional title.
pub struct Pane<'a> {
    title: Option<&'a str>,
    focused: bool,
    theme: &'a Theme,
    borders: &'a BorderSet,
}

impl<'a> Pane<'a> {
    /// Create a new pane frame.
    pub fn new(theme: &'a Theme, borders: &'a BorderSet) -> Self {
        Self {
            title: None,
            focused: false,
            theme,
            borders,
        }
    }

    /// Set the pane title.
    #[must_use]
    pub fn title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }

    /// Set whether the pane is focused.
    #[must_use]
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Build the bordered block; callers render content into `block.inner(area)`.
    pub fn block(self) -> Block<'a> {
        let (border_set, border_style, title_style) = if self.focused {
            (
                self.borders.focused(),
                Style::default().fg(self.theme.border_focused),
                Style::default()
                    .fg(self.theme.primary)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            (
                self.borders.normal(),
                Style::default().fg(self.theme.border),
                Style::default().fg(self.theme.subtext),
            )
        };

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_set(border_set)
            .border_style(border_style);

        if let Some(title) = self.title {
            block = block.title(format!(" {title} ")).title_style(title_style);
        }
        block
    }
}
