//! Status bar widget for the top of the TUI.
//!
//! Format: `● ChatFlow │ View │ Contact │ Status │ activity`

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::theme::{IconSet, Theme};

/// Status bar content.
#[derive(Debug, Clone, Default)]
pub struct StatusBarContent {
    /// Title of the active view (e.g. "Messaging").
    pub view: String,
    /// Name of the open conversation.
    pub contact: Option<String>,
    /// Conversation status label.
    pub status: Option<String>,
    /// Reply activity (e.g. "typing...").
    pub activity: Option<String>,
}

/// Status bar widget.
pub struct StatusBar<'a> {
    content: &'a StatusBarContent,
    theme: &'a Theme,
    icons: &'a IconSet,
}

impl<'a> StatusBar<'a> {
    pub fn new(content: &'a StatusBarContent, theme: &'a Theme, icons: &'a IconSet) -> Self {
        Self {
            content,
            theme,
            icons,
        }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let separator = Span::styled(self.icons.separator(), Style::default().fg(self.theme.muted));
        let mut spans = vec![
            Span::styled(
                format!("{} ", self.icons.online()),
                Style::default().fg(self.theme.primary),
            ),
            Span::styled(
                "ChatFlow",
                Style::default()
                    .fg(self.theme.text)
                    .add_modifier(Modifier::BOLD),
            ),
            separator.clone(),
            Span::styled(&self.content.view, Style::default().fg(self.theme.text)),
        ];

        if let Some(ref contact) = self.content.contact {
            spans.push(separator.clone());
            spans.push(Span::styled(contact, Style::default().fg(self.theme.subtext)));
        }

        if let Some(ref status) = self.content.status {
            spans.push(separator.clone());
            spans.push(Span::styled(status, Style::default().fg(self.theme.subtext)));
        }

        if let Some(ref activity) = self.content.activity {
            spans.push(separator);
            spans.push(Span::styled(
                activity,
                Style::default().fg(self.theme.secondary),
            ));
        }

        Paragraph::new(Line::from(spans))
            .style(Style::default().bg(self.theme.surface))
            .render(area, buf);
    }
}
