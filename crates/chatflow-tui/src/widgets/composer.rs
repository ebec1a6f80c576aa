//! Message composer: subject line, multi-line body and action hints.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use super::text_input::TextInputState;
use crate::theme::{IconSet, Theme};

/// Most body lines shown at once.
const MAX_BODY_ROWS: u16 = 4;

const PROMPT: &str = "> ";

/// Which composer field receives typed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ComposerField {
    Subject,
    #[default]
    Body,
}

/// Composer actions shown under the body, as (key, label).
pub const ACTIONS: [(&str, &str); 5] = [
    ("^A", "Attach"),
    ("^G", "Emoji"),
    ("^L", "Email"),
    ("^S", "Sale"),
    ("^P", "Content"),
];

/// Rows the composer needs for `body`: rule, subject, body and actions.
pub fn composer_height(body: &TextInputState) -> u16 {
    let body_rows = u16::try_from(body.content().split('\n').count()).unwrap_or(MAX_BODY_ROWS);
    3 + body_rows.clamp(1, MAX_BODY_ROWS)
}

/// Composer widget.
pub struct Composer<'a> {
    subject: &'a TextInputState,
    body: &'a TextInputState,
    field: ComposerField,
    focused: bool,
    theme: &'a Theme,
    icons: &'a IconSet,
}

impl<'a> Composer<'a> {
    pub fn new(
        subject: &'a TextInputState,
        body: &'a TextInputState,
        theme: &'a Theme,
        icons: &'a IconSet,
    ) -> Self {
        Self {
            subject,
            body,
            field: ComposerField::Body,
            focused: false,
            theme,
            icons,
        }
    }

    #[must_use]
    pub fn field(mut self, field: ComposerField) -> Self {
        self.field = field;
        self
    }

    #[must_use]
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn has_cursor(&self, field: ComposerField) -> bool {
        self.focused && self.field == field
    }

    fn subject_line(&self) -> Line<'a> {
        let mut spans = vec![Span::styled(
            "Subject: ",
            Style::default().fg(self.theme.muted),
        )];
        if self.subject.is_empty() && !self.has_cursor(ComposerField::Subject) {
            spans.push(Span::styled(
                "(optional)",
                Style::default().fg(self.theme.muted),
            ));
            return Line::from(spans);
        }
        let (before, after) = self.subject.split_at_cursor();
        spans.push(Span::styled(
            before.to_string(),
            Style::default().fg(self.theme.text),
        ));
        if self.has_cursor(ComposerField::Subject) {
            spans.push(Span::styled(
                self.icons.cursor(),
                Style::default().fg(self.theme.primary),
            ));
        }
        spans.push(Span::styled(
            after.to_string(),
            Style::default().fg(self.theme.text),
        ));
        Line::from(spans)
    }

    fn body_lines(&self, rows: usize) -> Vec<Line<'a>> {
        let prompt = Span::styled(PROMPT, Style::default().fg(self.theme.primary));
        let text_style = Style::default().fg(self.theme.text);

        if self.body.is_empty() {
            let mut spans = vec![prompt];
            if self.has_cursor(ComposerField::Body) {
                spans.push(Span::styled(
                    self.icons.cursor(),
                    Style::default().fg(self.theme.primary),
                ));
            }
            spans.push(Span::styled(
                "Type a message...",
                Style::default().fg(self.theme.muted),
            ));
            return vec![Line::from(spans)];
        }

        let cursor = if self.has_cursor(ComposerField::Body) {
            self.icons.cursor()
        } else {
            ""
        };
        let (before, after) = self.body.split_at_cursor();
        let composed = format!("{before}{cursor}{after}");
        let cursor_row = before.matches('\n').count();

        let all: Vec<&str> = composed.split('\n').collect();
        let first = (cursor_row + 1).saturating_sub(rows);
        all.iter()
            .enumerate()
            .skip(first)
            .take(rows)
            .map(|(i, text)| {
                let lead = if i == 0 {
                    prompt.clone()
                } else {
                    Span::raw(" ".repeat(PROMPT.len()))
                };
                Line::from(vec![lead, Span::styled((*text).to_string(), text_style)])
            })
            .collect()
    }

    fn actions_line(&self) -> Line<'a> {
        let mut spans = Vec::new();
        for (i, (key, label)) in ACTIONS.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(*key, Style::default().fg(self.theme.primary)));
            spans.push(Span::styled(
                format!(" {label}"),
                Style::default().fg(self.theme.subtext),
            ));
        }
        Line::from(spans)
    }
}

impl Widget for Composer<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_color = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border
        };
        let block = Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(border_color));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 {
            return;
        }

        let body_rows = inner.height.saturating_sub(2).max(1) as usize;
        let mut lines = vec![self.subject_line()];
        lines.extend(self.body_lines(body_rows));
        while lines.len() < inner.height as usize - 1 {
            lines.push(Line::default());
        }
        lines.truncate(inner.height as usize - 1);
        lines.push(self.actions_line());

        Paragraph::new(lines).render(inner, buf);
    }
}
