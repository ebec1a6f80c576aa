//! Footer widget.
//!
//! Format: `Three-pane │ Messages            [Enter] Send │ [Tab] Focus │ [F1] Help`

use chatflow_engine::LayoutMode;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::layout::FocusedPane;
use crate::text::visual_width;
use crate::theme::{IconSet, Theme};

/// A single keybinding hint.
#[derive(Debug, Clone)]
pub struct KeyHint {
    /// The key or key combination (e.g., "Tab", "Ctrl+Q").
    pub key: String,
    /// The action description (e.g., "Focus", "Quit").
    pub action: String,
}

impl KeyHint {
    pub fn new(key: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            action: action.into(),
        }
    }
}

/// Hints for the focused pane in the given layout.
pub fn hints_for(focused: FocusedPane, layout: LayoutMode) -> Vec<KeyHint> {
    let mut hints = match focused {
        FocusedPane::Conversations => vec![
            KeyHint::new("↑/↓", "Select"),
            KeyHint::new("Enter", "Open"),
            KeyHint::new("←/→", "Tab"),
            KeyHint::new("^N", "New"),
            KeyHint::new("^F", "Filter"),
        ],
        FocusedPane::Messages => vec![
            KeyHint::new("Enter", "Send"),
            KeyHint::new("S-Enter", "Newline"),
            KeyHint::new("^D", "Details"),
        ],
        FocusedPane::Details => vec![
            KeyHint::new("Enter", "Toggle"),
            KeyHint::new("1-4", "Section"),
            KeyHint::new("e", "Edit"),
        ],
    };

    match layout {
        LayoutMode::ThreePane => hints.push(KeyHint::new("Tab", "Focus")),
        LayoutMode::SinglePane if focused != FocusedPane::Conversations => {
            hints.push(KeyHint::new("Esc", "Back"));
        }
        LayoutMode::SinglePane => {}
    }
    hints.push(KeyHint::new("F1", "Help"));
    hints
}

/// Footer widget: layout and focus on the left, hints on the right.
pub struct FooterHints<'a> {
    hints: &'a [KeyHint],
    theme: &'a Theme,
    icons: &'a IconSet,
    layout: Option<LayoutMode>,
    focused_pane: Option<FocusedPane>,
}

impl<'a> FooterHints<'a> {
    pub fn new(hints: &'a [KeyHint], theme: &'a Theme, icons: &'a IconSet) -> Self {
        Self {
            hints,
            theme,
            icons,
            layout: None,
            focused_pane: None,
        }
    }

    #[must_use]
    pub fn layout(mut self, layout: LayoutMode) -> Self {
        self.layout = Some(layout);
        self
    }

    #[must_use]
    pub fn focused_pane(mut self, pane: FocusedPane) -> Self {
        self.focused_pane = Some(pane);
        self
    }
}

impl Widget for FooterHints<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let separator = self.icons.separator();
        let mut left_spans = Vec::new();
        let mut right_spans = Vec::new();

        if let Some(layout) = self.layout {
            let label = match layout {
                LayoutMode::ThreePane => "Three-pane",
                LayoutMode::SinglePane => "Compact",
            };
            left_spans.push(Span::styled(label, Style::default().fg(self.theme.subtext)));
        }

        if let Some(pane) = self.focused_pane {
            if !left_spans.is_empty() {
                left_spans.push(Span::styled(separator, Style::default().fg(self.theme.muted)));
            }
            left_spans.push(Span::styled(
                pane.label(),
                Style::default().fg(self.theme.primary),
            ));
        }

        for (i, hint) in self.hints.iter().enumerate() {
            if i > 0 {
                right_spans.push(Span::styled(separator, Style::default().fg(self.theme.muted)));
            }
            right_spans.push(Span::styled("[", Style::default().fg(self.theme.muted)));
            right_spans.push(Span::styled(&hint.key, Style::default().fg(self.theme.primary)));
            right_spans.push(Span::styled("] ", Style::default().fg(self.theme.muted)));
            right_spans.push(Span::styled(&hint.action, Style::default().fg(self.theme.subtext)));
        }

        let left_width: usize = left_spans.iter().map(|s| visual_width(&s.content)).sum();
        let right_width: usize = right_spans.iter().map(|s| visual_width(&s.content)).sum();
        let padding = (area.width as usize).saturating_sub(left_width + right_width);
        if padding > 0 {
            left_spans.push(Span::raw(" ".repeat(padding)));
        }
        left_spans.extend(right_spans);

        Paragraph::new(Line::from(left_spans))
            .style(Style::default().bg(self.theme.surface))
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::buffer_to_string;
    use crate::theme::IconMode;

    fn keys(hints: &[KeyHint]) -> Vec<&str> {
        hints.iter().map(|h| h.key.as_str()).collect()
    }

    #[test]
    fn test_three_pane_hints_include_focus() {
        let hints = hints_for(FocusedPane::Messages, LayoutMode::ThreePane);
        assert_eq!(keys(&hints), vec!["Enter", "S-Enter", "^D", "Tab", "F1"]);
    }

    #[test]
    fn test_single_pane_hints_include_back() {
        let hints = hints_for(FocusedPane::Details, LayoutMode::SinglePane);
        assert!(keys(&hints).contains(&"Esc"));

        let hints = hints_for(FocusedPane::Conversations, LayoutMode::SinglePane);
        assert!(!keys(&hints).contains(&"Esc"));
        assert!(!keys(&hints).contains(&"Tab"));
    }

    #[test]
    fn test_footer_render() {
        let hints = vec![KeyHint::new("Tab", "Focus"), KeyHint::new("F1", "Help")];
        let theme = Theme::default();
        let icons = IconSet::new(IconMode::Unicode);
        let area = Rect::new(0, 0, 60, 1);
        let mut buf = Buffer::empty(area);

        FooterHints::new(&hints, &theme, &icons)
            .layout(LayoutMode::ThreePane)
            .focused_pane(FocusedPane::Messages)
            .render(area, &mut buf);

        let output = buffer_to_string(&buf);
        assert!(output.starts_with("Three-pane │ Messages"));
        assert!(output.ends_with("[Tab] Focus │ [F1] Help"));
    }
}
