//! Conversation list pane: status, search, channel tabs and summaries.

use chatflow_engine::{ChannelTab, ConversationStatus, ConversationSummary};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::pane::Pane;
use super::text_input::TextInputState;
use crate::text::{truncate_to_width, visual_width};
use crate::theme::{BorderSet, IconSet, Theme};

/// Rows used above the list: status, search, tabs, blank.
const HEADER_ROWS: u16 = 4;
/// Rows per conversation entry.
const ITEM_ROWS: u16 = 2;

/// Conversation list pane.
pub struct ConversationList<'a> {
    conversations: &'a [&'a ConversationSummary],
    selected: Option<&'a str>,
    search: &'a TextInputState,
    tab: ChannelTab,
    status: ConversationStatus,
    focused: bool,
    theme: &'a Theme,
    borders: &'a BorderSet,
    icons: &'a IconSet,
}

impl<'a> ConversationList<'a> {
    pub fn new(
        conversations: &'a [&'a ConversationSummary],
        search: &'a TextInputState,
        theme: &'a Theme,
        borders: &'a BorderSet,
        icons: &'a IconSet,
    ) -> Self {
        Self {
            conversations,
            selected: None,
            search,
            tab: ChannelTab::All,
            status: ConversationStatus::Open,
            focused: false,
            theme,
            borders,
            icons,
        }
    }

    #[must_use]
    pub fn selected(mut self, id: Option<&'a str>) -> Self {
        self.selected = id;
        self
    }

    #[must_use]
    pub fn tab(mut self, tab: ChannelTab) -> Self {
        self.tab = tab;
        self
    }

    #[must_use]
    pub fn status(mut self, status: ConversationStatus) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn status_line(&self) -> Line<'a> {
        Line::from(vec![
            Span::styled("Status: ", Style::default().fg(self.theme.muted)),
            Span::styled(
                format!("{} {}", self.status, self.icons.expanded()),
                Style::default().fg(self.theme.text),
            ),
        ])
    }

    fn search_line(&self) -> Line<'a> {
        let label = Span::styled("Search: ", Style::default().fg(self.theme.muted));
        if self.search.is_empty() && !self.focused {
            return Line::from(vec![
                label,
                Span::styled("Search...", Style::default().fg(self.theme.muted)),
            ]);
        }
        let (before, after) = self.search.split_at_cursor();
        let mut spans = vec![
            label,
            Span::styled(before.to_string(), Style::default().fg(self.theme.text)),
        ];
        if self.focused {
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

    fn tabs_line(&self) -> Line<'a> {
        let mut spans = Vec::new();
        for (i, tab) in ChannelTab::ALL.into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            let style = if tab == self.tab {
                Style::default()
                    .fg(self.theme.primary)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().fg(self.theme.subtext)
            };
            spans.push(Span::styled(tab.label(), style));
        }
        Line::from(spans)
    }

    fn item_lines(&self, summary: &ConversationSummary, width: usize) -> [Line<'a>; 2] {
        let selected = self.selected == Some(summary.id.as_str());
        let base = if selected {
            Style::default().bg(self.theme.surface)
        } else {
            Style::default()
        };

        let avatar = format!("[{}] ", summary.avatar);
        let marker = if summary.online {
            Span::styled(
                format!(" {}", self.icons.online()),
                base.fg(self.theme.online),
            )
        } else {
            Span::styled(String::new(), base)
        };
        let unread = if summary.unread {
            format!(" {}", self.icons.unread())
        } else {
            String::new()
        };

        let fixed = visual_width(&avatar)
            + visual_width(&marker.content)
            + visual_width(&unread)
            + visual_width(&summary.time)
            + 1;
        let name = truncate_to_width(&summary.name, width.saturating_sub(fixed));
        let used = fixed + visual_width(&name);
        let padding = " ".repeat(width.saturating_sub(used) + 1);

        let mut name_style = base.fg(self.theme.text);
        if selected || summary.unread {
            name_style = name_style.add_modifier(Modifier::BOLD);
        }

        let first = Line::from(vec![
            Span::styled(avatar.clone(), base.fg(self.theme.secondary)),
            Span::styled(name, name_style),
            marker,
            Span::styled(unread, base.fg(self.theme.badge)),
            Span::styled(padding, base),
            Span::styled(summary.time.clone(), base.fg(self.theme.muted)),
        ]);

        let indent = " ".repeat(visual_width(&avatar));
        let preview_width = width.saturating_sub(indent.len());
        let preview = truncate_to_width(&summary.preview, preview_width);
        let tail = " ".repeat(preview_width.saturating_sub(visual_width(&preview)));
        let second = Line::from(vec![
            Span::styled(indent, base),
            Span::styled(preview, base.fg(self.theme.subtext)),
            Span::styled(tail, base),
        ]);

        [first, second]
    }

    /// First visible entry so the selection stays on screen.
    fn scroll_offset(&self, visible_items: usize) -> usize {
        let selected_index = self
            .selected
            .and_then(|id| self.conversations.iter().position(|c| c.id == id))
            .unwrap_or(0);
        if visible_items == 0 {
            return 0;
        }
        selected_index.saturating_sub(visible_items - 1)
    }
}

impl Widget for ConversationList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Pane::new(self.theme, self.borders)
            .title("Messaging")
            .focused(self.focused)
            .block();
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let width = inner.width as usize;
        let mut lines = vec![
            self.status_line(),
            self.search_line(),
            self.tabs_line(),
            Line::default(),
        ];

        if self.conversations.is_empty() {
            lines.push(Line::from(Span::styled(
                "No conversations found",
                Style::default().fg(self.theme.muted),
            )));
        } else {
            let visible_items = (inner.height.saturating_sub(HEADER_ROWS) / ITEM_ROWS) as usize;
            let offset = self.scroll_offset(visible_items);
            for summary in self.conversations.iter().skip(offset).take(visible_items) {
                lines.extend(self.item_lines(summary, width));
            }
        }

        Paragraph::new(lines).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::buffer_to_string;
    use crate::theme::IconMode;
    use chatflow_engine::{DataProvider, SampleData};

    fn render(list: ConversationList<'_>, width: u16, height: u16) -> String {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        list.render(area, &mut buf);
        buffer_to_string(&buf)
    }

    #[test]
    fn test_renders_sample_conversations() {
        let conversations = SampleData::new().conversations();
        let refs: Vec<&ConversationSummary> = conversations.iter().collect();
        let search = TextInputState::new();
        let theme = Theme::default();
        let borders = BorderSet::new(IconMode::Unicode);
        let icons = IconSet::new(IconMode::Unicode);

        let output = render(
            ConversationList::new(&refs, &search, &theme, &borders, &icons).selected(Some("1")),
            40,
            20,
        );

        assert!(output.contains("Messaging"));
        assert!(output.contains("Status: Open"));
        assert!(output.contains("All  SMS  Email"));
        assert!(output.contains("Simon Williams ●"));
        assert!(output.contains("Hey there, I need your help"));
        assert!(output.contains("Mary Smith ◆"));
    }

    #[test]
    fn test_empty_list_message() {
        let search = TextInputState::new();
        let theme = Theme::default();
        let borders = BorderSet::new(IconMode::Ascii);
        let icons = IconSet::new(IconMode::Ascii);

        let output = render(
            ConversationList::new(&[], &search, &theme, &borders, &icons),
            40,
            10,
        );
        assert!(output.contains("No conversations found"));
    }

    #[test]
    fn test_search_query_shown_with_cursor_when_focused() {
        let mut search = TextInputState::new();
        search.set("mary");
        let theme = Theme::default();
        let borders = BorderSet::new(IconMode::Ascii);
        let icons = IconSet::new(IconMode::Ascii);

        let output = render(
            ConversationList::new(&[], &search, &theme, &borders, &icons).focused(true),
            40,
            10,
        );
        assert!(output.contains("Search: mary_"));
    }

    #[test]
    fn test_selection_scrolls_into_view() {
        let conversations = SampleData::new().conversations();
        let refs: Vec<&ConversationSummary> = conversations.iter().collect();
        let search = TextInputState::new();
        let theme = Theme::default();
        let borders = BorderSet::new(IconMode::Ascii);
        let icons = IconSet::new(IconMode::Ascii);

        // Room for two entries only.
        let output = render(
            ConversationList::new(&refs, &search, &theme, &borders, &icons).selected(Some("5")),
            40,
            10,
        );
        assert!(output.contains("Melissa Nelson"));
        assert!(!output.contains("Simon Williams"));
    }
}
