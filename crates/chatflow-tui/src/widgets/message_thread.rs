//! Message thread: contact header, message bubbles and typing indicator.
//!
//! Local messages are right-aligned, remote messages left-aligned. The view
//! sticks to the newest message unless scrolled back.

use chatflow_engine::{ConversationSummary, Message};
use chrono::{DateTime, Utc};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::text::{right_align, truncate_to_width, visual_width, wrap};
use crate::theme::{IconSet, Theme};

/// Rows taken by the contact header.
pub const HEADER_ROWS: u16 = 3;

/// Scrollable message thread.
pub struct MessageThread<'a> {
    messages: &'a [Message],
    contact: Option<&'a ConversationSummary>,
    address: Option<&'a str>,
    typing: bool,
    scroll: usize,
    now: DateTime<Utc>,
    theme: &'a Theme,
    icons: &'a IconSet,
}

impl<'a> MessageThread<'a> {
    pub fn new(messages: &'a [Message], theme: &'a Theme, icons: &'a IconSet) -> Self {
        Self {
            messages,
            contact: None,
            address: None,
            typing: false,
            scroll: 0,
            now: Utc::now(),
            theme,
            icons,
        }
    }

    /// Contact shown in the header.
    #[must_use]
    pub fn contact(mut self, contact: Option<&'a ConversationSummary>) -> Self {
        self.contact = contact;
        self
    }

    #[must_use]
    pub fn address(mut self, address: Option<&'a str>) -> Self {
        self.address = address;
        self
    }

    #[must_use]
    pub fn typing(mut self, typing: bool) -> Self {
        self.typing = typing;
        self
    }

    /// Lines scrolled back from the newest message.
    #[must_use]
    pub fn scroll(mut self, scroll: usize) -> Self {
        self.scroll = scroll;
        self
    }

    /// Reference time for relative timestamps.
    #[must_use]
    pub fn now(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    fn header_lines(&self, width: usize) -> Vec<Line<'a>> {
        let Some(contact) = self.contact else {
            return vec![
                Line::from(Span::styled(
                    "No conversation selected",
                    Style::default().fg(self.theme.muted),
                )),
                Line::default(),
                self.rule(width),
            ];
        };

        let edit = "[Ctrl+E] EDIT";
        let (presence, presence_color) = if contact.online {
            (format!("{} Online", self.icons.online()), self.theme.online)
        } else {
            ("Offline".to_string(), self.theme.muted)
        };
        let avatar = format!("[{}] ", contact.avatar);
        let fixed = visual_width(&avatar) + visual_width(&presence) + visual_width(edit) + 3;
        let name = truncate_to_width(&contact.name, width.saturating_sub(fixed));
        let used = fixed + visual_width(&name);
        let padding = " ".repeat(width.saturating_sub(used) + 1);

        let title = Line::from(vec![
            Span::styled(avatar, Style::default().fg(self.theme.secondary)),
            Span::styled(
                name,
                Style::default()
                    .fg(self.theme.text)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(presence, Style::default().fg(presence_color)),
            Span::raw(padding),
            Span::styled(edit, Style::default().fg(self.theme.primary)),
        ]);

        let address = Line::from(Span::styled(
            truncate_to_width(self.address.unwrap_or_default(), width),
            Style::default().fg(self.theme.subtext),
        ));

        vec![title, address, self.rule(width)]
    }

    fn rule(&self, width: usize) -> Line<'a> {
        Line::from(Span::styled(
            "─".repeat(width),
            Style::default().fg(self.theme.border),
        ))
    }

    fn remote_name(&self) -> &str {
        self.contact.map_or("Contact", |c| c.name.as_str())
    }

    /// Furthest the body can be scrolled back when rendered into `area`.
    pub fn max_scroll(&self, area: Rect) -> usize {
        let body_height = area.height.saturating_sub(HEADER_ROWS.min(area.height));
        let total = self.body_lines(area.width as usize).len();
        total.saturating_sub(body_height as usize)
    }

    /// All body lines, oldest first.
    fn body_lines(&self, width: usize) -> Vec<Line<'a>> {
        let bubble_width = (width * 3 / 4).max(1);
        let mut lines = Vec::new();

        for message in self.messages {
            let local = message.is_local();
            let color = if local {
                self.theme.bubble_local
            } else {
                self.theme.bubble_remote
            };
            for text in wrap(&message.content, bubble_width) {
                let text = if local { right_align(&text, width) } else { text };
                lines.push(Line::from(Span::styled(text, Style::default().fg(color))));
            }

            let who = if local { "You" } else { self.remote_name() };
            let meta = format!("{who} · {}", message.sent_at.display(self.now));
            let meta = if local { right_align(&meta, width) } else { meta };
            lines.push(Line::from(Span::styled(
                meta,
                Style::default().fg(self.theme.muted),
            )));
            lines.push(Line::default());
        }

        if self.typing {
            lines.push(Line::from(vec![
                Span::styled(self.icons.typing(), Style::default().fg(self.theme.secondary)),
                Span::styled(
                    format!("  {} is typing", self.remote_name()),
                    Style::default()
                        .fg(self.theme.muted)
                        .add_modifier(Modifier::ITALIC),
                ),
            ]));
        }

        lines
    }
}

/// Window of `total` lines that fits `height`, `scroll` lines back from the end.
pub fn visible_window(total: usize, height: usize, scroll: usize) -> std::ops::Range<usize> {
    let max_scroll = total.saturating_sub(height);
    let scroll = scroll.min(max_scroll);
    let end = total - scroll;
    end.saturating_sub(height)..end
}

impl Widget for MessageThread<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }
        let width = area.width as usize;

        let header = self.header_lines(width);
        let header_rows = HEADER_ROWS.min(area.height);
        Paragraph::new(header).render(
            Rect::new(area.x, area.y, area.width, header_rows),
            buf,
        );

        let body_area = Rect::new(
            area.x,
            area.y + header_rows,
            area.width,
            area.height - header_rows,
        );
        if body_area.height == 0 {
            return;
        }

        let lines = self.body_lines(width);
        let window = visible_window(lines.len(), body_area.height as usize, self.scroll);
        let visible: Vec<Line<'_>> = lines.into_iter().skip(window.start).take(window.len()).collect();
        Paragraph::new(visible).render(body_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::buffer_to_string;
    use crate::theme::IconMode;
    use chatflow_engine::{DataProvider, MessageId, SampleData, Sender, SentAt};

    fn message(id: u64, sender: Sender, content: &str, label: &str) -> Message {
        Message {
            id: MessageId(id),
            content: content.into(),
            sender,
            sent_at: SentAt::Label(label.into()),
        }
    }

    fn render(thread: MessageThread<'_>, width: u16, height: u16) -> String {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        thread.render(area, &mut buf);
        buffer_to_string(&buf)
    }

    #[test]
    fn test_header_shows_contact_and_edit() {
        let conversations = SampleData::new().conversations();
        let theme = Theme::default();
        let icons = IconSet::new(IconMode::Unicode);

        let output = render(
            MessageThread::new(&[], &theme, &icons)
                .contact(conversations.first())
                .address(Some("3437 Grape Road")),
            60,
            6,
        );
        assert!(output.contains("[SW] Simon Williams"));
        assert!(output.contains("● Online"));
        assert!(output.contains("[Ctrl+E] EDIT"));
        assert!(output.contains("3437 Grape Road"));
    }

    #[test]
    fn test_local_messages_right_aligned() {
        let messages = vec![
            message(1, Sender::Remote, "Hi", "5 minutes ago"),
            message(2, Sender::Local, "Hello", "Just now"),
        ];
        let theme = Theme::default();
        let icons = IconSet::new(IconMode::Ascii);

        let output = render(MessageThread::new(&messages, &theme, &icons), 30, 12);
        let lines: Vec<&str> = output.lines().collect();

        assert!(lines.iter().any(|l| l.starts_with("Hi")));
        assert!(lines.iter().any(|l| l.ends_with("Hello") && l.starts_with(' ')));
        assert!(output.contains("Contact · 5 minutes ago"));
        assert!(output.contains("You · Just now"));
    }

    #[test]
    fn test_typing_indicator() {
        let theme = Theme::default();
        let icons = IconSet::new(IconMode::Ascii);

        let output = render(
            MessageThread::new(&[], &theme, &icons).typing(true),
            40,
            6,
        );
        assert!(output.contains(". . .  Contact is typing"));

        let output = render(MessageThread::new(&[], &theme, &icons), 40, 6);
        assert!(!output.contains("is typing"));
    }

    #[test]
    fn test_sticks_to_newest_message() {
        let messages: Vec<Message> = (1..=10)
            .map(|i| message(i, Sender::Remote, &format!("message {i}"), "earlier"))
            .collect();
        let theme = Theme::default();
        let icons = IconSet::new(IconMode::Ascii);

        let output = render(MessageThread::new(&messages, &theme, &icons), 30, 9);
        assert!(output.contains("message 10"));
        assert!(!output.contains("message 1\n"));
    }

    #[test]
    fn test_max_scroll() {
        // Each single-line message takes three body rows.
        let messages: Vec<Message> = (1..=10)
            .map(|i| message(i, Sender::Remote, &format!("message {i}"), "earlier"))
            .collect();
        let theme = Theme::default();
        let icons = IconSet::new(IconMode::Ascii);
        let thread = MessageThread::new(&messages, &theme, &icons);

        assert_eq!(thread.max_scroll(Rect::new(0, 0, 30, 9)), 24);
        assert_eq!(thread.max_scroll(Rect::new(0, 0, 30, 40)), 0);
    }

    #[test]
    fn test_visible_window() {
        assert_eq!(visible_window(10, 4, 0), 6..10);
        assert_eq!(visible_window(10, 4, 2), 4..8);
        // Scrolling past the top clamps.
        assert_eq!(visible_window(10, 4, 100), 0..4);
        // Everything fits.
        assert_eq!(visible_window(3, 10, 5), 0..3);
    }
}
