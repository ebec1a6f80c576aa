//! Notice toasts stacked in the top-right corner.

use chatflow_engine::Notice;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Paragraph, Widget},
};

use crate::text::{truncate_to_width, visual_width};
use crate::theme::{BorderSet, Theme};

const TOAST_HEIGHT: u16 = 4;
const MAX_TOAST_WIDTH: u16 = 48;

/// Stack of notices, newest at the top.
pub struct Toasts<'a> {
    notices: Vec<&'a Notice>,
    theme: &'a Theme,
    borders: &'a BorderSet,
}

impl<'a> Toasts<'a> {
    pub fn new(
        notices: impl IntoIterator<Item = &'a Notice>,
        theme: &'a Theme,
        borders: &'a BorderSet,
    ) -> Self {
        let mut notices: Vec<&Notice> = notices.into_iter().collect();
        notices.reverse();
        Self {
            notices,
            theme,
            borders,
        }
    }
}

impl Widget for Toasts<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut y = area.y + 1;
        for notice in self.notices {
            if y + TOAST_HEIGHT > area.y + area.height {
                break;
            }
            let wanted = visual_width(&notice.title).max(visual_width(&notice.description)) + 4;
            let width = u16::try_from(wanted)
                .unwrap_or(MAX_TOAST_WIDTH)
                .min(MAX_TOAST_WIDTH)
                .min(area.width);
            let x = area.x + area.width - width;
            let rect = Rect::new(x, y, width, TOAST_HEIGHT);

            let text_width = width.saturating_sub(4) as usize;
            let block = Block::default()
                .borders(Borders::ALL)
                .border_set(self.borders.normal())
                .border_style(Style::default().fg(self.theme.primary))
                .style(Style::default().bg(self.theme.overlay));
            let lines = vec![
                Line::from(Span::styled(
                    truncate_to_width(&notice.title, text_width),
                    Style::default()
                        .fg(self.theme.text)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    truncate_to_width(&notice.description, text_width),
                    Style::default().fg(self.theme.subtext),
                )),
            ];

            Clear.render(rect, buf);
            Paragraph::new(lines)
                .block(block.padding(Padding::horizontal(1)))
                .render(rect, buf);

            y += TOAST_HEIGHT;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::buffer_to_string;
    use crate::theme::IconMode;

    #[test]
    fn test_toast_renders_title_and_description() {
        let notices = [Notice::attachment()];
        let theme = Theme::default();
        let borders = BorderSet::new(IconMode::Unicode);
        let area = Rect::new(0, 0, 60, 10);
        let mut buf = Buffer::empty(area);

        Toasts::new(&notices, &theme, &borders).render(area, &mut buf);

        let output = buffer_to_string(&buf);
        assert!(output.contains("Attachment"));
        assert!(output.contains("Opening file picker..."));
    }

    #[test]
    fn test_newest_notice_first() {
        let notices = [Notice::emoji(), Notice::new_email()];
        let theme = Theme::default();
        let borders = BorderSet::new(IconMode::Unicode);
        let area = Rect::new(0, 0, 60, 12);
        let mut buf = Buffer::empty(area);

        Toasts::new(&notices, &theme, &borders).render(area, &mut buf);

        let output = buffer_to_string(&buf);
        let email = output.find("New Email").unwrap();
        let emoji = output.find("Emoji").unwrap();
        assert!(email < emoji);
    }

    #[test]
    fn test_toasts_clipped_to_area() {
        let notices = [Notice::emoji(), Notice::new_email(), Notice::start_sale()];
        let theme = Theme::default();
        let borders = BorderSet::new(IconMode::Unicode);
        let area = Rect::new(0, 0, 60, 6);
        let mut buf = Buffer::empty(area);

        Toasts::new(&notices, &theme, &borders).render(area, &mut buf);

        let output = buffer_to_string(&buf);
        assert!(output.contains("Sale Started"));
        assert!(!output.contains("Emoji"));
    }
}
