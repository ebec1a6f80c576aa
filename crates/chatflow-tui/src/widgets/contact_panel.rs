//! Contact details pane with collapsible sections.

use chatflow_engine::{ContactProfile, ProfileSection, SectionFlags};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::pane::Pane;
use crate::text::truncate_to_width;
use crate::theme::{BorderSet, IconSet, Theme};

/// A selectable row in the details pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailsRow {
    /// A section header; activating it toggles the section.
    Section(ProfileSection),
    /// A file in the expanded Files section; activating it downloads.
    File(usize),
}

/// Selectable rows in display order for the current expand state.
pub fn details_rows(profile: &ContactProfile, flags: SectionFlags) -> Vec<DetailsRow> {
    let mut rows = Vec::new();
    for section in ProfileSection::ALL {
        rows.push(DetailsRow::Section(section));
        if section == ProfileSection::Files && flags.is_expanded(section) {
            rows.extend((0..profile.files.len()).map(DetailsRow::File));
        }
    }
    rows
}

/// Contact details pane.
pub struct ContactPanel<'a> {
    profile: Option<&'a ContactProfile>,
    avatar: &'a str,
    flags: SectionFlags,
    cursor: Option<DetailsRow>,
    focused: bool,
    theme: &'a Theme,
    borders: &'a BorderSet,
    icons: &'a IconSet,
}

impl<'a> ContactPanel<'a> {
    pub fn new(
        profile: Option<&'a ContactProfile>,
        theme: &'a Theme,
        borders: &'a BorderSet,
        icons: &'a IconSet,
    ) -> Self {
        Self {
            profile,
            avatar: "",
            flags: SectionFlags::default(),
            cursor: None,
            focused: false,
            theme,
            borders,
            icons,
        }
    }

    #[must_use]
    pub fn avatar(mut self, avatar: &'a str) -> Self {
        self.avatar = avatar;
        self
    }

    #[must_use]
    pub fn flags(mut self, flags: SectionFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Highlighted row.
    #[must_use]
    pub fn cursor(mut self, cursor: Option<DetailsRow>) -> Self {
        self.cursor = cursor;
        self
    }

    #[must_use]
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn field(&self, label: &'a str, value: &str, width: usize) -> Line<'a> {
        let value = truncate_to_width(value, width.saturating_sub(label.len() + 2));
        Line::from(vec![
            Span::styled(format!("{label}: "), Style::default().fg(self.theme.muted)),
            Span::styled(value, Style::default().fg(self.theme.text)),
        ])
    }

    fn row_style(&self, row: DetailsRow) -> Style {
        if self.focused && self.cursor == Some(row) {
            Style::default().bg(self.theme.surface)
        } else {
            Style::default()
        }
    }

    fn section_header(&self, profile: &ContactProfile, section: ProfileSection) -> Line<'a> {
        let style = self.row_style(DetailsRow::Section(section));
        let glyph = if self.flags.is_expanded(section) {
            self.icons.expanded()
        } else {
            self.icons.collapsed()
        };
        let mut spans = vec![
            Span::styled(format!("{glyph} "), style.fg(self.theme.subtext)),
            Span::styled(
                section.title(),
                style.fg(self.theme.text).add_modifier(Modifier::BOLD),
            ),
        ];
        if section == ProfileSection::Tasks {
            spans.push(Span::styled(
                format!(" ({})", profile.tasks.len()),
                style.fg(self.theme.badge),
            ));
        }
        Line::from(spans)
    }

    fn section_body(
        &self,
        profile: &ContactProfile,
        section: ProfileSection,
        width: usize,
    ) -> Vec<Line<'a>> {
        let body = Style::default().fg(self.theme.subtext);
        let indent = "    ";
        let inner_width = width.saturating_sub(indent.len());
        let plain = |text: &str| {
            Line::from(Span::styled(
                format!("{indent}{}", truncate_to_width(text, inner_width)),
                body,
            ))
        };

        match section {
            ProfileSection::Tasks if profile.tasks.is_empty() => vec![plain("No tasks")],
            ProfileSection::Tasks => profile
                .tasks
                .iter()
                .map(|task| plain(format!("{} · due {}", task.title, task.due).as_str()))
                .collect(),
            ProfileSection::Notes if profile.note.is_empty() => vec![plain("No notes")],
            ProfileSection::Notes => crate::text::wrap(&profile.note, inner_width.max(1))
                .iter()
                .map(|l| plain(l.as_str()))
                .collect(),
            ProfileSection::Units if profile.units_of_interest.is_empty() => {
                vec![plain("None")]
            }
            ProfileSection::Units => profile
                .units_of_interest
                .iter()
                .map(|unit| plain(unit.as_str()))
                .collect(),
            ProfileSection::Files if profile.files.is_empty() => vec![plain("No files")],
            ProfileSection::Files => profile
                .files
                .iter()
                .enumerate()
                .map(|(i, file)| {
                    let style = self.row_style(DetailsRow::File(i)).fg(self.theme.primary);
                    Line::from(Span::styled(
                        format!("{indent}{}", truncate_to_width(file, inner_width)),
                        style,
                    ))
                })
                .collect(),
        }
    }

    /// All lines plus the index of the highlighted line.
    fn lines(&self, profile: &ContactProfile, width: usize) -> (Vec<Line<'a>>, usize) {
        let mut lines = vec![
            Line::from(Span::styled(
                profile.team.clone(),
                Style::default().fg(self.theme.secondary),
            )),
            Line::from(vec![
                Span::styled(
                    format!("[{}] ", self.avatar),
                    Style::default().fg(self.theme.secondary),
                ),
                Span::styled(
                    profile.full_name(),
                    Style::default()
                        .fg(self.theme.text)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
                Span::styled(
                    profile.status.clone(),
                    Style::default()
                        .fg(self.theme.online)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::default(),
            self.field("First name", &profile.first_name, width),
            self.field("Last name", &profile.last_name, width),
            self.field("Mobile", &profile.mobile_phone, width),
            self.field("Email", &profile.email, width),
            self.field("Address", &profile.address, width),
            Line::from(vec![
                Span::styled("[e]", Style::default().fg(self.theme.primary)),
                Span::styled(" Edit contact", Style::default().fg(self.theme.subtext)),
            ]),
            Line::default(),
        ];

        let mut cursor_line = 0;
        for section in ProfileSection::ALL {
            if self.cursor == Some(DetailsRow::Section(section)) {
                cursor_line = lines.len();
            }
            lines.push(self.section_header(profile, section));
            if self.flags.is_expanded(section) {
                if let Some(DetailsRow::File(i)) = self.cursor {
                    if section == ProfileSection::Files {
                        cursor_line = lines.len() + i;
                    }
                }
                lines.extend(self.section_body(profile, section, width));
            }
        }
        (lines, cursor_line)
    }
}

impl Widget for ContactPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Pane::new(self.theme, self.borders)
            .title("Contact Details")
            .focused(self.focused)
            .block();
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let Some(profile) = self.profile else {
            Paragraph::new(Span::styled(
                "No contact selected",
                Style::default().fg(self.theme.muted),
            ))
            .render(inner, buf);
            return;
        };

        let (lines, cursor_line) = self.lines(profile, inner.width as usize);
        let height = inner.height as usize;
        let offset = (cursor_line + 1).saturating_sub(height);
        let visible: Vec<Line<'_>> = lines.into_iter().skip(offset).collect();
        Paragraph::new(visible).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::buffer_to_string;
    use crate::theme::IconMode;
    use chatflow_engine::{DataProvider, SampleData};

    fn profile() -> ContactProfile {
        SampleData::new().contact("1").unwrap()
    }

    fn render(panel: ContactPanel<'_>, width: u16, height: u16) -> String {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        panel.render(area, &mut buf);
        buffer_to_string(&buf)
    }

    #[test]
    fn test_details_rows_follow_files_flag() {
        let profile = profile();
        let mut flags = SectionFlags::default();
        assert_eq!(details_rows(&profile, flags).len(), 4);

        flags.toggle(ProfileSection::Files);
        let rows = details_rows(&profile, flags);
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[4], DetailsRow::File(0));
        assert_eq!(rows[5], DetailsRow::File(1));
    }

    #[test]
    fn test_collapsed_profile() {
        let profile = profile();
        let theme = Theme::default();
        let borders = BorderSet::new(IconMode::Ascii);
        let icons = IconSet::new(IconMode::Ascii);

        let output = render(
            ContactPanel::new(Some(&profile), &theme, &borders, &icons).avatar("SW"),
            50,
            22,
        );
        assert!(output.contains("Contact Details"));
        assert!(output.contains("Sales"));
        assert!(output.contains("[SW] Simon Williams VERIFIED"));
        assert!(output.contains("Mobile: (423) 546-7733"));
        assert!(output.contains("> Tasks (1)"));
        assert!(output.contains("> Units of Interest"));
        assert!(!output.contains("proposal.pdf"));
    }

    #[test]
    fn test_expanded_sections() {
        let profile = profile();
        let mut flags = SectionFlags::default();
        flags.toggle(ProfileSection::Tasks);
        flags.toggle(ProfileSection::Files);
        let theme = Theme::default();
        let borders = BorderSet::new(IconMode::Ascii);
        let icons = IconSet::new(IconMode::Ascii);

        let output = render(
            ContactPanel::new(Some(&profile), &theme, &borders, &icons).flags(flags),
            60,
            24,
        );
        assert!(output.contains("v Tasks (1)"));
        assert!(output.contains("Follow up on proposal · due Tomorrow"));
        assert!(output.contains("v Files"));
        assert!(output.contains("proposal.pdf"));
        assert!(output.contains("contract.docx"));
        assert!(output.contains("> Note"));
    }

    #[test]
    fn test_no_profile() {
        let theme = Theme::default();
        let borders = BorderSet::new(IconMode::Ascii);
        let icons = IconSet::new(IconMode::Ascii);

        let output = render(ContactPanel::new(None, &theme, &borders, &icons), 30, 5);
        assert!(output.contains("No contact selected"));
    }
}
