//! Contact profile shown in the details panel.

use serde::{Deserialize, Serialize};

/// A follow-up task attached to a contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactTask {
    pub title: String,
    pub due: String,
}

/// Static profile of a contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactProfile {
    pub first_name: String,
    pub last_name: String,
    pub team: String,
    pub mobile_phone: String,
    pub email: String,
    pub address: String,
    /// Status badge, e.g. "VERIFIED".
    pub status: String,
    pub tasks: Vec<ContactTask>,
    pub note: String,
    pub units_of_interest: Vec<String>,
    pub files: Vec<String>,
}

impl ContactProfile {
    /// First and last name joined.
    pub fn full_name(&self) -> String {
        match (self.first_name.is_empty(), self.last_name.is_empty()) {
            (false, false) => format!("{} {}", self.first_name, self.last_name),
            (false, true) => self.first_name.clone(),
            (true, _) => self.last_name.clone(),
        }
    }

    /// Profile with only a display name; other fields empty.
    pub fn from_display_name(name: &str) -> Self {
        let (first, last) = name.split_once(' ').unwrap_or((name, ""));
        Self {
            first_name: first.into(),
            last_name: last.into(),
            team: "Sales".into(),
            mobile_phone: String::new(),
            email: String::new(),
            address: String::new(),
            status: String::new(),
            tasks: Vec::new(),
            note: String::new(),
            units_of_interest: Vec::new(),
            files: Vec::new(),
        }
    }
}

/// Collapsible sections of the details panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileSection {
    Tasks,
    Notes,
    Units,
    Files,
}

impl ProfileSection {
    /// All sections in display order.
    pub const ALL: [ProfileSection; 4] = [Self::Tasks, Self::Notes, Self::Units, Self::Files];

    /// Section heading.
    pub fn title(self) -> &'static str {
        match self {
            Self::Tasks => "Tasks",
            Self::Notes => "Note",
            Self::Units => "Units of Interest",
            Self::Files => "Files",
        }
    }

    /// Position in [`ProfileSection::ALL`].
    pub fn index(self) -> usize {
        match self {
            Self::Tasks => 0,
            Self::Notes => 1,
            Self::Units => 2,
            Self::Files => 3,
        }
    }
}

/// Independent expand/collapse flags, all collapsed initially.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SectionFlags {
    expanded: [bool; 4],
}

impl SectionFlags {
    /// Whether `section` is expanded.
    pub fn is_expanded(&self, section: ProfileSection) -> bool {
        self.expanded[section.index()]
    }

    /// Flip one section, leaving the others alone.
    pub fn toggle(&mut self, section: ProfileSection) {
        let flag = &mut self.expanded[section.index()];
        *flag = !*flag;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sections_start_collapsed() {
        let flags = SectionFlags::default();
        for section in ProfileSection::ALL {
            assert!(!flags.is_expanded(section));
        }
    }

    #[test]
    fn test_toggle_is_independent() {
        let mut flags = SectionFlags::default();
        flags.toggle(ProfileSection::Notes);
        assert!(flags.is_expanded(ProfileSection::Notes));
        assert!(!flags.is_expanded(ProfileSection::Tasks));
        assert!(!flags.is_expanded(ProfileSection::Files));

        flags.toggle(ProfileSection::Files);
        flags.toggle(ProfileSection::Notes);
        assert!(!flags.is_expanded(ProfileSection::Notes));
        assert!(flags.is_expanded(ProfileSection::Files));
    }

    #[test]
    fn test_from_display_name() {
        let profile = ContactProfile::from_display_name("Mary Smith");
        assert_eq!(profile.first_name, "Mary");
        assert_eq!(profile.last_name, "Smith");
        assert_eq!(profile.full_name(), "Mary Smith");

        let single = ContactProfile::from_display_name("Cher");
        assert_eq!(single.full_name(), "Cher");
    }
}
