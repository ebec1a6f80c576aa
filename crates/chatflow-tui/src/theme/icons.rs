//! Glyphs with Unicode and ASCII variants.

/// Icon mode configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IconMode {
    /// Standard Unicode symbols.
    #[default]
    Unicode,
    /// ASCII-only fallback (also used with `NO_COLOR`).
    Ascii,
}

impl IconMode {
    /// Mode from the environment, respecting `NO_COLOR`.
    pub fn from_env() -> Self {
        if std::env::var_os("NO_COLOR").is_some() {
            Self::Ascii
        } else {
            Self::Unicode
        }
    }
}

/// Icon set based on configured mode.
#[derive(Debug, Clone, Default)]
pub struct IconSet {
    mode: IconMode,
}

impl IconSet {
    /// Create a new icon set with the specified mode.
    pub fn new(mode: IconMode) -> Self {
        Self { mode }
    }

    pub fn online(&self) -> &'static str {
        match self.mode {
            IconMode::Unicode => "●",
            IconMode::Ascii => "*",
        }
    }

    pub fn unread(&self) -> &'static str {
        match self.mode {
            IconMode::Unicode => "◆",
            IconMode::Ascii => "!",
        }
    }

    pub fn typing(&self) -> &'static str {
        match self.mode {
            IconMode::Unicode => "● ● ●",
            IconMode::Ascii => ". . .",
        }
    }

    pub fn expanded(&self) -> &'static str {
        match self.mode {
            IconMode::Unicode => "▾",
            IconMode::Ascii => "v",
        }
    }

    pub fn collapsed(&self) -> &'static str {
        match self.mode {
            IconMode::Unicode => "▸",
            IconMode::Ascii => ">",
        }
    }

    pub fn separator(&self) -> &'static str {
        match self.mode {
            IconMode::Unicode => " │ ",
            IconMode::Ascii => " | ",
        }
    }

    pub fn cursor(&self) -> &'static str {
        match self.mode {
            IconMode::Unicode => "█",
            IconMode::Ascii => "_",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_icons_are_ascii() {
        let icons = IconSet::new(IconMode::Ascii);
        for glyph in [
            icons.online(),
            icons.unread(),
            icons.typing(),
            icons.expanded(),
            icons.collapsed(),
            icons.separator(),
            icons.cursor(),
        ] {
            assert!(glyph.is_ascii(), "{glyph} is not ASCII");
        }
    }

    #[test]
    fn test_default_is_unicode() {
        assert_eq!(IconMode::default(), IconMode::Unicode);
        assert_eq!(IconSet::default().typing(), "● ● ●");
    }
}
