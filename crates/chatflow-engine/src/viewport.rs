//! Layout selection and single-pane navigation.
//!
//! - `ThreePane`: Conversations | Messages | Details
//! - `SinglePane`: one of the three views at a time

/// Presentation chosen from the viewport width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    /// All three panes side by side.
    ThreePane,
    /// One pane at a time, switched with [`ActiveView`].
    SinglePane,
}

impl LayoutMode {
    /// Single-pane below `compact_width` columns, three-pane otherwise.
    pub fn for_width(width: u16, compact_width: u16) -> Self {
        if width < compact_width {
            Self::SinglePane
        } else {
            Self::ThreePane
        }
    }
}

/// The view shown in single-pane mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Conversations,
    Messages,
    Details,
}

impl ActiveView {
    /// View reached with "Back", if any.
    pub fn back(self) -> Option<Self> {
        match self {
            Self::Conversations => None,
            Self::Messages => Some(Self::Conversations),
            Self::Details => Some(Self::Messages),
        }
    }

    /// View reached by opening the selected conversation (or starting a
    /// new message) from the list.
    #[must_use]
    pub fn open_messages(self) -> Self {
        match self {
            Self::Conversations => Self::Messages,
            other => other,
        }
    }

    /// View reached with "Details" from the thread.
    #[must_use]
    pub fn open_details(self) -> Self {
        match self {
            Self::Messages => Self::Details,
            other => other,
        }
    }

    /// Title shown for the view.
    pub fn title(self) -> &'static str {
        match self {
            Self::Conversations => "Messaging",
            Self::Messages => "Messages",
            Self::Details => "Contact Details",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_breakpoint() {
        assert_eq!(LayoutMode::for_width(99, 100), LayoutMode::SinglePane);
        assert_eq!(LayoutMode::for_width(100, 100), LayoutMode::ThreePane);
        assert_eq!(LayoutMode::for_width(200, 100), LayoutMode::ThreePane);
    }

    #[test]
    fn test_default_view() {
        assert_eq!(ActiveView::default(), ActiveView::Conversations);
    }

    #[test]
    fn test_navigation() {
        let view = ActiveView::Conversations;
        assert_eq!(view.back(), None);

        let view = view.open_messages();
        assert_eq!(view, ActiveView::Messages);
        assert_eq!(view.back(), Some(ActiveView::Conversations));

        let view = view.open_details();
        assert_eq!(view, ActiveView::Details);
        assert_eq!(view.back(), Some(ActiveView::Messages));

        // Only reachable from the matching view.
        assert_eq!(ActiveView::Details.open_messages(), ActiveView::Details);
        assert_eq!(ActiveView::Conversations.open_details(), ActiveView::Conversations);
    }
}
