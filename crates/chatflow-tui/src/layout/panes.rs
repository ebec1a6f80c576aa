//! Pane focus for the three-pane layout.
//!
//! - `Conversations`: list, search and tabs
//! - `Messages`: thread and composer
//! - `Details`: contact panel

use chatflow_engine::ActiveView;

/// Which pane has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusedPane {
    #[default]
    Conversations,
    Messages,
    Details,
}

impl FocusedPane {
    /// Next pane, left to right, wrapping.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Conversations => Self::Messages,
            Self::Messages => Self::Details,
            Self::Details => Self::Conversations,
        }
    }

    /// Previous pane, wrapping.
    #[must_use]
    pub fn prev(self) -> Self {
        match self {
            Self::Conversations => Self::Details,
            Self::Messages => Self::Conversations,
            Self::Details => Self::Messages,
        }
    }

    /// Display name.
    pub fn label(self) -> &'static str {
        match self {
            Self::Conversations => "Conversations",
            Self::Messages => "Messages",
            Self::Details => "Details",
        }
    }
}

impl From<ActiveView> for FocusedPane {
    fn from(view: ActiveView) -> Self {
        match view {
            ActiveView::Conversations => Self::Conversations,
            ActiveView::Messages => Self::Messages,
            ActiveView::Details => Self::Details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_focused_pane() {
        assert_eq!(FocusedPane::default(), FocusedPane::Conversations);
    }

    #[test]
    fn test_focus_cycle() {
        let focus = FocusedPane::Conversations;
        assert_eq!(focus.next(), FocusedPane::Messages);
        assert_eq!(focus.next().next(), FocusedPane::Details);
        assert_eq!(focus.next().next().next(), focus);
        assert_eq!(focus.prev(), FocusedPane::Details);
        assert_eq!(focus.next().prev(), focus);
    }

    #[test]
    fn test_from_active_view() {
        assert_eq!(
            FocusedPane::from(ActiveView::Details),
            FocusedPane::Details
        );
    }
}
