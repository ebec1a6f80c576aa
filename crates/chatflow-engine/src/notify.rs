//! Transient notifications.
//!
//! UI actions that have no real effect post a [`Notice`] instead. Posting
//! never blocks; notices disappear once their lifetime is over.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use tracing::info;

/// Maximum number of notices kept at once. Older ones are dropped first.
const MAX_NOTICES: usize = 5;

/// A transient notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: String,
}

impl Notice {
    /// Create a notice.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn edit_contact() -> Self {
        Self::new("Edit Contact", "Opening contact edit form...")
    }

    pub fn new_conversation() -> Self {
        Self::new("New Conversation", "Creating a new conversation...")
    }

    pub fn filter_applied(description: &str) -> Self {
        Self::new("Filter Applied", format!("Showing {description}"))
    }

    pub fn status_changed(status: impl std::fmt::Display) -> Self {
        Self::new("Status Changed", format!("Status set to {status}"))
    }

    pub fn conversation_selected(id: &str) -> Self {
        Self::new(
            "Conversation Selected",
            format!("Viewing conversation with ID: {id}"),
        )
    }

    pub fn attachment() -> Self {
        Self::new("Attachment", "Opening file picker...")
    }

    pub fn emoji() -> Self {
        Self::new("Emoji", "Opening emoji picker...")
    }

    pub fn add_content() -> Self {
        Self::new("Add Content", "Opening content menu...")
    }

    pub fn new_email() -> Self {
        Self::new("New Email", "Creating new email...")
    }

    pub fn start_sale() -> Self {
        Self::new("Sale Started", "Starting a new sale process...")
    }

    pub fn download(file: &str) -> Self {
        Self::new("Download", format!("Downloading {file}..."))
    }
}

#[derive(Debug, Clone)]
struct Posted {
    notice: Notice,
    expires_at: Instant,
}

/// Queue of visible notices.
#[derive(Debug, Clone)]
pub struct Notifier {
    ttl: Duration,
    visible: VecDeque<Posted>,
}

impl Notifier {
    /// Create a notifier whose notices live for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            visible: VecDeque::new(),
        }
    }

    /// Post a notice, visible from `now`.
    pub fn post_at(&mut self, notice: Notice, now: Instant) {
        info!(title = %notice.title, description = %notice.description, "Notice");
        if self.visible.len() >= MAX_NOTICES {
            self.visible.pop_front();
        }
        self.visible.push_back(Posted {
            notice,
            expires_at: now + self.ttl,
        });
    }

    /// Post a notice, visible from now.
    pub fn post(&mut self, notice: Notice) {
        self.post_at(notice, Instant::now());
    }

    /// Drop notices that expired by `now`.
    pub fn expire(&mut self, now: Instant) {
        self.visible.retain(|p| p.expires_at > now);
    }

    /// Visible notices, oldest first.
    pub fn visible(&self) -> impl Iterator<Item = &Notice> {
        self.visible.iter().map(|p| &p.notice)
    }

    /// Most recent visible notice.
    pub fn latest(&self) -> Option<&Notice> {
        self.visible.back().map(|p| &p.notice)
    }

    /// Whether nothing is visible.
    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_texts() {
        assert_eq!(
            Notice::filter_applied("Unread conversations").description,
            "Showing Unread conversations"
        );
        assert_eq!(
            Notice::conversation_selected("3").description,
            "Viewing conversation with ID: 3"
        );
        assert_eq!(Notice::status_changed("Closed").description, "Status set to Closed");
        assert_eq!(
            Notice::download("proposal.pdf").description,
            "Downloading proposal.pdf..."
        );
        assert_eq!(Notice::start_sale().title, "Sale Started");
    }

    #[test]
    fn test_notices_expire() {
        let mut notifier = Notifier::new(Duration::from_secs(3));
        let start = Instant::now();

        notifier.post_at(Notice::attachment(), start);
        notifier.post_at(Notice::emoji(), start + Duration::from_secs(2));
        assert_eq!(notifier.latest().unwrap().title, "Emoji");

        notifier.expire(start + Duration::from_secs(3));
        let titles: Vec<&str> = notifier.visible().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["Emoji"]);

        notifier.expire(start + Duration::from_secs(5));
        assert!(notifier.is_empty());
        assert!(notifier.latest().is_none());
    }

    #[test]
    fn test_queue_is_bounded() {
        let mut notifier = Notifier::new(Duration::from_secs(60));
        for i in 0..(MAX_NOTICES + 2) {
            notifier.post(Notice::new(format!("n{i}"), ""));
        }
        assert_eq!(notifier.visible().count(), MAX_NOTICES);
        assert_eq!(notifier.visible().next().unwrap().title, "n2");
    }
}
