//! Message types for conversation sessions.
//!
//! A [`Message`] is immutable once built: its id, sender, content and
//! send time are fixed at creation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The two participants of a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The operator of this client.
    Local,
    /// The counterparty.
    Remote,
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Remote => write!(f, "remote"),
        }
    }
}

/// Creation-order identifier of a message within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(pub u64);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// When a message was sent.
///
/// Seed history carries a fixed label ("5 minutes ago"); messages created
/// during the session carry the instant they were created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentAt {
    /// Pre-formatted label, shown as-is.
    Label(String),
    /// Absolute instant, shown relative to the current time.
    At(DateTime<Utc>),
}

impl SentAt {
    /// The current instant.
    pub fn now() -> Self {
        Self::At(Utc::now())
    }

    /// Render the timestamp for display relative to `now`.
    pub fn display(&self, now: DateTime<Utc>) -> String {
        match self {
            Self::Label(label) => label.clone(),
            Self::At(at) => relative_label(*at, now),
        }
    }
}

fn relative_label(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - at).num_minutes();
    match minutes {
        i64::MIN..=0 => "Just now".into(),
        1 => "1 minute ago".into(),
        2..=59 => format!("{minutes} minutes ago"),
        60..=1439 => {
            let hours = minutes / 60;
            if hours == 1 {
                "1 hour ago".into()
            } else {
                format!("{hours} hours ago")
            }
        }
        _ => at.format("%b %-d, %Y").to_string(),
    }
}

/// A single message in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Unique id within the session.
    pub id: MessageId,
    /// Message text, never blank.
    pub content: String,
    /// Who sent it.
    pub sender: Sender,
    /// When it was sent.
    pub sent_at: SentAt,
}

impl Message {
    /// Create a message sent now.
    pub fn new(id: MessageId, sender: Sender, content: impl Into<String>) -> Self {
        Self {
            id,
            content: content.into(),
            sender,
            sent_at: SentAt::now(),
        }
    }

    /// Whether the local user sent this message.
    pub fn is_local(&self) -> bool {
        self.sender == Sender::Local
    }
}

/// A message from a conversation's prior history, before ids are assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedMessage {
    pub sender: Sender,
    pub content: String,
    pub sent_at: SentAt,
}

impl SeedMessage {
    /// Seed message from the counterparty.
    pub fn remote(content: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            sender: Sender::Remote,
            content: content.into(),
            sent_at: SentAt::Label(label.into()),
        }
    }

    /// Seed message from the local user.
    pub fn local(content: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            sender: Sender::Local,
            content: content.into(),
            sent_at: SentAt::Label(label.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_label_displays_verbatim() {
        let sent = SentAt::Label("5 minutes ago".into());
        assert_eq!(sent.display(Utc::now()), "5 minutes ago");
    }

    #[test]
    fn test_relative_display() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();

        assert_eq!(SentAt::At(now).display(now), "Just now");
        assert_eq!(
            SentAt::At(now - Duration::seconds(59)).display(now),
            "Just now"
        );
        assert_eq!(
            SentAt::At(now - Duration::minutes(1)).display(now),
            "1 minute ago"
        );
        assert_eq!(
            SentAt::At(now - Duration::minutes(42)).display(now),
            "42 minutes ago"
        );
        assert_eq!(
            SentAt::At(now - Duration::hours(3)).display(now),
            "3 hours ago"
        );
        assert_eq!(
            SentAt::At(now - Duration::days(3)).display(now),
            "Mar 7, 2024"
        );
    }

    #[test]
    fn test_clock_skew_shows_just_now() {
        let now = Utc::now();
        let future = now + Duration::minutes(5);
        assert_eq!(SentAt::At(future).display(now), "Just now");
    }

    #[test]
    fn test_sender_serialization() {
        assert_eq!(serde_json::to_string(&Sender::Local).unwrap(), "\"local\"");
        assert_eq!(serde_json::to_string(&Sender::Remote).unwrap(), "\"remote\"");
    }

    #[test]
    fn test_seed_constructors() {
        let seed = SeedMessage::remote("Hey", "1 minute ago");
        assert_eq!(seed.sender, Sender::Remote);
        assert_eq!(seed.sent_at, SentAt::Label("1 minute ago".into()));

        let seed = SeedMessage::local("Hi", "now");
        assert_eq!(seed.sender, Sender::Local);
    }

    #[test]
    fn test_is_local() {
        assert!(Message::new(MessageId(1), Sender::Local, "Hi").is_local());
        assert!(!Message::new(MessageId(2), Sender::Remote, "Hey").is_local());
    }
}
