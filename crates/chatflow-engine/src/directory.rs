//! Conversation directory: summaries shown in the conversation list.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Channel a conversation runs over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Sms,
    Email,
}

impl Channel {
    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Sms => "SMS",
            Self::Email => "Email",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Summary of one conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationSummary {
    /// Conversation id.
    pub id: String,
    /// Display name of the counterparty.
    pub name: String,
    /// Short avatar label (initials).
    pub avatar: String,
    /// Preview of the last message.
    pub preview: String,
    /// Time label of the last message.
    pub time: String,
    /// Whether the counterparty is online.
    pub online: bool,
    /// Whether the conversation has unread messages.
    pub unread: bool,
    /// Channel of the conversation.
    pub channel: Channel,
}

/// Channel tabs above the conversation list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelTab {
    #[default]
    All,
    Sms,
    Email,
}

impl ChannelTab {
    /// All tabs in display order.
    pub const ALL: [ChannelTab; 3] = [Self::All, Self::Sms, Self::Email];

    /// Tab label.
    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Sms => "SMS",
            Self::Email => "Email",
        }
    }

    /// Next tab, wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::All => Self::Sms,
            Self::Sms => Self::Email,
            Self::Email => Self::All,
        }
    }

    /// Previous tab, wrapping around.
    #[must_use]
    pub fn prev(self) -> Self {
        match self {
            Self::All => Self::Email,
            Self::Sms => Self::All,
            Self::Email => Self::Sms,
        }
    }

    /// Whether a conversation on `channel` is shown under this tab.
    pub fn includes(self, channel: Channel) -> bool {
        match self {
            Self::All => true,
            Self::Sms => channel == Channel::Sms,
            Self::Email => channel == Channel::Email,
        }
    }
}

/// Conversation status choices of the status dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConversationStatus {
    #[default]
    Open,
    Closed,
    Pending,
}

impl ConversationStatus {
    /// Next status, wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Open => Self::Closed,
            Self::Closed => Self::Pending,
            Self::Pending => Self::Open,
        }
    }
}

impl fmt::Display for ConversationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "Open"),
            Self::Closed => write!(f, "Closed"),
            Self::Pending => write!(f, "Pending"),
        }
    }
}

/// Choices of the filter menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListFilter {
    #[default]
    All,
    Unread,
    Flagged,
}

impl ListFilter {
    /// Next filter, wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::All => Self::Unread,
            Self::Unread => Self::Flagged,
            Self::Flagged => Self::All,
        }
    }

    /// Description used when the filter is applied.
    pub fn description(self) -> &'static str {
        match self {
            Self::All => "All conversations",
            Self::Unread => "Unread conversations",
            Self::Flagged => "Flagged conversations",
        }
    }
}

/// Conversations visible under `tab` whose name or preview contains
/// `query` (case-insensitive). Order is preserved.
pub fn visible<'a>(
    conversations: &'a [ConversationSummary],
    tab: ChannelTab,
    query: &str,
) -> Vec<&'a ConversationSummary> {
    let query = query.trim().to_lowercase();
    conversations
        .iter()
        .filter(|c| tab.includes(c.channel))
        .filter(|c| {
            query.is_empty()
                || c.name.to_lowercase().contains(&query)
                || c.preview.to_lowercase().contains(&query)
        })
        .collect()
}
