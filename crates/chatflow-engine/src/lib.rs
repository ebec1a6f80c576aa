//! chatflow-engine: Headless core of the ChatFlow messenger
//!
//! This crate provides everything the terminal UI renders, including:
//! - Conversation sessions with simulated, cancellable replies
//! - The data provider interface and built-in sample data
//! - Contact profiles and section flags
//! - Transient notifications
//! - Layout selection and single-pane navigation
//! - Configuration

pub mod config;
pub mod contact;
pub mod directory;
pub mod message;
pub mod notify;
pub mod provider;
pub mod reply;
pub mod session;
pub mod viewport;

// Re-export commonly used types
pub use config::{Config, ConfigError, ThemeChoice, TypingIndicatorMode, DEFAULT_CONFIG_PATH};
pub use contact::{ContactProfile, ContactTask, ProfileSection, SectionFlags};
pub use directory::{
    visible, Channel, ChannelTab, ConversationStatus, ConversationSummary, ListFilter,
};
pub use message::{Message, MessageId, SeedMessage, SentAt, Sender};
pub use notify::{Notice, Notifier};
pub use provider::{DataProvider, SampleData};
pub use reply::{ReplyEvent, ReplyId, ReplyTiming};
pub use session::{ConversationSession, ReplyState, SessionOptions, DEFAULT_CANNED_REPLY};
pub use viewport::{ActiveView, LayoutMode};

/// Returns the engine version.
pub fn engine_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_version() {
        let version = engine_version();
        assert!(!version.is_empty());
        assert!(version.starts_with("0."));
    }
}
