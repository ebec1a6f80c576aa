//! Data provider: where conversations, histories and contacts come from.
//!
//! The UI only talks to [`DataProvider`]. [`SampleData`] serves the
//! built-in demo data.

use crate::contact::{ContactProfile, ContactTask};
use crate::directory::{Channel, ConversationSummary};
use crate::message::SeedMessage;

/// Source of conversation data.
pub trait DataProvider: Send + Sync {
    /// All conversations in display order.
    fn conversations(&self) -> Vec<ConversationSummary>;

    /// Prior history of a conversation, oldest first.
    fn history(&self, conversation_id: &str) -> Vec<SeedMessage>;

    /// Contact behind a conversation.
    fn contact(&self, conversation_id: &str) -> Option<ContactProfile>;

    /// Look up one conversation summary.
    fn conversation(&self, conversation_id: &str) -> Option<ConversationSummary> {
        self.conversations()
            .into_iter()
            .find(|c| c.id == conversation_id)
    }
}

/// Built-in sample data.
#[derive(Debug, Clone, Default)]
pub struct SampleData;

impl SampleData {
    /// Create the sample provider.
    pub fn new() -> Self {
        Self
    }
}

struct Entry {
    id: &'static str,
    name: &'static str,
    avatar: &'static str,
    preview: &'static str,
    time: &'static str,
    online: bool,
    unread: bool,
    channel: Channel,
}

static ENTRIES: [Entry; 5] = [
    Entry {
        id: "1",
        name: "Simon Williams",
        avatar: "SW",
        preview: "Hey there, I need your help",
        time: "1 minute ago",
        online: true,
        unread: false,
        channel: Channel::Sms,
    },
    Entry {
        id: "2",
        name: "Mary Smith",
        avatar: "MS",
        preview: "Thank you for your time!",
        time: "1 minute ago",
        online: false,
        unread: true,
        channel: Channel::Email,
    },
    Entry {
        id: "3",
        name: "Barry George",
        avatar: "BG",
        preview: "Thank you, I'll take a look now.",
        time: "Dec 20, 2023",
        online: true,
        unread: false,
        channel: Channel::Sms,
    },
    Entry {
        id: "4",
        name: "Michael Bell",
        avatar: "MB",
        preview: "These are fantastic! Is there a way to check them...",
        time: "Jan 5, 2023",
        online: false,
        unread: false,
        channel: Channel::Email,
    },
    Entry {
        id: "5",
        name: "Melissa Nelson",
        avatar: "MN",
        preview: "Thanks a lot for the help, you are very kind!",
        time: "Jan 5, 2023",
        online: false,
        unread: false,
        channel: Channel::Sms,
    },
];

fn entry(conversation_id: &str) -> Option<&'static Entry> {
    ENTRIES.iter().find(|e| e.id == conversation_id)
}

fn simon_williams() -> ContactProfile {
    ContactProfile {
        first_name: "Simon".into(),
        last_name: "Williams".into(),
        team: "Sales".into(),
        mobile_phone: "(423) 546-7733".into(),
        email: "simon@example.com".into(),
        address: "3437 Grape Road, Mishawaka, Indiana 5633".into(),
        status: "VERIFIED".into(),
        tasks: vec![ContactTask {
            title: "Follow up on proposal".into(),
            due: "Tomorrow".into(),
        }],
        note: "Client is interested in our premium package. Schedule a demo next week.".into(),
        units_of_interest: vec!["Premium Package".into(), "Support Add-on".into()],
        files: vec!["proposal.pdf".into(), "contract.docx".into()],
    }
}

impl DataProvider for SampleData {
    fn conversations(&self) -> Vec<ConversationSummary> {
        ENTRIES
            .iter()
            .map(|e| ConversationSummary {
                id: e.id.into(),
                name: e.name.into(),
                avatar: e.avatar.into(),
                preview: e.preview.into(),
                time: e.time.into(),
                online: e.online,
                unread: e.unread,
                channel: e.channel,
            })
            .collect()
    }

    fn history(&self, conversation_id: &str) -> Vec<SeedMessage> {
        match conversation_id {
            "1" => vec![
                SeedMessage::remote("Hey, how are you?", "5 minutes ago"),
                SeedMessage::local("I'm good, thanks! How about you?", "4 minutes ago"),
                SeedMessage::remote(
                    "Just working on some new projects. Would love to catch up soon!",
                    "3 minutes ago",
                ),
            ],
            id => entry(id)
                .map(|e| vec![SeedMessage::remote(e.preview, e.time)])
                .unwrap_or_default(),
        }
    }

    fn contact(&self, conversation_id: &str) -> Option<ContactProfile> {
        match conversation_id {
            "1" => Some(simon_williams()),
            id => entry(id).map(|e| ContactProfile::from_display_name(e.name)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Sender;

    #[test]
    fn test_sample_conversations() {
        let data = SampleData::new();
        let conversations = data.conversations();
        assert_eq!(conversations.len(), 5);
        assert_eq!(conversations[0].name, "Simon Williams");
        assert!(conversations[0].online);
        assert_eq!(conversations[4].avatar, "MN");
    }

    #[test]
    fn test_simon_history_has_three_messages() {
        let history = SampleData::new().history("1");
        let senders: Vec<Sender> = history.iter().map(|m| m.sender).collect();
        assert_eq!(senders, vec![Sender::Remote, Sender::Local, Sender::Remote]);
    }

    #[test]
    fn test_other_history_uses_preview() {
        let history = SampleData::new().history("2");
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].content, "Thank you for your time!");
        assert!(SampleData::new().history("missing").is_empty());
    }

    #[test]
    fn test_contact_lookup() {
        let data = SampleData::new();
        let simon = data.contact("1").unwrap();
        assert_eq!(simon.status, "VERIFIED");
        assert_eq!(simon.files.len(), 2);

        let barry = data.contact("3").unwrap();
        assert_eq!(barry.full_name(), "Barry George");
        assert!(data.contact("99").is_none());
    }

    #[test]
    fn test_conversation_lookup() {
        let data = SampleData::new();
        assert_eq!(data.conversation("4").unwrap().name, "Michael Bell");
        assert!(data.conversation("0").is_none());
    }
}
