//! Conversation session: the message list and the send/reply cycle.
//!
//! A [`ConversationSession`] owns the messages of one conversation, the
//! current draft and the typing indicator. Sending schedules a simulated
//! reply (see [`crate::reply`]); reply progress is applied by whoever owns
//! the session, either with [`ConversationSession::process_events`] on each
//! UI tick or by awaiting [`ConversationSession::next_event`].

use std::collections::BTreeMap;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::TypingIndicatorMode;
use crate::message::{Message, MessageId, SeedMessage, Sender};
use crate::reply::{ReplyEvent, ReplyId, ReplySimulator, ReplyTiming};

/// Default content of the simulated reply.
pub const DEFAULT_CANNED_REPLY: &str = "Thanks for your message! I'll get back to you soon.";

/// Settings a session is created with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    /// Reply timeline delays.
    pub timing: ReplyTiming,
    /// Content of every simulated reply.
    pub canned_reply: String,
    /// How overlapping replies drive the typing indicator.
    pub typing_mode: TypingIndicatorMode,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            timing: ReplyTiming::default(),
            canned_reply: DEFAULT_CANNED_REPLY.into(),
            typing_mode: TypingIndicatorMode::default(),
        }
    }
}

/// Aggregate state of the reply cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplyState {
    /// No reply pending.
    #[default]
    Idle,
    /// A reply is scheduled; nothing visible yet.
    ReplyScheduled,
    /// The counterparty is composing.
    Typing,
}

/// Phase of a single pending reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReplyPhase {
    Scheduled,
    Typing,
}

/// State of one conversation.
#[derive(Debug)]
pub struct ConversationSession {
    session_id: Uuid,
    conversation_id: String,
    messages: Vec<Message>,
    draft: String,
    next_message_id: u64,
    typing: bool,
    pending: BTreeMap<ReplyId, ReplyPhase>,
    canned_reply: String,
    typing_mode: TypingIndicatorMode,
    replies: ReplySimulator,
}

impl ConversationSession {
    /// Create a session seeded with prior history.
    ///
    /// Seed messages get ids `1..=n` in order.
    pub fn new(
        conversation_id: impl Into<String>,
        seed: Vec<SeedMessage>,
        options: SessionOptions,
    ) -> Self {
        let conversation_id = conversation_id.into();
        let session_id = Uuid::new_v4();

        let mut next_message_id = 1;
        let messages = seed
            .into_iter()
            .map(|seed| {
                let id = MessageId(next_message_id);
                next_message_id += 1;
                Message {
                    id,
                    content: seed.content,
                    sender: seed.sender,
                    sent_at: seed.sent_at,
                }
            })
            .collect::<Vec<_>>();

        info!(
            session = %session_id,
            conversation = %conversation_id,
            seeded = messages.len(),
            "Session opened"
        );

        Self {
            session_id,
            conversation_id,
            messages,
            draft: String::new(),
            next_message_id,
            typing: false,
            pending: BTreeMap::new(),
            canned_reply: options.canned_reply,
            typing_mode: options.typing_mode,
            replies: ReplySimulator::new(options.timing),
        }
    }

    /// Unique id of this session instance.
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Id of the conversation this session displays.
    pub fn conversation_id(&self) -> &str {
        &self.conversation_id
    }

    /// Messages in display order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Whether the counterparty is shown as typing.
    pub fn typing_indicator(&self) -> bool {
        self.typing
    }

    /// The text being composed.
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Replace the draft. No validation.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Number of replies not yet delivered.
    pub fn pending_replies(&self) -> usize {
        self.pending.len()
    }

    /// Aggregate reply state: typing wins over scheduled.
    pub fn reply_state(&self) -> ReplyState {
        if self.pending.values().any(|p| *p == ReplyPhase::Typing) {
            ReplyState::Typing
        } else if self.pending.is_empty() {
            ReplyState::Idle
        } else {
            ReplyState::ReplyScheduled
        }
    }

    /// Send the draft.
    ///
    /// A draft that is empty after trimming is ignored silently and `None`
    /// is returned. Otherwise the untrimmed draft is appended as a local
    /// message, the draft is cleared and a reply is scheduled.
    ///
    /// Must be called from within a tokio runtime.
    pub fn submit_draft(&mut self) -> Option<MessageId> {
        if self.draft.trim().is_empty() {
            return None;
        }

        let content = std::mem::take(&mut self.draft);
        let id = self.push_message(Sender::Local, content);

        let reply = self.replies.schedule();
        self.pending.insert(reply, ReplyPhase::Scheduled);

        debug!(
            session = %self.session_id,
            message = %id,
            %reply,
            due_in = ?self.replies.timing().total(),
            "Draft submitted"
        );
        Some(id)
    }

    /// Apply every queued reply event without waiting.
    ///
    /// Returns the number of events applied.
    pub fn process_events(&mut self) -> usize {
        let mut applied = 0;
        while let Some(event) = self.replies.try_next() {
            self.apply(event);
            applied += 1;
        }
        applied
    }

    /// Wait for the next reply event and apply it.
    ///
    /// Does not resolve while no reply is pending.
    pub async fn next_event(&mut self) -> Option<ReplyEvent> {
        let event = self.replies.next().await?;
        self.apply(event);
        Some(event)
    }

    /// Wait until every pending reply has been delivered.
    pub async fn settle(&mut self) {
        while !self.pending.is_empty() {
            if self.next_event().await.is_none() {
                break;
            }
        }
    }

    /// Cancel pending replies and clear the typing indicator.
    ///
    /// Called when the conversation view is torn down; also runs on drop.
    pub fn shutdown(&mut self) {
        let aborted = self.replies.cancel_all();
        self.pending.clear();
        self.typing = false;
        info!(session = %self.session_id, aborted, "Session closed");
    }

    fn apply(&mut self, event: ReplyEvent) {
        let reply = event.reply();
        let Some(phase) = self.pending.get_mut(&reply) else {
            warn!(session = %self.session_id, %reply, "Ignoring event for unknown reply");
            return;
        };

        match event {
            ReplyEvent::Typing { .. } => {
                *phase = ReplyPhase::Typing;
                self.typing = true;
                debug!(session = %self.session_id, %reply, "Remote typing");
            }
            ReplyEvent::Delivered { .. } => {
                self.pending.remove(&reply);
                self.typing = match self.typing_mode {
                    TypingIndicatorMode::SharedFlag => false,
                    TypingIndicatorMode::PerReply => {
                        self.pending.values().any(|p| *p == ReplyPhase::Typing)
                    }
                };
                let content = self.canned_reply.clone();
                let id = self.push_message(Sender::Remote, content);
                debug!(session = %self.session_id, %reply, message = %id, "Reply delivered");
            }
        }
    }

    fn push_message(&mut self, sender: Sender, content: String) -> MessageId {
        let id = MessageId(self.next_message_id);
        self.next_message_id += 1;
        self.messages.push(Message::new(id, sender, content));
        id
    }
}

impl Drop for ConversationSession {
    fn drop(&mut self) {
        let running = self.replies.running();
        if running > 0 {
            debug!(
                session = %self.session_id,
                running,
                "Dropping session with running replies"
            );
        }
        // ReplySimulator aborts its tasks on drop.
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::SentAt;
    use std::time::Duration;
    use tokio::time::Instant;

    fn seed() -> Vec<SeedMessage> {
        vec![
            SeedMessage::remote("Hey, how are you?", "5 minutes ago"),
            SeedMessage::local("I'm good, thanks! How about you?", "4 minutes ago"),
            SeedMessage::remote(
                "Just working on some new projects. Would love to catch up soon!",
                "3 minutes ago",
            ),
        ]
    }

    fn session() -> ConversationSession {
        ConversationSession::new("1", seed(), SessionOptions::default())
    }

    fn session_with_mode(mode: TypingIndicatorMode) -> ConversationSession {
        let options = SessionOptions {
            typing_mode: mode,
            ..SessionOptions::default()
        };
        ConversationSession::new("1", seed(), options)
    }

    #[test]
    fn test_seeded_session_starts_idle() {
        let session = session();
        assert_eq!(session.messages().len(), 3);
        assert_eq!(session.draft(), "");
        assert!(!session.typing_indicator());
        assert_eq!(session.reply_state(), ReplyState::Idle);
        assert_eq!(session.conversation_id(), "1");

        let ids: Vec<u64> = session.messages().iter().map(|m| m.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(
            session.messages()[0].sent_at,
            SentAt::Label("5 minutes ago".into())
        );
    }

    #[test]
    fn test_blank_drafts_are_ignored() {
        let mut session = session();

        session.set_draft("");
        assert_eq!(session.submit_draft(), None);
        assert_eq!(session.messages().len(), 3);
        assert_eq!(session.draft(), "");

        session.set_draft("   ");
        assert_eq!(session.submit_draft(), None);
        assert_eq!(session.messages().len(), 3);
        assert_eq!(session.draft(), "   ");

        session.set_draft("\n\t ");
        assert_eq!(session.submit_draft(), None);
        assert_eq!(session.pending_replies(), 0);
        assert_eq!(session.reply_state(), ReplyState::Idle);
    }

    #[test]
    fn test_messages_snapshot_is_stable() {
        let session = session();
        let first = session.messages().to_vec();
        let second = session.messages().to_vec();
        assert_eq!(first, second);
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_appends_untrimmed_local_message() {
        let mut session = session();
        session.set_draft("  spaced out  ");

        let id = session.submit_draft().unwrap();

        let last = session.messages().last().unwrap();
        assert_eq!(last.id, id);
        assert_eq!(last.id, MessageId(4));
        assert_eq!(last.content, "  spaced out  ");
        assert_eq!(last.sender, Sender::Local);
        assert!(matches!(last.sent_at, SentAt::At(_)));
        assert_eq!(session.draft(), "");
        assert_eq!(session.reply_state(), ReplyState::ReplyScheduled);
        assert!(!session.typing_indicator());
    }

    #[tokio::test(start_paused = true)]
    async fn test_hello_there_scenario() {
        let mut session = session();
        let start = Instant::now();

        session.set_draft("Hello there");
        session.submit_draft();

        assert_eq!(session.messages().len(), 4);
        let last = session.messages().last().unwrap();
        assert_eq!(last.content, "Hello there");
        assert_eq!(last.sender, Sender::Local);
        assert_eq!(session.draft(), "");
        assert_eq!(session.process_events(), 0);
        assert!(!session.typing_indicator());

        let event = session.next_event().await.unwrap();
        assert!(matches!(event, ReplyEvent::Typing { .. }));
        assert!(start.elapsed() >= Duration::from_millis(1000));
        assert!(session.typing_indicator());
        assert_eq!(session.reply_state(), ReplyState::Typing);
        assert_eq!(session.messages().len(), 4);

        let event = session.next_event().await.unwrap();
        assert!(matches!(event, ReplyEvent::Delivered { .. }));
        assert!(start.elapsed() >= Duration::from_millis(3000));
        assert!(!session.typing_indicator());
        assert_eq!(session.reply_state(), ReplyState::Idle);
        assert_eq!(session.messages().len(), 5);

        let reply = session.messages().last().unwrap();
        assert_eq!(reply.sender, Sender::Remote);
        assert_eq!(reply.content, DEFAULT_CANNED_REPLY);
        assert_eq!(reply.id, MessageId(5));
    }

    #[tokio::test(start_paused = true)]
    async fn test_process_events_after_delays() {
        let mut session = session();
        session.set_draft("ping");
        session.submit_draft();

        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert_eq!(session.process_events(), 1);
        assert!(session.typing_indicator());

        tokio::time::sleep(Duration::from_millis(2000)).await;
        assert_eq!(session.process_events(), 1);
        assert!(!session.typing_indicator());
        assert_eq!(session.messages().len(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_two_rapid_submits() {
        let mut session = session();

        session.set_draft("a");
        session.submit_draft();
        session.set_draft("b");
        session.submit_draft();

        assert_eq!(session.messages().len(), 5);
        assert_eq!(session.pending_replies(), 2);
        let locals: Vec<&str> = session.messages()[3..]
            .iter()
            .map(|m| m.content.as_str())
            .collect();
        assert_eq!(locals, vec!["a", "b"]);

        session.settle().await;

        assert_eq!(session.messages().len(), 7);
        let remotes = session.messages()[5..]
            .iter()
            .filter(|m| m.sender == Sender::Remote)
            .count();
        assert_eq!(remotes, 2);
        assert!(!session.typing_indicator());
        assert_eq!(session.reply_state(), ReplyState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_messages_only_grow() {
        let mut session = session();
        let mut previous = session.messages().to_vec();

        for text in ["one", "two", "three"] {
            session.set_draft(text);
            session.submit_draft();
            let current = session.messages().to_vec();
            assert!(current.len() > previous.len());
            assert_eq!(&current[..previous.len()], previous.as_slice());
            previous = current;
        }

        while session.pending_replies() > 0 {
            session.next_event().await;
            let current = session.messages().to_vec();
            assert_eq!(&current[..previous.len()], previous.as_slice());
            previous = current;
        }
        assert_eq!(previous.len(), 9);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ids_unique_across_interleaving() {
        let mut session = session();
        session.set_draft("x");
        session.submit_draft();
        session.next_event().await;
        session.set_draft("y");
        session.submit_draft();
        session.settle().await;

        let mut ids: Vec<MessageId> = session.messages().iter().map(|m| m.id).collect();
        let len = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), len);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shared_flag_last_writer_wins() {
        let mut session = session_with_mode(TypingIndicatorMode::SharedFlag);

        session.set_draft("a");
        session.submit_draft();
        tokio::time::sleep(Duration::from_millis(500)).await;
        session.set_draft("b");
        session.submit_draft();

        // t=1000: a typing. t=1500: b typing. t=3000: a delivered.
        tokio::time::sleep(Duration::from_millis(2600)).await;
        session.process_events();
        assert_eq!(session.messages().len(), 6);
        assert!(!session.typing_indicator());
        // b is still composing even though the shared flag dropped.
        assert_eq!(session.reply_state(), ReplyState::Typing);
    }

    #[tokio::test(start_paused = true)]
    async fn test_per_reply_keeps_indicator_on() {
        let mut session = session_with_mode(TypingIndicatorMode::PerReply);

        session.set_draft("a");
        session.submit_draft();
        tokio::time::sleep(Duration::from_millis(500)).await;
        session.set_draft("b");
        session.submit_draft();

        tokio::time::sleep(Duration::from_millis(2600)).await;
        session.process_events();
        assert_eq!(session.messages().len(), 6);
        assert!(session.typing_indicator());

        session.settle().await;
        assert!(!session.typing_indicator());
        assert_eq!(session.messages().len(), 7);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_cancels_pending_replies() {
        let mut session = session();
        session.set_draft("bye");
        session.submit_draft();
        tokio::time::sleep(Duration::from_millis(1200)).await;
        session.process_events();
        assert!(session.typing_indicator());

        session.shutdown();
        assert!(!session.typing_indicator());
        assert_eq!(session.pending_replies(), 0);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(session.process_events(), 0);
        assert_eq!(session.messages().len(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_reply_and_timing() {
        let options = SessionOptions {
            timing: ReplyTiming {
                typing_delay: Duration::from_millis(10),
                reply_delay: Duration::from_millis(20),
            },
            canned_reply: "Got it".into(),
            typing_mode: TypingIndicatorMode::SharedFlag,
        };
        let mut session = ConversationSession::new("2", Vec::new(), options);
        let start = Instant::now();

        session.set_draft("hi");
        assert_eq!(session.submit_draft(), Some(MessageId(1)));
        session.settle().await;

        assert!(start.elapsed() >= Duration::from_millis(30));
        assert!(start.elapsed() < Duration::from_millis(1000));
        assert_eq!(session.messages()[1].content, "Got it");
    }
}
