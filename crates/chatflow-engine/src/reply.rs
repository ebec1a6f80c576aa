//! Simulated remote replies.
//!
//! Every successful send schedules one reply timeline: after
//! [`ReplyTiming::typing_delay`] the counterparty starts typing, after a
//! further [`ReplyTiming::reply_delay`] the reply is delivered. Each timeline
//! runs as its own tokio task and reports back over a channel; the owner of
//! the session applies the events.
//!
//! # Event Channel
//! Tasks send with `let _ = tx.send(...)`. If the receiver is gone the
//! session has been torn down and the event has nowhere to go.

use std::fmt;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

/// Identifier of one scheduled reply timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReplyId(pub u64);

impl fmt::Display for ReplyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "reply-{}", self.0)
    }
}

/// Delays of the reply timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplyTiming {
    /// From scheduling until the counterparty starts typing.
    pub typing_delay: Duration,
    /// From typing until the reply is delivered.
    pub reply_delay: Duration,
}

impl Default for ReplyTiming {
    fn default() -> Self {
        Self {
            typing_delay: Duration::from_millis(1000),
            reply_delay: Duration::from_millis(2000),
        }
    }
}

impl ReplyTiming {
    /// Total time from scheduling to delivery.
    pub fn total(&self) -> Duration {
        self.typing_delay + self.reply_delay
    }
}

/// Progress reported by a reply timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyEvent {
    /// The counterparty started composing.
    Typing { reply: ReplyId },
    /// The reply is ready to be appended.
    Delivered { reply: ReplyId },
}

impl ReplyEvent {
    /// The timeline this event belongs to.
    pub fn reply(&self) -> ReplyId {
        match self {
            Self::Typing { reply } | Self::Delivered { reply } => *reply,
        }
    }
}

/// Spawns and tracks reply timelines.
#[derive(Debug)]
pub struct ReplySimulator {
    timing: ReplyTiming,
    next_id: u64,
    event_tx: mpsc::UnboundedSender<ReplyEvent>,
    event_rx: mpsc::UnboundedReceiver<ReplyEvent>,
    tasks: Vec<(ReplyId, JoinHandle<()>)>,
}

impl ReplySimulator {
    /// Create a simulator with the given delays.
    pub fn new(timing: ReplyTiming) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        Self {
            timing,
            next_id: 1,
            event_tx,
            event_rx,
            tasks: Vec::new(),
        }
    }

    /// The configured delays.
    pub fn timing(&self) -> ReplyTiming {
        self.timing
    }

    /// Schedule a new reply timeline.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule(&mut self) -> ReplyId {
        let reply = ReplyId(self.next_id);
        self.next_id += 1;

        self.tasks.retain(|(_, handle)| !handle.is_finished());

        let tx = self.event_tx.clone();
        let timing = self.timing;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(timing.typing_delay).await;
            let _ = tx.send(ReplyEvent::Typing { reply });
            tokio::time::sleep(timing.reply_delay).await;
            let _ = tx.send(ReplyEvent::Delivered { reply });
        });
        self.tasks.push((reply, handle));

        debug!(%reply, "Reply scheduled");
        reply
    }

    /// Take the next event if one is queued.
    pub fn try_next(&mut self) -> Option<ReplyEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Wait for the next event.
    ///
    /// Never resolves while nothing is scheduled, since the simulator keeps
    /// its own sender alive.
    pub async fn next(&mut self) -> Option<ReplyEvent> {
        self.event_rx.recv().await
    }

    /// Number of timelines whose task has not finished.
    pub fn running(&self) -> usize {
        self.tasks
            .iter()
            .filter(|(_, handle)| !handle.is_finished())
            .count()
    }

    /// Abort every timeline and drop queued events.
    ///
    /// Returns the number of tasks that were still running.
    pub fn cancel_all(&mut self) -> usize {
        let mut aborted = 0;
        for (reply, handle) in self.tasks.drain(..) {
            if !handle.is_finished() {
                handle.abort();
                aborted += 1;
                debug!(%reply, "Reply cancelled");
            }
        }
        while self.event_rx.try_recv().is_ok() {}
        aborted
    }
}

impl Drop for ReplySimulator {
    fn drop(&mut self) {
        for (_, handle) in &self.tasks {
            handle.abort();
        }
    }
}
