//! Animation Scheduler: turns a message sequence into timed operations.
//!
//! Every operation carries the channel and session generation it was created under. The scheduler
//! only orders and cancels; deciding whether a due operation may still touch the view is the
//! session's job.

use crate::channel::{ChannelId, MessageTemplate};
use crate::config::Timings;

/// Session epoch. Bumped on every channel switch; operations from older epochs are stale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostRevealAction {
    /// Reveal the sidebar and the command input
    ShowInterface,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationKind {
    ShowTyping { duration_ms: u64 },
    Reveal { message: MessageTemplate },
    PostReveal(PostRevealAction),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledOperation {
    pub fire_at_ms: u64,
    /// Insertion order; breaks ties between equal fire times
    pub seq: u64,
    pub kind: OperationKind,
    pub owner: ChannelId,
    pub generation: Generation,
}

impl ScheduledOperation {
    pub fn is_reveal(&self) -> bool {
        matches!(self.kind, OperationKind::Reveal { .. })
    }
}

#[derive(Debug)]
pub struct AnimationScheduler {
    timings: Timings,
    /// Sorted by (fire_at_ms, seq)
    pending: Vec<ScheduledOperation>,
    next_seq: u64,
}

impl AnimationScheduler {
    pub fn new(timings: Timings) -> Self {
        Self { timings, pending: Vec::new(), next_seq: 0 }
    }

    pub fn timings(&self) -> &Timings {
        &self.timings
    }

    /// Schedule typing + reveal for each message, starting at `start_ms`.
    ///
    /// Returns the time of the last reveal, or `None` for an empty sequence.
    pub fn play(
        &mut self,
        messages: &[MessageTemplate],
        owner: &ChannelId,
        generation: Generation,
        start_ms: u64,
    ) -> Option<u64> {
        let typing_ms = self.timings.typing_ms;
        let mut last_reveal = None;
        for (index, message) in messages.iter().enumerate() {
            let typing_at = start_ms.saturating_add(self.timings.delay(index));
            let reveal_at = start_ms.saturating_add(self.timings.reveal_offset(index));
            self.schedule(typing_at, OperationKind::ShowTyping { duration_ms: typing_ms }, owner, generation);
            self.schedule(reveal_at, OperationKind::Reveal { message: message.clone() }, owner, generation);
            last_reveal = Some(reveal_at);
        }
        tracing::debug!(channel = %owner, generation = generation.value(), messages = messages.len(), "scheduled sequence");
        last_reveal
    }

    pub fn schedule(&mut self, fire_at_ms: u64, kind: OperationKind, owner: &ChannelId, generation: Generation) {
        let op = ScheduledOperation { fire_at_ms, seq: self.next_seq, kind, owner: owner.clone(), generation };
        self.next_seq += 1;
        let at = self.pending.partition_point(|p| (p.fire_at_ms, p.seq) <= (op.fire_at_ms, op.seq));
        self.pending.insert(at, op);
    }

    /// Remove and return the earliest operation due at `now_ms`.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<ScheduledOperation> {
        match self.pending.first() {
            Some(op) if op.fire_at_ms <= now_ms => Some(self.pending.remove(0)),
            _ => None,
        }
    }

    /// Drop every pending operation.
    pub fn cancel_all(&mut self) -> Vec<ScheduledOperation> {
        std::mem::take(&mut self.pending)
    }

    pub fn next_deadline(&self) -> Option<u64> {
        self.pending.first().map(|op| op.fire_at_ms)
    }

    /// Reveals still waiting for `generation`.
    pub fn pending_reveals(&self, generation: Generation) -> usize {
        self.pending.iter().filter(|op| op.generation == generation && op.is_reveal()).count()
    }

    pub fn pending(&self) -> &[ScheduledOperation] {
        &self.pending
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }
}
