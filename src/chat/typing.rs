use rand::Rng;
use rand::seq::SliceRandom;

use crate::clock::TimerQueue;
use crate::common::{Millis, Participant, TypingState};

use super::Deferred;
use super::demo::REPLY_PHRASES;

pub const DEFAULT_TYPING_DURATION_MS: Millis = 1_500;

/// Emitted once per completed typing session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyReady {
    /// Recipient captured when the session started.
    pub recipient: Participant,
    pub content: String,
}

#[derive(Debug)]
struct Session {
    id: u64,
    recipient: Participant,
}

/// `Idle --start--> Typing --timeout--> Idle`, one session at a time.
///
/// A `start` while already typing is coalesced into the running session.
#[derive(Debug)]
pub struct TypingSimulator {
    state: TypingState,
    session: Option<Session>,
    next_session: u64,
    duration_ms: Millis,
    phrases: &'static [&'static str],
}

impl Default for TypingSimulator {
    fn default() -> Self {
        Self::new(DEFAULT_TYPING_DURATION_MS)
    }
}

impl TypingSimulator {
    pub fn new(duration_ms: Millis) -> Self {
        Self::with_phrases(duration_ms, REPLY_PHRASES)
    }

    /// `phrases` must not be empty.
    pub fn with_phrases(duration_ms: Millis, phrases: &'static [&'static str]) -> Self {
        debug_assert!(!phrases.is_empty());
        Self {
            state: TypingState::Idle,
            session: None,
            next_session: 1,
            duration_ms,
            phrases,
        }
    }

    /// Returns `false` when the call was coalesced into a running session.
    pub fn start(
        &mut self,
        recipient: &Participant,
        now: Millis,
        timers: &mut TimerQueue<Deferred>,
    ) -> bool {
        if self.session.is_some() {
            log::debug!(
                "Typing already in progress; ignoring start for {}",
                recipient.id
            );
            return false;
        }

        let id = self.next_session;
        self.next_session += 1;
        self.session = Some(Session {
            id,
            recipient: recipient.clone(),
        });
        self.state = TypingState::Typing {
            recipient_id: recipient.id.clone(),
            started_at: now,
        };
        timers.after(now, self.duration_ms, Deferred::TypingFinished { session: id });
        true
    }

    /// Timeout for `session`. Returns the reply when that session was the active one.
    pub fn finish(&mut self, session: u64, rng: &mut impl Rng) -> Option<ReplyReady> {
        if self.session.as_ref().map(|s| s.id) != Some(session) {
            log::debug!("Stale typing timeout for session {session}");
            return None;
        }
        let finished = self.session.take()?;
        self.state = TypingState::Idle;

        let content = self
            .phrases
            .choose(rng)
            .map(|phrase| phrase.to_string())
            .unwrap_or_default();
        Some(ReplyReady {
            recipient: finished.recipient,
            content,
        })
    }

    pub fn state(&self) -> &TypingState {
        &self.state
    }

    pub fn is_typing(&self) -> bool {
        self.session.is_some()
    }

    pub fn phrases(&self) -> &'static [&'static str] {
        self.phrases
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::common::Presence;

    fn bob() -> Participant {
        Participant::new("bob", "Bob Smith", Presence::Online)
    }

    #[test]
    fn one_start_yields_one_reply() {
        let mut typing = TypingSimulator::default();
        let mut timers = TimerQueue::new();
        let mut rng = StdRng::seed_from_u64(7);

        assert!(typing.start(&bob(), 100, &mut timers));
        assert_eq!(
            typing.state(),
            &TypingState::Typing {
                recipient_id: "bob".into(),
                started_at: 100
            }
        );
        assert!(timers.pop_due(1_599).is_none());

        let due = timers.pop_due(1_600).unwrap();
        let Deferred::TypingFinished { session } = due.task else {
            panic!("unexpected task {:?}", due.task);
        };
        let reply = typing.finish(session, &mut rng).unwrap();
        assert_eq!(reply.recipient.id, "bob");
        assert!(REPLY_PHRASES.contains(&reply.content.as_str()));
        assert_eq!(typing.state(), &TypingState::Idle);

        assert!(typing.finish(session, &mut rng).is_none());
    }

    #[test]
    fn start_while_typing_is_coalesced() {
        let mut typing = TypingSimulator::default();
        let mut timers = TimerQueue::new();
        let charlie = Participant::new("charlie", "Charlie Brown", Presence::Away);

        assert!(typing.start(&bob(), 0, &mut timers));
        assert!(!typing.start(&charlie, 500, &mut timers));
        assert_eq!(timers.len(), 1);

        let mut rng = StdRng::seed_from_u64(1);
        let mut replies = Vec::new();
        while let Some(due) = timers.pop_due(10_000) {
            if let Deferred::TypingFinished { session } = due.task {
                replies.extend(typing.finish(session, &mut rng));
            }
        }
        assert_eq!(replies.len(), 1);
        assert_eq!(replies[0].recipient.id, "bob");
    }

    #[test]
    fn can_start_again_after_finishing() {
        static ONLY: &[&str] = &["ok"];
        let mut typing = TypingSimulator::with_phrases(10, ONLY);
        let mut timers = TimerQueue::new();
        let mut rng = StdRng::seed_from_u64(3);

        typing.start(&bob(), 0, &mut timers);
        let first = timers.pop_due(10).unwrap();
        if let Deferred::TypingFinished { session } = first.task {
            assert_eq!(typing.finish(session, &mut rng).unwrap().content, "ok");
        }
        assert!(typing.start(&bob(), 20, &mut timers));
        assert!(typing.is_typing());
    }
}
