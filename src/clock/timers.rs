use std::collections::{BTreeMap, HashMap};

use crate::common::Millis;

/// Handle returned by [`TimerQueue::after`]; pass it to [`TimerQueue::cancel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

/// A task whose deadline has passed.
#[derive(Debug, Clone, PartialEq)]
pub struct Due<T> {
    pub token: TimerToken,
    pub due_at: Millis,
    pub task: T,
}

/// Cancellable deferred tasks ordered by (deadline, scheduling order).
///
/// Nothing runs by itself: the owner polls [`TimerQueue::pop_due`] with the
/// current time and executes what comes out.
#[derive(Debug)]
pub struct TimerQueue<T> {
    next_token: u64,
    entries: BTreeMap<(Millis, u64), T>,
    deadlines: HashMap<u64, Millis>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            next_token: 1,
            entries: BTreeMap::new(),
            deadlines: HashMap::new(),
        }
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `task` to fire `delay_ms` after `now`. Negative delays fire on the next poll.
    pub fn after(&mut self, now: Millis, delay_ms: Millis, task: T) -> TimerToken {
        let token = self.next_token;
        self.next_token += 1;
        let due_at = now.saturating_add(delay_ms.max(0));
        self.entries.insert((due_at, token), task);
        self.deadlines.insert(token, due_at);
        TimerToken(token)
    }

    /// Drop a pending task. Returns the task if it had not fired yet.
    pub fn cancel(&mut self, token: TimerToken) -> Option<T> {
        let due_at = self.deadlines.remove(&token.0)?;
        self.entries.remove(&(due_at, token.0))
    }

    /// Take the earliest task with a deadline at or before `now`.
    pub fn pop_due(&mut self, now: Millis) -> Option<Due<T>> {
        let (&(due_at, token), _) = self.entries.first_key_value()?;
        if due_at > now {
            return None;
        }
        let task = self.entries.remove(&(due_at, token))?;
        self.deadlines.remove(&token);
        Some(Due {
            token: TimerToken(token),
            due_at,
            task,
        })
    }

    pub fn next_deadline(&self) -> Option<Millis> {
        self.entries.keys().next().map(|(due_at, _)| *due_at)
    }

    pub fn is_pending(&self, token: TimerToken) -> bool {
        self.deadlines.contains_key(&token.0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
