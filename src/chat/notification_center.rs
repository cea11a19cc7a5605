use crate::clock::{TimerQueue, TimerToken};
use crate::common::{Millis, Notification, NotificationId, NotificationKind};

use super::Deferred;

pub const DEFAULT_NOTIFICATION_TTL_MS: Millis = 4_000;

#[derive(Debug)]
struct Entry {
    notification: Notification,
    expiry: TimerToken,
}

/// Ephemeral alerts, newest first, each with its own expiry timer.
#[derive(Debug)]
pub struct NotificationCenter {
    entries: Vec<Entry>,
    next_id: u64,
    ttl_ms: Millis,
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(DEFAULT_NOTIFICATION_TTL_MS)
    }
}

impl NotificationCenter {
    pub fn new(ttl_ms: Millis) -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
            ttl_ms,
        }
    }

    pub fn enqueue(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
        kind: NotificationKind,
        now: Millis,
        timers: &mut TimerQueue<Deferred>,
    ) -> Notification {
        let id = NotificationId(self.next_id);
        self.next_id += 1;

        let notification = Notification {
            id,
            title: title.into(),
            description: description.into(),
            kind,
            created_at: now,
        };
        let expiry = timers.after(now, self.ttl_ms, Deferred::NotificationExpired { id });
        self.entries.insert(
            0,
            Entry {
                notification: notification.clone(),
                expiry,
            },
        );
        notification
    }

    /// Remove now and cancel the pending expiry. Unknown ids are ignored.
    pub fn dismiss(
        &mut self,
        id: NotificationId,
        timers: &mut TimerQueue<Deferred>,
    ) -> Option<Notification> {
        let entry = self.take(id)?;
        timers.cancel(entry.expiry);
        Some(entry.notification)
    }

    /// Expiry callback. The entry may already be gone after a dismissal.
    pub fn expire(&mut self, id: NotificationId) -> Option<Notification> {
        match self.take(id) {
            Some(entry) => Some(entry.notification),
            None => {
                log::debug!("Expiry for {id} ignored; already removed");
                None
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.entries.iter().map(|entry| &entry.notification)
    }

    pub fn contains(&self, id: NotificationId) -> bool {
        self.entries.iter().any(|entry| entry.notification.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn take(&mut self, id: NotificationId) -> Option<Entry> {
        let index = self
            .entries
            .iter()
            .position(|entry| entry.notification.id == id)?;
        Some(self.entries.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_due(
        center: &mut NotificationCenter,
        timers: &mut TimerQueue<Deferred>,
        now: Millis,
    ) -> usize {
        let mut removed = 0;
        while let Some(due) = timers.pop_due(now) {
            if let Deferred::NotificationExpired { id } = due.task {
                if center.expire(id).is_some() {
                    removed += 1;
                }
            }
        }
        removed
    }

    #[test]
    fn newest_first_with_unique_ids_in_one_tick() {
        let mut center = NotificationCenter::default();
        let mut timers = TimerQueue::new();
        let first = center.enqueue("A", "a", NotificationKind::Info, 0, &mut timers);
        let second = center.enqueue("B", "b", NotificationKind::Success, 0, &mut timers);

        assert_ne!(first.id, second.id);
        let titles: Vec<_> = center.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["B", "A"]);
    }

    #[test]
    fn expires_after_ttl() {
        let mut center = NotificationCenter::default();
        let mut timers = TimerQueue::new();
        center.enqueue("A", "a", NotificationKind::Info, 1_000, &mut timers);

        assert_eq!(run_due(&mut center, &mut timers, 4_999), 0);
        assert_eq!(center.len(), 1);
        assert_eq!(run_due(&mut center, &mut timers, 5_000), 1);
        assert!(center.is_empty());
    }

    #[test]
    fn dismiss_cancels_expiry_and_is_idempotent() {
        let mut center = NotificationCenter::default();
        let mut timers = TimerQueue::new();
        let keep = center.enqueue("keep", "", NotificationKind::Info, 0, &mut timers);
        let gone = center.enqueue("gone", "", NotificationKind::Warning, 0, &mut timers);

        assert_eq!(center.dismiss(gone.id, &mut timers).map(|n| n.id), Some(gone.id));
        assert!(center.dismiss(gone.id, &mut timers).is_none());
        assert!(!center.contains(gone.id));
        assert!(center.contains(keep.id));
        assert_eq!(timers.len(), 1);
    }

    #[test]
    fn stale_expiry_is_a_no_op() {
        let mut center = NotificationCenter::new(100);
        let mut timers = TimerQueue::new();
        let n = center.enqueue("A", "", NotificationKind::Error, 0, &mut timers);
        center.entries.clear();
        assert!(center.expire(n.id).is_none());
        assert_eq!(run_due(&mut center, &mut timers, 100), 0);
    }
}
