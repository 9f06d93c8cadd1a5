//! Auto-dismiss bookkeeping for notifications.
//!
//! One deadline per notification id. Deadlines are polled rather than
//! spawned: the host calls [`NotificationTimers::due`] from its tick and
//! dispatches the removals itself.

use rustc_hash::{FxHashMap, FxHashSet};
use std::time::{Duration, Instant};

use super::notification::Notification;

/// How long an unread notification stays on screen.
pub const AUTO_DISMISS_AFTER: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ObserveReport {
    pub scheduled: usize,
    pub cancelled: usize,
}

impl ObserveReport {
    pub fn is_empty(&self) -> bool {
        self.scheduled == 0 && self.cancelled == 0
    }
}

#[derive(Debug)]
pub struct NotificationTimers {
    auto_dismiss: Duration,
    deadlines: FxHashMap<String, Instant>,
}

impl NotificationTimers {
    pub fn new() -> Self {
        Self::with_auto_dismiss(AUTO_DISMISS_AFTER)
    }

    pub fn with_auto_dismiss(auto_dismiss: Duration) -> Self {
        Self {
            auto_dismiss,
            deadlines: FxHashMap::default(),
        }
    }

    pub fn auto_dismiss(&self) -> Duration {
        self.auto_dismiss
    }

    /// Reconciles timers with the current notification list: unread and
    /// unscheduled entries get a deadline, timers for entries no longer in
    /// the list are cancelled.
    pub fn observe(&mut self, notifications: &[Notification], now: Instant) -> ObserveReport {
        let live: FxHashSet<&str> = notifications.iter().map(|n| n.id.as_str()).collect();

        let before = self.deadlines.len();
        self.deadlines.retain(|id, _| live.contains(id.as_str()));
        let cancelled = before - self.deadlines.len();

        let mut scheduled = 0;
        for notification in notifications.iter().filter(|n| !n.read) {
            if self.deadlines.contains_key(&notification.id) {
                continue;
            }
            self.deadlines
                .insert(notification.id.clone(), now + self.auto_dismiss);
            scheduled += 1;
        }

        let report = ObserveReport {
            scheduled,
            cancelled,
        };
        if !report.is_empty() {
            tracing::debug!(
                scheduled,
                cancelled,
                pending = self.deadlines.len(),
                "notification timers reconciled"
            );
        }
        report
    }

    /// Removes and returns every id whose deadline is at or before `now`,
    /// earliest deadline first.
    pub fn due(&mut self, now: Instant) -> Vec<String> {
        let mut expired: Vec<(Instant, String)> = self
            .deadlines
            .iter()
            .filter(|(_, deadline)| **deadline <= now)
            .map(|(id, deadline)| (*deadline, id.clone()))
            .collect();
        if expired.is_empty() {
            return Vec::new();
        }

        expired.sort();
        for (_, id) in &expired {
            self.deadlines.remove(id);
        }
        expired.into_iter().map(|(_, id)| id).collect()
    }

    pub fn cancel(&mut self, id: &str) -> bool {
        self.deadlines.remove(id).is_some()
    }

    /// Drops every pending timer; used on teardown.
    pub fn clear(&mut self) {
        self.deadlines.clear();
    }

    pub fn is_scheduled(&self, id: &str) -> bool {
        self.deadlines.contains_key(id)
    }

    pub fn deadline(&self, id: &str) -> Option<Instant> {
        self.deadlines.get(id).copied()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadlines.values().min().copied()
    }

    pub fn len(&self) -> usize {
        self.deadlines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deadlines.is_empty()
    }
}

impl Default for NotificationTimers {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/lifecycle.rs"]
mod tests;
