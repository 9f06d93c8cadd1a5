use std::sync::Arc;
use std::time::Duration;

use super::clock::{Clock, SystemClock};
use super::notification::{generate_unique_id, NotificationDraft, DEDUP_WINDOW};
use super::reducer::reduce;
use super::state::{PartialAppState, User};
use super::{Action, AppState, Effect};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchResult {
    pub effects: Vec<Effect>,
    pub state_changed: bool,
}

impl DispatchResult {
    pub fn unchanged() -> Self {
        Self::default()
    }

    pub fn has_effect(&self, effect: Effect) -> bool {
        self.effects.contains(&effect)
    }

    pub fn merge(&mut self, other: DispatchResult) {
        self.state_changed |= other.state_changed;
        for effect in other.effects {
            if !self.effects.contains(&effect) {
                self.effects.push(effect);
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&AppState) + Send>;

/// Sole owner of [`AppState`]. Every mutation goes through [`Store::dispatch`].
pub struct Store {
    state: AppState,
    clock: Arc<dyn Clock>,
    dedup_window: Duration,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
    revision: u64,
}

impl Store {
    pub fn new(state: AppState) -> Self {
        Self::with_clock(state, Arc::new(SystemClock))
    }

    pub fn with_clock(state: AppState, clock: Arc<dyn Clock>) -> Self {
        Self {
            state,
            clock,
            dedup_window: DEDUP_WINDOW,
            listeners: Vec::new(),
            next_subscription: 0,
            revision: 0,
        }
    }

    pub fn with_dedup_window(mut self, window: Duration) -> Self {
        self.dedup_window = window;
        self
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Number of dispatches that actually changed the state.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn dispatch(&mut self, action: Action) -> DispatchResult {
        let name = action.name();
        let transition = reduce(&self.state, action, self.dedup_window);
        if !transition.changed {
            tracing::trace!(action = name, "dispatch left state unchanged");
            return DispatchResult::unchanged();
        }

        self.state = transition.state;
        self.revision += 1;
        tracing::debug!(action = name, revision = self.revision, "state changed");

        for (_, listener) in self.listeners.iter_mut() {
            listener(&self.state);
        }

        DispatchResult {
            effects: transition.effects,
            state_changed: true,
        }
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&AppState) + Send + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    pub fn toggle_theme(&mut self) -> DispatchResult {
        self.dispatch(Action::ToggleTheme)
    }

    pub fn toggle_sidebar(&mut self) -> DispatchResult {
        self.dispatch(Action::ToggleSidebar)
    }

    pub fn set_loading(&mut self, loading: bool) -> DispatchResult {
        self.dispatch(Action::SetLoading(loading))
    }

    pub fn set_current_user(&mut self, user: Option<User>) -> DispatchResult {
        self.dispatch(Action::SetCurrentUser(user))
    }

    /// Stamps `draft` with a fresh id and the current time, then dispatches
    /// it. Repeats inside the dedup window are dropped by the reducer.
    pub fn add_notification(&mut self, draft: NotificationDraft) -> DispatchResult {
        let id = generate_unique_id(|id| self.state.contains_notification(id));
        let notification = draft.into_notification(id, self.clock.wall());
        let title = notification.title.clone();

        let result = self.dispatch(Action::AddNotification(notification));
        if !result.state_changed {
            tracing::debug!(%title, "duplicate notification suppressed");
        }
        result
    }

    pub fn remove_notification(&mut self, id: &str) -> DispatchResult {
        self.dispatch(Action::RemoveNotification(id.to_string()))
    }

    pub fn mark_notification_read(&mut self, id: &str) -> DispatchResult {
        self.dispatch(Action::MarkNotificationRead(id.to_string()))
    }

    pub fn load_state(&mut self, partial: PartialAppState) -> DispatchResult {
        self.dispatch(Action::LoadState(partial))
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .field("dedup_window", &self.dedup_window)
            .field("listeners", &self.listeners.len())
            .field("revision", &self.revision)
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/store.rs"]
mod tests;
