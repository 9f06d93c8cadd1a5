//! Session host: owns the store and runs the effects it reports.
//!
//! A session is built once at startup by [`Session::open`], which restores
//! the persisted snapshot before any other action, and is then passed by
//! `&mut` to whoever drives it (the console loop, tests).

use std::sync::Arc;
use std::time::Instant;

use crate::kernel::services::ports::{Settings, StateStorage};
use crate::kernel::{
    Action, AppState, Clock, DispatchResult, Effect, Notification, NotificationDraft,
    NotificationTimers, PartialAppState, Store, SubscriptionId, User,
};

use super::persistence::StatePersistence;
use super::theme::ThemeHook;

pub struct Session {
    store: Store,
    timers: NotificationTimers,
    persistence: StatePersistence,
    theme_hook: Box<dyn ThemeHook>,
    settings: Settings,
}

impl Session {
    pub fn open(
        settings: Settings,
        storage: impl StateStorage + 'static,
        clock: Arc<dyn Clock>,
        theme_hook: impl ThemeHook + 'static,
    ) -> Self {
        let store = Store::with_clock(AppState::default(), clock)
            .with_dedup_window(settings.dedup_window());
        let persistence = StatePersistence::new(storage, settings.storage_key.clone());

        let mut session = Self {
            store,
            timers: NotificationTimers::with_auto_dismiss(settings.auto_dismiss()),
            persistence,
            theme_hook: Box::new(theme_hook),
            settings,
        };

        let mut theme_applied = false;
        if let Some(partial) = session.persistence.load() {
            let result = session.dispatch(Action::LoadState(partial));
            theme_applied = result
                .effects
                .iter()
                .any(|e| matches!(e, Effect::ApplyTheme(_)));
        }
        // Sync the document marker with whatever theme we start with.
        if !theme_applied {
            let theme = session.store.state().theme;
            session.theme_hook.apply(theme);
        }
        let now = session.now();
        session
            .timers
            .observe(&session.store.state().notifications, now);

        tracing::info!(
            key = %session.persistence.key(),
            theme = session.store.state().theme.label(),
            notifications = session.store.state().notifications.len(),
            "session opened"
        );
        session
    }

    pub fn state(&self) -> &AppState {
        self.store.state()
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn timers(&self) -> &NotificationTimers {
        &self.timers
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&AppState) + Send + 'static,
    ) -> SubscriptionId {
        self.store.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.store.unsubscribe(id)
    }

    pub fn dispatch(&mut self, action: Action) -> DispatchResult {
        let result = self.store.dispatch(action);
        for effect in &result.effects {
            self.run_effect(*effect);
        }
        result
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

    /// Returns the new notification's id, or `None` if it was suppressed as
    /// a duplicate.
    pub fn add_notification(&mut self, draft: NotificationDraft) -> Option<String> {
        let result = self.store.add_notification(draft);
        for effect in &result.effects {
            self.run_effect(*effect);
        }
        if !result.state_changed {
            return None;
        }
        self.store.state().notifications.first().map(|n| n.id.clone())
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

    pub fn visible_notifications(&self) -> &[Notification] {
        self.state()
            .visible_notifications(self.settings.max_visible_notifications)
    }

    /// Removes every notification whose display window has run out.
    /// Returns whether the state changed.
    pub fn tick(&mut self) -> bool {
        let now = self.now();
        self.expire(now)
    }

    pub fn expire(&mut self, now: Instant) -> bool {
        let due = self.timers.due(now);
        let mut changed = false;
        for id in due {
            tracing::debug!(%id, "notification expired");
            changed |= self.dispatch(Action::RemoveNotification(id)).state_changed;
        }
        changed
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    /// Restores defaults and drops the persisted snapshot.
    pub fn reset(&mut self) -> DispatchResult {
        let result = self.dispatch(Action::LoadState(AppState::default().into()));
        self.persistence.clear();
        result
    }

    /// Cancels pending timers and writes the final state.
    pub fn shutdown(&mut self) {
        let pending = self.timers.len();
        self.timers.clear();
        self.persistence.save(self.store.state());
        tracing::info!(pending_timers = pending, "session closed");
    }

    fn now(&self) -> Instant {
        self.store.clock().now()
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::PersistState => {
                self.persistence.save(self.store.state());
            }
            Effect::ApplyTheme(theme) => self.theme_hook.apply(theme),
            Effect::NotificationsChanged => {
                let now = self.now();
                self.timers.observe(&self.store.state().notifications, now);
            }
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("store", &self.store)
            .field("timers", &self.timers)
            .field("persistence", &self.persistence)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/app/session.rs"]
mod tests;
