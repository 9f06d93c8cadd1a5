//! Pure state transition: `(state, action) -> next state`.

use std::time::Duration;

use super::action::Action;
use super::effect::Effect;
use super::notification::Notification;
use super::state::AppState;

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: AppState,
    pub effects: Vec<Effect>,
    pub changed: bool,
}

pub fn reduce(state: &AppState, action: Action, dedup_window: Duration) -> Transition {
    let mut next = state.clone();

    match action {
        Action::ToggleTheme => next.theme = next.theme.toggled(),
        Action::ToggleSidebar => next.sidebar_collapsed = !next.sidebar_collapsed,
        Action::SetLoading(loading) => next.is_loading = loading,
        Action::SetCurrentUser(user) => next.current_user = user,
        Action::AddNotification(notification) => {
            if accepts(&next.notifications, &notification, dedup_window) {
                next.notifications.insert(0, notification);
            }
        }
        Action::RemoveNotification(id) => next.notifications.retain(|n| n.id != id),
        Action::MarkNotificationRead(id) => {
            if let Some(n) = next.notifications.iter_mut().find(|n| n.id == id) {
                n.read = true;
            }
        }
        Action::LoadState(partial) => next.merge(partial),
    }

    let effects = diff_effects(state, &next);
    Transition {
        changed: !effects.is_empty(),
        state: next,
        effects,
    }
}

fn accepts(existing: &[Notification], incoming: &Notification, dedup_window: Duration) -> bool {
    existing
        .iter()
        .all(|n| n.id != incoming.id && !incoming.repeats(n, dedup_window))
}

fn diff_effects(prev: &AppState, next: &AppState) -> Vec<Effect> {
    if prev == next {
        return Vec::new();
    }

    let mut effects = vec![Effect::PersistState];
    if prev.theme != next.theme {
        effects.push(Effect::ApplyTheme(next.theme));
    }
    if prev.notifications != next.notifications {
        effects.push(Effect::NotificationsChanged);
    }
    effects
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/reducer.rs"]
mod tests;
