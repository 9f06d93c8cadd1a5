use super::notification::Notification;
use super::state::{PartialAppState, User};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ToggleTheme,
    ToggleSidebar,
    SetLoading(bool),
    SetCurrentUser(Option<User>),
    /// Fully formed notification; id and timestamp are assigned by the
    /// caller so the reducer stays deterministic.
    AddNotification(Notification),
    RemoveNotification(String),
    MarkNotificationRead(String),
    LoadState(PartialAppState),
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::ToggleTheme => "toggle_theme",
            Action::ToggleSidebar => "toggle_sidebar",
            Action::SetLoading(_) => "set_loading",
            Action::SetCurrentUser(_) => "set_current_user",
            Action::AddNotification(_) => "add_notification",
            Action::RemoveNotification(_) => "remove_notification",
            Action::MarkNotificationRead(_) => "mark_notification_read",
            Action::LoadState(_) => "load_state",
        }
    }
}
