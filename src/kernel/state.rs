use chrono::{DateTime, Utc};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::notification::Notification;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Manager,
    Agent,
}

impl UserRole {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "admin" => Some(Self::Admin),
            "manager" => Some(Self::Manager),
            "agent" => Some(Self::Agent),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::Agent => "agent",
        }
    }
}

/// Signed-in operator. The store keeps a copy and never validates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    pub last_login: DateTime<Utc>,
    #[serde(default)]
    pub permissions: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub theme: Theme,
    pub sidebar_collapsed: bool,
    pub current_user: Option<User>,
    /// Newest first.
    pub notifications: Vec<Notification>,
    pub is_loading: bool,
}

impl AppState {
    pub fn notification(&self, id: &str) -> Option<&Notification> {
        self.notifications.iter().find(|n| n.id == id)
    }

    pub fn contains_notification(&self, id: &str) -> bool {
        self.notification(id).is_some()
    }

    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }

    /// The newest `limit` notifications, in display order.
    pub fn visible_notifications(&self, limit: usize) -> &[Notification] {
        let end = limit.min(self.notifications.len());
        &self.notifications[..end]
    }

    /// Shallow merge: every key present in `partial` replaces the current
    /// value wholesale, absent keys are left alone. A replacement
    /// notification list keeps only the first entry per id.
    pub fn merge(&mut self, partial: PartialAppState) {
        let PartialAppState {
            theme,
            sidebar_collapsed,
            current_user,
            notifications,
            is_loading,
        } = partial;

        if let Some(theme) = theme {
            self.theme = theme;
        }
        if let Some(collapsed) = sidebar_collapsed {
            self.sidebar_collapsed = collapsed;
        }
        if let Some(user) = current_user {
            self.current_user = user;
        }
        if let Some(notifications) = notifications {
            let mut seen = FxHashSet::default();
            self.notifications = notifications
                .into_iter()
                .filter(|n| seen.insert(n.id.clone()))
                .collect();
        }
        if let Some(loading) = is_loading {
            self.is_loading = loading;
        }
    }
}

/// A subset of [`AppState`], as restored from storage.
///
/// `current_user` is doubly optional so that a stored `null` (signed out)
/// can be told apart from a missing key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialAppState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sidebar_collapsed: Option<bool>,
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub current_user: Option<Option<User>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notifications: Option<Vec<Notification>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_loading: Option<bool>,
}

impl PartialAppState {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = Some(theme);
        self
    }

    pub fn with_sidebar_collapsed(mut self, collapsed: bool) -> Self {
        self.sidebar_collapsed = Some(collapsed);
        self
    }

    pub fn with_current_user(mut self, user: Option<User>) -> Self {
        self.current_user = Some(user);
        self
    }

    pub fn with_notifications(mut self, notifications: Vec<Notification>) -> Self {
        self.notifications = Some(notifications);
        self
    }

    pub fn with_loading(mut self, loading: bool) -> Self {
        self.is_loading = Some(loading);
        self
    }
}

impl From<AppState> for PartialAppState {
    fn from(state: AppState) -> Self {
        Self {
            theme: Some(state.theme),
            sidebar_collapsed: Some(state.sidebar_collapsed),
            current_user: Some(state.current_user),
            notifications: Some(state.notifications),
            is_loading: Some(state.is_loading),
        }
    }
}

fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Option<User>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<User>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/state.rs"]
mod tests;
