use super::state::Theme;

/// Side effects requested by a dispatch; the session host executes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Mirror the current state to storage.
    PersistState,
    /// The theme actually changed.
    ApplyTheme(Theme),
    /// The notification list changed; expiry timers need re-observing.
    NotificationsChanged,
}
