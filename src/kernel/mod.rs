//! Headless application core (state/action/effect).

pub mod action;
pub mod clock;
pub mod effect;
pub mod lifecycle;
pub mod notification;
pub mod reducer;
pub mod services;
pub mod state;
pub mod store;

pub use action::Action;
pub use clock::{Clock, ManualClock, SystemClock};
pub use effect::Effect;
pub use lifecycle::{NotificationTimers, ObserveReport, AUTO_DISMISS_AFTER};
pub use notification::{Notification, NotificationDraft, NotificationKind, DEDUP_WINDOW};
pub use reducer::{reduce, Transition};
pub use state::{AppState, PartialAppState, Theme, User, UserRole};
pub use store::{DispatchResult, Store, SubscriptionId};
