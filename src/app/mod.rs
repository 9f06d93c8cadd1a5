//! Application layer: the session host and its collaborators.

pub mod console;
pub mod persistence;
pub mod session;
pub mod theme;

pub use console::{execute, CommandParseError, ConsoleCommand, Outcome};
pub use persistence::{PersistenceError, StatePersistence};
pub use session::Session;
pub use theme::{DocumentTheme, ThemeHook};
