//! Line commands understood by the operator console.

use std::fmt::Write as _;

use crate::kernel::{NotificationDraft, NotificationKind, User, UserRole};

use super::session::Session;

pub const HELP: &str = "\
commands:
  theme                              toggle light/dark
  sidebar                            toggle the sidebar
  loading on|off                     set the loading flag
  user <id> <name> <email> [role]    sign in (role: admin, manager, agent)
  user none                          sign out
  notify <kind> <title> | <message>  post a notification (kind: info, success, warning, error)
  read <id>                          mark a notification read
  dismiss <id>                       remove a notification
  show                               print the current state
  reset                              restore defaults and drop the saved state
  help                               this text
  quit                               exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    ToggleTheme,
    ToggleSidebar,
    SetLoading(bool),
    SignIn {
        id: String,
        name: String,
        email: String,
        role: UserRole,
    },
    SignOut,
    Notify(NotificationDraft),
    MarkRead(String),
    Dismiss(String),
    Show,
    Reset,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandParseError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}` (try `help`)")]
    Unknown(String),
    #[error("`{command}` needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },
    #[error("`{command}`: invalid value `{value}`, expected {expected}")]
    InvalidArgument {
        command: &'static str,
        value: String,
        expected: &'static str,
    },
}

impl ConsoleCommand {
    pub fn parse(line: &str) -> Result<Self, CommandParseError> {
        let line = line.trim();
        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };

        match head.to_ascii_lowercase().as_str() {
            "" => Err(CommandParseError::Empty),
            "theme" => Ok(Self::ToggleTheme),
            "sidebar" => Ok(Self::ToggleSidebar),
            "loading" => parse_loading(rest),
            "user" => parse_user(rest),
            "notify" => parse_notify(rest),
            "read" => required_id("read", rest).map(Self::MarkRead),
            "dismiss" => required_id("dismiss", rest).map(Self::Dismiss),
            "show" => Ok(Self::Show),
            "reset" => Ok(Self::Reset),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(CommandParseError::Unknown(other.to_string())),
        }
    }
}

fn parse_loading(rest: &str) -> Result<ConsoleCommand, CommandParseError> {
    match rest.to_ascii_lowercase().as_str() {
        "on" | "true" | "1" => Ok(ConsoleCommand::SetLoading(true)),
        "off" | "false" | "0" => Ok(ConsoleCommand::SetLoading(false)),
        "" => Err(CommandParseError::MissingArgument {
            command: "loading",
            argument: "on|off",
        }),
        other => Err(CommandParseError::InvalidArgument {
            command: "loading",
            value: other.to_string(),
            expected: "on or off",
        }),
    }
}

fn parse_user(rest: &str) -> Result<ConsoleCommand, CommandParseError> {
    let mut parts = rest.split_whitespace();
    let Some(id) = parts.next() else {
        return Err(CommandParseError::MissingArgument {
            command: "user",
            argument: "an id or `none`",
        });
    };
    if id.eq_ignore_ascii_case("none") {
        return Ok(ConsoleCommand::SignOut);
    }

    let (Some(name), Some(email)) = (parts.next(), parts.next()) else {
        return Err(CommandParseError::MissingArgument {
            command: "user",
            argument: "<id> <name> <email>",
        });
    };
    let role = match parts.next() {
        None => UserRole::Agent,
        Some(value) => UserRole::from_name(value).ok_or_else(|| {
            CommandParseError::InvalidArgument {
                command: "user",
                value: value.to_string(),
                expected: "admin, manager or agent",
            }
        })?,
    };

    Ok(ConsoleCommand::SignIn {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        role,
    })
}

fn parse_notify(rest: &str) -> Result<ConsoleCommand, CommandParseError> {
    let (kind, text) = match rest.split_once(char::is_whitespace) {
        Some((kind, text)) => (kind, text.trim()),
        None => (rest, ""),
    };
    if kind.is_empty() {
        return Err(CommandParseError::MissingArgument {
            command: "notify",
            argument: "<kind> <title> | <message>",
        });
    }
    let kind = NotificationKind::from_name(kind).ok_or_else(|| {
        CommandParseError::InvalidArgument {
            command: "notify",
            value: kind.to_string(),
            expected: "info, success, warning or error",
        }
    })?;

    let (title, message) = match text.split_once('|') {
        Some((title, message)) => (title.trim(), message.trim()),
        None => (text, ""),
    };
    if title.is_empty() {
        return Err(CommandParseError::MissingArgument {
            command: "notify",
            argument: "a title",
        });
    }

    Ok(ConsoleCommand::Notify(NotificationDraft::new(kind, title, message)))
}

fn required_id(command: &'static str, rest: &str) -> Result<String, CommandParseError> {
    match rest.split_whitespace().next() {
        Some(id) => Ok(id.to_string()),
        None => Err(CommandParseError::MissingArgument {
            command,
            argument: "a notification id",
        }),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    pub output: String,
    pub quit: bool,
}

impl Outcome {
    fn say(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            quit: false,
        }
    }
}

pub fn execute(session: &mut Session, command: ConsoleCommand) -> Outcome {
    match command {
        ConsoleCommand::ToggleTheme => {
            session.toggle_theme();
            Outcome::say(format!("theme: {}", session.state().theme.label()))
        }
        ConsoleCommand::ToggleSidebar => {
            session.toggle_sidebar();
            let label = if session.state().sidebar_collapsed {
                "collapsed"
            } else {
                "expanded"
            };
            Outcome::say(format!("sidebar: {label}"))
        }
        ConsoleCommand::SetLoading(loading) => {
            session.set_loading(loading);
            Outcome::say(format!("loading: {loading}"))
        }
        ConsoleCommand::SignIn {
            id,
            name,
            email,
            role,
        } => {
            let user = User {
                id,
                name,
                email,
                role,
                avatar: None,
                is_active: true,
                last_login: session.store().clock().wall(),
                permissions: Vec::new(),
            };
            let greeting = format!("signed in as {} ({})", user.name, user.role.label());
            session.set_current_user(Some(user));
            Outcome::say(greeting)
        }
        ConsoleCommand::SignOut => {
            session.set_current_user(None);
            Outcome::say("signed out")
        }
        ConsoleCommand::Notify(draft) => match session.add_notification(draft) {
            Some(id) => Outcome::say(format!("notification {id} posted")),
            None => Outcome::say("duplicate notification suppressed"),
        },
        ConsoleCommand::MarkRead(id) => {
            if session.mark_notification_read(&id).state_changed {
                Outcome::say(format!("notification {id} marked read"))
            } else {
                Outcome::say(format!("no unread notification {id}"))
            }
        }
        ConsoleCommand::Dismiss(id) => {
            if session.remove_notification(&id).state_changed {
                Outcome::say(format!("notification {id} dismissed"))
            } else {
                Outcome::say(format!("no notification {id}"))
            }
        }
        ConsoleCommand::Show => Outcome::say(render_state(session)),
        ConsoleCommand::Reset => {
            session.reset();
            Outcome::say("state reset to defaults")
        }
        ConsoleCommand::Help => Outcome::say(HELP),
        ConsoleCommand::Quit => Outcome {
            output: "bye".to_string(),
            quit: true,
        },
    }
}

pub fn render_state(session: &Session) -> String {
    let state = session.state();
    let now = session.store().clock().wall();
    let mut out = String::new();

    let _ = writeln!(out, "theme:    {}", state.theme.label());
    let _ = writeln!(
        out,
        "sidebar:  {}",
        if state.sidebar_collapsed { "collapsed" } else { "expanded" }
    );
    let _ = writeln!(out, "loading:  {}", state.is_loading);
    match &state.current_user {
        Some(user) => {
            let _ = writeln!(
                out,
                "user:     {} <{}> ({})",
                user.name,
                user.email,
                user.role.label()
            );
        }
        None => {
            let _ = writeln!(out, "user:     (signed out)");
        }
    }
    let _ = write!(
        out,
        "notifications: {} ({} unread)",
        state.notifications.len(),
        state.unread_count()
    );
    for n in session.visible_notifications() {
        let _ = write!(
            out,
            "\n  [{}] {:<7} {} - {} ({}){}",
            n.id,
            n.kind.label(),
            n.title,
            n.message,
            n.relative_time(now),
            if n.read { " read" } else { "" }
        );
    }
    let hidden = state
        .notifications
        .len()
        .saturating_sub(session.visible_notifications().len());
    if hidden > 0 {
        let _ = write!(out, "\n  ... and {hidden} more");
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/app/console.rs"]
mod tests;
