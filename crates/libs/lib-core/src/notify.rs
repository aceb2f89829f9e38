//! # Notifications
//!
//! Operations return `Result`s; turning them into something the user sees is
//! the job of a caller-supplied [`Notifier`]. The browser app alerts, tests
//! record.

use std::fmt;

use crate::staking::Collection;

/// The user action a notice reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Approve(Collection),
    Fetch(Collection),
    Stake,
    SignMessage,
}

impl Action {
    /// Whether a success deserves the user's attention or only a log line.
    pub fn announces_success(&self) -> bool {
        matches!(self, Action::SignMessage)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Approve(collection) => write!(f, "{} approval", collection),
            Action::Fetch(collection) => write!(f, "Fetching {}", collection.plural()),
            Action::Stake => f.write_str("Staking"),
            Action::SignMessage => f.write_str("Signing"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success(Option<String>),
    Failure(Option<String>),
}

/// One reportable outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub action: Action,
    pub outcome: Outcome,
}

impl Notice {
    pub fn success(action: Action, detail: Option<String>) -> Self {
        Self {
            action,
            outcome: Outcome::Success(detail),
        }
    }

    pub fn failure(action: Action, detail: Option<String>) -> Self {
        Self {
            action,
            outcome: Outcome::Failure(detail),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self.outcome, Outcome::Failure(_))
    }

    /// Text shown to the user; the raw detail goes after a blank line.
    pub fn text(&self) -> String {
        let (headline, detail) = match (&self.action, &self.outcome) {
            (Action::SignMessage, Outcome::Success(detail)) => ("Success!".to_string(), detail),
            (Action::SignMessage, Outcome::Failure(detail)) => ("Failure!".to_string(), detail),
            (action, Outcome::Success(detail)) => (format!("{} succeeded", action), detail),
            (action, Outcome::Failure(detail)) => (format!("{} failed", action), detail),
        };
        match detail {
            Some(detail) if !detail.is_empty() => format!("{}\n\n{}", headline, detail),
            _ => headline,
        }
    }
}

/// Sink for operation outcomes.
pub trait Notifier {
    fn notify(&self, notice: Notice);
}

/// Report `result` of `action` to `notifier`.
///
/// `detail` renders the success value; failures use `error`'s raw message.
pub fn report<T, E>(
    notifier: &dyn Notifier,
    action: Action,
    result: &Result<T, E>,
    detail: impl FnOnce(&T) -> Option<String>,
    error: impl FnOnce(&E) -> Option<String>,
) {
    let notice = match result {
        Ok(value) => Notice::success(action, detail(value)),
        Err(err) => Notice::failure(action, error(err)),
    };
    notifier.notify(notice);
}
