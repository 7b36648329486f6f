//! User-facing results of view actions.

use core::fmt::Display;

use eventsite_core::ServerMessage;

use crate::edit::CommitOutcome;

/// How a user action ended. Views never propagate errors past this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The server confirmed it and local state now reflects the response.
    Applied,
    /// Refused client-side (blank input, nothing selected); nothing was sent.
    Rejected,
    /// The call failed; the view's error slot says why.
    Failed,
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }
}

/// The one human-readable error a view shows at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorSlot {
    message: Option<String>,
}

impl ErrorSlot {
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn is_set(&self) -> bool {
        self.message.is_some()
    }

    /// Show `message`; the underlying cause goes to the log only.
    pub fn report(&mut self, message: impl Into<String>, cause: &dyn Display) {
        let message = message.into();
        tracing::error!(cause = %cause, "{message}");
        self.message = Some(message);
    }

    /// Show what the server said, or `fallback` when it said nothing.
    pub fn report_server<E>(&mut self, fallback: &str, err: &E)
    where
        E: ServerMessage + Display,
    {
        let message = err.server_message().unwrap_or(fallback).to_string();
        self.report(message, err);
    }

    pub fn dismiss(&mut self) {
        self.message = None;
    }

    /// Map a form submit onto an [`Outcome`], reporting `failure` on error.
    pub fn settle<E: Display>(
        &mut self,
        result: Result<CommitOutcome, E>,
        failure: &str,
    ) -> Outcome {
        match result {
            Ok(CommitOutcome::Committed) => Outcome::Applied,
            Ok(CommitOutcome::Rejected | CommitOutcome::Idle) => Outcome::Rejected,
            Err(err) => {
                self.report(failure, &err);
                Outcome::Failed
            }
        }
    }
}
