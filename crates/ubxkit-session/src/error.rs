//! Error types for the session driver.

use thiserror::Error;
use ubxkit_script::ScriptError;

use crate::session::SessionState;

/// Result alias used throughout the session driver.
pub type Result<T> = std::result::Result<T, SessionError>;

/// Errors surfaced by the session state machine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// An event arrived that the current state cannot accept.
    #[error("invalid session transition: cannot {operation} in {state:?}")]
    InvalidState {
        /// State when the event arrived.
        state: SessionState,
        /// What the event asked for.
        operation: &'static str,
    },

    /// A recognized script line failed to translate.
    #[error("script line {line_no} failed: {source}")]
    Line {
        /// One-based line number within the script.
        line_no: usize,
        /// The translation failure.
        source: ScriptError,
    },
}
