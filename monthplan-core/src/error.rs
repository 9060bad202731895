//! Error types for month governance.

use std::fmt;

use thiserror::Error;

use crate::calendar::MonthToken;

/// The kind of token that failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Month,
    Week,
    Date,
    UserId,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Month => write!(f, "month (expected YYYY-MM)"),
            TokenKind::Week => write!(f, "week (expected YYYY-Wnn)"),
            TokenKind::Date => write!(f, "date (expected YYYY-MM-DD)"),
            TokenKind::UserId => write!(f, "user id (letters, digits, '-' or '_')"),
        }
    }
}

/// Errors that can occur in planning operations.
///
/// Everything above `Config` is an expected, user-facing outcome. The remaining
/// variants come from the storage layer and are reported as internal failures.
#[derive(Error, Debug)]
pub enum PlanError {
    #[error("Invalid {kind}: '{value}'")]
    InvalidFormat { kind: TokenKind, value: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Month {0} is not in the future")]
    NotFuture(MonthToken),

    #[error("No goals planned for {0}")]
    NoGoals(MonthToken),

    #[error("{pending} goal(s) for {month} are still in draft")]
    IncompleteConfirmation { month: MonthToken, pending: usize },

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Month {0} is closed")]
    MonthClosed(MonthToken),

    #[error("Planning for {0} is not confirmed")]
    NotConfirmed(MonthToken),

    #[error("Invalid score {0}: expected a value between 0 and 100")]
    InvalidScore(f32),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl PlanError {
    pub fn invalid(kind: TokenKind, value: &str) -> Self {
        PlanError::InvalidFormat {
            kind,
            value: value.to_string(),
        }
    }

    /// Storage-class failures that callers should log and hide behind a
    /// generic message.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            PlanError::Config(_)
                | PlanError::Storage(_)
                | PlanError::Io(_)
                | PlanError::Serialization(_)
        )
    }

    /// Stable machine-readable tag for the error.
    pub fn code(&self) -> &'static str {
        match self {
            PlanError::InvalidFormat { .. } => "invalid_format",
            PlanError::NotFound(_) => "not_found",
            PlanError::NotFuture(_) => "not_future",
            PlanError::NoGoals(_) => "no_goals",
            PlanError::IncompleteConfirmation { .. } => "incomplete_confirmation",
            PlanError::Forbidden(_) => "forbidden",
            PlanError::MonthClosed(_) => "month_closed",
            PlanError::NotConfirmed(_) => "not_confirmed",
            PlanError::InvalidScore(_) => "invalid_score",
            PlanError::Config(_)
            | PlanError::Storage(_)
            | PlanError::Io(_)
            | PlanError::Serialization(_) => "internal",
        }
    }
}

/// Result type alias for planning operations.
pub type PlanResult<T> = Result<T, PlanError>;
