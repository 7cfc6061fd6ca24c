use thiserror::Error;

/// Errors surfaced by the insight engine
///
/// Scoring itself is total; these only cover caller-side preconditions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InsightError {
    #[error("Need at least {required} guests for matching, got {found}")]
    InsufficientGuests { required: usize, found: usize },

    #[error("Guest not found: {0}")]
    GuestNotFound(String),
}

pub type Result<T> = std::result::Result<T, InsightError>;
