//! Plan-limit error types.

use thiserror::Error;

use crate::limits::types::ResourceKind;

/// Errors that can occur during plan-limit evaluation and enforcement.
#[derive(Debug, Error)]
pub enum LimitError {
    /// A usage count was negative.
    #[error("Invalid usage count for {resource}: {count}")]
    InvalidCount {
        /// The metered resource.
        resource: ResourceKind,
        /// The rejected count.
        count: i64,
    },

    /// A ceiling other than -1 was negative.
    #[error("Invalid plan limit for {resource}: {limit}")]
    InvalidLimit {
        /// The metered resource.
        resource: ResourceKind,
        /// The rejected ceiling.
        limit: i64,
    },

    /// Creation attempted while at the ceiling. Blocking, not retryable;
    /// corrected by upgrading the plan.
    #[error("Plan limit reached for {resource}: {limit}")]
    LimitExceeded {
        /// The metered resource.
        resource: ResourceKind,
        /// The ceiling that was hit.
        limit: i64,
    },
}

impl LimitError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::InvalidCount { .. } | Self::InvalidLimit { .. } => 400,
            Self::LimitExceeded { .. } => 402,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCount { .. } => "INVALID_USAGE_COUNT",
            Self::InvalidLimit { .. } => "INVALID_PLAN_LIMIT",
            Self::LimitExceeded { .. } => "LIMIT_EXCEEDED",
        }
    }
}
