//! Analytics error types.

use chrono::NaiveDate;
use invora_shared::types::Currency;
use thiserror::Error;

/// Errors that can occur during aggregation.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// The requested date range is inverted.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Range start.
        start: NaiveDate,
        /// Range end.
        end: NaiveDate,
    },

    /// Amounts in differing currencies were summed.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch {
        /// The selected currency.
        expected: Currency,
        /// The offending currency.
        got: Currency,
    },
}

impl AnalyticsError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::InvalidDateRange { .. } => 400,
            Self::CurrencyMismatch { .. } => 422,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidDateRange { .. } => "INVALID_DATE_RANGE",
            Self::CurrencyMismatch { .. } => "CURRENCY_MISMATCH",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_date_range_error() {
        let err = AnalyticsError::InvalidDateRange {
            start: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        };
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.error_code(), "INVALID_DATE_RANGE");
    }

    #[test]
    fn test_currency_mismatch_error() {
        let err = AnalyticsError::CurrencyMismatch {
            expected: Currency::Usd,
            got: Currency::Eur,
        };
        assert_eq!(err.status_code(), 422);
        assert_eq!(err.error_code(), "CURRENCY_MISMATCH");
    }
}
