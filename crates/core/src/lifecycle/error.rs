//! Lifecycle error types.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::lifecycle::types::{DocumentStatus, PaymentStatus};

/// Errors that can occur during lifecycle operations.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// Attempted an invalid status transition.
    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition {
        /// The current status.
        from: DocumentStatus,
        /// The attempted target status.
        to: DocumentStatus,
    },

    /// A quotation-only action was attempted on an invoice.
    #[error("Action '{action}' applies to quotations only")]
    QuotationOnly {
        /// The attempted action.
        action: &'static str,
    },

    /// Payment status can only move backward through an explicit reversal.
    #[error("Payment status cannot move from {from} back to {to} without a payment reversal")]
    PaymentStatusRegression {
        /// The current payment status.
        from: PaymentStatus,
        /// The attempted target payment status.
        to: PaymentStatus,
    },

    /// A monetary input was negative.
    #[error("Invalid amount for {field}: {value}")]
    NegativeAmount {
        /// The offending field.
        field: &'static str,
        /// The rejected value.
        value: Decimal,
    },

    /// A payment must carry a positive amount.
    #[error("Payment amount must be positive, got {0}")]
    NonPositivePayment(Decimal),

    /// A reversal cannot exceed what has been paid.
    #[error("Cannot reverse {amount}: only {paid} has been paid")]
    ReversalExceedsPaid {
        /// The attempted reversal amount.
        amount: Decimal,
        /// The currently paid amount.
        paid: Decimal,
    },
}

impl LifecycleError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::InvalidTransition { .. }
            | Self::QuotationOnly { .. }
            | Self::NegativeAmount { .. }
            | Self::NonPositivePayment(_) => 400,
            Self::PaymentStatusRegression { .. } | Self::ReversalExceedsPaid { .. } => 422,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::QuotationOnly { .. } => "QUOTATION_ONLY_ACTION",
            Self::PaymentStatusRegression { .. } => "PAYMENT_STATUS_REGRESSION",
            Self::NegativeAmount { .. } => "INVALID_AMOUNT",
            Self::NonPositivePayment(_) => "NON_POSITIVE_PAYMENT",
            Self::ReversalExceedsPaid { .. } => "REVERSAL_EXCEEDS_PAID",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_invalid_transition_error() {
        let err = LifecycleError::InvalidTransition {
            from: DocumentStatus::Converted,
            to: DocumentStatus::Sent,
        };
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.error_code(), "INVALID_TRANSITION");
        assert!(err.to_string().contains("converted"));
        assert!(err.to_string().contains("sent"));
    }

    #[test]
    fn test_quotation_only_error() {
        let err = LifecycleError::QuotationOnly { action: "accept" };
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.error_code(), "QUOTATION_ONLY_ACTION");
        assert!(err.to_string().contains("accept"));
    }

    #[test]
    fn test_regression_error() {
        let err = LifecycleError::PaymentStatusRegression {
            from: PaymentStatus::Paid,
            to: PaymentStatus::Unpaid,
        };
        assert_eq!(err.status_code(), 422);
        assert_eq!(err.error_code(), "PAYMENT_STATUS_REGRESSION");
    }

    #[test]
    fn test_reversal_exceeds_paid_error() {
        let err = LifecycleError::ReversalExceedsPaid {
            amount: dec!(100),
            paid: dec!(40),
        };
        assert_eq!(err.status_code(), 422);
        assert_eq!(err.error_code(), "REVERSAL_EXCEEDS_PAID");
    }
}
