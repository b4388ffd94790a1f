//! Document error types.

use invora_shared::types::Currency;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur while validating or calculating a document.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// A monetary input was negative.
    ///
    /// Invalid inputs are rejected, never clamped: substituting a default
    /// would silently corrupt the document total.
    #[error("Invalid amount for {field}: {value}")]
    InvalidAmount {
        /// The offending field (e.g., "quantity", "rate", "tax_percent").
        field: &'static str,
        /// The rejected value.
        value: Decimal,
    },

    /// The discount is larger than the subtotal it applies to.
    #[error("Discount {discount} exceeds subtotal {subtotal}")]
    DiscountExceedsSubtotal {
        /// The computed discount amount.
        discount: Decimal,
        /// The document subtotal.
        subtotal: Decimal,
    },

    /// A line item is missing its product name.
    #[error("Line item product name is required")]
    EmptyProductName,

    /// The document number is blank.
    #[error("Document number is required")]
    BlankDocumentNumber,

    /// The document number is already in use by the same owner.
    #[error("Document number already in use: {0}")]
    DuplicateDocumentNumber(String),

    /// Amounts in differing currencies were combined.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch {
        /// The document's currency.
        expected: Currency,
        /// The offending currency.
        got: Currency,
    },
}

impl DocumentError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::InvalidAmount { .. }
            | Self::DiscountExceedsSubtotal { .. }
            | Self::EmptyProductName
            | Self::BlankDocumentNumber => 400,
            Self::CurrencyMismatch { .. } => 422,
            Self::DuplicateDocumentNumber(_) => 409,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidAmount { .. } => "INVALID_AMOUNT",
            Self::DiscountExceedsSubtotal { .. } => "DISCOUNT_EXCEEDS_SUBTOTAL",
            Self::EmptyProductName => "EMPTY_PRODUCT_NAME",
            Self::BlankDocumentNumber => "BLANK_DOCUMENT_NUMBER",
            Self::DuplicateDocumentNumber(_) => "DUPLICATE_DOCUMENT_NUMBER",
            Self::CurrencyMismatch { .. } => "CURRENCY_MISMATCH",
        }
    }
}
