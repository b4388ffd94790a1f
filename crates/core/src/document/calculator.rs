//! Line-item and document total calculation.
//!
//! The calculator is pure and deterministic: it may be called on every
//! keystroke of an editing surface without memoization. It never substitutes
//! defaults for invalid inputs — a negative quantity, rate, discount, tax,
//! or shipping value is rejected with `DocumentError::InvalidAmount`.
//! (`Decimal` is finite by construction, so non-finite inputs cannot reach
//! this module.)

use invora_shared::types::Currency;
use rust_decimal::Decimal;
use std::collections::HashSet;

use super::error::DocumentError;
use super::types::{ChargeInputs, DocumentTotals, FinancialDocument, LineItem};

/// Stateless calculator for document totals.
pub struct Calculator;

impl Calculator {
    /// Computes a single line amount: `quantity * rate`.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::InvalidAmount` if either input is negative.
    pub fn line_amount(quantity: Decimal, rate: Decimal) -> Result<Decimal, DocumentError> {
        if quantity < Decimal::ZERO {
            return Err(DocumentError::InvalidAmount {
                field: "quantity",
                value: quantity,
            });
        }
        if rate < Decimal::ZERO {
            return Err(DocumentError::InvalidAmount {
                field: "rate",
                value: rate,
            });
        }
        Ok(quantity * rate)
    }

    /// Computes document totals from line items and charge inputs.
    ///
    /// - `subtotal` is recomputed from `quantity * rate` for every line;
    ///   stored line amounts are never trusted.
    /// - The percentage discount wins whenever it is greater than zero;
    ///   the fixed discount applies only at 0%.
    /// - `tax = (subtotal - discount) * tax_percent / 100`.
    /// - `total = subtotal - discount + tax + shipping`.
    ///
    /// No intermediate rounding occurs; round at the display/persistence
    /// boundary via [`DocumentTotals::round_display`].
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::InvalidAmount` for any negative input and
    /// `DocumentError::DiscountExceedsSubtotal` when the resolved discount
    /// is larger than the subtotal.
    pub fn calculate(
        items: &[LineItem],
        charges: &ChargeInputs,
    ) -> Result<DocumentTotals, DocumentError> {
        Self::validate_charges(charges)?;

        let mut subtotal = Decimal::ZERO;
        for item in items {
            subtotal += Self::line_amount(item.quantity, item.rate)?;
        }

        let discount_amount = if charges.discount_percent > Decimal::ZERO {
            subtotal * charges.discount_percent / Decimal::ONE_HUNDRED
        } else {
            charges.discount_fixed
        };

        if discount_amount > subtotal {
            return Err(DocumentError::DiscountExceedsSubtotal {
                discount: discount_amount,
                subtotal,
            });
        }

        let taxable = subtotal - discount_amount;
        let tax_amount = taxable * charges.tax_percent / Decimal::ONE_HUNDRED;
        let total = taxable + tax_amount + charges.shipping;

        Ok(DocumentTotals {
            subtotal,
            discount_amount,
            tax_amount,
            shipping: charges.shipping,
            total,
        })
    }

    /// Recomputes a document in place: every line amount first, then the
    /// document totals. Line amounts are never stale when totals are
    /// computed.
    ///
    /// # Errors
    ///
    /// Returns the first validation error encountered; the document is
    /// left unmodified in that case.
    pub fn recompute(document: &mut FinancialDocument) -> Result<(), DocumentError> {
        for item in &document.items {
            if item.product_name.trim().is_empty() {
                return Err(DocumentError::EmptyProductName);
            }
        }

        let totals = Self::calculate(&document.items, &document.charges)?;

        for item in &mut document.items {
            item.amount = item.quantity * item.rate;
        }
        document.totals = totals;
        Ok(())
    }

    /// Validates a document number against the owner's existing numbers.
    ///
    /// The number itself is an opaque string from the number-generator
    /// collaborator; only blankness and uniqueness-at-save-time are checked
    /// here.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::BlankDocumentNumber` or
    /// `DocumentError::DuplicateDocumentNumber`.
    pub fn validate_document_number(
        number: &str,
        existing: &HashSet<String>,
    ) -> Result<(), DocumentError> {
        if number.trim().is_empty() {
            return Err(DocumentError::BlankDocumentNumber);
        }
        if existing.contains(number) {
            return Err(DocumentError::DuplicateDocumentNumber(number.to_string()));
        }
        Ok(())
    }

    /// Validates that a payment being linked to a document carries the
    /// document's currency. No implicit conversion ever happens.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::CurrencyMismatch` on a differing currency.
    pub fn validate_payment_currency(
        document: &FinancialDocument,
        payment_currency: Currency,
    ) -> Result<(), DocumentError> {
        if payment_currency != document.currency {
            return Err(DocumentError::CurrencyMismatch {
                expected: document.currency,
                got: payment_currency,
            });
        }
        Ok(())
    }

    fn validate_charges(charges: &ChargeInputs) -> Result<(), DocumentError> {
        let checks = [
            ("discount_percent", charges.discount_percent),
            ("discount_fixed", charges.discount_fixed),
            ("tax_percent", charges.tax_percent),
            ("shipping", charges.shipping),
        ];
        for (field, value) in checks {
            if value < Decimal::ZERO {
                return Err(DocumentError::InvalidAmount { field, value });
            }
        }
        Ok(())
    }
}
