//! State transition and derivation logic.
//!
//! All methods are associated functions on a stateless service: they take
//! the current state explicitly (no ambient context), validate the
//! transition, and return the resulting action or error.

use chrono::{NaiveDate, Utc};
use invora_shared::types::{InvoiceId, UserId};
use rust_decimal::Decimal;

use crate::document::types::DocumentKind;
use crate::lifecycle::error::LifecycleError;
use crate::lifecycle::types::{
    DisplayStatus, DocumentStatus, LifecycleAction, PaymentStatus, PaymentUpdate,
};

/// Stateless service for document lifecycle transitions.
pub struct LifecycleService;

impl LifecycleService {
    /// Transmit a draft document to the client.
    ///
    /// # Errors
    ///
    /// Returns `LifecycleError::InvalidTransition` if not in Draft status.
    pub fn send(
        current: DocumentStatus,
        sent_by: UserId,
    ) -> Result<LifecycleAction, LifecycleError> {
        match current {
            DocumentStatus::Draft => Ok(LifecycleAction::Send {
                new_status: DocumentStatus::Sent,
                sent_by,
                sent_at: Utc::now(),
            }),
            _ => Err(LifecycleError::InvalidTransition {
                from: current,
                to: DocumentStatus::Sent,
            }),
        }
    }

    /// Record that the client opened the public view.
    ///
    /// # Errors
    ///
    /// Returns `LifecycleError::InvalidTransition` if not in Sent status.
    pub fn mark_viewed(current: DocumentStatus) -> Result<LifecycleAction, LifecycleError> {
        match current {
            DocumentStatus::Sent => Ok(LifecycleAction::MarkViewed {
                new_status: DocumentStatus::Viewed,
                viewed_at: Utc::now(),
            }),
            _ => Err(LifecycleError::InvalidTransition {
                from: current,
                to: DocumentStatus::Viewed,
            }),
        }
    }

    /// Accept a quotation. Terminal except for conversion.
    ///
    /// # Errors
    ///
    /// Returns `LifecycleError::QuotationOnly` for invoices and
    /// `LifecycleError::InvalidTransition` unless in Sent or Viewed status.
    pub fn accept(
        current: DocumentStatus,
        kind: DocumentKind,
    ) -> Result<LifecycleAction, LifecycleError> {
        if kind != DocumentKind::Quotation {
            return Err(LifecycleError::QuotationOnly { action: "accept" });
        }
        match current {
            DocumentStatus::Sent | DocumentStatus::Viewed => Ok(LifecycleAction::Accept {
                new_status: DocumentStatus::Accepted,
                accepted_at: Utc::now(),
            }),
            _ => Err(LifecycleError::InvalidTransition {
                from: current,
                to: DocumentStatus::Accepted,
            }),
        }
    }

    /// Convert an accepted quotation to an invoice.
    ///
    /// The caller owns the actual invoice creation (cloning line items,
    /// assigning a number) and must recompute the clone's totals through
    /// the calculator rather than copying stale totals.
    ///
    /// # Errors
    ///
    /// Returns `LifecycleError::QuotationOnly` for invoices and
    /// `LifecycleError::InvalidTransition` unless in Accepted status.
    pub fn convert(
        current: DocumentStatus,
        kind: DocumentKind,
        invoice_id: InvoiceId,
    ) -> Result<LifecycleAction, LifecycleError> {
        if kind != DocumentKind::Quotation {
            return Err(LifecycleError::QuotationOnly { action: "convert" });
        }
        match current {
            DocumentStatus::Accepted => Ok(LifecycleAction::Convert {
                new_status: DocumentStatus::Converted,
                invoice_id,
                converted_at: Utc::now(),
            }),
            _ => Err(LifecycleError::InvalidTransition {
                from: current,
                to: DocumentStatus::Converted,
            }),
        }
    }

    /// Check if a status transition is valid for the given document kind.
    ///
    /// Valid transitions:
    /// - Draft → Sent (any kind)
    /// - Sent → Viewed (any kind)
    /// - Sent/Viewed → Accepted (quotations only)
    /// - Accepted → Converted (quotations only)
    #[must_use]
    pub fn is_valid_transition(
        from: DocumentStatus,
        to: DocumentStatus,
        kind: DocumentKind,
    ) -> bool {
        match (from, to) {
            (DocumentStatus::Draft, DocumentStatus::Sent)
            | (DocumentStatus::Sent, DocumentStatus::Viewed) => true,
            (DocumentStatus::Sent | DocumentStatus::Viewed, DocumentStatus::Accepted)
            | (DocumentStatus::Accepted, DocumentStatus::Converted) => {
                kind == DocumentKind::Quotation
            }
            _ => false,
        }
    }

    /// Derives the payment status from the paid amount relative to the
    /// total. Pure function of state, recomputed on every payment change.
    ///
    /// # Errors
    ///
    /// Returns `LifecycleError::NegativeAmount` for negative inputs.
    pub fn derive_payment_status(
        paid_amount: Decimal,
        total: Decimal,
    ) -> Result<PaymentStatus, LifecycleError> {
        if paid_amount < Decimal::ZERO {
            return Err(LifecycleError::NegativeAmount {
                field: "paid_amount",
                value: paid_amount,
            });
        }
        if total < Decimal::ZERO {
            return Err(LifecycleError::NegativeAmount {
                field: "total",
                value: total,
            });
        }

        if paid_amount.is_zero() {
            Ok(PaymentStatus::Unpaid)
        } else if paid_amount < total {
            Ok(PaymentStatus::PartiallyPaid)
        } else {
            Ok(PaymentStatus::Paid)
        }
    }

    /// Applies a payment to an invoice, returning the new paid amount and
    /// derived status.
    ///
    /// # Errors
    ///
    /// Returns `LifecycleError::NonPositivePayment` for zero or negative
    /// payment amounts.
    pub fn apply_payment(
        current_paid: Decimal,
        total: Decimal,
        amount: Decimal,
    ) -> Result<PaymentUpdate, LifecycleError> {
        if amount <= Decimal::ZERO {
            return Err(LifecycleError::NonPositivePayment(amount));
        }
        let paid_amount = current_paid + amount;
        let payment_status = Self::derive_payment_status(paid_amount, total)?;
        Ok(PaymentUpdate {
            paid_amount,
            payment_status,
        })
    }

    /// Reverses a previously applied payment. This is the only path by
    /// which payment status moves backward.
    ///
    /// # Errors
    ///
    /// Returns `LifecycleError::NonPositivePayment` for zero or negative
    /// amounts and `LifecycleError::ReversalExceedsPaid` when reversing
    /// more than has been paid.
    pub fn reverse_payment(
        current_paid: Decimal,
        total: Decimal,
        amount: Decimal,
    ) -> Result<PaymentUpdate, LifecycleError> {
        if amount <= Decimal::ZERO {
            return Err(LifecycleError::NonPositivePayment(amount));
        }
        if amount > current_paid {
            return Err(LifecycleError::ReversalExceedsPaid {
                amount,
                paid: current_paid,
            });
        }
        let paid_amount = current_paid - amount;
        let payment_status = Self::derive_payment_status(paid_amount, total)?;
        Ok(PaymentUpdate {
            paid_amount,
            payment_status,
        })
    }

    /// Validates a directly supplied payment-status change at the write
    /// boundary. Backward moves are rejected unless flagged as coming from
    /// a reversal — re-marking a paid invoice unpaid without one is an
    /// error, not a silent overwrite.
    ///
    /// # Errors
    ///
    /// Returns `LifecycleError::PaymentStatusRegression` for a backward
    /// move without `via_reversal`.
    pub fn validate_payment_status_change(
        from: PaymentStatus,
        to: PaymentStatus,
        via_reversal: bool,
    ) -> Result<(), LifecycleError> {
        if to.rank() < from.rank() && !via_reversal {
            return Err(LifecycleError::PaymentStatusRegression { from, to });
        }
        Ok(())
    }

    /// Returns true if the document is overdue: past its due date and not
    /// fully paid. Read-time only; `today` is passed explicitly so no
    /// ambient clock is consulted.
    #[must_use]
    pub fn is_overdue(
        due_date: NaiveDate,
        today: NaiveDate,
        payment_status: PaymentStatus,
    ) -> bool {
        due_date < today && payment_status != PaymentStatus::Paid
    }

    /// Computes the display status with the overdue overlay applied.
    ///
    /// Only Sent and Viewed documents can display as overdue; a draft has
    /// not been issued and an accepted/converted quotation is settled. The
    /// overlay is never persisted.
    #[must_use]
    pub fn overlay_status(
        status: DocumentStatus,
        due_date: NaiveDate,
        today: NaiveDate,
        payment_status: PaymentStatus,
    ) -> DisplayStatus {
        match status {
            DocumentStatus::Sent | DocumentStatus::Viewed
                if Self::is_overdue(due_date, today, payment_status) =>
            {
                DisplayStatus::Overdue
            }
            other => DisplayStatus::from(other),
        }
    }
}
