//! Lifecycle domain types.

use chrono::{DateTime, Utc};
use invora_shared::types::{InvoiceId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Presentation status of a document.
///
/// Valid transitions:
/// - Draft → Sent (send)
/// - Sent → Viewed (client opens the public view)
/// - Sent/Viewed → Accepted (accept, quotations only)
/// - Accepted → Converted (convert, quotations only)
///
/// `Accepted` is terminal except for conversion; `Converted` is fully
/// terminal. Overdue is never a stored status — see
/// [`DisplayStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    /// Document is being drafted.
    Draft,
    /// Document has been transmitted to the client.
    Sent,
    /// Client has opened the public view.
    Viewed,
    /// Quotation accepted by the client (quotations only).
    Accepted,
    /// Quotation converted to an invoice (quotations only, terminal).
    Converted,
}

impl DocumentStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Sent => "sent",
            Self::Viewed => "viewed",
            Self::Accepted => "accepted",
            Self::Converted => "converted",
        }
    }

    /// Parses a status from a string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "draft" => Some(Self::Draft),
            "sent" => Some(Self::Sent),
            "viewed" => Some(Self::Viewed),
            "accepted" => Some(Self::Accepted),
            "converted" => Some(Self::Converted),
            _ => None,
        }
    }

    /// Returns true if the document can still be edited.
    ///
    /// An accepted quotation must not be further edited.
    #[must_use]
    pub fn is_editable(&self) -> bool {
        matches!(self, Self::Draft | Self::Sent | Self::Viewed)
    }

    /// Returns true if no further transitions are possible.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Converted)
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Payment status of an invoice, derived from `paid_amount` vs `total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Nothing paid yet.
    Unpaid,
    /// Partially paid.
    PartiallyPaid,
    /// Fully paid.
    Paid,
}

impl PaymentStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unpaid => "unpaid",
            Self::PartiallyPaid => "partially_paid",
            Self::Paid => "paid",
        }
    }

    /// Position along `unpaid → partially_paid → paid`.
    ///
    /// Payment status only moves forward without an explicit reversal.
    #[must_use]
    pub const fn rank(&self) -> u8 {
        match self {
            Self::Unpaid => 0,
            Self::PartiallyPaid => 1,
            Self::Paid => 2,
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Status as shown to a reader, with the read-time overdue overlay applied.
///
/// `Overdue` exists only here: it is computed from the due date and payment
/// state at read time and never written back to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayStatus {
    /// Stored status, unchanged.
    Draft,
    /// Stored status, unchanged.
    Sent,
    /// Stored status, unchanged.
    Viewed,
    /// Stored status, unchanged.
    Accepted,
    /// Stored status, unchanged.
    Converted,
    /// Overlay: past due and not settled.
    Overdue,
}

impl From<DocumentStatus> for DisplayStatus {
    fn from(status: DocumentStatus) -> Self {
        match status {
            DocumentStatus::Draft => Self::Draft,
            DocumentStatus::Sent => Self::Sent,
            DocumentStatus::Viewed => Self::Viewed,
            DocumentStatus::Accepted => Self::Accepted,
            DocumentStatus::Converted => Self::Converted,
        }
    }
}

/// Status transition with audit data.
#[derive(Debug, Clone)]
pub enum LifecycleAction {
    /// Transmit the document to the client.
    Send {
        /// The new status after sending.
        new_status: DocumentStatus,
        /// The user who sent the document.
        sent_by: UserId,
        /// When the document was sent.
        sent_at: DateTime<Utc>,
    },
    /// The client opened the public view.
    MarkViewed {
        /// The new status after viewing.
        new_status: DocumentStatus,
        /// When the document was first viewed.
        viewed_at: DateTime<Utc>,
    },
    /// The client accepted the quotation.
    Accept {
        /// The new status after acceptance.
        new_status: DocumentStatus,
        /// When the quotation was accepted.
        accepted_at: DateTime<Utc>,
    },
    /// The accepted quotation was converted to an invoice.
    Convert {
        /// The new status after conversion.
        new_status: DocumentStatus,
        /// The invoice created from the quotation.
        invoice_id: InvoiceId,
        /// When the conversion happened.
        converted_at: DateTime<Utc>,
    },
}

impl LifecycleAction {
    /// Returns the new status resulting from this action.
    #[must_use]
    pub const fn new_status(&self) -> DocumentStatus {
        match self {
            Self::Send { new_status, .. }
            | Self::MarkViewed { new_status, .. }
            | Self::Accept { new_status, .. }
            | Self::Convert { new_status, .. } => *new_status,
        }
    }
}

/// Result of applying or reversing a payment against an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentUpdate {
    /// Accumulated paid amount after the change.
    pub paid_amount: Decimal,
    /// Payment status derived from the new paid amount.
    pub payment_status: PaymentStatus,
}
