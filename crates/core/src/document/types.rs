//! Document data types.
//!
//! Every entity is a closed record with required vs. optional fields stated
//! explicitly; missing required fields are rejected at the boundary rather
//! than defaulted. Field names double as the serialization contract expected
//! by the store collaborator.

use chrono::{DateTime, NaiveDate, Utc};
use invora_shared::types::{
    ClientId, Currency, InvoiceId, LineItemId, Money, PaymentId, PosSaleId, QuotationId, UserId,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::lifecycle::{DocumentStatus, PaymentStatus};
use crate::recurring::Frequency;

/// Whether a document is an invoice or a quotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// A billable invoice with payment tracking.
    Invoice,
    /// A quotation that may later convert to an invoice.
    Quotation,
}

impl DocumentKind {
    /// Returns the string representation of the kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Invoice => "invoice",
            Self::Quotation => "quotation",
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Kind-tagged document identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentId {
    /// Invoice identifier.
    Invoice(InvoiceId),
    /// Quotation identifier.
    Quotation(QuotationId),
}

impl DocumentId {
    /// Returns the document kind implied by this identifier.
    #[must_use]
    pub const fn kind(&self) -> DocumentKind {
        match self {
            Self::Invoice(_) => DocumentKind::Invoice,
            Self::Quotation(_) => DocumentKind::Quotation,
        }
    }

    /// Returns the invoice ID, if this identifies an invoice.
    #[must_use]
    pub const fn as_invoice(&self) -> Option<InvoiceId> {
        match self {
            Self::Invoice(id) => Some(*id),
            Self::Quotation(_) => None,
        }
    }
}

/// A single line item on a document.
///
/// Owned exclusively by its parent document; destroyed with it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    /// Line item ID.
    pub id: LineItemId,
    /// Product name (required, non-empty).
    pub product_name: String,
    /// Free-text description.
    pub description: Option<String>,
    /// Quantity (must be >= 0).
    pub quantity: Decimal,
    /// Unit label (e.g., "hrs", "pcs").
    pub unit: Option<String>,
    /// Unit rate (must be >= 0).
    pub rate: Decimal,
    /// Derived amount: quantity * rate.
    pub amount: Decimal,
}

/// Discount, tax, and shipping inputs to the calculator.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ChargeInputs {
    /// Discount percentage of the subtotal. Takes precedence over the
    /// fixed discount whenever it is greater than zero.
    pub discount_percent: Decimal,
    /// Fixed discount amount, used only when `discount_percent` is zero.
    pub discount_fixed: Decimal,
    /// Tax percentage, applied after the discount.
    pub tax_percent: Decimal,
    /// Shipping charge added after tax.
    pub shipping: Decimal,
}

impl ChargeInputs {
    /// No discount, no tax, no shipping.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }
}

/// Computed document totals.
///
/// Invariant: `total = subtotal - discount_amount + tax_amount + shipping`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DocumentTotals {
    /// Sum of all line amounts.
    pub subtotal: Decimal,
    /// Resolved discount amount (percentage or fixed path).
    pub discount_amount: Decimal,
    /// Tax amount on the discounted subtotal.
    pub tax_amount: Decimal,
    /// Shipping charge.
    pub shipping: Decimal,
    /// Grand total.
    pub total: Decimal,
}

impl DocumentTotals {
    /// Returns the totals rounded to 2 decimal places for display or
    /// persistence. Intermediate arithmetic stays unrounded.
    #[must_use]
    pub fn round_display(&self, currency: Currency) -> Self {
        let round = |amount: Decimal| Money::new(amount, currency).round_display().amount;
        Self {
            subtotal: round(self.subtotal),
            discount_amount: round(self.discount_amount),
            tax_amount: round(self.tax_amount),
            shipping: round(self.shipping),
            total: round(self.total),
        }
    }
}

/// Payment tracking state, present on invoices only.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PaymentState {
    /// Derived payment status.
    pub payment_status: PaymentStatus,
    /// Amount paid so far, accumulated from linked payments.
    pub paid_amount: Decimal,
}

impl PaymentState {
    /// Fresh state for a newly created invoice.
    #[must_use]
    pub fn unpaid() -> Self {
        Self {
            payment_status: PaymentStatus::Unpaid,
            paid_amount: Decimal::ZERO,
        }
    }
}

/// Recurring generation terms, present on recurring invoices only.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RecurringTerms {
    /// Generation frequency.
    pub frequency: Frequency,
    /// Optional end of the series; absence means indefinite recurrence.
    pub end_date: Option<NaiveDate>,
}

/// A financial document: the shared shape of invoices and quotations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialDocument {
    /// Kind-tagged identifier.
    pub id: DocumentId,
    /// Document number, unique per owner. Opaque string supplied by the
    /// number-generator collaborator or the user.
    pub number: String,
    /// Owning user.
    pub owner: UserId,
    /// Billed client, if assigned.
    pub client: Option<ClientId>,
    /// Document currency. All monetary fields share it.
    pub currency: Currency,
    /// Ordered line items.
    pub items: Vec<LineItem>,
    /// Discount/tax/shipping inputs.
    pub charges: ChargeInputs,
    /// Computed totals.
    pub totals: DocumentTotals,
    /// Issue date.
    pub issue_date: NaiveDate,
    /// Due date (invoices) or valid-until date (quotations).
    pub due_date: NaiveDate,
    /// Presentation status.
    pub status: DocumentStatus,
    /// Payment tracking; `Some` for invoices, `None` for quotations.
    pub payment: Option<PaymentState>,
    /// Recurring terms; invoices only.
    pub recurring: Option<RecurringTerms>,
    /// Opaque notes text, never computed over.
    pub notes: Option<String>,
    /// Opaque terms text, never computed over.
    pub terms: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl FinancialDocument {
    /// Returns the document kind.
    #[must_use]
    pub const fn kind(&self) -> DocumentKind {
        self.id.kind()
    }

    /// Returns true if this document is an invoice.
    #[must_use]
    pub const fn is_invoice(&self) -> bool {
        matches!(self.id, DocumentId::Invoice(_))
    }

    /// Returns the derived payment status, defaulting to `Unpaid` for
    /// quotations (which carry no payment state).
    #[must_use]
    pub fn payment_status(&self) -> PaymentStatus {
        self.payment
            .map_or(PaymentStatus::Unpaid, |p| p.payment_status)
    }
}

/// Payment methods accepted by the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Cash payment. Also the fallback category for unknown methods.
    Cash,
    /// Bank transfer.
    BankTransfer,
    /// Card payment.
    Card,
    /// Cheque.
    Cheque,
    /// Anything else.
    Other,
}

impl PaymentMethod {
    /// Returns the string representation of the method.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::BankTransfer => "bank_transfer",
            Self::Card => "card",
            Self::Cheque => "cheque",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A recorded payment.
///
/// Never mutated after creation; corrections happen through reversal
/// workflows outside this core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    /// Payment ID.
    pub id: PaymentId,
    /// Paid amount.
    pub amount: Decimal,
    /// Payment currency.
    pub currency: Currency,
    /// Payment date.
    pub date: NaiveDate,
    /// Payment method; `None` is treated as cash in aggregation.
    pub method: Option<PaymentMethod>,
    /// Linked invoice. Unlinked payments are valid but excluded from
    /// payment-status derivation.
    pub invoice_id: Option<InvoiceId>,
}

/// A point-of-sale sale.
///
/// Any invoice referenced by a sale's `invoice_id` is classified as derived
/// and excluded from all aggregation outputs. The invoice itself remains
/// payable normally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PosSale {
    /// Sale ID.
    pub id: PosSaleId,
    /// Invoice generated from this sale, if any.
    pub invoice_id: Option<InvoiceId>,
}
