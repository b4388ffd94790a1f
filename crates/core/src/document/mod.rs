//! Financial documents and line-item total calculation.
//!
//! This module defines the closed entity records shared by invoices and
//! quotations, and the pure calculator that turns line items plus
//! discount/tax/shipping inputs into document totals.

pub mod calculator;
pub mod error;
pub mod types;


pub use calculator::Calculator;
pub use error::DocumentError;
pub use types::{
    ChargeInputs, DocumentId, DocumentKind, DocumentTotals, FinancialDocument, LineItem, Payment,
    PaymentMethod, PaymentState, PosSale, RecurringTerms,
};
