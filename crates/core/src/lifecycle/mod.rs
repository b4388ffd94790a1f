//! Document status and payment-status state machine.
//!
//! Presentation status (`draft → sent → viewed`, plus the quotation-only
//! `accepted → converted` tail) is event-driven. Payment status is a pure
//! function of `paid_amount` relative to `total`, recomputed on every
//! payment insertion or reversal. Overdue is a read-time overlay and is
//! never persisted.
//!
//! # Modules
//!
//! - `types` - Status enums and audit-carrying actions
//! - `error` - Lifecycle-specific error types
//! - `service` - State transition and derivation logic

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use error::LifecycleError;
pub use service::LifecycleService;
pub use types::{DisplayStatus, DocumentStatus, LifecycleAction, PaymentStatus, PaymentUpdate};
