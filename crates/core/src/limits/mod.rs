//! Subscription plan-limit metering.
//!
//! Compares live usage counts against a tier's ceilings and produces a
//! ternary signal (ok / near / at). The UI-side evaluation is advisory;
//! [`service::LimitMeter::enforce`] is the authoritative guard at the
//! write boundary, re-run against live counts immediately before every
//! gated creation.

pub mod error;
pub mod service;
pub mod types;


pub use error::LimitError;
pub use service::LimitMeter;
pub use types::{LimitEvaluation, LimitStatus, PlanLimits, ResourceKind, UsageCounts, UNLIMITED};
