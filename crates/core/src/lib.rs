//! Core billing logic for Invora.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `document` - Financial documents and line-item total calculation
//! - `lifecycle` - Document status and payment-status state machine
//! - `recurring` - Recurring schedule resolution
//! - `limits` - Subscription plan-limit metering
//! - `analytics` - Dashboard aggregation over documents and payments

pub mod analytics;
pub mod document;
pub mod lifecycle;
pub mod limits;
pub mod recurring;
