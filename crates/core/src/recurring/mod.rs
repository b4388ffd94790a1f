//! Recurring schedule resolution.
//!
//! Computes when the next document in a recurring series should be
//! generated. Actual generation (cloning line items, assigning a number,
//! recomputing totals through the calculator) is a caller responsibility.

pub mod schedule;

pub use schedule::{Frequency, Occurrence, Schedule};
