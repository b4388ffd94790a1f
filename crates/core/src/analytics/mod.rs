//! Dashboard aggregation over documents and payments.
//!
//! Read-only, per-query, and independent of any shared mutable state:
//! a dashboard view is a point-in-time snapshot, re-queried (not patched)
//! after any mutation that could affect its inputs.
//!
//! Mandatory preprocessing order for every aggregation:
//! 1. compute the set of POS-derived invoice ids,
//! 2. discard derived documents,
//! 3. discard documents in another currency (no cross-currency summation),
//! 4. apply the caller's filters as a conjunction.

pub mod error;
pub mod service;
pub mod types;


pub use error::AnalyticsError;
pub use service::AnalyticsService;
pub use types::{
    Aggregation, BucketBy, Buckets, CategoryBucket, DashboardMetrics, DateRange, DocumentFilter,
    MonthBucket, YearMonth,
};
