//! Aggregation data types.

use chrono::{Datelike, Days, NaiveDate};
use invora_shared::types::{ClientId, Currency};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::analytics::error::AnalyticsError;
use crate::lifecycle::{DocumentStatus, PaymentStatus};

/// An inclusive calendar date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First day, inclusive.
    pub start: NaiveDate,
    /// Last day, inclusive.
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a validated range.
    ///
    /// # Errors
    ///
    /// Returns `AnalyticsError::InvalidDateRange` if `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, AnalyticsError> {
        if start > end {
            return Err(AnalyticsError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Returns true if the date falls within the range.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// The equal-length period immediately preceding this one, for
    /// period-over-period comparisons.
    #[must_use]
    pub fn prior_period(&self) -> Self {
        let len = self.end.signed_duration_since(self.start).num_days();
        let prior_end = self.start - Days::new(1);
        #[allow(clippy::cast_sign_loss)] // validated: start <= end
        let prior_start = prior_end - Days::new(len as u64);
        Self {
            start: prior_start,
            end: prior_end,
        }
    }
}

/// A calendar year-month bucket key, ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    /// Calendar year.
    pub year: i32,
    /// Calendar month, 1-12.
    pub month: u32,
}

impl YearMonth {
    /// The year-month containing the given date.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The following calendar month.
    #[must_use]
    pub const fn succ(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Every year-month from `start` through `end` inclusive, in order.
    /// Consumers rely on this for gap-free time series.
    #[must_use]
    pub fn sequence(start: Self, end: Self) -> Vec<Self> {
        let mut months = Vec::new();
        let mut current = start;
        while current <= end {
            months.push(current);
            current = current.succ();
        }
        months
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Conjunctive document filters. `None` fields do not constrain.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentFilter {
    /// Record-date range (document creation date; payment date for
    /// payment-backed buckets).
    pub date_range: Option<DateRange>,
    /// Billed client.
    pub client: Option<ClientId>,
    /// Stored presentation status.
    pub status: Option<DocumentStatus>,
    /// Derived payment status.
    pub payment_status: Option<PaymentStatus>,
}

/// Bucketing dimension for an aggregation query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BucketBy {
    /// Calendar year-month of the record-creation date.
    Month,
    /// Stored presentation status.
    Status,
    /// Payment method (buckets payments, not documents).
    Method,
    /// Billed client.
    Client,
}

/// One calendar-month bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthBucket {
    /// Bucket key.
    pub month: YearMonth,
    /// Number of contributing records.
    pub count: u64,
    /// Summed total in the aggregation currency.
    pub total: Decimal,
}

impl MonthBucket {
    /// An empty bucket for zero-filling.
    #[must_use]
    pub fn empty(month: YearMonth) -> Self {
        Self {
            month,
            count: 0,
            total: Decimal::ZERO,
        }
    }
}

/// One categorical bucket (status, method, or client).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryBucket {
    /// Raw categorical key (e.g., "sent", "cash", a client id, or the
    /// fixed fallback label).
    pub key: String,
    /// Number of contributing records.
    pub count: u64,
    /// Summed total in the aggregation currency.
    pub total: Decimal,
}

/// Bucketed aggregation payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Buckets {
    /// Zero-filled month series.
    Monthly(Vec<MonthBucket>),
    /// Categorical groups.
    Categorical(Vec<CategoryBucket>),
}

/// An aggregation result in a single caller-selected currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aggregation {
    /// The selected currency; every amount below is in it.
    pub currency: Currency,
    /// Bucketed results.
    pub buckets: Buckets,
}

/// Derived dashboard metrics for a period, with period-over-period deltas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardMetrics {
    /// The selected currency.
    pub currency: Currency,
    /// Payments received within the period.
    pub revenue_received: Decimal,
    /// Unpaid remainder across sent/viewed invoices created in the period.
    pub outstanding: Decimal,
    /// Unpaid remainder across invoices past their due date.
    pub debt_collection: Decimal,
    /// Revenue change vs. the prior equal-length period, in percent.
    /// A zero-valued prior period reports 0%, never NaN or infinity.
    pub revenue_change_percent: Decimal,
    /// Outstanding change vs. the prior period, in percent.
    pub outstanding_change_percent: Decimal,
}
