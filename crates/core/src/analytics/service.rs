//! Aggregation and dashboard-metric computation.

use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use invora_shared::types::{Currency, InvoiceId};

use crate::analytics::error::AnalyticsError;
use crate::analytics::types::{
    Aggregation, BucketBy, Buckets, CategoryBucket, DashboardMetrics, DateRange, DocumentFilter,
    MonthBucket, YearMonth,
};
use crate::document::types::{FinancialDocument, Payment, PaymentMethod, PosSale};
use crate::lifecycle::{DocumentStatus, LifecycleService, PaymentStatus};

/// Fallback bucket key for documents without an assigned client.
const UNASSIGNED_CLIENT: &str = "unassigned";

/// Stateless, read-only aggregation service.
pub struct AnalyticsService;

impl AnalyticsService {
    /// The set of invoice ids generated by point-of-sale sales.
    ///
    /// Documents in this set are derived and excluded from every
    /// aggregation output (they remain payable normally).
    #[must_use]
    pub fn derived_invoice_ids(pos_sales: &[PosSale]) -> HashSet<InvoiceId> {
        pos_sales.iter().filter_map(|sale| sale.invoice_id).collect()
    }

    /// Applies the mandatory preprocessing pipeline: derived exclusion,
    /// currency isolation, then the caller's filter conjunction.
    #[must_use]
    pub fn eligible_documents<'a>(
        documents: &'a [FinancialDocument],
        pos_sales: &[PosSale],
        currency: Currency,
        filter: &DocumentFilter,
    ) -> Vec<&'a FinancialDocument> {
        let derived = Self::derived_invoice_ids(pos_sales);
        documents
            .iter()
            .filter(|doc| !Self::is_derived(doc, &derived))
            .filter(|doc| doc.currency == currency)
            .filter(|doc| Self::matches_filter(doc, filter))
            .collect()
    }

    /// Aggregates documents (or payments, for method bucketing) into the
    /// requested dimension, in the selected currency.
    ///
    /// Month buckets are zero-filled across the requested date range so
    /// consumers can render continuous time series; without an explicit
    /// range the span of the eligible data is used.
    ///
    /// # Errors
    ///
    /// Date ranges are validated at construction ([`DateRange::new`]);
    /// the error type is carried here for the summation paths.
    pub fn aggregate(
        documents: &[FinancialDocument],
        payments: &[Payment],
        pos_sales: &[PosSale],
        filter: &DocumentFilter,
        currency: Currency,
        bucket_by: BucketBy,
    ) -> Result<Aggregation, AnalyticsError> {
        let buckets = match bucket_by {
            BucketBy::Month => {
                let docs = Self::eligible_documents(documents, pos_sales, currency, filter);
                Buckets::Monthly(Self::month_buckets(
                    docs.iter().map(|doc| (Self::record_date(doc), doc.totals.total)),
                    filter.date_range,
                ))
            }
            BucketBy::Status => {
                let docs = Self::eligible_documents(documents, pos_sales, currency, filter);
                Buckets::Categorical(Self::category_buckets(
                    docs.iter()
                        .map(|doc| (doc.status.as_str().to_string(), doc.totals.total)),
                ))
            }
            BucketBy::Client => {
                let docs = Self::eligible_documents(documents, pos_sales, currency, filter);
                Buckets::Categorical(Self::category_buckets(docs.iter().map(|doc| {
                    let key = doc
                        .client
                        .map_or_else(|| UNASSIGNED_CLIENT.to_string(), |id| id.to_string());
                    (key, doc.totals.total)
                })))
            }
            BucketBy::Method => {
                let derived = Self::derived_invoice_ids(pos_sales);
                let eligible =
                    Self::eligible_payments(payments, &derived, currency, filter.date_range);
                Buckets::Categorical(Self::category_buckets(eligible.iter().map(|payment| {
                    // Unknown method folds into cash so totals reconcile.
                    let key = payment
                        .method
                        .unwrap_or(PaymentMethod::Cash)
                        .as_str()
                        .to_string();
                    (key, payment.amount)
                })))
            }
        };

        Ok(Aggregation { currency, buckets })
    }

    /// Received revenue bucketed by calendar month of the payment date,
    /// zero-filled across the range.
    #[must_use]
    pub fn received_by_month(
        payments: &[Payment],
        pos_sales: &[PosSale],
        range: DateRange,
        currency: Currency,
    ) -> Vec<MonthBucket> {
        let derived = Self::derived_invoice_ids(pos_sales);
        let eligible = Self::eligible_payments(payments, &derived, currency, Some(range));
        Self::month_buckets(
            eligible.iter().map(|payment| (payment.date, payment.amount)),
            Some(range),
        )
    }

    /// Sums document totals, verifying every document carries the
    /// selected currency. No cross-currency summation is ever performed.
    ///
    /// # Errors
    ///
    /// Returns `AnalyticsError::CurrencyMismatch` on the first document in
    /// another currency.
    pub fn sum_totals(
        documents: &[&FinancialDocument],
        currency: Currency,
    ) -> Result<Decimal, AnalyticsError> {
        let mut sum = Decimal::ZERO;
        for doc in documents {
            if doc.currency != currency {
                return Err(AnalyticsError::CurrencyMismatch {
                    expected: currency,
                    got: doc.currency,
                });
            }
            sum += doc.totals.total;
        }
        Ok(sum)
    }

    /// Period-over-period change in percent. A zero-valued denominator
    /// reports 0%, never NaN or infinity.
    #[must_use]
    pub fn change_percent(current: Decimal, prior: Decimal) -> Decimal {
        if prior.is_zero() {
            Decimal::ZERO
        } else {
            ((current - prior) / prior * Decimal::ONE_HUNDRED).round_dp(2)
        }
    }

    /// Derived dashboard metrics for a period, with deltas against the
    /// prior equal-length period.
    ///
    /// `as_of` is the read-time clock for the overdue computation, passed
    /// explicitly — no ambient clock is consulted.
    ///
    /// # Errors
    ///
    /// Carried for the summation paths; preprocessing itself cannot fail.
    pub fn dashboard_metrics(
        documents: &[FinancialDocument],
        payments: &[Payment],
        pos_sales: &[PosSale],
        period: DateRange,
        as_of: NaiveDate,
        currency: Currency,
    ) -> Result<DashboardMetrics, AnalyticsError> {
        let derived = Self::derived_invoice_ids(pos_sales);
        let prior = period.prior_period();

        let revenue_received = Self::received_sum(payments, &derived, currency, period);
        let revenue_prior = Self::received_sum(payments, &derived, currency, prior);

        let outstanding = Self::outstanding_sum(documents, &derived, currency, Some(period));
        let outstanding_prior = Self::outstanding_sum(documents, &derived, currency, Some(prior));

        let debt_collection = documents
            .iter()
            .filter(|doc| doc.is_invoice() && !Self::is_derived(doc, &derived))
            .filter(|doc| doc.currency == currency)
            .filter(|doc| Self::is_open(doc))
            .filter(|doc| LifecycleService::is_overdue(doc.due_date, as_of, doc.payment_status()))
            .map(Self::unpaid_remainder)
            .sum();

        Ok(DashboardMetrics {
            currency,
            revenue_received,
            outstanding,
            debt_collection,
            revenue_change_percent: Self::change_percent(revenue_received, revenue_prior),
            outstanding_change_percent: Self::change_percent(outstanding, outstanding_prior),
        })
    }

    fn is_derived(doc: &FinancialDocument, derived: &HashSet<InvoiceId>) -> bool {
        doc.id.as_invoice().is_some_and(|id| derived.contains(&id))
    }

    /// Volume metrics are keyed on the record-creation date; received
    /// revenue is keyed on the payment date.
    fn record_date(doc: &FinancialDocument) -> NaiveDate {
        doc.created_at.date_naive()
    }

    fn matches_filter(doc: &FinancialDocument, filter: &DocumentFilter) -> bool {
        if let Some(range) = filter.date_range {
            if !range.contains(Self::record_date(doc)) {
                return false;
            }
        }
        if let Some(client) = filter.client {
            if doc.client != Some(client) {
                return false;
            }
        }
        if let Some(status) = filter.status {
            if doc.status != status {
                return false;
            }
        }
        if let Some(payment_status) = filter.payment_status {
            if doc.payment_status() != payment_status {
                return false;
            }
        }
        true
    }

    fn eligible_payments<'a>(
        payments: &'a [Payment],
        derived: &HashSet<InvoiceId>,
        currency: Currency,
        range: Option<DateRange>,
    ) -> Vec<&'a Payment> {
        payments
            .iter()
            .filter(|payment| {
                payment
                    .invoice_id
                    .is_none_or(|id| !derived.contains(&id))
            })
            .filter(|payment| payment.currency == currency)
            .filter(|payment| range.is_none_or(|r| r.contains(payment.date)))
            .collect()
    }

    /// Buckets (date, amount) pairs by calendar month, zero-filling every
    /// month in the range. Without a range the span of the data is used.
    fn month_buckets(
        records: impl Iterator<Item = (NaiveDate, Decimal)>,
        range: Option<DateRange>,
    ) -> Vec<MonthBucket> {
        let records: Vec<(NaiveDate, Decimal)> = records.collect();

        let span = range.map_or_else(
            || {
                let first = records.iter().map(|(date, _)| *date).min()?;
                let last = records.iter().map(|(date, _)| *date).max()?;
                Some((YearMonth::from_date(first), YearMonth::from_date(last)))
            },
            |r| Some((YearMonth::from_date(r.start), YearMonth::from_date(r.end))),
        );
        let Some((start, end)) = span else {
            return Vec::new();
        };

        let mut buckets: BTreeMap<YearMonth, MonthBucket> = YearMonth::sequence(start, end)
            .into_iter()
            .map(|month| (month, MonthBucket::empty(month)))
            .collect();

        for (date, amount) in records {
            if let Some(bucket) = buckets.get_mut(&YearMonth::from_date(date)) {
                bucket.count += 1;
                bucket.total += amount;
            }
        }

        buckets.into_values().collect()
    }

    /// Groups (key, amount) pairs into categorical buckets, ordered by key.
    fn category_buckets(records: impl Iterator<Item = (String, Decimal)>) -> Vec<CategoryBucket> {
        let mut groups: BTreeMap<String, (u64, Decimal)> = BTreeMap::new();
        for (key, amount) in records {
            let entry = groups.entry(key).or_insert((0, Decimal::ZERO));
            entry.0 += 1;
            entry.1 += amount;
        }
        groups
            .into_iter()
            .map(|(key, (count, total))| CategoryBucket { key, count, total })
            .collect()
    }

    fn received_sum(
        payments: &[Payment],
        derived: &HashSet<InvoiceId>,
        currency: Currency,
        range: DateRange,
    ) -> Decimal {
        Self::eligible_payments(payments, derived, currency, Some(range))
            .iter()
            .map(|payment| payment.amount)
            .sum()
    }

    fn outstanding_sum(
        documents: &[FinancialDocument],
        derived: &HashSet<InvoiceId>,
        currency: Currency,
        range: Option<DateRange>,
    ) -> Decimal {
        documents
            .iter()
            .filter(|doc| doc.is_invoice() && !Self::is_derived(doc, derived))
            .filter(|doc| doc.currency == currency)
            .filter(|doc| range.is_none_or(|r| r.contains(Self::record_date(doc))))
            .filter(|doc| Self::is_open(doc))
            .map(Self::unpaid_remainder)
            .sum()
    }

    /// An invoice counts toward outstanding/debt metrics once issued and
    /// until fully paid.
    fn is_open(doc: &FinancialDocument) -> bool {
        matches!(doc.status, DocumentStatus::Sent | DocumentStatus::Viewed)
            && doc.payment_status() != PaymentStatus::Paid
    }

    fn unpaid_remainder(doc: &FinancialDocument) -> Decimal {
        let paid = doc.payment.map_or(Decimal::ZERO, |p| p.paid_amount);
        (doc.totals.total - paid).max(Decimal::ZERO)
    }
}
