//! Plan-limit data types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Metered resource kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// Billable clients.
    Clients,
    /// Invoices.
    Invoices,
    /// PDF exports.
    Pdfs,
    /// Email sends.
    Emails,
}

impl ResourceKind {
    /// All metered resources, for dashboard snapshots.
    pub const ALL: [Self; 4] = [Self::Clients, Self::Invoices, Self::Pdfs, Self::Emails];

    /// Returns the string representation of the resource.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Clients => "clients",
            Self::Invoices => "invoices",
            Self::Pdfs => "pdfs",
            Self::Emails => "emails",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-tier resource ceilings. A ceiling of -1 denotes unlimited.
///
/// Read-only input; lifecycle is owned by the billing/subscription
/// collaborator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlanLimits {
    /// Maximum clients.
    pub clients: i64,
    /// Maximum invoices.
    pub invoices: i64,
    /// Maximum PDF exports.
    pub pdfs: i64,
    /// Maximum email sends.
    pub emails: i64,
}

/// Sentinel ceiling for unlimited resources.
pub const UNLIMITED: i64 = -1;

impl PlanLimits {
    /// Returns the ceiling for the given resource.
    #[must_use]
    pub const fn limit_for(&self, resource: ResourceKind) -> i64 {
        match resource {
            ResourceKind::Clients => self.clients,
            ResourceKind::Invoices => self.invoices,
            ResourceKind::Pdfs => self.pdfs,
            ResourceKind::Emails => self.emails,
        }
    }

    /// A tier with every resource unlimited.
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            clients: UNLIMITED,
            invoices: UNLIMITED,
            pdfs: UNLIMITED,
            emails: UNLIMITED,
        }
    }
}

/// Live usage counts for the current user.
///
/// Must be re-fetched immediately before every gated action; a stale
/// snapshot can race past the ceiling across tabs.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct UsageCounts {
    /// Current client count.
    pub clients: i64,
    /// Current invoice count.
    pub invoices: i64,
    /// Current PDF export count.
    pub pdfs: i64,
    /// Current email send count.
    pub emails: i64,
}

impl UsageCounts {
    /// Returns the count for the given resource.
    #[must_use]
    pub const fn count_for(&self, resource: ResourceKind) -> i64 {
        match resource {
            ResourceKind::Clients => self.clients,
            ResourceKind::Invoices => self.invoices,
            ResourceKind::Pdfs => self.pdfs,
            ResourceKind::Emails => self.emails,
        }
    }
}

/// Ternary limit signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LimitStatus {
    /// Comfortably under the ceiling.
    Ok,
    /// At or past 80% of the ceiling; warn but do not block.
    Near,
    /// At the ceiling; the creation action must be blocked.
    At,
}

/// Result of evaluating one resource against its ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitEvaluation {
    /// Ternary signal.
    pub status: LimitStatus,
    /// Actions remaining before the ceiling; `None` when unlimited.
    pub remaining: Option<i64>,
}
