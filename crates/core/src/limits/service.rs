//! Plan-limit evaluation and enforcement.

use crate::limits::error::LimitError;
use crate::limits::types::{
    LimitEvaluation, LimitStatus, PlanLimits, ResourceKind, UsageCounts, UNLIMITED,
};

/// Stateless meter comparing usage against plan ceilings.
pub struct LimitMeter;

impl LimitMeter {
    /// Evaluates one resource against its ceiling.
    ///
    /// - Ceiling of -1: always `Ok`, unlimited remaining.
    /// - `current >= limit`: `At` (blocks the creation action upstream).
    /// - `current >= 80%` of the limit (threshold inclusive): `Near`.
    /// - Otherwise `Ok`.
    ///
    /// The threshold compare is integer arithmetic
    /// (`current * 5 >= limit * 4`), so no float ever touches the meter.
    ///
    /// # Errors
    ///
    /// Returns `LimitError::InvalidCount` for negative counts and
    /// `LimitError::InvalidLimit` for negative ceilings other than -1.
    pub fn evaluate(
        resource: ResourceKind,
        usage: &UsageCounts,
        limits: &PlanLimits,
    ) -> Result<LimitEvaluation, LimitError> {
        let current = usage.count_for(resource);
        let limit = limits.limit_for(resource);

        if current < 0 {
            return Err(LimitError::InvalidCount {
                resource,
                count: current,
            });
        }
        if limit < 0 && limit != UNLIMITED {
            return Err(LimitError::InvalidLimit { resource, limit });
        }

        if limit == UNLIMITED {
            return Ok(LimitEvaluation {
                status: LimitStatus::Ok,
                remaining: None,
            });
        }

        let status = if current >= limit {
            LimitStatus::At
        } else if current * 5 >= limit * 4 {
            LimitStatus::Near
        } else {
            LimitStatus::Ok
        };

        Ok(LimitEvaluation {
            status,
            remaining: Some((limit - current).max(0)),
        })
    }

    /// Authoritative write-boundary guard: errors when the resource is at
    /// its ceiling.
    ///
    /// Must be called against counts fetched immediately before the
    /// creation action, never a page-load snapshot.
    ///
    /// # Errors
    ///
    /// Returns `LimitError::LimitExceeded` at the ceiling, or the
    /// validation errors of [`Self::evaluate`].
    pub fn enforce(
        resource: ResourceKind,
        usage: &UsageCounts,
        limits: &PlanLimits,
    ) -> Result<(), LimitError> {
        let evaluation = Self::evaluate(resource, usage, limits)?;
        if evaluation.status == LimitStatus::At {
            return Err(LimitError::LimitExceeded {
                resource,
                limit: limits.limit_for(resource),
            });
        }
        Ok(())
    }

    /// Evaluates every metered resource, for dashboard usage panels.
    ///
    /// # Errors
    ///
    /// Returns the first validation error encountered.
    pub fn evaluate_all(
        usage: &UsageCounts,
        limits: &PlanLimits,
    ) -> Result<Vec<(ResourceKind, LimitEvaluation)>, LimitError> {
        ResourceKind::ALL
            .into_iter()
            .map(|resource| Ok((resource, Self::evaluate(resource, usage, limits)?)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usage_invoices(n: i64) -> UsageCounts {
        UsageCounts {
            invoices: n,
            ..UsageCounts::default()
        }
    }

    fn limits_invoices(n: i64) -> PlanLimits {
        PlanLimits {
            clients: UNLIMITED,
            invoices: n,
            pdfs: UNLIMITED,
            emails: UNLIMITED,
        }
    }

    #[test]
    fn test_boundaries_at_limit_ten() {
        // 8/10 = exactly 80%: near (threshold inclusive).
        let eval =
            LimitMeter::evaluate(ResourceKind::Invoices, &usage_invoices(8), &limits_invoices(10))
                .unwrap();
        assert_eq!(eval.status, LimitStatus::Near);
        assert_eq!(eval.remaining, Some(2));

        let eval =
            LimitMeter::evaluate(ResourceKind::Invoices, &usage_invoices(9), &limits_invoices(10))
                .unwrap();
        assert_eq!(eval.status, LimitStatus::Near);
        assert_eq!(eval.remaining, Some(1));

        let eval = LimitMeter::evaluate(
            ResourceKind::Invoices,
            &usage_invoices(10),
            &limits_invoices(10),
        )
        .unwrap();
        assert_eq!(eval.status, LimitStatus::At);
        assert_eq!(eval.remaining, Some(0));

        let eval =
            LimitMeter::evaluate(ResourceKind::Invoices, &usage_invoices(7), &limits_invoices(10))
                .unwrap();
        assert_eq!(eval.status, LimitStatus::Ok);
        assert_eq!(eval.remaining, Some(3));
    }

    #[test]
    fn test_unlimited_is_always_ok() {
        for count in [0, 8, 10, 1_000_000] {
            let eval = LimitMeter::evaluate(
                ResourceKind::Invoices,
                &usage_invoices(count),
                &limits_invoices(UNLIMITED),
            )
            .unwrap();
            assert_eq!(eval.status, LimitStatus::Ok);
            assert_eq!(eval.remaining, None);
        }
    }

    #[test]
    fn test_over_limit_is_at() {
        let eval = LimitMeter::evaluate(
            ResourceKind::Invoices,
            &usage_invoices(15),
            &limits_invoices(10),
        )
        .unwrap();
        assert_eq!(eval.status, LimitStatus::At);
        assert_eq!(eval.remaining, Some(0));
    }

    #[test]
    fn test_zero_limit_is_at() {
        let eval = LimitMeter::evaluate(
            ResourceKind::Invoices,
            &usage_invoices(0),
            &limits_invoices(0),
        )
        .unwrap();
        assert_eq!(eval.status, LimitStatus::At);
    }

    #[test]
    fn test_enforce_blocks_at_limit() {
        assert!(matches!(
            LimitMeter::enforce(
                ResourceKind::Invoices,
                &usage_invoices(10),
                &limits_invoices(10)
            ),
            Err(LimitError::LimitExceeded { limit: 10, .. })
        ));

        // Near warns but does not block.
        assert!(LimitMeter::enforce(
            ResourceKind::Invoices,
            &usage_invoices(9),
            &limits_invoices(10)
        )
        .is_ok());
    }

    #[test]
    fn test_rejects_negative_inputs() {
        assert!(matches!(
            LimitMeter::evaluate(
                ResourceKind::Invoices,
                &usage_invoices(-1),
                &limits_invoices(10)
            ),
            Err(LimitError::InvalidCount { .. })
        ));
        assert!(matches!(
            LimitMeter::evaluate(
                ResourceKind::Invoices,
                &usage_invoices(1),
                &limits_invoices(-2)
            ),
            Err(LimitError::InvalidLimit { .. })
        ));
    }

    #[test]
    fn test_evaluate_all_covers_every_resource() {
        let usage = UsageCounts {
            clients: 4,
            invoices: 8,
            pdfs: 0,
            emails: 100,
        };
        let limits = PlanLimits {
            clients: 5,
            invoices: 10,
            pdfs: UNLIMITED,
            emails: 100,
        };
        let all = LimitMeter::evaluate_all(&usage, &limits).unwrap();
        assert_eq!(all.len(), 4);

        let by_resource: std::collections::HashMap<_, _> = all.into_iter().collect();
        assert_eq!(by_resource[&ResourceKind::Clients].status, LimitStatus::Near);
        assert_eq!(by_resource[&ResourceKind::Invoices].status, LimitStatus::Near);
        assert_eq!(by_resource[&ResourceKind::Pdfs].status, LimitStatus::Ok);
        assert_eq!(by_resource[&ResourceKind::Emails].status, LimitStatus::At);
    }
}
