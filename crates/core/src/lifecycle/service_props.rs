//! Property-based tests for LifecycleService.

use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::document::types::DocumentKind;
use crate::lifecycle::error::LifecycleError;
use crate::lifecycle::service::LifecycleService;
use crate::lifecycle::types::{DocumentStatus, PaymentStatus};

/// Strategy for generating random DocumentStatus values.
fn arb_status() -> impl Strategy<Value = DocumentStatus> {
    prop_oneof![
        Just(DocumentStatus::Draft),
        Just(DocumentStatus::Sent),
        Just(DocumentStatus::Viewed),
        Just(DocumentStatus::Accepted),
        Just(DocumentStatus::Converted),
    ]
}

/// Strategy for non-negative amounts with 2 decimal places.
fn arb_amount() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000).prop_map(|n| Decimal::new(n, 2))
}

/// Strategy for strictly positive amounts with 2 decimal places.
fn arb_positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000).prop_map(|n| Decimal::new(n, 2))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Every status reached through the service agrees with the
    /// transition table.
    #[test]
    fn prop_service_transitions_match_table(from in arb_status()) {
        use invora_shared::types::{InvoiceId, UserId};

        let send_ok = LifecycleService::send(from, UserId::new()).is_ok();
        prop_assert_eq!(
            send_ok,
            LifecycleService::is_valid_transition(from, DocumentStatus::Sent, DocumentKind::Invoice)
        );

        let viewed_ok = LifecycleService::mark_viewed(from).is_ok();
        prop_assert_eq!(
            viewed_ok,
            LifecycleService::is_valid_transition(from, DocumentStatus::Viewed, DocumentKind::Invoice)
        );

        let accept_ok = LifecycleService::accept(from, DocumentKind::Quotation).is_ok();
        prop_assert_eq!(
            accept_ok,
            LifecycleService::is_valid_transition(from, DocumentStatus::Accepted, DocumentKind::Quotation)
        );

        let convert_ok =
            LifecycleService::convert(from, DocumentKind::Quotation, InvoiceId::new()).is_ok();
        prop_assert_eq!(
            convert_ok,
            LifecycleService::is_valid_transition(from, DocumentStatus::Converted, DocumentKind::Quotation)
        );
    }

    /// Quotation-only actions always fail on invoices, regardless of status.
    #[test]
    fn prop_invoice_never_accepts_or_converts(from in arb_status()) {
        use invora_shared::types::InvoiceId;

        prop_assert!(
            matches!(
                LifecycleService::accept(from, DocumentKind::Invoice),
                Err(LifecycleError::QuotationOnly { .. })
            ),
            "expected QuotationOnly error from accept"
        );
        prop_assert!(
            matches!(
                LifecycleService::convert(from, DocumentKind::Invoice, InvoiceId::new()),
                Err(LifecycleError::QuotationOnly { .. })
            ),
            "expected QuotationOnly error from convert"
        );
    }

    /// Monotonicity: applying payments only ever moves payment status
    /// forward along unpaid → partially_paid → paid.
    #[test]
    fn prop_payment_status_is_monotonic(
        total in arb_positive_amount(),
        amounts in prop::collection::vec(arb_positive_amount(), 1..10),
    ) {
        let mut paid = Decimal::ZERO;
        let mut last_rank = PaymentStatus::Unpaid.rank();

        for amount in amounts {
            let update = LifecycleService::apply_payment(paid, total, amount).unwrap();
            prop_assert!(update.payment_status.rank() >= last_rank);
            prop_assert_eq!(update.paid_amount, paid + amount);
            paid = update.paid_amount;
            last_rank = update.payment_status.rank();
        }
    }

    /// Derivation is a pure function of (paid, total): the boundaries hold
    /// for all inputs.
    #[test]
    fn prop_derive_payment_status_boundaries(
        paid in arb_amount(),
        total in arb_positive_amount(),
    ) {
        let status = LifecycleService::derive_payment_status(paid, total).unwrap();
        if paid.is_zero() {
            prop_assert_eq!(status, PaymentStatus::Unpaid);
        } else if paid < total {
            prop_assert_eq!(status, PaymentStatus::PartiallyPaid);
        } else {
            prop_assert_eq!(status, PaymentStatus::Paid);
        }
    }

    /// Apply followed by a full reversal returns to the starting state.
    #[test]
    fn prop_reversal_round_trip(
        start_paid in arb_amount(),
        total in arb_positive_amount(),
        amount in arb_positive_amount(),
    ) {
        let applied = LifecycleService::apply_payment(start_paid, total, amount).unwrap();
        let reversed =
            LifecycleService::reverse_payment(applied.paid_amount, total, amount).unwrap();

        prop_assert_eq!(reversed.paid_amount, start_paid);
        prop_assert_eq!(
            reversed.payment_status,
            LifecycleService::derive_payment_status(start_paid, total).unwrap()
        );
    }

    /// A reversal larger than the paid amount is always rejected.
    #[test]
    fn prop_reversal_never_overshoots(
        paid in arb_amount(),
        total in arb_positive_amount(),
        excess in arb_positive_amount(),
    ) {
        let result = LifecycleService::reverse_payment(paid, total, paid + excess);
        prop_assert!(
            matches!(result, Err(LifecycleError::ReversalExceedsPaid { .. })),
            "expected ReversalExceedsPaid error, got {:?}",
            result
        );
    }

    /// Backward payment-status writes without a reversal are rejected;
    /// forward writes always pass.
    #[test]
    fn prop_status_regression_needs_reversal(
        from_rank in 0u8..=2,
        to_rank in 0u8..=2,
    ) {
        let status = |rank: u8| match rank {
            0 => PaymentStatus::Unpaid,
            1 => PaymentStatus::PartiallyPaid,
            _ => PaymentStatus::Paid,
        };
        let from = status(from_rank);
        let to = status(to_rank);

        let unflagged = LifecycleService::validate_payment_status_change(from, to, false);
        if to_rank < from_rank {
            prop_assert!(unflagged.is_err());
        } else {
            prop_assert!(unflagged.is_ok());
        }

        // With a reversal, any move is allowed.
        prop_assert!(LifecycleService::validate_payment_status_change(from, to, true).is_ok());
    }
}
