//! Cancellation state machine: pending window, should-cancel walk, and the
//! terminal cancel transition

use chrono::NaiveDate;
use core_kernel::Money;
use domain_billing::{
    BillingError, BillingSchedule, BillingStore, PolicyAccounting, PolicyStatus,
};
use infra_store::MemoryStore;
use test_utils::{seeded_store, PolicyBuilder, TestContacts};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Monthly policy, premium 1200, effective 2015-01-01: first invoice is due
/// 2015-02-01 and cancel-eligible 2015-02-15
fn monthly_policy() -> (MemoryStore, TestContacts, domain_billing::Policy) {
    let (store, contacts) = seeded_store();
    let policy = PolicyBuilder::new()
        .with_billing_schedule(BillingSchedule::Monthly)
        .with_named_insured(contacts.insured.id)
        .with_agent(contacts.agent.id)
        .build();
    store.add_policy(&policy).unwrap();
    (store, contacts, policy)
}

mod pending_window {
    use super::*;

    #[test]
    fn test_not_pending_on_the_due_date_itself() {
        let (store, _, policy) = monthly_policy();
        let session = PolicyAccounting::open(&store, policy.id).unwrap();
        assert!(!session.cancellation_pending(date(2015, 2, 1)).unwrap());
    }

    #[test]
    fn test_pending_one_day_past_due() {
        let (store, _, policy) = monthly_policy();
        let session = PolicyAccounting::open(&store, policy.id).unwrap();
        assert!(session.cancellation_pending(date(2015, 2, 2)).unwrap());
    }

    #[test]
    fn test_pending_the_day_before_the_cancel_date() {
        let (store, _, policy) = monthly_policy();
        let session = PolicyAccounting::open(&store, policy.id).unwrap();
        assert!(session.cancellation_pending(date(2015, 2, 14)).unwrap());
    }

    #[test]
    fn test_not_pending_on_the_cancel_date() {
        let (store, _, policy) = monthly_policy();
        let session = PolicyAccounting::open(&store, policy.id).unwrap();
        assert!(!session.cancellation_pending(date(2015, 2, 15)).unwrap());
    }

    #[test]
    fn test_not_pending_once_the_balance_is_paid_off() {
        let (store, contacts, policy) = monthly_policy();
        let session = PolicyAccounting::open(&store, policy.id).unwrap();

        // Pay both billed installments before the window opens
        session
            .make_payment(
                Money::from_major(200),
                Some(contacts.insured.id),
                date(2015, 2, 1),
            )
            .unwrap();

        assert!(!session.cancellation_pending(date(2015, 2, 7)).unwrap());
    }
}

mod payments_during_pending {
    use super::*;

    #[test]
    fn test_insured_cannot_pay_while_pending() {
        let (store, contacts, policy) = monthly_policy();
        let session = PolicyAccounting::open(&store, policy.id).unwrap();

        let result = session.make_payment(
            Money::from_major(100),
            Some(contacts.insured.id),
            date(2015, 2, 7),
        );

        assert!(matches!(
            result,
            Err(BillingError::PaymentBlockedPendingCancellation)
        ));
        assert!(store
            .payments_on_or_before(policy.id, date(2015, 12, 31))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_agent_can_pay_while_pending() {
        let (store, contacts, policy) = monthly_policy();
        let session = PolicyAccounting::open(&store, policy.id).unwrap();

        session
            .make_payment(
                Money::from_major(100),
                Some(contacts.agent.id),
                date(2015, 2, 7),
            )
            .unwrap();

        // By the time invoice 1 is pending, invoice 2 is already billed, so
        // 200 was owed and 100 remains
        assert_eq!(
            session.account_balance(date(2015, 2, 7)).unwrap(),
            Money::from_major(100)
        );
    }
}

mod should_cancel {
    use super::*;

    #[test]
    fn test_unpaid_policy_should_cancel_once_past_the_cancel_date() {
        let (store, _, policy) = monthly_policy();
        let session = PolicyAccounting::open(&store, policy.id).unwrap();

        assert!(!session.should_cancel(date(2015, 2, 14)).unwrap());
        assert!(session.should_cancel(date(2015, 2, 15)).unwrap());
    }

    #[test]
    fn test_fully_paid_policy_never_cancels() {
        let (store, contacts, policy) = monthly_policy();
        let session = PolicyAccounting::open(&store, policy.id).unwrap();

        session
            .make_payment(
                Money::from_major(1200),
                Some(contacts.insured.id),
                policy.effective_date,
            )
            .unwrap();

        assert!(!session.should_cancel(date(2015, 12, 31)).unwrap());
    }

    #[test]
    fn test_payment_after_the_cancel_date_does_not_cure_the_lapse() {
        let (store, contacts, policy) = monthly_policy();
        let session = PolicyAccounting::open(&store, policy.id).unwrap();

        // Agent settles everything, but only after the first cancel date
        session
            .make_payment(
                Money::from_major(1200),
                Some(contacts.agent.id),
                date(2015, 3, 1),
            )
            .unwrap();

        // Balance at the first invoice's cancel date was still positive
        assert!(session.should_cancel(date(2015, 3, 2)).unwrap());
    }
}

mod cancel_policy {
    use super::*;

    #[test]
    fn test_cancel_persists_status_date_and_reason() {
        let (store, _, policy) = monthly_policy();
        let mut session = PolicyAccounting::open(&store, policy.id).unwrap();

        session.cancel_policy("non-payment", date(2015, 2, 15)).unwrap();

        let stored = store.policy(policy.id).unwrap();
        assert_eq!(stored.status, PolicyStatus::Canceled);
        assert_eq!(stored.canceled_date, Some(date(2015, 2, 15)));
        assert_eq!(stored.cancel_reason.as_deref(), Some("non-payment"));
    }

    #[test]
    fn test_cancelling_twice_fails_and_preserves_the_first_cancellation() {
        let (store, _, policy) = monthly_policy();
        let mut session = PolicyAccounting::open(&store, policy.id).unwrap();

        session.cancel_policy("non-payment", date(2015, 2, 15)).unwrap();
        let result = session.cancel_policy("fraud", date(2015, 3, 1));

        assert!(matches!(result, Err(BillingError::AlreadyCanceled(_))));
        let stored = store.policy(policy.id).unwrap();
        assert_eq!(stored.canceled_date, Some(date(2015, 2, 15)));
        assert_eq!(stored.cancel_reason.as_deref(), Some("non-payment"));
    }

    #[test]
    fn test_empty_reason_is_rejected_before_any_mutation() {
        let (store, _, policy) = monthly_policy();
        let mut session = PolicyAccounting::open(&store, policy.id).unwrap();

        let result = session.cancel_policy("", date(2015, 2, 15));

        assert!(matches!(result, Err(BillingError::EmptyCancelReason)));
        assert_eq!(store.policy(policy.id).unwrap().status, PolicyStatus::Active);
    }
}
