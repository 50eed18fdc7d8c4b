//! Policy issuance, named-insured reassignment, and the demo book

use chrono::NaiveDate;
use core_kernel::Money;
use domain_billing::{
    issue_policy, BillingError, BillingSchedule, BillingStore, PolicyAccounting, StoreError,
};
use domain_party::{Contact, ContactRole};
use infra_store::MemoryStore;
use test_utils::{seed_demo_book, seeded_store};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_issue_policy_materializes_invoices_and_opening_balance() {
    let (store, contacts) = seeded_store();

    let policy = issue_policy(
        &store,
        "Policy Four",
        date(2015, 2, 1),
        Money::from_major(500),
        BillingSchedule::TwoPay,
        Some("Test Insured"),
        Some("Test Agent"),
    )
    .unwrap();

    assert_eq!(policy.named_insured, Some(contacts.insured.id));
    assert_eq!(policy.agent, Some(contacts.agent.id));

    let session = PolicyAccounting::open(&store, policy.id).unwrap();
    assert_eq!(
        session.account_balance(policy.effective_date).unwrap(),
        Money::from_major(250)
    );
    assert_eq!(store.invoices(policy.id).unwrap().len(), 2);
}

#[test]
fn test_issue_policy_with_unknown_insured_fails() {
    let (store, _) = seeded_store();

    let result = issue_policy(
        &store,
        "Policy Four",
        date(2015, 2, 1),
        Money::from_major(500),
        BillingSchedule::TwoPay,
        Some("Nobody Home"),
        Some("Test Agent"),
    );

    assert!(matches!(
        result,
        Err(BillingError::Store(StoreError::NotFound { entity: "Contact", .. }))
    ));
}

#[test]
fn test_update_named_insured_by_name() {
    let (store, contacts) = seeded_store();
    let anna = Contact::new("Anna White", ContactRole::NamedInsured);
    store.add_contact(&anna).unwrap();

    let policy = issue_policy(
        &store,
        "Policy Four",
        date(2015, 2, 1),
        Money::from_major(500),
        BillingSchedule::TwoPay,
        Some("Test Insured"),
        None,
    )
    .unwrap();
    assert_eq!(policy.named_insured, Some(contacts.insured.id));

    let mut session = PolicyAccounting::open(&store, policy.id).unwrap();
    session.update_named_insured("Anna White").unwrap();

    assert_eq!(store.policy(policy.id).unwrap().named_insured, Some(anna.id));
}

#[test]
fn test_update_named_insured_rejects_agent_only_names() {
    let (store, _) = seeded_store();
    let policy = issue_policy(
        &store,
        "Policy Four",
        date(2015, 2, 1),
        Money::from_major(500),
        BillingSchedule::TwoPay,
        Some("Test Insured"),
        None,
    )
    .unwrap();

    let mut session = PolicyAccounting::open(&store, policy.id).unwrap();
    // "Test Agent" exists, but only in the Agent role
    let result = session.update_named_insured("Test Agent");

    assert!(matches!(
        result,
        Err(BillingError::Store(StoreError::NotFound { entity: "Contact", .. }))
    ));
}

#[test]
fn test_demo_book_seeds_consistently() {
    let store = MemoryStore::new();
    let book = seed_demo_book(&store).unwrap();

    // Policy One: Annual 365, billed in full on its effective date
    let one = PolicyAccounting::open(&store, book.policy_one.id).unwrap();
    assert_eq!(
        one.account_balance(date(2015, 1, 1)).unwrap(),
        Money::from_major(365)
    );

    // Policy Two: Quarterly 1600, first installment 400, opening payment 400
    let two = PolicyAccounting::open(&store, book.policy_two.id).unwrap();
    assert_eq!(
        two.account_balance(date(2015, 2, 1)).unwrap(),
        Money::zero()
    );

    // Policy Three: Monthly 1200
    assert_eq!(store.invoices(book.policy_three.id).unwrap().len(), 12);
}
