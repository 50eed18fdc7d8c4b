//! Pre-built Test Fixtures
//!
//! Ready-to-use stores seeded with predictable data: a pair of test
//! contacts, and the standard demo book of business (six contacts, three
//! policies, one opening payment).

use chrono::NaiveDate;

use core_kernel::Money;
use domain_billing::{
    BillingError, BillingSchedule, BillingStore, Payment, Policy, PolicyAccounting,
};
use domain_party::{Contact, ContactRole};
use infra_store::MemoryStore;

/// The standard agent/insured pair used by most suites
pub struct TestContacts {
    pub agent: Contact,
    pub insured: Contact,
}

/// Adds the standard test agent and insured to the store
pub fn test_contacts(store: &MemoryStore) -> TestContacts {
    let agent = Contact::new("Test Agent", ContactRole::Agent);
    let insured = Contact::new("Test Insured", ContactRole::NamedInsured);
    store.add_contact(&agent).expect("fresh store");
    store.add_contact(&insured).expect("fresh store");
    TestContacts { agent, insured }
}

/// Creates a store holding only the standard test contacts
pub fn seeded_store() -> (MemoryStore, TestContacts) {
    let store = MemoryStore::new();
    let contacts = test_contacts(&store);
    (store, contacts)
}

/// The demo book of business
pub struct DemoBook {
    pub policy_one: Policy,
    pub policy_two: Policy,
    pub policy_three: Policy,
}

/// Seeds the demo book of business
///
/// Six contacts; Policy One (Annual, 365, eff 2015-01-01), Policy Two
/// (Quarterly, 1600, eff 2015-02-01) with a 400 payment on its effective
/// date, and Policy Three (Monthly, 1200, eff 2015-01-01). Opening each
/// policy materializes its invoice schedule.
pub fn seed_demo_book(store: &MemoryStore) -> Result<DemoBook, BillingError> {
    let john_doe_agent = Contact::new("John Doe", ContactRole::Agent);
    let john_doe_insured = Contact::new("John Doe", ContactRole::NamedInsured);
    let bob_smith = Contact::new("Bob Smith", ContactRole::Agent);
    let anna_white = Contact::new("Anna White", ContactRole::NamedInsured);
    let joe_lee = Contact::new("Joe Lee", ContactRole::Agent);
    let ryan_bucket = Contact::new("Ryan Bucket", ContactRole::NamedInsured);

    for contact in [
        &john_doe_agent,
        &john_doe_insured,
        &bob_smith,
        &anna_white,
        &joe_lee,
        &ryan_bucket,
    ] {
        store.add_contact(contact)?;
    }

    let policy_one = Policy::new(
        "Policy One",
        NaiveDate::from_ymd_opt(2015, 1, 1).unwrap(),
        Money::from_major(365),
        BillingSchedule::Annual,
    )
    .with_agent(bob_smith.id);

    let policy_two = Policy::new(
        "Policy Two",
        NaiveDate::from_ymd_opt(2015, 2, 1).unwrap(),
        Money::from_major(1600),
        BillingSchedule::Quarterly,
    )
    .with_named_insured(anna_white.id)
    .with_agent(joe_lee.id);

    let policy_three = Policy::new(
        "Policy Three",
        NaiveDate::from_ymd_opt(2015, 1, 1).unwrap(),
        Money::from_major(1200),
        BillingSchedule::Monthly,
    )
    .with_named_insured(ryan_bucket.id)
    .with_agent(john_doe_agent.id);

    for policy in [&policy_one, &policy_two, &policy_three] {
        store.add_policy(policy)?;
        PolicyAccounting::open(store, policy.id)?;
    }

    let opening_payment = Payment::new(
        policy_two.id,
        anna_white.id,
        Money::from_major(400),
        NaiveDate::from_ymd_opt(2015, 2, 1).unwrap(),
    );
    store.add_payment(&opening_payment)?;

    Ok(DemoBook {
        policy_one,
        policy_two,
        policy_three,
    })
}
