//! Store port for the billing domain
//!
//! The billing core never talks to storage directly; every operation goes
//! through the [`BillingStore`] trait. Adapters own their concurrency
//! control (a lock, a connection pool, a transaction) so trait methods take
//! `&self`, and [`BillingStore::replace_invoices`] is the single atomicity
//! point: no reader may ever observe a partially regenerated invoice set.

use chrono::NaiveDate;
use thiserror::Error;

use core_kernel::{ContactId, PolicyId};
use domain_party::{Contact, ContactRole};

use crate::invoice::Invoice;
use crate::payment::Payment;
use crate::policy::Policy;

/// Error type for store operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested entity does not resolve to exactly one record
    #[error("Not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    /// The operation conflicts with existing data
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The underlying storage failed; propagated unchanged to the caller
    #[error("Storage error: {0}")]
    Storage(String),
}

impl StoreError {
    /// Creates a NotFound error for the given entity type and id
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        StoreError::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

/// Transactional record store consumed by the billing core
///
/// Invoice queries return only live (non-deleted) invoices in bill-date
/// order, except [`BillingStore::invoice_history`], which includes
/// superseded invoices for display.
pub trait BillingStore {
    /// Loads a policy by id
    fn policy(&self, id: PolicyId) -> Result<Policy, StoreError>;

    /// Inserts a new policy
    fn add_policy(&self, policy: &Policy) -> Result<(), StoreError>;

    /// Persists changes to an existing policy
    fn update_policy(&self, policy: &Policy) -> Result<(), StoreError>;

    /// All live invoices for a policy, ordered by bill date
    fn invoices(&self, policy_id: PolicyId) -> Result<Vec<Invoice>, StoreError>;

    /// Live invoices with bill date on or before `as_of`, ordered by bill date
    fn invoices_billed_on_or_before(
        &self,
        policy_id: PolicyId,
        as_of: NaiveDate,
    ) -> Result<Vec<Invoice>, StoreError>;

    /// Live invoices with cancel date on or before `as_of`, ordered by bill date
    fn cancel_eligible_invoices(
        &self,
        policy_id: PolicyId,
        as_of: NaiveDate,
    ) -> Result<Vec<Invoice>, StoreError>;

    /// All invoices for a policy including superseded ones, ordered by bill date
    fn invoice_history(&self, policy_id: PolicyId) -> Result<Vec<Invoice>, StoreError>;

    /// Atomically supersedes the policy's live invoices with a new set
    ///
    /// Existing live invoices are soft-deleted and the new set inserted in
    /// one step; a concurrent balance read sees either the old set or the
    /// new one, never a mixture.
    fn replace_invoices(
        &self,
        policy_id: PolicyId,
        invoices: Vec<Invoice>,
    ) -> Result<(), StoreError>;

    /// Records a payment
    fn add_payment(&self, payment: &Payment) -> Result<(), StoreError>;

    /// Payments with transaction date on or before `as_of`
    fn payments_on_or_before(
        &self,
        policy_id: PolicyId,
        as_of: NaiveDate,
    ) -> Result<Vec<Payment>, StoreError>;

    /// Loads a contact by id
    fn contact(&self, id: ContactId) -> Result<Contact, StoreError>;

    /// Inserts a new contact
    fn add_contact(&self, contact: &Contact) -> Result<(), StoreError>;

    /// Finds a contact by exact name and role
    fn find_contact_by_name(
        &self,
        name: &str,
        role: ContactRole,
    ) -> Result<Option<Contact>, StoreError>;
}
