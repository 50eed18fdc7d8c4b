//! In-memory billing store
//!
//! All records live behind one `RwLock`, which serializes conflicting
//! writes the way the store-level transaction would in a SQL deployment.
//! `replace_invoices` soft-deletes and inserts under a single write guard,
//! so no reader can observe a partially regenerated invoice set.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::NaiveDate;
use tracing::debug;

use core_kernel::{ContactId, PolicyId};
use domain_billing::{BillingStore, Invoice, Payment, Policy, StoreError};
use domain_party::{Contact, ContactRole};

#[derive(Debug, Default)]
struct Inner {
    policies: HashMap<PolicyId, Policy>,
    invoices: HashMap<PolicyId, Vec<Invoice>>,
    payments: HashMap<PolicyId, Vec<Payment>>,
    contacts: HashMap<ContactId, Contact>,
}

/// In-memory implementation of [`BillingStore`]
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Inner>, StoreError> {
        self.inner
            .read()
            .map_err(|_| StoreError::Storage("store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Inner>, StoreError> {
        self.inner
            .write()
            .map_err(|_| StoreError::Storage("store lock poisoned".to_string()))
    }

    fn live_invoices<F>(&self, policy_id: PolicyId, filter: F) -> Result<Vec<Invoice>, StoreError>
    where
        F: Fn(&Invoice) -> bool,
    {
        let inner = self.read()?;
        let mut invoices: Vec<Invoice> = inner
            .invoices
            .get(&policy_id)
            .into_iter()
            .flatten()
            .filter(|invoice| !invoice.deleted && filter(invoice))
            .cloned()
            .collect();
        invoices.sort_by_key(|invoice| invoice.bill_date);
        Ok(invoices)
    }
}

impl BillingStore for MemoryStore {
    fn policy(&self, id: PolicyId) -> Result<Policy, StoreError> {
        self.read()?
            .policies
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("Policy", id))
    }

    fn add_policy(&self, policy: &Policy) -> Result<(), StoreError> {
        let mut inner = self.write()?;
        if inner.policies.contains_key(&policy.id) {
            return Err(StoreError::Conflict(format!(
                "policy {} already exists",
                policy.id
            )));
        }
        inner.policies.insert(policy.id, policy.clone());
        debug!(policy = %policy.policy_number, "policy added");
        Ok(())
    }

    fn update_policy(&self, policy: &Policy) -> Result<(), StoreError> {
        let mut inner = self.write()?;
        if !inner.policies.contains_key(&policy.id) {
            return Err(StoreError::not_found("Policy", policy.id));
        }
        inner.policies.insert(policy.id, policy.clone());
        Ok(())
    }

    fn invoices(&self, policy_id: PolicyId) -> Result<Vec<Invoice>, StoreError> {
        self.live_invoices(policy_id, |_| true)
    }

    fn invoices_billed_on_or_before(
        &self,
        policy_id: PolicyId,
        as_of: NaiveDate,
    ) -> Result<Vec<Invoice>, StoreError> {
        self.live_invoices(policy_id, |invoice| invoice.bill_date <= as_of)
    }

    fn cancel_eligible_invoices(
        &self,
        policy_id: PolicyId,
        as_of: NaiveDate,
    ) -> Result<Vec<Invoice>, StoreError> {
        self.live_invoices(policy_id, |invoice| invoice.cancel_date <= as_of)
    }

    fn invoice_history(&self, policy_id: PolicyId) -> Result<Vec<Invoice>, StoreError> {
        let inner = self.read()?;
        let mut invoices: Vec<Invoice> = inner
            .invoices
            .get(&policy_id)
            .cloned()
            .unwrap_or_default();
        invoices.sort_by_key(|invoice| invoice.bill_date);
        Ok(invoices)
    }

    fn replace_invoices(
        &self,
        policy_id: PolicyId,
        invoices: Vec<Invoice>,
    ) -> Result<(), StoreError> {
        let mut inner = self.write()?;
        let stored = inner.invoices.entry(policy_id).or_default();

        let superseded = stored.iter().filter(|invoice| !invoice.deleted).count();
        for invoice in stored.iter_mut() {
            invoice.mark_deleted();
        }
        stored.extend(invoices);

        debug!(%policy_id, superseded, "invoice set replaced");
        Ok(())
    }

    fn add_payment(&self, payment: &Payment) -> Result<(), StoreError> {
        let mut inner = self.write()?;
        inner
            .payments
            .entry(payment.policy_id)
            .or_default()
            .push(payment.clone());
        Ok(())
    }

    fn payments_on_or_before(
        &self,
        policy_id: PolicyId,
        as_of: NaiveDate,
    ) -> Result<Vec<Payment>, StoreError> {
        let inner = self.read()?;
        Ok(inner
            .payments
            .get(&policy_id)
            .into_iter()
            .flatten()
            .filter(|payment| payment.transaction_date <= as_of)
            .cloned()
            .collect())
    }

    fn contact(&self, id: ContactId) -> Result<Contact, StoreError> {
        self.read()?
            .contacts
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("Contact", id))
    }

    fn add_contact(&self, contact: &Contact) -> Result<(), StoreError> {
        let mut inner = self.write()?;
        if inner.contacts.contains_key(&contact.id) {
            return Err(StoreError::Conflict(format!(
                "contact {} already exists",
                contact.id
            )));
        }
        inner.contacts.insert(contact.id, contact.clone());
        Ok(())
    }

    fn find_contact_by_name(
        &self,
        name: &str,
        role: ContactRole,
    ) -> Result<Option<Contact>, StoreError> {
        let inner = self.read()?;
        Ok(inner
            .contacts
            .values()
            .find(|contact| contact.name == name && contact.role == role)
            .cloned())
    }
}
