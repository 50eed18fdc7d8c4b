//! Policy accounting sessions
//!
//! [`PolicyAccounting`] is the entry point for everything the billing core
//! does to one policy: balances, cancellation evaluation, payments, and
//! schedule changes. Opening a session materializes the invoice schedule if
//! the policy has none yet.
//!
//! Cancellation state is recomputed from invoices and payments on every
//! query; the only stored transition is the terminal
//! [`PolicyAccounting::cancel_policy`].

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use core_kernel::{ContactId, Money, PolicyId};
use domain_party::ContactRole;

use crate::error::BillingError;
use crate::payment::Payment;
use crate::policy::{BillingSchedule, Policy};
use crate::ports::{BillingStore, StoreError};
use crate::schedule::generate_invoices;

/// An accounting session opened against one policy
///
/// Holds the loaded policy and a handle to the store; every operation runs
/// synchronously against the store within the call.
pub struct PolicyAccounting<'a, S: BillingStore> {
    store: &'a S,
    policy: Policy,
}

impl<'a, S: BillingStore> PolicyAccounting<'a, S> {
    /// Opens a session for the given policy
    ///
    /// Loads the policy and, if it has no live invoices, generates and
    /// persists its installment schedule.
    ///
    /// # Errors
    ///
    /// Returns a store error if the policy does not resolve or persistence
    /// fails.
    pub fn open(store: &'a S, policy_id: PolicyId) -> Result<Self, BillingError> {
        let policy = store.policy(policy_id)?;
        let session = Self { store, policy };

        if session.store.invoices(policy_id)?.is_empty() {
            info!(policy = %session.policy.policy_number, "no invoices found, generating schedule");
            session.regenerate_invoices()?;
        }

        Ok(session)
    }

    /// The policy this session is bound to
    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Regenerates the invoice set from current policy state
    fn regenerate_invoices(&self) -> Result<(), BillingError> {
        let invoices = generate_invoices(&self.policy)?;
        self.store.replace_invoices(self.policy.id, invoices)?;
        Ok(())
    }

    /// Returns the account balance as of the given date
    ///
    /// Sums installments billed on or before `as_of`, minus payments made on
    /// or before it. Negative means overpayment; zero means current. Safe to
    /// call with no invoices (returns zero).
    pub fn account_balance(&self, as_of: NaiveDate) -> Result<Money, BillingError> {
        let due: Money = self
            .store
            .invoices_billed_on_or_before(self.policy.id, as_of)?
            .iter()
            .map(|invoice| invoice.amount_due)
            .sum();

        let paid: Money = self
            .store
            .payments_on_or_before(self.policy.id, as_of)?
            .iter()
            .map(|payment| payment.amount_paid)
            .sum();

        let balance = due - paid;
        debug!(policy = %self.policy.policy_number, %as_of, %balance, "account balance");
        Ok(balance)
    }

    /// Returns true if the policy is pending cancellation as of `as_of`
    ///
    /// Pending means some live invoice is strictly past its due date but not
    /// yet at its cancel date, and the balance as of `as_of` is positive.
    pub fn cancellation_pending(&self, as_of: NaiveDate) -> Result<bool, BillingError> {
        let in_window = self
            .store
            .invoices(self.policy.id)?
            .iter()
            .any(|invoice| invoice.in_pending_cancellation_window(as_of));

        if !in_window {
            return Ok(false);
        }

        Ok(self.account_balance(as_of)?.is_positive())
    }

    /// Returns true if the policy should have been canceled by `as_of`
    ///
    /// Walks cancel-eligible invoices in bill-date order; the first one with
    /// a positive balance at its own cancel date decides.
    pub fn should_cancel(&self, as_of: NaiveDate) -> Result<bool, BillingError> {
        for invoice in self.store.cancel_eligible_invoices(self.policy.id, as_of)? {
            if self.account_balance(invoice.cancel_date)?.is_positive() {
                warn!(
                    policy = %self.policy.policy_number,
                    invoice = %invoice.id,
                    cancel_date = %invoice.cancel_date,
                    "unpaid balance at cancel date, policy should cancel"
                );
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Cancels the policy as of the given date
    ///
    /// # Errors
    ///
    /// [`BillingError::EmptyCancelReason`] for a blank reason (checked before
    /// any mutation) and [`BillingError::AlreadyCanceled`] if the policy is
    /// already canceled; state is unchanged in both cases.
    pub fn cancel_policy(&mut self, reason: &str, as_of: NaiveDate) -> Result<(), BillingError> {
        self.policy.cancel(reason, as_of)?;
        self.store.update_policy(&self.policy)?;

        info!(policy = %self.policy.policy_number, %as_of, reason, "policy canceled");
        Ok(())
    }

    /// Validates and records a payment
    ///
    /// The payer defaults to the policy's named insured, then its agent;
    /// [`BillingError::NoPayerAvailable`] if neither exists. While
    /// cancellation is pending, payers who are not agents are rejected with
    /// [`BillingError::PaymentBlockedPendingCancellation`].
    pub fn make_payment(
        &self,
        amount: Money,
        contact_id: Option<ContactId>,
        date: NaiveDate,
    ) -> Result<Payment, BillingError> {
        let payer_id = contact_id
            .or(self.policy.named_insured)
            .or(self.policy.agent)
            .ok_or(BillingError::NoPayerAvailable(self.policy.id))?;

        let payer = self.store.contact(payer_id)?;

        if !payer.is_agent() && self.cancellation_pending(date)? {
            warn!(
                policy = %self.policy.policy_number,
                payer = %payer.name,
                %date,
                "payment rejected while cancellation pending"
            );
            return Err(BillingError::PaymentBlockedPendingCancellation);
        }

        let payment = Payment::new(self.policy.id, payer_id, amount, date);
        self.store.add_payment(&payment)?;

        debug!(policy = %self.policy.policy_number, payment = %payment.id, %amount, "payment recorded");
        Ok(payment)
    }

    /// Changes the billing schedule and regenerates the invoice set
    ///
    /// The effective date and premium are unchanged, so the balance as of
    /// any date immediately reflects the new per-installment amounts. Prior
    /// invoices are superseded atomically; payments stay attached and net
    /// against the new set.
    ///
    /// # Errors
    ///
    /// [`BillingError::ScheduleUnchanged`] if `new_schedule` is already in
    /// effect, [`BillingError::TerminalPolicy`] if the policy is canceled or
    /// expired.
    pub fn change_billing_schedule(
        &mut self,
        new_schedule: BillingSchedule,
    ) -> Result<(), BillingError> {
        if new_schedule == self.policy.billing_schedule {
            return Err(BillingError::ScheduleUnchanged(new_schedule));
        }
        if self.policy.is_terminal() {
            return Err(BillingError::TerminalPolicy(self.policy.status));
        }

        let old_schedule = self.policy.billing_schedule;
        self.policy.billing_schedule = new_schedule;
        self.store.update_policy(&self.policy)?;
        self.regenerate_invoices()?;

        info!(
            policy = %self.policy.policy_number,
            from = %old_schedule,
            to = %new_schedule,
            "billing schedule changed"
        );
        Ok(())
    }

    /// Reassigns the named insured by contact name
    ///
    /// The contact must exist with the Named Insured role.
    pub fn update_named_insured(&mut self, name: &str) -> Result<(), BillingError> {
        let contact = self
            .store
            .find_contact_by_name(name, ContactRole::NamedInsured)?
            .ok_or_else(|| StoreError::not_found("Contact", name))?;

        self.policy.named_insured = Some(contact.id);
        self.store.update_policy(&self.policy)?;

        info!(policy = %self.policy.policy_number, insured = %contact.name, "named insured updated");
        Ok(())
    }
}

/// Issues a new policy and materializes its initial invoice set
///
/// Contacts are resolved by exact name within the role the reference
/// requires; a missing contact surfaces as a store NotFound error.
pub fn issue_policy<S: BillingStore>(
    store: &S,
    policy_number: &str,
    effective_date: NaiveDate,
    annual_premium: Money,
    billing_schedule: BillingSchedule,
    named_insured: Option<&str>,
    agent: Option<&str>,
) -> Result<Policy, BillingError> {
    let mut policy = Policy::new(policy_number, effective_date, annual_premium, billing_schedule);

    if let Some(name) = named_insured {
        let contact = store
            .find_contact_by_name(name, ContactRole::NamedInsured)?
            .ok_or_else(|| StoreError::not_found("Contact", name))?;
        policy.named_insured = Some(contact.id);
    }
    if let Some(name) = agent {
        let contact = store
            .find_contact_by_name(name, ContactRole::Agent)?
            .ok_or_else(|| StoreError::not_found("Contact", name))?;
        policy.agent = Some(contact.id);
    }

    store.add_policy(&policy)?;
    store.replace_invoices(policy.id, generate_invoices(&policy)?)?;

    info!(policy = %policy.policy_number, schedule = %billing_schedule, "policy issued");
    Ok(policy)
}
