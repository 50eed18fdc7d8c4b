//! Policy entity, billing schedules, and policy status

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::{ContactId, Money, PolicyId};

use crate::error::BillingError;

/// Frequency at which the annual premium is split into installments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BillingSchedule {
    /// Single installment for the full premium
    Annual,
    /// Two installments, six months apart
    TwoPay,
    /// Four installments, three months apart
    Quarterly,
    /// Twelve installments, one month apart
    Monthly,
}

impl BillingSchedule {
    /// All recognized schedules
    pub const ALL: [BillingSchedule; 4] = [
        BillingSchedule::Annual,
        BillingSchedule::TwoPay,
        BillingSchedule::Quarterly,
        BillingSchedule::Monthly,
    ];

    /// Number of installment invoices per policy year
    pub fn installments(&self) -> u32 {
        match self {
            BillingSchedule::Annual => 1,
            BillingSchedule::TwoPay => 2,
            BillingSchedule::Quarterly => 4,
            BillingSchedule::Monthly => 12,
        }
    }

    /// Calendar months between consecutive bill dates
    pub fn step_months(&self) -> u32 {
        12 / self.installments()
    }

    /// Returns the schedule's display label
    pub fn label(&self) -> &'static str {
        match self {
            BillingSchedule::Annual => "Annual",
            BillingSchedule::TwoPay => "Two-Pay",
            BillingSchedule::Quarterly => "Quarterly",
            BillingSchedule::Monthly => "Monthly",
        }
    }
}

impl fmt::Display for BillingSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for BillingSchedule {
    type Err = BillingError;

    /// Parses a schedule label, rejecting anything outside the four
    /// recognized values so an invalid schedule can never be stored
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BillingSchedule::ALL
            .into_iter()
            .find(|schedule| schedule.label() == s)
            .ok_or_else(|| BillingError::InvalidSchedule(s.to_string()))
    }
}

/// Policy lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PolicyStatus {
    /// In force and billable
    Active,
    /// Terminated by the cancellation state machine
    Canceled,
    /// Reached the natural end of its term
    Expired,
}

impl PolicyStatus {
    /// Returns true for states a policy never leaves
    pub fn is_terminal(&self) -> bool {
        matches!(self, PolicyStatus::Canceled | PolicyStatus::Expired)
    }
}

impl fmt::Display for PolicyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PolicyStatus::Active => "Active",
            PolicyStatus::Canceled => "Canceled",
            PolicyStatus::Expired => "Expired",
        };
        write!(f, "{}", label)
    }
}

/// An insurance policy as the billing core sees it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    /// Unique identifier
    pub id: PolicyId,
    /// Human-readable policy number
    pub policy_number: String,
    /// Date coverage (and billing) starts
    pub effective_date: NaiveDate,
    /// Premium for the full policy year
    pub annual_premium: Money,
    /// Installment frequency
    pub billing_schedule: BillingSchedule,
    /// The policyholder contact, if assigned
    pub named_insured: Option<ContactId>,
    /// The servicing agent contact, if assigned
    pub agent: Option<ContactId>,
    /// Lifecycle status
    pub status: PolicyStatus,
    /// Date the policy was canceled, if it was
    pub canceled_date: Option<NaiveDate>,
    /// Reason the policy was canceled, if it was
    pub cancel_reason: Option<String>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl Policy {
    /// Creates a new active policy with no contacts assigned
    pub fn new(
        policy_number: impl Into<String>,
        effective_date: NaiveDate,
        annual_premium: Money,
        billing_schedule: BillingSchedule,
    ) -> Self {
        Self {
            id: PolicyId::new_v7(),
            policy_number: policy_number.into(),
            effective_date,
            annual_premium,
            billing_schedule,
            named_insured: None,
            agent: None,
            status: PolicyStatus::Active,
            canceled_date: None,
            cancel_reason: None,
            created_at: Utc::now(),
        }
    }

    /// Assigns the named insured
    pub fn with_named_insured(mut self, contact_id: ContactId) -> Self {
        self.named_insured = Some(contact_id);
        self
    }

    /// Assigns the agent
    pub fn with_agent(mut self, contact_id: ContactId) -> Self {
        self.agent = Some(contact_id);
        self
    }

    /// Returns true if the policy is in a terminal state
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Cancels the policy as of the given date
    ///
    /// The reason must be non-empty and is checked before any mutation.
    /// Cancelling an already-canceled policy fails and leaves it unchanged.
    pub fn cancel(&mut self, reason: &str, as_of: NaiveDate) -> Result<(), BillingError> {
        if reason.trim().is_empty() {
            return Err(BillingError::EmptyCancelReason);
        }
        if self.status == PolicyStatus::Canceled {
            return Err(BillingError::AlreadyCanceled(self.id));
        }

        self.status = PolicyStatus::Canceled;
        self.canceled_date = Some(as_of);
        self.cancel_reason = Some(reason.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_policy() -> Policy {
        Policy::new(
            "Test Policy",
            NaiveDate::from_ymd_opt(2015, 1, 1).unwrap(),
            Money::from_major(1200),
            BillingSchedule::Annual,
        )
    }

    #[test]
    fn test_schedule_installment_counts() {
        assert_eq!(BillingSchedule::Annual.installments(), 1);
        assert_eq!(BillingSchedule::TwoPay.installments(), 2);
        assert_eq!(BillingSchedule::Quarterly.installments(), 4);
        assert_eq!(BillingSchedule::Monthly.installments(), 12);
    }

    #[test]
    fn test_schedule_step_months() {
        assert_eq!(BillingSchedule::Annual.step_months(), 12);
        assert_eq!(BillingSchedule::TwoPay.step_months(), 6);
        assert_eq!(BillingSchedule::Quarterly.step_months(), 3);
        assert_eq!(BillingSchedule::Monthly.step_months(), 1);
    }

    #[test]
    fn test_schedule_labels_round_trip() {
        for schedule in BillingSchedule::ALL {
            let parsed: BillingSchedule = schedule.label().parse().unwrap();
            assert_eq!(parsed, schedule);
        }
    }

    #[test]
    fn test_invalid_schedule_is_rejected() {
        let result: Result<BillingSchedule, _> = "Weekly".parse();
        assert!(matches!(result, Err(BillingError::InvalidSchedule(s)) if s == "Weekly"));
    }

    #[test]
    fn test_cancel_sets_status_date_and_reason() {
        let mut policy = test_policy();
        let as_of = NaiveDate::from_ymd_opt(2015, 3, 1).unwrap();

        policy.cancel("non-payment", as_of).unwrap();

        assert_eq!(policy.status, PolicyStatus::Canceled);
        assert_eq!(policy.canceled_date, Some(as_of));
        assert_eq!(policy.cancel_reason.as_deref(), Some("non-payment"));
    }

    #[test]
    fn test_cancel_twice_fails_and_leaves_state_unchanged() {
        let mut policy = test_policy();
        let first = NaiveDate::from_ymd_opt(2015, 3, 1).unwrap();
        let second = NaiveDate::from_ymd_opt(2015, 4, 1).unwrap();

        policy.cancel("non-payment", first).unwrap();
        let result = policy.cancel("fraud", second);

        assert!(matches!(result, Err(BillingError::AlreadyCanceled(_))));
        assert_eq!(policy.canceled_date, Some(first));
        assert_eq!(policy.cancel_reason.as_deref(), Some("non-payment"));
    }

    #[test]
    fn test_cancel_with_empty_reason_fails_before_mutation() {
        let mut policy = test_policy();
        let as_of = NaiveDate::from_ymd_opt(2015, 3, 1).unwrap();

        let result = policy.cancel("   ", as_of);

        assert!(matches!(result, Err(BillingError::EmptyCancelReason)));
        assert_eq!(policy.status, PolicyStatus::Active);
        assert_eq!(policy.canceled_date, None);
    }

    #[test]
    fn test_terminal_states() {
        assert!(!PolicyStatus::Active.is_terminal());
        assert!(PolicyStatus::Canceled.is_terminal());
        assert!(PolicyStatus::Expired.is_terminal());
    }
}
