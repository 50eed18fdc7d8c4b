//! Test Data Builders
//!
//! Builder patterns for constructing test data with sensible defaults.
//! Tests specify only the fields they care about; everything else matches
//! the standard test policy (effective 2015-01-01, premium 1200, Annual).

use chrono::NaiveDate;

use core_kernel::{ContactId, Money};
use domain_billing::{BillingSchedule, Policy, PolicyStatus};

/// Builder for constructing test policies
pub struct PolicyBuilder {
    policy_number: String,
    effective_date: NaiveDate,
    annual_premium: Money,
    billing_schedule: BillingSchedule,
    named_insured: Option<ContactId>,
    agent: Option<ContactId>,
    status: PolicyStatus,
}

impl Default for PolicyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PolicyBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            policy_number: "Test Policy".to_string(),
            effective_date: NaiveDate::from_ymd_opt(2015, 1, 1).unwrap(),
            annual_premium: Money::from_major(1200),
            billing_schedule: BillingSchedule::Annual,
            named_insured: None,
            agent: None,
            status: PolicyStatus::Active,
        }
    }

    /// Sets the policy number
    pub fn with_policy_number(mut self, number: impl Into<String>) -> Self {
        self.policy_number = number.into();
        self
    }

    /// Sets the effective date
    pub fn with_effective_date(mut self, date: NaiveDate) -> Self {
        self.effective_date = date;
        self
    }

    /// Sets the annual premium
    pub fn with_annual_premium(mut self, premium: Money) -> Self {
        self.annual_premium = premium;
        self
    }

    /// Sets the billing schedule
    pub fn with_billing_schedule(mut self, schedule: BillingSchedule) -> Self {
        self.billing_schedule = schedule;
        self
    }

    /// Sets the named insured
    pub fn with_named_insured(mut self, contact_id: ContactId) -> Self {
        self.named_insured = Some(contact_id);
        self
    }

    /// Sets the agent
    pub fn with_agent(mut self, contact_id: ContactId) -> Self {
        self.agent = Some(contact_id);
        self
    }

    /// Sets the policy status
    pub fn with_status(mut self, status: PolicyStatus) -> Self {
        self.status = status;
        self
    }

    /// Builds the policy
    pub fn build(self) -> Policy {
        let mut policy = Policy::new(
            self.policy_number,
            self.effective_date,
            self.annual_premium,
            self.billing_schedule,
        );
        policy.named_insured = self.named_insured;
        policy.agent = self.agent;
        policy.status = self.status;
        policy
    }
}
