//! Billing domain errors

use thiserror::Error;

use core_kernel::{MoneyError, PolicyId};

use crate::policy::{BillingSchedule, PolicyStatus};
use crate::ports::StoreError;

/// Errors that can occur in the billing domain
#[derive(Debug, Error)]
pub enum BillingError {
    /// Store lookup or commit failure, propagated unchanged
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Money arithmetic failure
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// A billing-schedule value outside the four recognized ones
    #[error("Unrecognized billing schedule: {0}")]
    InvalidSchedule(String),

    /// Terminal cancel transition attempted twice
    #[error("Policy {0} is already canceled")]
    AlreadyCanceled(PolicyId),

    /// Cancellation requires a reason before any mutation happens
    #[error("Cancellation reason must not be empty")]
    EmptyCancelReason,

    /// Non-agent payment attempted inside the pending-cancellation window
    #[error("Payment rejected: only an agent may pay while cancellation is pending")]
    PaymentBlockedPendingCancellation,

    /// Payment with no explicit payer on a policy with neither insured nor agent
    #[error("Policy {0} has neither a named insured nor an agent to pay")]
    NoPayerAvailable(PolicyId),

    /// Schedule change to the schedule already in effect
    #[error("Billing schedule is already {0}")]
    ScheduleUnchanged(BillingSchedule),

    /// Schedule change attempted on a canceled or expired policy
    #[error("Cannot change the billing schedule of a {0} policy")]
    TerminalPolicy(PolicyStatus),
}
