//! Installment invoices
//!
//! An invoice's due and cancel dates are derived from its bill date at
//! construction: due = bill date + 1 month, cancel = due date + 14 days.
//! Invoices are soft-deleted when a schedule change supersedes them, so the
//! historical record stays intact.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{days_after, months_after, InvoiceId, Money, PolicyId};

/// Days of grace between the due date and the cancel date
const CANCEL_GRACE_DAYS: u64 = 14;

/// An installment invoice belonging to exactly one policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    /// Unique identifier
    pub id: InvoiceId,
    /// Owning policy
    pub policy_id: PolicyId,
    /// Date the installment enters the amount owed
    pub bill_date: NaiveDate,
    /// Date payment is due (bill date + 1 month)
    pub due_date: NaiveDate,
    /// Date an unpaid installment becomes cancel-eligible (due date + 14 days)
    pub cancel_date: NaiveDate,
    /// Installment amount
    pub amount_due: Money,
    /// True once superseded by a schedule change
    pub deleted: bool,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl Invoice {
    /// Creates a new invoice, deriving due and cancel dates from the bill date
    pub fn new(policy_id: PolicyId, bill_date: NaiveDate, amount_due: Money) -> Self {
        let due_date = months_after(bill_date, 1);
        let cancel_date = days_after(due_date, CANCEL_GRACE_DAYS);

        Self {
            id: InvoiceId::new_v7(),
            policy_id,
            bill_date,
            due_date,
            cancel_date,
            amount_due,
            deleted: false,
            created_at: Utc::now(),
        }
    }

    /// True if the installment counts toward the balance as of `as_of`
    pub fn is_billed_by(&self, as_of: NaiveDate) -> bool {
        self.bill_date <= as_of
    }

    /// True if `as_of` falls strictly between the due date and the cancel
    /// date, the window where an unpaid invoice means pending cancellation
    pub fn in_pending_cancellation_window(&self, as_of: NaiveDate) -> bool {
        self.due_date < as_of && as_of < self.cancel_date
    }

    /// True if the cancel date has been reached as of `as_of`
    pub fn is_cancel_eligible_by(&self, as_of: NaiveDate) -> bool {
        self.cancel_date <= as_of
    }

    /// Marks the invoice superseded
    pub fn mark_deleted(&mut self) {
        self.deleted = true;
    }
}
