//! Payment records
//!
//! Payments are created only through the payment processor and are
//! immutable once recorded.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{ContactId, Money, PaymentId, PolicyId};

/// A recorded payment against a policy's account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    /// Unique identifier
    pub id: PaymentId,
    /// Policy the payment applies to
    pub policy_id: PolicyId,
    /// Contact who paid
    pub contact_id: ContactId,
    /// Amount paid
    pub amount_paid: Money,
    /// Business date of the payment
    pub transaction_date: NaiveDate,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl Payment {
    /// Creates a new payment record
    pub fn new(
        policy_id: PolicyId,
        contact_id: ContactId,
        amount_paid: Money,
        transaction_date: NaiveDate,
    ) -> Self {
        Self {
            id: PaymentId::new_v7(),
            policy_id,
            contact_id,
            amount_paid,
            transaction_date,
            created_at: Utc::now(),
        }
    }
}
