//! Invoice generation per billing schedule
//!
//! Splits a policy's annual premium into its installment invoices. The
//! schedule determines the installment count (Annual 1, Two-Pay 2,
//! Quarterly 4, Monthly 12); installment `i` bills `i * (12 / count)`
//! calendar months after the effective date.
//!
//! Remainder policy: amounts come from [`Money::allocate`], which splits in
//! minor units and gives leftover cents to the earliest installments, so the
//! set always sums exactly to the annual premium. Truncating division would
//! under-bill odd premiums by up to `count - 1` cents a year.

use tracing::info;

use core_kernel::months_after;

use crate::error::BillingError;
use crate::invoice::Invoice;
use crate::policy::Policy;

/// Generates the full installment invoice set for a policy
///
/// Pure with respect to storage: callers persist the result through
/// [`crate::BillingStore::replace_invoices`], which supersedes any prior
/// set, making regeneration idempotent for unchanged policy state.
pub fn generate_invoices(policy: &Policy) -> Result<Vec<Invoice>, BillingError> {
    let count = policy.billing_schedule.installments();
    let step = policy.billing_schedule.step_months();
    let amounts = policy.annual_premium.allocate(count)?;

    let invoices = amounts
        .into_iter()
        .enumerate()
        .map(|(i, amount)| {
            let bill_date = months_after(policy.effective_date, i as u32 * step);
            Invoice::new(policy.id, bill_date, amount)
        })
        .collect();

    info!(
        policy = %policy.policy_number,
        schedule = %policy.billing_schedule,
        installments = count,
        "invoices generated"
    );
    Ok(invoices)
}
