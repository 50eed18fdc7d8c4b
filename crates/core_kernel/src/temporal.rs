//! Calendar arithmetic for billing dates
//!
//! Billing dates step in calendar months from the policy effective date.
//! Month stepping clamps to the end of shorter months (Jan 31 + 1 month is
//! Feb 28), which is the convention installment billing expects.

use chrono::{Days, Months, NaiveDate};

/// Returns the date the given number of calendar months after `date`
///
/// Clamps to the last day of the target month when the day-of-month does
/// not exist there.
pub fn months_after(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(Months::new(months))
        .expect("billing date out of calendar range")
}

/// Returns the date the given number of days after `date`
pub fn days_after(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_add_days(Days::new(days))
        .expect("billing date out of calendar range")
}
