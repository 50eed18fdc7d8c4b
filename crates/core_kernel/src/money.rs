//! Money with precise decimal arithmetic
//!
//! This module provides a type-safe representation of monetary amounts
//! using rust_decimal for precise calculations without floating-point errors.
//! Amounts carry two decimal places (minor-unit precision); the system is
//! single-currency, so no currency axis is tracked.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use thiserror::Error;

/// Number of decimal places amounts are kept at
const DECIMAL_PLACES: u32 = 2;

/// Errors that can occur during money operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Cannot allocate into zero parts")]
    ZeroParts,
}

/// A monetary amount with minor-unit (cent) precision
///
/// Money uses rust_decimal for exact arithmetic; amounts are rounded to two
/// decimal places on construction. Signed values are allowed: a negative
/// account balance represents an overpayment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money {
    amount: Decimal,
}

impl Money {
    /// Creates a new Money value, rounding to minor-unit precision
    pub fn new(amount: Decimal) -> Self {
        Self {
            amount: amount.round_dp(DECIMAL_PLACES),
        }
    }

    /// Creates Money from an integer amount in minor units (cents)
    pub fn from_minor(minor_units: i64) -> Self {
        Self {
            amount: Decimal::new(minor_units, DECIMAL_PLACES),
        }
    }

    /// Creates Money from an integer amount in major units (whole dollars)
    pub fn from_major(major_units: i64) -> Self {
        Self {
            amount: Decimal::new(major_units, 0),
        }
    }

    /// The zero amount
    pub fn zero() -> Self {
        Self { amount: dec!(0) }
    }

    /// Returns the amount
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns true if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Returns true if the amount is strictly positive
    pub fn is_positive(&self) -> bool {
        self.amount.is_sign_positive() && !self.amount.is_zero()
    }

    /// Returns true if the amount is strictly negative
    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    /// Returns the absolute value
    pub fn abs(&self) -> Self {
        Self {
            amount: self.amount.abs(),
        }
    }

    /// Allocates the amount into n parts that sum exactly to the original
    ///
    /// The split happens in minor units. When the amount does not divide
    /// evenly, the remainder is distributed one cent at a time to the
    /// earliest parts, so part 0 is never smaller than part n-1.
    pub fn allocate(&self, n: u32) -> Result<Vec<Money>, MoneyError> {
        if n == 0 {
            return Err(MoneyError::ZeroParts);
        }
        if self.amount.is_sign_negative() {
            return Err(MoneyError::InvalidAmount(format!(
                "cannot allocate negative amount {}",
                self.amount
            )));
        }

        let total_minor = (self.amount * Decimal::new(100, 0)).round().mantissa();
        let base = total_minor / n as i128;
        let remainder = (total_minor % n as i128) as u32;

        let mut parts = Vec::with_capacity(n as usize);
        for i in 0..n {
            let minor = if i < remainder { base + 1 } else { base };
            parts.push(Money::from_minor(minor as i64));
        }

        Ok(parts)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.amount)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.amount + other.amount)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.amount - other.amount)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.amount)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_creation() {
        let m = Money::new(dec!(100.50));
        assert_eq!(m.amount(), dec!(100.50));
    }

    #[test]
    fn test_money_from_minor() {
        let m = Money::from_minor(10050);
        assert_eq!(m.amount(), dec!(100.50));
    }

    #[test]
    fn test_money_from_major() {
        assert_eq!(Money::from_major(1200).amount(), dec!(1200));
    }

    #[test]
    fn test_money_arithmetic() {
        let a = Money::from_major(100);
        let b = Money::from_major(50);

        assert_eq!((a + b).amount(), dec!(150));
        assert_eq!((a - b).amount(), dec!(50));
        assert_eq!((-a).amount(), dec!(-100));
    }

    #[test]
    fn test_money_sign_predicates() {
        assert!(Money::from_major(1).is_positive());
        assert!(Money::from_major(-1).is_negative());
        assert!(!Money::zero().is_positive());
        assert!(!Money::zero().is_negative());
    }

    #[test]
    fn test_allocate_even_split() {
        let parts = Money::from_major(1200).allocate(4).unwrap();
        assert_eq!(parts.len(), 4);
        for part in &parts {
            assert_eq!(part.amount(), dec!(300));
        }
    }

    #[test]
    fn test_allocate_remainder_goes_to_earliest_parts() {
        let parts = Money::from_major(1000).allocate(3).unwrap();
        assert_eq!(parts[0].amount(), dec!(333.34));
        assert_eq!(parts[1].amount(), dec!(333.33));
        assert_eq!(parts[2].amount(), dec!(333.33));
    }

    #[test]
    fn test_allocate_zero_parts_rejected() {
        let result = Money::from_major(100).allocate(0);
        assert_eq!(result, Err(MoneyError::ZeroParts));
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_minor(123456).to_string(), "$1234.56");
    }
}
