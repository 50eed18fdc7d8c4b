//! Core Kernel - Foundational types for the policy billing system
//!
//! This crate provides the fundamental building blocks used across the
//! billing domain modules:
//! - Money with precise decimal arithmetic and installment allocation
//! - Calendar arithmetic matching billing conventions (month stepping with
//!   end-of-month clamping)
//! - Strongly-typed identifiers

pub mod identifiers;
pub mod money;
pub mod temporal;

pub use identifiers::{ContactId, InvoiceId, PaymentId, PolicyId};
pub use money::{Money, MoneyError};
pub use temporal::{days_after, months_after};
