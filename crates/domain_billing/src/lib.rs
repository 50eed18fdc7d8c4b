//! Billing Domain - Policy Accounting
//!
//! This crate implements the accounting core for insurance-policy billing:
//! installment invoice schedules, account balances as of an arbitrary date,
//! payment processing, and the date-driven cancellation state machine.
//!
//! # Billing Model
//!
//! A policy's annual premium is split into installment invoices according to
//! its billing schedule (Annual, Two-Pay, Quarterly, Monthly). Each invoice
//! carries three dates:
//!
//! - **bill date** - the installment becomes part of the amount owed
//! - **due date** - bill date + 1 month; past this, an unpaid invoice opens
//!   the pending-cancellation window
//! - **cancel date** - due date + 14 days; past this, an unpaid invoice makes
//!   the policy eligible for full cancellation
//!
//! The account balance as of a date is the sum of installments billed on or
//! before that date minus payments made on or before it. State is never
//! stored incrementally: the cancellation evaluator recomputes from invoices
//! and payments on every query.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_billing::{PolicyAccounting, BillingSchedule};
//!
//! let session = PolicyAccounting::open(&store, policy_id)?;
//! let balance = session.account_balance(as_of)?;
//! if session.cancellation_pending(as_of)? {
//!     // only the agent may pay now
//! }
//! ```

pub mod accounting;
pub mod error;
pub mod invoice;
pub mod payment;
pub mod policy;
pub mod ports;
pub mod schedule;

pub use accounting::{issue_policy, PolicyAccounting};
pub use error::BillingError;
pub use invoice::Invoice;
pub use payment::Payment;
pub use policy::{BillingSchedule, Policy, PolicyStatus};
pub use ports::{BillingStore, StoreError};
pub use schedule::generate_invoices;
