//! Party Domain - Contacts
//!
//! A contact is an independent entity referenced by policies and payments.
//! Policies reference contacts in two roles: the named insured (the
//! policyholder) and the agent (the intermediary, who uniquely may make
//! payments while a cancellation is pending).

pub mod contact;
pub mod error;

pub use contact::{Contact, ContactRole};
pub use error::PartyError;
