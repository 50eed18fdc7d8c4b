//! Test Utilities Crate
//!
//! Shared test infrastructure for the policy billing test suite.
//!
//! # Modules
//!
//! - `builders`: Builder patterns for test data construction
//! - `fixtures`: A seeded store with the standard demo book of business

pub mod builders;
pub mod fixtures;

pub use builders::PolicyBuilder;
pub use fixtures::{seed_demo_book, seeded_store, test_contacts, DemoBook, TestContacts};
