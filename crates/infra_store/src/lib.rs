//! Store Infrastructure
//!
//! In-process adapter for the billing store port. Persistence is a
//! collaborator behind [`domain_billing::BillingStore`]; this crate
//! satisfies the port with an in-memory, lock-serialized implementation
//! that honors the same transactional guarantees: atomic invoice
//! replacement and serialized conflicting writes.

pub mod memory;

pub use memory::MemoryStore;
