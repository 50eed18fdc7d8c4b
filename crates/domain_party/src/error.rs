//! Party domain errors

use thiserror::Error;

/// Errors that can occur in the party domain
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PartyError {
    /// The role string did not match any known contact role
    #[error("Unknown contact role: {0}")]
    UnknownRole(String),

    /// Contact name failed validation
    #[error("Invalid contact name: {0}")]
    InvalidName(String),
}
