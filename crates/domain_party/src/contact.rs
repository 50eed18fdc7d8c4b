//! Contact entity and roles

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::ContactId;

use crate::error::PartyError;

/// Role a contact plays with respect to a policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContactRole {
    /// Intermediary servicing the policy
    Agent,
    /// The policyholder
    NamedInsured,
}

impl ContactRole {
    /// Returns the role's display label
    pub fn label(&self) -> &'static str {
        match self {
            ContactRole::Agent => "Agent",
            ContactRole::NamedInsured => "Named Insured",
        }
    }
}

impl fmt::Display for ContactRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for ContactRole {
    type Err = PartyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Agent" => Ok(ContactRole::Agent),
            "Named Insured" => Ok(ContactRole::NamedInsured),
            other => Err(PartyError::UnknownRole(other.to_string())),
        }
    }
}

/// A contact referenced by policies and payments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Unique identifier
    pub id: ContactId,
    /// Contact name
    pub name: String,
    /// Role this contact plays
    pub role: ContactRole,
}

impl Contact {
    /// Creates a new contact
    pub fn new(name: impl Into<String>, role: ContactRole) -> Self {
        Self {
            id: ContactId::new_v7(),
            name: name.into(),
            role,
        }
    }

    /// Returns true if this contact is an agent
    pub fn is_agent(&self) -> bool {
        self.role == ContactRole::Agent
    }
}
