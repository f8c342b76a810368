//! Strongly-typed identifier for transaction records
//!
//! Identifiers are opaque to the ledger: callers supply them when adding a
//! record, and the store only relies on equality.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

const DISPLAY_PREFIX: &str = "txn-";

/// Unique identifier of a transaction record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(Uuid);

impl TransactionId {
    /// Create a new random ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create an ID from an existing UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Parse an ID from a string
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }

    /// Short form used in listings, e.g. `txn-1a2b3c4d`
    pub fn short(&self) -> String {
        format!("{}{}", DISPLAY_PREFIX, &self.0.to_string()[..8])
    }

    /// Check whether a user-typed reference (full UUID, short form or bare
    /// prefix) points at this ID
    pub fn matches_prefix(&self, reference: &str) -> bool {
        let reference = reference.trim();
        let reference = reference.strip_prefix(DISPLAY_PREFIX).unwrap_or(reference);
        !reference.is_empty() && self.0.to_string().starts_with(&reference.to_lowercase())
    }
}

impl Default for TransactionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for TransactionId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl FromStr for TransactionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_prefix(DISPLAY_PREFIX).unwrap_or(s);
        Ok(Self(Uuid::parse_str(s)?))
    }
}
