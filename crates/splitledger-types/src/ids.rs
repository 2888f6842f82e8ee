//! Identifiers used throughout SplitLedger.
//!
//! Participants are keyed by the integer row id the expense store hands out.
//! Expenses use UUIDv7 so they sort by creation time and can be named in
//! error messages without exposing storage details.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// ParticipantId
// ---------------------------------------------------------------------------

/// Opaque identifier for a person in the group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(pub u64);

impl ParticipantId {
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for ParticipantId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "participant:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// ExpenseId
// ---------------------------------------------------------------------------

/// Unique expense identifier. Uses UUIDv7 for time-ordered sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct ExpenseId(pub Uuid);

impl ExpenseId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    #[must_use]
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(Uuid::from_bytes(bytes))
    }
}

impl Default for ExpenseId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expense:{}", self.0)
    }
}
