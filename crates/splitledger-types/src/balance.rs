//! Net balance map produced by the balance aggregator.
//!
//! Positive balances are owed to the participant (net creditor), negative
//! balances are owed by the participant (net debtor). Entries keep the order
//! in which participants were first inserted; the minimizer's tie-break
//! depends on it.

use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ParticipantId;

/// Insertion-ordered mapping from participant to signed net balance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BalanceMap {
    entries: IndexMap<ParticipantId, Decimal>,
}

impl BalanceMap {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Every participant starts at zero, in the given order.
    pub fn zeroed(participants: impl IntoIterator<Item = ParticipantId>) -> Self {
        participants
            .into_iter()
            .map(|id| (id, Decimal::ZERO))
            .collect()
    }

    /// Balance for a participant, zero when absent.
    #[must_use]
    pub fn get(&self, id: ParticipantId) -> Decimal {
        self.entries.get(&id).copied().unwrap_or(Decimal::ZERO)
    }

    #[must_use]
    pub fn contains(&self, id: ParticipantId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Set a balance, keeping the original position if the id already exists.
    pub fn insert(&mut self, id: ParticipantId, balance: Decimal) {
        self.entries.insert(id, balance);
    }

    /// Add `amount` to the participant's balance (appends unknown ids).
    ///
    /// Returns the new balance, or `None` on overflow with the entry left
    /// untouched.
    #[must_use]
    pub fn credit(&mut self, id: ParticipantId, amount: Decimal) -> Option<Decimal> {
        let entry = self.entries.entry(id).or_insert(Decimal::ZERO);
        *entry = entry.checked_add(amount)?;
        Some(*entry)
    }

    /// Subtract `amount` from the participant's balance (appends unknown ids).
    ///
    /// Returns the new balance, or `None` on overflow with the entry left
    /// untouched.
    #[must_use]
    pub fn debit(&mut self, id: ParticipantId, amount: Decimal) -> Option<Decimal> {
        let entry = self.entries.entry(id).or_insert(Decimal::ZERO);
        *entry = entry.checked_sub(amount)?;
        Some(*entry)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (ParticipantId, Decimal)> + '_ {
        self.entries.iter().map(|(&id, &balance)| (id, balance))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all balances. Zero for a conserved ledger, `None` if the sum
    /// overflows.
    #[must_use]
    pub fn net_total(&self) -> Option<Decimal> {
        self.entries
            .values()
            .try_fold(Decimal::ZERO, |acc, &b| acc.checked_add(b))
    }

    /// Whether every balance lies within `[-tolerance, tolerance]`.
    #[must_use]
    pub fn all_within(&self, tolerance: Decimal) -> bool {
        self.entries.values().all(|b| b.abs() <= tolerance)
    }
}

impl FromIterator<(ParticipantId, Decimal)> for BalanceMap {
    fn from_iter<I: IntoIterator<Item = (ParticipantId, Decimal)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for BalanceMap {
    type Item = (ParticipantId, Decimal);
    type IntoIter = indexmap::map::IntoIter<ParticipantId, Decimal>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
