//! Display-name labelling for finished settlement plans.
//!
//! The engine computes on identifiers only. Request handlers translate a
//! plan to names as the very last step, through a [`ParticipantDirectory`].

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use splitledger_types::{LedgerError, Participant, ParticipantId, Result, Transaction};

/// Id → display name lookup.
#[derive(Debug, Clone, Default)]
pub struct ParticipantDirectory {
    names: HashMap<ParticipantId, String>,
}

impl ParticipantDirectory {
    #[must_use]
    pub fn from_participants(participants: &[Participant]) -> Self {
        Self {
            names: participants
                .iter()
                .map(|p| (p.id, p.name.clone()))
                .collect(),
        }
    }

    #[must_use]
    pub fn name(&self, id: ParticipantId) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    fn require(&self, id: ParticipantId) -> Result<String> {
        self.name(id)
            .map(str::to_owned)
            .ok_or(LedgerError::UnlabeledParticipant(id))
    }
}

/// A settlement transaction with names instead of ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledTransaction {
    pub from: String,
    pub to: String,
    pub amount: Decimal,
}

/// Replace ids with display names, preserving plan order.
///
/// # Errors
/// Returns [`LedgerError::UnlabeledParticipant`] for an id the directory
/// does not know.
pub fn label_transactions(
    plan: &[Transaction],
    directory: &ParticipantDirectory,
) -> Result<Vec<LabeledTransaction>> {
    plan.iter()
        .map(|tx| {
            Ok(LabeledTransaction {
                from: directory.require(tx.from)?,
                to: directory.require(tx.to)?,
                amount: tx.amount,
            })
        })
        .collect()
}
