//! Settlement transactions produced by the transaction minimizer.
//!
//! A [`Transaction`] is one recommended payment: `from` (a debtor) pays
//! `to` (a creditor) `amount`. Plans are derived on demand and never stored.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ParticipantId;

/// One "A pays B amount X" instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// The debtor making the payment.
    pub from: ParticipantId,
    /// The creditor receiving it.
    pub to: ParticipantId,
    /// Always positive, rounded to the configured scale.
    pub amount: Decimal,
}

impl Transaction {
    #[must_use]
    pub fn new(from: ParticipantId, to: ParticipantId, amount: Decimal) -> Self {
        Self { from, to, amount }
    }

    /// Whether this payment touches the given participant.
    #[must_use]
    pub fn involves(&self, id: ParticipantId) -> bool {
        self.from == id || self.to == id
    }
}

impl std::fmt::Display for Transaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} pays {} {}", self.from, self.to, self.amount)
    }
}
