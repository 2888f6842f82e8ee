//! Ledger model: participants, expenses and their per-person shares.
//!
//! The expense store owns these records; the engine only ever borrows a
//! [`LedgerSnapshot`] taken upstream in a single read.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{ExpenseId, ParticipantId, constants};

/// A person in the group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    /// Display name. Only used when labelling a finished settlement plan.
    pub name: String,
}

impl Participant {
    #[must_use]
    pub fn new(id: ParticipantId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// The portion of an expense attributed to one participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Share {
    pub participant_id: ParticipantId,
    pub share: Decimal,
}

impl Share {
    #[must_use]
    pub fn new(participant_id: ParticipantId, share: Decimal) -> Self {
        Self {
            participant_id,
            share,
        }
    }
}

/// A single shared expense.
///
/// Upstream split logic is expected to make `shares` add up to `amount`
/// with every share non-negative. A pending expense is a bill nobody has
/// paid yet and never contributes to balances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    /// Total cost of the expense.
    pub amount: Decimal,
    /// Who fronted the money. `None` is only meaningful while pending.
    pub payer_id: Option<ParticipantId>,
    #[serde(default)]
    pub pending: bool,
    /// Per-participant consumption, in entry order.
    pub shares: Vec<Share>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_category")]
    pub category: String,
    pub incurred_at: DateTime<Utc>,
}

fn default_category() -> String {
    constants::DEFAULT_CATEGORY.to_string()
}

impl Expense {
    /// An expense already paid by `payer`.
    #[must_use]
    pub fn paid(payer: ParticipantId, amount: Decimal, shares: Vec<Share>) -> Self {
        Self {
            id: ExpenseId::new(),
            amount,
            payer_id: Some(payer),
            pending: false,
            shares,
            description: None,
            category: default_category(),
            incurred_at: Utc::now(),
        }
    }

    /// A bill entered before anyone paid it.
    #[must_use]
    pub fn pending(amount: Decimal, shares: Vec<Share>) -> Self {
        Self {
            id: ExpenseId::new(),
            amount,
            payer_id: None,
            pending: true,
            shares,
            description: None,
            category: default_category(),
            incurred_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Sum of all shares, `None` on overflow.
    #[must_use]
    pub fn shares_total(&self) -> Option<Decimal> {
        self.shares
            .iter()
            .try_fold(Decimal::ZERO, |acc, s| acc.checked_add(s.share))
    }

    /// `amount - shares_total()`. Zero when the split is consistent.
    #[must_use]
    pub fn unallocated(&self) -> Option<Decimal> {
        self.amount.checked_sub(self.shares_total()?)
    }
}

/// A consistent read of the ledger handed to the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub participants: Vec<Participant>,
    pub expenses: Vec<Expense>,
}

impl LedgerSnapshot {
    #[must_use]
    pub fn new(participants: Vec<Participant>, expenses: Vec<Expense>) -> Self {
        Self {
            participants,
            expenses,
        }
    }

    /// Participant ids in snapshot order.
    pub fn participant_ids(&self) -> impl Iterator<Item = ParticipantId> + '_ {
        self.participants.iter().map(|p| p.id)
    }

    /// Expenses that count toward balances.
    pub fn settled_expenses(&self) -> impl Iterator<Item = &Expense> {
        self.expenses.iter().filter(|e| !e.pending)
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl Expense {
    /// Paid expense split evenly over `members`. `amount` must divide exactly.
    pub fn dummy_even_split(
        payer: ParticipantId,
        amount: Decimal,
        members: &[ParticipantId],
    ) -> Self {
        let each = amount / Decimal::from(members.len());
        let shares = members.iter().map(|&m| Share::new(m, each)).collect();
        Self::paid(payer, amount, shares)
    }
}

/// Random ledgers for property-style tests. **Never use in production.**
#[cfg(any(test, feature = "test-helpers"))]
impl LedgerSnapshot {
    /// Builds a ledger whose shares always add up to each expense amount.
    ///
    /// Amounts are whole cents; roughly one expense in ten is pending.
    pub fn dummy_random<R: rand::Rng>(
        rng: &mut R,
        participant_count: usize,
        expense_count: usize,
    ) -> Self {
        assert!(participant_count > 0, "need at least one participant");
        let participants: Vec<Participant> = (1..=participant_count as u64)
            .map(|id| Participant::new(ParticipantId(id), format!("member-{id}")))
            .collect();

        let mut expenses = Vec::with_capacity(expense_count);
        for _ in 0..expense_count {
            let cents: i64 = rng.gen_range(1..=100_000);
            let payer = participants[rng.gen_range(0..participant_count)].id;

            let mut members: Vec<ParticipantId> = participants
                .iter()
                .filter(|_| rng.gen_bool(0.6))
                .map(|p| p.id)
                .collect();
            if members.is_empty() {
                members.push(payer);
            }

            let count = members.len() as i64;
            let base = cents / count;
            let remainder = cents % count;
            let shares = members
                .iter()
                .enumerate()
                .map(|(idx, &m)| {
                    let extra = i64::from((idx as i64) < remainder);
                    Share::new(m, Decimal::new(base + extra, 2))
                })
                .collect();

            let amount = Decimal::new(cents, 2);
            let expense = if rng.gen_bool(0.1) {
                Expense::pending(amount, shares)
            } else {
                Expense::paid(payer, amount, shares)
            };
            expenses.push(expense);
        }

        Self::new(participants, expenses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[u64]) -> Vec<ParticipantId> {
        raw.iter().copied().map(ParticipantId).collect()
    }

    #[test]
    fn paid_expense_defaults() {
        let e = Expense::paid(ParticipantId(1), Decimal::new(90, 0), vec![]);
        assert_eq!(e.payer_id, Some(ParticipantId(1)));
        assert!(!e.pending);
        assert_eq!(e.category, "General");
        assert!(e.description.is_none());
    }

    #[test]
    fn pending_expense_has_no_payer() {
        let e = Expense::pending(Decimal::new(40, 0), vec![]);
        assert!(e.pending);
        assert!(e.payer_id.is_none());
    }

    #[test]
    fn shares_total_and_unallocated() {
        let e = Expense::paid(
            ParticipantId(1),
            Decimal::new(100, 0),
            vec![
                Share::new(ParticipantId(1), Decimal::new(3333, 2)),
                Share::new(ParticipantId(2), Decimal::new(3333, 2)),
                Share::new(ParticipantId(3), Decimal::new(3333, 2)),
            ],
        );
        assert_eq!(e.shares_total(), Some(Decimal::new(9999, 2)));
        assert_eq!(e.unallocated(), Some(Decimal::new(1, 2)));
    }

    #[test]
    fn shares_total_overflow_is_none() {
        let e = Expense::paid(
            ParticipantId(1),
            Decimal::ONE,
            vec![
                Share::new(ParticipantId(1), Decimal::MAX),
                Share::new(ParticipantId(2), Decimal::MAX),
            ],
        );
        assert_eq!(e.shares_total(), None);
        assert_eq!(e.unallocated(), None);
    }

    #[test]
    fn even_split_helper() {
        let e = Expense::dummy_even_split(ParticipantId(1), Decimal::new(90, 0), &ids(&[1, 2, 3]));
        assert_eq!(e.shares.len(), 3);
        assert!(e.shares.iter().all(|s| s.share == Decimal::new(30, 0)));
        assert_eq!(e.unallocated(), Some(Decimal::ZERO));
    }

    #[test]
    fn random_ledger_shares_are_consistent() {
        let mut rng = rand::thread_rng();
        let snapshot = LedgerSnapshot::dummy_random(&mut rng, 5, 50);
        assert_eq!(snapshot.participants.len(), 5);
        assert_eq!(snapshot.expenses.len(), 50);
        for e in &snapshot.expenses {
            assert_eq!(e.unallocated(), Some(Decimal::ZERO), "inconsistent split: {e:?}");
            assert!(e.shares.iter().all(|s| !s.share.is_sign_negative()));
        }
    }

    #[test]
    fn settled_expenses_skip_pending() {
        let snapshot = LedgerSnapshot::new(
            vec![Participant::new(ParticipantId(1), "A")],
            vec![
                Expense::pending(Decimal::ONE, vec![]),
                Expense::paid(
                    ParticipantId(1),
                    Decimal::ONE,
                    vec![Share::new(ParticipantId(1), Decimal::ONE)],
                ),
            ],
        );
        assert_eq!(snapshot.settled_expenses().count(), 1);
        assert_eq!(snapshot.participant_ids().collect::<Vec<_>>(), ids(&[1]));
    }

    #[test]
    fn expense_deserializes_with_defaults() {
        let json = r#"{
            "id": "01890000-0000-7000-8000-000000000000",
            "amount": "12.50",
            "payer_id": 3,
            "shares": [{ "participant_id": 3, "share": "12.50" }],
            "incurred_at": "2024-05-01T12:00:00Z"
        }"#;
        let e: Expense = serde_json::from_str(json).unwrap();
        assert!(!e.pending);
        assert_eq!(e.category, "General");
        assert_eq!(e.amount, Decimal::new(1250, 2));
        assert_eq!(e.payer_id, Some(ParticipantId(3)));
    }
}
