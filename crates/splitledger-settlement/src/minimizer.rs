//! Transaction minimizer: balance map → ordered settlement plan.
//!
//! Two-pointer greedy cash-flow reduction:
//! 1. Split participants into creditors (balance > tolerance) and debtors
//!    (balance < -tolerance), both in balance-map order
//! 2. Pair the current debtor with the current creditor and move
//!    `min(debt, credit)` between them
//! 3. Advance whichever side dropped below tolerance (possibly both)
//!
//! The plan has at most `creditors + debtors - 1` entries. This is a
//! heuristic: it is not guaranteed to find the true minimum number of
//! payments, which is NP-hard in general.
//!
//! Balances inside the settled band are dropped individually, so several of
//! them can add up to more than the tolerance. With `{+10, -0.01, -0.01,
//! -9.98}` the plan is a single 9.98 payment and the creditor is left at
//! 0.02 afterwards. Callers needing a hard guarantee check the result with
//! `is_fully_settled`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use splitledger_types::{BalanceMap, ParticipantId, SettlementConfig, Transaction};

/// One side of the matching: who, and how much is still open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenPosition {
    pub id: ParticipantId,
    /// Always positive: credit for creditors, debt for debtors.
    pub remaining: Decimal,
}

/// Participants outside the settled band, in balance-map order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub creditors: Vec<OpenPosition>,
    pub debtors: Vec<OpenPosition>,
}

impl Classification {
    /// Upper bound on the number of transactions the greedy pass emits.
    #[must_use]
    pub fn max_transactions(&self) -> usize {
        if self.creditors.is_empty() || self.debtors.is_empty() {
            0
        } else {
            self.creditors.len() + self.debtors.len() - 1
        }
    }
}

/// Greedy settlement planner.
#[derive(Debug, Clone, Default)]
pub struct TransactionMinimizer {
    config: SettlementConfig,
}

impl TransactionMinimizer {
    #[must_use]
    pub fn new(config: SettlementConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &SettlementConfig {
        &self.config
    }

    /// Partition balances into creditors and debtors.
    ///
    /// Balances inside `[-tolerance, tolerance]` are settled and dropped.
    #[must_use]
    pub fn classify(&self, balances: &BalanceMap) -> Classification {
        let tolerance = self.config.tolerance;
        let mut classification = Classification::default();
        for (id, balance) in balances.iter() {
            if balance > tolerance {
                classification.creditors.push(OpenPosition {
                    id,
                    remaining: balance,
                });
            } else if balance < -tolerance {
                classification.debtors.push(OpenPosition {
                    id,
                    remaining: -balance,
                });
            }
        }
        classification
    }

    /// Produce the settlement plan for `balances`.
    ///
    /// Total over any input. If credits and debits do not cancel out, the
    /// side left over after the other is exhausted stays unmatched and is
    /// reported in the logs.
    #[must_use]
    pub fn minimize(&self, balances: &BalanceMap) -> Vec<Transaction> {
        let Classification {
            mut creditors,
            mut debtors,
        } = self.classify(balances);

        let mut plan = Vec::with_capacity(creditors.len() + debtors.len());
        let mut i = 0; // debtor cursor
        let mut j = 0; // creditor cursor

        while i < debtors.len() && j < creditors.len() {
            let debtor = &mut debtors[i];
            let creditor = &mut creditors[j];

            // Round once, after the min; remainders stay exact.
            let moved = debtor.remaining.min(creditor.remaining);
            let amount = self.config.round_amount(moved);

            if amount > Decimal::ZERO {
                tracing::debug!(
                    from = %debtor.id,
                    to = %creditor.id,
                    amount = %amount,
                    "Settlement transaction planned"
                );
                plan.push(Transaction::new(debtor.id, creditor.id, amount));
            }

            debtor.remaining -= moved;
            creditor.remaining -= moved;

            if self.is_exhausted(debtor.remaining) {
                i += 1;
            }
            if self.is_exhausted(creditor.remaining) {
                j += 1;
            }
        }

        let unmatched_debt = saturating_total(&debtors[i..]);
        let unmatched_credit = saturating_total(&creditors[j..]);
        if unmatched_debt > self.config.tolerance || unmatched_credit > self.config.tolerance {
            tracing::warn!(
                unmatched_debt = %unmatched_debt,
                unmatched_credit = %unmatched_credit,
                "Balances do not net to zero; residual left unmatched"
            );
        }

        tracing::info!(
            creditors = creditors.len(),
            debtors = debtors.len(),
            transactions = plan.len(),
            "Settlement plan computed"
        );

        plan
    }

    // A zero tolerance still has to terminate: an exactly drained side
    // counts as exhausted.
    fn is_exhausted(&self, remaining: Decimal) -> bool {
        remaining < self.config.tolerance || remaining <= Decimal::ZERO
    }
}

// Only feeds the residual warning, so clamping at the range limit is fine.
fn saturating_total(positions: &[OpenPosition]) -> Decimal {
    positions
        .iter()
        .fold(Decimal::ZERO, |acc, p| acc.saturating_add(p.remaining))
}

/// Plan settlement with the default configuration.
#[must_use]
pub fn minimize_transactions(balances: &BalanceMap) -> Vec<Transaction> {
    TransactionMinimizer::default().minimize(balances)
}
