//! Balance aggregation: ledger snapshot → one signed net balance per
//! participant.
//!
//! Algorithm:
//! 1. Every known participant starts at zero, in participant order
//! 2. For each non-pending expense the payer is credited the full amount
//!    and every share holder is debited their share
//! 3. Pending expenses are skipped unconditionally
//!
//! Validation of all expenses happens before the first balance mutation.

use rust_decimal::Decimal;
use splitledger_types::{
    BalanceMap, Expense, LedgerError, LedgerSnapshot, ParticipantId, Result, SettlementConfig,
};

use crate::validation::{LedgerValidator, ValidatedExpense};

/// Reduces a ledger of expenses to net balances.
///
/// Stateless apart from its configuration; every call builds a fresh map.
#[derive(Debug, Clone, Default)]
pub struct BalanceAggregator {
    config: SettlementConfig,
}

impl BalanceAggregator {
    #[must_use]
    pub fn new(config: SettlementConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &SettlementConfig {
        &self.config
    }

    /// Compute the balance map for `participants` over `expenses`.
    ///
    /// The result has exactly one entry per participant, in the given order.
    ///
    /// # Errors
    /// Any validation failure from [`LedgerValidator`], or `AmountOverflow`
    /// when a balance leaves the decimal range. Nothing is returned on
    /// error, not even a partial map.
    pub fn aggregate(
        &self,
        participants: &[ParticipantId],
        expenses: &[Expense],
    ) -> Result<BalanceMap> {
        let validator = LedgerValidator::new(participants, &self.config)?;

        let mut applicable: Vec<ValidatedExpense<'_>> = Vec::with_capacity(expenses.len());
        for expense in expenses {
            match validator.validate_expense(expense)? {
                Some(valid) => applicable.push(valid),
                None => tracing::debug!(
                    expense = %expense.id,
                    amount = %expense.amount,
                    "Skipping pending expense"
                ),
            }
        }

        let mut balances = BalanceMap::zeroed(participants.iter().copied());
        let mut volume = Decimal::ZERO;
        for ValidatedExpense { payer, expense } in &applicable {
            let overflow = || {
                tracing::warn!(expense = %expense.id, "Balance overflow while aggregating");
                LedgerError::AmountOverflow(expense.id)
            };
            balances.credit(*payer, expense.amount).ok_or_else(overflow)?;
            for share in &expense.shares {
                balances.debit(share.participant_id, share.share).ok_or_else(overflow)?;
            }
            volume = volume.saturating_add(expense.amount);
        }

        tracing::info!(
            participants = balances.len(),
            expenses = applicable.len(),
            pending = expenses.len() - applicable.len(),
            volume = %volume,
            "Balances aggregated"
        );

        Ok(balances)
    }

    /// [`BalanceAggregator::aggregate`] over a whole snapshot.
    pub fn aggregate_snapshot(&self, snapshot: &LedgerSnapshot) -> Result<BalanceMap> {
        let participants: Vec<ParticipantId> = snapshot.participant_ids().collect();
        self.aggregate(&participants, &snapshot.expenses)
    }
}

/// Aggregate with the default configuration.
pub fn aggregate_balances(
    participants: &[ParticipantId],
    expenses: &[Expense],
) -> Result<BalanceMap> {
    BalanceAggregator::default().aggregate(participants, expenses)
}
