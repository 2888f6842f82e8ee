//! Input validation gate for the balance aggregator.
//!
//! Every non-pending expense passes through [`LedgerValidator`] before any
//! balance is touched. The gate is fail-closed: the first bad record aborts
//! the whole aggregation, so callers never see a partially applied map.

use std::collections::HashSet;

use rust_decimal::Decimal;
use splitledger_types::{Expense, LedgerError, ParticipantId, Result, SettlementConfig};

/// A non-pending expense that passed validation, with its payer resolved.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedExpense<'a> {
    pub payer: ParticipantId,
    pub expense: &'a Expense,
}

/// Checks expenses against the known participant set.
pub struct LedgerValidator<'c> {
    known: HashSet<ParticipantId>,
    config: &'c SettlementConfig,
}

impl<'c> LedgerValidator<'c> {
    /// Build a validator for the given participants.
    ///
    /// # Errors
    /// Returns [`LedgerError::DuplicateParticipant`] if an id repeats.
    pub fn new(participants: &[ParticipantId], config: &'c SettlementConfig) -> Result<Self> {
        let mut known = HashSet::with_capacity(participants.len());
        for &id in participants {
            if !known.insert(id) {
                return Err(LedgerError::DuplicateParticipant(id));
            }
        }
        Ok(Self { known, config })
    }

    #[must_use]
    pub fn is_known(&self, id: ParticipantId) -> bool {
        self.known.contains(&id)
    }

    /// Validate one expense.
    ///
    /// Returns `Ok(None)` for pending expenses: they are excluded from
    /// balances and are not inspected at all.
    ///
    /// # Errors
    /// - `InvalidAmount` for a negative amount or share
    /// - `MissingPayer` for a non-pending expense without payer
    /// - `UnknownParticipant` for a payer or share holder outside the group
    /// - `ShareTotalMismatch` when share totals are enforced and off by more
    ///   than the tolerance
    /// - `AmountOverflow` when the shares cannot be summed
    pub fn validate_expense<'a>(
        &self,
        expense: &'a Expense,
    ) -> Result<Option<ValidatedExpense<'a>>> {
        if expense.pending {
            return Ok(None);
        }

        if expense.amount < Decimal::ZERO {
            return Err(LedgerError::InvalidAmount {
                expense: expense.id,
                reason: format!("negative amount {}", expense.amount),
            });
        }

        let payer = expense.payer_id.ok_or(LedgerError::MissingPayer(expense.id))?;
        self.ensure_known(expense, payer)?;

        for share in &expense.shares {
            self.ensure_known(expense, share.participant_id)?;
            if share.share < Decimal::ZERO {
                return Err(LedgerError::InvalidAmount {
                    expense: expense.id,
                    reason: format!(
                        "negative share {} for {}",
                        share.share, share.participant_id
                    ),
                });
            }
        }

        let shares_total = expense
            .shares_total()
            .ok_or(LedgerError::AmountOverflow(expense.id))?;
        let unallocated = expense.amount - shares_total;
        if unallocated.abs() > self.config.tolerance {
            if self.config.enforce_share_totals {
                return Err(LedgerError::ShareTotalMismatch {
                    expense: expense.id,
                    amount: expense.amount,
                    shares_total,
                });
            }
            tracing::warn!(
                expense = %expense.id,
                amount = %expense.amount,
                shares_total = %shares_total,
                "Shares do not add up to expense amount; balances will not net to zero"
            );
        }

        Ok(Some(ValidatedExpense { payer, expense }))
    }

    fn ensure_known(&self, expense: &Expense, participant: ParticipantId) -> Result<()> {
        if self.is_known(participant) {
            Ok(())
        } else {
            Err(LedgerError::UnknownParticipant {
                expense: expense.id,
                participant,
            })
        }
    }
}
