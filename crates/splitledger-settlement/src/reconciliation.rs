//! Settlement application and reconciliation checks.
//!
//! Conservation invariant for a well-formed ledger:
//! ```text
//! Σ(positive balances) == Σ(|negative balances|)
//! ```
//!
//! The minimizer itself never fails; callers that need a hard guarantee
//! run [`Reconciliation::verify`] before presenting a plan as "fully
//! settled".

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use splitledger_types::{BalanceMap, LedgerError, Result, Transaction};

/// Apply a plan to a balance map and return the resulting balances.
///
/// Each payment raises the payer's balance and lowers the payee's, i.e. it
/// settles what was owed. Participants missing from the map are appended.
///
/// # Errors
/// Returns [`LedgerError::BalanceOverflow`] if a payment pushes a balance
/// out of the decimal range.
pub fn apply_transactions(balances: &BalanceMap, plan: &[Transaction]) -> Result<BalanceMap> {
    let mut next = balances.clone();
    for tx in plan {
        next.credit(tx.from, tx.amount).ok_or(LedgerError::BalanceOverflow(tx.from))?;
        next.debit(tx.to, tx.amount).ok_or(LedgerError::BalanceOverflow(tx.to))?;
    }
    Ok(next)
}

/// Whether every balance lies within `[-tolerance, tolerance]`.
#[must_use]
pub fn is_fully_settled(balances: &BalanceMap, tolerance: Decimal) -> bool {
    balances.all_within(tolerance)
}

/// Credit/debit totals of a balance map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reconciliation {
    /// Sum of positive balances.
    pub total_credits: Decimal,
    /// Sum of the magnitudes of negative balances.
    pub total_debits: Decimal,
    /// `total_credits - total_debits`. Zero for a conserved ledger.
    pub residual: Decimal,
}

impl Reconciliation {
    /// Tally a balance map.
    ///
    /// # Errors
    /// Returns [`LedgerError::BalanceOverflow`] naming the participant whose
    /// balance pushed a total out of the decimal range.
    pub fn of(balances: &BalanceMap) -> Result<Self> {
        let mut total_credits = Decimal::ZERO;
        let mut total_debits = Decimal::ZERO;
        for (id, balance) in balances.iter() {
            if balance > Decimal::ZERO {
                total_credits = total_credits
                    .checked_add(balance)
                    .ok_or(LedgerError::BalanceOverflow(id))?;
            } else {
                total_debits = total_debits
                    .checked_sub(balance)
                    .ok_or(LedgerError::BalanceOverflow(id))?;
            }
        }
        // Both totals are non-negative, so the difference stays in range.
        Ok(Self {
            total_credits,
            total_debits,
            residual: total_credits - total_debits,
        })
    }

    #[must_use]
    pub fn is_balanced(&self, tolerance: Decimal) -> bool {
        self.residual.abs() <= tolerance
    }

    /// Fail when credits and debits differ by more than `tolerance`.
    ///
    /// # Errors
    /// Returns [`LedgerError::UnbalancedLedger`].
    pub fn verify(&self, tolerance: Decimal) -> Result<()> {
        if self.is_balanced(tolerance) {
            Ok(())
        } else {
            Err(LedgerError::UnbalancedLedger {
                credits: self.total_credits,
                debits: self.total_debits,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use splitledger_types::ParticipantId;

    const A: ParticipantId = ParticipantId(1);
    const B: ParticipantId = ParticipantId(2);
    const C: ParticipantId = ParticipantId(3);

    fn dec(n: i64) -> Decimal {
        Decimal::new(n, 0)
    }

    fn cent() -> Decimal {
        Decimal::new(1, 2)
    }

    #[test]
    fn applying_plan_settles_everyone() {
        let balances: BalanceMap = [(A, dec(60)), (B, dec(-30)), (C, dec(-30))]
            .into_iter()
            .collect();
        let plan = vec![
            Transaction::new(B, A, dec(30)),
            Transaction::new(C, A, dec(30)),
        ];
        let after = apply_transactions(&balances, &plan).unwrap();
        assert!(is_fully_settled(&after, cent()));
        // Original map untouched.
        assert_eq!(balances.get(A), dec(60));
    }

    #[test]
    fn partial_plan_is_not_settled() {
        let balances: BalanceMap = [(A, dec(60)), (B, dec(-30)), (C, dec(-30))]
            .into_iter()
            .collect();
        let after = apply_transactions(&balances, &[Transaction::new(B, A, dec(30))]).unwrap();
        assert!(!is_fully_settled(&after, cent()));
        assert_eq!(after.get(A), dec(30));
        assert_eq!(after.get(B), Decimal::ZERO);
    }

    #[test]
    fn apply_appends_unknown_participants() {
        let balances = BalanceMap::new();
        let after = apply_transactions(&balances, &[Transaction::new(B, A, dec(5))]).unwrap();
        assert_eq!(after.get(B), dec(5));
        assert_eq!(after.get(A), dec(-5));
    }

    #[test]
    fn reconciliation_totals() {
        let balances: BalanceMap = [(A, dec(50)), (B, dec(-20)), (C, dec(-30))]
            .into_iter()
            .collect();
        let rec = Reconciliation::of(&balances).unwrap();
        assert_eq!(rec.total_credits, dec(50));
        assert_eq!(rec.total_debits, dec(50));
        assert_eq!(rec.residual, Decimal::ZERO);
        assert!(rec.verify(cent()).is_ok());
    }

    #[test]
    fn reconciliation_detects_imbalance() {
        let balances: BalanceMap = [(A, dec(100)), (B, dec(-30))].into_iter().collect();
        let rec = Reconciliation::of(&balances).unwrap();
        assert_eq!(rec.residual, dec(70));
        let err = rec.verify(cent()).unwrap_err();
        assert!(matches!(err, LedgerError::UnbalancedLedger { .. }));
    }

    #[test]
    fn sub_cent_residual_is_balanced() {
        let balances: BalanceMap = [(A, Decimal::new(10_005, 3)), (B, dec(-10))]
            .into_iter()
            .collect();
        assert!(Reconciliation::of(&balances).unwrap().is_balanced(cent()));
    }

    #[test]
    fn overflowing_credit_total_is_an_error() {
        let balances: BalanceMap = [(A, Decimal::MAX), (B, Decimal::MAX), (C, dec(-1))]
            .into_iter()
            .collect();
        let err = Reconciliation::of(&balances).unwrap_err();
        assert!(matches!(err, LedgerError::BalanceOverflow(B)));
    }

    #[test]
    fn overflowing_payment_is_an_error() {
        let balances: BalanceMap = [(A, -Decimal::MAX), (B, Decimal::ZERO)].into_iter().collect();
        let plan = vec![Transaction::new(B, A, Decimal::ONE)];
        let err = apply_transactions(&balances, &plan).unwrap_err();
        assert!(matches!(err, LedgerError::BalanceOverflow(A)));
    }
}
