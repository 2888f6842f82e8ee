//! Settlement plan digests.
//!
//! Plans are recomputed on every read, so callers cannot compare stored
//! rows to tell whether anything changed. The `plan_root` is a SHA-256 hash
//! over the plan that answers that without comparing full payloads.

use sha2::{Digest, Sha256};
use splitledger_types::{Transaction, constants};

/// Compute the root hash of a settlement plan.
///
/// Depends on, in order:
/// - the number of transactions
/// - each transaction's payer, payee and amount
///
/// Amounts are normalized first, so `30` and `30.00` hash identically.
#[must_use]
pub fn compute_plan_root(plan: &[Transaction]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(constants::PLAN_ROOT_DOMAIN);
    hasher.update((plan.len() as u64).to_le_bytes());

    for tx in plan {
        hasher.update(tx.from.0.to_le_bytes());
        hasher.update(tx.to.0.to_le_bytes());
        hasher.update(tx.amount.normalize().serialize());
    }

    let result = hasher.finalize();
    let mut root = [0u8; 32];
    root.copy_from_slice(&result);
    root
}

/// Hex-encoded [`compute_plan_root`].
#[must_use]
pub fn plan_root_hex(plan: &[Transaction]) -> String {
    hex::encode(compute_plan_root(plan))
}

/// Recompute the root and compare with `expected_root`.
#[must_use]
pub fn verify_plan_root(plan: &[Transaction], expected_root: &[u8; 32]) -> bool {
    compute_plan_root(plan) == *expected_root
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use splitledger_types::ParticipantId;

    use super::*;

    fn tx(from: u64, to: u64, cents: i64) -> Transaction {
        Transaction::new(ParticipantId(from), ParticipantId(to), Decimal::new(cents, 2))
    }

    #[test]
    fn empty_plan_deterministic() {
        assert_eq!(compute_plan_root(&[]), compute_plan_root(&[]));
    }

    #[test]
    fn same_plan_same_root() {
        let plan = vec![tx(2, 1, 3000), tx(3, 1, 3000)];
        assert_eq!(compute_plan_root(&plan), compute_plan_root(&plan.clone()));
    }

    #[test]
    fn order_matters() {
        let a = tx(2, 1, 3000);
        let b = tx(3, 1, 3000);
        assert_ne!(compute_plan_root(&[a, b]), compute_plan_root(&[b, a]));
    }

    #[test]
    fn direction_matters() {
        assert_ne!(
            compute_plan_root(&[tx(2, 1, 500)]),
            compute_plan_root(&[tx(1, 2, 500)])
        );
    }

    #[test]
    fn scale_does_not_matter() {
        let whole = Transaction::new(ParticipantId(2), ParticipantId(1), Decimal::new(30, 0));
        assert_eq!(
            compute_plan_root(&[whole]),
            compute_plan_root(&[tx(2, 1, 3000)])
        );
    }

    #[test]
    fn verify_roundtrip() {
        let plan = vec![tx(2, 1, 1250)];
        let root = compute_plan_root(&plan);
        assert!(verify_plan_root(&plan, &root));
        assert!(!verify_plan_root(&plan, &[0xAB; 32]));
    }

    #[test]
    fn hex_root_is_64_chars() {
        assert_eq!(plan_root_hex(&[tx(2, 1, 1)]).len(), 64);
    }
}
