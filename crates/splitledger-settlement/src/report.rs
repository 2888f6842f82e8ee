//! One-call settlement pipeline.
//!
//! ```text
//! LedgerSnapshot → BalanceAggregator → BalanceMap → TransactionMinimizer → plan
//!                                          └──────→ Reconciliation
//! ```
//!
//! The report bundles the balances and the plan the way a "show me who owes
//! whom" request needs them. Nothing is cached; every call recomputes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use splitledger_ledger::BalanceAggregator;
use splitledger_types::{BalanceMap, LedgerSnapshot, Result, SettlementConfig, Transaction};

use crate::digest::plan_root_hex;
use crate::minimizer::TransactionMinimizer;
use crate::reconciliation::{Reconciliation, apply_transactions, is_fully_settled};

/// Balances, settlement plan and bookkeeping for one ledger snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementReport {
    /// Net balance per participant, in participant order.
    pub balances: BalanceMap,
    /// Ordered "from pays to amount" instructions.
    pub transactions: Vec<Transaction>,
    /// Credit/debit totals of `balances`.
    pub reconciliation: Reconciliation,
    /// Hex SHA-256 root of `transactions`.
    pub plan_root: String,
    pub computed_at: DateTime<Utc>,
}

impl SettlementReport {
    /// Balances after every planned payment is made.
    ///
    /// # Errors
    /// `BalanceOverflow` if applying the plan leaves the decimal range.
    pub fn settled_balances(&self) -> Result<BalanceMap> {
        apply_transactions(&self.balances, &self.transactions)
    }

    /// Whether executing the plan leaves everyone within `tolerance`.
    #[must_use]
    pub fn settles_everyone(&self, tolerance: rust_decimal::Decimal) -> bool {
        self.settled_balances().is_ok_and(|settled| is_fully_settled(&settled, tolerance))
    }
}

/// Aggregate, minimize and reconcile a ledger snapshot.
///
/// # Errors
/// `Configuration` for an invalid config, `BalanceOverflow` when the
/// balance totals leave the decimal range, otherwise any aggregation error.
/// An unbalanced ledger is not an error here; inspect
/// [`SettlementReport::reconciliation`].
pub fn settle_ledger(
    snapshot: &LedgerSnapshot,
    config: &SettlementConfig,
) -> Result<SettlementReport> {
    config.validate()?;

    let balances = BalanceAggregator::new(config.clone()).aggregate_snapshot(snapshot)?;
    let transactions = TransactionMinimizer::new(config.clone()).minimize(&balances);
    let reconciliation = Reconciliation::of(&balances)?;

    if !reconciliation.is_balanced(config.tolerance) {
        tracing::warn!(
            credits = %reconciliation.total_credits,
            debits = %reconciliation.total_debits,
            "Ledger does not reconcile; plan leaves a residual"
        );
    }

    let plan_root = plan_root_hex(&transactions);
    tracing::info!(
        participants = balances.len(),
        transactions = transactions.len(),
        plan_root = %plan_root,
        "Settlement report ready"
    );

    Ok(SettlementReport {
        balances,
        transactions,
        reconciliation,
        plan_root,
        computed_at: Utc::now(),
    })
}
