//! # splitledger-ledger
//!
//! **Balance aggregation** for SplitLedger: turns a snapshot of shared
//! expenses into one signed net balance per participant.
//!
//! ## Flow
//!
//! ```text
//! LedgerSnapshot → LedgerValidator (all expenses) → BalanceAggregator → BalanceMap
//! ```
//!
//! - Positive balance: the participant is owed money
//! - Negative balance: the participant owes money
//! - Pending expenses are never validated or applied
//!
//! Pure and synchronous: no I/O, no shared state, safe to call concurrently.

pub mod aggregator;
pub mod validation;

pub use aggregator::{BalanceAggregator, aggregate_balances};
pub use validation::{LedgerValidator, ValidatedExpense};
