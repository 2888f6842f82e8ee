//! # splitledger-settlement
//!
//! **Settlement planning**: turns net balances into a short list of
//! point-to-point payments and checks that the plan actually settles.
//!
//! ## Architecture
//!
//! 1. [`TransactionMinimizer`] classifies balances into creditors and
//!    debtors and pairs them with a two-pointer greedy pass
//! 2. [`apply_transactions`] / [`Reconciliation`] verify the plan against
//!    the balances it came from
//! 3. [`compute_plan_root`] fingerprints a plan for change detection
//! 4. [`label_transactions`] swaps ids for display names at the edge
//! 5. [`settle_ledger`] runs the whole pipeline over a ledger snapshot
//!
//! The greedy pass is a practical heuristic, not an exact minimum-payment
//! solver.

pub mod digest;
pub mod labels;
pub mod minimizer;
pub mod reconciliation;
pub mod report;

pub use digest::{compute_plan_root, plan_root_hex, verify_plan_root};
pub use labels::{LabeledTransaction, ParticipantDirectory, label_transactions};
pub use minimizer::{Classification, OpenPosition, TransactionMinimizer, minimize_transactions};
pub use reconciliation::{Reconciliation, apply_transactions, is_fully_settled};
pub use report::{SettlementReport, settle_ledger};
