//! # splitledger-types
//!
//! Shared types, errors, and configuration for the **SplitLedger** debt
//! settlement engine.
//!
//! This crate is the leaf dependency of the workspace; every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`ParticipantId`], [`ExpenseId`]
//! - **Ledger model**: [`Participant`], [`Expense`], [`Share`], [`LedgerSnapshot`]
//! - **Derived state**: [`BalanceMap`], [`Transaction`]
//! - **Configuration**: [`SettlementConfig`], [`RoundingMode`]
//! - **Errors**: [`LedgerError`] with `SL_ERR_` prefix codes
//! - **Constants**: tolerance and rounding defaults

pub mod balance;
pub mod config;
pub mod constants;
pub mod error;
pub mod expense;
pub mod ids;
pub mod transaction;

// Re-export all primary types at crate root for ergonomic imports:
//   use splitledger_types::{BalanceMap, Expense, Transaction, ...};

pub use balance::*;
pub use config::*;
pub use error::*;
pub use expense::*;
pub use ids::*;
pub use transaction::*;

// Constants are accessed via `splitledger_types::constants::FOO`
// (not re-exported to avoid name collisions).
