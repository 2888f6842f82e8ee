//! Error types for the SplitLedger settlement engine.
//!
//! All errors use the `SL_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Participant errors
//! - 2xx: Expense errors
//! - 6xx: Settlement errors
//! - 9xx: General / internal errors

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{ExpenseId, ParticipantId};

/// Central error enum for all SplitLedger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    // =================================================================
    // Participant Errors (1xx)
    // =================================================================
    /// An expense names a payer or share holder outside the participant set.
    #[error("SL_ERR_100: Unknown participant {participant} referenced by {expense}")]
    UnknownParticipant {
        expense: ExpenseId,
        participant: ParticipantId,
    },

    /// The same participant id appears twice in the participant list.
    #[error("SL_ERR_101: Duplicate participant: {0}")]
    DuplicateParticipant(ParticipantId),

    /// No display name is known for a participant in a settlement plan.
    #[error("SL_ERR_102: No display name for {0}")]
    UnlabeledParticipant(ParticipantId),

    // =================================================================
    // Expense Errors (2xx)
    // =================================================================
    /// A non-pending expense has no payer.
    #[error("SL_ERR_200: Expense has no payer but is not pending: {0}")]
    MissingPayer(ExpenseId),

    /// A negative amount or share.
    #[error("SL_ERR_201: Invalid amount in {expense}: {reason}")]
    InvalidAmount { expense: ExpenseId, reason: String },

    /// Shares do not add up to the expense amount.
    #[error("SL_ERR_202: Shares of {expense} total {shares_total}, expected {amount}")]
    ShareTotalMismatch {
        expense: ExpenseId,
        amount: Decimal,
        shares_total: Decimal,
    },

    /// Amounts of an expense exceed the representable decimal range.
    #[error("SL_ERR_203: Amounts in {0} overflow the decimal range")]
    AmountOverflow(ExpenseId),

    // =================================================================
    // Settlement Errors (6xx)
    // =================================================================
    /// Credits and debits of a balance map do not cancel out.
    #[error("SL_ERR_600: Unbalanced ledger: credits {credits} != debits {debits}")]
    UnbalancedLedger { credits: Decimal, debits: Decimal },

    /// A balance or balance total left the representable decimal range.
    #[error("SL_ERR_601: Balance of {0} overflows the decimal range")]
    BalanceOverflow(ParticipantId),

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Serialization / deserialization error.
    #[error("SL_ERR_901: Serialization error: {0}")]
    Serialization(String),

    /// Configuration error (malformed config, out-of-range values).
    #[error("SL_ERR_902: Configuration error: {0}")]
    Configuration(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, LedgerError>;

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
