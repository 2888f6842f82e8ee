//! System-wide constants for the SplitLedger settlement engine.

use rust_decimal::Decimal;

/// Balances within `±DEFAULT_TOLERANCE` are treated as settled (one cent).
pub const DEFAULT_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Decimal places kept on every emitted settlement amount.
pub const DEFAULT_AMOUNT_SCALE: u32 = 2;

/// Largest scale `rust_decimal` can represent.
pub const MAX_AMOUNT_SCALE: u32 = 28;

/// Category assigned to expenses that arrive without one.
pub const DEFAULT_CATEGORY: &str = "General";

/// Domain tag mixed into every settlement plan digest.
pub const PLAN_ROOT_DOMAIN: &[u8] = b"splitledger:plan_root:v1:";
