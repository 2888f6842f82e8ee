//! Configuration for the settlement engine.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::{LedgerError, Result, constants};

/// How emitted settlement amounts are rounded to `amount_scale` places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// 0.125 -> 0.13, -0.125 -> -0.13.
    #[default]
    MidpointAwayFromZero,
    /// Banker's rounding: 0.125 -> 0.12, 0.135 -> 0.14.
    MidpointNearestEven,
    /// Truncate: 0.129 -> 0.12.
    ToZero,
}

impl RoundingMode {
    #[must_use]
    pub fn strategy(self) -> RoundingStrategy {
        match self {
            Self::MidpointAwayFromZero => RoundingStrategy::MidpointAwayFromZero,
            Self::MidpointNearestEven => RoundingStrategy::MidpointNearestEven,
            Self::ToZero => RoundingStrategy::ToZero,
        }
    }
}

/// Knobs shared by the balance aggregator and the transaction minimizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettlementConfig {
    /// Balances within `±tolerance` count as settled.
    pub tolerance: Decimal,
    /// Decimal places kept on each emitted transaction amount.
    pub amount_scale: u32,
    /// Rounding applied once per emitted amount.
    pub rounding: RoundingMode,
    /// Reject expenses whose shares do not add up to the amount.
    /// When off, mismatches are only logged.
    pub enforce_share_totals: bool,
}

impl Default for SettlementConfig {
    fn default() -> Self {
        Self {
            tolerance: constants::DEFAULT_TOLERANCE,
            amount_scale: constants::DEFAULT_AMOUNT_SCALE,
            rounding: RoundingMode::default(),
            enforce_share_totals: false,
        }
    }
}

impl SettlementConfig {
    /// Default config with share-total enforcement switched on.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            enforce_share_totals: true,
            ..Self::default()
        }
    }

    /// Parse a JSON config. Missing fields fall back to defaults.
    ///
    /// # Errors
    /// `Serialization` for malformed JSON, `Configuration` for values that
    /// fail [`SettlementConfig::validate`].
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the values are usable.
    pub fn validate(&self) -> Result<()> {
        if self.tolerance < Decimal::ZERO {
            return Err(LedgerError::Configuration(format!(
                "tolerance must be non-negative, got {}",
                self.tolerance
            )));
        }
        if self.amount_scale > constants::MAX_AMOUNT_SCALE {
            return Err(LedgerError::Configuration(format!(
                "amount_scale must be at most {}, got {}",
                constants::MAX_AMOUNT_SCALE,
                self.amount_scale
            )));
        }
        Ok(())
    }

    /// Round a settlement amount according to this config.
    #[must_use]
    pub fn round_amount(&self, amount: Decimal) -> Decimal {
        amount.round_dp_with_strategy(self.amount_scale, self.rounding.strategy())
    }
}
