//! Position merge request and argument parsing

use alloy::primitives::{B256, U256};

use crate::error::{Error, Result};

/// A request to merge `amount` of both outcome positions of a market
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionMergeRequest {
    /// Amount of each position to merge, in raw token units
    pub amount: U256,
    /// Market condition identifier
    pub condition_id: B256,
    /// Whether the market goes through the neg-risk adapter
    pub is_neg_risk_market: bool,
}

impl PositionMergeRequest {
    /// Creates a new merge request
    pub fn new(amount: U256, condition_id: B256, is_neg_risk_market: bool) -> Self {
        Self {
            amount,
            condition_id,
            is_neg_risk_market,
        }
    }

    /// Parses a merge request from its three textual arguments
    pub fn parse(amount: &str, condition_id: &str, is_neg_risk_market: &str) -> Result<Self> {
        Ok(Self::new(
            parse_amount(amount)?,
            parse_condition_id(condition_id)?,
            parse_neg_risk_flag(is_neg_risk_market),
        ))
    }
}

/// Parses a raw amount (supports decimal and `0x` hex)
pub fn parse_amount(s: &str) -> Result<U256> {
    let s = s.trim();
    if s.is_empty() {
        return Err(Error::InvalidInput("amount is empty".to_string()));
    }
    let (digits, radix) = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => (hex, 16),
        None => (s, 10),
    };
    // from_str_radix accepts an empty string and `_` separators
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(Error::InvalidInput(format!("invalid amount '{s}'")));
    }
    let parsed = U256::from_str_radix(digits, u64::from(radix));
    parsed.map_err(|e| Error::InvalidInput(format!("invalid amount '{s}': {e}")))
}

/// Parses a 32-byte condition ID, with or without `0x` prefix
pub fn parse_condition_id(s: &str) -> Result<B256> {
    let s = s.trim();
    let hex = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    if hex.len() != 64 {
        return Err(Error::InvalidInput(format!(
            "condition ID must be 32 bytes, got {} hex characters",
            hex.len()
        )));
    }
    hex.parse::<B256>()
        .map_err(|e| Error::InvalidInput(format!("invalid condition ID '{s}': {e}")))
}

/// Parses the neg-risk flag; only a case-insensitive `true` selects the adapter
pub fn parse_neg_risk_flag(s: &str) -> bool {
    s.trim().eq_ignore_ascii_case("true")
}
