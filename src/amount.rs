//! Arbitrary-precision amounts
//!
//! Genesis exports carry every token amount, share count and voting power as a
//! JSON string. Tokens and powers are integers, delegator shares are decimals.
//! Both are parsed into big-number types so that large economies never pass
//! through fixed-width floats.

use crate::error::{GenesisError, Result};
use bigdecimal::BigDecimal;
use num_bigint::BigUint;
use std::str::FromStr;

/// Amount left on records that no longer carry stake.
pub const NOMINAL_AMOUNT: &str = "1";

/// Parse an integer amount (tokens, power, supply). `field` names the
/// location for error reporting.
pub fn parse_integer(field: &str, value: &str) -> Result<BigUint> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(GenesisError::invalid_amount(field, value));
    }
    BigUint::from_str(value).map_err(|_| GenesisError::invalid_amount(field, value))
}

/// Parse a non-negative decimal amount (delegator shares).
pub fn parse_decimal(field: &str, value: &str) -> Result<BigDecimal> {
    let valid_chars = value
        .bytes()
        .all(|b| b.is_ascii_digit() || b == b'.');
    if value.is_empty() || !valid_chars {
        return Err(GenesisError::invalid_amount(field, value));
    }
    BigDecimal::from_str(value).map_err(|_| GenesisError::invalid_amount(field, value))
}

/// Render a decimal without scientific notation, keeping its scale.
pub fn format_decimal(value: &BigDecimal) -> String {
    value.to_plain_string()
}

/// Running totals of an integer and a decimal quantity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StakeTotals {
    pub tokens: BigUint,
    pub shares: BigDecimal,
}

impl StakeTotals {
    pub fn add(&mut self, tokens: &BigUint, shares: &BigDecimal) {
        self.tokens += tokens;
        self.shares = &self.shares + shares;
    }

    pub fn tokens_string(&self) -> String {
        self.tokens.to_string()
    }

    pub fn shares_string(&self) -> String {
        format_decimal(&self.shares)
    }
}
