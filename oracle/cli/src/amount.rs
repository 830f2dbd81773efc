// Copyright (c) 2024 The Botho Foundation

//! Currency amount parsing and formatting.
//!
//! Amounts on the command line are decimal currency strings. On the wire they
//! are integers with 18 decimal places, so conversion is done on the digits
//! directly rather than through floating point.

use anyhow::{anyhow, bail, Result};
use fiscal_oracle_core::U256;

/// Decimal places of the on-chain amount representation.
pub const DECIMALS: usize = 18;

/// Parse a currency string such as `1000.50` into 18-decimal base units.
pub fn parse_amount(input: &str) -> Result<U256> {
    let value = input.trim();
    if value.starts_with('-') {
        bail!("Amount cannot be negative");
    }

    let (whole, frac) = value.split_once('.').unwrap_or((value, ""));
    if whole.is_empty() && frac.is_empty() {
        bail!("Invalid amount format: {:?}", input);
    }
    if !whole.bytes().chain(frac.bytes()).all(|b| b.is_ascii_digit()) {
        bail!("Invalid amount format: {:?}", input);
    }
    if frac.len() > DECIMALS {
        bail!("Amount has more than {} decimal places", DECIMALS);
    }

    let digits = format!("{}{:0<width$}", whole, frac, width = DECIMALS);
    U256::from_dec_str(&digits).map_err(|_| anyhow!("Amount out of range: {}", input))
}

/// Format base units as a currency string, dropping trailing zero decimals.
pub fn format_amount(amount: U256) -> String {
    let scale = U256::exp10(DECIMALS);
    let whole = amount / scale;
    let frac = amount % scale;

    if frac.is_zero() {
        return whole.to_string();
    }
    let frac = format!("{:0>width$}", frac.to_string(), width = DECIMALS);
    format!("{}.{}", whole, frac.trim_end_matches('0'))
}
