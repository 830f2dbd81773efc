// Copyright (c) 2024 The Botho Foundation

//! Tax computation for the two split-payment regimes.
//!
//! - **Standard** (Art. 32): federal, state and municipal shares computed per
//!   transaction, with the seller's prior credits offset against the total.
//! - **Simplified** (Art. 33): a single flat withholding rate per sector and
//!   no credit reconciliation, meant for consumer-facing sales.
//!
//! Every share is truncated toward zero, matching the fixed-point arithmetic
//! of the on-chain verifier. Amounts are in the smallest monetary unit.

use primitive_types::{U256, U512};
use serde::{Serialize, Serializer};

use crate::{
    amount_serde,
    rates::{apply_bps, RateBps, RateTable, StandardRates, BPS_SCALE},
    Sector,
};

/// Scale used when converting an [`EffectiveRate`] to floating point.
const RATE_PRECISION: u64 = 1_000_000_000_000;

/// A tax rate expressed as an exact fraction.
///
/// A zero denominator yields a zero rate instead of dividing by zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectiveRate {
    numerator: U256,
    denominator: U256,
}

impl EffectiveRate {
    pub fn new(numerator: U256, denominator: U256) -> Self {
        if denominator.is_zero() {
            return Self::zero();
        }
        Self {
            numerator,
            denominator,
        }
    }

    pub fn zero() -> Self {
        Self {
            numerator: U256::zero(),
            denominator: U256::one(),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.numerator.is_zero()
    }

    pub fn numerator(&self) -> U256 {
        self.numerator
    }

    pub fn denominator(&self) -> U256 {
        self.denominator
    }

    /// `floor(numerator * scale / denominator)`, saturating at `U256::MAX`.
    pub fn scaled(&self, scale: u64) -> U256 {
        let product = self.numerator.full_mul(U256::from(scale));
        let quotient = product / U512::from(self.denominator);
        U256::try_from(quotient).unwrap_or(U256::MAX)
    }

    /// The rate in basis points, truncated.
    pub fn as_bps(&self) -> U256 {
        self.scaled(BPS_SCALE as u64)
    }

    /// Approximate value, for display and reporting only.
    pub fn as_f64(&self) -> f64 {
        let scaled = self.scaled(RATE_PRECISION);
        if scaled > U256::from(u128::MAX) {
            return f64::INFINITY;
        }
        scaled.low_u128() as f64 / RATE_PRECISION as f64
    }
}

impl std::fmt::Display for EffectiveRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}%", self.as_f64() * 100.0)
    }
}

impl Serialize for EffectiveRate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

/// Outcome of a standard-regime computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StandardBreakdown {
    #[serde(with = "amount_serde")]
    pub gross_amount: U256,
    pub sector: Sector,
    pub rates: StandardRates,
    /// CBS
    #[serde(with = "amount_serde")]
    pub federal_share: U256,
    /// IBS, state portion
    #[serde(with = "amount_serde")]
    pub state_share: U256,
    /// IBS, municipal portion
    #[serde(with = "amount_serde")]
    pub municipal_share: U256,
    #[serde(with = "amount_serde")]
    pub total_tax: U256,
    /// Seller credits compensated against `total_tax`
    #[serde(with = "amount_serde")]
    pub credit_offset: U256,
    /// Tax actually withheld: `total_tax - credit_offset`
    #[serde(with = "amount_serde")]
    pub net_tax: U256,
    #[serde(with = "amount_serde")]
    pub net_to_seller: U256,
    /// `total_tax / gross_amount`, before credits
    pub effective_rate: EffectiveRate,
}

/// Outcome of a simplified-regime computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimplifiedBreakdown {
    #[serde(with = "amount_serde")]
    pub gross_amount: U256,
    pub sector: Sector,
    pub rate_bps: RateBps,
    #[serde(with = "amount_serde")]
    pub tax_amount: U256,
    #[serde(with = "amount_serde")]
    pub net_to_seller: U256,
    pub effective_rate: EffectiveRate,
}

/// Pure tax rules over a fixed [`RateTable`].
#[derive(Debug, Clone, Copy)]
pub struct TaxEngine {
    rates: &'static RateTable,
}

impl Default for TaxEngine {
    fn default() -> Self {
        Self::new(RateTable::statutory())
    }
}

impl TaxEngine {
    pub fn new(rates: &'static RateTable) -> Self {
        Self { rates }
    }

    pub fn rates(&self) -> &'static RateTable {
        self.rates
    }

    /// Compute the standard-regime split (Art. 32).
    ///
    /// Seller credits are capped at the total tax; any excess is neither
    /// carried forward nor refunded.
    pub fn calculate_standard(
        &self,
        gross_amount: U256,
        sector: Sector,
        seller_credits: U256,
    ) -> StandardBreakdown {
        let rates = self.rates.standard(sector);

        let federal_share = apply_bps(gross_amount, rates.federal_bps);
        let state_share = apply_bps(gross_amount, rates.state_bps);
        let municipal_share = apply_bps(gross_amount, rates.municipal_bps);
        let total_tax = federal_share
            .saturating_add(state_share)
            .saturating_add(municipal_share);

        // Credit compensation (Art. 32, §2)
        let credit_offset = seller_credits.min(total_tax);
        let net_tax = total_tax - credit_offset;
        let net_to_seller = gross_amount.saturating_sub(net_tax);

        StandardBreakdown {
            gross_amount,
            sector,
            rates,
            federal_share,
            state_share,
            municipal_share,
            total_tax,
            credit_offset,
            net_tax,
            net_to_seller,
            effective_rate: EffectiveRate::new(total_tax, gross_amount),
        }
    }

    /// Compute the simplified-regime withholding (Art. 33).
    pub fn calculate_simplified(&self, gross_amount: U256, sector: Sector) -> SimplifiedBreakdown {
        let rate_bps = self.rates.simplified_bps(sector);
        let tax_amount = apply_bps(gross_amount, rate_bps);
        let net_to_seller = gross_amount.saturating_sub(tax_amount);

        let effective_rate = if gross_amount.is_zero() {
            EffectiveRate::zero()
        } else {
            EffectiveRate::new(U256::from(rate_bps), U256::from(BPS_SCALE))
        };

        SimplifiedBreakdown {
            gross_amount,
            sector,
            rate_bps,
            tax_amount,
            net_to_seller,
            effective_rate,
        }
    }
}
