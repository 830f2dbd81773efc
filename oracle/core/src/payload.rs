// Copyright (c) 2024 The Botho Foundation

//! The signed payloads and their wire encoding.
//!
//! Field order and widths here are a contract with every deployed verifier,
//! which rebuilds the same packed tuple from the submitted fields:
//!
//! - Standard: `(string invoiceId, address seller, uint256 gross,
//!   uint256 federal, uint256 state, uint256 municipal, uint256 creditOffset)`
//! - Simplified: `(string invoiceId, address seller, uint256 gross,
//!   uint256 rateBps, string "SIMPLIFIED")`
//!
//! The trailing literal keeps the two regimes' digests apart, so a simplified
//! signature can never be replayed as a standard one.

use primitive_types::U256;
use serde::{Deserialize, Serialize};

use crate::{
    amount_serde,
    engine::{SimplifiedBreakdown, StandardBreakdown},
    packed::PackedEncoder,
    rates::RateBps,
    Address,
};

/// Literal appended to every simplified-regime payload.
pub const SIMPLIFIED_TAG: &str = "SIMPLIFIED";

/// Which regime an authorization was issued under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthorizationMode {
    Standard,
    Simplified,
}

impl std::fmt::Display for AuthorizationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthorizationMode::Standard => write!(f, "STANDARD"),
            AuthorizationMode::Simplified => write!(f, "SIMPLIFIED"),
        }
    }
}

/// Fields signed for a standard-regime invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardPayload {
    pub invoice_id: String,
    pub seller: Address,
    #[serde(with = "amount_serde")]
    pub gross_amount: U256,
    #[serde(with = "amount_serde")]
    pub federal_share: U256,
    #[serde(with = "amount_serde")]
    pub state_share: U256,
    #[serde(with = "amount_serde")]
    pub municipal_share: U256,
    #[serde(with = "amount_serde")]
    pub credit_offset: U256,
}

impl StandardPayload {
    pub fn from_breakdown(
        invoice_id: impl Into<String>,
        seller: Address,
        breakdown: &StandardBreakdown,
    ) -> Self {
        Self {
            invoice_id: invoice_id.into(),
            seller,
            gross_amount: breakdown.gross_amount,
            federal_share: breakdown.federal_share,
            state_share: breakdown.state_share,
            municipal_share: breakdown.municipal_share,
            credit_offset: breakdown.credit_offset,
        }
    }

    pub fn encode_packed(&self) -> PackedEncoder {
        PackedEncoder::new()
            .string(&self.invoice_id)
            .address(&self.seller)
            .uint256(self.gross_amount)
            .uint256(self.federal_share)
            .uint256(self.state_share)
            .uint256(self.municipal_share)
            .uint256(self.credit_offset)
    }

    pub fn digest(&self) -> [u8; 32] {
        self.encode_packed().keccak256()
    }
}

/// Fields signed for a simplified-regime invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimplifiedPayload {
    pub invoice_id: String,
    pub seller: Address,
    #[serde(with = "amount_serde")]
    pub gross_amount: U256,
    pub rate_bps: RateBps,
}

impl SimplifiedPayload {
    pub fn from_breakdown(
        invoice_id: impl Into<String>,
        seller: Address,
        breakdown: &SimplifiedBreakdown,
    ) -> Self {
        Self {
            invoice_id: invoice_id.into(),
            seller,
            gross_amount: breakdown.gross_amount,
            rate_bps: breakdown.rate_bps,
        }
    }

    pub fn encode_packed(&self) -> PackedEncoder {
        PackedEncoder::new()
            .string(&self.invoice_id)
            .address(&self.seller)
            .uint256(self.gross_amount)
            .uint256(U256::from(self.rate_bps))
            .string(SIMPLIFIED_TAG)
    }

    pub fn digest(&self) -> [u8; 32] {
        self.encode_packed().keccak256()
    }
}

/// A payload under either regime, tagged by `mode` when serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthorizationPayload {
    Standard(StandardPayload),
    Simplified(SimplifiedPayload),
}

impl AuthorizationPayload {
    pub fn mode(&self) -> AuthorizationMode {
        match self {
            AuthorizationPayload::Standard(_) => AuthorizationMode::Standard,
            AuthorizationPayload::Simplified(_) => AuthorizationMode::Simplified,
        }
    }

    pub fn invoice_id(&self) -> &str {
        match self {
            AuthorizationPayload::Standard(p) => &p.invoice_id,
            AuthorizationPayload::Simplified(p) => &p.invoice_id,
        }
    }

    pub fn seller(&self) -> Address {
        match self {
            AuthorizationPayload::Standard(p) => p.seller,
            AuthorizationPayload::Simplified(p) => p.seller,
        }
    }

    pub fn gross_amount(&self) -> U256 {
        match self {
            AuthorizationPayload::Standard(p) => p.gross_amount,
            AuthorizationPayload::Simplified(p) => p.gross_amount,
        }
    }

    pub fn encode_packed(&self) -> PackedEncoder {
        match self {
            AuthorizationPayload::Standard(p) => p.encode_packed(),
            AuthorizationPayload::Simplified(p) => p.encode_packed(),
        }
    }

    /// Keccak-256 of the packed encoding, before EIP-191 wrapping.
    pub fn digest(&self) -> [u8; 32] {
        self.encode_packed().keccak256()
    }
}

impl From<StandardPayload> for AuthorizationPayload {
    fn from(payload: StandardPayload) -> Self {
        AuthorizationPayload::Standard(payload)
    }
}

impl From<SimplifiedPayload> for AuthorizationPayload {
    fn from(payload: SimplifiedPayload) -> Self {
        AuthorizationPayload::Simplified(payload)
    }
}
