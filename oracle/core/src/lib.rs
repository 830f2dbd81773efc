// Copyright (c) 2024 The Botho Foundation

#![deny(unsafe_code)]

//! Core types and rules for the split-payment fiscal oracle.
//!
//! This crate holds everything the oracle and a verifier must agree on:
//!
//! - Sectors and the statutory rate table
//! - The tax engine for the standard (Art. 32) and simplified (Art. 33)
//!   regimes
//! - The packed payload encoding that is hashed and signed
//! - Address, signature and authorization types
//! - Configuration structures
//!
//! It performs no signing itself.

mod amount_serde;
mod error;

pub mod address;
pub mod authorization;
pub mod config;
pub mod engine;
pub mod packed;
pub mod payload;
pub mod rates;
pub mod sector;
pub mod signature;

pub use address::Address;
pub use authorization::SignedAuthorization;
pub use config::{OracleConfig, OutputConfig, SignerConfig};
pub use engine::{EffectiveRate, SimplifiedBreakdown, StandardBreakdown, TaxEngine};
pub use error::{ConfigError, ParseError};
pub use packed::PackedEncoder;
pub use payload::{
    AuthorizationMode, AuthorizationPayload, SimplifiedPayload, StandardPayload, SIMPLIFIED_TAG,
};
pub use primitive_types::U256;
pub use rates::{RateBps, RateTable, StandardRates, BPS_SCALE};
pub use sector::Sector;
pub use signature::Signature;
