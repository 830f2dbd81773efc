// Copyright (c) 2024 The Botho Foundation

//! Packed ABI encoding, as produced by Solidity's `abi.encodePacked`.
//!
//! Values are concatenated with no padding and no length prefixes:
//!
//! | Type      | Encoding                      |
//! |-----------|-------------------------------|
//! | `string`  | raw UTF-8 bytes               |
//! | `address` | 20 raw bytes                  |
//! | `uint256` | 32 bytes, big-endian          |
//!
//! Because nothing delimits the fields, the encoding is only unambiguous for
//! a fixed, agreed tuple shape; callers must always push the same types in
//! the same order as the verifier.

use primitive_types::U256;

use crate::Address;

/// Incremental packed encoder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackedEncoder {
    buf: Vec<u8>,
}

impl PackedEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a `string`.
    pub fn string(mut self, value: &str) -> Self {
        self.buf.extend_from_slice(value.as_bytes());
        self
    }

    /// Append an `address`.
    pub fn address(mut self, value: &Address) -> Self {
        self.buf.extend_from_slice(value.as_bytes());
        self
    }

    /// Append a `uint256`.
    pub fn uint256(mut self, value: U256) -> Self {
        let mut word = [0u8; 32];
        value.to_big_endian(&mut word);
        self.buf.extend_from_slice(&word);
        self
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// `keccak256(abi.encodePacked(...))`.
    pub fn keccak256(&self) -> [u8; 32] {
        fiscal_crypto_secp256k1::keccak256(&self.buf)
    }
}
