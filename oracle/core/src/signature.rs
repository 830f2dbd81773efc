// Copyright (c) 2024 The Botho Foundation

//! Recoverable ECDSA signatures in the `r || s || v` layout.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ParseError;

pub use fiscal_crypto_secp256k1::SIGNATURE_LEN;

/// A 65-byte recoverable secp256k1 signature.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature([u8; SIGNATURE_LEN]);

impl Signature {
    pub const fn new(bytes: [u8; SIGNATURE_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LEN] {
        &self.0
    }

    pub fn r(&self) -> &[u8] {
        &self.0[..32]
    }

    pub fn s(&self) -> &[u8] {
        &self.0[32..64]
    }

    /// Recovery id plus 27.
    pub fn v(&self) -> u8 {
        self.0[64]
    }

    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl From<[u8; SIGNATURE_LEN]> for Signature {
    fn from(bytes: [u8; SIGNATURE_LEN]) -> Self {
        Self(bytes)
    }
}

impl std::fmt::Display for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl std::fmt::Debug for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Signature({})", self.to_hex())
    }
}

impl std::str::FromStr for Signature {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
        if digits.len() != SIGNATURE_LEN * 2 {
            return Err(ParseError::InvalidLength {
                expected: SIGNATURE_LEN * 2,
                actual: digits.len(),
            });
        }

        let mut bytes = [0u8; SIGNATURE_LEN];
        hex::decode_to_slice(digits, &mut bytes).map_err(|e| ParseError::InvalidHex(e.to_string()))?;
        Ok(Self(bytes))
    }
}

impl Serialize for Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_components() {
        let mut bytes = [0u8; SIGNATURE_LEN];
        bytes[0] = 0xaa;
        bytes[32] = 0xbb;
        bytes[64] = 28;
        let signature = Signature::new(bytes);

        assert_eq!(signature.r()[0], 0xaa);
        assert_eq!(signature.s()[0], 0xbb);
        assert_eq!(signature.v(), 28);
        assert_eq!(signature.to_hex().len(), 2 + 130);
    }

    #[test]
    fn test_signature_parsing() {
        let hex = format!("0x{}1b", "11".repeat(64));
        let signature: Signature = hex.parse().unwrap();
        assert_eq!(signature.v(), 27);
        assert_eq!(signature.to_string(), hex);

        assert!("0x1234".parse::<Signature>().is_err());
    }
}
