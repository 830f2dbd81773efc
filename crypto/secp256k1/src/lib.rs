// Copyright (c) 2024 The Botho Foundation

#![deny(unsafe_code)]

//! Secp256k1 key support for Ethereum-compatible signing.
//!
//! The fiscal oracle signs authorizations the same way an Ethereum account
//! signs a personal message, so that an on-chain verifier can recover the
//! oracle address with `ecrecover`. This crate provides the pieces:
//!
//! - [`keccak256`]: the 256-bit hash used for both payloads and addresses
//! - [`eip191_hash`]: the `"\x19Ethereum Signed Message:\n{len}"` transform
//! - [`Secp256k1Keypair`]: key provisioning and recoverable signatures
//! - [`recover_address`]: the verifier side of the scheme
//!
//! # Examples
//!
//! ```
//! use fiscal_crypto_secp256k1::{recover_address, Secp256k1Keypair};
//!
//! let keypair = Secp256k1Keypair::from_hex(
//!     "0x4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318",
//! )
//! .unwrap();
//! assert_eq!(keypair.eth_address(), "0x2c7536E3605D9C16a7a3D7b1898e529396a65c23");
//!
//! // Sign a message (EIP-191 personal sign)
//! let signature = keypair.sign_message(b"Hello, Ethereum!").unwrap();
//! assert_eq!(signature.len(), 65); // r (32) + s (32) + v (1)
//! assert_eq!(
//!     recover_address(b"Hello, Ethereum!", &signature),
//!     Some(keypair.eth_address_bytes())
//! );
//! ```

use k256::ecdsa::{RecoveryId, Signature as K256Signature, SigningKey, VerifyingKey};
use rand_core::CryptoRngCore;
use sha3::{Digest, Keccak256};
use zeroize::{ZeroizeOnDrop, Zeroizing};

/// Length of a serialized recoverable signature: r (32) || s (32) || v (1).
pub const SIGNATURE_LEN: usize = 65;

/// Offset added to the recovery id when serializing `v`.
const V_OFFSET: u8 = 27;

/// Errors that can occur during key operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid private key")]
    InvalidPrivateKey,

    #[error("Invalid private key encoding: {0}")]
    InvalidEncoding(String),

    #[error("Signing failed: {0}")]
    SigningError(String),
}

/// Keccak-256 of `data`.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    Keccak256::digest(data).into()
}

/// Compute the EIP-191 personal sign hash for a message.
///
/// `keccak256("\x19Ethereum Signed Message:\n" || len(message) || message)`,
/// where the length is written in decimal ASCII.
pub fn eip191_hash(message: &[u8]) -> [u8; 32] {
    let prefix = format!("\x19Ethereum Signed Message:\n{}", message.len());
    let mut hasher = Keccak256::new();
    hasher.update(prefix.as_bytes());
    hasher.update(message);
    hasher.finalize().into()
}

/// EIP-55 checksum encode an address.
pub fn checksum_encode(address: &[u8; 20]) -> String {
    let hex_addr = hex::encode(address);
    let hash = keccak256(hex_addr.as_bytes());

    let mut result = String::with_capacity(42);
    result.push_str("0x");

    for (i, c) in hex_addr.chars().enumerate() {
        if c.is_ascii_digit() {
            result.push(c);
            continue;
        }
        let hash_byte = hash[i / 2];
        let hash_nibble = if i % 2 == 0 {
            hash_byte >> 4
        } else {
            hash_byte & 0x0f
        };
        if hash_nibble >= 8 {
            result.push(c.to_ascii_uppercase());
        } else {
            result.push(c);
        }
    }

    result
}

/// A secp256k1 keypair for Ethereum-compatible operations.
#[derive(Clone, ZeroizeOnDrop)]
pub struct Secp256k1Keypair {
    #[zeroize(skip)] // SigningKey implements its own zeroization
    signing_key: SigningKey,
}

impl core::fmt::Debug for Secp256k1Keypair {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Secp256k1Keypair {{ address: {} }}", self.eth_address())
    }
}

impl Secp256k1Keypair {
    /// Generate a fresh keypair from a cryptographically secure RNG.
    pub fn generate<R: CryptoRngCore>(rng: &mut R) -> Self {
        Self {
            signing_key: SigningKey::random(rng),
        }
    }

    /// Create a keypair from raw 32-byte private key bytes.
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self, Error> {
        let signing_key =
            SigningKey::from_bytes(bytes.into()).map_err(|_| Error::InvalidPrivateKey)?;
        Ok(Self { signing_key })
    }

    /// Create a keypair from a hex-encoded private key, with or without `0x`.
    pub fn from_hex(hex_key: &str) -> Result<Self, Error> {
        let trimmed = hex_key.trim();
        let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);

        let mut bytes = Zeroizing::new([0u8; 32]);
        hex::decode_to_slice(digits, &mut bytes[..])
            .map_err(|e| Error::InvalidEncoding(e.to_string()))?;
        Self::from_bytes(&bytes)
    }

    /// The raw private key bytes, zeroized when dropped.
    pub fn secret_bytes(&self) -> Zeroizing<[u8; 32]> {
        Zeroizing::new(self.signing_key.to_bytes().into())
    }

    /// Get the public key as uncompressed bytes (65 bytes: 0x04 || x || y).
    pub fn public_key_uncompressed(&self) -> [u8; 65] {
        encode_uncompressed(self.signing_key.verifying_key())
    }

    /// Get the Ethereum address derived from this keypair.
    ///
    /// Returns a checksummed address string prefixed with "0x".
    pub fn eth_address(&self) -> String {
        checksum_encode(&self.eth_address_bytes())
    }

    /// Get the raw 20-byte Ethereum address.
    ///
    /// The last 20 bytes of keccak256 over the 64-byte `x || y` public key.
    pub fn eth_address_bytes(&self) -> [u8; 20] {
        address_from_public_key(&self.public_key_uncompressed())
    }

    /// Sign a message using EIP-191 personal sign format.
    ///
    /// Returns a 65-byte signature: r (32) || s (32) || v (1)
    /// where v is the recovery ID + 27.
    pub fn sign_message(&self, message: &[u8]) -> Result<[u8; SIGNATURE_LEN], Error> {
        self.sign_hash(&eip191_hash(message))
    }

    /// Sign a raw 32-byte hash without any prefixing.
    pub fn sign_hash(&self, hash: &[u8; 32]) -> Result<[u8; SIGNATURE_LEN], Error> {
        let (signature, recovery_id) = self
            .signing_key
            .sign_prehash_recoverable(hash)
            .map_err(|e| Error::SigningError(e.to_string()))?;

        let mut result = [0u8; SIGNATURE_LEN];
        result[..64].copy_from_slice(&signature.to_bytes());
        result[64] = recovery_id.to_byte() + V_OFFSET;
        Ok(result)
    }
}

fn encode_uncompressed(verifying_key: &VerifyingKey) -> [u8; 65] {
    let point = verifying_key.to_encoded_point(false);
    let mut result = [0u8; 65];
    result.copy_from_slice(point.as_bytes());
    result
}

/// Derive the 20-byte address of an uncompressed public key.
pub fn address_from_public_key(pubkey: &[u8; 65]) -> [u8; 20] {
    // Skip the 0x04 prefix, hash the 64 bytes of x || y, keep the last 20
    let hash = keccak256(&pubkey[1..]);
    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    address
}

/// Recover the public key from a signature and message hash.
pub fn recover_public_key(hash: &[u8; 32], signature: &[u8; SIGNATURE_LEN]) -> Option<[u8; 65]> {
    let v = signature[64];

    // v should be 27 or 28 (or 0/1 for some implementations)
    let recovery_id = if v >= V_OFFSET {
        RecoveryId::try_from(v - V_OFFSET).ok()?
    } else {
        RecoveryId::try_from(v).ok()?
    };

    let sig = K256Signature::from_slice(&signature[..64]).ok()?;
    let verifying_key = VerifyingKey::recover_from_prehash(hash, &sig, recovery_id).ok()?;

    Some(encode_uncompressed(&verifying_key))
}

/// Recover the address that signed `hash` directly, without EIP-191 prefixing.
pub fn recover_address_from_hash(
    hash: &[u8; 32],
    signature: &[u8; SIGNATURE_LEN],
) -> Option<[u8; 20]> {
    recover_public_key(hash, signature).map(|pubkey| address_from_public_key(&pubkey))
}

/// Recover the Ethereum address from a signature over an EIP-191 message.
pub fn recover_address(message: &[u8], signature: &[u8; SIGNATURE_LEN]) -> Option<[u8; 20]> {
    recover_address_from_hash(&eip191_hash(message), signature)
}
