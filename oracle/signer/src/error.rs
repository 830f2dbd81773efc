// Copyright (c) 2024 The Botho Foundation

use fiscal_oracle_core::Address;

/// Errors issuing an authorization.
#[derive(Debug, thiserror::Error)]
pub enum SignerError {
    #[error("Invoice id must not be empty")]
    EmptyInvoiceId,

    /// The signing key could not produce a signature. Not retryable.
    #[error("Signing failed: {0}")]
    Signing(#[from] fiscal_crypto_secp256k1::Error),
}

/// Reasons a verifier rejects an authorization.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerifyError {
    #[error("Signature does not recover to any public key")]
    Unrecoverable,

    #[error("Recovered signer {recovered} does not match oracle {expected}")]
    SignerMismatch { recovered: Address, expected: Address },
}

/// Errors reading or writing a key file.
#[derive(Debug, thiserror::Error)]
pub enum KeyfileError {
    #[error("Key file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Key file does not hold a valid private key: {0}")]
    InvalidKey(#[from] fiscal_crypto_secp256k1::Error),
}
