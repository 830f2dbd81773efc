// Copyright (c) 2024 The Botho Foundation

//! Verifier-side checks.
//!
//! Mirrors what the settlement contract does with a submitted authorization:
//! rebuild the packed digest from the fields it was handed, recover the
//! signer from the signature, and compare against the registered oracle.
//! Any altered field yields a different digest and so a different recovered
//! address.

use fiscal_crypto_secp256k1::{eip191_hash, recover_address_from_hash};
use fiscal_oracle_core::{Address, AuthorizationPayload, Signature, SignedAuthorization};

use crate::error::VerifyError;

/// The hash actually signed for a payload: EIP-191 over its packed digest.
pub fn signing_hash(payload: &AuthorizationPayload) -> [u8; 32] {
    eip191_hash(&payload.digest())
}

/// Recover the address that signed `payload`, if the signature is well formed.
pub fn recover_payload_signer(
    payload: &AuthorizationPayload,
    signature: &Signature,
) -> Option<Address> {
    recover_address_from_hash(&signing_hash(payload), signature.as_bytes()).map(Address::new)
}

/// Recover the signer from the fields carried by an authorization.
pub fn recover_signer(authorization: &SignedAuthorization) -> Option<Address> {
    recover_payload_signer(authorization.payload(), authorization.signature())
}

/// Accept an authorization only if it recovers to `oracle`.
pub fn verify_authorization(
    authorization: &SignedAuthorization,
    oracle: &Address,
) -> Result<(), VerifyError> {
    let recovered = recover_signer(authorization).ok_or(VerifyError::Unrecoverable)?;
    if recovered != *oracle {
        return Err(VerifyError::SignerMismatch {
            recovered,
            expected: *oracle,
        });
    }
    Ok(())
}
