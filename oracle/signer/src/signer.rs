// Copyright (c) 2024 The Botho Foundation

//! The oracle signer.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use fiscal_crypto_secp256k1::Secp256k1Keypair;
use fiscal_oracle_core::{
    Address, AuthorizationPayload, Sector, Signature, SignedAuthorization, SimplifiedPayload,
    StandardPayload, TaxEngine, U256,
};
use tracing::{debug, info};

use crate::error::SignerError;

/// Computes taxes for an invoice and signs the result with the oracle key.
///
/// Signing only reads the key, so one signer can be shared between threads;
/// the issuance counter is the only mutable state.
pub struct AuthoritySigner {
    keypair: Secp256k1Keypair,
    address: Address,
    engine: TaxEngine,
    issued: AtomicU64,
}

impl std::fmt::Debug for AuthoritySigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthoritySigner")
            .field("address", &self.address)
            .field("issued", &self.issuance_count())
            .finish()
    }
}

impl AuthoritySigner {
    /// Create a signer around a provisioned keypair, using the statutory rates.
    pub fn new(keypair: Secp256k1Keypair) -> Self {
        Self::with_engine(keypair, TaxEngine::default())
    }

    pub fn with_engine(keypair: Secp256k1Keypair, engine: TaxEngine) -> Self {
        let address = Address::new(keypair.eth_address_bytes());
        info!("Fiscal oracle signer initialized: {}", address);

        Self {
            keypair,
            address,
            engine,
            issued: AtomicU64::new(0),
        }
    }

    /// The address a verifier must have registered for this oracle.
    pub fn address(&self) -> Address {
        self.address
    }

    pub fn engine(&self) -> &TaxEngine {
        &self.engine
    }

    /// Number of authorizations issued since construction.
    pub fn issuance_count(&self) -> u64 {
        self.issued.load(Ordering::Relaxed)
    }

    /// Authorize a standard-regime (Art. 32) split.
    pub fn authorize_standard(
        &self,
        invoice_id: &str,
        seller: Address,
        gross_amount: U256,
        sector: Sector,
        seller_credits: U256,
    ) -> Result<SignedAuthorization, SignerError> {
        let breakdown = self
            .engine
            .calculate_standard(gross_amount, sector, seller_credits);
        let payload = StandardPayload::from_breakdown(invoice_id, seller, &breakdown);
        self.sign_payload(payload.into())
    }

    /// Authorize a simplified-regime (Art. 33) split.
    pub fn authorize_simplified(
        &self,
        invoice_id: &str,
        seller: Address,
        gross_amount: U256,
        sector: Sector,
    ) -> Result<SignedAuthorization, SignerError> {
        let breakdown = self.engine.calculate_simplified(gross_amount, sector);
        let payload = SimplifiedPayload::from_breakdown(invoice_id, seller, &breakdown);
        self.sign_payload(payload.into())
    }

    /// Sign an already-computed payload.
    ///
    /// The packed digest is signed as a 32-byte EIP-191 personal message, the
    /// form an on-chain `ecrecover` check expects.
    pub fn sign_payload(
        &self,
        payload: AuthorizationPayload,
    ) -> Result<SignedAuthorization, SignerError> {
        if payload.invoice_id().is_empty() {
            return Err(SignerError::EmptyInvoiceId);
        }

        let digest = payload.digest();
        let signature = Signature::new(self.keypair.sign_message(&digest)?);

        let count = self.issued.fetch_add(1, Ordering::Relaxed) + 1;
        debug!(
            "Issued {} authorization for invoice {} (total issued: {})",
            payload.mode(),
            payload.invoice_id(),
            count
        );

        Ok(SignedAuthorization::new(
            payload,
            signature,
            self.address,
            Utc::now(),
        ))
    }
}
