// Copyright (c) 2024 The Botho Foundation

//! Signed authorizations returned by the oracle.

use chrono::{DateTime, Utc};
use primitive_types::U256;
use serde::{Deserialize, Serialize};

use crate::{
    payload::{AuthorizationMode, AuthorizationPayload},
    rates::RateBps,
    Address, Signature,
};

/// An oracle authorization for one invoice.
///
/// Constructed once by the signer and never modified afterwards. Fields not
/// carried by the payload's regime read as zero: the tax shares and credit
/// offset of a simplified authorization, the rate of a standard one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedAuthorization {
    #[serde(flatten)]
    payload: AuthorizationPayload,
    signature: Signature,
    signer: Address,
    /// Informational; not part of the signed payload
    issued_at: DateTime<Utc>,
}

impl SignedAuthorization {
    pub fn new(
        payload: AuthorizationPayload,
        signature: Signature,
        signer: Address,
        issued_at: DateTime<Utc>,
    ) -> Self {
        Self {
            payload,
            signature,
            signer,
            issued_at,
        }
    }

    pub fn payload(&self) -> &AuthorizationPayload {
        &self.payload
    }

    pub fn into_payload(self) -> AuthorizationPayload {
        self.payload
    }

    pub fn mode(&self) -> AuthorizationMode {
        self.payload.mode()
    }

    pub fn invoice_id(&self) -> &str {
        self.payload.invoice_id()
    }

    pub fn seller(&self) -> Address {
        self.payload.seller()
    }

    pub fn gross_amount(&self) -> U256 {
        self.payload.gross_amount()
    }

    pub fn federal_share(&self) -> U256 {
        match &self.payload {
            AuthorizationPayload::Standard(p) => p.federal_share,
            AuthorizationPayload::Simplified(_) => U256::zero(),
        }
    }

    pub fn state_share(&self) -> U256 {
        match &self.payload {
            AuthorizationPayload::Standard(p) => p.state_share,
            AuthorizationPayload::Simplified(_) => U256::zero(),
        }
    }

    pub fn municipal_share(&self) -> U256 {
        match &self.payload {
            AuthorizationPayload::Standard(p) => p.municipal_share,
            AuthorizationPayload::Simplified(_) => U256::zero(),
        }
    }

    pub fn credit_offset(&self) -> U256 {
        match &self.payload {
            AuthorizationPayload::Standard(p) => p.credit_offset,
            AuthorizationPayload::Simplified(_) => U256::zero(),
        }
    }

    pub fn rate_bps(&self) -> RateBps {
        match &self.payload {
            AuthorizationPayload::Standard(_) => 0,
            AuthorizationPayload::Simplified(p) => p.rate_bps,
        }
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Address of the oracle that issued this authorization.
    pub fn signer(&self) -> Address {
        self.signer
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    /// Digest of the signed payload, as the verifier recomputes it.
    pub fn digest(&self) -> [u8; 32] {
        self.payload.digest()
    }
}
