// Copyright (c) 2024 The Botho Foundation

#![deny(unsafe_code)]

//! Fiscal oracle signer.
//!
//! Simulates the tax authority in a split-payment settlement: it computes the
//! statutory taxes on an invoice, signs the result, and hands back an
//! authorization that a settlement contract accepts only when every field
//! matches what was signed.
//!
//! ```
//! use fiscal_crypto_secp256k1::Secp256k1Keypair;
//! use fiscal_oracle_core::{Address, Sector, U256};
//! use fiscal_oracle_signer::{verify_authorization, AuthoritySigner};
//!
//! let signer = AuthoritySigner::new(Secp256k1Keypair::generate(&mut rand_core::OsRng));
//! let seller: Address = "0x1234567890123456789012345678901234567890".parse().unwrap();
//!
//! let auth = signer
//!     .authorize_simplified("NFe-1", seller, U256::exp10(20), Sector::Standard)
//!     .unwrap();
//! assert!(verify_authorization(&auth, &signer.address()).is_ok());
//! ```

mod error;
mod signer;

pub mod keyfile;
pub mod verify;

pub use error::{KeyfileError, SignerError, VerifyError};
pub use signer::AuthoritySigner;
pub use verify::{recover_signer, verify_authorization};
