// Copyright (c) 2024 The Botho Foundation

//! Reading and writing the oracle's private key.
//!
//! A key file holds the 32-byte private key as hex, optionally `0x`-prefixed,
//! with surrounding whitespace ignored. Real deployments keep the key in an
//! HSM; this format exists for development and testing.

use std::{fs, io::Write, path::Path};

use fiscal_crypto_secp256k1::Secp256k1Keypair;
use zeroize::Zeroizing;

use crate::error::KeyfileError;

/// Read a keypair from a hex key file.
pub fn read_keyfile<P: AsRef<Path>>(path: P) -> Result<Secp256k1Keypair, KeyfileError> {
    let content = Zeroizing::new(fs::read_to_string(path)?);
    Ok(Secp256k1Keypair::from_hex(&content)?)
}

/// Write a keypair's private key as hex, creating or truncating the file.
///
/// On Unix the file is created readable by its owner only.
pub fn write_keyfile<P: AsRef<Path>>(
    path: P,
    keypair: &Secp256k1Keypair,
) -> Result<(), KeyfileError> {
    let secret = keypair.secret_bytes();
    let encoded = Zeroizing::new(format!("0x{}\n", hex::encode(*secret)));

    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    file.write_all(encoded.as_bytes())?;
    file.sync_all()?;
    Ok(())
}
