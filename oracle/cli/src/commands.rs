// Copyright (c) 2024 The Botho Foundation

//! Subcommand implementations.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use fiscal_crypto_secp256k1::Secp256k1Keypair;
use fiscal_oracle_core::{
    Address, OracleConfig, Sector, SignedAuthorization, SignerConfig, TaxEngine,
};
use fiscal_oracle_signer::{
    keyfile::{read_keyfile, write_keyfile},
    recover_signer, verify_authorization, AuthoritySigner,
};
use rand_core::OsRng;
use serde::Serialize;
use tracing::{info, warn};

use crate::amount::{format_amount, parse_amount};

/// Build the oracle signer from an explicit key file, the configured one, or
/// a fresh ephemeral key when the configuration allows it.
pub fn load_signer(key_file: Option<&Path>, config: &SignerConfig) -> Result<AuthoritySigner> {
    let path = key_file
        .map(Path::to_path_buf)
        .or_else(|| config.private_key_file.as_ref().map(PathBuf::from));

    let keypair = match path {
        Some(path) => {
            info!("Loading oracle key from {}", path.display());
            read_keyfile(&path)
                .with_context(|| format!("Failed to load key file {}", path.display()))?
        }
        None if config.allow_ephemeral => {
            warn!("No key file configured, signing with an ephemeral key");
            Secp256k1Keypair::generate(&mut OsRng)
        }
        None => bail!("No key file configured and ephemeral keys are disabled"),
    };

    Ok(AuthoritySigner::new(keypair))
}

/// Resolve a sector tag, falling back to the general rates for unknown tags.
pub fn parse_sector(tag: &str) -> Sector {
    match tag.parse() {
        Ok(sector) => sector,
        Err(_) => {
            warn!("Unknown sector {:?}, applying general rates", tag);
            Sector::default()
        }
    }
}

pub fn parse_seller(seller: &str) -> Result<Address> {
    seller
        .parse()
        .with_context(|| format!("Invalid seller address {:?}", seller))
}

/// Write a value to stdout as JSON.
pub fn emit<T: Serialize>(value: &T, config: &OracleConfig) -> Result<()> {
    let json = if config.output.pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", json);
    Ok(())
}

#[derive(Serialize)]
struct KeyInfo {
    address: Address,
    #[serde(skip_serializing_if = "Option::is_none")]
    key_file: Option<PathBuf>,
}

pub fn address(signer: &AuthoritySigner, config: &OracleConfig) -> Result<()> {
    emit(
        &KeyInfo {
            address: signer.address(),
            key_file: None,
        },
        config,
    )
}

pub fn keygen(out: &Path, force: bool, config: &OracleConfig) -> Result<()> {
    if out.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", out.display());
    }

    let keypair = Secp256k1Keypair::generate(&mut OsRng);
    write_keyfile(out, &keypair)
        .with_context(|| format!("Failed to write key file {}", out.display()))?;
    info!("Wrote oracle key to {}", out.display());

    emit(
        &KeyInfo {
            address: Address::new(keypair.eth_address_bytes()),
            key_file: Some(out.to_path_buf()),
        },
        config,
    )
}

pub fn quote_standard(
    engine: &TaxEngine,
    amount: &str,
    sector: &str,
    credits: &str,
    config: &OracleConfig,
) -> Result<()> {
    let gross = parse_amount(amount).context("Invalid gross amount")?;
    let credits = parse_amount(credits).context("Invalid seller credits")?;
    let breakdown = engine.calculate_standard(gross, parse_sector(sector), credits);

    info!(
        "Standard quote: tax {} on {} ({})",
        format_amount(breakdown.net_tax),
        format_amount(gross),
        breakdown.effective_rate
    );
    emit(&breakdown, config)
}

pub fn quote_simplified(
    engine: &TaxEngine,
    amount: &str,
    sector: &str,
    config: &OracleConfig,
) -> Result<()> {
    let gross = parse_amount(amount).context("Invalid gross amount")?;
    let breakdown = engine.calculate_simplified(gross, parse_sector(sector));

    info!(
        "Simplified quote: tax {} on {} ({})",
        format_amount(breakdown.tax_amount),
        format_amount(gross),
        breakdown.effective_rate
    );
    emit(&breakdown, config)
}

pub fn authorize_standard(
    signer: &AuthoritySigner,
    invoice_id: &str,
    seller: &str,
    amount: &str,
    sector: &str,
    credits: &str,
    config: &OracleConfig,
) -> Result<()> {
    let authorization = signer
        .authorize_standard(
            invoice_id,
            parse_seller(seller)?,
            parse_amount(amount).context("Invalid gross amount")?,
            parse_sector(sector),
            parse_amount(credits).context("Invalid seller credits")?,
        )
        .context("Failed to sign authorization")?;
    emit(&authorization, config)
}

pub fn authorize_simplified(
    signer: &AuthoritySigner,
    invoice_id: &str,
    seller: &str,
    amount: &str,
    sector: &str,
    config: &OracleConfig,
) -> Result<()> {
    let authorization = signer
        .authorize_simplified(
            invoice_id,
            parse_seller(seller)?,
            parse_amount(amount).context("Invalid gross amount")?,
            parse_sector(sector),
        )
        .context("Failed to sign authorization")?;
    emit(&authorization, config)
}

#[derive(Debug, Serialize)]
pub struct VerifyReport {
    pub valid: bool,
    pub invoice_id: String,
    pub expected: Address,
    pub recovered: Option<Address>,
}

/// Check a serialized authorization against a registered oracle address.
pub fn check_authorization(json: &str, oracle: &str) -> Result<VerifyReport> {
    let authorization: SignedAuthorization =
        serde_json::from_str(json).context("Malformed authorization")?;
    let expected: Address = oracle
        .parse()
        .with_context(|| format!("Invalid oracle address {:?}", oracle))?;

    Ok(VerifyReport {
        valid: verify_authorization(&authorization, &expected).is_ok(),
        invoice_id: authorization.invoice_id().to_string(),
        expected,
        recovered: recover_signer(&authorization),
    })
}

pub fn verify(file: &Path, oracle: &str, config: &OracleConfig) -> Result<()> {
    let json = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let report = check_authorization(&json, oracle)?;
    emit(&report, config)?;

    if !report.valid {
        bail!("Authorization for invoice {} was not signed by {}", report.invoice_id, oracle);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fiscal_oracle_core::U256;
    use tempfile::TempDir;

    const TEST_KEY: &str = "0x4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";
    const ORACLE: &str = "0x2c7536E3605D9C16a7a3D7b1898e529396a65c23";
    const SELLER: &str = "0x1234567890123456789012345678901234567890";

    fn key_file(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("oracle.key");
        std::fs::write(&path, TEST_KEY).unwrap();
        path
    }

    #[test]
    fn test_load_signer_prefers_cli_key() {
        let temp_dir = TempDir::new().unwrap();
        let path = key_file(&temp_dir);
        let config = SignerConfig {
            private_key_file: Some("/nonexistent/oracle.key".to_string()),
            allow_ephemeral: false,
        };

        let signer = load_signer(Some(&path), &config).unwrap();
        assert_eq!(signer.address().to_string(), ORACLE);
    }

    #[test]
    fn test_load_signer_from_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = key_file(&temp_dir);
        let config = SignerConfig {
            private_key_file: Some(path.to_string_lossy().into_owned()),
            allow_ephemeral: false,
        };

        let signer = load_signer(None, &config).unwrap();
        assert_eq!(signer.address().to_string(), ORACLE);
    }

    #[test]
    fn test_load_signer_ephemeral() {
        let allowed = SignerConfig::default();
        assert!(load_signer(None, &allowed).is_ok());

        let denied = SignerConfig {
            private_key_file: None,
            allow_ephemeral: false,
        };
        assert!(load_signer(None, &denied).is_err());
    }

    #[test]
    fn test_parse_sector_fallback() {
        assert_eq!(parse_sector("SAUDE"), Sector::Health);
        assert_eq!(parse_sector("MINERACAO"), Sector::Standard);
    }

    #[test]
    fn test_keygen_refuses_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let path = key_file(&temp_dir);
        let config = OracleConfig::default();

        assert!(keygen(&path, false, &config).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), TEST_KEY);

        keygen(&path, true, &config).unwrap();
        assert!(read_keyfile(&path).is_ok());
    }

    #[test]
    fn test_check_authorization() {
        let temp_dir = TempDir::new().unwrap();
        let signer = load_signer(Some(&key_file(&temp_dir)), &SignerConfig::default()).unwrap();
        let auth = signer
            .authorize_simplified(
                "NFe-7",
                parse_seller(SELLER).unwrap(),
                parse_amount("200").unwrap(),
                Sector::Standard,
            )
            .unwrap();
        let json = serde_json::to_string(&auth).unwrap();

        let report = check_authorization(&json, ORACLE).unwrap();
        assert!(report.valid);
        assert_eq!(report.recovered, Some(signer.address()));

        let report = check_authorization(&json, SELLER).unwrap();
        assert!(!report.valid);

        // Lowering the gross amount breaks the signature.
        let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
        value["gross_amount"] = (U256::from(100u64) * U256::exp10(18)).to_string().into();
        let report = check_authorization(&value.to_string(), ORACLE).unwrap();
        assert!(!report.valid);
        assert_ne!(report.recovered, Some(signer.address()));
    }
}
