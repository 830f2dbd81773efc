// Copyright (c) 2024 The Botho Foundation

//! Oracle configuration types.
//!
//! Rate tables are deliberately absent: they are compiled in and cannot be
//! changed at runtime.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Main oracle configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleConfig {
    /// Signing key settings
    #[serde(default)]
    pub signer: SignerConfig,

    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,
}

/// Where the oracle signing key comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignerConfig {
    /// Path to a file holding the hex-encoded private key
    pub private_key_file: Option<String>,

    /// Generate a throwaway key when no key file is configured
    #[serde(default = "default_allow_ephemeral")]
    pub allow_ephemeral: bool,
}

fn default_allow_ephemeral() -> bool {
    true
}

impl Default for SignerConfig {
    fn default() -> Self {
        Self {
            private_key_file: None,
            allow_ephemeral: default_allow_ephemeral(),
        }
    }
}

/// How results are written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Pretty-print JSON output
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

fn default_pretty() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: default_pretty(),
        }
    }
}

impl OracleConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}
