// Copyright (c) 2024 The Botho Foundation

/// Errors parsing identifiers and tags from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Address must start with 0x")]
    MissingHexPrefix,

    #[error("Expected {expected} hex characters, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    #[error("Unknown sector: {0}")]
    UnknownSector(String),
}

/// Errors loading an [`OracleConfig`](crate::OracleConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}
