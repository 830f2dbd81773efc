// Copyright (c) 2024 The Botho Foundation

//! Fiscal Oracle CLI
//!
//! Computes split-payment tax breakdowns and issues signed authorizations
//! that a settlement contract can verify against the oracle address.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use fiscal_oracle_core::{OracleConfig, TaxEngine};
use std::path::PathBuf;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

mod amount;
mod commands;

/// Fiscal Oracle - split-payment tax authorizations
#[derive(Parser, Debug)]
#[command(name = "fiscal-oracle")]
#[command(about = "Tax authority oracle for split-payment settlement")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, default_value = "fiscal-oracle.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Oracle private key file (overrides the configuration)
    #[arg(short, long, global = true)]
    key_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the oracle signing address
    Address,

    /// Generate a new oracle key file
    Keygen {
        /// Output file path
        #[arg(short, long)]
        out: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Compute a tax breakdown without signing it
    Quote {
        #[command(subcommand)]
        regime: Regime,
    },

    /// Compute and sign an authorization for an invoice
    Authorize {
        /// Invoice identifier (e.g. the NF-e access key)
        #[arg(short, long)]
        invoice: String,

        /// Seller address receiving the net amount
        #[arg(short, long)]
        seller: String,

        #[command(subcommand)]
        regime: Regime,
    },

    /// Check a signed authorization against an oracle address
    Verify {
        /// JSON file holding the authorization
        #[arg(short, long)]
        file: PathBuf,

        /// Registered oracle address
        #[arg(long)]
        oracle: String,
    },
}

#[derive(Args, Debug)]
struct InvoiceAmount {
    /// Gross amount in currency units (e.g. 1000.50)
    amount: String,

    /// Sector tag such as PADRAO, SAUDE or CESTA_BASICA
    #[arg(long, default_value = "PADRAO")]
    sector: String,
}

#[derive(Subcommand, Debug)]
enum Regime {
    /// Standard regime (Art. 32): federal, state and municipal split
    Standard {
        #[command(flatten)]
        invoice: InvoiceAmount,

        /// Input tax credits held by the seller
        #[arg(long, default_value = "0")]
        credits: String,
    },

    /// Simplified regime (Art. 33): single flat rate
    Simplified {
        #[command(flatten)]
        invoice: InvoiceAmount,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays machine-readable.
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to install log subscriber")?;

    let config = if cli.config.exists() {
        debug!("Loading configuration from {}", cli.config.display());
        OracleConfig::from_file(&cli.config)
            .with_context(|| format!("Failed to load {}", cli.config.display()))?
    } else {
        debug!("Using default configuration");
        OracleConfig::default()
    };

    let signer = || commands::load_signer(cli.key_file.as_deref(), &config.signer);

    match cli.command {
        Commands::Address => commands::address(&signer()?, &config),
        Commands::Keygen { ref out, force } => commands::keygen(out, force, &config),
        Commands::Quote { ref regime } => match regime {
            Regime::Standard { invoice, credits } => commands::quote_standard(
                &TaxEngine::default(),
                &invoice.amount,
                &invoice.sector,
                credits,
                &config,
            ),
            Regime::Simplified { invoice } => commands::quote_simplified(
                &TaxEngine::default(),
                &invoice.amount,
                &invoice.sector,
                &config,
            ),
        },
        Commands::Authorize {
            ref invoice,
            ref seller,
            ref regime,
        } => match regime {
            Regime::Standard {
                invoice: amount,
                credits,
            } => commands::authorize_standard(
                &signer()?,
                invoice,
                seller,
                &amount.amount,
                &amount.sector,
                credits,
                &config,
            ),
            Regime::Simplified { invoice: amount } => commands::authorize_simplified(
                &signer()?,
                invoice,
                seller,
                &amount.amount,
                &amount.sector,
                &config,
            ),
        },
        Commands::Verify { ref file, ref oracle } => commands::verify(file, oracle, &config),
    }
}
