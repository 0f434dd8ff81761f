//! Command-line arguments for the pricing CLI.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use clap::{Args as ClapArgs, Parser, Subcommand};
use pricing_common::manifest::asset_collateral_filename;
use pricing_common::{Fix, PriceModelKind};

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Operation to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported operations.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Write a new collateral mock with the same model in all four slots.
    Init {
        /// Path of the collateral state file to create.
        #[clap(long)]
        config: String,
        /// Kind of the initial models.
        #[clap(long, value_enum, default_value_t = PriceModelKind::Manual)]
        kind: PriceModelKind,
        /// Initial current value.
        #[clap(long, default_value = "1")]
        curr: Fix,
        /// Lower bound (defaults to `curr`).
        #[clap(long)]
        low: Option<Fix>,
        /// Upper bound (defaults to `curr`).
        #[clap(long)]
        high: Option<Fix>,
        /// Static collateral parameters.
        #[command(flatten)]
        collateral: CollateralArgs,
    },
    /// Print the current quote as JSON.
    Quote {
        /// Path of the collateral state file.
        #[clap(long)]
        config: String,
    },
    /// Pin all four rates to manual values and save.
    Update {
        /// Path of the collateral state file.
        #[clap(long)]
        config: String,
        /// Reference units per token.
        #[clap(long)]
        ref_per_tok: Fix,
        /// Target units per reference unit.
        #[clap(long)]
        target_per_ref: Fix,
        /// Unit of account per target unit.
        #[clap(long)]
        uoa_per_target: Fix,
        /// Multiplier applied to the product.
        #[clap(long)]
        deviation: Fix,
    },
    /// Move range-based models one seeded tick and save.
    Advance {
        /// Path of the collateral state file.
        #[clap(long)]
        config: String,
        /// Seed for the tick.
        #[clap(long)]
        seed: u64,
    },
    /// Record a deployed collateral in the deployment manifest.
    Record {
        /// Manifest location.
        #[command(flatten)]
        manifest: ManifestArgs,
        /// Short collateral name, e.g. `sUSDC`.
        #[clap(long)]
        name: String,
        /// Collateral plugin address.
        #[clap(long)]
        collateral: String,
        /// Wrapped token address.
        #[clap(long)]
        erc20: String,
    },
    /// Print the deployment manifest.
    Show {
        /// Manifest location.
        #[command(flatten)]
        manifest: ManifestArgs,
    },
}

/// Static parameters of a new collateral.
#[derive(Debug, ClapArgs)]
pub struct CollateralArgs {
    /// Collateral token identifier.
    #[clap(long, default_value = "TK")]
    pub erc20: String,
    /// Reference token identifier.
    #[clap(long, default_value = "BASE")]
    pub reference_erc20: String,
    /// Target unit name.
    #[clap(long, default_value = "USD")]
    pub target_name: String,
    /// Largest trade size in unit of account.
    #[clap(long, default_value = "1e6")]
    pub max_trade_volume: Fix,
    /// Tolerated deviation from peg.
    #[clap(long, default_value = "0.05")]
    pub default_threshold: Fix,
    /// Seconds before an iffy collateral defaults.
    #[clap(long, default_value_t = 86400)]
    pub delay_until_default: u64,
}

/// Where the deployment manifest lives.
#[derive(Debug, ClapArgs)]
pub struct ManifestArgs {
    /// Explicit manifest path; overrides `--chain-id`.
    #[clap(long)]
    pub manifest: Option<String>,
    /// Chain id used to derive the default manifest file name.
    #[clap(long, default_value_t = 31337)]
    pub chain_id: u64,
}

impl ManifestArgs {
    /// Manifest path as given, or derived from the chain id.
    pub fn path(&self) -> String {
        self.manifest
            .clone()
            .unwrap_or_else(|| asset_collateral_filename(self.chain_id))
    }
}
