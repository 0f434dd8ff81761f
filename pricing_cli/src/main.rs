//! Pricing CLI — evaluates collateral price models stored in a JSON state file and
//! maintains the deployment manifest of collateral addresses.
//!
//! Usage example (CLI):
//! ```bash
//! pricing_cli init --config ./coll.json --kind manual --curr 1 --low 0.1 --high 10
//! pricing_cli update --config ./coll.json --ref-per-tok 0.5 --target-per-ref 3 \
//!     --uoa-per-target 7 --deviation 0.1
//! pricing_cli quote --config ./coll.json
//! pricing_cli record --chain-id 1 --name sUSDC --collateral 0x... --erc20 0x...
//! ```
//!
//! Results are printed to stdout as JSON; logs go to stderr and honour `RUST_LOG`.
#![warn(missing_docs)]
mod args;
mod commands;

use crate::args::{Args, Command};
use clap::Parser;
use log::info;
use pricing_common::PricingError;
use pricing_common::Result;
use serde::Serialize;
use std::path::PathBuf;

fn main() -> Result<(), PricingError> {
    init_logger();
    let args = Args::parse();

    match args.command {
        Command::Init {
            config,
            kind,
            curr,
            low,
            high,
            collateral,
        } => {
            let mock = commands::init(&normalize_path(&config), kind, curr, low, high, collateral)?;
            print_json(&mock.quote()?)
        }
        Command::Quote { config } => {
            let quote = commands::quote(&normalize_path(&config))?;
            info!(
                "QUOTE: price={} refPerTok={} targetPerRef={} pricePerTarget={}",
                quote.price, quote.ref_per_tok, quote.target_per_ref, quote.price_per_target
            );
            print_json(&quote)
        }
        Command::Update {
            config,
            ref_per_tok,
            target_per_ref,
            uoa_per_target,
            deviation,
        } => {
            let quote = commands::update(
                &normalize_path(&config),
                ref_per_tok,
                target_per_ref,
                uoa_per_target,
                deviation,
            )?;
            print_json(&quote)
        }
        Command::Advance { config, seed } => {
            let quote = commands::advance(&normalize_path(&config), seed)?;
            print_json(&quote)
        }
        Command::Record {
            manifest,
            name,
            collateral,
            erc20,
        } => {
            let manifest =
                commands::record(&normalize_path(&manifest.path()), &name, &collateral, &erc20)?;
            print_json(&manifest)
        }
        Command::Show { manifest } => {
            let manifest = commands::show(&normalize_path(&manifest.path()))?;
            print_json(&manifest)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}

/// Normalize a CLI-provided path string by trimming whitespace and matching quotes.
///
/// This allows passing Windows paths in quotes without breaking parsing.
fn normalize_path(raw: &str) -> PathBuf {
    let trimmed = raw.trim();
    let no_quotes = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed);
    PathBuf::from(no_quotes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_path_strips_quotes_and_whitespace() {
        assert_eq!(normalize_path("  \"C:\\data\\coll.json\" "), PathBuf::from("C:\\data\\coll.json"));
        assert_eq!(normalize_path("./coll.json"), PathBuf::from("./coll.json"));
        assert_eq!(normalize_path("\"unbalanced"), PathBuf::from("\"unbalanced"));
    }

    #[test]
    fn cli_parses_update_values() {
        let args = Args::try_parse_from([
            "pricing_cli",
            "update",
            "--config",
            "coll.json",
            "--ref-per-tok",
            "0.5",
            "--target-per-ref",
            "3",
            "--uoa-per-target",
            "7",
            "--deviation",
            "0.1",
        ])
        .unwrap();
        match args.command {
            Command::Update { deviation, .. } => assert_eq!(deviation.to_string(), "0.1"),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn manifest_path_defaults_to_chain_file() {
        let args = Args::try_parse_from(["pricing_cli", "show", "--chain-id", "5"]).unwrap();
        match args.command {
            Command::Show { manifest } => assert_eq!(manifest.path(), "5-tmp-assets-collateral.json"),
            other => panic!("unexpected command {:?}", other),
        }
    }
}
