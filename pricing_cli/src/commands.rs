//! Command handlers.
//!
//! Each handler loads the state it needs from disk, applies one operation and
//! writes the result back. Handlers return the value they produced so that `main`
//! decides how to print it.
use std::fs;
use std::path::Path;

use log::info;
use pricing_common::{
    CollateralConfig, CollateralMock, CompositeQuote, DeploymentManifest, Fix, PriceModel,
    PriceModelKind, Result,
};

use crate::args::CollateralArgs;

/// Create a collateral mock with four copies of one model and save it to `path`.
pub fn init(
    path: &Path,
    kind: PriceModelKind,
    curr: Fix,
    low: Option<Fix>,
    high: Option<Fix>,
    collateral: CollateralArgs,
) -> Result<CollateralMock> {
    let model = PriceModel::new(kind, curr, low.unwrap_or(curr), high.unwrap_or(curr))?;
    let config = CollateralConfig {
        erc20: collateral.erc20,
        max_trade_volume: collateral.max_trade_volume,
        default_threshold: collateral.default_threshold,
        delay_until_default: collateral.delay_until_default,
        reference_erc20: collateral.reference_erc20,
        target_name: collateral.target_name,
    };
    let mock = CollateralMock::new(config, model, model, model, model)?;
    save(path, &mock)?;
    info!("Collateral state written to {}", path.display());
    Ok(mock)
}

/// Current quote of the collateral stored at `path`.
pub fn quote(path: &Path) -> Result<CompositeQuote> {
    load(path)?.quote()
}

/// Apply a manual update to the collateral at `path` and return the new quote.
pub fn update(
    path: &Path,
    ref_per_tok: Fix,
    target_per_ref: Fix,
    uoa_per_target: Fix,
    deviation: Fix,
) -> Result<CompositeQuote> {
    let mut mock = load(path)?;
    mock.update(ref_per_tok, target_per_ref, uoa_per_target, deviation);
    let quote = mock.quote()?;
    save(path, &mock)?;
    Ok(quote)
}

/// Advance the collateral at `path` one seeded tick and return the new quote.
pub fn advance(path: &Path, seed: u64) -> Result<CompositeQuote> {
    let mut mock = load(path)?;
    mock.advance(seed)?;
    let quote = mock.quote()?;
    save(path, &mock)?;
    Ok(quote)
}

/// Upsert a deployment into the manifest at `path`, creating the file when missing.
pub fn record(path: &Path, name: &str, collateral: &str, erc20: &str) -> Result<DeploymentManifest> {
    let mut manifest = DeploymentManifest::load_or_default(path)?;
    manifest.record(name, collateral, erc20)?;
    manifest.save(path)?;
    info!(
        "Deployed collateral {}: {} (erc20 {})\n        Deployment file: {}",
        name,
        collateral,
        erc20,
        path.display()
    );
    Ok(manifest)
}

/// Manifest stored at `path`.
pub fn show(path: &Path) -> Result<DeploymentManifest> {
    DeploymentManifest::load(path)
}

fn load(path: &Path) -> Result<CollateralMock> {
    let bytes = fs::read(path)?;
    CollateralMock::from_json(&bytes)
}

fn save(path: &Path, mock: &CollateralMock) -> Result<()> {
    fs::write(path, mock.to_json()?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn fp(s: &str) -> Fix {
        s.parse().unwrap()
    }

    fn collateral_args() -> CollateralArgs {
        CollateralArgs {
            erc20: "TK".to_string(),
            reference_erc20: "BASE".to_string(),
            target_name: "USD".to_string(),
            max_trade_volume: fp("1e6"),
            default_threshold: fp("0.05"),
            delay_until_default: 86400,
        }
    }

    #[test]
    fn update_is_persisted_between_calls() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("coll.json");

        init(
            &path,
            PriceModelKind::Manual,
            fp("1"),
            Some(fp("0.1")),
            Some(fp("10")),
            collateral_args(),
        )
        .unwrap();
        assert_eq!(quote(&path).unwrap().price, fp("1"));

        let updated = update(&path, fp("0.5"), fp("3"), fp("7"), fp("0.1")).unwrap();
        assert_eq!(updated.price, fp("1.05"));
        assert_eq!(quote(&path).unwrap(), updated);
    }

    #[test]
    fn init_rejects_bad_bounds() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("coll.json");
        let result = init(
            &path,
            PriceModelKind::Band,
            fp("5"),
            Some(fp("0.1")),
            Some(fp("2")),
            collateral_args(),
        );
        assert!(result.is_err());
        assert!(!path.exists());
    }

    #[test]
    fn advance_moves_band_within_bounds() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("coll.json");
        init(
            &path,
            PriceModelKind::Band,
            fp("1"),
            Some(fp("0.5")),
            Some(fp("1.5")),
            collateral_args(),
        )
        .unwrap();
        let q = advance(&path, 3).unwrap();
        assert!(q.ref_per_tok >= fp("0.5") && q.ref_per_tok <= fp("1.5"));
        assert_eq!(quote(&path).unwrap(), q);
    }

    #[test]
    fn record_then_show() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("31337-tmp-assets-collateral.json");
        record(
            &path,
            "sUSDC",
            "0x5FbDB2315678afecb367f032d93F642f64180aa3",
            "0xe7f1725E7734CE288F8367e1Bb143E90bb3F0512",
        )
        .unwrap();
        let manifest = show(&path).unwrap();
        assert_eq!(manifest.collateral.len(), 1);
        assert!(record(&path, "bad", "0x00", "0x00").is_err());
        assert_eq!(show(&path).unwrap(), manifest);
    }
}
