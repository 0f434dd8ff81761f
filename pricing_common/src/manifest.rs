//! Deployment manifest for collaterals and their wrapped tokens.
//!
//! The manifest is a JSON object with two maps, `collateral` and `erc20s`, both
//! keyed by a short collateral name (e.g. `sUSDC`). The file is shared with other
//! deployment steps, so any other top-level keys (such as `assets`) are carried
//! through untouched. It is rewritten as a whole on every save, pretty printed
//! with two-space indentation.
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::PricingError;
use crate::result::Result;

/// File name of the asset/collateral manifest for a chain.
pub fn asset_collateral_filename(chain_id: u64) -> String {
    format!("{}-tmp-assets-collateral.json", chain_id)
}

/// Deployed collateral and token addresses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeploymentManifest {
    /// Collateral plugin address per name.
    #[serde(default)]
    pub collateral: BTreeMap<String, String>,
    /// Wrapped token address per name.
    #[serde(default)]
    pub erc20s: BTreeMap<String, String>,
    /// Sections owned by other deployment steps, preserved as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DeploymentManifest {
    /// Read a manifest from `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path)?;
        let manifest: DeploymentManifest = serde_json::from_slice(&bytes)?;
        debug!(
            "Loaded manifest {} ({} collateral)",
            path.display(),
            manifest.collateral.len()
        );
        Ok(manifest)
    }

    /// Read a manifest, or start an empty one when the file does not exist yet.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            info!("Manifest {} not found, starting empty", path.display());
            Ok(Self::default())
        }
    }

    /// Write the manifest to `path`, replacing any previous content.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        debug!("Manifest written to {}", path.display());
        Ok(())
    }

    /// Record a deployed collateral and its token, overwriting a previous entry of the same name.
    pub fn record(&mut self, name: &str, collateral: &str, erc20: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(PricingError::InvalidConfig(
                "collateral name is empty".to_string(),
            ));
        }
        validate_address(collateral)?;
        validate_address(erc20)?;
        if let Some(previous) = self.collateral.insert(name.to_string(), collateral.to_string()) {
            info!("Replacing collateral {} (was {})", name, previous);
        }
        self.erc20s.insert(name.to_string(), erc20.to_string());
        Ok(())
    }
}

/// Accept `0x` followed by exactly 40 hex digits.
pub fn validate_address(addr: &str) -> Result<()> {
    let valid = addr
        .strip_prefix("0x")
        .is_some_and(|hex| hex.len() == 40 && hex.chars().all(|c| c.is_ascii_hexdigit()));
    if valid {
        Ok(())
    } else {
        Err(PricingError::InvalidAddress(addr.to_string()))
    }
}
