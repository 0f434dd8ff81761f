//! Collateral mock valued through a [`PriceModelEngine`].
//!
//! Mirrors the constructor parameters of an on-chain collateral plugin (token,
//! trade volume limit, default threshold and delay, reference token, target name)
//! and answers the price queries a caller would make against it. Everything lives
//! in memory; the CLI persists it as JSON between invocations.
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::engine::PriceModelEngine;
use crate::error::PricingError;
use crate::fixed::Fix;
use crate::price_model::PriceModel;
use crate::quote::CompositeQuote;
use crate::result::Result;

/// Longest target name accepted, matching a null-terminated `bytes32` short string.
pub const MAX_TARGET_NAME_LEN: usize = 31;

/// Static parameters of a collateral.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollateralConfig {
    /// Collateral token identifier.
    pub erc20: String,
    /// Largest trade size, in unit of account.
    pub max_trade_volume: Fix,
    /// Fraction of deviation from peg tolerated before default (`<= 1`).
    pub default_threshold: Fix,
    /// Seconds an iffy collateral waits before it is considered defaulted.
    pub delay_until_default: u64,
    /// Reference (underlying) token identifier.
    pub reference_erc20: String,
    /// Name of the target unit, e.g. `USD`.
    pub target_name: String,
}

impl CollateralConfig {
    /// Check the configuration for values the collateral cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.erc20.trim().is_empty() {
            return Err(PricingError::InvalidConfig("erc20 is empty".to_string()));
        }
        if self.reference_erc20.trim().is_empty() {
            return Err(PricingError::InvalidConfig(
                "reference erc20 is empty".to_string(),
            ));
        }
        if self.default_threshold > Fix::ONE {
            return Err(PricingError::InvalidConfig(format!(
                "default threshold {} is above 1",
                self.default_threshold
            )));
        }
        if self.target_name.is_empty()
            || self.target_name.len() > MAX_TARGET_NAME_LEN
            || !self.target_name.is_ascii()
        {
            return Err(PricingError::InvalidConfig(format!(
                "target name {:?} must be 1..={} ASCII bytes",
                self.target_name, MAX_TARGET_NAME_LEN
            )));
        }
        Ok(())
    }
}

/// A collateral whose price is produced by four price models.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollateralMock {
    config: CollateralConfig,
    models: PriceModelEngine,
}

impl CollateralMock {
    /// Validate `config` and assemble the mock.
    pub fn new(
        config: CollateralConfig,
        ref_per_tok: PriceModel,
        target_per_ref: PriceModel,
        uoa_per_target: PriceModel,
        deviation: PriceModel,
    ) -> Result<Self> {
        config.validate()?;
        for model in [&ref_per_tok, &target_per_ref, &uoa_per_target, &deviation] {
            model.validate()?;
        }
        info!(
            "Collateral {} created (target {})",
            config.erc20, config.target_name
        );
        Ok(Self {
            config,
            models: PriceModelEngine::new(ref_per_tok, target_per_ref, uoa_per_target, deviation),
        })
    }

    /// Static parameters.
    pub fn config(&self) -> &CollateralConfig {
        &self.config
    }

    /// Underlying models.
    pub fn models(&self) -> &PriceModelEngine {
        &self.models
    }

    /// Full quote.
    pub fn quote(&self) -> Result<CompositeQuote> {
        self.models.quote()
    }

    /// Unit of account per token.
    pub fn price(&self) -> Result<Fix> {
        Ok(self.quote()?.price)
    }

    /// Reference units per token.
    pub fn ref_per_tok(&self) -> Result<Fix> {
        self.models.ref_per_tok().evaluate()
    }

    /// Target units per reference unit.
    pub fn target_per_ref(&self) -> Result<Fix> {
        self.models.target_per_ref().evaluate()
    }

    /// Unit of account per target unit.
    pub fn price_per_target(&self) -> Result<Fix> {
        self.models.uoa_per_target().evaluate()
    }

    /// Pin all four rates to new manual values.
    pub fn update(
        &mut self,
        ref_per_tok: Fix,
        target_per_ref: Fix,
        uoa_per_target: Fix,
        deviation: Fix,
    ) {
        self.models
            .update(ref_per_tok, target_per_ref, uoa_per_target, deviation);
        debug!("Collateral {} updated", self.config.erc20);
    }

    /// Advance range-based models by one seeded tick.
    pub fn advance(&mut self, seed: u64) -> Result<()> {
        self.models.advance(seed)?;
        debug!("Collateral {} advanced (seed {})", self.config.erc20, seed);
        Ok(())
    }

    /// Read a mock previously written with [`CollateralMock::to_json`].
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        let mock: CollateralMock = serde_json::from_slice(bytes)?;
        mock.config.validate()?;
        Ok(mock)
    }

    /// Pretty-printed JSON form.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
