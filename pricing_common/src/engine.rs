//! Price model engine.
//!
//! Owns the four models that value a collateral and exposes the read (`quote`)
//! and write (`update`, `advance`) operations. The engine is plain data: it is not
//! synchronized, so concurrent writers need an outer `Mutex`/`RwLock`.
use log::debug;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::fixed::Fix;
use crate::price_model::PriceModel;
use crate::quote::{CompositeQuote, quote};
use crate::result::Result;

/// The four rates combined into a collateral price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceModelEngine {
    ref_per_tok: PriceModel,
    target_per_ref: PriceModel,
    uoa_per_target: PriceModel,
    deviation: PriceModel,
}

impl PriceModelEngine {
    /// Create an engine from already validated models.
    pub fn new(
        ref_per_tok: PriceModel,
        target_per_ref: PriceModel,
        uoa_per_target: PriceModel,
        deviation: PriceModel,
    ) -> Self {
        Self {
            ref_per_tok,
            target_per_ref,
            uoa_per_target,
            deviation,
        }
    }

    /// Engine with the same model in all four slots.
    pub fn uniform(model: PriceModel) -> Self {
        Self::new(model, model, model, model)
    }

    /// Current quote. Pure: two calls without a write in between agree.
    pub fn quote(&self) -> Result<CompositeQuote> {
        quote(
            &self.ref_per_tok,
            &self.target_per_ref,
            &self.uoa_per_target,
            &self.deviation,
        )
    }

    /// Replace all four models with manual models pinned to the given values.
    pub fn update(
        &mut self,
        ref_per_tok: Fix,
        target_per_ref: Fix,
        uoa_per_target: Fix,
        deviation: Fix,
    ) {
        debug!(
            "Manual update: refPerTok={} targetPerRef={} uoaPerTarget={} deviation={}",
            ref_per_tok, target_per_ref, uoa_per_target, deviation
        );
        self.ref_per_tok = PriceModel::manual(ref_per_tok);
        self.target_per_ref = PriceModel::manual(target_per_ref);
        self.uoa_per_target = PriceModel::manual(uoa_per_target);
        self.deviation = PriceModel::manual(deviation);
    }

    /// Move every range-based model one tick using randomness derived from `seed`.
    ///
    /// Models are advanced in the order refPerTok, targetPerRef, uoaPerTarget,
    /// deviation from one `StdRng`, so the same seed always yields the same engine.
    /// Nothing is replaced unless all four transitions succeed.
    pub fn advance(&mut self, seed: u64) -> Result<()> {
        let mut rng = StdRng::seed_from_u64(seed);
        let ref_per_tok = self.ref_per_tok.advance(&mut rng)?;
        let target_per_ref = self.target_per_ref.advance(&mut rng)?;
        let uoa_per_target = self.uoa_per_target.advance(&mut rng)?;
        let deviation = self.deviation.advance(&mut rng)?;
        *self = Self::new(ref_per_tok, target_per_ref, uoa_per_target, deviation);
        debug!("Advanced price models with seed {}", seed);
        Ok(())
    }

    /// Reference-per-token model.
    pub fn ref_per_tok(&self) -> &PriceModel {
        &self.ref_per_tok
    }

    /// Target-per-reference model.
    pub fn target_per_ref(&self) -> &PriceModel {
        &self.target_per_ref
    }

    /// Unit-of-account-per-target model.
    pub fn uoa_per_target(&self) -> &PriceModel {
        &self.uoa_per_target
    }

    /// Deviation multiplier model.
    pub fn deviation(&self) -> &PriceModel {
        &self.deviation
    }
}
