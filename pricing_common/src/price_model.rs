//! Declarative price models.
//!
//! A `PriceModel` describes one rate used to value a collateral (for example the
//! reference units per token). Every model carries a current value and the
//! `[low, high]` range it is allowed to move in:
//!
//! - `CONSTANT` and `MANUAL` models only change when they are replaced.
//! - `BAND` models jump to a uniform value inside `[low, high]` on every tick.
//! - `WALK` models move by at most 1% per tick and stay inside `[low, high]`.
//!
//! Models are immutable: [`PriceModel::advance`] returns a new model instead of
//! mutating in place. Evaluation is always deterministic and returns `curr`.
use clap::ValueEnum;
use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::error::PricingError;
use crate::fixed::{FIX_SCALE, Fix, RoundingMode};
use crate::result::Result;

/// Maximum relative step of a `WALK` model per tick (1%).
pub const WALK_STEP: Fix = Fix::percent(1);

/// The ways a rate can be derived.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    Serialize,
    Deserialize,
    ValueEnum,
    Display,
    EnumString,
    Hash,
    Eq,
    PartialEq,
)]
#[serde(rename_all = "UPPERCASE")]
#[clap(rename_all = "lower")]
#[strum(ascii_case_insensitive, serialize_all = "UPPERCASE")]
pub enum PriceModelKind {
    /// Fixed value, never moves.
    Constant,
    /// Changed only by explicit updates.
    #[default]
    Manual,
    /// Uniform draw inside the band on each tick.
    Band,
    /// Bounded random walk.
    Walk,
}

/// One rate with its current value and allowed range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPriceModel")]
pub struct PriceModel {
    kind: PriceModelKind,
    curr: Fix,
    low: Fix,
    high: Fix,
}

/// Unchecked wire form, validated on the way in.
#[derive(Deserialize)]
struct RawPriceModel {
    kind: PriceModelKind,
    curr: Fix,
    low: Fix,
    high: Fix,
}

impl TryFrom<RawPriceModel> for PriceModel {
    type Error = PricingError;

    fn try_from(raw: RawPriceModel) -> Result<Self> {
        PriceModel::new(raw.kind, raw.curr, raw.low, raw.high)
    }
}

impl PriceModel {
    /// Build a model, rejecting bounds that do not satisfy `low <= curr <= high`.
    pub fn new(kind: PriceModelKind, curr: Fix, low: Fix, high: Fix) -> Result<Self> {
        let model = PriceModel { kind, curr, low, high };
        model.validate()?;
        Ok(model)
    }

    /// Manual model pinned to `curr` (`low = curr = high`).
    pub fn manual(curr: Fix) -> Self {
        PriceModel {
            kind: PriceModelKind::Manual,
            curr,
            low: curr,
            high: curr,
        }
    }

    /// Constant model pinned to `value`.
    pub fn constant(value: Fix) -> Self {
        PriceModel {
            kind: PriceModelKind::Constant,
            curr: value,
            low: value,
            high: value,
        }
    }

    /// Model kind.
    pub fn kind(&self) -> PriceModelKind {
        self.kind
    }

    /// Current value.
    pub fn curr(&self) -> Fix {
        self.curr
    }

    /// Lower bound.
    pub fn low(&self) -> Fix {
        self.low
    }

    /// Upper bound.
    pub fn high(&self) -> Fix {
        self.high
    }

    /// Check the `low <= curr <= high` invariant.
    pub fn validate(&self) -> Result<()> {
        if self.low > self.high {
            return Err(PricingError::InvalidModel(format!(
                "low {} is above high {}",
                self.low, self.high
            )));
        }
        if self.low > self.curr {
            return Err(PricingError::InvalidModel(format!(
                "curr {} is below low {}",
                self.curr, self.low
            )));
        }
        if self.curr > self.high {
            return Err(PricingError::InvalidModel(format!(
                "curr {} is above high {}",
                self.curr, self.high
            )));
        }
        Ok(())
    }

    /// Value the model currently yields. Always inside `[low, high]`.
    pub fn evaluate(&self) -> Result<Fix> {
        self.validate()?;
        Ok(self.curr)
    }

    /// Produce the model for the next tick, drawing randomness from `rng`.
    ///
    /// `CONSTANT` and `MANUAL` models are returned unchanged. A `WALK` step is at
    /// least [`Fix::EPSILON`], so models sitting at or near zero still move.
    pub fn advance<R: Rng>(&self, rng: &mut R) -> Result<PriceModel> {
        let curr = match self.kind {
            PriceModelKind::Constant | PriceModelKind::Manual => return Ok(*self),
            PriceModelKind::Band => {
                let span = self.high.sub(self.low)?;
                let offset = span.mul_rnd(unit_draw(rng)?, RoundingMode::Round)?;
                self.low.add(offset)?.clamp_to(self.low, self.high)
            }
            PriceModelKind::Walk => {
                let step = self.curr.mul(WALK_STEP)?.max(Fix::EPSILON);
                let offset = step.add(step)?.mul_rnd(unit_draw(rng)?, RoundingMode::Round)?;
                let moved = if offset >= step {
                    self.curr.add(offset.sub(step)?).unwrap_or(Fix::MAX)
                } else {
                    self.curr.sub(step.sub(offset)?).unwrap_or(Fix::ZERO)
                };
                moved.clamp_to(self.low, self.high)
            }
        };
        debug!("{} model moved {} -> {}", self.kind, self.curr, curr);
        PriceModel::new(self.kind, curr, self.low, self.high)
    }
}

/// Uniform draw from `[0, 1]` on the 18-digit grid.
fn unit_draw<R: Rng>(rng: &mut R) -> Result<Fix> {
    Fix::from_scaled(rng.random_range(0..=FIX_SCALE))
}

/// Evaluate `model`, see [`PriceModel::evaluate`].
pub fn evaluate(model: &PriceModel) -> Result<Fix> {
    model.evaluate()
}
