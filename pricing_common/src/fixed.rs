//! Unsigned decimal fixed-point numbers with up to 18 fractional digits.
//!
//! `Fix` wraps a non-negative `rust_decimal::Decimal`. Every arithmetic result is
//! rounded back to 18 fractional digits with an explicit `RoundingMode`, so the
//! values behave like on-chain `1e18`-scaled integers while staying exact for
//! decimal inputs such as `0.1` or `1.05`.
//!
//! Values are written as plain decimal strings (`"1.05"`, `"3"`) and also accept an
//! integer exponent (`"1e6"`, `"5e-2"`). Serde goes through `Decimal`, so state files
//! may hold either strings or JSON numbers.
use std::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::PricingError;
use crate::result::Result;

/// Number of fractional decimal digits carried by `Fix`.
pub const FIX_DECIMALS: u32 = 18;
/// Scale factor of the integer form used on chain (`1.0 == 10^18`).
pub const FIX_SCALE: u128 = 1_000_000_000_000_000_000;

/// How to resolve digits beyond the 18th fractional place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoundingMode {
    /// Truncate towards zero.
    #[default]
    Floor,
    /// Round half up.
    Round,
    /// Round any remainder up.
    Ceil,
}

impl RoundingMode {
    fn strategy(self) -> RoundingStrategy {
        match self {
            RoundingMode::Floor => RoundingStrategy::ToZero,
            RoundingMode::Round => RoundingStrategy::MidpointAwayFromZero,
            RoundingMode::Ceil => RoundingStrategy::AwayFromZero,
        }
    }
}

/// Non-negative decimal with at most 18 fractional digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Fix(Decimal);

impl Fix {
    /// `0.0`
    pub const ZERO: Fix = Fix(Decimal::ZERO);
    /// `1.0`
    pub const ONE: Fix = Fix(Decimal::ONE);
    /// Smallest positive value, `10^-18`.
    pub const EPSILON: Fix = Fix(Decimal::from_parts(1, 0, 0, false, FIX_DECIMALS));
    /// Largest representable value.
    pub const MAX: Fix = Fix(Decimal::MAX);

    /// `n / 100` as a constant.
    pub const fn percent(n: u32) -> Fix {
        Fix(Decimal::from_parts(n, 0, 0, false, 2))
    }

    /// Whole number `n`.
    pub fn from_int(n: u64) -> Self {
        Fix(Decimal::from(n))
    }

    /// Value from its `10^18`-scaled integer form.
    ///
    /// Past 28 significant digits the trailing fractional digits are rounded away.
    pub fn from_scaled(raw: u128) -> Result<Self> {
        let overflow =
            |e: rust_decimal::Error| PricingError::Overflow(format!("scaled value {}: {}", raw, e));
        // both parts fit in i128: the whole part is below 3.5e20
        let whole =
            Decimal::try_from_i128_with_scale((raw / FIX_SCALE) as i128, 0).map_err(overflow)?;
        let frac = Decimal::try_from_i128_with_scale((raw % FIX_SCALE) as i128, FIX_DECIMALS)
            .map_err(overflow)?;
        let value = whole
            .checked_add(frac)
            .ok_or_else(|| PricingError::Overflow(format!("scaled value {}", raw)))?;
        Fix::from_decimal(value, RoundingMode::Floor)
    }

    /// Validate a decimal, rounding it to 18 fractional digits with `rounding`.
    pub fn from_decimal(value: Decimal, rounding: RoundingMode) -> Result<Self> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(PricingError::Underflow(format!("{} is negative", value)));
        }
        let rounded = value
            .round_dp_with_strategy(FIX_DECIMALS, rounding.strategy())
            .normalize();
        Ok(Fix(rounded.abs()))
    }

    /// Underlying decimal.
    pub fn as_decimal(self) -> Decimal {
        self.0
    }

    /// `self + other`.
    pub fn add(self, other: Fix) -> Result<Fix> {
        let sum = self
            .0
            .checked_add(other.0)
            .ok_or_else(|| PricingError::Overflow(format!("{} + {}", self, other)))?;
        Fix::from_decimal(sum, RoundingMode::Floor)
    }

    /// `self - other`, failing below zero.
    pub fn sub(self, other: Fix) -> Result<Fix> {
        if other > self {
            return Err(PricingError::Underflow(format!("{} - {}", self, other)));
        }
        let diff = self
            .0
            .checked_sub(other.0)
            .ok_or_else(|| PricingError::Underflow(format!("{} - {}", self, other)))?;
        Fix::from_decimal(diff, RoundingMode::Floor)
    }

    /// `self * other`, rounded down.
    pub fn mul(self, other: Fix) -> Result<Fix> {
        self.mul_rnd(other, RoundingMode::Floor)
    }

    /// `self * other` with an explicit rounding mode.
    pub fn mul_rnd(self, other: Fix, rounding: RoundingMode) -> Result<Fix> {
        let product = self
            .0
            .checked_mul(other.0)
            .ok_or_else(|| PricingError::Overflow(format!("{} * {}", self, other)))?;
        Fix::from_decimal(product, rounding)
    }

    /// `self * other`, clamped to [`Fix::MAX`] instead of failing.
    pub fn saturating_mul_rnd(self, other: Fix, rounding: RoundingMode) -> Fix {
        self.mul_rnd(other, rounding).unwrap_or(Fix::MAX)
    }

    /// `self / other`, rounded down.
    pub fn div(self, other: Fix) -> Result<Fix> {
        self.div_rnd(other, RoundingMode::Floor)
    }

    /// `self / other` with an explicit rounding mode.
    pub fn div_rnd(self, other: Fix, rounding: RoundingMode) -> Result<Fix> {
        if other.0.is_zero() {
            return Err(PricingError::DivisionByZero);
        }
        let quotient = self
            .0
            .checked_div(other.0)
            .ok_or_else(|| PricingError::Overflow(format!("{} / {}", self, other)))?;
        Fix::from_decimal(quotient, rounding)
    }

    /// Restrict `self` to `[low, high]`.
    pub fn clamp_to(self, low: Fix, high: Fix) -> Fix {
        self.max(low).min(high)
    }
}

impl fmt::Display for Fix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.normalize(), f)
    }
}

impl FromStr for Fix {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self> {
        let input = s.trim();
        let parsed = if input.contains(['e', 'E']) {
            Decimal::from_scientific(input)
        } else {
            Decimal::from_str(input)
        }
        .map_err(|e| PricingError::ParseFix(format!("{:?}: {}", input, e)))?;

        let value = parsed.normalize();
        if value.is_sign_negative() && !value.is_zero() {
            return Err(PricingError::ParseFix(format!("{:?}: negative value", input)));
        }
        if value.scale() > FIX_DECIMALS {
            return Err(PricingError::ParseFix(format!(
                "{:?}: more than {} fractional digits",
                input, FIX_DECIMALS
            )));
        }
        Ok(Fix(value.abs()))
    }
}

impl TryFrom<Decimal> for Fix {
    type Error = PricingError;

    fn try_from(value: Decimal) -> Result<Self> {
        Fix::from_decimal(value, RoundingMode::Round)
    }
}

impl From<Fix> for Decimal {
    fn from(value: Fix) -> Decimal {
        value.0
    }
}
