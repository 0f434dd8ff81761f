//! Composite price quote built from four price models.
//!
//! A `CompositeQuote` is derived on demand and never stored:
//!
//! `price = refPerTok * targetPerRef * uoaPerTarget * deviation`
//!
//! The deviation model's current value is applied as a plain multiplier. The
//! `low`/`high` bounds propagate each model's range through the same product,
//! rounding outwards so that `low <= price <= high` always holds.
use serde::{Deserialize, Serialize};

use crate::fixed::{Fix, RoundingMode};
use crate::price_model::PriceModel;
use crate::result::Result;

/// Price of one collateral token in the unit of account, with its components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeQuote {
    /// Unit of account per token, after the deviation multiplier.
    pub price: Fix,
    /// Reference units per token.
    pub ref_per_tok: Fix,
    /// Target units per reference unit.
    pub target_per_ref: Fix,
    /// Unit of account per target unit.
    pub price_per_target: Fix,
    /// Lowest price reachable within the models' bounds.
    pub low: Fix,
    /// Highest price reachable within the models' bounds.
    pub high: Fix,
}

/// Combine four models into a [`CompositeQuote`].
pub fn quote(
    ref_per_tok: &PriceModel,
    target_per_ref: &PriceModel,
    uoa_per_target: &PriceModel,
    deviation: &PriceModel,
) -> Result<CompositeQuote> {
    let ref_value = ref_per_tok.evaluate()?;
    let target_value = target_per_ref.evaluate()?;
    let uoa_value = uoa_per_target.evaluate()?;
    let deviation_value = deviation.evaluate()?;

    let price = [ref_value, target_value, uoa_value, deviation_value]
        .into_iter()
        .try_fold(Fix::ONE, |acc, factor| acc.mul(factor))?;
    // bounds never fail the quote; high saturates at Fix::MAX. Products past 28
    // significant digits are rounded internally, so bracket price explicitly.
    let low = bound(
        [ref_per_tok.low(), target_per_ref.low(), uoa_per_target.low(), deviation.low()],
        RoundingMode::Floor,
    )
    .min(price);
    let high = bound(
        [ref_per_tok.high(), target_per_ref.high(), uoa_per_target.high(), deviation.high()],
        RoundingMode::Ceil,
    )
    .max(price);

    Ok(CompositeQuote {
        price,
        ref_per_tok: ref_value,
        target_per_ref: target_value,
        price_per_target: uoa_value,
        low,
        high,
    })
}

fn bound(factors: [Fix; 4], rounding: RoundingMode) -> Fix {
    factors
        .into_iter()
        .fold(Fix::ONE, |acc, factor| acc.saturating_mul_rnd(factor, rounding))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::price_model::PriceModelKind;

    fn fp(s: &str) -> Fix {
        s.parse().unwrap()
    }

    #[test]
    fn unit_models_quote_one() {
        let one = PriceModel::new(PriceModelKind::Manual, fp("1"), fp("0.1"), fp("10")).unwrap();
        let q = quote(&one, &one, &one, &one).unwrap();
        assert_eq!(q.price, fp("1"));
        assert_eq!(q.ref_per_tok, fp("1"));
        assert_eq!(q.target_per_ref, fp("1"));
        assert_eq!(q.price_per_target, fp("1"));
        assert_eq!(q.low, fp("0.0001"));
        assert_eq!(q.high, fp("10000"));
    }

    #[test]
    fn deviation_is_a_direct_multiplier() {
        let q = quote(
            &PriceModel::manual(fp("2")),
            &PriceModel::manual(fp("3")),
            &PriceModel::manual(fp("0.5")),
            &PriceModel::manual(fp("0.7")),
        )
        .unwrap();
        assert_eq!(q.price, fp("2.1"));
        assert_eq!(q.price_per_target, fp("0.5"));
        assert_eq!(q.low, q.price);
        assert_eq!(q.high, q.price);
    }

    #[test]
    fn bounds_round_outwards() {
        let third = PriceModel::new(
            PriceModelKind::Band,
            fp("0.5"),
            fp("0.333333333333333333"),
            fp("0.666666666666666667"),
        )
        .unwrap();
        let one = PriceModel::manual(Fix::ONE);
        let q = quote(&third, &third, &one, &one).unwrap();
        assert!(q.low <= q.price && q.price <= q.high);
        assert_eq!(q.low, fp("0.11111111111111111"));
        assert_eq!(q.high, fp("0.444444444444444445"));
    }

    #[test]
    fn wide_bounds_do_not_fail_the_quote() {
        let walk = PriceModel::new(PriceModelKind::Walk, fp("1"), fp("0.1"), fp("1e6")).unwrap();
        let q = quote(&walk, &walk, &walk, &walk).unwrap();
        assert_eq!(q.price, fp("1"));
        assert_eq!(q.low, fp("0.0001"));
        assert_eq!(q.high, fp("1e24"));

        let huge = PriceModel::new(PriceModelKind::Band, fp("1"), fp("0.1"), fp("1e9")).unwrap();
        let q = quote(&huge, &huge, &huge, &huge).unwrap();
        assert_eq!(q.price, fp("1"));
        assert_eq!(q.high, Fix::MAX);
        assert!(q.low <= q.price && q.price <= q.high);
    }
}
