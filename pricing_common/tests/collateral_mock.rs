use pricing_common::{CollateralConfig, CollateralMock, Fix, PriceModel, PriceModelKind, PricingError};

fn fp(s: &str) -> Fix {
    s.parse().unwrap()
}

fn new_coll(
    ref_per_tok: PriceModel,
    target_per_ref: PriceModel,
    uoa_per_target: PriceModel,
    deviation: PriceModel,
) -> CollateralMock {
    let config = CollateralConfig {
        erc20: "TK".to_string(),
        max_trade_volume: fp("1e6"),
        default_threshold: fp("0.05"),
        delay_until_default: 86400,
        reference_erc20: "BASE".to_string(),
        target_name: "USD".to_string(),
    };
    CollateralMock::new(config, ref_per_tok, target_per_ref, uoa_per_target, deviation).unwrap()
}

#[test]
fn combines_price_models() {
    let manual = PriceModel::new(PriceModelKind::Manual, fp("1"), fp("0.1"), fp("10")).unwrap();
    let mut coll = new_coll(manual, manual, manual, manual);

    assert_eq!(coll.price().unwrap(), fp("1"));
    assert_eq!(coll.ref_per_tok().unwrap(), fp("1"));
    assert_eq!(coll.target_per_ref().unwrap(), fp("1"));
    assert_eq!(coll.price_per_target().unwrap(), fp("1"));

    coll.update(fp("0.5"), fp("3"), fp("7"), fp("0.1"));

    assert_eq!(coll.price().unwrap(), fp("1.05"));
    assert_eq!(coll.ref_per_tok().unwrap(), fp("0.5"));
    assert_eq!(coll.target_per_ref().unwrap(), fp("3"));
    assert_eq!(coll.price_per_target().unwrap(), fp("7"));

    coll.update(fp("2"), fp("3"), fp("0.5"), fp("0.7"));

    assert_eq!(coll.price().unwrap(), fp("2.1"));
    assert_eq!(coll.ref_per_tok().unwrap(), fp("2"));
    assert_eq!(coll.target_per_ref().unwrap(), fp("3"));
    assert_eq!(coll.price_per_target().unwrap(), fp("0.5"));
}

#[test]
fn quote_is_idempotent_between_updates() {
    let band = PriceModel::new(PriceModelKind::Band, fp("1"), fp("0.9"), fp("1.1")).unwrap();
    let mut coll = new_coll(band, band, PriceModel::manual(fp("2")), PriceModel::manual(Fix::ONE));
    assert_eq!(coll.quote().unwrap(), coll.quote().unwrap());

    coll.advance(5).unwrap();
    let first = coll.quote().unwrap();
    assert_eq!(first, coll.quote().unwrap());
    assert!(first.low <= first.price && first.price <= first.high);
}

#[test]
fn same_seed_gives_same_prices() {
    let walk = PriceModel::new(PriceModelKind::Walk, fp("1"), fp("0.5"), fp("1.5")).unwrap();
    let mut a = new_coll(walk, walk, walk, PriceModel::manual(Fix::ONE));
    let mut b = a.clone();
    for seed in [1, 2, 3, 1000] {
        a.advance(seed).unwrap();
        b.advance(seed).unwrap();
    }
    assert_eq!(a.quote().unwrap(), b.quote().unwrap());
}

#[test]
fn update_replaces_range_models_with_manual_ones() {
    let walk = PriceModel::new(PriceModelKind::Walk, fp("1"), fp("0.5"), fp("1.5")).unwrap();
    let mut coll = new_coll(walk, walk, walk, walk);
    coll.update(fp("4"), fp("1"), fp("1"), fp("1"));
    let before = coll.quote().unwrap();
    coll.advance(77).unwrap();
    assert_eq!(coll.quote().unwrap(), before);
    assert_eq!(coll.models().ref_per_tok().kind(), PriceModelKind::Manual);
}

#[test]
fn low_above_high_is_rejected() {
    let err = PriceModel::new(PriceModelKind::Manual, fp("1"), fp("10"), fp("0.1")).unwrap_err();
    assert!(matches!(err, PricingError::InvalidModel(_)));
}
