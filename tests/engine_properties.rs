use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use surge_payouts::application::engine::{PayoutEngine, compute};
use surge_payouts::domain::config::{FallbackRule, MilestoneConfiguration};
use surge_payouts::domain::entity::{EntityRecord, ZoneKey};
use surge_payouts::domain::milestone::{Amount, Milestone, MilestoneSet, Payout, Threshold};
use rust_decimal::Decimal;

fn random_set(rng: &mut StdRng) -> MilestoneSet {
    let len = rng.gen_range(1..=5);
    let milestones = (0..len)
        .map(|_| {
            Milestone::new(
                Threshold::new(rng.gen_range(1..=15)).unwrap(),
                Amount::new(Decimal::from(rng.gen_range(1..=200u32))).unwrap(),
            )
        })
        .collect();
    MilestoneSet::new(milestones).unwrap()
}

fn random_config(rng: &mut StdRng) -> MilestoneConfiguration {
    if rng.gen_bool(0.5) {
        return MilestoneConfiguration::global(random_set(rng));
    }
    let zones = vec![
        (ZoneKey::new("Pune", "Baner"), random_set(rng)),
        (ZoneKey::new("Delhi", "Saket"), random_set(rng)),
    ];
    MilestoneConfiguration::per_zone(zones, FallbackRule::Milestones(random_set(rng))).unwrap()
}

fn random_entity(rng: &mut StdRng) -> EntityRecord {
    let de = EntityRecord::new(rng.gen_range(0..=20));
    match rng.gen_range(0..3) {
        0 => de.in_zone("Pune", "Baner"),
        1 => de.in_zone("Goa", "Panjim"),
        _ => de,
    }
}

#[test]
fn test_total_is_sum_of_milestone_payouts() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        let config = random_config(&mut rng);
        let entities: Vec<EntityRecord> = (0..10).map(|_| random_entity(&mut rng)).collect();

        for record in compute(&entities, &config) {
            let sum: Payout = record.outcomes.iter().map(|o| o.payout).sum();
            assert_eq!(record.total_payout, sum);
            for outcome in &record.outcomes {
                assert_eq!(outcome.eligible, record.entity.orders >= outcome.threshold.value());
                assert_eq!(outcome.eligible, outcome.payout != Payout::ZERO);
            }
        }
    }
}

#[test]
fn test_more_orders_never_pay_less() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..200 {
        let engine = PayoutEngine::new(random_config(&mut rng));
        let de = random_entity(&mut rng);
        let mut busier = de.clone();
        busier.orders += rng.gen_range(1..=10);

        let before = engine.evaluate(&de).total_payout;
        let after = engine.evaluate(&busier).total_payout;
        assert!(after >= before, "{after} < {before} for {de:?}");
    }
}

#[test]
fn test_zero_orders_pay_nothing() {
    let mut rng = StdRng::seed_from_u64(13);
    for _ in 0..100 {
        let engine = PayoutEngine::new(random_config(&mut rng));
        let mut de = random_entity(&mut rng);
        de.orders = 0;

        let record = engine.evaluate(&de);
        assert_eq!(record.total_payout, Payout::ZERO);
        assert!(record.outcomes.iter().all(|o| !o.eligible));
    }
}

#[test]
fn test_compute_is_pure() {
    let mut rng = StdRng::seed_from_u64(17);
    let config = random_config(&mut rng);
    let entities: Vec<EntityRecord> = (0..50).map(|_| random_entity(&mut rng)).collect();

    let first = compute(&entities, &config);
    let second = compute(&entities, &config);
    assert_eq!(first, second);
    assert_eq!(first.len(), entities.len());
    for (record, entity) in first.iter().zip(&entities) {
        assert_eq!(&record.entity, entity);
    }
}

#[test]
fn test_unknown_zone_gets_exactly_the_fallback() {
    let mut rng = StdRng::seed_from_u64(19);
    for _ in 0..50 {
        let fallback = random_set(&mut rng);
        let config = MilestoneConfiguration::per_zone(
            vec![(ZoneKey::new("Pune", "Baner"), random_set(&mut rng))],
            FallbackRule::Milestones(fallback.clone()),
        )
        .unwrap();
        let orders = rng.gen_range(0..=20);

        let zoned = compute(&[EntityRecord::new(orders).in_zone("Goa", "Panjim")], &config);
        let reference = compute(
            &[EntityRecord::new(orders)],
            &MilestoneConfiguration::global(fallback),
        );

        assert!(zoned[0].used_fallback);
        assert_eq!(zoned[0].outcomes, reference[0].outcomes);
        assert_eq!(zoned[0].total_payout, reference[0].total_payout);
    }
}
