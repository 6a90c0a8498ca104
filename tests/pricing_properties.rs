use arbitrage_desk::domain::{
    compute_profit_breakdown, evaluate_inventory, market_confidence, merge_inventory,
    sample_inventory, DutyBasis, OriginZone, PricingPolicy, Vehicle,
};
use arbitrage_desk::infra::listings::parse_listings;

const RATES: [f64; 5] = [0.5, 0.7, 0.734, 0.737, 1.25];

fn all_vehicles() -> Vec<Vehicle> {
    let live = parse_listings(
        r#"[
            {"id": 900, "make": "Porsche", "model": "Cayenne Turbo GT", "price_cad": 240000,
             "vin": "WP1AF2AY9PDA00900", "expected_us_resale": 215000, "winter_driven": true},
            {"id": 901, "make": "Cadillac", "model": "Escalade-V", "price_cad": 190000,
             "vin": "1GYS4GKL1RR000901", "expected_us_resale": 182000, "heated_storage": true},
            {"id": 902, "make": "Ford", "model": "Mustang Dark Horse", "price_cad": 0,
             "vin": "1FA6P8R00R5500902", "expected_us_resale": 78000}
        ]"#,
    )
    .expect("fixture parses");
    merge_inventory(live, sample_inventory())
}

#[test]
fn identity_holds_for_every_listing_policy_and_rate() {
    let policies = [
        PricingPolicy::default(),
        PricingPolicy::default().with_duty_basis(DutyBasis::ForeignContent),
    ];
    for policy in &policies {
        for vehicle in all_vehicles() {
            for rate in RATES {
                let b = compute_profit_breakdown(&vehicle, rate, policy);
                assert_eq!(
                    b.net_profit,
                    vehicle.expected_resale
                        - (b.base_price + b.primary_duty + b.luxury_duty + b.fixed_fees),
                    "{} at {rate}",
                    vehicle.id
                );
                assert!(b.luxury_duty >= 0.0);
                assert!(b.primary_duty >= 0.0);
                assert_eq!(b.is_high_yield, b.net_profit > policy.high_yield_threshold);
                if b.origin == OriginZone::ZoneEligible {
                    assert_eq!(b.primary_duty, 0.0);
                }
            }
        }
    }
}

#[test]
fn luxury_duty_is_greater_of_flat_and_marginal() {
    let policy = PricingPolicy::default();
    for vehicle in all_vehicles() {
        let b = compute_profit_breakdown(&vehicle, 0.737, &policy);
        let subtotal = b.base_price + b.primary_duty + b.fixed_fees;
        let expected = if subtotal > policy.luxury.threshold {
            (policy.luxury.flat_rate * subtotal)
                .max(policy.luxury.marginal_rate * (subtotal - policy.luxury.threshold))
        } else {
            0.0
        };
        assert_eq!(b.luxury_duty, expected, "{}", vehicle.id);
    }
}

#[test]
fn engine_does_not_touch_its_input() {
    let policy = PricingPolicy::default();
    let vehicles = all_vehicles();
    let before = vehicles.clone();
    let first = evaluate_inventory(&vehicles, 0.737, &policy);
    let second = evaluate_inventory(&vehicles, 0.737, &policy);
    assert_eq!(vehicles, before);
    assert_eq!(first, second);
}

#[test]
fn live_listing_origin_follows_vin() {
    let policy = PricingPolicy::default();
    let vehicles = all_vehicles();
    let origin = |id: &str| {
        let vehicle = vehicles.iter().find(|v| v.id == id).expect("listing present");
        compute_profit_breakdown(vehicle, 0.737, &policy).origin
    };
    assert_eq!(origin("900"), OriginZone::Foreign);
    assert_eq!(origin("901"), OriginZone::ZoneEligible);
    assert_eq!(origin("1"), OriginZone::ZoneEligible);
    assert_eq!(origin("5"), OriginZone::Foreign);
}

#[test]
fn confidence_stays_bounded_across_inventory() {
    let policy = PricingPolicy::default();
    let summary = evaluate_inventory(&all_vehicles(), 0.737, &policy);
    for item in &summary.items {
        assert!(item.confidence <= 100);
        assert_eq!(
            item.confidence,
            market_confidence(item.vehicle.days_to_sale, item.breakdown.net_profit)
        );
    }
}
