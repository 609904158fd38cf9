use crate::{LeverId, parse_scenario};

/// Test the canonical tariff question: explicit magnitude plus ripples.
#[test]
fn test_tariff_increase_with_explicit_percent() {
    let parsed = parse_scenario("What if tariffs increase by 25%?");

    assert_eq!(parsed.levers.len(), 4, "tariff topic sets four levers");
    assert!((parsed.levers.get(LeverId::Tariffs) - 25.0).abs() < 1e-9);
    assert!((parsed.levers.get(LeverId::MarketShare) + 2.0).abs() < 1e-6);
    assert!((parsed.levers.get(LeverId::PriceChange) - 3.0).abs() < 1e-6);
    assert!((parsed.levers.get(LeverId::MaterialInflation) - 2.0).abs() < 1e-6);
    assert!(
        parsed.explanation.contains("tariffs"),
        "explanation should name the driver: {}",
        parsed.explanation
    );
}

/// Test that a spend cut parses to an exact negative value with no ripples.
#[test]
fn test_marketing_cut_is_exact() {
    let parsed = parse_scenario("reduce marketing spend by 30%");

    assert_eq!(parsed.levers.len(), 1);
    assert!((parsed.levers.get(LeverId::MarketingSpend) + 30.0).abs() < 1e-9);
}

/// Test that out-of-range requests come back clamped but ripples do not
/// re-scale: side effects are computed from the requested magnitude.
#[test]
fn test_oversized_tariff_clamps() {
    let parsed = parse_scenario("tariffs increase by 80%");

    assert!((parsed.levers.get(LeverId::Tariffs) - 50.0).abs() < 1e-9, "upper bound is 50");
    assert!((parsed.levers.get(LeverId::MarketShare) + 6.4).abs() < 1e-6);
    assert!((parsed.levers.get(LeverId::PriceChange) - 9.6).abs() < 1e-6);
    assert!((parsed.levers.get(LeverId::MaterialInflation) - 6.4).abs() < 1e-6);
}

/// Test the topic default magnitude when no number appears.
#[test]
fn test_default_magnitude_without_number() {
    let parsed = parse_scenario("tariffs are rising");

    assert!((parsed.levers.get(LeverId::Tariffs) - 10.0).abs() < 1e-9);
    assert!((parsed.levers.get(LeverId::MarketShare) + 0.8).abs() < 1e-6);
}

/// Test that a competitor mention reads as share loss without any
/// explicit decrease word.
#[test]
fn test_competitor_cue_reads_negative() {
    let parsed = parse_scenario("a competitor is taking market share");

    assert!((parsed.levers.get(LeverId::MarketShare) + 2.0).abs() < 1e-9);
}

/// Test that the recession composite overrides a generic demand reading
/// in the same sentence.
#[test]
fn test_recession_overrides_demand() {
    let parsed = parse_scenario("a recession hits demand");

    assert!((parsed.levers.get(LeverId::VolumeGrowth) + 8.0).abs() < 1e-6);
    assert!((parsed.levers.get(LeverId::PriceChange) + 3.0).abs() < 1e-6);
    assert!((parsed.levers.get(LeverId::MarketShare) + 1.0).abs() < 1e-6);
}

/// Test supply-chain trouble defaults to the negative reading.
#[test]
fn test_supply_chain_disruption_is_negative() {
    let parsed = parse_scenario("supply chain disruption at a key supplier");

    assert!((parsed.levers.get(LeverId::SupplyChain) + 10.0).abs() < 1e-9);
}

/// Test the generic revenue fallback when no topic matches.
#[test]
fn test_fallback_revenue_maps_to_volume() {
    let parsed = parse_scenario("revenue softens by 6");

    assert_eq!(parsed.levers.len(), 1);
    assert!((parsed.levers.get(LeverId::VolumeGrowth) + 6.0).abs() < 1e-9);
}

/// Test the generic cost fallback.
#[test]
fn test_fallback_cost_maps_to_materials() {
    let parsed = parse_scenario("costs jump 12 percent");

    assert!((parsed.levers.get(LeverId::MaterialInflation) - 12.0).abs() < 1e-9);
}

/// Test the generic margin fallback splits across price and materials.
#[test]
fn test_fallback_margin_splits() {
    let parsed = parse_scenario("margins improve by 10");

    assert!((parsed.levers.get(LeverId::PriceChange) - 5.0).abs() < 1e-9);
    assert!((parsed.levers.get(LeverId::MaterialInflation) + 5.0).abs() < 1e-9);
}

/// Test that text with no recognizable driver changes nothing.
#[test]
fn test_gibberish_leaves_levers_empty() {
    let parsed = parse_scenario("the quarterly offsite was rescheduled");

    assert!(parsed.levers.is_empty());
    assert!(parsed.explanation.contains("no levers were adjusted"));
}

/// Test the empty string, the degenerate no-driver case.
#[test]
fn test_empty_input() {
    let parsed = parse_scenario("");

    assert!(parsed.levers.is_empty());
    assert!(!parsed.explanation.is_empty());
}
