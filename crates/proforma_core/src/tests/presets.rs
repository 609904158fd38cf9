use crate::{LeverId, LeverValues, compute_impact, find_preset, presets};

fn preset_levers(id: &str) -> LeverValues {
    let preset = find_preset(id).unwrap_or_else(|| panic!("preset '{id}' must exist"));
    let mut levers = LeverValues::new();
    levers.apply_preset(preset);
    levers
}

/// Test the catalog: four presets, stable ids, lookup by id.
#[test]
fn test_catalog_contents() {
    let all = presets();
    let ids: Vec<&str> = all.iter().map(|p| p.id).collect();
    assert_eq!(
        ids,
        ["tariff-escalation", "recession", "moderate-tariffs", "growth"],
        "preset catalog changed"
    );
    assert!(find_preset("recession").is_some());
    assert!(find_preset("soft-landing").is_none());
}

/// Test the growth preset end to end through the calculator.
#[test]
fn test_growth_preset_end_to_end() {
    let levers = preset_levers("growth");

    // Bundle values, registry defaults for the rest, and the one bundle id
    // that is not in the registry rides along untouched.
    assert!((levers.get(LeverId::MarketShare) - 2.0).abs() < 1e-9);
    assert!((levers.get(LeverId::VolumeGrowth) - 8.0).abs() < 1e-9);
    assert!((levers.get(LeverId::OperationalEfficiency) - 5.0).abs() < 1e-9);
    assert!(levers.get(LeverId::Tariffs).abs() < 1e-9);

    let s = compute_impact(&levers);
    assert!((s.revenue.impact - 2_892.3).abs() < 1e-6);
    assert!((s.ebit.impact - 1_309.75).abs() < 1e-6);
    assert!((s.net_income.impact - 982.3125).abs() < 1e-6);
    assert!((s.ebit_margin - 15.2977).abs() < 1e-3);
}

/// Test the tariff-escalation preset produces the canonical loss.
#[test]
fn test_tariff_escalation_is_a_net_loss() {
    let s = compute_impact(&preset_levers("tariff-escalation"));

    assert!((s.ebit.impact + 1_040.05).abs() < 1e-6);
    assert!((s.net_income.impact + 780.0375).abs() < 1e-6);
    assert!(s.net_income.impact < 0.0);
}

/// Test that headline annotations are static copy, not live results. The
/// tariff-escalation card says -850 EBIT while the calculator prices the
/// same bundle at about -1040.
#[test]
fn test_headline_annotations_are_static() {
    let preset = find_preset("tariff-escalation").unwrap_or_else(|| panic!("preset must exist"));
    let live = compute_impact(&preset_levers("tariff-escalation")).ebit.impact;

    assert!((preset.headline_impact - live).abs() > 100.0);
}

/// Test the recession preset sign profile: volumes, pricing and share all
/// down, financing cost up.
#[test]
fn test_recession_preset_signs() {
    let levers = preset_levers("recession");

    assert!(levers.get(LeverId::VolumeGrowth) < 0.0);
    assert!(levers.get(LeverId::PriceChange) < 0.0);
    assert!(levers.get(LeverId::MarketShare) < 0.0);
    assert!(levers.get(LeverId::InterestRates) > 0.0);

    let s = compute_impact(&levers);
    assert!(s.ebit.impact < -2_000.0, "a 12-point volume drop is severe, got {}", s.ebit.impact);
    assert!(s.ebt.impact < s.ebit.impact, "higher rates cost extra below EBIT");
}
