//! Scenario preset tests

use trialsim_core::{
    DistributionKind, MonteCarloConfig, TimeUnit, analyze_results, monte_carlo_simulate,
};

use super::assert_close;
use crate::presets::{
    PHASE_1, PHASE_2, PHASE_3, STAGE_NAMES, Scenario, conservative_parameters, default_parameters,
    optimistic_parameters, rare_disease_parameters,
};

fn probabilities(scenario: Scenario) -> Vec<f64> {
    scenario
        .parameters()
        .unwrap()
        .stages()
        .iter()
        .map(|s| s.success_probability())
        .collect()
}

#[test]
fn test_every_scenario_builds_four_ordered_stages() {
    for scenario in Scenario::ALL {
        let params = scenario.parameters().unwrap();
        let names: Vec<&str> = params.stages().iter().map(|s| s.name()).collect();
        assert_eq!(names, STAGE_NAMES, "{}", scenario.name());
        assert_eq!(params.time_unit(), TimeUnit::Months);
        assert_eq!(params.discount_rate(), 0.10);
        assert_eq!(params.tax_rate(), 0.25);
        assert!(params.manufacturing_setup().is_some());
        assert!(params.launch_cost().is_some());
    }
}

#[test]
fn test_default_reference_values() {
    let params = default_parameters().unwrap();

    assert_close(
        params.overall_success_probability(),
        0.63 * 0.31 * 0.58 * 0.85,
        1e-12,
    );
    assert_close(params.total_expected_time(), 84.0, 1e-9);

    let market = params.market();
    assert_eq!(market.patent_life_years(), 12.0);
    assert_eq!(market.peak_revenue().kind(), DistributionKind::LogNormal);
    assert_close(market.time_to_peak().mean(), 10.0 / 3.0, 1e-12);

    assert_close(params.manufacturing_setup().unwrap().mean(), 60.0, 1e-12);
    assert_close(params.launch_cost().unwrap().mean(), 85.0, 1e-12);
}

#[test]
fn test_scenario_probabilities() {
    assert_eq!(probabilities(Scenario::Default), [0.63, 0.31, 0.58, 0.85]);
    assert_eq!(probabilities(Scenario::Conservative), [0.60, 0.25, 0.50, 0.75]);
    assert_eq!(probabilities(Scenario::Optimistic), [0.75, 0.45, 0.70, 0.90]);
    assert_eq!(probabilities(Scenario::Oncology), [0.70, 0.40, 0.50, 0.80]);
    assert_eq!(probabilities(Scenario::RareDisease), [0.50, 0.45, 0.65, 0.90]);
}

#[test]
fn test_conservative_costs_more_and_earns_less() {
    let default = default_parameters().unwrap();
    let conservative = conservative_parameters().unwrap();

    assert!(conservative.total_expected_cost() > default.total_expected_cost());
    assert!(
        conservative.market().peak_revenue().mean() < default.market().peak_revenue().mean()
    );
    // Durations are untouched
    assert_eq!(conservative.total_expected_time(), default.total_expected_time());
}

#[test]
fn test_optimistic_phase_3_is_bounded() {
    let params = optimistic_parameters().unwrap();
    let cost = params.stage(PHASE_3).unwrap().cost();
    assert_eq!(cost.kind(), DistributionKind::Triangular);
    assert_close(cost.mean(), (40.0 + 75.0 + 120.0) / 3.0, 1e-12);
}

#[test]
fn test_rare_disease_overrides() {
    let params = rare_disease_parameters().unwrap();

    let phase_1 = params.stage(PHASE_1).unwrap().cost();
    assert_eq!(phase_1.kind(), DistributionKind::Normal);
    assert_close(phase_1.mean(), 5.0, 1e-12);

    let phase_2 = params.stage(PHASE_2).unwrap().cost();
    assert_close(phase_2.mean(), 12.0 * (0.4f64 * 0.4 / 2.0).exp(), 1e-9);

    assert_close(params.market().time_to_peak().mean(), 2.0, 1e-12);
}

#[test]
fn test_presets_are_independent() {
    let mut first = default_parameters().unwrap();
    first
        .stage_mut(PHASE_1)
        .unwrap()
        .set_success_probability(0.99)
        .unwrap();

    let second = default_parameters().unwrap();
    assert_eq!(second.stage(PHASE_1).unwrap().success_probability(), 0.63);
}

#[test]
fn test_scenarios_simulate_near_compounded_probability() {
    for scenario in Scenario::ALL {
        let params = scenario.parameters().unwrap();
        let results =
            monte_carlo_simulate(&params, &MonteCarloConfig::new(5_000).with_seed(11)).unwrap();
        let summary = analyze_results(&results).unwrap();

        // Standard error is below 0.007 for every scenario
        assert_close(
            summary.overall.success_rate,
            params.overall_success_probability(),
            0.03,
        );
    }
}
