//! Parameter file tests

use std::io::Write;

use tempfile::NamedTempFile;
use trialsim_core::{DistributionKind, SimError, TimeUnit};

use super::assert_close;
use crate::config::{ParametersFile, load_parameters};

const TWO_STAGE_YAML: &str = r#"
time_unit: months
discount_rate: 0.08
stages:
  - name: Phase_1
    success_probability: 0.6
    duration: { kind: normal, params: { mean: 12.0, std: 2.0 } }
    cost: { kind: triangular, params: { low: 5.0, mode: 10.0, high: 15.0 } }
  - name: Phase_2
    success_probability: 0.3
    duration: { kind: normal, params: { mean: 24.0, std: 3.0 } }
    cost: { kind: uniform, params: { low: 10.0, high: 30.0 } }
    enrollment: { kind: beta, params: { alpha: 2.0, beta: 5.0 } }
market:
  peak_revenue: { kind: lognormal, params: { mean: 7.0, sigma: 0.4 } }
  time_to_peak: { kind: triangular, params: { low: 2.0, mode: 3.0, high: 5.0 } }
launch_cost: { kind: uniform, params: { low: 20.0, high: 40.0 } }
"#;

fn write_temp(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_parse_and_convert() {
    let params = ParametersFile::from_yaml(TWO_STAGE_YAML)
        .unwrap()
        .into_parameters()
        .unwrap();

    assert_eq!(params.stages().len(), 2);
    assert_eq!(params.stages()[0].name(), "Phase_1");
    assert_eq!(params.stages()[1].success_probability(), 0.3);
    assert_eq!(
        params.stages()[1].enrollment().map(|d| d.kind()),
        Some(DistributionKind::Beta)
    );
    assert_eq!(params.time_unit(), TimeUnit::Months);
    assert_eq!(params.discount_rate(), 0.08);
    assert_close(params.total_expected_cost(), 10.0 + 20.0 + 30.0, 1e-9);
    assert!(params.manufacturing_setup().is_none());
}

#[test]
fn test_omitted_fields_take_defaults() {
    let yaml = r#"
market:
  peak_revenue: { kind: lognormal, params: { mean: 7.0, sigma: 0.4 } }
  time_to_peak: { kind: uniform, params: { low: 1.0, high: 3.0 } }
"#;
    let params = ParametersFile::from_yaml(yaml)
        .unwrap()
        .into_parameters()
        .unwrap();

    assert!(params.stages().is_empty());
    assert_eq!(params.discount_rate(), 0.10);
    assert_eq!(params.tax_rate(), 0.25);
    assert_eq!(params.time_unit(), TimeUnit::Years);
    assert_eq!(params.market().patent_life_years(), 12.0);
    assert!(params.market().penetration().is_none());
}

#[test]
fn test_unknown_distribution_kind_fails_to_parse() {
    let yaml = TWO_STAGE_YAML.replace(
        "kind: uniform, params: { low: 10.0",
        "kind: gamma, params: { low: 10.0",
    );
    assert!(ParametersFile::from_yaml(&yaml).is_err());
}

#[test]
fn test_invalid_distribution_parameters_fail_to_parse() {
    // Mode below the lower bound
    let yaml = TWO_STAGE_YAML.replace("low: 5.0, mode: 10.0", "low: 5.0, mode: 1.0");
    assert!(ParametersFile::from_yaml(&yaml).is_err());

    let yaml = TWO_STAGE_YAML.replace("std: 2.0", "std: 0.0");
    assert!(ParametersFile::from_yaml(&yaml).is_err());
}

#[test]
fn test_out_of_range_probability_is_rejected_on_conversion() {
    let yaml = TWO_STAGE_YAML.replace("success_probability: 0.6", "success_probability: 1.6");
    let err = ParametersFile::from_yaml(&yaml)
        .unwrap()
        .into_parameters()
        .unwrap_err();
    assert!(matches!(err, SimError::InvalidParameter { .. }));
}

#[test]
fn test_duplicate_stage_names_are_rejected() {
    let yaml = TWO_STAGE_YAML.replace("name: Phase_2", "name: Phase_1");
    let err = ParametersFile::from_yaml(&yaml)
        .unwrap()
        .into_parameters()
        .unwrap_err();
    assert!(matches!(err, SimError::InvalidParameter { .. }));
}

#[test]
fn test_load_parameters_from_file() {
    let file = write_temp(TWO_STAGE_YAML);
    let params = load_parameters(file.path()).unwrap();
    assert_eq!(params.stages().len(), 2);
}

#[test]
fn test_load_parameters_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.yaml");
    let err = load_parameters(&missing).unwrap_err();
    assert!(format!("{err}").contains("missing.yaml"));

    let file = write_temp("market: [not, a, mapping]");
    assert!(load_parameters(file.path()).is_err());

    let bad_rate = TWO_STAGE_YAML.replace("discount_rate: 0.08", "discount_rate: 1.5");
    let file = write_temp(&bad_rate);
    let err = load_parameters(file.path()).unwrap_err();
    assert!(format!("{err:?}").contains("discount_rate"));
}
