//! Tests for present value and return on investment

use super::assert_close;
use crate::error::SimError;
use crate::financial::{present_value, return_on_investment};

#[test]
fn test_present_value_without_delay_is_unchanged() {
    assert_eq!(present_value(100.0, 0.0, 0.1).unwrap(), 100.0);
}

#[test]
fn test_present_value_of_zero_is_zero() {
    assert_eq!(present_value(0.0, 5.0, 0.1).unwrap(), 0.0);
}

#[test]
fn test_present_value_discounts_over_time() {
    assert_close(present_value(110.0, 1.0, 0.1).unwrap(), 100.0, 1e-9);
    assert_close(present_value(1500.0, 7.0, 0.1).unwrap(), 1500.0 / 1.1f64.powi(7), 1e-9);
    // Fractional periods
    assert_close(present_value(100.0, 0.5, 0.21).unwrap(), 100.0 / 1.1, 1e-9);
    // A zero rate never discounts
    assert_eq!(present_value(250.0, 12.0, 0.0).unwrap(), 250.0);
}

#[test]
fn test_present_value_rejects_negative_rate() {
    let err = present_value(100.0, 1.0, -0.05).unwrap_err();
    assert!(matches!(
        err,
        SimError::InvalidArgument {
            argument: "discount_rate",
            ..
        }
    ));
}

#[test]
fn test_present_value_rejects_negative_delay() {
    let err = present_value(100.0, -1.0, 0.05).unwrap_err();
    assert!(matches!(err, SimError::InvalidArgument { argument: "delay", .. }));
}

#[test]
fn test_roi_zero_cost_policy() {
    assert_eq!(return_on_investment(0.0, 0.0), 0.0);
    let roi = return_on_investment(50.0, 0.0);
    assert!(roi.is_infinite() && roi > 0.0);
}

#[test]
fn test_roi_ratio() {
    assert_close(return_on_investment(150.0, 100.0), 0.5, 1e-12);
    assert_close(return_on_investment(50.0, 100.0), -0.5, 1e-12);
    assert_close(return_on_investment(0.0, 100.0), -1.0, 1e-12);
}
