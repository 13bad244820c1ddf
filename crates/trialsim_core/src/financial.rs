//! Discounting and return calculations

use crate::error::{Result, SimError};

/// Present value of `cash_flow` received after `delay` periods at
/// `discount_rate` per period: `cash_flow / (1 + rate)^delay`.
pub fn present_value(cash_flow: f64, delay: f64, discount_rate: f64) -> Result<f64> {
    if discount_rate.is_nan() || discount_rate < 0.0 {
        return Err(SimError::invalid_argument(
            "discount_rate",
            format!("must not be negative, got {discount_rate}"),
        ));
    }
    if delay.is_nan() || delay < 0.0 {
        return Err(SimError::invalid_argument(
            "delay",
            format!("must not be negative, got {delay}"),
        ));
    }

    Ok(cash_flow / (1.0 + discount_rate).powf(delay))
}

/// Return on investment as a fraction: `(revenue - cost) / cost`.
///
/// With zero cost the result is 0 for zero revenue and positive infinity
/// otherwise.
#[must_use]
pub fn return_on_investment(revenue: f64, cost: f64) -> f64 {
    if cost == 0.0 {
        return if revenue == 0.0 { 0.0 } else { f64::INFINITY };
    }
    (revenue - cost) / cost
}
