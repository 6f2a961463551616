//! The leverage formula: `(outcome * certainty) / max(delay * effort, 1)`.
//!
//! Pure and total. The denominator floors to 1 so a zero delay or effort
//! can never divide by zero. Results are rounded to 2 decimal places and
//! persisted alongside the inputs; consumers sort by the persisted value
//! and never recompute.

use crate::models::ScoreVariables;

/// Maps the four score variables to a single leverage number.
pub fn leverage_score(v: &ScoreVariables) -> f64 {
    let numerator = v.outcome * v.certainty;
    let denominator = (v.delay * v.effort).max(1.0);
    round2(numerator / denominator)
}

/// Clamps a model-supplied 1-10 leverage judgment onto a score axis.
pub fn clamp_axis(value: f64) -> f64 {
    if value.is_nan() {
        return 1.0;
    }
    value.clamp(1.0, 10.0)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
