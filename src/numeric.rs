//! Floating point helpers shared by the policy engine and the tests. Comparisons are thin
//! wrappers around the approx crate.

use approx::AbsDiffEq;

/// Default absolute accuracy for fraction comparisons.
pub const ACC: f64 = 1e-10;

/// Compares if two floats are close via `approx::abs_diff_eq` using a maximum absolute difference
/// (epsilon) of `acc`.
#[must_use]
pub fn almost_eq(a: f64, b: f64, acc: f64) -> bool {
    if a.is_infinite() && b.is_infinite() {
        return a == b;
    }
    a.abs_diff_eq(&b, acc)
}

/// Divides `numerator` by `denominator`, returning `None` when the denominator is
/// (numerically) zero or the quotient is not finite.
#[must_use]
pub fn guarded_div(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator.abs_diff_eq(&0.0, f64::EPSILON) {
        return None;
    }
    let quotient = numerator / denominator;
    quotient.is_finite().then_some(quotient)
}

/// Clamps `value` into `[0, 1]`. `NaN` maps to 0.
#[must_use]
pub fn clamp_fraction(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}
