//! Numerical helpers shared by the backsolver and the hop search.

use std::f64::consts::PI;

/// Absolute distance from `±1` within which an out-of-range arccos ratio is
/// snapped to the boundary value.
pub const STABLE_ARCCOS_THRESHOLD: f64 = 0.005;

/// Check whether `x` and `y` agree modulo `modulus` within `tolerance`.
///
/// The reduced difference counts as near when it sits close to either end of
/// the period, so values straddling a wraparound are recognised.
#[inline]
pub fn near(x: f64, y: f64, modulus: f64, tolerance: f64) -> bool {
    let reduced = (x - y).abs() % modulus;
    reduced.abs() < tolerance || (reduced - modulus).abs() < tolerance
}

/// `arccos(numerator / denominator)` tolerant of slight overshoot.
///
/// A ratio whose magnitude exceeds one but whose numerator lies within
/// [`STABLE_ARCCOS_THRESHOLD`] of `±denominator` returns exactly `0` or `π`.
/// Any other out-of-range ratio yields `NaN`, which callers treat as "this
/// configuration is not realizable".
pub fn stable_arccos(numerator: f64, denominator: f64) -> f64 {
    if numerator.abs() > denominator.abs() {
        if (numerator - denominator).abs() < STABLE_ARCCOS_THRESHOLD {
            return 0.0;
        } else if (numerator + denominator).abs() < STABLE_ARCCOS_THRESHOLD {
            return PI;
        }
    }
    (numerator / denominator).acos()
}

/// Manhattan distance between two coordinate triples.
pub fn l1_distance(x: &[f64; 3], y: &[f64; 3]) -> f64 {
    x.iter().zip(y).map(|(a, b)| (a - b).abs()).sum()
}

// powi(2) everywhere reads badly in the trig formulas
pub(crate) trait Square {
    fn sq(self) -> f64;
}

impl Square for f64 {
    #[inline]
    fn sq(self) -> f64 {
        self * self
    }
}
