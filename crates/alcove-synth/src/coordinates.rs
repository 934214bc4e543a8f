//! Alcove and canonical coordinates for two-qubit interactions.
//!
//! An [`AlcoveCoordinate`] is the reduced representative of a local
//! equivalence class; a [`CanonicalCoordinate`] `(a, b, c)` names the
//! interaction `exp(-i(a XX + b YY - c ZZ))`. The two are related by a fixed
//! linear map followed by a fold into the positive half of the chamber.

use std::f64::consts::{FRAC_PI_2, PI};
use std::fmt;
use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::utilities::{l1_distance, Square};

/// A point of the canonical alcove.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlcoveCoordinate(pub [f64; 3]);

impl AlcoveCoordinate {
    /// Create a coordinate from its three components.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self([x, y, z])
    }

    /// Convert to a positive canonical coordinate.
    pub fn to_canonical(&self) -> CanonicalCoordinate {
        alcove_to_positive_canonical(*self)
    }
}

impl Index<usize> for AlcoveCoordinate {
    type Output = f64;

    fn index(&self, axis: usize) -> &f64 {
        &self.0[axis]
    }
}

impl From<[f64; 3]> for AlcoveCoordinate {
    fn from(data: [f64; 3]) -> Self {
        Self(data)
    }
}

impl fmt::Display for AlcoveCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x, y, z] = self.0;
        write!(f, "<{x:.6}, {y:.6}, {z:.6}>")
    }
}

/// Exponents `(a, b, c)` of a canonical two-qubit interaction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanonicalCoordinate(pub [f64; 3]);

impl CanonicalCoordinate {
    /// Create a coordinate from its three components.
    pub const fn new(a: f64, b: f64, c: f64) -> Self {
        Self([a, b, c])
    }

    /// Invert the linear part of the alcove map.
    ///
    /// Only exact for coordinates that were not folded, i.e. those whose
    /// alcove preimage has a nonnegative `c`.
    pub fn to_alcove(&self) -> AlcoveCoordinate {
        let [a, b, c] = self.0;
        AlcoveCoordinate::new((a + b - c) / PI, (a - b + c) / PI, (-a + b + c) / PI)
    }

    /// Multiply each axis by the matching sign.
    #[must_use]
    pub fn reflect(&self, scalars: &[f64; 3]) -> Self {
        Self(std::array::from_fn(|i| self.0[i] * scalars[i]))
    }

    /// Add `π/2 · scalar` to each axis.
    #[must_use]
    pub fn shift(&self, scalars: &[f64; 3]) -> Self {
        Self(std::array::from_fn(|i| FRAC_PI_2 * scalars[i] + self.0[i]))
    }

    /// Manhattan distance to another coordinate.
    pub fn l1_distance(&self, other: &Self) -> f64 {
        l1_distance(&self.0, &other.0)
    }

    /// Average gate infidelity between the interactions at two coordinates.
    pub fn average_infidelity(&self, other: &Self) -> f64 {
        let [da, db, dc] = std::array::from_fn::<f64, 3, _>(|i| self.0[i] - other.0[i]);
        let cosines = da.cos().sq() * db.cos().sq() * dc.cos().sq();
        let sines = da.sin().sq() * db.sin().sq() * dc.sin().sq();
        1.0 - (4.0 + 16.0 * (cosines + sines)) / 20.0
    }
}

impl Index<usize> for CanonicalCoordinate {
    type Output = f64;

    fn index(&self, axis: usize) -> &f64 {
        &self.0[axis]
    }
}

impl From<[f64; 3]> for CanonicalCoordinate {
    fn from(data: [f64; 3]) -> Self {
        Self(data)
    }
}

impl fmt::Display for CanonicalCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = self.0;
        write!(f, "({a:.6}, {b:.6}, {c:.6})")
    }
}

/// Map an alcove point to its positive canonical coordinate.
///
/// `(x, y, z) ↦ π((x+y)/2, (z+x)/2, (y+z)/2)`, then a negative `c` is folded
/// through `(a, b, c) ↦ (π/2 − a, b, −c)`.
pub fn alcove_to_positive_canonical(coordinate: AlcoveCoordinate) -> CanonicalCoordinate {
    let [x, y, z] = coordinate.0;
    let a = (x + y) / 2.0 * PI;
    let b = (z + x) / 2.0 * PI;
    let c = (y + z) / 2.0 * PI;
    if c < 0.0 {
        CanonicalCoordinate::new(FRAC_PI_2 - a, b, -c)
    } else {
        CanonicalCoordinate::new(a, b, c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_4;

    fn assert_close(got: &CanonicalCoordinate, want: [f64; 3]) {
        for (g, w) in got.0.iter().zip(want) {
            assert!((g - w).abs() < 1e-12, "got {got}, want {want:?}");
        }
    }

    #[test]
    fn test_xx_interaction_folds_to_single_axis() {
        // sqrt(CX) sits at <1/8, 1/8, -1/8>
        let canonical = AlcoveCoordinate::new(0.125, 0.125, -0.125).to_canonical();
        assert_close(&canonical, [PI / 8.0, 0.0, 0.0]);
    }

    #[test]
    fn test_cx_lands_on_quarter_pi() {
        let canonical = AlcoveCoordinate::new(0.25, 0.25, -0.25).to_canonical();
        assert_close(&canonical, [FRAC_PI_4, 0.0, 0.0]);
    }

    #[test]
    fn test_unfolded_roundtrip() {
        let canonical = CanonicalCoordinate::new(0.1, 0.2, 0.3);
        let alcove = canonical.to_alcove();
        assert_close(&alcove.to_canonical(), [0.1, 0.2, 0.3]);
    }

    #[test]
    fn test_reflect_and_shift() {
        let c = CanonicalCoordinate::new(0.1, 0.2, 0.3);
        assert_close(&c.reflect(&[-1.0, -1.0, 1.0]), [-0.1, -0.2, 0.3]);
        assert_close(&c.shift(&[1.0, 0.0, 1.0]), [0.1 + FRAC_PI_2, 0.2, 0.3 + FRAC_PI_2]);
    }

    #[test]
    fn test_average_infidelity() {
        let c = CanonicalCoordinate::new(0.3, 0.2, 0.1);
        assert!(c.average_infidelity(&c).abs() < 1e-15);

        // identity against CX: 1 - (4 + 16 * 1/2) / 20
        let identity = CanonicalCoordinate::new(0.0, 0.0, 0.0);
        let cx = CanonicalCoordinate::new(FRAC_PI_4, 0.0, 0.0);
        assert!((identity.average_infidelity(&cx) - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_display() {
        let c = CanonicalCoordinate::new(0.5, 0.25, 0.0);
        assert_eq!(c.to_string(), "(0.500000, 0.250000, 0.000000)");
        assert_eq!(
            AlcoveCoordinate::new(0.25, 0.25, -0.25).to_string(),
            "<0.250000, 0.250000, -0.250000>"
        );
    }
}
