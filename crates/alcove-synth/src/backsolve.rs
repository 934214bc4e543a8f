//! Closed-form backsolver for a single XX hop.
//!
//! Solves for local Z rotations realising the identity
//!
//! ```text
//! CAN(a_t, b_t) = (Zr ⊗ Zs) · CAN(a1, b1) · (Zu ⊗ Zv) · CAN(a2) · (Zx ⊗ Zy)
//! ```
//!
//! where `Zθ` abbreviates `Rz(2θ)`.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use crate::unitary::{Unitary2x2, Unitary4x4};
use crate::utilities::{stable_arccos, Square};

/// Distance from `±π/2` of the phase of the `[3][0]` entry of the generated
/// matrix that signals a parity mismatch.
const PARITY_TOLERANCE: f64 = 0.01;

/// The six local angles produced by the backsolver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalAngles {
    /// Outer rotation on wire 0.
    pub r: f64,
    /// Outer rotation on wire 1.
    pub s: f64,
    /// Middle rotation on wire 0.
    pub u: f64,
    /// Middle rotation on wire 1.
    pub v: f64,
    /// Inner rotation on wire 0.
    pub x: f64,
    /// Inner rotation on wire 1.
    pub y: f64,
}

impl LocalAngles {
    /// All six angles in `(r, s, u, v, x, y)` order.
    pub fn to_array(self) -> [f64; 6] {
        [self.r, self.s, self.u, self.v, self.x, self.y]
    }

    /// Whether every angle is a number.
    ///
    /// A `NaN` marks a configuration that cannot be realised.
    pub fn is_valid(&self) -> bool {
        !self.to_array().iter().any(|angle| angle.is_nan())
    }
}

fn z_pair(first: f64, second: f64) -> Unitary4x4 {
    Unitary2x2::rz(2.0 * first).kron(&Unitary2x2::rz(2.0 * second))
}

/// Backsolve `CAN(a_target, b_target)` from `CAN(a_source, b_source)` and an
/// XX interaction of canonical strength `interaction`.
///
/// The result is invalid (see [`LocalAngles::is_valid`]) when no such
/// identity exists for these inputs.
pub fn decompose_xxyy_into_xxyy_xx(
    a_target: f64,
    b_target: f64,
    a_source: f64,
    b_source: f64,
    interaction: f64,
) -> LocalAngles {
    let cplus = (a_source + b_source).cos();
    let cminus = (a_source - b_source).cos();
    let splus = (a_source + b_source).sin();
    let sminus = (a_source - b_source).sin();
    let ca = interaction.cos();
    let sa = interaction.sin();

    let uplusv = 0.5
        * stable_arccos(
            cminus.sq() * ca.sq() + sminus.sq() * sa.sq() - (a_target - b_target).cos().sq(),
            2.0 * cminus * ca * sminus * sa,
        );
    let uminusv = 0.5
        * stable_arccos(
            cplus.sq() * ca.sq() + splus.sq() * sa.sq() - (a_target + b_target).cos().sq(),
            2.0 * cplus * ca * splus * sa,
        );
    let (u, v) = ((uplusv + uminusv) / 2.0, (uplusv - uminusv) / 2.0);

    // the target is phase-free, so the phases of the middle product fix the
    // outer rotations
    let middle = Unitary4x4::canonical(a_source, b_source, 0.0)
        .mul(&z_pair(u, v))
        .mul(&Unitary4x4::canonical(interaction, 0.0, 0.0));
    let phases = [
        middle.data[0][0].arg(),
        middle.data[1][1].arg(),
        middle.data[1][2].arg() + FRAC_PI_2,
        middle.data[0][3].arg() + FRAC_PI_2,
    ];
    let solve = |signs: [f64; 4]| -> f64 {
        signs.iter().zip(&phases).map(|(sign, phase)| sign * phase).sum::<f64>() / 4.0
    };
    let mut r = solve([1.0, 1.0, 1.0, 1.0]);
    let mut s = solve([1.0, -1.0, -1.0, 1.0]);
    let mut x = solve([1.0, 1.0, -1.0, -1.0]);
    let mut y = solve([1.0, -1.0, 1.0, -1.0]);

    // a residual ±i on the anti-diagonal needs an extra Z/2 ⊗ Z/2 conjugation
    let generated = z_pair(r, s).mul(&middle).mul(&z_pair(x, y));
    let corner = generated.data[3][0].arg();
    if ((corner - FRAC_PI_2).abs() < PARITY_TOLERANCE && a_target > b_target)
        || ((corner + FRAC_PI_2).abs() < PARITY_TOLERANCE && a_target < b_target)
    {
        x += FRAC_PI_4;
        y += FRAC_PI_4;
        r -= FRAC_PI_4;
        s -= FRAC_PI_4;
    }

    LocalAngles { r, s, u, v, x, y }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    /// A target reachable from `(a1, b1)` with strength `a2` and middle
    /// angles `(u0, v0)`.
    fn reachable_target(a1: f64, b1: f64, a2: f64, u0: f64, v0: f64) -> (f64, f64) {
        let (cm, sm) = ((a1 - b1).cos(), (a1 - b1).sin());
        let (cp, sp) = ((a1 + b1).cos(), (a1 + b1).sin());
        let (ca, sa) = (a2.cos(), a2.sin());
        let q1 = cm.sq() * ca.sq() + sm.sq() * sa.sq() - 2.0 * cm * ca * sm * sa * (2.0 * (u0 + v0)).cos();
        let q2 = cp.sq() * ca.sq() + sp.sq() * sa.sq() - 2.0 * cp * ca * sp * sa * (2.0 * (u0 - v0)).cos();
        let d = q1.clamp(0.0, 1.0).sqrt().acos();
        let p = q2.clamp(0.0, 1.0).sqrt().acos();
        ((p + d) / 2.0, (p - d) / 2.0)
    }

    fn rebuild(angles: &LocalAngles, a1: f64, b1: f64, a2: f64) -> Unitary4x4 {
        z_pair(angles.r, angles.s)
            .mul(&Unitary4x4::canonical(a1, b1, 0.0))
            .mul(&z_pair(angles.u, angles.v))
            .mul(&Unitary4x4::canonical(a2, 0.0, 0.0))
            .mul(&z_pair(angles.x, angles.y))
    }

    #[test]
    fn test_backsolve_is_exact() {
        for &(a1, b1, a2, u0, v0) in &[
            (PI / 8.0, 0.0, PI / 6.0, 0.7, 0.3),
            (0.6, 0.2, 0.4, 1.3, 2.2),
            (0.3, 0.1, 0.7, 0.2, 0.9),
        ] {
            let (at, bt) = reachable_target(a1, b1, a2, u0, v0);
            let angles = decompose_xxyy_into_xxyy_xx(at, bt, a1, b1, a2);
            assert!(angles.is_valid(), "no solution for {a1} {b1} {a2}");
            let got = rebuild(&angles, a1, b1, a2);
            let want = Unitary4x4::canonical(at, bt, 0.0);
            assert!(got.distance_up_to_phase(&want) < 1e-9);
        }
    }

    #[test]
    fn test_known_hop_angles() {
        let (at, bt) = (0.640179449822259, 0.18179662796323504);
        let angles = decompose_xxyy_into_xxyy_xx(at, bt, PI / 8.0, 0.0, PI / 6.0);
        let got = rebuild(&angles, PI / 8.0, 0.0, PI / 6.0);
        assert!(got.max_abs_diff(&Unitary4x4::canonical(at, bt, 0.0)) < 1e-9);
    }

    #[test]
    fn test_unreachable_target_is_nan() {
        // a weak source and a weak interaction cannot reach a strong target
        let angles = decompose_xxyy_into_xxyy_xx(0.75, 0.7, 0.05, 0.0, 0.05);
        assert!(!angles.is_valid());
        assert!(angles.u.is_nan());
    }
}
