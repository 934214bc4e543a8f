//! Property-based tests for XX synthesis.
//!
//! Tests that synthesized circuits multiply out to the canonical interaction
//! at the end of their path, and that the numerical helpers obey their laws.

use alcove_synth::{
    AlcoveCoordinate, CanonicalCoordinate, DecompositionHop, DecompositionPath, Embodiment,
    NativeInteraction, Reflection, Shift, Synthesizer, Unitary4x4, near, stable_arccos,
};
use num_rational::Ratio;
use proptest::prelude::*;
use std::f64::consts::{FRAC_PI_4, PI};

const ORIGIN: AlcoveCoordinate = AlcoveCoordinate::new(0.0, 0.0, 0.0);

/// Worst entrywise error once a shared axis is matched only within the
/// overlap tolerance and the backsolve snaps a near-boundary arccos.
const INEXACT_MATCH_BOUND: f64 = 0.1;

fn xx(label: &str, strength: f64) -> NativeInteraction {
    NativeInteraction::xx(label, strength, Ratio::from_integer(1), Embodiment::Rxx).unwrap()
}

fn synthesize_unitary(path: &DecompositionPath, interactions: Vec<NativeInteraction>) -> Unitary4x4 {
    let synthesizer = Synthesizer::new();
    let catalog = synthesizer.catalog(interactions).unwrap();
    let circuit = synthesizer.synthesize(path, &catalog).unwrap();
    Unitary4x4::from_circuit(&circuit).unwrap()
}

/// The canonical pair reached from `CAN(a1)` through an interaction of
/// strength `a2` with middle rotations `(u0, v0)`.
fn hop_target(a1: f64, a2: f64, u0: f64, v0: f64) -> (f64, f64) {
    let (c1, s1) = (a1.cos(), a1.sin());
    let (c2, s2) = (a2.cos(), a2.sin());
    let q1 = c1 * c1 * c2 * c2 + s1 * s1 * s2 * s2 - 2.0 * c1 * c2 * s1 * s2 * (2.0 * (u0 + v0)).cos();
    let q2 = c1 * c1 * c2 * c2 + s1 * s1 * s2 * s2 - 2.0 * c1 * c2 * s1 * s2 * (2.0 * (u0 - v0)).cos();
    let d = q1.clamp(0.0, 1.0).sqrt().acos();
    let p = q2.clamp(0.0, 1.0).sqrt().acos();
    ((p + d) / 2.0, (p - d) / 2.0)
}

/// Whether some symmetry image of `source` comes within the overlap
/// tolerance of a target axis without matching it exactly.
///
/// Such near-coincidences make the search accept an axis pairing whose
/// residual mismatch, up to the tolerance, shows up in the circuit.
fn has_near_tie(source: &CanonicalCoordinate, target: &CanonicalCoordinate) -> bool {
    for reflection in Reflection::ALL {
        let reflected = source.reflect(&reflection.entry().scalars);
        for shift in Shift::ALL {
            let shifted = reflected.shift(&shift.entry().scalars);
            for i in 0..3 {
                for j in 0..3 {
                    let d = (shifted[i] - target[j]).abs() % PI;
                    let d = d.min(PI - d);
                    if d > 1e-9 && d < 0.05 {
                        return true;
                    }
                }
            }
        }
    }
    false
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// A single hop reproduces the native interaction exactly.
    #[test]
    fn single_hop_roundtrip(strength in 0.0..=FRAC_PI_4) {
        let native = xx("native", strength);
        let target = native.coordinate;
        let path = DecompositionPath::new().with_hop(DecompositionHop::new(ORIGIN, "native", target));

        let got = synthesize_unitary(&path, vec![native]);
        let c = target.to_canonical();
        let want = Unitary4x4::canonical(c[0], c[1], c[2]);
        prop_assert!(got.max_abs_diff(&want) < 1e-12);
    }

    /// Two hops reach every target generated from the backsolve family.
    #[test]
    fn two_hop_roundtrip(
        a1 in 0.05..=FRAC_PI_4,
        a2 in 0.05..=FRAC_PI_4,
        u0 in 0.0..PI,
        v0 in 0.0..PI,
    ) {
        let (at, bt) = hop_target(a1, a2, u0, v0);
        let source = CanonicalCoordinate::new(a1, 0.0, 0.0);
        let target = CanonicalCoordinate::new(at, bt, 0.0);
        prop_assume!(!has_near_tie(&source, &target));

        let first = xx("first", a1);
        let second = xx("second", a2);
        let path = DecompositionPath::new()
            .with_hop(DecompositionHop::new(ORIGIN, "first", first.coordinate))
            .with_hop(DecompositionHop::new(first.coordinate, "second", target.to_alcove()));

        let got = synthesize_unitary(&path, vec![first, second]);
        let want = Unitary4x4::canonical(at, bt, 0.0);
        prop_assert!(got.max_abs_diff(&want) < 1e-6, "error {}", got.max_abs_diff(&want));
    }

    /// Every valid two-hop target is reached, and near-coincident axes only
    /// cost accuracy up to a fixed bound.
    #[test]
    fn two_hop_error_is_bounded(
        a1 in 0.05..=FRAC_PI_4,
        a2 in 0.05..=FRAC_PI_4,
        u0 in 0.0..PI,
        v0 in 0.0..PI,
    ) {
        let (at, bt) = hop_target(a1, a2, u0, v0);
        prop_assume!(bt >= 0.0);
        let target = CanonicalCoordinate::new(at, bt, 0.0);

        let first = xx("first", a1);
        let second = xx("second", a2);
        let path = DecompositionPath::new()
            .with_hop(DecompositionHop::new(ORIGIN, "first", first.coordinate))
            .with_hop(DecompositionHop::new(first.coordinate, "second", target.to_alcove()));

        let got = synthesize_unitary(&path, vec![first, second]);
        let want = Unitary4x4::canonical(at, bt, 0.0);
        prop_assert!(
            got.max_abs_diff(&want) < INEXACT_MATCH_BOUND,
            "error {}",
            got.max_abs_diff(&want)
        );
    }

    /// `near` ignores whole periods and is symmetric.
    #[test]
    fn near_is_periodic(x in -2.0..2.0_f64, offset in -0.009..0.009_f64, k in 0_u32..3) {
        let y = x + offset + f64::from(k) * PI;
        prop_assert!(near(x, y, PI, 1e-2));
        prop_assert_eq!(near(x, y, PI, 1e-2), near(y, x, PI, 1e-2));
    }

    /// `near` rejects values separated by more than the tolerance in both
    /// directions around the circle.
    #[test]
    fn near_rejects_separated_values(x in -2.0..2.0_f64, gap in 0.02..(PI - 0.02)) {
        prop_assert!(!near(x, x + gap, PI, 1e-2));
    }

    /// In range, `stable_arccos` is plain arccos.
    #[test]
    fn stable_arccos_in_range(ratio in -1.0..=1.0_f64, scale in 0.1..10.0_f64) {
        let got = stable_arccos(ratio * scale, scale);
        prop_assert!((got - ratio.acos()).abs() < 1e-9);
    }

    /// Slight overshoot snaps to the boundary value exactly.
    #[test]
    fn stable_arccos_snaps(overshoot in 1e-6..0.0049_f64, scale in 0.5..2.0_f64) {
        prop_assert_eq!(stable_arccos(scale + overshoot, scale), 0.0);
        prop_assert_eq!(stable_arccos(-scale - overshoot, scale), PI);
    }
}
