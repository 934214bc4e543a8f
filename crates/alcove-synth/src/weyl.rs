//! Symmetries of the canonical interaction.
//!
//! Reflections flip the sign of two canonical axes and shifts add `π/2` to a
//! subset of axes. Each is enacted physically by conjugating (reflections) or
//! multiplying (shifts) with rotations by `π`, at the cost of a global phase
//! recorded in the table entry. Axis rotations permute which canonical axis
//! plays the role of XX, YY and ZZ.
//!
//! Table order is significant: the hop search walks reflections and shifts in
//! the order of [`Reflection::ALL`] and [`Shift::ALL`], which decides the
//! solution returned when several exist.

use std::f64::consts::{FRAC_PI_2, PI};
use std::fmt;

use alcove_ir::{Circuit, QubitId, StandardGate};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::coordinates::CanonicalCoordinate;
use crate::error::{SynthError, SynthResult};

/// Single-qubit rotation axis used to enact a symmetry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationAxis {
    /// `Rx`.
    X,
    /// `Ry`.
    Y,
    /// `Rz`.
    Z,
}

impl RotationAxis {
    /// The rotation about this axis by `theta`.
    pub fn rotation(self, theta: f64) -> StandardGate {
        match self {
            RotationAxis::X => StandardGate::Rx(theta),
            RotationAxis::Y => StandardGate::Ry(theta),
            RotationAxis::Z => StandardGate::Rz(theta),
        }
    }
}

/// How thoroughly a table entry's phase has been validated against
/// physical circuits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhaseConfidence {
    /// Validated directly.
    Checked,
    /// Validated only in combination with another entry.
    Partial,
    /// Never validated.
    Unchecked,
}

/// A row of the reflection table.
#[derive(Debug, Clone, Copy)]
pub struct ReflectionEntry {
    /// Readable name.
    pub name: &'static str,
    /// Per-axis sign applied to the canonical coordinate.
    pub scalars: [f64; 3],
    /// Global phase picked up by the conjugation.
    pub phase: Complex64,
    /// Rotations by `π` applied to wire 0, in order.
    pub generators: &'static [RotationAxis],
    /// Validation status of `phase`.
    pub confidence: PhaseConfidence,
}

/// A row of the shift table.
#[derive(Debug, Clone, Copy)]
pub struct ShiftEntry {
    /// Readable name.
    pub name: &'static str,
    /// Per-axis multiple of `π/2` added to the canonical coordinate.
    pub scalars: [f64; 3],
    /// Global phase picked up by the shift.
    pub phase: Complex64,
    /// Rotations by `π` applied to both wires, in order.
    pub generators: &'static [RotationAxis],
    /// Validation status of `phase`.
    pub confidence: PhaseConfidence,
}

const C_ONE: Complex64 = Complex64::new(1.0, 0.0);
const C_M_ONE: Complex64 = Complex64::new(-1.0, 0.0);
const IM: Complex64 = Complex64::new(0.0, 1.0);
const M_IM: Complex64 = Complex64::new(0.0, -1.0);

static REFLECTIONS: [ReflectionEntry; 4] = [
    ReflectionEntry {
        name: "no reflection",
        scalars: [1.0, 1.0, 1.0],
        phase: C_ONE,
        generators: &[],
        confidence: PhaseConfidence::Checked,
    },
    ReflectionEntry {
        name: "reflect XX, YY",
        scalars: [-1.0, -1.0, 1.0],
        phase: C_ONE,
        generators: &[RotationAxis::Z],
        confidence: PhaseConfidence::Checked,
    },
    ReflectionEntry {
        name: "reflect XX, ZZ",
        scalars: [-1.0, 1.0, -1.0],
        phase: C_ONE,
        generators: &[RotationAxis::Y],
        confidence: PhaseConfidence::Partial,
    },
    ReflectionEntry {
        name: "reflect YY, ZZ",
        scalars: [1.0, -1.0, -1.0],
        phase: C_M_ONE,
        generators: &[RotationAxis::X],
        confidence: PhaseConfidence::Unchecked,
    },
];

static SHIFTS: [ShiftEntry; 8] = [
    ShiftEntry {
        name: "no shift",
        scalars: [0.0, 0.0, 0.0],
        phase: C_ONE,
        generators: &[],
        confidence: PhaseConfidence::Checked,
    },
    ShiftEntry {
        name: "Z shift",
        scalars: [0.0, 0.0, 1.0],
        phase: IM,
        generators: &[RotationAxis::Z],
        confidence: PhaseConfidence::Checked,
    },
    ShiftEntry {
        name: "Y shift",
        scalars: [0.0, 1.0, 0.0],
        phase: M_IM,
        generators: &[RotationAxis::Y],
        confidence: PhaseConfidence::Partial,
    },
    ShiftEntry {
        name: "Y,Z shift",
        scalars: [0.0, 1.0, 1.0],
        phase: C_M_ONE,
        generators: &[RotationAxis::Y, RotationAxis::Z],
        confidence: PhaseConfidence::Unchecked,
    },
    ShiftEntry {
        name: "X shift",
        scalars: [1.0, 0.0, 0.0],
        phase: M_IM,
        generators: &[RotationAxis::X],
        confidence: PhaseConfidence::Checked,
    },
    ShiftEntry {
        name: "X,Z shift",
        scalars: [1.0, 0.0, 1.0],
        phase: C_ONE,
        generators: &[RotationAxis::X, RotationAxis::Z],
        confidence: PhaseConfidence::Checked,
    },
    ShiftEntry {
        name: "X,Y shift",
        scalars: [1.0, 1.0, 0.0],
        phase: C_M_ONE,
        generators: &[RotationAxis::X, RotationAxis::Y],
        confidence: PhaseConfidence::Unchecked,
    },
    ShiftEntry {
        name: "X,Y,Z shift",
        scalars: [1.0, 1.0, 1.0],
        phase: M_IM,
        generators: &[RotationAxis::X, RotationAxis::Y, RotationAxis::Z],
        confidence: PhaseConfidence::Unchecked,
    },
];

/// Sign-flip symmetries of the canonical coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Reflection {
    /// Identity.
    NoReflection = 0,
    /// Negate the XX and YY axes.
    ReflectXxYy = 1,
    /// Negate the XX and ZZ axes.
    ReflectXxZz = 2,
    /// Negate the YY and ZZ axes.
    ReflectYyZz = 3,
}

impl Reflection {
    /// Every reflection, in search order.
    pub const ALL: [Reflection; 4] = [
        Reflection::NoReflection,
        Reflection::ReflectXxYy,
        Reflection::ReflectXxZz,
        Reflection::ReflectYyZz,
    ];

    /// The table row for this reflection.
    pub fn entry(self) -> &'static ReflectionEntry {
        &REFLECTIONS[self as usize]
    }

    /// Readable name.
    pub fn name(self) -> &'static str {
        self.entry().name
    }

    /// Look a reflection up by its readable name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.name() == name)
    }
}

impl fmt::Display for Reflection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// `π/2` translation symmetries of the canonical coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shift {
    /// Identity.
    NoShift = 0,
    /// Shift ZZ.
    Z = 1,
    /// Shift YY.
    Y = 2,
    /// Shift YY and ZZ.
    YZ = 3,
    /// Shift XX.
    X = 4,
    /// Shift XX and ZZ.
    XZ = 5,
    /// Shift XX and YY.
    XY = 6,
    /// Shift every axis.
    XYZ = 7,
}

impl Shift {
    /// Every shift, in search order.
    pub const ALL: [Shift; 8] = [
        Shift::NoShift,
        Shift::Z,
        Shift::Y,
        Shift::YZ,
        Shift::X,
        Shift::XZ,
        Shift::XY,
        Shift::XYZ,
    ];

    /// The table row for this shift.
    pub fn entry(self) -> &'static ShiftEntry {
        &SHIFTS[self as usize]
    }

    /// Readable name.
    pub fn name(self) -> &'static str {
        self.entry().name
    }

    /// Look a shift up by its readable name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.name() == name)
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The outcome of applying a symmetry to a coordinate.
#[derive(Debug, Clone)]
pub struct SymmetryImage {
    /// Transformed coordinate.
    pub coordinate: CanonicalCoordinate,
    /// Fragment enacting the symmetry.
    pub circuit: Circuit,
    /// Global phase picked up.
    pub phase: Complex64,
}

/// Reflect a coordinate and describe the circuit that enacts the reflection.
pub fn apply_reflection(
    reflection: Reflection,
    coordinate: &CanonicalCoordinate,
) -> SynthResult<SymmetryImage> {
    let entry = reflection.entry();
    let mut circuit = Circuit::with_size(entry.name, 2);
    for axis in entry.generators {
        circuit.gate(axis.rotation(PI), [QubitId(0)])?;
    }
    Ok(SymmetryImage {
        coordinate: coordinate.reflect(&entry.scalars),
        circuit,
        phase: entry.phase,
    })
}

/// Shift a coordinate and describe the circuit that enacts the shift.
pub fn apply_shift(shift: Shift, coordinate: &CanonicalCoordinate) -> SynthResult<SymmetryImage> {
    let entry = shift.entry();
    let mut circuit = Circuit::with_size(entry.name, 2);
    for axis in entry.generators {
        circuit.gate(axis.rotation(PI), [QubitId(0)])?;
        circuit.gate(axis.rotation(PI), [QubitId(1)])?;
    }
    Ok(SymmetryImage {
        coordinate: coordinate.shift(&entry.scalars),
        circuit,
        phase: entry.phase,
    })
}

/// The fragment rotating `a0 XX + a1 YY + a2 ZZ` into
/// `a[first] XX + a[second] YY + a[other] ZZ`.
pub fn axis_rotation(first: usize, second: usize) -> SynthResult<Circuit> {
    let (q0, q1) = (QubitId(0), QubitId(1));
    let mut circuit = Circuit::with_size(format!("rotate_{first}{second}"), 2);
    match (first, second) {
        (0, 1) => {}
        (0, 2) => {
            circuit.rx(-FRAC_PI_2, q0)?.rx(FRAC_PI_2, q1)?;
        }
        (1, 0) => {
            circuit.rz(-FRAC_PI_2, q0)?.rz(-FRAC_PI_2, q1)?;
        }
        (1, 2) => {
            circuit
                .rz(FRAC_PI_2, q0)?
                .rz(FRAC_PI_2, q1)?
                .ry(FRAC_PI_2, q0)?
                .ry(-FRAC_PI_2, q1)?;
        }
        (2, 0) => {
            circuit
                .rz(FRAC_PI_2, q0)?
                .rz(FRAC_PI_2, q1)?
                .rx(FRAC_PI_2, q0)?
                .rx(-FRAC_PI_2, q1)?;
        }
        (2, 1) => {
            circuit.ry(FRAC_PI_2, q0)?.ry(-FRAC_PI_2, q1)?;
        }
        _ => return Err(SynthError::InvalidAxisPair { first, second }),
    }
    Ok(circuit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_have_unit_phases() {
        for r in Reflection::ALL {
            assert!((r.entry().phase.norm() - 1.0).abs() < 1e-15);
        }
        for s in Shift::ALL {
            assert!((s.entry().phase.norm() - 1.0).abs() < 1e-15);
        }
    }

    #[test]
    fn test_lookup_by_name() {
        assert_eq!(Reflection::from_name("reflect XX, YY"), Some(Reflection::ReflectXxYy));
        assert_eq!(Shift::from_name("X shift"), Some(Shift::X));
        assert_eq!(Shift::from_name("W shift"), None);
        for s in Shift::ALL {
            assert_eq!(Shift::from_name(s.name()), Some(s));
        }
    }

    #[test]
    fn test_reflection_acts_on_wire_zero() {
        let image =
            apply_reflection(Reflection::ReflectYyZz, &CanonicalCoordinate::new(0.1, 0.2, 0.3))
                .unwrap();
        assert_eq!(image.coordinate, CanonicalCoordinate::new(0.1, -0.2, -0.3));
        assert_eq!(image.phase, C_M_ONE);
        assert_eq!(image.circuit.len(), 1);
        assert_eq!(image.circuit.instructions()[0].qubits, vec![QubitId(0)]);
        assert_eq!(image.circuit.instructions()[0].gate.kind, StandardGate::Rx(PI));
    }

    #[test]
    fn test_shift_acts_on_both_wires() {
        let image = apply_shift(Shift::XZ, &CanonicalCoordinate::new(0.1, 0.2, 0.3)).unwrap();
        assert!((image.coordinate[0] - (0.1 + FRAC_PI_2)).abs() < 1e-15);
        assert_eq!(image.coordinate[1], 0.2);
        assert!((image.coordinate[2] - (0.3 + FRAC_PI_2)).abs() < 1e-15);
        let kinds: Vec<_> = image.circuit.instructions().iter().map(|i| i.gate.kind).collect();
        assert_eq!(
            kinds,
            vec![
                StandardGate::Rx(PI),
                StandardGate::Rx(PI),
                StandardGate::Rz(PI),
                StandardGate::Rz(PI)
            ]
        );
    }

    #[test]
    fn test_identity_entries_are_empty() {
        let c = CanonicalCoordinate::new(0.4, 0.3, 0.2);
        let r = apply_reflection(Reflection::NoReflection, &c).unwrap();
        let s = apply_shift(Shift::NoShift, &c).unwrap();
        assert!(r.circuit.is_empty() && s.circuit.is_empty());
        assert_eq!(r.coordinate, c);
        assert_eq!(s.coordinate, c);
    }

    #[test]
    fn test_axis_rotation_covers_all_permutations() {
        let lengths: Vec<_> = [(0, 1), (0, 2), (1, 0), (1, 2), (2, 0), (2, 1)]
            .into_iter()
            .map(|(f, s)| axis_rotation(f, s).unwrap().len())
            .collect();
        assert_eq!(lengths, vec![0, 2, 2, 4, 4, 2]);

        assert!(matches!(
            axis_rotation(1, 1),
            Err(SynthError::InvalidAxisPair { first: 1, second: 1 })
        ));
        assert!(axis_rotation(0, 3).is_err());
    }
}
