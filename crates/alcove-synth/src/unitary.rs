//! Unitary matrix utilities for validating synthesized fragments.
//!
//! Provides 2x2 and 4x4 unitary matrices over [`Complex64`], the canonical
//! interaction matrix, and multiplication of a two-wire [`Circuit`] into a
//! single 4x4 unitary. Registers are big-endian: wire 0 is the first
//! Kronecker factor.

use alcove_ir::{Circuit, IrError, StandardGate};
use num_complex::Complex64;

use crate::error::SynthResult;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);

/// A 2x2 unitary matrix in row-major order.
#[derive(Debug, Clone, Copy)]
pub struct Unitary2x2 {
    /// The matrix elements in row-major order: [[a, b], [c, d]].
    pub data: [Complex64; 4],
}

impl Unitary2x2 {
    /// Create a new 2x2 unitary matrix.
    pub fn new(a: Complex64, b: Complex64, c: Complex64, d: Complex64) -> Self {
        Self { data: [a, b, c, d] }
    }

    /// Create the identity matrix.
    pub fn identity() -> Self {
        Self::new(ONE, ZERO, ZERO, ONE)
    }

    /// Create a Hadamard matrix.
    pub fn h() -> Self {
        let s = Complex64::new(1.0 / 2.0_f64.sqrt(), 0.0);
        Self::new(s, s, s, -s)
    }

    /// Create a Pauli-X matrix.
    pub fn x() -> Self {
        Self::new(ZERO, ONE, ONE, ZERO)
    }

    /// Create a Pauli-Y matrix.
    pub fn y() -> Self {
        Self::new(ZERO, Complex64::new(0.0, -1.0), Complex64::new(0.0, 1.0), ZERO)
    }

    /// Create a Pauli-Z matrix.
    pub fn z() -> Self {
        Self::new(ONE, ZERO, ZERO, -ONE)
    }

    /// Create an RX rotation matrix.
    pub fn rx(theta: f64) -> Self {
        let c = (theta / 2.0).cos();
        let s = (theta / 2.0).sin();
        Self::new(
            Complex64::new(c, 0.0),
            Complex64::new(0.0, -s),
            Complex64::new(0.0, -s),
            Complex64::new(c, 0.0),
        )
    }

    /// Create an RY rotation matrix.
    pub fn ry(theta: f64) -> Self {
        let c = (theta / 2.0).cos();
        let s = (theta / 2.0).sin();
        Self::new(
            Complex64::new(c, 0.0),
            Complex64::new(-s, 0.0),
            Complex64::new(s, 0.0),
            Complex64::new(c, 0.0),
        )
    }

    /// Create an RZ rotation matrix.
    pub fn rz(theta: f64) -> Self {
        Self::new(
            Complex64::from_polar(1.0, -theta / 2.0),
            ZERO,
            ZERO,
            Complex64::from_polar(1.0, theta / 2.0),
        )
    }

    /// Multiply this matrix by another: self * other.
    #[allow(clippy::many_single_char_names)]
    pub fn mul(&self, other: &Self) -> Self {
        let [a, b, c, d] = self.data;
        let [e, f, g, h] = other.data;
        Self::new(a * e + b * g, a * f + b * h, c * e + d * g, c * f + d * h)
    }

    /// Get the conjugate transpose (dagger).
    pub fn dagger(&self) -> Self {
        Self::new(
            self.data[0].conj(),
            self.data[2].conj(),
            self.data[1].conj(),
            self.data[3].conj(),
        )
    }

    /// Kronecker product `self ⊗ other`, with `self` on wire 0.
    pub fn kron(&self, other: &Self) -> Unitary4x4 {
        let mut data = [[ZERO; 4]; 4];
        for (i, row) in data.iter_mut().enumerate() {
            for (j, entry) in row.iter_mut().enumerate() {
                *entry = self.data[(i / 2) * 2 + j / 2] * other.data[(i % 2) * 2 + j % 2];
            }
        }
        Unitary4x4 { data }
    }
}

impl Default for Unitary2x2 {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::ops::Mul for Unitary2x2 {
    type Output = Self;

    #[allow(clippy::needless_pass_by_value)]
    fn mul(self, rhs: Self) -> Self::Output {
        Unitary2x2::mul(&self, &rhs)
    }
}

/// A 4x4 unitary matrix on a big-endian two-wire register.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unitary4x4 {
    /// Rows of the matrix.
    pub data: [[Complex64; 4]; 4],
}

impl Unitary4x4 {
    /// Create the identity matrix.
    pub fn identity() -> Self {
        let mut data = [[ZERO; 4]; 4];
        for (i, row) in data.iter_mut().enumerate() {
            row[i] = ONE;
        }
        Self { data }
    }

    /// Build `cos(θ/2) I − i sin(θ/2) P` from the matrix of the Pauli string `P`.
    fn pauli_rotation(theta: f64, pauli: [[f64; 4]; 4]) -> Self {
        let c = (theta / 2.0).cos();
        let s = (theta / 2.0).sin();
        let mut data = [[ZERO; 4]; 4];
        for (i, row) in data.iter_mut().enumerate() {
            for (j, entry) in row.iter_mut().enumerate() {
                let diagonal = if i == j { c } else { 0.0 };
                *entry = Complex64::new(diagonal, -s * pauli[i][j]);
            }
        }
        Self { data }
    }

    /// XX rotation `exp(−i θ/2 X⊗X)`.
    pub fn rxx(theta: f64) -> Self {
        Self::pauli_rotation(
            theta,
            [
                [0.0, 0.0, 0.0, 1.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [1.0, 0.0, 0.0, 0.0],
            ],
        )
    }

    /// YY rotation `exp(−i θ/2 Y⊗Y)`.
    pub fn ryy(theta: f64) -> Self {
        Self::pauli_rotation(
            theta,
            [
                [0.0, 0.0, 0.0, -1.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [-1.0, 0.0, 0.0, 0.0],
            ],
        )
    }

    /// ZZ rotation `exp(−i θ/2 Z⊗Z)`.
    pub fn rzz(theta: f64) -> Self {
        Self::pauli_rotation(
            theta,
            [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, -1.0, 0.0, 0.0],
                [0.0, 0.0, -1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        )
    }

    /// ZX rotation `exp(−i θ/2 Z⊗X)`, Z on wire 0.
    pub fn rzx(theta: f64) -> Self {
        Self::pauli_rotation(
            theta,
            [
                [0.0, 1.0, 0.0, 0.0],
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 0.0, 0.0, -1.0],
                [0.0, 0.0, -1.0, 0.0],
            ],
        )
    }

    /// CNOT with wire 0 as control.
    pub fn cx() -> Self {
        let mut data = [[ZERO; 4]; 4];
        data[0][0] = ONE;
        data[1][1] = ONE;
        data[2][3] = ONE;
        data[3][2] = ONE;
        Self { data }
    }

    /// Swap of the two wires.
    pub fn swap() -> Self {
        let mut data = [[ZERO; 4]; 4];
        data[0][0] = ONE;
        data[1][2] = ONE;
        data[2][1] = ONE;
        data[3][3] = ONE;
        Self { data }
    }

    /// Canonical interaction `exp(−i(a XX + b YY − c ZZ))`.
    ///
    /// `c` enters as `e^{+ic}` on the |00⟩/|11⟩ block.
    pub fn canonical(a: f64, b: f64, c: f64) -> Self {
        let (cp, sp) = ((a + b).cos(), (a + b).sin());
        let (cm, sm) = ((a - b).cos(), (a - b).sin());
        let e = Complex64::from_polar(1.0, c);
        let e_inv = e.conj();
        let i = Complex64::i();
        Self {
            data: [
                [e * cm, ZERO, ZERO, -i * e * sm],
                [ZERO, e_inv * cp, -i * e_inv * sp, ZERO],
                [ZERO, -i * e_inv * sp, e_inv * cp, ZERO],
                [-i * e * sm, ZERO, ZERO, e * cm],
            ],
        }
    }

    /// Multiply this matrix by another: self * other.
    pub fn mul(&self, other: &Self) -> Self {
        let mut data = [[ZERO; 4]; 4];
        for (i, row) in data.iter_mut().enumerate() {
            for (j, entry) in row.iter_mut().enumerate() {
                *entry = (0..4).map(|k| self.data[i][k] * other.data[k][j]).sum();
            }
        }
        Self { data }
    }

    /// Get the conjugate transpose (dagger).
    pub fn dagger(&self) -> Self {
        let mut data = [[ZERO; 4]; 4];
        for (i, row) in data.iter_mut().enumerate() {
            for (j, entry) in row.iter_mut().enumerate() {
                *entry = self.data[j][i].conj();
            }
        }
        Self { data }
    }

    /// Multiply every entry by a scalar.
    #[must_use]
    pub fn scale(&self, factor: Complex64) -> Self {
        Self {
            data: self.data.map(|row| row.map(|entry| entry * factor)),
        }
    }

    /// Largest entrywise distance to another matrix.
    pub fn max_abs_diff(&self, other: &Self) -> f64 {
        self.data
            .iter()
            .flatten()
            .zip(other.data.iter().flatten())
            .map(|(a, b)| (a - b).norm())
            .fold(0.0, f64::max)
    }

    /// Entrywise distance after removing the relative global phase.
    ///
    /// The phase is read off the largest entry of `other`.
    pub fn distance_up_to_phase(&self, other: &Self) -> f64 {
        let (mut row, mut col) = (0, 0);
        for (i, j) in (0..4).flat_map(|i| (0..4).map(move |j| (i, j))) {
            if other.data[i][j].norm() > other.data[row][col].norm() {
                (row, col) = (i, j);
            }
        }
        let ratio = self.data[row][col] / other.data[row][col];
        if !ratio.is_finite() || ratio.norm() == 0.0 {
            return f64::INFINITY;
        }
        self.scale(ratio.conj() / ratio.norm()).max_abs_diff(other)
    }

    /// Multiply a two-wire circuit out into its unitary, global phase included.
    pub fn from_circuit(circuit: &Circuit) -> SynthResult<Self> {
        if circuit.num_qubits() != 2 {
            return Err(IrError::WidthMismatch {
                expected: 2,
                got: circuit.num_qubits(),
            }
            .into());
        }

        let mut total = Self::identity();
        for inst in circuit.instructions() {
            let gate = match inst.qubits.as_slice() {
                [q] => single_qubit_matrix(inst.gate.kind).map(|single| {
                    if q.0 == 0 {
                        single.kron(&Unitary2x2::identity())
                    } else {
                        Unitary2x2::identity().kron(&single)
                    }
                }),
                [q0, q1] => two_qubit_matrix(inst.gate.kind).map(|pair| {
                    if q0 < q1 {
                        pair
                    } else {
                        let swap = Self::swap();
                        swap.mul(&pair).mul(&swap)
                    }
                }),
                _ => None,
            }
            .ok_or_else(|| IrError::QubitCountMismatch {
                gate_name: inst.name().to_string(),
                expected: inst.gate.num_qubits(),
                got: u32::try_from(inst.qubits.len()).unwrap_or(u32::MAX),
            })?;
            total = gate.mul(&total);
        }

        Ok(total.scale(Complex64::from_polar(1.0, circuit.global_phase())))
    }
}

impl std::ops::Mul for Unitary4x4 {
    type Output = Self;

    #[allow(clippy::needless_pass_by_value)]
    fn mul(self, rhs: Self) -> Self::Output {
        Unitary4x4::mul(&self, &rhs)
    }
}

fn single_qubit_matrix(gate: StandardGate) -> Option<Unitary2x2> {
    match gate {
        StandardGate::I => Some(Unitary2x2::identity()),
        StandardGate::X => Some(Unitary2x2::x()),
        StandardGate::Y => Some(Unitary2x2::y()),
        StandardGate::Z => Some(Unitary2x2::z()),
        StandardGate::H => Some(Unitary2x2::h()),
        StandardGate::Rx(theta) => Some(Unitary2x2::rx(theta)),
        StandardGate::Ry(theta) => Some(Unitary2x2::ry(theta)),
        StandardGate::Rz(theta) => Some(Unitary2x2::rz(theta)),
        StandardGate::CX
        | StandardGate::RXX(_)
        | StandardGate::RYY(_)
        | StandardGate::RZZ(_)
        | StandardGate::RZX(_) => None,
    }
}

fn two_qubit_matrix(gate: StandardGate) -> Option<Unitary4x4> {
    match gate {
        StandardGate::CX => Some(Unitary4x4::cx()),
        StandardGate::RXX(theta) => Some(Unitary4x4::rxx(theta)),
        StandardGate::RYY(theta) => Some(Unitary4x4::ryy(theta)),
        StandardGate::RZZ(theta) => Some(Unitary4x4::rzz(theta)),
        StandardGate::RZX(theta) => Some(Unitary4x4::rzx(theta)),
        StandardGate::I
        | StandardGate::X
        | StandardGate::Y
        | StandardGate::Z
        | StandardGate::H
        | StandardGate::Rx(_)
        | StandardGate::Ry(_)
        | StandardGate::Rz(_) => None,
    }
}
