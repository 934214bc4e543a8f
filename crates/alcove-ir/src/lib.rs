//! Alcove Circuit Fragments
//!
//! This crate provides the circuit container that the alcove synthesis core
//! populates: a flat, ordered list of gate applications on a small register,
//! together with a global phase.
//!
//! # Core Components
//!
//! - **Qubits**: [`QubitId`] for addressing wires
//! - **Gates**: [`StandardGate`] for the built-in gate set, with concrete angles
//! - **Instructions**: [`Instruction`] combining gates with their operands
//! - **Circuit**: [`Circuit`] builder, composition and inversion
//!
//! # Example: Conjugating a Native Interaction
//!
//! ```rust
//! use alcove_ir::{Circuit, QubitId};
//! use std::f64::consts::PI;
//!
//! let mut reflection = Circuit::with_size("reflect", 2);
//! reflection.rz(PI, QubitId(0)).unwrap();
//!
//! let mut native = Circuit::with_size("native", 2);
//! native.rxx(PI / 4.0, QubitId(0), QubitId(1)).unwrap();
//!
//! let mut circuit = reflection.clone();
//! circuit.compose(&native).unwrap();
//! circuit.compose(&reflection.inverse()).unwrap();
//!
//! assert_eq!(circuit.len(), 3);
//! assert_eq!(circuit.depth(), 3);
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `I`, `X`, `Y`, `Z` | 1 | Identity and Pauli gates |
//! | `H` | 1 | Hadamard gate |
//! | `Rx`, `Ry`, `Rz` | 1 | Rotation gates |
//! | `CX` | 2 | Controlled-NOT (CNOT) |
//! | `RXX`, `RYY`, `RZZ`, `RZX` | 2 | Two-qubit Pauli rotations |

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::{Gate, StandardGate};
pub use instruction::Instruction;
pub use qubit::QubitId;
