//! XX-interaction circuit synthesis.
//!
//! Turns a decomposition path through the canonical alcove into an exact
//! two-qubit circuit built from native XX interactions and single-qubit
//! rotations. Every hop after the first is realised by searching the
//! reflection and shift symmetries of the canonical interaction for a
//! configuration where the source and target share an axis, then
//! backsolving the remaining two axes in closed form.
//!
//! # Example
//!
//! ```rust
//! use alcove_synth::{
//!     DecompositionHop, DecompositionPath, Embodiment, NativeInteraction, Synthesizer,
//!     AlcoveCoordinate, Unitary4x4,
//! };
//! use num_rational::Ratio;
//! use std::f64::consts::PI;
//!
//! let cx = NativeInteraction::xx("cx", PI / 4.0, Ratio::from_integer(1), Embodiment::Rzx)?;
//! let path = DecompositionPath::new().with_hop(DecompositionHop::new(
//!     AlcoveCoordinate::new(0.0, 0.0, 0.0),
//!     "cx",
//!     cx.coordinate,
//! ));
//!
//! let synthesizer = Synthesizer::new();
//! let catalog = synthesizer.catalog([cx])?;
//! let circuit = synthesizer.synthesize(&path, &catalog)?;
//!
//! let unitary = Unitary4x4::from_circuit(&circuit)?;
//! assert!(unitary.max_abs_diff(&Unitary4x4::canonical(PI / 4.0, 0.0, 0.0)) < 1e-12);
//! # Ok::<(), alcove_synth::SynthError>(())
//! ```

pub mod assembler;
pub mod backsolve;
pub mod coordinates;
pub mod error;
pub mod hop;
pub mod native;
pub mod options;
pub mod path;
pub mod unitary;
pub mod utilities;
pub mod weyl;

pub use assembler::{synthesize, Synthesizer};
pub use backsolve::{decompose_xxyy_into_xxyy_xx, LocalAngles};
pub use coordinates::{alcove_to_positive_canonical, AlcoveCoordinate, CanonicalCoordinate};
pub use error::{SynthError, SynthResult};
pub use hop::{search_hop, HopSearch, HopSolution};
pub use native::{Embodiment, NativeCatalog, NativeInteraction};
pub use options::SynthesisOptions;
pub use path::{DecompositionHop, DecompositionPath};
pub use unitary::{Unitary2x2, Unitary4x4};
pub use utilities::{l1_distance, near, stable_arccos};
pub use weyl::{
    apply_reflection, apply_shift, axis_rotation, PhaseConfidence, Reflection, Shift,
    SymmetryImage,
};
