//! Symmetry search for a single decomposition hop.
//!
//! Walks every reflection and shift of the source coordinate, in table
//! order, looking for one that makes some source axis coincide with some
//! target axis and for which the remaining two axes on each side can be
//! backsolved.

use tracing::trace;

use crate::backsolve::{decompose_xxyy_into_xxyy_xx, LocalAngles};
use crate::coordinates::CanonicalCoordinate;
use crate::options::SynthesisOptions;
use crate::utilities::near;
use crate::weyl::{Reflection, Shift};

/// The symmetry choice and local angles that realise a hop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HopSolution {
    /// Reflection applied to the source.
    pub reflection: Reflection,
    /// Shift applied to the reflected source.
    pub shift: Shift,
    /// Source axes rotated into XX and YY.
    pub source_axes: (usize, usize),
    /// Target axes rotated into XX and YY.
    pub target_axes: (usize, usize),
    /// Backsolved local rotations.
    pub angles: LocalAngles,
}

/// Outcome of searching for a hop realisation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HopSearch {
    /// The first valid combination in search order.
    Solved(HopSolution),
    /// No combination works.
    Exhausted,
}

/// The two axes other than `shared`, in increasing order.
fn other_axes(shared: usize) -> (usize, usize) {
    match shared {
        0 => (1, 2),
        1 => (0, 2),
        _ => (0, 1),
    }
}

/// Search the reflection and shift images of `source` for one from which
/// `target` can be reached with an XX interaction of `strength`.
pub fn search_hop(
    source: &CanonicalCoordinate,
    target: &CanonicalCoordinate,
    strength: f64,
    options: &SynthesisOptions,
) -> HopSearch {
    for reflection in Reflection::ALL {
        let reflected = source.reflect(&reflection.entry().scalars);
        for shift in Shift::ALL {
            let shifted = reflected.shift(&shift.entry().scalars);

            let Some((source_shared, target_shared)) = (0..3)
                .flat_map(|i| (0..3).map(move |j| (i, j)))
                .find(|&(i, j)| {
                    near(
                        shifted[i],
                        target[j],
                        options.overlap_modulus,
                        options.overlap_tolerance,
                    )
                })
            else {
                continue;
            };

            let source_axes = other_axes(source_shared);
            let target_axes = other_axes(target_shared);
            let angles = decompose_xxyy_into_xxyy_xx(
                target[target_axes.0],
                target[target_axes.1],
                shifted[source_axes.0],
                shifted[source_axes.1],
                strength,
            );
            if !angles.is_valid() {
                trace!(%reflection, %shift, source_shared, target_shared, "backsolve failed");
                continue;
            }

            return HopSearch::Solved(HopSolution {
                reflection,
                shift,
                source_axes,
                target_axes,
                angles,
            });
        }
    }
    HopSearch::Exhausted
}
