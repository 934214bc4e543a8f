//! Assembly of hop fragments into one circuit.
//!
//! The circuit built so far is threaded through the hops as a value. Each
//! hop conjugates it by the chosen reflection, shift and axis rotations and
//! wraps it with the native interaction and the backsolved Z rotations. The
//! phases picked up by the symmetries are multiplied together and converted
//! into a phase angle once the last hop is placed.

use alcove_ir::{Circuit, QubitId};
use num_complex::Complex64;
use tracing::{debug, instrument};

use crate::coordinates::CanonicalCoordinate;
use crate::error::{SynthError, SynthResult};
use crate::hop::{search_hop, HopSearch, HopSolution};
use crate::native::{NativeCatalog, NativeInteraction};
use crate::options::SynthesisOptions;
use crate::path::{DecompositionHop, DecompositionPath};
use crate::weyl::{apply_reflection, apply_shift, axis_rotation, Reflection, Shift};

const CIRCUIT_NAME: &str = "xx_synthesis";

/// Sequence `parts` into a fresh two-wire circuit.
fn concat(parts: &[&Circuit]) -> SynthResult<Circuit> {
    let mut circuit = Circuit::with_size(CIRCUIT_NAME, 2);
    for part in parts {
        circuit.compose(part)?;
    }
    Ok(circuit)
}

/// `Rz(2·first)` on wire 0 and `Rz(2·second)` on wire 1.
fn z_layer(first: f64, second: f64) -> SynthResult<Circuit> {
    let mut circuit = Circuit::with_size("z_layer", 2);
    circuit
        .rz(2.0 * first, QubitId(0))?
        .rz(2.0 * second, QubitId(1))?;
    Ok(circuit)
}

/// Circuit and symmetry phase accumulated over the hops placed so far.
#[derive(Debug, Clone)]
struct RunningState {
    circuit: Circuit,
    phase: Complex64,
}

impl RunningState {
    /// Place the first native interaction.
    ///
    /// Strong first interactions are reflected and shifted so that later hops
    /// start from the region the search expects.
    fn start(
        hop: &DecompositionHop,
        native: &NativeInteraction,
        options: &SynthesisOptions,
    ) -> SynthResult<Self> {
        if hop.target[0] <= options.first_hop_threshold {
            return Ok(Self {
                circuit: concat(&[&native.circuit])?,
                phase: Complex64::new(1.0, 0.0),
            });
        }

        let origin = CanonicalCoordinate::new(0.0, 0.0, 0.0);
        let reflection = apply_reflection(Reflection::ReflectXxYy, &origin)?;
        let shift = apply_shift(Shift::X, &origin)?;
        let circuit = concat(&[
            &reflection.circuit,
            &native.circuit,
            &reflection.circuit.inverse(),
            &shift.circuit,
        ])?;
        Ok(Self {
            circuit,
            phase: shift.phase * reflection.phase,
        })
    }

    /// Place one more hop around the circuit built so far.
    fn advance(
        self,
        source: &CanonicalCoordinate,
        solution: &HopSolution,
        native: &Circuit,
    ) -> SynthResult<Self> {
        let reflection = apply_reflection(solution.reflection, source)?;
        let shift = apply_shift(solution.shift, &reflection.coordinate)?;
        let source_rotation = axis_rotation(solution.source_axes.0, solution.source_axes.1)?;
        let target_rotation = axis_rotation(solution.target_axes.0, solution.target_axes.1)?;

        // the source interaction, moved onto the axes the backsolve used
        let moved = concat(&[
            &source_rotation,
            &reflection.circuit,
            &self.circuit,
            &reflection.circuit.inverse(),
            &shift.circuit,
            &source_rotation.inverse(),
        ])?;

        let angles = &solution.angles;
        let stepped = concat(&[
            &z_layer(angles.x, angles.y)?,
            native,
            &z_layer(angles.u, angles.v)?,
            &moved,
            &z_layer(angles.r, angles.s)?,
        ])?;

        let circuit = concat(&[&target_rotation.inverse(), &stepped, &target_rotation])?;
        Ok(Self {
            circuit,
            phase: self.phase * reflection.phase * shift.phase,
        })
    }

    /// Attach the accumulated symmetry phase as a phase angle.
    fn finish(self) -> Circuit {
        let mut circuit = self.circuit;
        circuit.set_global_phase(circuit.global_phase() - self.phase.ln().im);
        circuit
    }
}

/// Synthesizes circuits from decomposition paths.
#[derive(Debug, Clone, Default)]
pub struct Synthesizer {
    options: SynthesisOptions,
}

impl Synthesizer {
    /// Create a synthesizer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a synthesizer with the given options.
    pub fn with_options(options: SynthesisOptions) -> Self {
        Self { options }
    }

    /// The options in use.
    pub fn options(&self) -> &SynthesisOptions {
        &self.options
    }

    /// Index `interactions` with this synthesizer's XX tolerance.
    pub fn catalog(
        &self,
        interactions: impl IntoIterator<Item = NativeInteraction>,
    ) -> SynthResult<NativeCatalog> {
        NativeCatalog::new(interactions, self.options.xx_tolerance)
    }

    /// Realise `path` as a two-wire circuit whose unitary, global phase
    /// included, is the canonical interaction at the path's final target.
    ///
    /// An empty path yields an empty circuit with zero phase. A hop for which
    /// no symmetry combination can be backsolved yields
    /// [`SynthError::NoBacksolution`].
    #[instrument(skip(self, path, catalog), fields(hops = path.len()))]
    pub fn synthesize(
        &self,
        path: &DecompositionPath,
        catalog: &NativeCatalog,
    ) -> SynthResult<Circuit> {
        let Some((first, rest)) = path.hops().split_first() else {
            debug!("empty decomposition path");
            return Ok(Circuit::with_size(CIRCUIT_NAME, 2));
        };

        let start = RunningState::start(first, catalog.get(&first.interaction)?, &self.options)?;
        let state = rest
            .iter()
            .enumerate()
            .try_fold(start, |state, (offset, hop)| {
                self.place_hop(state, offset + 1, hop, catalog)
            })?;

        let circuit = state.finish();
        debug!(
            gates = circuit.len(),
            depth = circuit.depth(),
            global_phase = circuit.global_phase(),
            "synthesized XX circuit"
        );
        Ok(circuit)
    }

    fn place_hop(
        &self,
        state: RunningState,
        index: usize,
        hop: &DecompositionHop,
        catalog: &NativeCatalog,
    ) -> SynthResult<RunningState> {
        let source = hop.source.to_canonical();
        let target = hop.target.to_canonical();
        let strength = catalog.strength(&hop.interaction)?;

        match search_hop(&source, &target, strength, &self.options) {
            HopSearch::Solved(solution) => {
                debug!(
                    hop = index,
                    interaction = %hop.interaction,
                    reflection = %solution.reflection,
                    shift = %solution.shift,
                    source_axes = ?solution.source_axes,
                    target_axes = ?solution.target_axes,
                    "hop solved"
                );
                state.advance(&source, &solution, &catalog.get(&hop.interaction)?.circuit)
            }
            HopSearch::Exhausted => Err(SynthError::NoBacksolution {
                hop: index,
                start: source,
                target,
                strength,
            }),
        }
    }
}

/// Synthesize `path` with default options over the given interactions.
///
/// Returns the circuit together with its global phase angle.
pub fn synthesize(
    path: &DecompositionPath,
    interactions: &[NativeInteraction],
) -> SynthResult<(Circuit, f64)> {
    let synthesizer = Synthesizer::new();
    let catalog = synthesizer.catalog(interactions.iter().cloned())?;
    let circuit = synthesizer.synthesize(path, &catalog)?;
    let phase = circuit.global_phase();
    Ok((circuit, phase))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinates::AlcoveCoordinate;
    use crate::native::Embodiment;
    use crate::unitary::Unitary4x4;
    use num_rational::Ratio;
    use std::f64::consts::PI;

    fn xx(label: &str, strength: f64) -> NativeInteraction {
        NativeInteraction::xx(label, strength, Ratio::from_integer(1), Embodiment::Rxx).unwrap()
    }

    #[test]
    fn test_z_layer() {
        let layer = z_layer(0.25, -0.5).unwrap();
        assert_eq!(layer.len(), 2);
        assert_eq!(layer.depth(), 1);
    }

    #[test]
    fn test_running_state_start_below_threshold() {
        let native = xx("a", 0.2);
        let hop = DecompositionHop::new(AlcoveCoordinate::new(0.0, 0.0, 0.0), "a", native.coordinate);
        let state = RunningState::start(&hop, &native, &SynthesisOptions::default()).unwrap();
        assert_eq!(state.circuit.instructions(), native.circuit.instructions());
        assert_eq!(state.phase, Complex64::new(1.0, 0.0));
    }

    #[test]
    fn test_running_state_start_above_threshold() {
        let strength = 0.3 * PI;
        let native = xx("a", strength);
        let hop = DecompositionHop::new(AlcoveCoordinate::new(0.0, 0.0, 0.0), "a", native.coordinate);
        let state = RunningState::start(&hop, &native, &SynthesisOptions::default()).unwrap();
        assert_eq!(state.circuit.len(), 5);
        assert_eq!(state.phase, Complex64::new(0.0, -1.0));

        let circuit = state.finish();
        assert!((circuit.global_phase() - PI / 2.0).abs() < 1e-15);
        let got = Unitary4x4::from_circuit(&circuit).unwrap();
        let want = Unitary4x4::canonical(PI / 2.0 - strength, 0.0, 0.0);
        assert!(got.max_abs_diff(&want) < 1e-12);
    }

    #[test]
    fn test_failed_hop_reports_position() {
        let native = xx("a", 0.2);
        let source = CanonicalCoordinate::new(0.1, 0.2, 0.3).to_alcove();
        let target = CanonicalCoordinate::new(0.55, 0.75, 1.05).to_alcove();
        let path = DecompositionPath::new()
            .with_hop(DecompositionHop::new(AlcoveCoordinate::new(0.0, 0.0, 0.0), "a", native.coordinate))
            .with_hop(DecompositionHop::new(source, "a", target));

        let synthesizer = Synthesizer::new();
        let catalog = synthesizer.catalog([native]).unwrap();
        let err = synthesizer.synthesize(&path, &catalog).unwrap_err();
        assert!(matches!(err, SynthError::NoBacksolution { hop: 1, .. }));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_unknown_interaction() {
        let origin = AlcoveCoordinate::new(0.0, 0.0, 0.0);
        let path = DecompositionPath::new().with_hop(DecompositionHop::new(origin, "missing", origin));
        let (synthesizer, catalog) = (Synthesizer::new(), NativeCatalog::default());
        assert!(matches!(
            synthesizer.synthesize(&path, &catalog),
            Err(SynthError::UnknownInteraction(_))
        ));
    }
}
