//! Native XX interactions and the catalog they are drawn from.

use alcove_ir::{Circuit, IrError, QubitId};
use num_rational::Ratio;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::coordinates::{AlcoveCoordinate, CanonicalCoordinate};
use crate::error::{SynthError, SynthResult};

/// A two-qubit interaction available on hardware.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NativeInteraction {
    /// Name used by decomposition hops to refer to this interaction.
    pub label: String,
    /// Alcove coordinate of the interaction.
    pub coordinate: AlcoveCoordinate,
    /// Cost of one use, consumed by path search.
    pub cost: Ratio<u64>,
    /// Fragment enacting the interaction exactly.
    pub circuit: Circuit,
}

impl NativeInteraction {
    /// Create a native interaction from its parts.
    pub fn new(
        label: impl Into<String>,
        coordinate: AlcoveCoordinate,
        cost: Ratio<u64>,
        circuit: Circuit,
    ) -> Self {
        Self {
            label: label.into(),
            coordinate,
            cost,
            circuit,
        }
    }

    /// An XX interaction of canonical `strength`, enacted by `embodiment`.
    pub fn xx(
        label: impl Into<String>,
        strength: f64,
        cost: Ratio<u64>,
        embodiment: Embodiment,
    ) -> SynthResult<Self> {
        Ok(Self::new(
            label,
            CanonicalCoordinate::new(strength, 0.0, 0.0).to_alcove(),
            cost,
            embodiment.circuit(strength)?,
        ))
    }

    /// Build an interaction whose coordinate is pinned down by the equality
    /// rows of a point polytope.
    ///
    /// Each row `[k, c0, c1, c2]` reads `k + c0·x + c1·y + c2·z = 0`. Axis `j`
    /// is taken from the first row with a nonzero `c_j`, as `−k / c_j`.
    pub fn from_equalities(
        label: impl Into<String>,
        equalities: &[[f64; 4]],
        cost: Ratio<u64>,
        circuit: Circuit,
    ) -> SynthResult<Self> {
        let label = label.into();
        let mut coordinate = [0.0; 3];
        for (axis, value) in coordinate.iter_mut().enumerate() {
            let row = equalities
                .iter()
                .find(|row| row[1 + axis] != 0.0)
                .ok_or_else(|| SynthError::UnderdeterminedCoordinate {
                    label: label.clone(),
                    axis,
                })?;
            *value = -row[0] / row[1 + axis];
        }
        Ok(Self::new(label, AlcoveCoordinate(coordinate), cost, circuit))
    }

    /// Positive canonical coordinate of the interaction.
    pub fn canonical_coordinate(&self) -> CanonicalCoordinate {
        self.coordinate.to_canonical()
    }
}

/// Ready-made fragments enacting `CAN(θ, 0, 0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Embodiment {
    /// A bare `RXX(2θ)`.
    Rxx,
    /// `RZX(2θ)` with its Z operand conjugated by Hadamards.
    Rzx,
    /// `RZZ(2θ)` conjugated by Hadamards on both wires.
    Rzz,
}

impl Embodiment {
    /// The fragment enacting an XX interaction of canonical `strength`.
    pub fn circuit(self, strength: f64) -> SynthResult<Circuit> {
        let (q0, q1) = (QubitId(0), QubitId(1));
        let theta = 2.0 * strength;
        let mut circuit = Circuit::with_size("xx_embodiment", 2);
        match self {
            Embodiment::Rxx => {
                circuit.rxx(theta, q0, q1)?;
            }
            Embodiment::Rzx => {
                circuit.h(q0)?.rzx(theta, q0, q1)?.h(q0)?;
            }
            Embodiment::Rzz => {
                circuit
                    .h(q0)?
                    .h(q1)?
                    .rzz(theta, q0, q1)?
                    .h(q0)?
                    .h(q1)?;
            }
        }
        Ok(circuit)
    }
}

/// Native interactions indexed by label.
#[derive(Debug, Clone, Default)]
pub struct NativeCatalog {
    entries: FxHashMap<String, CatalogEntry>,
}

#[derive(Debug, Clone)]
struct CatalogEntry {
    interaction: NativeInteraction,
    strength: f64,
}

impl NativeCatalog {
    /// Index `interactions`, rejecting any that is not of XX type.
    ///
    /// An entry is of XX type when its second and third canonical components
    /// are below `xx_tolerance` in magnitude. A later entry replaces an
    /// earlier one with the same label.
    pub fn new(
        interactions: impl IntoIterator<Item = NativeInteraction>,
        xx_tolerance: f64,
    ) -> SynthResult<Self> {
        let mut entries = FxHashMap::default();
        for interaction in interactions {
            let canonical = interaction.canonical_coordinate();
            if canonical[1].abs() >= xx_tolerance || canonical[2].abs() >= xx_tolerance {
                return Err(SynthError::NotXxInteraction {
                    label: interaction.label,
                    coordinate: canonical,
                });
            }
            if interaction.circuit.num_qubits() != 2 {
                return Err(IrError::WidthMismatch {
                    expected: 2,
                    got: interaction.circuit.num_qubits(),
                }
                .into());
            }
            debug!(label = %interaction.label, strength = canonical[0], "registered native interaction");
            entries.insert(
                interaction.label.clone(),
                CatalogEntry {
                    interaction,
                    strength: canonical[0],
                },
            );
        }
        Ok(Self { entries })
    }

    /// Look up an interaction by label.
    pub fn get(&self, label: &str) -> SynthResult<&NativeInteraction> {
        self.entry(label).map(|e| &e.interaction)
    }

    /// Canonical strength `a` of the interaction `CAN(a, 0, 0)` named `label`.
    pub fn strength(&self, label: &str) -> SynthResult<f64> {
        self.entry(label).map(|e| e.strength)
    }

    fn entry(&self, label: &str) -> SynthResult<&CatalogEntry> {
        self.entries
            .get(label)
            .ok_or_else(|| SynthError::UnknownInteraction(label.to_string()))
    }

    /// Number of interactions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the interactions in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &NativeInteraction> {
        self.entries.values().map(|e| &e.interaction)
    }
}
