//! Decomposition paths through the alcove.

use num_rational::Ratio;
use serde::{Deserialize, Serialize};

use crate::coordinates::AlcoveCoordinate;
use crate::error::SynthResult;
use crate::native::NativeCatalog;

/// One step of a decomposition: an interaction carrying `source` to `target`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecompositionHop {
    /// Alcove point the hop starts from.
    pub source: AlcoveCoordinate,
    /// Label of the native interaction used.
    pub interaction: String,
    /// Alcove point the hop reaches.
    pub target: AlcoveCoordinate,
}

impl DecompositionHop {
    /// Create a hop.
    pub fn new(
        source: AlcoveCoordinate,
        interaction: impl Into<String>,
        target: AlcoveCoordinate,
    ) -> Self {
        Self {
            source,
            interaction: interaction.into(),
            target,
        }
    }
}

/// An ordered sequence of hops.
///
/// Consecutive hops are expected to chain, the target of one being the
/// source of the next; this is not checked.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecompositionPath {
    hops: Vec<DecompositionHop>,
}

impl DecompositionPath {
    /// Create an empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a hop.
    #[must_use]
    pub fn with_hop(mut self, hop: DecompositionHop) -> Self {
        self.hops.push(hop);
        self
    }

    /// Append a hop in place.
    pub fn push(&mut self, hop: DecompositionHop) {
        self.hops.push(hop);
    }

    /// The hops in order.
    pub fn hops(&self) -> &[DecompositionHop] {
        &self.hops
    }

    /// Number of hops.
    pub fn len(&self) -> usize {
        self.hops.len()
    }

    /// Check whether the path has no hops.
    pub fn is_empty(&self) -> bool {
        self.hops.is_empty()
    }

    /// Total cost of the interactions used along the path.
    pub fn cost(&self, catalog: &NativeCatalog) -> SynthResult<Ratio<u64>> {
        self.hops.iter().try_fold(Ratio::from_integer(0), |total, hop| {
            Ok(total + catalog.get(&hop.interaction)?.cost)
        })
    }
}

impl From<Vec<DecompositionHop>> for DecompositionPath {
    fn from(hops: Vec<DecompositionHop>) -> Self {
        Self { hops }
    }
}

impl FromIterator<DecompositionHop> for DecompositionPath {
    fn from_iter<I: IntoIterator<Item = DecompositionHop>>(iter: I) -> Self {
        Self {
            hops: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a DecompositionPath {
    type Item = &'a DecompositionHop;
    type IntoIter = std::slice::Iter<'a, DecompositionHop>;

    fn into_iter(self) -> Self::IntoIter {
        self.hops.iter()
    }
}
