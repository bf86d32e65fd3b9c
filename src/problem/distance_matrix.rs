use log::{debug, trace};

use crate::error::CompetitionError;
use crate::problem::{Arc, Distance, Vertex, UNREACHABLE};

/// Dense `n x n` table of directed distances, stored row-major.
///
/// The number of vertices is fixed when the matrix is built. Entries start out
/// as the direct arc weights and are tightened in place by
/// [`crate::engine::relax`].
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    n: usize,
    data: Vec<Distance>,
}

impl DistanceMatrix {
    /// Builds the matrix from a list of arcs, rejecting arcs that point outside
    /// of `0..num_nodes` or carry a negative (or NaN) weight.
    pub fn from_arcs<'a>(
        num_nodes: usize,
        arcs: impl IntoIterator<Item = &'a Arc>,
    ) -> Result<Self, CompetitionError> {
        let mut builder = DistanceMatrixBuilder::with_num_nodes(num_nodes)?;
        for arc in arcs {
            if arc.from >= num_nodes || arc.to >= num_nodes {
                return Err(CompetitionError::InvalidEdge {
                    from: arc.from,
                    to: arc.to,
                    num_nodes,
                });
            }
            if arc.distance.is_nan() || arc.distance < 0.0 {
                return Err(CompetitionError::InvalidInput(format!(
                    "arc {} -> {} has weight {}, expected a non-negative number",
                    arc.from, arc.to, arc.distance
                )));
            }
            builder.set_arc(arc);
        }
        Ok(builder.build())
    }

    #[inline(always)]
    pub fn num_nodes(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    #[inline(always)]
    pub fn distance(&self, from: Vertex, to: Vertex) -> Distance {
        self.data[self.idx(from, to)]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Distance]> {
        // chunks(0) panics, an empty matrix simply has no rows
        self.data.chunks(self.n.max(1))
    }

    /// Largest finite entry, `None` if there is none (only for empty matrices,
    /// the diagonal is always finite).
    pub fn max_finite_distance(&self) -> Option<Distance> {
        self.data
            .iter()
            .copied()
            .filter(|it| it.is_finite())
            .fold(None, |acc, it| match acc {
                Some(max) if max >= it => Some(max),
                _ => Some(it),
            })
    }

    /// First ordered pair (in row-major order) without a known path.
    pub fn first_unreachable_pair(&self) -> Option<(Vertex, Vertex)> {
        self.data
            .iter()
            .position(|it| !it.is_finite())
            .map(|idx| (idx / self.n, idx % self.n))
    }

    #[inline(always)]
    pub(crate) fn data_mut(&mut self) -> &mut [Distance] {
        &mut self.data
    }

    #[inline(always)]
    fn idx(&self, from: Vertex, to: Vertex) -> usize {
        debug_assert!(from < self.n);
        debug_assert!(to < self.n);
        from * self.n + to
    }
}

/// Turns a sparse arc list into a [`DistanceMatrix`].
///
/// Every pair starts as [`UNREACHABLE`] except the diagonal, which is 0.
/// Repeated arcs between the same ordered pair overwrite each other, so the
/// arc applied last wins even when an earlier one was shorter.
// TODO: decide whether repeated arcs should keep the minimum weight instead
pub struct DistanceMatrixBuilder {
    n: usize,
    data: Vec<Distance>,
    assigned: Vec<bool>,
}

impl DistanceMatrixBuilder {
    /// Fails with [`CompetitionError::InvalidInput`] when `num_nodes^2` entries
    /// cannot be addressed or allocated.
    pub fn with_num_nodes(num_nodes: usize) -> Result<Self, CompetitionError> {
        let num_arcs = num_nodes.checked_mul(num_nodes).ok_or_else(|| {
            CompetitionError::InvalidInput(format!(
                "{} vertices overflow the matrix size",
                num_nodes
            ))
        })?;
        let mut data = Vec::new();
        let mut assigned = Vec::new();
        data.try_reserve_exact(num_arcs)
            .and_then(|_| assigned.try_reserve_exact(num_arcs))
            .map_err(|e| {
                CompetitionError::InvalidInput(format!(
                    "cannot allocate a matrix for {} vertices: {}",
                    num_nodes, e
                ))
            })?;
        data.resize(num_arcs, UNREACHABLE);
        assigned.resize(num_arcs, false);
        for i in 0..num_nodes {
            data[i * num_nodes + i] = 0.0;
        }
        Ok(Self {
            n: num_nodes,
            data,
            assigned,
        })
    }

    /// Callers guarantee that both endpoints are below `num_nodes`, see
    /// [`DistanceMatrix::from_arcs`] for the checked variant.
    pub fn set_arc(&mut self, arc: &Arc) -> &mut Self {
        if arc.from == arc.to {
            trace!("ignoring self-loop on {} with weight {}", arc.from, arc.distance);
            return self;
        }
        let idx = arc.from * self.n + arc.to;
        if self.assigned[idx] {
            debug!(
                "arc {} -> {} redefined, replacing {} with {}",
                arc.from, arc.to, self.data[idx], arc.distance
            );
        }
        self.assigned[idx] = true;
        self.data[idx] = arc.distance;

        self
    }

    pub fn build(self) -> DistanceMatrix {
        DistanceMatrix {
            n: self.n,
            data: self.data,
        }
    }
}
