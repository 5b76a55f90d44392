/*!
# Graph Kinds

Every storage carries one [`GraphKind`], fixed at construction. The kind decides
- whether an inserted arc `(u, v)` is mirrored by `(v, u)` (undirected kinds),
- which weight an arc receives if none is given (unweighted kinds use the unit weight,
  weighted kinds demand one),
- which classical sentinel a missing arc stands for when printed as a matrix.

Missing arcs themselves are never stored as sentinels; storages use `Option` instead.
*/

use std::fmt::{Debug, Display};

use num::{Bounded, Num};

/// Numeric weights usable on arcs.
///
/// Implemented for every `Copy` numeric type with a total-enough order, e.g. `i64`, `u32`, `f64`.
pub trait Weight: Num + Bounded + Copy + PartialOrd + Debug {}

impl<W> Weight for W where W: Num + Bounded + Copy + PartialOrd + Debug {}

/// Kind of a graph: direction and whether arcs carry meaningful weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GraphKind {
    /// Directed, every arc has unit weight
    #[default]
    DirectedUnweighted,
    /// Directed with explicit arc weights
    DirectedWeighted,
    /// Undirected, every edge has unit weight
    UndirectedUnweighted,
    /// Undirected with explicit edge weights
    UndirectedWeighted,
}

impl GraphKind {
    /// Returns *true* for both directed kinds
    pub const fn is_directed(&self) -> bool {
        matches!(self, Self::DirectedUnweighted | Self::DirectedWeighted)
    }

    /// Returns *true* for both undirected kinds
    pub const fn is_undirected(&self) -> bool {
        !self.is_directed()
    }

    /// Returns *true* for both weighted kinds
    pub const fn is_weighted(&self) -> bool {
        matches!(self, Self::DirectedWeighted | Self::UndirectedWeighted)
    }

    /// Weight assigned to an arc inserted without an explicit weight.
    /// Weighted kinds have no default and return `None`.
    pub fn default_weight<W: Weight>(&self) -> Option<W> {
        (!self.is_weighted()).then(W::one)
    }

    /// Resolves the weight that is actually stored for an arc inserted with `requested`.
    /// Unweighted kinds always store the unit weight.
    pub fn resolve_weight<W: Weight>(&self, requested: Option<W>) -> Option<W> {
        if self.is_weighted() {
            requested
        } else {
            Some(W::one())
        }
    }

    /// Classical matrix value of a missing arc: `0` for unweighted and `W::max_value()`
    /// (standing in for infinity) for weighted kinds.
    pub fn absent_sentinel<W: Weight>(&self) -> W {
        if self.is_weighted() {
            W::max_value()
        } else {
            W::zero()
        }
    }

    /// Short human readable name, used in error messages
    pub const fn name(&self) -> &'static str {
        match self {
            Self::DirectedUnweighted => "directed unweighted",
            Self::DirectedWeighted => "directed weighted",
            Self::UndirectedUnweighted => "undirected unweighted",
            Self::UndirectedWeighted => "undirected weighted",
        }
    }
}

impl Display for GraphKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_per_kind() {
        assert_eq!(GraphKind::DirectedUnweighted.default_weight::<i64>(), Some(1));
        assert_eq!(GraphKind::UndirectedUnweighted.default_weight::<u32>(), Some(1));
        assert_eq!(GraphKind::DirectedWeighted.default_weight::<i64>(), None);
        assert_eq!(GraphKind::UndirectedWeighted.default_weight::<f64>(), None);

        assert_eq!(
            GraphKind::UndirectedUnweighted.resolve_weight::<i64>(Some(7)),
            Some(1)
        );
        assert_eq!(GraphKind::DirectedWeighted.resolve_weight::<i64>(Some(7)), Some(7));
    }

    #[test]
    fn sentinels() {
        assert_eq!(GraphKind::DirectedUnweighted.absent_sentinel::<i64>(), 0);
        assert_eq!(
            GraphKind::UndirectedWeighted.absent_sentinel::<i64>(),
            i64::MAX
        );
    }

    #[test]
    fn direction() {
        assert!(GraphKind::DirectedWeighted.is_directed());
        assert!(GraphKind::UndirectedUnweighted.is_undirected());
        assert!(!GraphKind::UndirectedWeighted.is_directed());
    }
}
