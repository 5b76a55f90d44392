/*!
# Graph Representations

Two interchangeable storages:

- [`MatrixGraph`] keeps an `n x n` table of optional arc payloads. Arc lookups are `O(1)`,
  neighbors are reported in ascending index order.
- [`ListGraph`] keeps one chain of arc records per vertex. Neighbors are reported newest arc
  first, arc lookups are linear in the degree.

Both keep their vertices in a dense list: deleting a vertex moves the last one into the freed
slot, so [`Node`] positions are only valid until the next vertex deletion.
*/

use std::fmt::Debug;

use crate::{ops::*, *};

mod list;
mod matrix;

pub use list::*;
pub use matrix::*;

pub(crate) mod macros {
    /// Implements the traits that only depend on the shared fields
    /// `labels: Vec<L>`, `kind: GraphKind` and `num_arcs: NumArcs`
    /// as well as `GraphNew` (with `$adj` as the per-vertex adjacency container).
    macro_rules! impl_common_graph_ops {
        ($struct:ident => $adj:ident) => {
            impl<L, W, I> GraphType for $struct<L, W, I> {
                fn kind(&self) -> GraphKind {
                    self.kind
                }
            }

            impl<L, W, I> GraphNodeOrder for $struct<L, W, I> {
                fn number_of_nodes(&self) -> NumNodes {
                    self.labels.len() as NumNodes
                }
            }

            impl<L, W, I> GraphEdgeOrder for $struct<L, W, I> {
                fn number_of_arcs(&self) -> NumArcs {
                    self.num_arcs
                }
            }

            impl<L: PartialEq + Clone + Debug, W, I> Labelled for $struct<L, W, I> {
                type Label = L;

                fn label_of(&self, u: Node) -> &L {
                    &self.labels[u as usize]
                }
            }

            impl<L, W, I> GraphNew for $struct<L, W, I> {
                fn new(kind: GraphKind) -> Self {
                    Self {
                        labels: Vec::new(),
                        $adj: Vec::new(),
                        kind,
                        num_arcs: 0,
                    }
                }
            }

            impl<L, W, I> Default for $struct<L, W, I> {
                fn default() -> Self {
                    Self::new(GraphKind::default())
                }
            }
        };
    }

    pub(super) use impl_common_graph_ops;
}

/// Resolves both endpoints and the stored weight of an arc about to be inserted
pub(crate) fn resolve_arc_endpoints<G>(
    graph: &G,
    from: &G::Label,
    to: &G::Label,
    weight: Option<G::Weight>,
) -> error::Result<(Node, Node, G::Weight)>
where
    G: Labelled + WeightedAdjacency + GraphType,
{
    let u = graph.try_locate(from)?;
    let v = graph.try_locate(to)?;
    let weight = graph
        .kind()
        .resolve_weight(weight)
        .ok_or_else(|| GraphError::missing_weight(from, to))?;
    Ok((u, v, weight))
}
