use smallvec::SmallVec;
use tracing::{debug, trace};

use super::{macros::impl_common_graph_ops, *};

/// A single entry of an adjacency chain: the arc `owner -> target` and its payload
#[derive(Debug, Clone, PartialEq)]
pub struct ArcRecord<W, I = ()> {
    /// Head of the arc
    pub target: Node,
    /// Payload of the arc
    pub data: ArcData<W, I>,
}

/// Chains are short for the sparse graphs this storage is meant for.
/// Records are kept oldest first; all accessors walk them in reverse.
type Chain<W, I> = SmallVec<[ArcRecord<W, I>; 4]>;

/// A graph stored as one chain of arc records per vertex.
///
/// Every vertex owns the records of its out-arcs (directed) or of all incident edges
/// (undirected, chain length equals the degree). Neighbors are reported newest arc first.
/// Re-adding an existing arc overwrites its payload in place; there are no parallel arcs.
///
/// ```
/// use arcgraphs::prelude::*;
///
/// let graph = ListGraph::<&str>::from_arcs(
///     GraphKind::DirectedUnweighted,
///     ["a", "b", "c"],
///     [("a", "b"), ("a", "c")],
/// ).unwrap();
///
/// // newest arc first
/// assert_eq!(graph.neighbors_of(0).collect::<Vec<_>>(), vec![2, 1]);
/// ```
#[derive(Clone, Debug)]
pub struct ListGraph<L, W = i64, I = ()> {
    labels: Vec<L>,
    chains: Vec<Chain<W, I>>,
    kind: GraphKind,
    num_arcs: NumArcs,
}

impl_common_graph_ops!(ListGraph => chains);

impl<L, W, I> ListGraph<L, W, I> {
    /// Returns the arc records of `u`, newest first
    /// ** Panics if `u >= n` **
    pub fn records_of(&self, u: Node) -> impl Iterator<Item = &ArcRecord<W, I>> + '_ {
        self.chains[u as usize].iter().rev()
    }

    fn position_in_chain(&self, u: Node, v: Node) -> Option<usize> {
        self.chains[u as usize]
            .iter()
            .rposition(|r| r.target == v)
    }

    /// Removes `u -> v` and returns *true* if it existed
    fn unlink(&mut self, u: Node, v: Node) -> bool {
        match self.position_in_chain(u, v) {
            Some(pos) => {
                self.chains[u as usize].remove(pos);
                true
            }
            None => false,
        }
    }

    /// Sets `u -> v`, overwriting an existing record. Returns *true* if it existed.
    fn link(&mut self, u: Node, v: Node, data: ArcData<W, I>) -> bool {
        match self.position_in_chain(u, v) {
            Some(pos) => {
                self.chains[u as usize][pos].data = data;
                true
            }
            None => {
                self.chains[u as usize].push(ArcRecord { target: v, data });
                false
            }
        }
    }
}

impl<L, W, I> AdjacencyList for ListGraph<L, W, I> {
    // slot `k` is the `k`-th newest record, i.e. chain index `len - 1 - k`
    fn cursor_from(&self, u: Node, slot: usize) -> Option<NeighborCursor> {
        let chain = &self.chains[u as usize];
        let pos = chain.len().checked_sub(slot + 1)?;
        Some(NeighborCursor::new(chain[pos].target, slot))
    }

    fn next_neighbor(&self, u: Node, after: Node) -> Option<Node> {
        let pos = self.position_in_chain(u, after)?;
        pos.checked_sub(1)
            .map(|prev| self.chains[u as usize][prev].target)
    }

    fn neighbors_of(&self, u: Node) -> impl Iterator<Item = Node> + '_ {
        self.records_of(u).map(|r| r.target)
    }

    fn degree_of(&self, u: Node) -> NumNodes {
        self.chains[u as usize].len() as NumNodes
    }
}

impl<L, W: Weight, I> WeightedAdjacency for ListGraph<L, W, I> {
    type Weight = W;
    type Info = I;

    fn arc(&self, u: Node, v: Node) -> Option<&ArcData<W, I>> {
        self.records_of(u)
            .find(|r| r.target == v)
            .map(|r| &r.data)
    }

    fn weighted_neighbors_of(&self, u: Node) -> impl Iterator<Item = (Node, W)> + '_ {
        self.records_of(u).map(|r| (r.target, r.data.weight))
    }

    fn arcs(&self) -> impl Iterator<Item = (Edge, &ArcData<W, I>)> + '_ {
        self.vertices()
            .flat_map(move |u| self.records_of(u).map(move |r| (Edge(u, r.target), &r.data)))
    }
}

impl<L: PartialEq + Clone + Debug, W, I> GraphVertexEditing for ListGraph<L, W, I> {
    fn add_vertex(&mut self, label: L) -> error::Result<Node> {
        if self.locate(&label).is_some() {
            return Err(GraphError::duplicate_vertex(&label));
        }

        let u = self.number_of_nodes();
        self.chains.push(SmallVec::new());
        self.labels.push(label);

        debug!(vertex = ?self.labels[u as usize], node = u, "added vertex to list graph");
        Ok(u)
    }

    fn delete_vertex(&mut self, label: &L) -> bool {
        let Some(u) = self.locate(label) else {
            return false;
        };
        let ui = u as usize;

        let removed = if self.kind.is_undirected() {
            self.chains[ui].len()
        } else {
            let in_arcs = self
                .chains
                .iter()
                .enumerate()
                .filter(|&(w, _)| w != ui)
                .map(|(_, chain)| chain.iter().filter(|r| r.target == u).count())
                .sum::<usize>();
            self.chains[ui].len() + in_arcs
        };
        self.num_arcs -= removed as NumArcs;

        for chain in &mut self.chains {
            chain.retain(|r| r.target != u);
        }

        let last = self.number_of_nodes() - 1;
        self.chains.swap_remove(ui);
        self.labels.swap_remove(ui);

        if u != last {
            for record in self.chains.iter_mut().flatten() {
                if record.target == last {
                    record.target = u;
                }
            }
        }

        debug!(vertex = ?label, node = u, removed_arcs = removed, "deleted vertex from list graph");
        true
    }
}

impl<L: PartialEq + Clone + Debug, W: Weight, I: Clone> GraphArcEditing for ListGraph<L, W, I> {
    fn add_arc_with(
        &mut self,
        from: &L,
        to: &L,
        weight: Option<W>,
        info: Option<I>,
    ) -> error::Result<bool> {
        let (u, v, weight) = resolve_arc_endpoints(&*self, from, to, weight)?;

        let data = ArcData { weight, info };
        if self.kind.is_undirected() && u != v {
            self.link(v, u, data.clone());
        }
        let existed = self.link(u, v, data);

        if !existed {
            self.num_arcs += 1;
        }

        trace!(from = ?from, to = ?to, ?weight, existed, "linked arc in list graph");
        Ok(existed)
    }

    fn delete_arc(&mut self, from: &L, to: &L) -> error::Result<bool> {
        let u = self.try_locate(from)?;
        let v = self.try_locate(to)?;

        let existed = self.unlink(u, v);
        if self.kind.is_undirected() && u != v {
            self.unlink(v, u);
        }

        if existed {
            self.num_arcs -= 1;
        }

        trace!(from = ?from, to = ?to, existed, "unlinked arc in list graph");
        Ok(existed)
    }
}

crate::testing::test_graph_ops!(
    test_list_graph,
    ListGraph,
    (GraphVertexEditing, GraphArcEditing, AdjacencyList)
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chains_are_newest_first() {
        let mut graph = ListGraph::<u32>::from_arcs(
            GraphKind::DirectedUnweighted,
            0..4,
            [(0, 1), (0, 2), (0, 3)],
        )
        .unwrap();

        assert_eq!(graph.neighbors_of(0).collect::<Vec<_>>(), vec![3, 2, 1]);
        assert_eq!(graph.first_neighbor(0), Some(3));
        assert_eq!(graph.next_neighbor(0, 3), Some(2));
        assert_eq!(graph.next_neighbor(0, 1), None);

        // overwriting keeps the position in the chain
        assert!(graph.add_arc(&0, &2).unwrap());
        assert_eq!(graph.neighbors_of(0).collect::<Vec<_>>(), vec![3, 2, 1]);
        assert_eq!(graph.number_of_arcs(), 3);

        assert!(graph.delete_arc(&0, &2).unwrap());
        assert!(!graph.delete_arc(&0, &2).unwrap());
        assert_eq!(graph.neighbors_of(0).collect::<Vec<_>>(), vec![3, 1]);
    }

    #[test]
    fn cursors_step_through_chain() {
        let mut graph = ListGraph::<u32>::from_arcs(
            GraphKind::DirectedUnweighted,
            0..5,
            [(0, 1), (0, 2), (0, 3), (0, 4)],
        )
        .unwrap();

        let mut slots = Vec::new();
        let mut next = graph.first_cursor(0);
        while let Some(cursor) = next {
            slots.push((cursor.node, cursor.slot()));
            next = graph.next_cursor(0, cursor);
        }
        assert_eq!(slots, vec![(4, 0), (3, 1), (2, 2), (1, 3)]);
        assert_eq!(graph.cursor_from(0, 4), None);
        assert_eq!(graph.first_cursor(1), None);

        // removing an arc shifts the slots of older records
        graph.delete_arc(&0, &3).unwrap();
        assert_eq!(graph.cursor_from(0, 1).map(|c| c.node), Some(2));
    }

    #[test]
    fn overwrite_updates_both_directions() {
        let mut graph: ListGraph<&str, i64, &str> = ListGraph::new(GraphKind::UndirectedWeighted);
        graph.add_vertices(["x", "y"]).unwrap();

        assert!(!graph.add_arc_with(&"x", &"y", Some(3), Some("first")).unwrap());
        assert!(graph.add_arc_with(&"y", &"x", Some(8), Some("second")).unwrap());

        assert_eq!(graph.number_of_arcs(), 1);
        assert_eq!(graph.degree_of(0), 1);
        assert_eq!(graph.weight_of(0, 1), Some(8));
        assert_eq!(graph.info_of(0, 1), Some(&"second"));
        assert_eq!(graph.info_of(1, 0), Some(&"second"));
    }

    #[test]
    fn delete_vertex_relabels_last() {
        let mut graph = ListGraph::<&str>::from_arcs(
            GraphKind::UndirectedUnweighted,
            ["a", "b", "c", "d"],
            [("a", "b"), ("b", "c"), ("c", "d"), ("d", "a"), ("d", "d")],
        )
        .unwrap();
        assert_eq!(graph.number_of_arcs(), 5);

        assert!(graph.delete_vertex(&"a"));
        assert_eq!(graph.labels().copied().collect::<Vec<_>>(), vec!["d", "b", "c"]);
        assert_eq!(graph.number_of_arcs(), 3);

        // d now lives at 0: edges d-c, d-d, b-c remain
        assert!(graph.has_arc(0, 2) && graph.has_arc(2, 0));
        assert!(graph.has_arc(0, 0));
        assert!(graph.has_arc(1, 2));
        assert!(!graph.has_arc(0, 1));
    }
}
