use tracing::{debug, trace};

use super::{macros::impl_common_graph_ops, *};

/// A graph stored as an `n x n` table of optional arc payloads.
///
/// Cell `(u, v)` holds the payload of arc `u -> v` or `None`. For undirected kinds the table is
/// kept symmetric: both cells of an edge carry identical payloads.
///
/// ```
/// use arcgraphs::prelude::*;
///
/// let mut graph: MatrixGraph<&str> = MatrixGraph::new(GraphKind::DirectedWeighted);
/// graph.add_vertices(["a", "b"]).unwrap();
/// graph.add_weighted_arc(&"a", &"b", 5).unwrap();
///
/// assert_eq!(graph.weight_of(0, 1), Some(5));
/// assert!(!graph.has_arc(1, 0));
/// ```
#[derive(Clone, Debug)]
pub struct MatrixGraph<L, W = i64, I = ()> {
    labels: Vec<L>,
    cells: Vec<Vec<Option<ArcData<W, I>>>>,
    kind: GraphKind,
    num_arcs: NumArcs,
}

impl_common_graph_ops!(MatrixGraph => cells);

impl<L, W: Weight, I> MatrixGraph<L, W, I> {
    /// Returns the classical weight matrix: present arcs carry their weight, absent arcs the
    /// sentinel of the graph kind (`0` if unweighted, `W::max_value()` if weighted).
    pub fn to_weight_matrix(&self) -> Vec<Vec<W>> {
        let absent = self.kind.absent_sentinel::<W>();
        self.cells
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| cell.as_ref().map_or(absent, |a| a.weight))
                    .collect()
            })
            .collect()
    }
}

impl<L, W, I> AdjacencyList for MatrixGraph<L, W, I> {
    // slots are columns
    fn cursor_from(&self, u: Node, slot: usize) -> Option<NeighborCursor> {
        let row = &self.cells[u as usize];
        (slot..row.len())
            .find(|&v| row[v].is_some())
            .map(|v| NeighborCursor::new(v as Node, v))
    }

    fn next_neighbor(&self, u: Node, after: Node) -> Option<Node> {
        self.cursor_from(u, after as usize + 1).map(|c| c.node)
    }

    fn neighbors_of(&self, u: Node) -> impl Iterator<Item = Node> + '_ {
        self.cells[u as usize]
            .iter()
            .enumerate()
            .filter_map(|(v, cell)| cell.as_ref().map(|_| v as Node))
    }

    fn degree_of(&self, u: Node) -> NumNodes {
        self.cells[u as usize]
            .iter()
            .filter(|cell| cell.is_some())
            .count() as NumNodes
    }
}

impl<L, W: Weight, I> WeightedAdjacency for MatrixGraph<L, W, I> {
    type Weight = W;
    type Info = I;

    fn arc(&self, u: Node, v: Node) -> Option<&ArcData<W, I>> {
        self.cells[u as usize][v as usize].as_ref()
    }

    fn weighted_neighbors_of(&self, u: Node) -> impl Iterator<Item = (Node, W)> + '_ {
        self.cells[u as usize]
            .iter()
            .enumerate()
            .filter_map(|(v, cell)| cell.as_ref().map(|a| (v as Node, a.weight)))
    }
}

impl<L: PartialEq + Clone + Debug, W, I> GraphVertexEditing for MatrixGraph<L, W, I> {
    fn add_vertex(&mut self, label: L) -> error::Result<Node> {
        if self.locate(&label).is_some() {
            return Err(GraphError::duplicate_vertex(&label));
        }

        let u = self.number_of_nodes();
        for row in &mut self.cells {
            row.push(None);
        }
        self.cells.push((0..=u).map(|_| None).collect());
        self.labels.push(label);

        debug!(vertex = ?self.labels[u as usize], node = u, "added vertex to matrix graph");
        Ok(u)
    }

    fn delete_vertex(&mut self, label: &L) -> bool {
        let Some(u) = self.locate(label) else {
            return false;
        };
        let ui = u as usize;

        let out_arcs = self.cells[ui].iter().filter(|c| c.is_some()).count();
        let removed = if self.kind.is_undirected() {
            // every edge at u appears exactly once in its row, loops included
            out_arcs
        } else {
            let in_arcs = self.cells.iter().filter(|row| row[ui].is_some()).count();
            let has_loop = self.cells[ui][ui].is_some() as usize;
            out_arcs + in_arcs - has_loop
        };
        self.num_arcs -= removed as NumArcs;

        // moving the last row/column into slot u is exactly what `swap_remove` does
        self.cells.swap_remove(ui);
        for row in &mut self.cells {
            row.swap_remove(ui);
        }
        self.labels.swap_remove(ui);

        debug!(vertex = ?label, node = u, removed_arcs = removed, "deleted vertex from matrix graph");
        true
    }
}

impl<L: PartialEq + Clone + Debug, W: Weight, I: Clone> GraphArcEditing for MatrixGraph<L, W, I> {
    fn add_arc_with(
        &mut self,
        from: &L,
        to: &L,
        weight: Option<W>,
        info: Option<I>,
    ) -> error::Result<bool> {
        let (u, v, weight) = resolve_arc_endpoints(&*self, from, to, weight)?;
        let (ui, vi) = (u as usize, v as usize);

        let data = ArcData { weight, info };
        let existed = self.cells[ui][vi].is_some();

        if self.kind.is_undirected() && u != v {
            self.cells[vi][ui] = Some(data.clone());
        }
        self.cells[ui][vi] = Some(data);

        if !existed {
            self.num_arcs += 1;
        }

        trace!(from = ?from, to = ?to, ?weight, existed, "set arc in matrix graph");
        Ok(existed)
    }

    fn delete_arc(&mut self, from: &L, to: &L) -> error::Result<bool> {
        let u = self.try_locate(from)? as usize;
        let v = self.try_locate(to)? as usize;

        let existed = self.cells[u][v].take().is_some();
        if self.kind.is_undirected() {
            self.cells[v][u] = None;
        }

        if existed {
            self.num_arcs -= 1;
        }

        trace!(from = ?from, to = ?to, existed, "cleared arc in matrix graph");
        Ok(existed)
    }
}

crate::testing::test_graph_ops!(
    test_matrix_graph,
    MatrixGraph,
    (GraphVertexEditing, GraphArcEditing, AdjacencyList)
);
