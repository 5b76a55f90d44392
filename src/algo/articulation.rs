use super::*;

/// Computes the cut vertices of an undirected graph
pub trait ArticulationPoints: AdjacencyList + GraphType {
    /// Returns all articulation points in ascending order, i.e. all vertices whose removal
    /// increases the number of connected components.
    ///
    /// Fails with [`GraphError::WrongGraphKind`] on directed graphs.
    ///
    /// # Examples
    /// ```
    /// use arcgraphs::{prelude::*, algo::*};
    ///
    /// // 0 - 1 - 2
    /// let g = ListGraph::<u32>::from_arcs(GraphKind::UndirectedUnweighted, 0..3, [(0, 1), (1, 2)]).unwrap();
    /// assert_eq!(g.articulation_points().unwrap(), vec![1]);
    /// ```
    fn articulation_points(&self) -> Result<Vec<Node>>;
}

impl<G> ArticulationPoints for G
where
    G: AdjacencyList + GraphType,
{
    fn articulation_points(&self) -> Result<Vec<Node>> {
        GraphError::expect_undirected(self.kind())?;
        Ok(ArticulationSearch::new(self).compute())
    }
}

/// Low-link depth-first search; one tree per connected component
struct ArticulationSearch<'a, G> {
    graph: &'a G,
    visited: NodeBitSet,
    nodes_info: Vec<NodeInfo>,
    time: Node,
    cut_vertices: NodeBitSet,
}

impl<'a, G> ArticulationSearch<'a, G>
where
    G: AdjacencyList,
{
    fn new(graph: &'a G) -> Self {
        let n = graph.number_of_nodes();
        Self {
            graph,
            visited: NodeBitSet::new(n),
            nodes_info: vec![NodeInfo::default(); n as usize],
            time: 0,
            cut_vertices: NodeBitSet::new(n),
        }
    }

    fn compute(mut self) -> Vec<Node> {
        for u in self.graph.vertices() {
            if self.visited.set_bit(u) {
                continue;
            }

            self.compute_node(None, u);
        }

        self.cut_vertices.iter_set_bits().collect()
    }

    fn compute_node(&mut self, parent: Option<Node>, u: Node) -> NodeInfo {
        self.time += 1;

        self.nodes_info[u as usize] = NodeInfo {
            parent: parent.unwrap_or(u),
            discovery: self.time,
            low: self.time,
        };

        let mut tree_children = 0;
        let mut next = self.graph.first_cursor(u);
        while let Some(cursor) = next {
            let v = cursor.node;
            if !self.visited.set_bit(v) {
                tree_children += 1;
                let info_v = self.compute_node(Some(u), v);

                self.nodes_info[u as usize].update_low(info_v.low);

                // the subtree of v cannot bypass u
                if parent.is_some() && info_v.low >= self.nodes_info[u as usize].discovery {
                    self.cut_vertices.set_bit(u);
                }
            } else if v != self.nodes_info[u as usize].parent {
                let v_disc = self.nodes_info[v as usize].discovery;
                self.nodes_info[u as usize].update_low(v_disc);
            }

            next = self.graph.next_cursor(u, cursor);
        }

        // every further tree child of a root starts a subtree unreachable from the first one
        if parent.is_none() && tree_children > 1 {
            self.cut_vertices.set_bit(u);
        }

        self.nodes_info[u as usize]
    }
}

#[derive(Clone, Copy, Default)]
struct NodeInfo {
    low: Node,
    discovery: Node,
    parent: Node,
}

impl NodeInfo {
    fn update_low(&mut self, value: Node) {
        self.low = self.low.min(value);
    }
}
