/*!
# Graph Operations

Traits shared by all storages. Algorithms in [`crate::algo`] are written against these
traits only and therefore run unchanged on [`MatrixGraph`](crate::repr::MatrixGraph) and
[`ListGraph`](crate::repr::ListGraph).

The adjacency primitive is [`AdjacencyList::cursor_from`]: a [`NeighborCursor`] remembers the
slot of a neighbor in storage order, so stepping to the next neighbor never searches for the
previous one. Everything else (first/next neighbor, neighbor iterators, degrees, edge
iterators) can be derived from it.
*/

use std::{fmt::Debug, ops::Range};

use itertools::Itertools;

use crate::{
    error::{GraphError, Result},
    *,
};

/// Provides the kind of a graph
pub trait GraphType {
    /// Returns the kind the graph was created with
    fn kind(&self) -> GraphKind;

    /// Returns *true* if arcs are directed
    fn is_directed(&self) -> bool {
        self.kind().is_directed()
    }

    /// Returns *true* if every arc is mirrored
    fn is_undirected(&self) -> bool {
        self.kind().is_undirected()
    }
}

/// Provides getters pertaining to the node-size of a graph
pub trait GraphNodeOrder {
    /// Returns the number of nodes of the graph
    fn number_of_nodes(&self) -> NumNodes;

    /// Return the number of nodes as usize
    fn len(&self) -> usize {
        self.number_of_nodes() as usize
    }

    /// Returns an iterator over V.
    /// The range does not borrow `self` and may be used while the graph is mutated.
    fn vertices(&self) -> Range<Node> {
        0..self.number_of_nodes()
    }

    /// Returns empty bitset with one entry per node
    fn vertex_bitset_unset(&self) -> NodeBitSet {
        NodeBitSet::new(self.number_of_nodes())
    }

    /// Returns *true* if the graph has no nodes (and thus no arcs)
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Provides getters pertaining to the arc-size of a graph
pub trait GraphEdgeOrder {
    /// Returns the number of arcs of the graph. An undirected edge is counted once.
    fn number_of_arcs(&self) -> NumArcs;

    /// Returns *true* if the graph has no arcs
    fn has_no_arcs(&self) -> bool {
        self.number_of_arcs() == 0
    }
}

/// Access to the labels identifying the vertices
pub trait Labelled: GraphNodeOrder {
    /// Opaque vertex identifier
    type Label: PartialEq + Clone + Debug;

    /// Returns the label of vertex `u`.
    /// ** Panics if `u >= n` **
    fn label_of(&self, u: Node) -> &Self::Label;

    /// Returns the labels of all vertices in index order
    fn labels(&self) -> impl Iterator<Item = &Self::Label> + '_ {
        self.vertices().map(|u| self.label_of(u))
    }

    /// Returns the labels of the given vertices, e.g. to print a path
    fn labels_of(&self, nodes: &[Node]) -> Vec<Self::Label> {
        nodes.iter().map(|&u| self.label_of(u).clone()).collect_vec()
    }

    /// Linear scan for the vertex carrying `label`. If labels are duplicated, the first match wins.
    fn locate(&self, label: &Self::Label) -> Option<Node> {
        self.vertices().find(|&u| self.label_of(u) == label)
    }

    /// Same as [`Labelled::locate`] but fails with [`GraphError::UnknownVertex`]
    fn try_locate(&self, label: &Self::Label) -> Result<Node> {
        self.locate(label)
            .ok_or_else(|| GraphError::unknown_vertex(label))
    }
}

/// Position of a neighbor inside the neighborhood of a vertex.
///
/// Slots enumerate a neighborhood in storage order. They are only meaningful for the vertex
/// they were obtained for and only as long as the graph is not modified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NeighborCursor {
    /// Neighbor at this position
    pub node: Node,
    slot: usize,
}

impl NeighborCursor {
    pub(crate) fn new(node: Node, slot: usize) -> Self {
        Self { node, slot }
    }

    /// Returns the slot of the neighbor in storage order
    pub fn slot(&self) -> usize {
        self.slot
    }
}

/// Traits pertaining getters for neighborhoods & arcs
pub trait AdjacencyList: GraphNodeOrder + Sized {
    /// Returns the first neighbor of `u` stored at `slot` or later, or `None` if there is none.
    /// ** Panics if `u >= n` **
    fn cursor_from(&self, u: Node, slot: usize) -> Option<NeighborCursor>;

    /// Returns a cursor at the first neighbor of `u` in storage order
    /// ** Panics if `u >= n` **
    fn first_cursor(&self, u: Node) -> Option<NeighborCursor> {
        self.cursor_from(u, 0)
    }

    /// Advances `cursor` (obtained for `u`) to the next neighbor of `u` in storage order
    /// ** Panics if `u >= n` **
    fn next_cursor(&self, u: Node, cursor: NeighborCursor) -> Option<NeighborCursor> {
        self.cursor_from(u, cursor.slot + 1)
    }

    /// Returns the first neighbor of `u` in storage order, or `None` if `u` has no out-arcs.
    /// ** Panics if `u >= n` **
    fn first_neighbor(&self, u: Node) -> Option<Node> {
        self.first_cursor(u).map(|c| c.node)
    }

    /// Returns the neighbor of `u` following `after` in storage order, or `None` if exhausted.
    /// `after` has to be a neighbor of `u`. Prefer [`AdjacencyList::next_cursor`] when
    /// walking a whole neighborhood: this has to locate `after` first.
    /// ** Panics if `u >= n` **
    fn next_neighbor(&self, u: Node, after: Node) -> Option<Node>;

    /// Returns an iterator over the (out-)neighbors of a given vertex in storage order,
    /// i.e. the same order produced by stepping a [`NeighborCursor`].
    /// ** Panics if `u >= n` **
    fn neighbors_of(&self, u: Node) -> impl Iterator<Item = Node> + '_ {
        NeighborWalk::new(self, u)
    }

    /// Returns the number of (outgoing) neighbors of `u`
    /// ** Panics if `u >= n` **
    fn degree_of(&self, u: Node) -> NumNodes {
        self.neighbors_of(u).count() as NumNodes
    }

    /// Returns *true* if `u` has no outgoing arcs
    /// ** Panics if `u >= n` **
    fn is_sink(&self, u: Node) -> bool {
        self.first_neighbor(u).is_none()
    }

    /// Computes the in-degree of every vertex from scratch.
    ///
    /// Nothing is cached: call this again after any mutation of the graph.
    fn in_degrees(&self) -> Vec<NumNodes> {
        let mut in_degs: Vec<NumNodes> = vec![0; self.len()];
        for u in self.vertices() {
            for v in self.neighbors_of(u) {
                // u -> v
                in_degs[v as usize] += 1;
            }
        }
        in_degs
    }

    /// Returns all vertices without incoming arcs
    fn sources(&self) -> Vec<Node> {
        self.in_degrees()
            .into_iter()
            .positions(|d| d == 0)
            .map(|u| u as Node)
            .collect_vec()
    }

    /// Returns an iterator over outgoing arcs of a given vertex.
    /// If `only_normalized`, then only arcs `(u, v)` with `u <= v` are considered.
    /// ** Panics if `u >= n` **
    fn edges_of(&self, u: Node, only_normalized: bool) -> impl Iterator<Item = Edge> + '_ {
        self.neighbors_of(u)
            .map(move |v| Edge(u, v))
            .filter(move |e| !only_normalized || e.is_normalized())
    }

    /// Returns an iterator over all arcs in the graph.
    /// If `only_normalized`, then only arcs `(u, v)` with `u <= v` are considered.
    fn edges(&self, only_normalized: bool) -> impl Iterator<Item = Edge> + '_ {
        self.vertices()
            .flat_map(move |u| self.edges_of(u, only_normalized))
    }

    /// Returns all arcs in the graph in sorted order.
    /// If `only_normalized`, then only arcs `(u, v)` with `u <= v` are considered.
    fn ordered_edges(&self, only_normalized: bool) -> Vec<Edge> {
        let mut edges = self.edges(only_normalized).collect_vec();
        edges.sort_unstable();
        edges
    }
}

/// Iterator over the neighbors of a vertex built purely on [`NeighborCursor`]s
pub struct NeighborWalk<'a, G> {
    graph: &'a G,
    node: Node,
    cursor: Option<NeighborCursor>,
}

impl<'a, G: AdjacencyList> NeighborWalk<'a, G> {
    /// Starts a walk over the neighbors of `node`
    pub fn new(graph: &'a G, node: Node) -> Self {
        Self {
            graph,
            node,
            cursor: graph.first_cursor(node),
        }
    }
}

impl<G: AdjacencyList> Iterator for NeighborWalk<'_, G> {
    type Item = Node;

    fn next(&mut self) -> Option<Self::Item> {
        let cursor = self.cursor?;
        self.cursor = self.graph.next_cursor(self.node, cursor);
        Some(cursor.node)
    }
}

/// Access to the payload of arcs
pub trait WeightedAdjacency: AdjacencyList {
    /// Numeric weight type
    type Weight: Weight;

    /// Opaque per-arc info type
    type Info;

    /// Returns the payload of arc `(u, v)` if present.
    /// ** Panics if `u >= n || v >= n` **
    fn arc(&self, u: Node, v: Node) -> Option<&ArcData<Self::Weight, Self::Info>>;

    /// Returns an iterator over `(neighbor, weight)` pairs of the out-arcs of `u` in storage order.
    /// ** Panics if `u >= n` **
    fn weighted_neighbors_of(&self, u: Node) -> impl Iterator<Item = (Node, Self::Weight)> + '_;

    /// Returns *true* if the arc `(u, v)` exists in the graph.
    /// ** Panics if `u >= n || v >= n` **
    fn has_arc(&self, u: Node, v: Node) -> bool {
        self.arc(u, v).is_some()
    }

    /// Returns the weight of `(u, v)` if the arc exists.
    /// ** Panics if `u >= n || v >= n` **
    fn weight_of(&self, u: Node, v: Node) -> Option<Self::Weight> {
        self.arc(u, v).map(|a| a.weight)
    }

    /// Returns the info payload of `(u, v)` if the arc exists and carries one.
    /// ** Panics if `u >= n || v >= n` **
    fn info_of(&self, u: Node, v: Node) -> Option<&Self::Info> {
        self.arc(u, v).and_then(|a| a.info.as_ref())
    }

    /// Returns all stored arcs with their payload in storage order.
    /// Undirected graphs report both directions of every edge.
    fn arcs(&self) -> impl Iterator<Item = (Edge, &ArcData<Self::Weight, Self::Info>)> + '_ {
        self.edges(false)
            .filter_map(move |e| self.arc(e.0, e.1).map(|data| (e, data)))
    }

    /// Returns all arcs together with their weights in storage order
    fn weighted_edges(&self) -> impl Iterator<Item = (Edge, Self::Weight)> + '_ {
        self.vertices().flat_map(move |u| {
            self.weighted_neighbors_of(u)
                .map(move |(v, w)| (Edge(u, v), w))
        })
    }
}

/// Trait for creating a new empty graph
pub trait GraphNew {
    /// Creates an empty graph of the given kind
    fn new(kind: GraphKind) -> Self;
}

/// Provides functions to insert/delete vertices
pub trait GraphVertexEditing: Labelled {
    /// Appends a new vertex and returns its index.
    /// Fails with [`GraphError::DuplicateVertex`] if the label is already present.
    fn add_vertex(&mut self, label: Self::Label) -> Result<Node>;

    /// Adds all vertices in the collection, stopping at the first duplicate
    fn add_vertices(&mut self, labels: impl IntoIterator<Item = Self::Label>) -> Result<()> {
        for label in labels {
            self.add_vertex(label)?;
        }
        Ok(())
    }

    /// Deletes the vertex carrying `label` together with all incident arcs.
    /// The last vertex takes over the index of the deleted one.
    /// Returns *false* if no such vertex exists.
    fn delete_vertex(&mut self, label: &Self::Label) -> bool;
}

/// Provides functions to insert/delete arcs
pub trait GraphArcEditing: GraphVertexEditing + WeightedAdjacency + GraphType {
    /// Sets the arc `(from, to)`; undirected graphs also set `(to, from)` with identical payload.
    /// Returns *true* if the arc was present before (its payload is overwritten).
    ///
    /// # Errors
    /// - [`GraphError::UnknownVertex`] if an endpoint does not exist
    /// - [`GraphError::MissingWeight`] if the graph is weighted and `weight` is `None`
    fn add_arc_with(
        &mut self,
        from: &Self::Label,
        to: &Self::Label,
        weight: Option<Self::Weight>,
        info: Option<Self::Info>,
    ) -> Result<bool>;

    /// Adds the arc `(from, to)` with the default weight of the graph kind
    fn add_arc(&mut self, from: &Self::Label, to: &Self::Label) -> Result<bool> {
        self.add_arc_with(from, to, None, None)
    }

    /// Adds the arc `(from, to)` with the given weight
    fn add_weighted_arc(
        &mut self,
        from: &Self::Label,
        to: &Self::Label,
        weight: Self::Weight,
    ) -> Result<bool> {
        self.add_arc_with(from, to, Some(weight), None)
    }

    /// Removes the arc `(from, to)`; undirected graphs also remove `(to, from)`.
    /// Returns *true* if an arc was removed.
    ///
    /// # Errors
    /// [`GraphError::UnknownVertex`] if an endpoint does not exist
    fn delete_arc(&mut self, from: &Self::Label, to: &Self::Label) -> Result<bool>;
}

/// A super trait for creating a graph from scratch from a list of vertices and arcs
pub trait GraphFromScratch: GraphArcEditing + Sized {
    /// Creates a graph of the given kind from labelled, unweighted arcs
    /// (every arc receives the kind's default weight).
    fn from_arcs(
        kind: GraphKind,
        vertices: impl IntoIterator<Item = Self::Label>,
        arcs: impl IntoIterator<Item = (Self::Label, Self::Label)>,
    ) -> Result<Self>;

    /// Creates a graph of the given kind from labelled, weighted arcs
    fn from_weighted_arcs(
        kind: GraphKind,
        vertices: impl IntoIterator<Item = Self::Label>,
        arcs: impl IntoIterator<Item = (Self::Label, Self::Label, Self::Weight)>,
    ) -> Result<Self>;
}

impl<G> GraphFromScratch for G
where
    G: GraphNew + GraphArcEditing,
{
    fn from_arcs(
        kind: GraphKind,
        vertices: impl IntoIterator<Item = Self::Label>,
        arcs: impl IntoIterator<Item = (Self::Label, Self::Label)>,
    ) -> Result<Self> {
        let mut graph = Self::new(kind);
        graph.add_vertices(vertices)?;
        for (u, v) in arcs {
            graph.add_arc(&u, &v)?;
        }
        Ok(graph)
    }

    fn from_weighted_arcs(
        kind: GraphKind,
        vertices: impl IntoIterator<Item = Self::Label>,
        arcs: impl IntoIterator<Item = (Self::Label, Self::Label, Self::Weight)>,
    ) -> Result<Self> {
        let mut graph = Self::new(kind);
        graph.add_vertices(vertices)?;
        for (u, v, w) in arcs {
            graph.add_weighted_arc(&u, &v, w)?;
        }
        Ok(graph)
    }
}
