use std::fmt::{Debug, Display};

use crate::Node;

/// An edge (arc) is defined by its two endpoints; it points FROM `self.0` TO `self.1`.
/// In undirected graphs, `Edge(u, v)` and `Edge(v, u)` denote the same edge.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge(pub Node, pub Node);

/// We limit the number of arcs to `2^32 - 1`.
pub type NumArcs = u32;

impl Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.0, self.1)
    }
}

impl Debug for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as Display>::fmt(self, f)
    }
}

impl Edge {
    /// Returns true if the endpoint with smaller index comes first, i.e. if this is the
    /// representative of an undirected edge
    pub fn is_normalized(&self) -> bool {
        self.0 <= self.1
    }
}

/// Payload stored for every arc: its weight and an optional opaque info value
/// (e.g. an activity description in an activity-on-edge network).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArcData<W, I = ()> {
    /// Weight of the arc; the unit weight in unweighted graphs
    pub weight: W,
    /// Additional information attached to the arc
    pub info: Option<I>,
}

/// An arc together with its weight, as emitted by spanning tree algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TreeArc<W> {
    /// Endpoint already contained in the tree when the arc was chosen
    pub from: Node,
    /// Endpoint that joined the tree through this arc
    pub to: Node,
    /// Weight of the arc
    pub weight: W,
}

impl<W> TreeArc<W> {
    /// Returns the endpoints as plain [`Edge`]
    pub fn edge(&self) -> Edge {
        Edge(self.from, self.to)
    }
}
