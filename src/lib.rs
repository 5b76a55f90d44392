/*!
`arcgraphs` is a small graph data structure & algorithms library for **labelled** graphs whose
arcs may carry a numeric **weight** and an optional opaque **info** value.

# Representation

Vertices are identified by a caller-chosen label and addressed internally by their position
`0..n`, represented as `u32` ([`Node`](crate::node::Node)). Positions are dense: deleting a vertex
moves the last vertex into the freed slot, so positions of other vertices may change.
Labels are translated into positions via [`Labelled::locate`](crate::ops::Labelled::locate).

Every graph has one of four [`GraphKind`](crate::kind::GraphKind)s, fixed at construction:
directed or undirected, weighted or unweighted.
In an undirected graph every inserted arc `(u, v)` is mirrored by `(v, u)` with identical payload.
Unweighted graphs store the unit weight on every arc.

### Available Representations

- [`MatrixGraph`](crate::repr::MatrixGraph) stores an `n x n` matrix of optional arc payloads
- [`ListGraph`](crate::repr::ListGraph) stores one chain of arc records per vertex, newest arc first

Both expose the same adjacency primitive ([`cursor_from`](crate::ops::AdjacencyList::cursor_from),
stepped with [`next_cursor`](crate::ops::AdjacencyList::next_cursor)), so every algorithm runs on
either storage.

# Usage

There are *2* core submodules you probably want to interact with:
- [`prelude`] includes definitions for nodes, arcs, graph kinds, errors, basic graph operations,
  and both representations,
- [`algo`] includes algorithm traits that are implemented on graphs itself such as
  DFS/BFS traversal (`graph.dfs(start_node)`), spanning forests, articulation points,
  shortest paths (Dijkstra, Floyd-Warshall), minimum spanning trees (Prim), path queries,
  topological sorting, critical path analysis and transitivity checks.

In most use-cases, `use arcgraphs::{prelude::*, algo::*};` suffices for your needs.

# Logging

Mutations and noteworthy algorithm outcomes (e.g. cycles, disconnected inputs) are reported
through [`tracing`]. Install any subscriber to see them; without one they are free.
*/

pub mod algo;
pub mod edge;
pub mod error;
pub mod kind;
pub mod node;
pub mod ops;
pub mod repr;
pub(crate) mod testing;

/// `arcgraphs::prelude` includes definitions for nodes, arcs, kinds and errors, all basic graph operation traits as well as all implemented representations.
pub mod prelude {
    pub use super::{edge::*, error::GraphError, kind::*, node::*, ops::*, repr::*};
}

use prelude::*;
