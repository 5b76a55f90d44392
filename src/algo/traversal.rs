/*!
Graph traversal algorithms and traversal-derived utilities.

This module provides:
- Lazy traversal iterators [`Dfs`] and [`Bfs`] yielding [`Visit`]s in discovery order,
  configurable via builder methods (`covering_all`, `stop_at`, `with_nodes_excluded`).
- Whole-graph traversals with a visitor callback, both in explicit-stack/queue form and in
  recursive form (see [`Traversal`]).
- [`TopoSearch`], a lazy topological ordering for directed acyclic graphs.

All traversals mark a vertex as visited when it is *discovered*, so every vertex is reported
at most once. Whole-graph traversals start at the smallest vertex and restart at the smallest
vertex not visited yet whenever a component is exhausted.
*/

use super::*;
use std::collections::VecDeque;

/// A vertex reported by a traversal together with the vertex it was discovered from.
/// Roots of the traversal (the start vertex and every restart) have no parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Visit {
    /// Vertex reached
    pub node: Node,
    /// Vertex whose arc led to `node`
    pub parent: Option<Node>,
}

impl Visit {
    fn root(node: Node) -> Self {
        Self { node, parent: None }
    }

    fn child(parent: Node, node: Node) -> Self {
        Self {
            node,
            parent: Some(parent),
        }
    }

    /// Returns *true* if the vertex started a new traversal tree
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// State shared by [`Dfs`] and [`Bfs`]
struct SearchState {
    visited: NodeBitSet,
    stop_at: Option<Node>,
    covering_all: bool,
    /// All vertices below this one are known to be visited
    restart_from: Node,
}

impl SearchState {
    fn new(n: NumNodes) -> Self {
        Self {
            visited: NodeBitSet::new(n),
            stop_at: None,
            covering_all: false,
            restart_from: 0,
        }
    }

    /// Marks the smallest unvisited vertex as visited and returns it,
    /// provided the search covers all vertices.
    fn restart(&mut self) -> Option<Node> {
        if !self.covering_all {
            return None;
        }

        let n = self.visited.number_of_bits();
        while self.restart_from < n {
            let u = self.restart_from;
            self.restart_from += 1;
            if !self.visited.set_bit(u) {
                return Some(u);
            }
        }
        None
    }

    /// Returns *true* if the search has to end after reporting `u`
    fn is_stopper(&self, u: Node) -> bool {
        self.stop_at == Some(u)
    }
}

/// Depth-first search iterator.
///
/// Keeps an explicit stack of `(vertex, cursor at the next neighbor to inspect)` pairs and
/// advances the topmost entry with [`AdjacencyList::next_cursor`]. This yields exactly the
/// order of the recursive formulation without being bounded by the call stack.
pub struct Dfs<'a, G> {
    graph: &'a G,
    state: SearchState,
    stack: Vec<(Node, Option<NeighborCursor>)>,
    pending: Option<Visit>,
}

/// Breadth-first search iterator using a FIFO queue.
pub struct Bfs<'a, G> {
    graph: &'a G,
    state: SearchState,
    queue: VecDeque<Visit>,
}

impl<'a, G: AdjacencyList> Dfs<'a, G> {
    /// Creates a new depth-first search starting at `start`.
    /// ** Panics if `start >= n` **
    pub fn new(graph: &'a G, start: Node) -> Self {
        let mut search = Self::unrooted(graph);
        search.state.visited.set_bit(start);
        search.stack.push((start, graph.first_cursor(start)));
        search.pending = Some(Visit::root(start));
        search
    }

    /// Creates a search without start vertex. Only useful together with
    /// [`Dfs::covering_all`], which then starts at the smallest vertex.
    pub fn unrooted(graph: &'a G) -> Self {
        Self {
            graph,
            state: SearchState::new(graph.number_of_nodes()),
            stack: Vec::new(),
            pending: None,
        }
    }

    fn emit(&mut self, visit: Visit) -> Option<Visit> {
        if self.state.is_stopper(visit.node) {
            self.stack.clear();
            self.state.covering_all = false;
        }
        Some(visit)
    }
}

impl<G: AdjacencyList> Iterator for Dfs<'_, G> {
    type Item = Visit;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(visit) = self.pending.take() {
            return self.emit(visit);
        }

        while let Some(top) = self.stack.last_mut() {
            let u = top.0;
            let Some(cursor) = top.1 else {
                self.stack.pop();
                continue;
            };
            top.1 = self.graph.next_cursor(u, cursor);

            let v = cursor.node;
            if !self.state.visited.set_bit(v) {
                self.stack.push((v, self.graph.first_cursor(v)));
                return self.emit(Visit::child(u, v));
            }
        }

        let root = self.state.restart()?;
        self.stack.push((root, self.graph.first_cursor(root)));
        self.emit(Visit::root(root))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let unvisited = self.graph.len() - self.state.visited.cardinality() as usize;
        (
            self.pending.is_some() as usize,
            Some(unvisited + self.pending.is_some() as usize),
        )
    }
}

impl<'a, G: AdjacencyList> Bfs<'a, G> {
    /// Creates a new breadth-first search starting at `start`.
    /// ** Panics if `start >= n` **
    pub fn new(graph: &'a G, start: Node) -> Self {
        let mut search = Self::unrooted(graph);
        search.state.visited.set_bit(start);
        search.queue.push_back(Visit::root(start));
        search
    }

    /// Creates a search without start vertex. Only useful together with
    /// [`Bfs::covering_all`], which then starts at the smallest vertex.
    pub fn unrooted(graph: &'a G) -> Self {
        Self {
            graph,
            state: SearchState::new(graph.number_of_nodes()),
            queue: VecDeque::new(),
        }
    }
}

impl<G: AdjacencyList> Iterator for Bfs<'_, G> {
    type Item = Visit;

    fn next(&mut self) -> Option<Self::Item> {
        let visit = match self.queue.pop_front() {
            Some(visit) => visit,
            None => Visit::root(self.state.restart()?),
        };
        let u = visit.node;

        if self.state.is_stopper(u) {
            self.queue.clear();
            self.state.covering_all = false;
        } else {
            for v in self.graph.neighbors_of(u) {
                if !self.state.visited.set_bit(v) {
                    self.queue.push_back(Visit::child(u, v));
                }
            }
        }

        Some(visit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let unvisited = self.graph.len() - self.state.visited.cardinality() as usize;
        (self.queue.len(), Some(self.queue.len() + unvisited))
    }
}

/// Builder/Setter methods shared by both searches
macro_rules! impl_search_config {
    ($search:ident) => {
        impl<G: AdjacencyList> $search<'_, G> {
            /// Once the current tree is exhausted, restart at the smallest unvisited vertex
            /// until every vertex was reported.
            pub fn covering_all(mut self) -> Self {
                self.state.covering_all = true;
                self
            }

            /// Sets a stopper node. If this node is reached, the iterator returns it and afterwards only None.
            pub fn set_stop_at(&mut self, stopper: Node) {
                self.state.stop_at = Some(stopper);
            }

            /// Sets a stopper node. If this node is reached, the iterator returns it and afterwards only None.
            pub fn stop_at(mut self, stopper: Node) -> Self {
                self.set_stop_at(stopper);
                self
            }

            /// Excludes a node from the search. It will be treated as if it was already visited,
            /// i.e. no arcs to or from that node will be taken.
            ///
            /// # Warning
            /// Calling this method has no effect if the node is already on the frontier. It is
            /// therefore highly recommended to call this method directly after the constructor.
            pub fn exclude_node(&mut self, u: Node) {
                self.state.visited.set_bit(u);
            }

            /// Exclude multiple nodes from traversal. It is functionally equivalent to repeatedly
            /// calling [`Self::exclude_node`].
            pub fn with_nodes_excluded<N>(mut self, us: N) -> Self
            where
                N: IntoIterator<Item = Node>,
            {
                for u in us {
                    self.exclude_node(u);
                }
                self
            }

            /// Returns *true* if `u` was reported (or excluded) so far
            pub fn did_visit_node(&self, u: Node) -> bool {
                self.state.visited.get_bit(u)
            }

            /// Consumes the search and returns *true* iff `target` is reported,
            /// i.e. if there exists a path from the start node to `target`.
            pub fn reaches(mut self, target: Node) -> bool {
                self.any(|visit| visit.node == target)
            }

            /// Consumes the search and records the parent of every reported vertex.
            /// Roots and unreached vertices keep `None`.
            pub fn parent_array(self) -> Vec<Option<Node>> {
                let mut parents = vec![None; self.graph.len()];
                for visit in self {
                    parents[visit.node as usize] = visit.parent;
                }
                parents
            }

            /// Consumes the search and produces a vector `ranking` where `ranking[u]` is the
            /// position at which `u` was reported. Returns `None` if not every vertex was reported.
            pub fn ranking(self) -> Option<Vec<Node>> {
                rank_from_order(self.graph.len(), self.map(|visit| visit.node))
            }
        }
    };
}

impl_search_config!(Dfs);
impl_search_config!(Bfs);

/// Turns an order over `0..n` into ranks; `None` if the order does not cover every vertex.
fn rank_from_order(n: usize, order: impl Iterator<Item = Node>) -> Option<Vec<Node>> {
    let mut ranking = vec![INVALID_NODE; n];
    let mut rank: Node = 0;

    for u in order {
        debug_assert_eq!(ranking[u as usize], INVALID_NODE);
        ranking[u as usize] = rank;
        rank += 1;
    }

    (rank as usize == n).then_some(ranking)
}

/// Iterator implementing topological ordering over a directed acyclic graph (DAG).
///
/// Uses a variant of Kahn's algorithm:
/// - Initializes a stack with all nodes of in-degree 0 (in ascending order).
/// - Repeatedly pops a node, decreasing the in-degrees of its successors,
///   and pushes successors whose in-degree dropped to 0.
/// - Stops once all nodes are output or a cycle blocks further progress.
pub struct TopoSearch<'a, G> {
    graph: &'a G,
    in_degs: Vec<NumNodes>,
    stack: Vec<Node>,
}

impl<'a, G: AdjacencyList> TopoSearch<'a, G> {
    /// Recomputes all in-degrees and collects the initial zero in-degree nodes
    pub fn new(graph: &'a G) -> Self {
        let in_degs = graph.in_degrees();
        let stack = in_degs
            .iter()
            .enumerate()
            .filter_map(|(u, &d)| (d == 0).then_some(u as Node))
            .collect();

        Self {
            graph,
            in_degs,
            stack,
        }
    }

    /// Consumes the iterator and returns the ranks of all nodes,
    /// or `None` if a cycle prevented a complete order
    pub fn ranking(self) -> Option<Vec<Node>> {
        rank_from_order(self.graph.len(), self)
    }
}

impl<G: AdjacencyList> Iterator for TopoSearch<'_, G> {
    type Item = Node;

    /// Returns the next node in topological order, if available.
    ///
    /// - Each returned node is guaranteed to appear after all its predecessors.
    /// - If the graph has a cycle, iteration will terminate early without
    ///   covering all nodes.
    fn next(&mut self) -> Option<Self::Item> {
        let u = self.stack.pop()?;

        for v in self.graph.neighbors_of(u) {
            self.in_degs[v as usize] -= 1;
            if self.in_degs[v as usize] == 0 {
                self.stack.push(v);
            }
        }

        Some(u)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.stack.len(), Some(self.graph.len()))
    }
}

/// Per-call state of the recursive depth-first traversal
struct RecursiveDfs<'a, G, F> {
    graph: &'a G,
    visited: NodeBitSet,
    visit: F,
}

impl<G: AdjacencyList, F: FnMut(Visit)> RecursiveDfs<'_, G, F> {
    fn explore(&mut self, u: Node, parent: Option<Node>) {
        self.visited.set_bit(u);
        (self.visit)(Visit { node: u, parent });

        let mut next = self.graph.first_cursor(u);
        while let Some(cursor) = next {
            if !self.visited.get_bit(cursor.node) {
                self.explore(cursor.node, Some(u));
            }
            next = self.graph.next_cursor(u, cursor);
        }
    }
}

/// Per-call state of the recursive breadth-first traversal.
/// Each recursion level handles one frontier.
struct RecursiveBfs<'a, G, F> {
    graph: &'a G,
    visited: NodeBitSet,
    visit: F,
}

impl<G: AdjacencyList, F: FnMut(Visit)> RecursiveBfs<'_, G, F> {
    fn explore_level(&mut self, level: Vec<Visit>) {
        let mut next_level = Vec::new();
        for visit in level {
            (self.visit)(visit);
            for v in self.graph.neighbors_of(visit.node) {
                if !self.visited.set_bit(v) {
                    next_level.push(Visit::child(visit.node, v));
                }
            }
        }

        if !next_level.is_empty() {
            self.explore_level(next_level);
        }
    }
}

/// Provides convenient traversal methods (BFS, DFS, topological order, etc.)
pub trait Traversal: AdjacencyList + Sized {
    /// Returns an iterator that traverses nodes reachable from `start`
    /// in **breadth-first search (BFS) order**.
    ///
    /// # Examples
    /// ```
    /// use arcgraphs::{prelude::*, algo::*};
    ///
    /// let g = MatrixGraph::<u32>::from_arcs(GraphKind::UndirectedUnweighted, 0..3, [(0, 1), (0, 2)]).unwrap();
    ///
    /// let order: Vec<_> = g.bfs(1).map(|v| v.node).collect();
    /// assert_eq!(order, vec![1, 0, 2]);
    /// ```
    fn bfs(&self, start: Node) -> Bfs<'_, Self> {
        Bfs::new(self, start)
    }

    /// Returns an iterator that traverses nodes reachable from `start`
    /// in **depth-first search (DFS) order**.
    ///
    /// # Examples
    /// ```
    /// use arcgraphs::{prelude::*, algo::*};
    ///
    /// let g = MatrixGraph::<u32>::from_arcs(GraphKind::DirectedUnweighted, 0..3, [(0, 2), (2, 1)]).unwrap();
    ///
    /// let order: Vec<_> = g.dfs(0).map(|v| v.node).collect();
    /// assert_eq!(order, vec![0, 2, 1]);
    /// ```
    fn dfs(&self, start: Node) -> Dfs<'_, Self> {
        Dfs::new(self, start)
    }

    /// Returns a BFS iterator that covers all vertices, starting trees in ascending order
    fn bfs_all(&self) -> Bfs<'_, Self> {
        Bfs::unrooted(self).covering_all()
    }

    /// Returns a DFS iterator that covers all vertices, starting trees in ascending order
    fn dfs_all(&self) -> Dfs<'_, Self> {
        Dfs::unrooted(self).covering_all()
    }

    /// Visits every vertex exactly once in depth-first order using an explicit stack
    fn dfs_traverse<F: FnMut(Visit)>(&self, visit: F) {
        self.dfs_all().for_each(visit);
    }

    /// Visits every vertex exactly once in depth-first order using recursion.
    /// Produces the same order as [`Traversal::dfs_traverse`], but the recursion depth
    /// is bounded by the call stack.
    fn dfs_traverse_recursive<F: FnMut(Visit)>(&self, visit: F) {
        let mut state = RecursiveDfs {
            graph: self,
            visited: self.vertex_bitset_unset(),
            visit,
        };

        for u in self.vertices() {
            if !state.visited.get_bit(u) {
                state.explore(u, None);
            }
        }
    }

    /// Visits every vertex exactly once in breadth-first order using a queue
    fn bfs_traverse<F: FnMut(Visit)>(&self, visit: F) {
        self.bfs_all().for_each(visit);
    }

    /// Visits every vertex exactly once in breadth-first order, recursing over frontier levels.
    /// Produces the same order as [`Traversal::bfs_traverse`].
    fn bfs_traverse_recursive<F: FnMut(Visit)>(&self, visit: F) {
        let mut state = RecursiveBfs {
            graph: self,
            visited: self.vertex_bitset_unset(),
            visit,
        };

        for u in self.vertices() {
            if !state.visited.set_bit(u) {
                state.explore_level(vec![Visit::root(u)]);
            }
        }
    }

    /// Returns an iterator yielding nodes in a valid **topological order**.
    ///
    /// - Only meaningful for directed graphs.
    /// - Terminates early if the graph contains a cycle.
    ///
    /// # Examples
    /// ```
    /// use arcgraphs::{prelude::*, algo::*};
    ///
    /// let g = ListGraph::<u32>::from_arcs(GraphKind::DirectedUnweighted, 0..3, [(0, 1), (1, 2)]).unwrap();
    /// let order: Vec<_> = g.topo_search().collect();
    /// assert_eq!(order, vec![0, 1, 2]);
    /// ```
    fn topo_search(&self) -> TopoSearch<'_, Self> {
        TopoSearch::new(self)
    }
}

impl<G> Traversal for G where G: AdjacencyList + Sized {}
