/*!
Shortest paths on weighted graphs.

- [`ShortestPath::shortest_paths_from`] runs Dijkstra's algorithm in its classical `O(n^2)`
  array form: no heap, every round scans for the closest vertex that is not finalized yet.
- [`ShortestPath::all_pairs_shortest_paths`] runs Floyd-Warshall and records for every pair
  the intermediate vertex through which its distance was last improved.

Both treat missing arcs as "no connection" and report unreachable pairs as `None`.
Negative weights are not supported and not validated.
*/

use super::*;
use crate::node::some_node;
use tracing::trace;

/// Single source shortest paths as computed by Dijkstra's algorithm
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPaths<W> {
    source: Node,
    dist: Vec<Option<W>>,
    predecessor: Vec<Option<OptionalNode>>,
}

impl<W: Weight> ShortestPaths<W> {
    /// Returns the source vertex
    pub fn source(&self) -> Node {
        self.source
    }

    /// Returns the distance from the source to `v`, or `None` if `v` is unreachable
    /// ** Panics if `v >= n` **
    pub fn distance(&self, v: Node) -> Option<W> {
        self.dist[v as usize]
    }

    /// Returns the distances to all vertices
    pub fn distances(&self) -> &[Option<W>] {
        &self.dist
    }

    /// Returns the vertex preceding `v` on a shortest path from the source
    /// ** Panics if `v >= n` **
    pub fn predecessor(&self, v: Node) -> Option<Node> {
        self.predecessor[v as usize].map(|p| p.get())
    }

    /// Returns *true* if `v` can be reached from the source
    /// ** Panics if `v >= n` **
    pub fn is_reachable(&self, v: Node) -> bool {
        self.dist[v as usize].is_some()
    }

    /// Returns a shortest path from the source to `v` (both included),
    /// or `None` if `v` is unreachable
    /// ** Panics if `v >= n` **
    pub fn path_to(&self, v: Node) -> Option<Vec<Node>> {
        if !self.is_reachable(v) {
            return None;
        }

        let mut path: Vec<Node> =
            std::iter::successors(Some(v), |&u| self.predecessor(u)).collect();
        path.reverse();
        Some(path)
    }

    /// Returns the set of vertices on the shortest path from the source to `v`.
    /// The set is empty if `v` is unreachable.
    /// ** Panics if `v >= n` **
    pub fn path_markers(&self, v: Node) -> NodeBitSet {
        NodeBitSet::new_with_bits_set(
            self.dist.len() as NumNodes,
            self.path_to(v).into_iter().flatten(),
        )
    }
}

/// Distances between all pairs of vertices as computed by Floyd-Warshall
#[derive(Debug, Clone, PartialEq)]
pub struct AllPairsShortestPaths<W> {
    dist: Vec<Vec<Option<W>>>,
    via: Vec<Vec<Option<OptionalNode>>>,
}

impl<W: Weight> AllPairsShortestPaths<W> {
    /// Returns the distance from `u` to `v`, or `None` if `v` is unreachable from `u`
    /// ** Panics if `u >= n || v >= n` **
    pub fn distance(&self, u: Node, v: Node) -> Option<W> {
        self.dist[u as usize][v as usize]
    }

    /// Returns the full distance matrix
    pub fn distances(&self) -> &[Vec<Option<W>>] {
        &self.dist
    }

    /// Returns the intermediate vertex that last improved the distance from `u` to `v`.
    /// `None` if the direct arc is shortest (or there is no path).
    /// ** Panics if `u >= n || v >= n` **
    pub fn via(&self, u: Node, v: Node) -> Option<Node> {
        self.via[u as usize][v as usize].map(|k| k.get())
    }

    /// Reconstructs a shortest path from `u` to `v` (both included),
    /// or `None` if `v` is unreachable from `u`
    /// ** Panics if `u >= n || v >= n` **
    pub fn path(&self, u: Node, v: Node) -> Option<Vec<Node>> {
        self.distance(u, v)?;

        let mut path = vec![u];
        if u != v {
            self.push_intermediates(u, v, &mut path);
            path.push(v);
        }
        Some(path)
    }

    /// Appends the vertices strictly between `u` and `v`:
    /// the subpath to the midpoint, the midpoint, the subpath from the midpoint.
    fn push_intermediates(&self, u: Node, v: Node, path: &mut Vec<Node>) {
        if let Some(k) = self.via(u, v) {
            self.push_intermediates(u, k, path);
            path.push(k);
            self.push_intermediates(k, v, path);
        }
    }
}

/// Provides shortest path algorithms on weighted graphs
pub trait ShortestPath: WeightedAdjacency {
    /// Computes the shortest paths from `source` to all vertices using Dijkstra's algorithm.
    /// ** Panics if `source >= n` **
    ///
    /// # Examples
    /// ```
    /// use arcgraphs::{prelude::*, algo::*};
    ///
    /// let g = MatrixGraph::<&str>::from_weighted_arcs(
    ///     GraphKind::DirectedWeighted,
    ///     ["a", "b", "c"],
    ///     [("a", "b", 4), ("b", "c", 1), ("a", "c", 7)],
    /// ).unwrap();
    ///
    /// let paths = g.shortest_paths_from(0);
    /// assert_eq!(paths.distance(2), Some(5));
    /// assert_eq!(paths.path_to(2), Some(vec![0, 1, 2]));
    /// ```
    fn shortest_paths_from(&self, source: Node) -> ShortestPaths<Self::Weight>;

    /// Computes the distances between all pairs of vertices using Floyd-Warshall
    fn all_pairs_shortest_paths(&self) -> AllPairsShortestPaths<Self::Weight>;
}

impl<G: WeightedAdjacency> ShortestPath for G {
    fn shortest_paths_from(&self, source: Node) -> ShortestPaths<Self::Weight> {
        let n = self.len();
        let mut dist: Vec<Option<G::Weight>> = vec![None; n];
        let mut predecessor = vec![None; n];
        let mut finalized = self.vertex_bitset_unset();

        dist[source as usize] = Some(G::Weight::zero());
        let mut next = Some(source);

        while let Some(u) = next {
            finalized.set_bit(u);
            let Some(du) = dist[u as usize] else { break };

            for (v, w) in self.weighted_neighbors_of(u) {
                if finalized.get_bit(v) {
                    continue;
                }

                let candidate = du + w;
                if dist[v as usize].is_none_or(|dv| candidate < dv) {
                    dist[v as usize] = Some(candidate);
                    predecessor[v as usize] = some_node(u);
                }
            }

            // closest tentative vertex; smallest index on ties
            next = None;
            let mut best: Option<G::Weight> = None;
            for v in self.vertices() {
                if finalized.get_bit(v) {
                    continue;
                }
                match (dist[v as usize], best) {
                    (Some(dv), Some(b)) if b <= dv => {}
                    (Some(dv), _) => {
                        best = Some(dv);
                        next = Some(v);
                    }
                    (None, _) => {}
                }
            }
        }

        trace!(
            source,
            reached = finalized.cardinality(),
            "dijkstra finished"
        );

        ShortestPaths {
            source,
            dist,
            predecessor,
        }
    }

    fn all_pairs_shortest_paths(&self) -> AllPairsShortestPaths<Self::Weight> {
        let n = self.len();
        let mut dist: Vec<Vec<Option<G::Weight>>> = vec![vec![None; n]; n];
        let mut via = vec![vec![None; n]; n];

        for (Edge(u, v), w) in self.weighted_edges() {
            dist[u as usize][v as usize] = Some(w);
        }
        for (i, row) in dist.iter_mut().enumerate() {
            row[i] = Some(G::Weight::zero());
        }

        for k in 0..n {
            for i in 0..n {
                let Some(dik) = dist[i][k] else { continue };

                for j in 0..n {
                    let Some(dkj) = dist[k][j] else { continue };

                    let candidate = dik + dkj;
                    if dist[i][j].is_none_or(|dij| candidate < dij) {
                        dist[i][j] = Some(candidate);
                        via[i][j] = some_node(k as Node);
                    }
                }
            }
        }

        AllPairsShortestPaths { dist, via }
    }
}
