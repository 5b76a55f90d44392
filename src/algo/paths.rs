/*!
# Path Queries

Reachability and simple-path queries between two vertices.

A *simple path* visits no vertex twice; its length is the number of arcs. The enumeration in
[`SimplePaths`] is a depth-first search over the current path only: a vertex is marked while it
lies on the path and unmarked when the search backtracks, so it may appear again on later paths.
The number of simple paths can be exponential in the size of the graph.
*/

use super::*;

/// Iterator over all simple paths from a source to a target vertex.
///
/// Paths are reported as vectors starting with the source and ending with the target.
/// The order follows the neighbor order of the underlying storage.
pub struct SimplePaths<'a, G> {
    graph: &'a G,
    target: Node,
    on_path: NodeBitSet,
    path: Vec<Node>,
    // next neighbor to try for every vertex on `path`
    cursors: Vec<Option<NeighborCursor>>,
    trivial: Option<Node>,
    max_len: Option<NumNodes>,
}

impl<'a, G: AdjacencyList> SimplePaths<'a, G> {
    /// Creates the search for all simple paths from `source` to `target`.
    /// If both coincide, the single path of length zero is reported.
    /// ** Panics if `source >= n` or `target >= n` **
    pub fn new(graph: &'a G, source: Node, target: Node) -> Self {
        assert!(target < graph.number_of_nodes());

        let mut search = Self {
            graph,
            target,
            on_path: graph.vertex_bitset_unset(),
            path: Vec::new(),
            cursors: Vec::new(),
            trivial: None,
            max_len: None,
        };

        if source == target {
            search.trivial = Some(source);
        } else {
            search.enter(source);
        }

        search
    }

    /// Restricts the search to paths with at most `max_len` arcs
    pub fn max_len(mut self, max_len: NumNodes) -> Self {
        self.max_len = Some(max_len);
        self
    }

    fn within_limit(&self, arcs: usize) -> bool {
        self.max_len.is_none_or(|k| arcs <= k as usize)
    }

    fn enter(&mut self, u: Node) {
        self.on_path.set_bit(u);
        self.path.push(u);
        self.cursors.push(self.graph.first_cursor(u));
    }

    fn leave(&mut self) {
        if let Some(u) = self.path.pop() {
            self.on_path.clear_bit(u);
            self.cursors.pop();
        }
    }
}

impl<G: AdjacencyList> Iterator for SimplePaths<'_, G> {
    type Item = Vec<Node>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(u) = self.trivial.take() {
            return Some(vec![u]);
        }

        loop {
            let &u = self.path.last()?;
            let top = self.path.len() - 1;

            let Some(cursor) = self.cursors[top] else {
                self.leave();
                continue;
            };
            self.cursors[top] = self.graph.next_cursor(u, cursor);

            let v = cursor.node;
            if self.on_path.get_bit(v) {
                continue;
            }

            // appending v yields a path with `path.len()` arcs
            let arcs = self.path.len();
            if v == self.target {
                if self.within_limit(arcs) {
                    let mut found = self.path.clone();
                    found.push(v);
                    return Some(found);
                }
            } else if self.within_limit(arcs + 1) {
                self.enter(v);
            }
        }
    }
}

/// Reachability and simple path queries.
///
/// Meant for directed graphs; on undirected graphs every edge can be used in both directions.
pub trait PathQueries: Traversal {
    /// Returns *true* if `v` can be reached from `u` using a depth-first search.
    /// Every vertex reaches itself.
    /// ** Panics if `u >= n` **
    ///
    /// # Examples
    /// ```
    /// use arcgraphs::{prelude::*, algo::*};
    ///
    /// let g = MatrixGraph::<u32>::from_arcs(GraphKind::DirectedUnweighted, 0..3, [(0, 1), (1, 2)]).unwrap();
    /// assert!(g.has_path_dfs(0, 2));
    /// assert!(!g.has_path_dfs(2, 0));
    /// ```
    fn has_path_dfs(&self, u: Node, v: Node) -> bool {
        self.dfs(u).reaches(v)
    }

    /// Returns *true* if `v` can be reached from `u` using a breadth-first search.
    /// Every vertex reaches itself.
    /// ** Panics if `u >= n` **
    fn has_path_bfs(&self, u: Node, v: Node) -> bool {
        self.bfs(u).reaches(v)
    }

    /// Returns an iterator over all simple paths from `u` to `v`
    /// ** Panics if `u >= n` or `v >= n` **
    fn simple_path_search(&self, u: Node, v: Node) -> SimplePaths<'_, Self> {
        SimplePaths::new(self, u, v)
    }

    /// Returns all simple paths from `u` to `v`
    /// ** Panics if `u >= n` or `v >= n` **
    ///
    /// # Examples
    /// ```
    /// use arcgraphs::{prelude::*, algo::*};
    ///
    /// let g = ListGraph::<u32>::from_arcs(
    ///     GraphKind::DirectedUnweighted,
    ///     0..4,
    ///     [(0, 1), (0, 2), (1, 3), (2, 3)],
    /// ).unwrap();
    ///
    /// let mut paths = g.simple_paths(0, 3);
    /// paths.sort();
    /// assert_eq!(paths, vec![vec![0, 1, 3], vec![0, 2, 3]]);
    /// ```
    fn simple_paths(&self, u: Node, v: Node) -> Vec<Vec<Node>> {
        self.simple_path_search(u, v).collect()
    }

    /// Returns *true* if there exists a simple path from `u` to `v` with exactly `len` arcs
    /// ** Panics if `u >= n` or `v >= n` **
    fn has_simple_path_of_length(&self, u: Node, v: Node, len: NumNodes) -> bool {
        self.simple_path_search(u, v)
            .max_len(len)
            .any(|path| path.len() == len as usize + 1)
    }

    /// Returns the number of simple paths from `u` to `v` with exactly `len` arcs
    /// ** Panics if `u >= n` or `v >= n` **
    fn count_simple_paths_of_length(&self, u: Node, v: Node, len: NumNodes) -> usize {
        self.simple_path_search(u, v)
            .max_len(len)
            .filter(|path| path.len() == len as usize + 1)
            .count()
    }
}

impl<G: Traversal> PathQueries for G {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{random_arcs, storages_from};
    use itertools::Itertools;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    //   5 -> 0 -> 1 -> 3 -> 4
    //        |    |    ^
    //        |    v    |
    //        +--> 2 ---+
    fn small_dag() -> (MatrixGraph<u32>, ListGraph<u32>) {
        storages_from(
            GraphKind::DirectedUnweighted,
            0..6,
            [(0, 1), (0, 2), (1, 3), (2, 3), (3, 4), (1, 2), (5, 0)],
        )
    }

    fn sorted(paths: Vec<Vec<Node>>) -> Vec<Vec<Node>> {
        paths.into_iter().sorted().collect()
    }

    #[test]
    fn reachability() {
        let (matrix, list) = small_dag();

        for (u, v, expected) in [
            (0, 4, true),
            (5, 4, true),
            (4, 0, false),
            (0, 5, false),
            (3, 3, true),
        ] {
            assert_eq!(matrix.has_path_dfs(u, v), expected);
            assert_eq!(matrix.has_path_bfs(u, v), expected);
            assert_eq!(list.has_path_dfs(u, v), expected);
            assert_eq!(list.has_path_bfs(u, v), expected);
        }
    }

    #[test]
    fn all_simple_paths() {
        let (matrix, list) = small_dag();

        for paths in [matrix.simple_paths(0, 4), list.simple_paths(0, 4)] {
            assert_eq!(
                sorted(paths),
                vec![vec![0, 1, 2, 3, 4], vec![0, 1, 3, 4], vec![0, 2, 3, 4]]
            );
        }

        assert!(matrix.simple_paths(4, 0).is_empty());
        assert_eq!(list.simple_paths(2, 2), vec![vec![2]]);
    }

    #[test]
    fn paths_of_given_length() {
        let (matrix, list) = small_dag();

        for (len, count) in [(0, 0), (1, 0), (2, 2), (3, 1), (4, 0)] {
            assert_eq!(matrix.count_simple_paths_of_length(0, 3, len), count);
            assert_eq!(list.count_simple_paths_of_length(0, 3, len), count);
            assert_eq!(list.has_simple_path_of_length(0, 3, len), count > 0);
        }

        assert_eq!(matrix.count_simple_paths_of_length(1, 1, 0), 1);
        assert!(!matrix.has_simple_path_of_length(1, 1, 2));
    }

    #[test]
    fn max_len_cuts_long_paths() {
        let (matrix, _) = small_dag();
        let short = matrix.simple_path_search(0, 4).max_len(3).collect_vec();
        assert_eq!(sorted(short), vec![vec![0, 1, 3, 4], vec![0, 2, 3, 4]]);
        assert_eq!(matrix.simple_path_search(0, 4).max_len(2).count(), 0);
    }

    #[test]
    fn undirected_cycle() {
        let (matrix, list) = storages_from(
            GraphKind::UndirectedUnweighted,
            0..5,
            (0..5).map(|u| (u, (u + 1) % 5)),
        );

        for paths in [matrix.simple_paths(0, 2), list.simple_paths(0, 2)] {
            assert_eq!(sorted(paths), vec![vec![0, 1, 2], vec![0, 4, 3, 2]]);
        }
        assert_eq!(list.count_simple_paths_of_length(0, 2, 3), 1);
    }

    /// Counts simple paths of exactly `len` arcs by plain recursion
    fn count_reference(
        graph: &ListGraph<u32>,
        u: Node,
        v: Node,
        len: usize,
        on_path: &mut [bool],
    ) -> usize {
        if u == v {
            return (len == 0) as usize;
        }
        if len == 0 {
            return 0;
        }

        on_path[u as usize] = true;
        let mut count = 0;
        for w in graph.neighbors_of(u).collect_vec() {
            if !on_path[w as usize] {
                count += count_reference(graph, w, v, len - 1, on_path);
            }
        }
        on_path[u as usize] = false;
        count
    }

    #[test]
    fn random_graphs() {
        let rng = &mut Pcg64Mcg::seed_from_u64(23);

        for n in [2u32, 6, 9] {
            let (matrix, list) =
                storages_from(GraphKind::DirectedUnweighted, 0..n, random_arcs(rng, n, 2 * n));

            for u in list.vertices() {
                for v in list.vertices() {
                    let paths = list.simple_paths(u, v);
                    assert_eq!(list.has_path_bfs(u, v), !paths.is_empty());
                    assert_eq!(matrix.has_path_dfs(u, v), !paths.is_empty());
                    assert_eq!(sorted(matrix.simple_paths(u, v)), sorted(paths.clone()));

                    for path in &paths {
                        assert!(path.iter().all_unique());
                        assert!(path.iter().tuple_windows().all(|(&a, &b)| list.has_arc(a, b)));
                    }

                    for len in 0..n {
                        let on_path = &mut vec![false; n as usize];
                        let expected = count_reference(&list, u, v, len as usize, on_path);
                        assert_eq!(list.count_simple_paths_of_length(u, v, len), expected);
                    }
                }
            }
        }
    }
}
