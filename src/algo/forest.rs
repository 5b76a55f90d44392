/*!
Spanning forests in *first-child / next-sibling* form.

A [`SpanningForest`] records the tree arcs taken by a whole-graph traversal. Every vertex
stores its first discovered child and its next sibling, i.e. the next vertex discovered from
the same parent. Roots of the individual trees are chained by sibling pointers as well, in
the order the traversal started them (ascending).
*/

use super::*;
use crate::node::some_node;

/// Spanning forest of a graph produced by a covering DFS or BFS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanningForest {
    first_root: Option<OptionalNode>,
    parent: Vec<Option<OptionalNode>>,
    first_child: Vec<Option<OptionalNode>>,
    next_sibling: Vec<Option<OptionalNode>>,
}

impl SpanningForest {
    /// Builds the forest from the visits of a traversal over `n` vertices.
    /// Children are attached in the order they are reported.
    pub fn from_visits(n: NumNodes, visits: impl IntoIterator<Item = Visit>) -> Self {
        let n = n as usize;
        let mut forest = Self {
            first_root: None,
            parent: vec![None; n],
            first_child: vec![None; n],
            next_sibling: vec![None; n],
        };

        let mut last_child: Vec<Option<OptionalNode>> = vec![None; n];
        let mut last_root: Option<OptionalNode> = None;

        for Visit { node, parent } in visits {
            let packed = some_node(node);
            let last = match parent {
                None => &mut last_root,
                Some(p) => {
                    forest.parent[node as usize] = some_node(p);
                    &mut last_child[p as usize]
                }
            };

            match (std::mem::replace(last, packed), parent) {
                (Some(sibling), _) => forest.next_sibling[sibling.get() as usize] = packed,
                (None, None) => forest.first_root = packed,
                (None, Some(p)) => forest.first_child[p as usize] = packed,
            }
        }

        forest
    }

    /// Number of vertices covered by the forest
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Returns *true* if the forest spans no vertices
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Returns the parent of `u` in its tree, `None` for roots
    /// ** Panics if `u >= n` **
    pub fn parent_of(&self, u: Node) -> Option<Node> {
        self.parent[u as usize].map(|p| p.get())
    }

    /// Returns the first child of `u`, `None` for leaves
    /// ** Panics if `u >= n` **
    pub fn first_child(&self, u: Node) -> Option<Node> {
        self.first_child[u as usize].map(|c| c.get())
    }

    /// Returns the next sibling of `u`. For roots this is the root of the next tree.
    /// ** Panics if `u >= n` **
    pub fn next_sibling(&self, u: Node) -> Option<Node> {
        self.next_sibling[u as usize].map(|s| s.get())
    }

    /// Iterates over the sibling chain starting at (and including) `first`
    fn siblings_from(&self, first: Option<Node>) -> impl Iterator<Item = Node> + '_ {
        std::iter::successors(first, move |&u| self.next_sibling(u))
    }

    /// Returns the roots of all trees in the order they were started
    pub fn roots(&self) -> impl Iterator<Item = Node> + '_ {
        self.siblings_from(self.first_root.map(|r| r.get()))
    }

    /// Returns the children of `u` in discovery order
    /// ** Panics if `u >= n` **
    pub fn children_of(&self, u: Node) -> impl Iterator<Item = Node> + '_ {
        self.siblings_from(self.first_child(u))
    }

    /// Returns the number of trees, i.e. the number of traversal restarts
    pub fn number_of_trees(&self) -> usize {
        self.roots().count()
    }

    /// Returns the parent of every vertex; roots map to `None`
    pub fn parent_array(&self) -> Vec<Option<Node>> {
        self.parent.iter().map(|p| p.map(|p| p.get())).collect()
    }

    /// Returns all tree arcs `(parent, child)`, grouped by parent with parents in preorder
    pub fn tree_arcs(&self) -> Vec<Edge> {
        let mut arcs = Vec::with_capacity(self.len());
        let mut stack: Vec<Node> = self.roots().collect();
        stack.reverse();

        while let Some(u) = stack.pop() {
            let start = stack.len();
            for c in self.children_of(u) {
                arcs.push(Edge(u, c));
                stack.push(c);
            }
            stack[start..].reverse();
        }

        arcs
    }
}

/// Provides spanning forests of whole graphs
pub trait SpanningForests: Traversal {
    /// Spanning forest of a covering depth-first traversal.
    ///
    /// # Examples
    /// ```
    /// use arcgraphs::{prelude::*, algo::*};
    ///
    /// let g = MatrixGraph::<u32>::from_arcs(
    ///     GraphKind::UndirectedUnweighted,
    ///     0..4,
    ///     [(0, 1), (0, 2), (1, 2)],
    /// ).unwrap();
    ///
    /// let forest = g.dfs_forest();
    /// assert_eq!(forest.roots().collect::<Vec<_>>(), vec![0, 3]);
    /// assert_eq!(forest.children_of(0).collect::<Vec<_>>(), vec![1]);
    /// assert_eq!(forest.children_of(1).collect::<Vec<_>>(), vec![2]);
    /// ```
    fn dfs_forest(&self) -> SpanningForest {
        SpanningForest::from_visits(self.number_of_nodes(), self.dfs_all())
    }

    /// Spanning forest of a covering breadth-first traversal
    fn bfs_forest(&self) -> SpanningForest {
        SpanningForest::from_visits(self.number_of_nodes(), self.bfs_all())
    }
}

impl<G: Traversal> SpanningForests for G {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{random_arcs, storages_from};
    use itertools::Itertools;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    fn children(forest: &SpanningForest, u: Node) -> Vec<Node> {
        forest.children_of(u).collect_vec()
    }

    #[test]
    fn dfs_and_bfs_forest_shapes() {
        // 0 - 1 - 3     4 - 5 - 6
        //  \     /
        //    2 -
        let (matrix, _) = storages_from(
            GraphKind::UndirectedUnweighted,
            0..7,
            [(0, 1), (0, 2), (1, 3), (2, 3), (4, 5), (5, 6)],
        );

        let dfs = matrix.dfs_forest();
        assert_eq!(dfs.roots().collect_vec(), vec![0, 4]);
        assert_eq!(dfs.number_of_trees(), 2);
        assert_eq!(children(&dfs, 0), vec![1]);
        assert_eq!(children(&dfs, 1), vec![3]);
        assert_eq!(children(&dfs, 3), vec![2]);
        assert_eq!(children(&dfs, 4), vec![5]);
        assert_eq!(dfs.next_sibling(0), Some(4));

        let bfs = matrix.bfs_forest();
        assert_eq!(bfs.roots().collect_vec(), vec![0, 4]);
        assert_eq!(children(&bfs, 0), vec![1, 2]);
        assert_eq!(bfs.first_child(0), Some(1));
        assert_eq!(bfs.next_sibling(1), Some(2));
        assert_eq!(bfs.next_sibling(2), None);
        assert_eq!(children(&bfs, 1), vec![3]);
        assert!(children(&bfs, 2).is_empty());
        assert_eq!(
            bfs.parent_array(),
            vec![None, Some(0), Some(0), Some(1), None, Some(4), Some(5)]
        );
        assert_eq!(
            bfs.tree_arcs(),
            vec![Edge(0, 1), Edge(0, 2), Edge(1, 3), Edge(4, 5), Edge(5, 6)]
        );
    }

    #[test]
    fn forest_matches_traversal() {
        let rng = &mut Pcg64Mcg::seed_from_u64(11);

        for n in [1u32, 8, 40] {
            let (matrix, list) =
                storages_from(GraphKind::UndirectedUnweighted, 0..n, random_arcs(rng, n, n));

            for forest in [matrix.dfs_forest(), list.dfs_forest()] {
                assert_eq!(forest.len(), n as usize);
                assert_eq!(forest.tree_arcs().len() + forest.number_of_trees(), n as usize);
            }

            assert_eq!(matrix.dfs_forest().parent_array(), matrix.dfs_all().parent_array());
            assert_eq!(list.bfs_forest().parent_array(), list.bfs_all().parent_array());

            for forest in [list.dfs_forest(), list.bfs_forest()] {
                for u in list.vertices() {
                    if let Some(p) = forest.parent_of(u) {
                        assert!(list.has_arc(p, u));
                        assert!(forest.children_of(p).contains(&u));
                    }
                }
            }
        }
    }

    #[test]
    fn empty_forest() {
        let graph = ListGraph::<u32>::new(GraphKind::UndirectedUnweighted);
        let forest = graph.dfs_forest();
        assert!(forest.is_empty());
        assert_eq!(forest.number_of_trees(), 0);
    }
}
