use super::*;
use crate::node::some_node;
use tracing::{debug, warn};

/// Provides Prim's algorithm for minimum spanning trees
pub trait MinimumSpanningTree: WeightedAdjacency {
    /// Grows a minimum spanning tree from `root` and returns its arcs in the order they were
    /// chosen. Every round picks the cheapest arc connecting the tree to a vertex outside;
    /// on ties the vertex with the smallest index wins.
    ///
    /// Meant for undirected graphs. If not every vertex is reachable from `root`, only the
    /// tree of the reachable fragment is returned (and a warning is logged).
    /// ** Panics if `root >= n` **
    ///
    /// # Examples
    /// ```
    /// use arcgraphs::{prelude::*, algo::*};
    ///
    /// let g = ListGraph::<&str>::from_weighted_arcs(
    ///     GraphKind::UndirectedWeighted,
    ///     ["a", "b", "c"],
    ///     [("a", "b", 3), ("b", "c", 1), ("a", "c", 2)],
    /// ).unwrap();
    ///
    /// let tree = g.minimum_spanning_tree(0);
    /// assert_eq!(tree.iter().map(|a| a.weight).sum::<i64>(), 3);
    /// assert_eq!(tree[0], TreeArc { from: 0, to: 2, weight: 2 });
    /// ```
    fn minimum_spanning_tree(&self, root: Node) -> Vec<TreeArc<Self::Weight>>;
}

impl<G: WeightedAdjacency> MinimumSpanningTree for G {
    fn minimum_spanning_tree(&self, root: Node) -> Vec<TreeArc<Self::Weight>> {
        let n = self.len();
        let mut tree = Vec::with_capacity(n.saturating_sub(1));

        // cheapest known arc from the tree to every outside vertex
        let mut closest: Vec<Option<(OptionalNode, G::Weight)>> = vec![None; n];
        let mut in_tree = self.vertex_bitset_unset();

        let mut joined = root;
        in_tree.set_bit(root);

        loop {
            for (v, w) in self.weighted_neighbors_of(joined) {
                if in_tree.get_bit(v) {
                    continue;
                }
                if closest[v as usize].is_none_or(|(_, cost)| w < cost) {
                    closest[v as usize] = some_node(joined).map(|u| (u, w));
                }
            }

            let mut best: Option<(Node, G::Weight)> = None;
            for v in self.vertices() {
                if in_tree.get_bit(v) {
                    continue;
                }
                match (closest[v as usize], best) {
                    (Some((_, cost)), Some((_, b))) if b <= cost => {}
                    (Some((_, cost)), _) => best = Some((v, cost)),
                    (None, _) => {}
                }
            }

            let Some((to, weight)) = best else {
                break;
            };
            let Some((from, _)) = closest[to as usize] else {
                break;
            };

            tree.push(TreeArc {
                from: from.get(),
                to,
                weight,
            });
            in_tree.set_bit(to);
            joined = to;
        }

        if tree.len() + 1 < n {
            warn!(
                root,
                spanned = tree.len() + 1,
                total = n,
                "graph is disconnected; spanning tree covers only the fragment of the root"
            );
        } else {
            debug!(root, arcs = tree.len(), "minimum spanning tree complete");
        }

        tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{random_weighted_arcs, weighted_storages_from};
    use itertools::Itertools;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64Mcg;

    fn total(tree: &[TreeArc<i64>]) -> i64 {
        tree.iter().map(|a| a.weight).sum()
    }

    #[test]
    fn six_vertex_example() {
        let (matrix, list) = weighted_storages_from(
            GraphKind::UndirectedWeighted,
            ["v1", "v2", "v3", "v4", "v5", "v6"],
            [
                ("v1", "v2", 6),
                ("v1", "v3", 1),
                ("v1", "v4", 5),
                ("v2", "v3", 5),
                ("v2", "v5", 3),
                ("v3", "v4", 5),
                ("v3", "v5", 6),
                ("v3", "v6", 4),
                ("v4", "v6", 2),
                ("v5", "v6", 6),
            ],
        );

        for tree in [matrix.minimum_spanning_tree(0), list.minimum_spanning_tree(0)] {
            let named = tree
                .iter()
                .map(|a| (*matrix.label_of(a.from), *matrix.label_of(a.to), a.weight))
                .collect_vec();

            assert_eq!(
                named,
                vec![
                    ("v1", "v3", 1),
                    ("v3", "v6", 4),
                    ("v6", "v4", 2),
                    ("v3", "v2", 5),
                    ("v2", "v5", 3)
                ]
            );
            assert_eq!(total(&tree), 15);
        }
    }

    #[test]
    fn disconnected_graph_yields_fragment() {
        let (matrix, list) = weighted_storages_from(
            GraphKind::UndirectedWeighted,
            0..5,
            [(0, 1, 4), (1, 2, 1), (3, 4, 2)],
        );

        for tree in [matrix.minimum_spanning_tree(1), list.minimum_spanning_tree(1)] {
            assert_eq!(
                tree,
                vec![
                    TreeArc { from: 1, to: 2, weight: 1 },
                    TreeArc { from: 1, to: 0, weight: 4 }
                ]
            );
        }

        assert_eq!(matrix.minimum_spanning_tree(3).len(), 1);
    }

    #[test]
    fn single_vertex() {
        let (matrix, _) = weighted_storages_from(
            GraphKind::UndirectedWeighted,
            ["x"],
            Vec::<(&str, &str, i64)>::new(),
        );
        assert!(matrix.minimum_spanning_tree(0).is_empty());
    }

    /// Reference weight computed by Kruskal's algorithm
    fn kruskal_weight(n: u32, arcs: &[(u32, u32, i64)]) -> i64 {
        // later duplicates overwrite earlier ones in the storages
        let mut latest = std::collections::BTreeMap::new();
        for &(u, v, w) in arcs {
            latest.insert((u.min(v), u.max(v)), w);
        }

        let mut parent = (0..n).collect_vec();
        fn find(parent: &mut [u32], u: u32) -> u32 {
            let p = parent[u as usize];
            if p == u {
                return u;
            }
            let root = find(parent, p);
            parent[u as usize] = root;
            root
        }

        let mut weight = 0;
        for ((u, v), w) in latest.into_iter().sorted_by_key(|&(_, w)| w) {
            let (ru, rv) = (find(&mut parent, u), find(&mut parent, v));
            if ru != rv {
                parent[ru as usize] = rv;
                weight += w;
            }
        }
        weight
    }

    #[test]
    fn agrees_with_kruskal() {
        let rng = &mut Pcg64Mcg::seed_from_u64(19);

        for n in [2u32, 7, 30] {
            for _ in 0..5 {
                // a random path keeps the graph connected
                let mut arcs = (1..n)
                    .map(|u| (u - 1, u, rng.random_range(1..100i64)))
                    .collect_vec();
                arcs.extend(random_weighted_arcs(rng, n, 2 * n, 100));

                let (matrix, list) =
                    weighted_storages_from(GraphKind::UndirectedWeighted, 0..n, arcs.clone());
                let expected = kruskal_weight(n, &arcs);

                for root in [0, n - 1] {
                    let tree = matrix.minimum_spanning_tree(root);
                    assert_eq!(tree.len() as u32, n - 1);
                    assert_eq!(total(&tree), expected);
                    assert_eq!(total(&list.minimum_spanning_tree(root)), expected);

                    for arc in &tree {
                        let Edge(u, v) = arc.edge();
                        assert_eq!(matrix.weight_of(u, v), Some(arc.weight));
                    }
                }
            }
        }
    }
}
