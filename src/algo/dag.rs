/*!
# Analysis of Directed Acyclic Graphs

- [`TopologicalSort`] orders the vertices with Kahn's algorithm and reports cycles as
  [`GraphError::CycleDetected`].
- [`CriticalPathAnalysis`] treats a weighted DAG as an *activity-on-edge* network: vertices are
  events, arcs are activities whose weight is their duration. It computes the earliest and latest
  time of every event and flags the activities without slack.
- [`DagStructure`] finds the roots of a DAG and a longest path measured in arcs.
*/

use super::*;
use tracing::{debug, trace};

/// Topological ordering of directed graphs
pub trait TopologicalSort: AdjacencyList + GraphType {
    /// Returns all vertices in an order in which every arc points forward.
    ///
    /// Fails with [`GraphError::CycleDetected`] if the graph contains a cycle; a partial order
    /// is never returned. Fails with [`GraphError::WrongGraphKind`] on undirected graphs.
    ///
    /// # Examples
    /// ```
    /// use arcgraphs::{prelude::*, algo::*};
    ///
    /// let g = MatrixGraph::<&str>::from_arcs(
    ///     GraphKind::DirectedUnweighted,
    ///     ["shoes", "socks", "pants"],
    ///     [("socks", "shoes"), ("pants", "shoes")],
    /// ).unwrap();
    ///
    /// let order = g.topological_order().unwrap();
    /// assert_eq!(g.labels_of(&order).last(), Some(&"shoes"));
    /// ```
    fn topological_order(&self) -> Result<Vec<Node>>;

    /// Returns *true* if the graph contains no directed cycle.
    /// Fails with [`GraphError::WrongGraphKind`] on undirected graphs.
    fn is_acyclic(&self) -> Result<bool> {
        match self.topological_order() {
            Ok(_) => Ok(true),
            Err(GraphError::CycleDetected { .. }) => Ok(false),
            Err(err) => Err(err),
        }
    }
}

impl<G> TopologicalSort for G
where
    G: AdjacencyList + GraphType,
{
    fn topological_order(&self) -> Result<Vec<Node>> {
        GraphError::expect_directed(self.kind())?;

        let order: Vec<Node> = TopoSearch::new(self).collect();
        if order.len() < self.len() {
            debug!(
                ordered = order.len(),
                total = self.len(),
                "topological sort blocked by a cycle"
            );
            return Err(GraphError::CycleDetected {
                ordered: order.len(),
                total: self.len(),
            });
        }

        Ok(order)
    }
}

/// Event times and activity slacks of an activity-on-edge network
#[derive(Debug, Clone, PartialEq)]
pub struct CriticalPath<W> {
    order: Vec<Node>,
    earliest: Vec<W>,
    latest: Vec<W>,
    // every arc with its slack, sorted by arc
    slacks: Vec<(Edge, W)>,
    duration: W,
}

impl<W: Weight> CriticalPath<W> {
    /// Returns the topological order in which the event times were computed
    pub fn order(&self) -> &[Node] {
        &self.order
    }

    /// Returns the earliest time of every event
    pub fn earliest(&self) -> &[W] {
        &self.earliest
    }

    /// Returns the latest time of every event that does not delay the project
    pub fn latest(&self) -> &[W] {
        &self.latest
    }

    /// Returns the length of the project, i.e. the largest earliest event time
    pub fn duration(&self) -> W {
        self.duration
    }

    /// Returns all activities without slack in ascending order
    pub fn critical_arcs(&self) -> Vec<Edge> {
        self.slacks
            .iter()
            .filter(|(_, slack)| slack.is_zero())
            .map(|&(arc, _)| arc)
            .collect()
    }

    /// Returns by how much the activity `(u, v)` can be delayed without delaying the project,
    /// or `None` if there is no such arc
    pub fn slack_of(&self, u: Node, v: Node) -> Option<W> {
        self.slacks
            .binary_search_by_key(&Edge(u, v), |&(arc, _)| arc)
            .ok()
            .map(|i| self.slacks[i].1)
    }
}

/// Critical path analysis of activity-on-edge networks
pub trait CriticalPathAnalysis: WeightedAdjacency + GraphType {
    /// Computes earliest and latest event times in topological order and the slack of every
    /// activity. An activity `(i, j)` is critical iff `earliest[i] + w(i, j) == latest[j]`.
    ///
    /// Propagates the errors of [`TopologicalSort::topological_order`].
    /// Durations are expected to be non-negative.
    ///
    /// # Examples
    /// ```
    /// use arcgraphs::{prelude::*, algo::*};
    ///
    /// let g = ListGraph::<u32>::from_weighted_arcs(
    ///     GraphKind::DirectedWeighted,
    ///     0..4,
    ///     [(0, 1, 2), (0, 2, 5), (1, 3, 2), (2, 3, 1)],
    /// ).unwrap();
    ///
    /// let analysis = g.critical_path().unwrap();
    /// assert_eq!(analysis.duration(), 6);
    /// assert_eq!(analysis.critical_arcs(), vec![Edge(0, 2), Edge(2, 3)]);
    /// assert_eq!(analysis.slack_of(0, 1), Some(2));
    /// ```
    fn critical_path(&self) -> Result<CriticalPath<Self::Weight>>;
}

impl<G> CriticalPathAnalysis for G
where
    G: WeightedAdjacency + GraphType,
{
    fn critical_path(&self) -> Result<CriticalPath<Self::Weight>> {
        let order = self.topological_order()?;

        let mut earliest = vec![G::Weight::zero(); self.len()];
        for &u in &order {
            for (v, w) in self.weighted_neighbors_of(u) {
                let candidate = earliest[u as usize] + w;
                if candidate > earliest[v as usize] {
                    earliest[v as usize] = candidate;
                }
            }
        }

        let duration = earliest
            .iter()
            .copied()
            .fold(G::Weight::zero(), |max, t| if t > max { t } else { max });

        let mut latest = vec![duration; self.len()];
        for &u in order.iter().rev() {
            for (v, w) in self.weighted_neighbors_of(u) {
                let candidate = latest[v as usize] - w;
                if candidate < latest[u as usize] {
                    latest[u as usize] = candidate;
                }
            }
        }

        let mut slacks: Vec<(Edge, G::Weight)> = self
            .weighted_edges()
            .map(|(Edge(u, v), w)| (Edge(u, v), latest[v as usize] - w - earliest[u as usize]))
            .collect();
        slacks.sort_unstable_by_key(|&(arc, _)| arc);

        trace!(?duration, activities = slacks.len(), "critical path analysis complete");

        Ok(CriticalPath {
            order,
            earliest,
            latest,
            slacks,
            duration,
        })
    }
}

/// Structural queries on directed acyclic graphs
pub trait DagStructure: Traversal {
    /// Returns all vertices from which every vertex can be reached, in ascending order.
    ///
    /// Runs a full depth-first search from every vertex.
    fn dag_roots(&self) -> Vec<Node> {
        self.vertices()
            .filter(|&u| self.dfs(u).count() == self.len())
            .collect()
    }

    /// Returns a path with the maximum number of arcs that starts at a vertex without
    /// in-arcs and ends at a vertex without out-arcs. On ties the path found first wins.
    ///
    /// Meant for DAGs; on other graphs only simple paths are considered.
    /// The search enumerates all such paths and may take exponential time.
    ///
    /// # Examples
    /// ```
    /// use arcgraphs::{prelude::*, algo::*};
    ///
    /// let g = MatrixGraph::<u32>::from_arcs(
    ///     GraphKind::DirectedUnweighted,
    ///     0..4,
    ///     [(0, 3), (0, 1), (1, 2), (2, 3)],
    /// ).unwrap();
    /// assert_eq!(g.longest_path(), vec![0, 1, 2, 3]);
    /// ```
    fn longest_path(&self) -> Vec<Node> {
        let mut search = LongestPathSearch {
            graph: self,
            on_path: self.vertex_bitset_unset(),
            path: Vec::new(),
            longest: Vec::new(),
        };

        for u in self.sources() {
            search.explore(u);
        }

        search.longest
    }
}

impl<G: Traversal> DagStructure for G {}

struct LongestPathSearch<'a, G> {
    graph: &'a G,
    on_path: NodeBitSet,
    path: Vec<Node>,
    longest: Vec<Node>,
}

impl<G: AdjacencyList> LongestPathSearch<'_, G> {
    fn explore(&mut self, u: Node) {
        self.on_path.set_bit(u);
        self.path.push(u);

        if self.graph.is_sink(u) {
            if self.path.len() > self.longest.len() {
                self.longest.clone_from(&self.path);
            }
        } else {
            let mut next = self.graph.first_cursor(u);
            while let Some(cursor) = next {
                if !self.on_path.get_bit(cursor.node) {
                    self.explore(cursor.node);
                }
                next = self.graph.next_cursor(u, cursor);
            }
        }

        self.path.pop();
        self.on_path.clear_bit(u);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{
        random_arcs, random_weighted_arcs, storages_from, weighted_storages_from,
    };
    use itertools::Itertools;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    fn assert_topological<G: AdjacencyList>(graph: &G, order: &[Node]) {
        assert_eq!(order.len(), graph.len());
        let mut rank = vec![0; graph.len()];
        for (i, &u) in order.iter().enumerate() {
            rank[u as usize] = i;
        }
        for Edge(u, v) in graph.edges(false) {
            assert!(rank[u as usize] < rank[v as usize], "{u} -> {v}");
        }
    }

    #[test]
    fn six_vertex_order() {
        let (matrix, list) = storages_from(
            GraphKind::DirectedUnweighted,
            ["v1", "v2", "v3", "v4", "v5", "v6"],
            [
                ("v1", "v2"),
                ("v1", "v4"),
                ("v1", "v3"),
                ("v3", "v2"),
                ("v3", "v5"),
                ("v6", "v4"),
                ("v4", "v5"),
                ("v6", "v5"),
            ],
        );

        let order = matrix.topological_order().unwrap();
        assert_eq!(
            matrix.labels_of(&order),
            vec!["v6", "v1", "v4", "v3", "v5", "v2"]
        );
        assert_topological(&matrix, &order);
        assert_topological(&list, &list.topological_order().unwrap());

        assert!(matrix.is_acyclic().unwrap());
        assert!(list.dag_roots().is_empty());
    }

    #[test]
    fn cycles_are_reported() {
        let (matrix, list) =
            storages_from(GraphKind::DirectedUnweighted, 0..5, [(0, 1), (1, 2), (2, 3), (3, 1), (3, 4)]);

        let expected = Err(GraphError::CycleDetected {
            ordered: 1,
            total: 5,
        });
        assert_eq!(matrix.topological_order(), expected);
        assert_eq!(list.topological_order(), expected);
        assert!(!list.is_acyclic().unwrap());
        assert_eq!(
            matrix.critical_path().unwrap_err(),
            GraphError::CycleDetected {
                ordered: 1,
                total: 5
            }
        );
    }

    #[test]
    fn undirected_graphs_are_rejected() {
        let (matrix, list) = storages_from(GraphKind::UndirectedUnweighted, 0..2, [(0, 1)]);
        let expected = GraphError::WrongGraphKind {
            expected: "directed",
            found: GraphKind::UndirectedUnweighted,
        };

        assert_eq!(matrix.topological_order().unwrap_err(), expected);
        assert_eq!(list.is_acyclic().unwrap_err(), expected);
        assert_eq!(list.critical_path().unwrap_err(), expected);
    }

    #[test]
    fn random_orders_respect_arcs() {
        let rng = &mut Pcg64Mcg::seed_from_u64(29);

        for n in [1u32, 10, 50] {
            // only forward arcs keep the graph acyclic
            let arcs = random_arcs(rng, n, 3 * n)
                .into_iter()
                .filter(|&(u, v)| u != v)
                .map(|(u, v)| (u.min(v), u.max(v)))
                .collect_vec();
            let (matrix, list) = storages_from(GraphKind::DirectedUnweighted, 0..n, arcs);

            assert_topological(&matrix, &matrix.topological_order().unwrap());
            assert_topological(&list, &list.topological_order().unwrap());
            assert_eq!(list.topo_search().collect_vec(), list.topological_order().unwrap());
        }
    }

    #[test]
    fn repeated_analyses_agree() {
        let rng = &mut Pcg64Mcg::seed_from_u64(43);

        for n in [1u32, 12, 40] {
            let arcs = random_weighted_arcs(rng, n, 3 * n, 20)
                .into_iter()
                .filter(|&(u, v, _)| u != v)
                .map(|(u, v, w)| (u.min(v), u.max(v), w))
                .collect_vec();
            let (matrix, list) = weighted_storages_from(GraphKind::DirectedWeighted, 0..n, arcs);

            assert_eq!(matrix.topological_order(), matrix.topological_order());
            assert_eq!(list.topological_order(), list.topological_order());
            assert_eq!(matrix.critical_path(), matrix.critical_path());
            assert_eq!(list.critical_path(), list.critical_path());
        }
    }

    fn activity_network() -> (MatrixGraph<u32>, ListGraph<u32>) {
        weighted_storages_from(
            GraphKind::DirectedWeighted,
            0..9,
            [
                (0, 1, 3),
                (0, 2, 10),
                (1, 4, 13),
                (2, 4, 12),
                (1, 3, 9),
                (2, 5, 7),
                (4, 7, 6),
                (3, 7, 4),
                (5, 7, 11),
                (3, 6, 8),
                (7, 8, 5),
                (6, 8, 2),
            ],
        )
    }

    #[test]
    fn nine_event_network() {
        let (mut matrix, mut list) = activity_network();

        for analysis in [matrix.critical_path().unwrap(), list.critical_path().unwrap()] {
            assert_eq!(analysis.earliest(), &[0, 3, 10, 12, 22, 17, 20, 28, 33]);
            assert_eq!(analysis.latest(), &[0, 9, 10, 23, 22, 17, 31, 28, 33]);
            assert_eq!(analysis.duration(), 33);
            assert_eq!(
                analysis.critical_arcs(),
                vec![Edge(0, 2), Edge(2, 4), Edge(2, 5), Edge(4, 7), Edge(5, 7), Edge(7, 8)]
            );
            assert_eq!(analysis.order().len(), 9);

            assert_eq!(analysis.slack_of(0, 1), Some(6));
            assert_eq!(analysis.slack_of(1, 4), Some(6));
            assert_eq!(analysis.slack_of(3, 6), Some(11));
            assert_eq!(analysis.slack_of(2, 4), Some(0));
            assert_eq!(analysis.slack_of(1, 0), None);
        }

        // closing the network into a cycle leaves no event without predecessor
        matrix.add_weighted_arc(&8, &0, 1).unwrap();
        list.add_weighted_arc(&8, &0, 1).unwrap();
        let cycle = GraphError::CycleDetected {
            ordered: 0,
            total: 9,
        };
        assert_eq!(matrix.critical_path().unwrap_err(), cycle);
        assert_eq!(list.critical_path().unwrap_err(), cycle);
        assert_eq!(list.is_acyclic(), Ok(false));
    }

    #[test]
    fn unweighted_network_counts_arcs() {
        let (matrix, _) = storages_from(
            GraphKind::DirectedUnweighted,
            0..4,
            [(0, 1), (1, 2), (0, 3), (3, 2)],
        );
        let analysis = matrix.critical_path().unwrap();
        assert_eq!(analysis.duration(), 2);
        assert_eq!(analysis.critical_arcs().len(), 4);
    }

    #[test]
    fn roots() {
        let (matrix, list) = storages_from(
            GraphKind::DirectedUnweighted,
            0..6,
            [(0, 1), (0, 2), (1, 3), (2, 3), (3, 4), (1, 2), (5, 0)],
        );
        assert_eq!(matrix.dag_roots(), vec![5]);
        assert_eq!(list.dag_roots(), vec![5]);

        let (matrix, _) = storages_from(GraphKind::UndirectedUnweighted, 0..3, [(0, 1), (1, 2)]);
        assert_eq!(matrix.dag_roots(), vec![0, 1, 2]);
    }

    #[test]
    fn longest_paths() {
        let (matrix, list) = storages_from(
            GraphKind::DirectedUnweighted,
            0..6,
            [(0, 1), (0, 2), (1, 3), (2, 3), (3, 4), (1, 2), (5, 0)],
        );
        assert_eq!(matrix.longest_path(), vec![5, 0, 1, 2, 3, 4]);
        assert_eq!(list.longest_path(), vec![5, 0, 1, 2, 3, 4]);

        let (matrix, list) = activity_network();
        for path in [matrix.longest_path(), list.longest_path()] {
            assert_eq!(path.len(), 5);
            assert_eq!(path.first(), Some(&0));
            assert_eq!(path.last(), Some(&8));
            assert!(path.iter().tuple_windows().all(|(&u, &v)| matrix.has_arc(u, v)));
        }

        let (isolated, _) =
            storages_from(GraphKind::DirectedUnweighted, 0..3, Vec::<(u32, u32)>::new());
        assert_eq!(isolated.longest_path(), vec![0]);
    }
}
