/// Stamps the storage contract tests onto a representation `$graph<L, W, I>`.
/// Every representation should at least be tested against `GraphVertexEditing`, `GraphArcEditing`
/// and `AdjacencyList`.
macro_rules! test_graph_ops {
    ($env:ident, $graph:ident, ($($trait:ident),*)) => {
        #[cfg(test)]
        mod $env {
            use crate::{prelude::*, testing::test_graph_ops};
            use itertools::Itertools;
            use rand::{Rng, SeedableRng};
            use rand_pcg::Pcg64Mcg;
            use std::collections::{BTreeMap, BTreeSet};

            type G = $graph<u32, i64, u32>;

            const KINDS: [GraphKind; 4] = [
                GraphKind::DirectedUnweighted,
                GraphKind::DirectedWeighted,
                GraphKind::UndirectedUnweighted,
                GraphKind::UndirectedWeighted,
            ];

            /// Labels are offset from positions so that mixing them up is noticed
            const LABEL_OFFSET: u32 = 100;

            type ArcModel = BTreeMap<(u32, u32), (i64, Option<u32>)>;

            fn model_key(kind: GraphKind, from: u32, to: u32) -> (u32, u32) {
                if kind.is_undirected() {
                    (from.min(to), from.max(to))
                } else {
                    (from, to)
                }
            }

            /// Adds a random arc to both the graph and the model and checks the reported existence
            fn add_random_arc<R: Rng>(rng: &mut R, graph: &mut G, model: &mut ArcModel, n: u32) {
                let kind = graph.kind();
                let from = LABEL_OFFSET + rng.random_range(0..n);
                let to = LABEL_OFFSET + rng.random_range(0..n);
                let weight = rng.random_range(1..100i64);
                let info = rng.random_bool(0.5).then(|| rng.random_range(0..10u32));

                let existed = graph.add_arc_with(&from, &to, Some(weight), info).unwrap();
                let stored = if kind.is_weighted() { weight } else { 1 };
                let before = model.insert(model_key(kind, from, to), (stored, info));

                assert_eq!(existed, before.is_some());
            }

            /// Checks every cell of the graph against the model
            fn assert_matches_model(graph: &G, model: &ArcModel) {
                let kind = graph.kind();
                assert_eq!(graph.number_of_arcs() as usize, model.len());

                for u in graph.vertices() {
                    for v in graph.vertices() {
                        let key = model_key(kind, *graph.label_of(u), *graph.label_of(v));
                        assert_eq!(
                            graph.arc(u, v).map(|a| (a.weight, a.info)),
                            model.get(&key).copied(),
                            "{kind} arc ({u},{v})"
                        );

                        if kind.is_undirected() {
                            assert_eq!(graph.arc(u, v), graph.arc(v, u));
                        }
                    }
                }
            }

            fn random_graph<R: Rng>(rng: &mut R, kind: GraphKind, n: u32, m: u32) -> (G, ArcModel) {
                let mut graph = G::new(kind);
                graph
                    .add_vertices((0..n).map(|i| LABEL_OFFSET + i))
                    .unwrap();

                let mut model = ArcModel::new();
                for _ in 0..m {
                    add_random_arc(rng, &mut graph, &mut model, n);
                }
                (graph, model)
            }

            $(
                test_graph_ops!($graph: $trait);
            )*
        }
    };
    ($graph:ident: GraphVertexEditing) => {
        #[test]
        fn test_vertex_editing() {
            let rng = &mut Pcg64Mcg::seed_from_u64(3);

            for kind in KINDS {
                let mut graph = G::new(kind);
                let mut present = BTreeSet::new();

                for _ in 0..500 {
                    let label = rng.random_range(0..40u32);

                    if rng.random_bool(0.6) {
                        let res = graph.add_vertex(label);
                        if present.insert(label) {
                            assert_eq!(res, Ok(graph.number_of_nodes() - 1));
                        } else {
                            assert_eq!(res, Err(GraphError::DuplicateVertex(format!("{label:?}"))));
                        }
                    } else {
                        assert_eq!(graph.delete_vertex(&label), present.remove(&label));
                    }

                    assert_eq!(graph.len(), present.len());
                    assert_eq!(
                        graph.labels().copied().sorted().collect_vec(),
                        present.iter().copied().collect_vec()
                    );
                    for u in graph.vertices() {
                        assert_eq!(graph.locate(graph.label_of(u)), Some(u));
                    }
                }
            }
        }
    };
    ($graph:ident: GraphArcEditing) => {
        #[test]
        fn test_arc_editing() {
            let rng = &mut Pcg64Mcg::seed_from_u64(3);

            for kind in KINDS {
                for n in [5u32, 12, 25] {
                    let (mut graph, mut model) = random_graph(rng, kind, n, 2 * n);
                    assert_matches_model(&graph, &model);

                    for _ in 0..(10 * n) {
                        let choice = rng.random_range(0..10);
                        if choice < 6 {
                            add_random_arc(rng, &mut graph, &mut model, n);
                        } else if choice < 9 {
                            let from = LABEL_OFFSET + rng.random_range(0..n);
                            let to = LABEL_OFFSET + rng.random_range(0..n);
                            let removed = model.remove(&model_key(kind, from, to)).is_some();
                            assert_eq!(graph.delete_arc(&from, &to), Ok(removed));
                        } else {
                            // delete a vertex with all its arcs and bring it back isolated
                            let label = LABEL_OFFSET + rng.random_range(0..n);
                            model.retain(|&(a, b), _| a != label && b != label);
                            assert!(graph.delete_vertex(&label));
                            assert!(graph.add_vertex(label).is_ok());
                        }

                        assert_eq!(graph.number_of_arcs() as usize, model.len());
                    }

                    assert_matches_model(&graph, &model);
                }
            }
        }

        #[test]
        fn test_arc_editing_errors() {
            for kind in KINDS {
                let mut graph = G::new(kind);
                graph.add_vertices([1, 2]).unwrap();

                assert_eq!(
                    graph.add_arc(&1, &7),
                    Err(GraphError::UnknownVertex("7".into()))
                );
                assert_eq!(
                    graph.delete_arc(&9, &1),
                    Err(GraphError::UnknownVertex("9".into()))
                );
                assert_eq!(graph.try_locate(&3), Err(GraphError::UnknownVertex("3".into())));

                if kind.is_weighted() {
                    assert_eq!(
                        graph.add_arc(&1, &2),
                        Err(GraphError::MissingWeight("(1,2)".into()))
                    );
                    assert!(graph.has_no_arcs());
                } else {
                    assert_eq!(graph.add_arc(&1, &2), Ok(false));
                    assert_eq!(graph.weight_of(0, 1), Some(1));
                    assert_eq!(graph.number_of_arcs(), 1);
                }
            }
        }
    };
    ($graph:ident: AdjacencyList) => {
        #[test]
        fn test_adjacency_list() {
            let rng = &mut Pcg64Mcg::seed_from_u64(5);

            for kind in KINDS {
                for n in [1u32, 10, 30] {
                    let (graph, _) = random_graph(rng, kind, n, 3 * n);

                    let mut in_degs = vec![0; n as usize];
                    let mut degree_sum = 0;
                    for u in graph.vertices() {
                        let nbs = graph.neighbors_of(u).collect_vec();

                        assert_eq!(NeighborWalk::new(&graph, u).collect_vec(), nbs);
                        let walked = std::iter::successors(graph.first_cursor(u), |&c| {
                            graph.next_cursor(u, c)
                        })
                        .map(|c| c.node)
                        .collect_vec();
                        assert_eq!(walked, nbs);
                        assert_eq!(graph.first_neighbor(u), nbs.first().copied());
                        for (&a, &b) in nbs.iter().tuple_windows() {
                            assert_eq!(graph.next_neighbor(u, a), Some(b));
                        }
                        assert_eq!(
                            graph.weighted_neighbors_of(u).map(|(v, _)| v).collect_vec(),
                            nbs
                        );
                        assert_eq!(graph.degree_of(u) as usize, nbs.len());
                        assert_eq!(graph.is_sink(u), nbs.is_empty());
                        assert!(nbs.iter().all_unique());

                        for v in graph.vertices() {
                            assert_eq!(graph.has_arc(u, v), nbs.contains(&v));
                        }
                        for &v in &nbs {
                            in_degs[v as usize] += 1;
                        }
                        degree_sum += nbs.len();
                    }

                    assert_eq!(graph.in_degrees(), in_degs);
                    assert_eq!(graph.edges(false).count(), degree_sum);
                    assert_eq!(graph.arcs().count(), degree_sum);

                    let loops = graph.vertices().filter(|&u| graph.has_arc(u, u)).count();
                    let m = graph.number_of_arcs() as usize;
                    if kind.is_undirected() {
                        assert_eq!(degree_sum, 2 * m - loops);
                        assert_eq!(graph.edges(true).count(), m);
                    } else {
                        assert_eq!(degree_sum, m);
                    }
                }
            }
        }
    };
}

pub(crate) use test_graph_ops;

/// Fixtures shared by the algorithm tests
#[cfg(test)]
mod fixtures {
    use crate::prelude::*;
    use rand::Rng;
    use std::fmt::Debug;

    /// Builds the same graph in both representations
    pub(crate) fn storages_from<L: PartialEq + Clone + Debug>(
        kind: GraphKind,
        vertices: impl IntoIterator<Item = L>,
        arcs: impl IntoIterator<Item = (L, L)>,
    ) -> (MatrixGraph<L>, ListGraph<L>) {
        let vertices: Vec<L> = vertices.into_iter().collect();
        let arcs: Vec<(L, L)> = arcs.into_iter().collect();
        (
            MatrixGraph::from_arcs(kind, vertices.clone(), arcs.clone()).unwrap(),
            ListGraph::from_arcs(kind, vertices, arcs).unwrap(),
        )
    }

    /// Builds the same weighted graph in both representations
    pub(crate) fn weighted_storages_from<L: PartialEq + Clone + Debug>(
        kind: GraphKind,
        vertices: impl IntoIterator<Item = L>,
        arcs: impl IntoIterator<Item = (L, L, i64)>,
    ) -> (MatrixGraph<L>, ListGraph<L>) {
        let vertices: Vec<L> = vertices.into_iter().collect();
        let arcs: Vec<(L, L, i64)> = arcs.into_iter().collect();
        (
            MatrixGraph::from_weighted_arcs(kind, vertices.clone(), arcs.clone()).unwrap(),
            ListGraph::from_weighted_arcs(kind, vertices, arcs).unwrap(),
        )
    }

    /// Creates a list of `m` random arcs for vertices labelled `0..n` (may contain loops and duplicates)
    pub(crate) fn random_arcs<R: Rng>(rng: &mut R, n: u32, m: u32) -> Vec<(u32, u32)> {
        (0..m)
            .map(|_| (rng.random_range(0..n), rng.random_range(0..n)))
            .collect()
    }

    /// Same as [`random_arcs`] with random weights in `1..max_weight`
    pub(crate) fn random_weighted_arcs<R: Rng>(
        rng: &mut R,
        n: u32,
        m: u32,
        max_weight: i64,
    ) -> Vec<(u32, u32, i64)> {
        (0..m)
            .map(|_| {
                (
                    rng.random_range(0..n),
                    rng.random_range(0..n),
                    rng.random_range(1..max_weight),
                )
            })
            .collect()
    }
}

#[cfg(test)]
pub(crate) use fixtures::*;
