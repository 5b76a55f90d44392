use super::*;

/// Checks whether the arc relation of a directed graph is transitive
pub trait Transitivity: WeightedAdjacency + GraphType {
    /// Returns *true* iff for all arcs `(x, y)` and `(y, z)` with `z != x` the arc `(x, z)`
    /// exists as well. Fails with [`GraphError::WrongGraphKind`] on undirected graphs.
    ///
    /// # Examples
    /// ```
    /// use arcgraphs::{prelude::*, algo::*};
    ///
    /// let mut g = ListGraph::<u32>::from_arcs(GraphKind::DirectedUnweighted, 0..3, [(0, 1), (1, 2)]).unwrap();
    /// assert!(!g.is_transitive().unwrap());
    ///
    /// g.add_arc(&0, &2).unwrap();
    /// assert!(g.is_transitive().unwrap());
    /// ```
    fn is_transitive(&self) -> Result<bool>;
}

impl<G> Transitivity for G
where
    G: WeightedAdjacency + GraphType,
{
    fn is_transitive(&self) -> Result<bool> {
        GraphError::expect_directed(self.kind())?;

        Ok(self.edges(false).all(|Edge(x, y)| {
            self.neighbors_of(y)
                .all(|z| z == x || self.has_arc(x, z))
        }))
    }
}
