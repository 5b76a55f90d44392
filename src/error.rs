/*!
# Errors

All fallible operations of this crate return [`Result`] with a [`GraphError`].

Structural errors (unknown or duplicate vertices, wrong graph kind, missing weights) are
caller mistakes and are reported immediately; nothing is retried.
[`GraphError::CycleDetected`] on the other hand is a regular outcome of topological
analysis that callers are expected to handle.
*/

use std::fmt::Debug;

use thiserror::Error;

use crate::kind::GraphKind;

/// Errors raised by graph storages and algorithms.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// An operation referenced a vertex label that is not part of the graph.
    #[error("vertex {0} does not exist")]
    UnknownVertex(String),

    /// A vertex with this label already exists.
    #[error("vertex {0} already exists")]
    DuplicateVertex(String),

    /// The operation is only defined for another kind of graph.
    #[error("operation requires a {expected} graph, but the graph is {found}")]
    WrongGraphKind {
        /// Description of the accepted kinds
        expected: &'static str,
        /// Kind of the graph the operation was invoked on
        found: GraphKind,
    },

    /// The graph contains a directed cycle, so no topological order exists.
    #[error("graph contains a cycle: only {ordered} of {total} vertices could be ordered")]
    CycleDetected {
        /// Number of vertices that were ordered before the search got stuck
        ordered: usize,
        /// Number of vertices in the graph
        total: usize,
    },

    /// An arc was added to a weighted graph without a weight.
    #[error("arc {0} needs an explicit weight in a weighted graph")]
    MissingWeight(String),
}

impl GraphError {
    pub(crate) fn unknown_vertex<L: Debug>(label: &L) -> Self {
        Self::UnknownVertex(format!("{label:?}"))
    }

    pub(crate) fn duplicate_vertex<L: Debug>(label: &L) -> Self {
        Self::DuplicateVertex(format!("{label:?}"))
    }

    pub(crate) fn missing_weight<L: Debug>(from: &L, to: &L) -> Self {
        Self::MissingWeight(format!("({from:?},{to:?})"))
    }

    /// Fails with [`GraphError::WrongGraphKind`] unless `kind` is directed
    pub(crate) fn expect_directed(kind: GraphKind) -> Result<()> {
        if kind.is_directed() {
            Ok(())
        } else {
            Err(Self::WrongGraphKind {
                expected: "directed",
                found: kind,
            })
        }
    }

    /// Fails with [`GraphError::WrongGraphKind`] unless `kind` is undirected
    pub(crate) fn expect_undirected(kind: GraphKind) -> Result<()> {
        if kind.is_undirected() {
            Ok(())
        } else {
            Err(Self::WrongGraphKind {
                expected: "undirected",
                found: kind,
            })
        }
    }
}

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, GraphError>;
