/*!
# Graph Algorithms

This module provides a suite of **graph algorithms** built on top of the graph representations in this crate.
All algorithms are re-exported at the top level of this module, so you can simply do:
```rust
use arcgraphs::algo::*;
```
and gain access to traversal, spanning forests, articulation points, shortest paths,
minimum spanning trees, path queries and DAG analysis.
Algorithms are provided as traits implemented on every storage; where sensible, results are
produced lazily as **iterators**.

Algorithms only ever read the graph. Bookkeeping (visited sets, low-links, distances) lives in
per-call state that is sized to the vertex count at call time.
*/

mod articulation;
mod dag;
mod forest;
mod mst;
mod paths;
mod shortest_path;
mod transitivity;
pub mod traversal;

use crate::{error::Result, prelude::*};

pub use articulation::*;
pub use dag::*;
pub use forest::*;
pub use mst::*;
pub use paths::*;
pub use shortest_path::*;
pub use transitivity::*;
pub use traversal::*;
