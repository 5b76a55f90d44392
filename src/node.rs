/*!
# Node Representation

Vertices are addressed by their position `0..n` in the dense vertex list of a storage.
We choose `Node = u32` as textbook-sized and most practical graphs stay far below `2^32` vertices.

Note that positions are **not** stable: deleting a vertex moves the last vertex into the freed slot.
Labels (see [`Labelled`](crate::ops::Labelled)) are the stable identity of a vertex.
*/

use std::num::NonZero;
use stream_bitset::bitset::BitSetImpl;

/// Nodes can be any unsigned integer from `0` to `Node::MAX - 1`
pub type Node = u32;

/// Node-Value that is considered invalid
pub const INVALID_NODE: Node = Node::MAX;

/// There can be at most `2^32 - 1` nodes in a graph!
pub type NumNodes = Node;

/// BitSet for Nodes
pub type NodeBitSet = BitSetImpl<Node>;

/// As `Option<Node>` uses additional bytes for padding, it can be inefficient
/// since we often need to use `Vec<Option<Node>>`. This instead uses the
/// `NonZero`-Wrapper to assign a constant value as niche.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct OptionalNodeImpl<const N: Node>(NonZero<Node>);

/// Often, `INVALID_NODE` is safe to pick as the `None`-Value
pub type OptionalNode = OptionalNodeImpl<INVALID_NODE>;

impl<const N: Node> OptionalNodeImpl<N> {
    /// Returns `Some(OptionalNodeImpl)` if `n != N` and `None` otherwise
    pub const fn new(n: Node) -> Option<Self> {
        match NonZero::new(n ^ N) {
            Some(inner) => Some(OptionalNodeImpl(inner)),
            None => None,
        }
    }

    /// Gets the underlying Node-Value
    pub const fn get(&self) -> Node {
        self.0.get() ^ N
    }
}

/// Shorthand to pack a node into its niche-optimized optional form.
/// ** Panics if `u == INVALID_NODE` **
#[inline]
pub(crate) fn some_node(u: Node) -> Option<OptionalNode> {
    let packed = OptionalNode::new(u);
    assert!(packed.is_some(), "INVALID_NODE cannot be stored");
    packed
}
