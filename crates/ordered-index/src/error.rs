use thiserror::Error;

/// A broken red-black or binary-search-tree invariant.
///
/// These never surface from a correct tree; they exist so that
/// [`assert_red_black_tree`](crate::red_black::assert_red_black_tree) can say
/// precisely what went wrong and where.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvariantError {
    #[error("root {node} has a parent")]
    RootHasParent { node: u32 },
    #[error("root {node} is not black")]
    RedRoot { node: u32 },
    #[error("red node {node} has a red child {child}")]
    RedRedViolation { node: u32, child: u32 },
    #[error("black height mismatch under node {node}: left {left}, right {right}")]
    BlackHeightMismatch { node: u32, left: usize, right: usize },
    #[error("child {child} of node {node} points at parent {found:?}")]
    BrokenParentLink {
        node: u32,
        child: u32,
        found: Option<u32>,
    },
    #[error("node {node} is out of order with its predecessor {prev}")]
    OrderViolated { node: u32, prev: u32 },
    #[error("node {node} has zero frequency")]
    ZeroFrequency { node: u32 },
    #[error("{reachable} of {total} arena nodes are reachable from the root")]
    UnreachableNodes { reachable: usize, total: usize },
}
