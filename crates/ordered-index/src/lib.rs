//! Arena-based red-black tree used as an in-memory ordered index.
//!
//! Each distinct value owns one node; repeated insertions only bump that
//! node's frequency. Nodes sit in a `Vec` arena and refer to each other by
//! `Option<u32>` index, so the parent back-reference is plain data and a
//! rotation is a handful of index writes.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! [`types`] | [`Node`] / [`ValueNode`] link traits and [`Color`] |
//! [`util`] | `first`, `last`, `next`, `find`, `height`, in-order walk |
//! [`red_black`] | rotations, insert/remove fix-ups, invariant checker, printers |
//! [`ordered_index`] | [`OrderedIndex`], the public tree |
//! [`cli`] | input loading and reporting behind the `rbtree` binary |

pub mod cli;
pub mod error;
pub mod ordered_index;
pub mod red_black;
pub mod types;
pub mod util;

pub use error::InvariantError;
pub use ordered_index::{Iter, OrderedIndex, Values};
pub use types::{Color, Node, ValueNode};
