//! Red-black tree primitives over an index arena.
//!
//! [`util`] holds rotations, insert/remove with their fix-up passes, arena
//! compaction and the invariant checker; [`print`] holds the serializers.

pub mod print;
pub mod types;
pub mod util;

pub use print::{print, write_prefix};
pub use types::{RbNode, RbNodeLike};
pub use util::{
    assert_red_black_tree, insert_left, insert_right, insert_root, release, remove, rotate_left,
    rotate_right,
};
