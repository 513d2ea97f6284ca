//! Node trait definitions.
//!
//! Every "pointer" is an `Option<u32>` index into a [`Vec`]-backed arena.
//! All tree-manipulation functions take the arena as `&mut Vec<N>` (or a
//! slice when they only read) and work with indices.

/// Structural links (`p`, `l`, `r`).
pub trait Node {
    fn p(&self) -> Option<u32>;
    fn l(&self) -> Option<u32>;
    fn r(&self) -> Option<u32>;
    fn set_p(&mut self, v: Option<u32>);
    fn set_l(&mut self, v: Option<u32>);
    fn set_r(&mut self, v: Option<u32>);
}

/// Node color. Absent children are treated as [`Color::Black`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Black,
}

impl Color {
    pub fn is_red(self) -> bool {
        self == Color::Red
    }

    pub fn is_black(self) -> bool {
        self == Color::Black
    }
}

/// Value node interface: one physical node per distinct value, with a count
/// of how many logical copies of the value it stands for.
pub trait ValueNode<T>: Node {
    fn value(&self) -> &T;
    fn value_mut(&mut self) -> &mut T;
    fn frequency(&self) -> usize;
    fn set_frequency(&mut self, frequency: usize);
}
