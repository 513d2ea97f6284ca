use crate::types::{Color, Node, ValueNode};

/// Red-black tree node stored in an arena.
#[derive(Clone, Debug)]
pub struct RbNode<T> {
    pub p: Option<u32>,
    pub l: Option<u32>,
    pub r: Option<u32>,
    pub v: T,
    /// Number of logical insertions of `v` collapsed into this node.
    pub f: usize,
    pub c: Color,
}

impl<T> RbNode<T> {
    /// Fresh nodes are red with a frequency of one.
    pub fn new(v: T) -> Self {
        Self {
            p: None,
            l: None,
            r: None,
            v,
            f: 1,
            c: Color::Red,
        }
    }
}

impl<T> Node for RbNode<T> {
    fn p(&self) -> Option<u32> {
        self.p
    }

    fn l(&self) -> Option<u32> {
        self.l
    }

    fn r(&self) -> Option<u32> {
        self.r
    }

    fn set_p(&mut self, v: Option<u32>) {
        self.p = v;
    }

    fn set_l(&mut self, v: Option<u32>) {
        self.l = v;
    }

    fn set_r(&mut self, v: Option<u32>) {
        self.r = v;
    }
}

impl<T> ValueNode<T> for RbNode<T> {
    fn value(&self) -> &T {
        &self.v
    }

    fn value_mut(&mut self) -> &mut T {
        &mut self.v
    }

    fn frequency(&self) -> usize {
        self.f
    }

    fn set_frequency(&mut self, frequency: usize) {
        self.f = frequency;
    }
}

/// Red-black specific node behavior.
pub trait RbNodeLike: Node {
    fn color(&self) -> Color;
    fn set_color(&mut self, color: Color);

    fn is_black(&self) -> bool {
        self.color().is_black()
    }
}

impl<T> RbNodeLike for RbNode<T> {
    fn color(&self) -> Color {
        self.c
    }

    fn set_color(&mut self, color: Color) {
        self.c = color;
    }
}
