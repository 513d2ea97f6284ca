//! Structural helpers shared by the tree and its traversals.
//!
//! Everything here only follows `p` / `l` / `r` links, so it works for any
//! [`Node`] arena regardless of balancing scheme.

use std::collections::VecDeque;

use crate::types::{Node, ValueNode};

#[inline]
pub(crate) fn get_p<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].p()
}

#[inline]
pub(crate) fn get_l<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].l()
}

#[inline]
pub(crate) fn get_r<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].r()
}

#[inline]
pub(crate) fn set_p<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_p(v);
}

#[inline]
pub(crate) fn set_l<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_l(v);
}

#[inline]
pub(crate) fn set_r<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_r(v);
}

/// Leftmost node of the subtree rooted at `root`.
pub fn first<N: Node>(arena: &[N], root: Option<u32>) -> Option<u32> {
    let mut curr = root?;
    while let Some(l) = get_l(arena, curr) {
        curr = l;
    }
    Some(curr)
}

/// Rightmost node of the subtree rooted at `root`.
pub fn last<N: Node>(arena: &[N], root: Option<u32>) -> Option<u32> {
    let mut curr = root?;
    while let Some(r) = get_r(arena, curr) {
        curr = r;
    }
    Some(curr)
}

/// In-order successor of `curr`.
pub fn next<N: Node>(arena: &[N], curr: u32) -> Option<u32> {
    if let Some(r) = get_r(arena, curr) {
        return first(arena, Some(r));
    }
    let mut curr = curr;
    let mut p = get_p(arena, curr);
    while let Some(pi) = p {
        if get_r(arena, pi) != Some(curr) {
            return Some(pi);
        }
        curr = pi;
        p = get_p(arena, pi);
    }
    None
}

/// Binary search for `value`, starting at `root`.
pub fn find<T, N>(arena: &[N], root: Option<u32>, value: &T) -> Option<u32>
where
    T: Ord,
    N: ValueNode<T>,
{
    let mut curr = root;
    while let Some(i) = curr {
        let node = &arena[i as usize];
        curr = match value.cmp(node.value()) {
            std::cmp::Ordering::Equal => return Some(i),
            std::cmp::Ordering::Less => node.l(),
            std::cmp::Ordering::Greater => node.r(),
        };
    }
    None
}

/// Number of levels, counted breadth first. An empty tree has height 0.
pub fn height<N: Node>(arena: &[N], root: Option<u32>) -> usize {
    let Some(root) = root else {
        return 0;
    };
    let mut queue = VecDeque::from([root]);
    let mut levels = 0;
    while !queue.is_empty() {
        for _ in 0..queue.len() {
            let Some(i) = queue.pop_front() else {
                break;
            };
            queue.extend(get_l(arena, i));
            queue.extend(get_r(arena, i));
        }
        levels += 1;
    }
    levels
}

/// Stack-driven in-order walk over node indices.
///
/// Holds only the current left spine, so memory is bounded by tree height.
pub struct InOrder<'a, N> {
    arena: &'a [N],
    stack: Vec<u32>,
    curr: Option<u32>,
}

impl<N> Clone for InOrder<'_, N> {
    fn clone(&self) -> Self {
        Self {
            arena: self.arena,
            stack: self.stack.clone(),
            curr: self.curr,
        }
    }
}

impl<'a, N: Node> InOrder<'a, N> {
    pub fn new(arena: &'a [N], root: Option<u32>) -> Self {
        Self {
            arena,
            stack: Vec::new(),
            curr: root,
        }
    }
}

impl<N: Node> Iterator for InOrder<'_, N> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        while let Some(i) = self.curr {
            self.stack.push(i);
            self.curr = get_l(self.arena, i);
        }
        let i = self.stack.pop()?;
        self.curr = get_r(self.arena, i);
        Some(i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::red_black::RbNode;

    // 2
    // ├ 1
    // └ 4
    //   └ 3 (left)
    fn sample() -> Vec<RbNode<i32>> {
        let mut arena: Vec<RbNode<i32>> = [2, 1, 4, 3].into_iter().map(RbNode::new).collect();
        arena[0].l = Some(1);
        arena[0].r = Some(2);
        arena[1].p = Some(0);
        arena[2].p = Some(0);
        arena[2].l = Some(3);
        arena[3].p = Some(2);
        arena
    }

    #[test]
    fn first_last_next_follow_in_order() {
        let arena = sample();
        assert_eq!(first(&arena, Some(0)), Some(1));
        assert_eq!(last(&arena, Some(0)), Some(2));
        assert_eq!(next(&arena, 1), Some(0));
        assert_eq!(next(&arena, 0), Some(3));
        assert_eq!(next(&arena, 3), Some(2));
        assert_eq!(next(&arena, 2), None);
        assert_eq!(first::<RbNode<i32>>(&arena, None), None);
    }

    #[test]
    fn in_order_walk_visits_sorted() {
        let arena = sample();
        let values: Vec<i32> = InOrder::new(&arena, Some(0)).map(|i| arena[i as usize].v).collect();
        assert_eq!(values, vec![1, 2, 3, 4]);
    }

    #[test]
    fn height_counts_levels() {
        let arena = sample();
        assert_eq!(height(&arena, Some(0)), 3);
        assert_eq!(height(&arena, Some(1)), 1);
        assert_eq!(height(&arena, None), 0);
    }

    #[test]
    fn find_walks_by_order() {
        let arena = sample();
        assert_eq!(find(&arena, Some(0), &3), Some(3));
        assert_eq!(find(&arena, Some(0), &5), None);
    }
}
