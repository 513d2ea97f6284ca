use std::cmp::Ordering;
use std::fmt::{self, Debug, Display};

use log::debug;

use crate::error::InvariantError;
use crate::red_black::{self, RbNode};
use crate::types::Color;
use crate::util::{self, InOrder};

/// Red-black tree used as an in-memory ordered index.
///
/// Duplicate values are not stored as separate nodes: each distinct value
/// owns one node whose frequency counts its live insertions. Nodes live in a
/// dense arena and link to each other by `u32` index, so parent links are
/// plain data and rotations are index reassignments.
///
/// ```
/// use ordered_index::OrderedIndex;
///
/// let mut index: OrderedIndex<i32> = [10, 20, 30, 20].into_iter().collect();
/// assert_eq!(index.to_string(), "20(10)(30)");
/// assert_eq!(index.size(), (3, 4));
///
/// index.delete(&20);
/// assert_eq!(index.to_ordered_sequence().copied().collect::<Vec<_>>(), vec![10, 20, 30]);
/// ```
#[derive(Clone)]
pub struct OrderedIndex<T> {
    arena: Vec<RbNode<T>>,
    root: Option<u32>,
}

impl<T> OrderedIndex<T> {
    pub fn new() -> Self {
        Self {
            arena: Vec::new(),
            root: None,
        }
    }

    /// Number of distinct values (physical nodes).
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
    }

    pub fn root_value(&self) -> Option<&T> {
        self.root.map(|i| &self.arena[i as usize].v)
    }

    /// Smallest value.
    pub fn first(&self) -> Option<&T> {
        util::first(&self.arena, self.root).map(|i| &self.arena[i as usize].v)
    }

    /// Largest value.
    pub fn last(&self) -> Option<&T> {
        util::last(&self.arena, self.root).map(|i| &self.arena[i as usize].v)
    }

    /// Distinct values with their frequencies, in ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            arena: &self.arena,
            walk: InOrder::new(&self.arena, self.root),
        }
    }

    /// Every live value in ascending order, each repeated by its frequency.
    ///
    /// The walk is lazy and driven by an explicit stack; calling this again
    /// starts a fresh walk.
    pub fn to_ordered_sequence(&self) -> Values<'_, T> {
        Values {
            entries: self.iter(),
            curr: None,
        }
    }

    /// `(distinct node count, total value count)`.
    pub fn size(&self) -> (usize, usize) {
        self.iter()
            .fold((0, 0), |(nodes, values), (_, f)| (nodes + 1, values + f))
    }

    /// Number of levels from the root; 0 for an empty tree.
    pub fn height(&self) -> usize {
        util::height(&self.arena, self.root)
    }
}

impl<T: Ord> OrderedIndex<T> {
    /// Appends a fresh red node. Links are `u32`, which caps the arena at
    /// `u32::MAX + 1` distinct values.
    fn push(&mut self, value: T) -> u32 {
        let idx = u32::try_from(self.arena.len()).expect("arena index exceeds u32");
        self.arena.push(RbNode::new(value));
        idx
    }

    /// Adds one instance of `value`.
    ///
    /// A value already present only has its frequency bumped; the tree shape
    /// does not change.
    pub fn insert(&mut self, value: T) {
        let Some(mut curr) = self.root else {
            let idx = self.push(value);
            self.root = red_black::insert_root(&mut self.arena, idx);
            debug!("insert: node {idx} becomes the root");
            return;
        };

        loop {
            let node = &self.arena[curr as usize];
            let cmp = value.cmp(&node.v);
            let next = match cmp {
                Ordering::Equal => {
                    self.arena[curr as usize].f += 1;
                    return;
                }
                Ordering::Less => node.l,
                Ordering::Greater => node.r,
            };
            match next {
                Some(next) => curr = next,
                None => {
                    let idx = self.push(value);
                    self.root = if cmp == Ordering::Less {
                        red_black::insert_left(&mut self.arena, self.root, idx, curr)
                    } else {
                        red_black::insert_right(&mut self.arena, self.root, idx, curr)
                    };
                    debug!("insert: node {idx} attached under {curr}");
                    return;
                }
            }
        }
    }

    pub(crate) fn find(&self, value: &T) -> Option<u32> {
        util::find(&self.arena, self.root, value)
    }

    /// Whether at least one instance of `value` is live.
    pub fn search(&self, value: &T) -> bool {
        self.find(value).is_some()
    }

    pub fn contains(&self, value: &T) -> bool {
        self.search(value)
    }

    /// Live instance count of `value`; 0 when absent.
    pub fn frequency(&self, value: &T) -> usize {
        self.find(value).map_or(0, |i| self.arena[i as usize].f)
    }

    /// Color of the node holding `value`.
    pub fn color(&self, value: &T) -> Option<Color> {
        self.find(value).map(|i| self.arena[i as usize].c)
    }

    /// Removes one instance of `value`.
    ///
    /// The node itself is only unlinked once its last instance goes. Returns
    /// `false` (and leaves the tree untouched) when `value` is absent.
    pub fn delete(&mut self, value: &T) -> bool {
        let Some(idx) = self.find(value) else {
            return false;
        };
        let node = &mut self.arena[idx as usize];
        if node.f > 1 {
            node.f -= 1;
            return true;
        }
        self.unlink(idx);
        true
    }

    /// Removes every instance of `value`, returning how many there were.
    pub fn delete_all(&mut self, value: &T) -> usize {
        match self.find(value) {
            Some(idx) => self.unlink(idx),
            None => 0,
        }
    }

    fn unlink(&mut self, idx: u32) -> usize {
        let (root, detached) = red_black::remove(&mut self.arena, self.root, idx);
        let (root, node) = red_black::release(&mut self.arena, root, detached);
        self.root = root;
        debug!("delete: node {idx} unlinked, {} nodes left", self.arena.len());
        node.f
    }

    /// Verifies every structural invariant, reporting the first violation.
    pub fn assert_valid(&self) -> Result<(), InvariantError> {
        red_black::assert_red_black_tree(&self.arena, self.root)
    }
}

impl<T: Debug> OrderedIndex<T> {
    /// Multi-line dump with arena index, color and frequency of every node.
    pub fn print(&self) -> String {
        red_black::print(&self.arena, self.root, "")
    }
}

impl<T> Default for OrderedIndex<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Debug> Debug for OrderedIndex<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Parenthesized prefix notation, e.g. `20(10)(30)`. Empty trees render as
/// the empty string.
impl<T: Display> Display for OrderedIndex<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        red_black::write_prefix(&self.arena, self.root, f)
    }
}

impl<T: Ord> Extend<T> for OrderedIndex<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: Ord> FromIterator<T> for OrderedIndex<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut index = Self::new();
        index.extend(iter);
        index
    }
}

impl<'a, T> IntoIterator for &'a OrderedIndex<T> {
    type Item = &'a T;
    type IntoIter = Values<'a, T>;

    fn into_iter(self) -> Values<'a, T> {
        self.to_ordered_sequence()
    }
}

/// In-order `(value, frequency)` entries. See [`OrderedIndex::iter`].
pub struct Iter<'a, T> {
    arena: &'a [RbNode<T>],
    walk: InOrder<'a, RbNode<T>>,
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            arena: self.arena,
            walk: self.walk.clone(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (&'a T, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let node = &self.arena[self.walk.next()? as usize];
        Some((&node.v, node.f))
    }
}

/// In-order values expanded by frequency. See
/// [`OrderedIndex::to_ordered_sequence`].
pub struct Values<'a, T> {
    entries: Iter<'a, T>,
    curr: Option<(&'a T, usize)>,
}

impl<T> Clone for Values<'_, T> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            curr: self.curr,
        }
    }
}

impl<'a, T> Iterator for Values<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        loop {
            if let Some((value, remaining)) = &mut self.curr {
                if *remaining > 0 {
                    *remaining -= 1;
                    return Some(*value);
                }
            }
            self.curr = Some(self.entries.next()?);
        }
    }
}
