use log::trace;

use crate::error::InvariantError;
use crate::types::{Color, ValueNode};
use crate::util::{first, get_l, get_p, get_r, set_l, set_p, set_r, InOrder};

use super::types::RbNodeLike;

#[inline]
fn set_color<N: RbNodeLike>(arena: &mut [N], i: u32, c: Color) {
    arena[i as usize].set_color(c);
}

#[inline]
fn color<N: RbNodeLike>(arena: &[N], i: u32) -> Color {
    arena[i as usize].color()
}

/// `Some(i)` only when `i` is present and red. Absent positions are black.
#[inline]
fn red<N: RbNodeLike>(arena: &[N], i: Option<u32>) -> Option<u32> {
    i.filter(|&i| color(arena, i).is_red())
}

/// Promotes the right child of `x` into its place.
///
/// Returns the (possibly new) root.
pub fn rotate_left<N: RbNodeLike>(arena: &mut [N], root: Option<u32>, x: u32) -> Option<u32> {
    let y = get_r(arena, x).expect("rotate_left needs a right child");
    let yl = get_l(arena, y);

    set_r(arena, x, yl);
    if let Some(yl) = yl {
        set_p(arena, yl, Some(x));
    }

    let p = get_p(arena, x);
    set_p(arena, y, p);
    let root = match p {
        None => Some(y),
        Some(p) => {
            if get_l(arena, p) == Some(x) {
                set_l(arena, p, Some(y));
            } else {
                set_r(arena, p, Some(y));
            }
            root
        }
    };

    set_l(arena, y, Some(x));
    set_p(arena, x, Some(y));
    trace!("rotate left at {x}, promoted {y}");
    root
}

/// Promotes the left child of `x` into its place.
///
/// Returns the (possibly new) root.
pub fn rotate_right<N: RbNodeLike>(arena: &mut [N], root: Option<u32>, x: u32) -> Option<u32> {
    let y = get_l(arena, x).expect("rotate_right needs a left child");
    let yr = get_r(arena, y);

    set_l(arena, x, yr);
    if let Some(yr) = yr {
        set_p(arena, yr, Some(x));
    }

    let p = get_p(arena, x);
    set_p(arena, y, p);
    let root = match p {
        None => Some(y),
        Some(p) => {
            if get_r(arena, p) == Some(x) {
                set_r(arena, p, Some(y));
            } else {
                set_l(arena, p, Some(y));
            }
            root
        }
    };

    set_r(arena, y, Some(x));
    set_p(arena, x, Some(y));
    trace!("rotate right at {x}, promoted {y}");
    root
}

/// Makes `n` the root of an empty tree.
pub fn insert_root<N: RbNodeLike>(arena: &mut [N], n: u32) -> Option<u32> {
    set_p(arena, n, None);
    insert_fixup(arena, Some(n), n)
}

/// Attaches red node `n` as the left child of leaf position `p` and rebalances.
pub fn insert_left<N: RbNodeLike>(
    arena: &mut [N],
    root: Option<u32>,
    n: u32,
    p: u32,
) -> Option<u32> {
    set_l(arena, p, Some(n));
    set_p(arena, n, Some(p));
    insert_fixup(arena, root, n)
}

/// Attaches red node `n` as the right child of leaf position `p` and rebalances.
pub fn insert_right<N: RbNodeLike>(
    arena: &mut [N],
    root: Option<u32>,
    n: u32,
    p: u32,
) -> Option<u32> {
    set_r(arena, p, Some(n));
    set_p(arena, n, Some(p));
    insert_fixup(arena, root, n)
}

fn insert_fixup<N: RbNodeLike>(arena: &mut [N], mut root: Option<u32>, n: u32) -> Option<u32> {
    let mut z = n;
    while let Some(p) = red(arena, get_p(arena, z)) {
        // A red node is never the root, so the grandparent exists.
        let g = get_p(arena, p).expect("red parent has a parent");
        let parent_is_left = get_l(arena, g) == Some(p);
        let uncle = if parent_is_left {
            get_r(arena, g)
        } else {
            get_l(arena, g)
        };

        if let Some(u) = red(arena, uncle) {
            trace!("insert fix-up at {z}: red uncle {u}, recolor {g}");
            set_color(arena, p, Color::Black);
            set_color(arena, u, Color::Black);
            set_color(arena, g, Color::Red);
            z = g;
            continue;
        }

        let mut p = p;
        if parent_is_left {
            if get_r(arena, p) == Some(z) {
                trace!("insert fix-up at {z}: inner child, rotate parent {p}");
                z = p;
                root = rotate_left(arena, root, z);
                p = get_p(arena, z).expect("rotated node has a parent");
            }
            trace!("insert fix-up at {z}: outer child, rotate grandparent {g}");
            set_color(arena, p, Color::Black);
            set_color(arena, g, Color::Red);
            root = rotate_right(arena, root, g);
        } else {
            if get_l(arena, p) == Some(z) {
                trace!("insert fix-up at {z}: inner child, rotate parent {p}");
                z = p;
                root = rotate_right(arena, root, z);
                p = get_p(arena, z).expect("rotated node has a parent");
            }
            trace!("insert fix-up at {z}: outer child, rotate grandparent {g}");
            set_color(arena, p, Color::Black);
            set_color(arena, g, Color::Red);
            root = rotate_left(arena, root, g);
        }
    }

    if let Some(r) = root {
        set_color(arena, r, Color::Black);
    }
    root
}

/// Replaces the subtree at `u` with the subtree at `v` in `u`'s parent.
fn transplant<N: RbNodeLike>(
    arena: &mut [N],
    root: Option<u32>,
    u: u32,
    v: Option<u32>,
) -> Option<u32> {
    let p = get_p(arena, u);
    let root = match p {
        None => v,
        Some(p) => {
            if get_l(arena, p) == Some(u) {
                set_l(arena, p, v);
            } else {
                set_r(arena, p, v);
            }
            root
        }
    };
    if let Some(v) = v {
        set_p(arena, v, p);
    }
    root
}

/// Swaps value and frequency between two nodes, leaving links and colors.
fn swap_payload<T, N: ValueNode<T>>(arena: &mut [N], a: u32, b: u32) {
    if a == b {
        return;
    }
    let (lo, hi) = if a < b { (a, b) } else { (b, a) };
    let (head, tail) = arena.split_at_mut(hi as usize);
    let x = &mut head[lo as usize];
    let y = &mut tail[0];
    std::mem::swap(x.value_mut(), y.value_mut());
    let f = x.frequency();
    x.set_frequency(y.frequency());
    y.set_frequency(f);
}

/// Structurally removes the node holding `z`'s value.
///
/// When `z` has two children its in-order successor's value and frequency
/// move into `z` and the successor is unlinked instead. Returns the new root
/// and the index of the node that was unlinked; that node carries `z`'s
/// original payload and has all of its links cleared, ready to be released
/// from the arena.
pub fn remove<T, N>(arena: &mut [N], mut root: Option<u32>, z: u32) -> (Option<u32>, u32)
where
    N: RbNodeLike + ValueNode<T>,
{
    let mut y = z;
    if let (Some(_), Some(r)) = (get_l(arena, z), get_r(arena, z)) {
        y = first(arena, Some(r)).expect("right subtree is not empty");
        swap_payload(arena, z, y);
    }

    let x = get_l(arena, y).or(get_r(arena, y));
    let xp = get_p(arena, y);
    root = transplant(arena, root, y, x);
    if color(arena, y).is_black() {
        root = remove_fixup(arena, root, x, xp);
    }

    set_p(arena, y, None);
    set_l(arena, y, None);
    set_r(arena, y, None);
    (root, y)
}

/// Restores equal black heights after a black node was unlinked.
///
/// `x` is the node that took the unlinked node's place (possibly absent)
/// and `parent` is its parent. The sibling of `x` is always present while
/// `x` is black and not the root.
fn remove_fixup<N: RbNodeLike>(
    arena: &mut [N],
    mut root: Option<u32>,
    mut x: Option<u32>,
    mut parent: Option<u32>,
) -> Option<u32> {
    while x != root && red(arena, x).is_none() {
        let Some(p) = parent else {
            break;
        };

        if get_l(arena, p) == x {
            let mut s = get_r(arena, p).expect("double-black node has a sibling");
            if color(arena, s).is_red() {
                trace!("remove fix-up under {p}: red sibling {s}");
                set_color(arena, s, Color::Black);
                set_color(arena, p, Color::Red);
                root = rotate_left(arena, root, p);
                s = get_r(arena, p).expect("double-black node has a sibling");
            }

            let near = get_l(arena, s);
            let far = get_r(arena, s);
            if red(arena, near).is_none() && red(arena, far).is_none() {
                trace!("remove fix-up under {p}: black sibling {s} with black children");
                set_color(arena, s, Color::Red);
                x = Some(p);
                parent = get_p(arena, p);
                continue;
            }

            if red(arena, far).is_none() {
                trace!("remove fix-up under {p}: sibling {s} has red near child");
                if let Some(near) = near {
                    set_color(arena, near, Color::Black);
                }
                set_color(arena, s, Color::Red);
                root = rotate_right(arena, root, s);
                s = get_r(arena, p).expect("double-black node has a sibling");
            }

            trace!("remove fix-up under {p}: sibling {s} has red far child");
            let pc = color(arena, p);
            set_color(arena, s, pc);
            set_color(arena, p, Color::Black);
            if let Some(far) = get_r(arena, s) {
                set_color(arena, far, Color::Black);
            }
            root = rotate_left(arena, root, p);
        } else {
            let mut s = get_l(arena, p).expect("double-black node has a sibling");
            if color(arena, s).is_red() {
                trace!("remove fix-up under {p}: red sibling {s}");
                set_color(arena, s, Color::Black);
                set_color(arena, p, Color::Red);
                root = rotate_right(arena, root, p);
                s = get_l(arena, p).expect("double-black node has a sibling");
            }

            let near = get_r(arena, s);
            let far = get_l(arena, s);
            if red(arena, near).is_none() && red(arena, far).is_none() {
                trace!("remove fix-up under {p}: black sibling {s} with black children");
                set_color(arena, s, Color::Red);
                x = Some(p);
                parent = get_p(arena, p);
                continue;
            }

            if red(arena, far).is_none() {
                trace!("remove fix-up under {p}: sibling {s} has red near child");
                if let Some(near) = near {
                    set_color(arena, near, Color::Black);
                }
                set_color(arena, s, Color::Red);
                root = rotate_left(arena, root, s);
                s = get_l(arena, p).expect("double-black node has a sibling");
            }

            trace!("remove fix-up under {p}: sibling {s} has red far child");
            let pc = color(arena, p);
            set_color(arena, s, pc);
            set_color(arena, p, Color::Black);
            if let Some(far) = get_l(arena, s) {
                set_color(arena, far, Color::Black);
            }
            root = rotate_right(arena, root, p);
        }

        x = root;
        parent = None;
    }

    if let Some(x) = x {
        set_color(arena, x, Color::Black);
    }
    root
}

/// Removes the detached node at `idx` from the arena.
///
/// The last node in the arena moves into the freed slot and every link that
/// pointed at it is redirected, so the arena stays dense. Returns the
/// (possibly renumbered) root and the removed node.
pub fn release<N: RbNodeLike>(arena: &mut Vec<N>, root: Option<u32>, idx: u32) -> (Option<u32>, N) {
    let last = (arena.len() - 1) as u32;
    let removed = arena.swap_remove(idx as usize);
    if idx == last {
        return (root, removed);
    }

    if let Some(p) = get_p(arena, idx) {
        if get_l(arena, p) == Some(last) {
            set_l(arena, p, Some(idx));
        } else {
            set_r(arena, p, Some(idx));
        }
    }
    if let Some(l) = get_l(arena, idx) {
        set_p(arena, l, Some(idx));
    }
    if let Some(r) = get_r(arena, idx) {
        set_p(arena, r, Some(idx));
    }

    let root = if root == Some(last) { Some(idx) } else { root };
    (root, removed)
}

/// Checks every red-black, ordering, link and frequency invariant.
pub fn assert_red_black_tree<T, N>(arena: &[N], root: Option<u32>) -> Result<(), InvariantError>
where
    T: Ord,
    N: RbNodeLike + ValueNode<T>,
{
    let Some(root) = root else {
        return if arena.is_empty() {
            Ok(())
        } else {
            Err(InvariantError::UnreachableNodes {
                reachable: 0,
                total: arena.len(),
            })
        };
    };

    if arena[root as usize].p().is_some() {
        return Err(InvariantError::RootHasParent { node: root });
    }
    if !arena[root as usize].is_black() {
        return Err(InvariantError::RedRoot { node: root });
    }

    fn black_height<N>(arena: &[N], node: Option<u32>) -> Result<usize, InvariantError>
    where
        N: RbNodeLike,
    {
        let Some(node) = node else {
            return Ok(0);
        };

        let n = &arena[node as usize];
        for child in [n.l(), n.r()].into_iter().flatten() {
            let found = arena[child as usize].p();
            if found != Some(node) {
                return Err(InvariantError::BrokenParentLink { node, child, found });
            }
            if !n.is_black() && !arena[child as usize].is_black() {
                return Err(InvariantError::RedRedViolation { node, child });
            }
        }

        let left = black_height(arena, n.l())?;
        let right = black_height(arena, n.r())?;
        if left != right {
            return Err(InvariantError::BlackHeightMismatch { node, left, right });
        }

        Ok(left + usize::from(n.is_black()))
    }

    black_height(arena, Some(root))?;

    let mut reachable = 0;
    let mut prev: Option<u32> = None;
    for i in InOrder::new(arena, Some(root)) {
        if arena[i as usize].frequency() == 0 {
            return Err(InvariantError::ZeroFrequency { node: i });
        }
        if let Some(prev) = prev {
            if arena[prev as usize].value() >= arena[i as usize].value() {
                return Err(InvariantError::OrderViolated { node: i, prev });
            }
        }
        prev = Some(i);
        reachable += 1;
    }

    if reachable != arena.len() {
        return Err(InvariantError::UnreachableNodes {
            reachable,
            total: arena.len(),
        });
    }

    Ok(())
}
