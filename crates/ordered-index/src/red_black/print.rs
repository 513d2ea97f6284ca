use std::fmt::{self, Debug, Display, Write};

use crate::types::ValueNode;

use super::types::RbNodeLike;

/// Writes the subtree at `node` in parenthesized prefix notation.
///
/// A leaf is `v`, a node with one child is `v(child)` and a node with both
/// children is `v(left)(right)`. An absent subtree writes nothing. Recursion
/// depth is bounded by the tree height.
pub fn write_prefix<T, N, W>(arena: &[N], node: Option<u32>, out: &mut W) -> fmt::Result
where
    T: Display,
    N: ValueNode<T>,
    W: Write + ?Sized,
{
    let Some(i) = node else {
        return Ok(());
    };
    let n = &arena[i as usize];
    write!(out, "{}", n.value())?;
    for child in [n.l(), n.r()].into_iter().flatten() {
        out.write_char('(')?;
        write_prefix(arena, Some(child), out)?;
        out.write_char(')')?;
    }
    Ok(())
}

/// Debug printer showing index, color and frequency of every node.
pub fn print<T, N>(arena: &[N], node: Option<u32>, tab: &str) -> String
where
    T: Debug,
    N: RbNodeLike + ValueNode<T>,
{
    match node {
        None => "∅".to_string(),
        Some(i) => {
            let n = &arena[i as usize];
            let color = if n.is_black() { "black" } else { "red" };
            let left = print::<T, N>(arena, n.l(), &format!("{tab}  "));
            let right = print::<T, N>(arena, n.r(), &format!("{tab}  "));
            format!(
                "Node[{i}] {color} {{ {:?} x{} }}\n{tab}L={left}\n{tab}R={right}",
                n.value(),
                n.frequency()
            )
        }
    }
}
