//! Traversal primitives over the arena.
//!
//! Successor/predecessor walks use the parent back-references, so cursor
//! stepping needs no auxiliary stack and no re-search from the root.

use crate::arena::Arena;

#[inline]
pub(crate) fn p<T>(arena: &Arena<T>, i: u32) -> Option<u32> {
    arena.node(i).p
}

#[inline]
pub(crate) fn l<T>(arena: &Arena<T>, i: u32) -> Option<u32> {
    arena.node(i).l
}

#[inline]
pub(crate) fn r<T>(arena: &Arena<T>, i: u32) -> Option<u32> {
    arena.node(i).r
}

#[inline]
pub(crate) fn set_p<T>(arena: &mut Arena<T>, i: u32, v: Option<u32>) {
    arena.node_mut(i).p = v;
}

#[inline]
pub(crate) fn set_l<T>(arena: &mut Arena<T>, i: u32, v: Option<u32>) {
    arena.node_mut(i).l = v;
}

#[inline]
pub(crate) fn set_r<T>(arena: &mut Arena<T>, i: u32, v: Option<u32>) {
    arena.node_mut(i).r = v;
}

#[inline]
pub(crate) fn bf<T>(arena: &Arena<T>, i: u32) -> i32 {
    arena.node(i).bf
}

#[inline]
pub(crate) fn set_bf<T>(arena: &mut Arena<T>, i: u32, v: i32) {
    arena.node_mut(i).bf = v;
}

/// Leftmost node under `root`.
pub(crate) fn leftmost<T>(arena: &Arena<T>, root: Option<u32>) -> Option<u32> {
    let mut curr = root?;
    while let Some(next) = l(arena, curr) {
        curr = next;
    }
    Some(curr)
}

/// Rightmost node under `root`.
pub(crate) fn rightmost<T>(arena: &Arena<T>, root: Option<u32>) -> Option<u32> {
    let mut curr = root?;
    while let Some(next) = r(arena, curr) {
        curr = next;
    }
    Some(curr)
}

/// In-order successor of `curr`.
pub(crate) fn successor<T>(arena: &Arena<T>, mut curr: u32) -> Option<u32> {
    if let Some(right) = r(arena, curr) {
        return leftmost(arena, Some(right));
    }
    let mut par = p(arena, curr);
    while let Some(pi) = par {
        if r(arena, pi) == Some(curr) {
            curr = pi;
            par = p(arena, pi);
        } else {
            return Some(pi);
        }
    }
    None
}

/// In-order predecessor of `curr`.
pub(crate) fn predecessor<T>(arena: &Arena<T>, mut curr: u32) -> Option<u32> {
    if let Some(left) = l(arena, curr) {
        return rightmost(arena, Some(left));
    }
    let mut par = p(arena, curr);
    while let Some(pi) = par {
        if l(arena, pi) == Some(curr) {
            curr = pi;
            par = p(arena, pi);
        } else {
            return Some(pi);
        }
    }
    None
}

/// Comparator-driven point lookup.
pub(crate) fn search<T, C>(
    arena: &Arena<T>,
    root: Option<u32>,
    value: &T,
    comparator: &C,
) -> Option<u32>
where
    C: Fn(&T, &T) -> i32,
{
    let mut curr = root;
    while let Some(i) = curr {
        let cmp = comparator(value, &arena.node(i).value);
        if cmp == 0 {
            return Some(i);
        }
        curr = if cmp < 0 { l(arena, i) } else { r(arena, i) };
    }
    None
}

/// Exact match, or the greatest entry ordered below `value`.
pub(crate) fn search_or_next_lower<T, C>(
    arena: &Arena<T>,
    root: Option<u32>,
    value: &T,
    comparator: &C,
) -> Option<u32>
where
    C: Fn(&T, &T) -> i32,
{
    let mut curr = root;
    let mut result = None;
    while let Some(i) = curr {
        let cmp = comparator(&arena.node(i).value, value);
        if cmp == 0 {
            return Some(i);
        }
        if cmp > 0 {
            curr = l(arena, i);
        } else {
            result = Some(i);
            curr = r(arena, i);
        }
    }
    result
}
