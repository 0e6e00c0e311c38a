//! Rotations and the incremental rebalancing walks.
//!
//! Balance factors are `height(right) - height(left)` and are maintained
//! arithmetically during rotations; no subtree height is ever recomputed
//! on the mutation path.

use crate::arena::Arena;
use crate::util::{bf, l, p, r, set_bf, set_l, set_p, set_r};

/// Left rotation around `n`: its right child takes its place.
/// Returns the subtree's new root.
fn rotate_left<T>(arena: &mut Arena<T>, n: u32) -> u32 {
    let rc = r(arena, n).expect("left rotation requires a right child");
    let par = p(arena, n);
    let rl = l(arena, rc);

    set_r(arena, n, rl);
    if let Some(rl) = rl {
        set_p(arena, rl, Some(n));
    }
    set_l(arena, rc, Some(n));
    set_p(arena, n, Some(rc));
    set_p(arena, rc, par);
    if let Some(par) = par {
        if l(arena, par) == Some(n) {
            set_l(arena, par, Some(rc));
        } else {
            set_r(arena, par, Some(rc));
        }
    }

    let nbf = bf(arena, n) - 1 - bf(arena, rc).max(0);
    set_bf(arena, n, nbf);
    let rcbf = bf(arena, rc) - 1 + nbf.min(0);
    set_bf(arena, rc, rcbf);
    rc
}

/// Right rotation around `n`: its left child takes its place.
/// Returns the subtree's new root.
fn rotate_right<T>(arena: &mut Arena<T>, n: u32) -> u32 {
    let lc = l(arena, n).expect("right rotation requires a left child");
    let par = p(arena, n);
    let lr = r(arena, lc);

    set_l(arena, n, lr);
    if let Some(lr) = lr {
        set_p(arena, lr, Some(n));
    }
    set_r(arena, lc, Some(n));
    set_p(arena, n, Some(lc));
    set_p(arena, lc, par);
    if let Some(par) = par {
        if l(arena, par) == Some(n) {
            set_l(arena, par, Some(lc));
        } else {
            set_r(arena, par, Some(lc));
        }
    }

    let nbf = bf(arena, n) + 1 - bf(arena, lc).min(0);
    set_bf(arena, n, nbf);
    let lcbf = bf(arena, lc) + 1 + nbf.max(0);
    set_bf(arena, lc, lcbf);
    lc
}

/// Restores the AVL bound at `n` (balance factor ±2) with one single or
/// double rotation, picked by the sign of the heavy child's own factor.
/// Returns the subtree's new root.
fn rebalance<T>(arena: &mut Arena<T>, n: u32) -> u32 {
    if bf(arena, n) > 0 {
        let rc = r(arena, n).expect("right-heavy node has a right child");
        if bf(arena, rc) < 0 {
            rotate_right(arena, rc);
        }
        rotate_left(arena, n)
    } else {
        let lc = l(arena, n).expect("left-heavy node has a left child");
        if bf(arena, lc) > 0 {
            rotate_left(arena, lc);
        }
        rotate_right(arena, n)
    }
}

/// Walks up from the freshly linked leaf `n`, updating balance factors.
///
/// Stops when an ancestor's factor returns to 0 (the height increase was
/// absorbed) or after one rebalancing rotation, which for insertion always
/// restores the pre-insert subtree height. Returns the tree's new root.
pub(crate) fn retrace_insert<T>(arena: &mut Arena<T>, root: u32, mut n: u32) -> u32 {
    while let Some(par) = p(arena, n) {
        let grew_left = l(arena, par) == Some(n);
        let pbf = bf(arena, par) + if grew_left { -1 } else { 1 };
        set_bf(arena, par, pbf);
        match pbf {
            0 => return root,
            -1 | 1 => n = par,
            _ => {
                let sub = rebalance(arena, par);
                return if p(arena, sub).is_none() { sub } else { root };
            }
        }
    }
    root
}

/// Walks up after an unlink; `start` just lost height on its `shrank_left`
/// side.
///
/// Unlike insertion, a deletion rotation can itself shrink the subtree and
/// push the imbalance further up, so this may rotate at every ancestor.
/// The walk stops once a subtree's height is shown unchanged: an ancestor
/// factor lands on ±1, or the rotation pivoted on an equal-height child.
/// Returns the tree's new root.
pub(crate) fn retrace_remove<T>(
    arena: &mut Arena<T>,
    root: u32,
    start: u32,
    shrank_left: bool,
) -> u32 {
    let mut n = start;
    let mut shrank_left = shrank_left;
    loop {
        let nbf = bf(arena, n) + if shrank_left { 1 } else { -1 };
        set_bf(arena, n, nbf);

        let sub = match nbf {
            -1 | 1 => return root,
            0 => n,
            _ => {
                let heavy = if nbf > 0 {
                    r(arena, n).expect("right-heavy node has a right child")
                } else {
                    l(arena, n).expect("left-heavy node has a left child")
                };
                let height_kept = bf(arena, heavy) == 0;
                let sub = rebalance(arena, n);
                if height_kept {
                    return if p(arena, sub).is_none() { sub } else { root };
                }
                sub
            }
        };

        match p(arena, sub) {
            None => return sub,
            Some(par) => {
                shrank_left = l(arena, par) == Some(sub);
                n = par;
            }
        }
    }
}
