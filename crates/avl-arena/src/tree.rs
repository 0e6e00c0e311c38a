//! The ordered-tree container.

use std::fmt;

use crate::arena::Arena;
use crate::balance;
use crate::error::TreeError;
use crate::iter::{Direction, TreeIter};
use crate::node::{NodeId, Slot};
use crate::util;

fn default_comparator<T: PartialOrd>(a: &T, b: &T) -> i32 {
    if a == b {
        0
    } else if a < b {
        -1
    } else {
        1
    }
}

/// Self-balancing ordered tree over values of `T`, totally ordered by a
/// caller-supplied comparator.
///
/// Entries are addressed by [`NodeId`] handles, so a caller can hold on to
/// an inserted entry and remove it later without re-searching. The tree is
/// single-threaded: every mutation takes `&mut self` and there is no
/// internal locking, so sharing across threads needs external mutual
/// exclusion.
///
/// The comparator must stay consistent (antisymmetric, transitive) for the
/// tree's whole lifetime; so must the comparator-relevant part of any
/// payload mutated through [`value_mut`](AvlTree::value_mut).
pub struct AvlTree<T, C = fn(&T, &T) -> i32>
where
    C: Fn(&T, &T) -> i32,
{
    pub(crate) root: Option<u32>,
    pub(crate) arena: Arena<T>,
    comparator: C,
    len: usize,
}

impl<T> AvlTree<T, fn(&T, &T) -> i32>
where
    T: PartialOrd,
{
    /// Empty tree ordered by `PartialOrd`.
    pub fn new() -> Self {
        Self::with_comparator(default_comparator::<T>)
    }
}

impl<T> Default for AvlTree<T, fn(&T, &T) -> i32>
where
    T: PartialOrd,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C> AvlTree<T, C>
where
    C: Fn(&T, &T) -> i32,
{
    /// Empty tree ordered by `comparator` (negative / zero / positive for
    /// less / equal / greater).
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            root: None,
            arena: Arena::new(),
            comparator,
            len: 0,
        }
    }

    #[inline]
    fn compare(&self, a: &T, b: &T) -> i32 {
        (self.comparator)(a, b)
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Inserts `value` and returns its handle.
    ///
    /// Insertion is idempotent on key equality: if an entry comparing equal
    /// already exists, its handle is returned, the stored payload is left
    /// untouched, `value` is dropped, and the length does not change.
    pub fn insert(&mut self, value: T) -> NodeId {
        let Some(root) = self.root else {
            let i = self.arena.alloc(value);
            self.root = Some(i);
            self.len = 1;
            return NodeId(i);
        };

        let mut curr = root;
        loop {
            let cmp = self.compare(&value, &self.arena.node(curr).value);
            if cmp == 0 {
                return NodeId(curr);
            }
            let next = if cmp < 0 {
                self.arena.node(curr).l
            } else {
                self.arena.node(curr).r
            };
            match next {
                Some(next) => curr = next,
                None => {
                    let i = self.arena.alloc(value);
                    util::set_p(&mut self.arena, i, Some(curr));
                    if cmp < 0 {
                        util::set_l(&mut self.arena, curr, Some(i));
                    } else {
                        util::set_r(&mut self.arena, curr, Some(i));
                    }
                    self.len += 1;
                    self.root = Some(balance::retrace_insert(&mut self.arena, root, i));
                    return NodeId(i);
                }
            }
        }
    }

    /// Handle of the entry comparing equal to `value`, if any.
    pub fn find(&self, value: &T) -> Option<NodeId> {
        util::search(&self.arena, self.root, value, &self.comparator).map(NodeId)
    }

    /// Exact match for `value`, or the greatest entry ordered below it.
    pub fn get_or_next_lower(&self, value: &T) -> Option<NodeId> {
        util::search_or_next_lower(&self.arena, self.root, value, &self.comparator).map(NodeId)
    }

    /// Removes the entry behind `node` and returns its payload.
    ///
    /// When the node has two children its in-order successor's payload is
    /// moved into it and the successor node is the one structurally
    /// deleted: the passed handle stays live (now holding the successor's
    /// payload) while the successor's old handle goes stale. The payload
    /// returned is always the one logically removed.
    ///
    /// A handle whose slot was already vacated, or that does not address
    /// this tree's arena, is rejected with an error. A stale handle whose
    /// slot has been reused by a later insertion cannot be told apart from
    /// a live one and will remove that newer entry; do not retain handles
    /// past removal.
    pub fn remove(&mut self, node: NodeId) -> Result<T, TreeError> {
        let i = node.0;
        if !self.arena.in_bounds(i) {
            return Err(TreeError::OutOfBounds);
        }
        if !self.arena.is_occupied(i) {
            return Err(TreeError::StaleNode);
        }

        // A node with two children trades payloads with its in-order
        // successor, which has no left child and can be unlinked directly.
        let two_children =
            self.arena.node(i).l.is_some() && self.arena.node(i).r.is_some();
        let target = if two_children {
            util::successor(&self.arena, i).expect("node with a right child has a successor")
        } else {
            i
        };

        self.unlink(target);
        self.len -= 1;

        let payload = self.arena.release(target);
        if two_children {
            Ok(std::mem::replace(
                &mut self.arena.node_mut(i).value,
                payload,
            ))
        } else {
            Ok(payload)
        }
    }

    /// Structurally detaches `target`, which has at most one child, and
    /// retraces balance factors from its parent.
    fn unlink(&mut self, target: u32) {
        let par = util::p(&self.arena, target);
        let child = util::l(&self.arena, target).or(util::r(&self.arena, target));

        if let Some(child) = child {
            util::set_p(&mut self.arena, child, par);
        }
        match par {
            None => self.root = child,
            Some(par) => {
                let shrank_left = util::l(&self.arena, par) == Some(target);
                if shrank_left {
                    util::set_l(&mut self.arena, par, child);
                } else {
                    util::set_r(&mut self.arena, par, child);
                }
                let root = self.root.expect("non-empty tree has a root");
                self.root = Some(balance::retrace_remove(
                    &mut self.arena,
                    root,
                    par,
                    shrank_left,
                ));
            }
        }
    }

    /// Minimum entry.
    pub fn first(&self) -> Option<NodeId> {
        util::leftmost(&self.arena, self.root).map(NodeId)
    }

    /// Maximum entry.
    pub fn last(&self) -> Option<NodeId> {
        util::rightmost(&self.arena, self.root).map(NodeId)
    }

    /// Payload of a live entry.
    ///
    /// Panics on a handle whose slot is vacant or out of range.
    pub fn value(&self, node: NodeId) -> &T {
        &self.arena.node(node.0).value
    }

    /// Mutable payload of a live entry.
    ///
    /// Panics on a handle whose slot is vacant or out of range. Mutating
    /// the part of the payload the comparator looks at breaks the tree's
    /// ordering invariant.
    pub fn value_mut(&mut self, node: NodeId) -> &mut T {
        &mut self.arena.node_mut(node.0).value
    }

    /// Directional cursor over the tree.
    pub fn iter(&self, direction: Direction) -> TreeIter<'_, T, C> {
        TreeIter::new(self, direction)
    }

    /// Drops every entry and reclaims the arena. All handles go stale.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
        self.len = 0;
    }

    /// Structural validator: reciprocal links, cached balance factors
    /// against recomputed heights, the AVL bound, strict in-order ordering,
    /// and slot/free-list accounting.
    pub fn assert_valid(&self) -> Result<(), String> {
        let occupied = self
            .arena
            .slots
            .iter()
            .filter(|s| matches!(s, Slot::Occupied(_)))
            .count();
        if occupied != self.len {
            return Err(format!(
                "length mismatch: {occupied} occupied slots, len {}",
                self.len
            ));
        }

        let mut free_len = 0usize;
        let mut cursor = self.arena.free;
        while let Some(i) = cursor {
            if free_len > self.arena.slots.len() {
                return Err("free-list cycle".to_string());
            }
            match self.arena.slots.get(i as usize) {
                Some(Slot::Vacant { next_free }) => {
                    free_len += 1;
                    cursor = *next_free;
                }
                _ => return Err(format!("free-list entry {i} is occupied or out of bounds")),
            }
        }
        if self.len + free_len != self.arena.slots.len() {
            return Err(format!(
                "slot accounting mismatch: {} live + {free_len} free != {} slots",
                self.len,
                self.arena.slots.len()
            ));
        }

        let Some(root) = self.root else {
            return if self.len == 0 {
                Ok(())
            } else {
                Err("empty root with non-zero length".to_string())
            };
        };
        let root_node = self
            .arena
            .get(root)
            .ok_or_else(|| format!("root slot {root} is vacant"))?;
        if root_node.p.is_some() {
            return Err("root has a parent".to_string());
        }

        let (_, count) = check_subtree(&self.arena, root)?;
        if count != self.len {
            return Err(format!("reachable node count {count} != len {}", self.len));
        }

        let mut curr = util::leftmost(&self.arena, self.root);
        let mut prev: Option<u32> = None;
        while let Some(i) = curr {
            if let Some(prev) = prev {
                let cmp = self.compare(&self.arena.node(prev).value, &self.arena.node(i).value);
                if cmp >= 0 {
                    return Err("in-order traversal is not strictly increasing".to_string());
                }
            }
            prev = Some(i);
            curr = util::successor(&self.arena, i);
        }

        Ok(())
    }

    /// Indented debug rendering of the tree shape.
    pub fn print(&self) -> String
    where
        T: fmt::Debug,
    {
        print_node(&self.arena, self.root, "")
    }
}

impl<T, C> fmt::Debug for AvlTree<T, C>
where
    C: Fn(&T, &T) -> i32,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AvlTree")
            .field("len", &self.len)
            .finish_non_exhaustive()
    }
}

/// Validates links and balance factors below `i`; returns `(height, count)`.
fn check_subtree<T>(arena: &Arena<T>, i: u32) -> Result<(usize, usize), String> {
    let node = arena
        .get(i)
        .ok_or_else(|| format!("linked slot {i} is vacant"))?;

    let (lh, lc) = match node.l {
        Some(l) => {
            let child = arena
                .get(l)
                .ok_or_else(|| format!("linked slot {l} is vacant"))?;
            if child.p != Some(i) {
                return Err(format!("broken parent link on left child of slot {i}"));
            }
            check_subtree(arena, l)?
        }
        None => (0, 0),
    };
    let (rh, rc) = match node.r {
        Some(r) => {
            let child = arena
                .get(r)
                .ok_or_else(|| format!("linked slot {r} is vacant"))?;
            if child.p != Some(i) {
                return Err(format!("broken parent link on right child of slot {i}"));
            }
            check_subtree(arena, r)?
        }
        None => (0, 0),
    };

    let expected = rh as i32 - lh as i32;
    if node.bf != expected {
        return Err(format!(
            "balance factor mismatch at slot {i}: expected {expected}, got {}",
            node.bf
        ));
    }
    if !(-1..=1).contains(&node.bf) {
        return Err(format!("AVL balance violated at slot {i}"));
    }

    Ok((1 + lh.max(rh), 1 + lc + rc))
}

fn print_node<T: fmt::Debug>(arena: &Arena<T>, node: Option<u32>, tab: &str) -> String {
    match node {
        None => "∅".to_string(),
        Some(i) => {
            let n = arena.node(i);
            let left = print_node(arena, n.l, &format!("{tab}  "));
            let right = print_node(arena, n.r, &format!("{tab}  "));
            format!(
                "Node[{i}] [bf={}] {{ {:?} }}\n{tab}L={left}\n{tab}R={right}",
                n.bf, n.value
            )
        }
    }
}
