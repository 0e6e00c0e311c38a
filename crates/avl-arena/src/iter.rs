//! Directional cursor over the tree.

use crate::node::NodeId;
use crate::tree::AvlTree;
use crate::util;

/// Traversal direction of a [`TreeIter`], fixed at creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Minimum to maximum, by in-order successor.
    Forward,
    /// Maximum to minimum, by in-order predecessor.
    Backward,
}

#[derive(Clone, Copy, Debug)]
enum Cursor {
    Unpositioned,
    At(u32),
    Exhausted,
}

/// Stateful cursor stepping one in-order neighbor at a time through the
/// parent back-references; no re-search from the root, O(1) amortized per
/// step.
///
/// The cursor borrows the tree for its whole lifetime, so the
/// mutate-mid-traversal hazard is rejected at compile time; drop the
/// cursor (or restart with [`first`](TreeIter::first) afterwards) to
/// mutate.
pub struct TreeIter<'t, T, C = fn(&T, &T) -> i32>
where
    C: Fn(&T, &T) -> i32,
{
    tree: &'t AvlTree<T, C>,
    direction: Direction,
    cursor: Cursor,
}

impl<'t, T, C> TreeIter<'t, T, C>
where
    C: Fn(&T, &T) -> i32,
{
    pub(crate) fn new(tree: &'t AvlTree<T, C>, direction: Direction) -> Self {
        Self {
            tree,
            direction,
            cursor: Cursor::Unpositioned,
        }
    }

    /// Rewinds to the first entry in the cursor's direction: the tree
    /// minimum going forward, the maximum going backward. Resets any prior
    /// position; `None` on an empty tree.
    pub fn first(&mut self) -> Option<NodeId> {
        let start = match self.direction {
            Direction::Forward => util::leftmost(&self.tree.arena, self.tree.root),
            Direction::Backward => util::rightmost(&self.tree.arena, self.tree.root),
        };
        self.cursor = match start {
            Some(i) => Cursor::At(i),
            None => Cursor::Exhausted,
        };
        start.map(NodeId)
    }

    /// Advances one step and returns the new current entry.
    ///
    /// A never-positioned cursor starts at the first entry. Past the last
    /// entry the cursor stays exhausted and keeps returning `None`; it does
    /// not wrap.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<NodeId> {
        match self.cursor {
            Cursor::Unpositioned => self.first(),
            Cursor::Exhausted => None,
            Cursor::At(curr) => {
                let step = match self.direction {
                    Direction::Forward => util::successor(&self.tree.arena, curr),
                    Direction::Backward => util::predecessor(&self.tree.arena, curr),
                };
                match step {
                    Some(i) => {
                        self.cursor = Cursor::At(i);
                        Some(NodeId(i))
                    }
                    None => {
                        self.cursor = Cursor::Exhausted;
                        None
                    }
                }
            }
        }
    }

    /// Current entry without advancing; `None` before any positioning and
    /// after exhaustion.
    pub fn get(&self) -> Option<NodeId> {
        match self.cursor {
            Cursor::At(i) => Some(NodeId(i)),
            _ => None,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }
}

impl<T, C> Iterator for TreeIter<'_, T, C>
where
    C: Fn(&T, &T) -> i32,
{
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        TreeIter::next(self)
    }
}
