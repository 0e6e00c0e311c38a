//! Arena-backed AVL tree with stable node handles.
//!
//! An ordered, self-balancing tree over arbitrary payload types, totally
//! ordered by a caller-supplied comparator. Every insertion returns a
//! [`NodeId`] handle; holding a handle lets a caller read or rewrite the
//! payload and remove the entry directly, with no re-search. Instead of
//! raw pointers, all tree links are `Option<u32>` indices into a slot
//! arena, and removal reclaims slots through a free-list.
//!
//! The container is strictly single-threaded and never blocks or performs
//! I/O. Mutation takes `&mut self`, and cursors borrow the tree, so the
//! borrow checker rejects mutation mid-traversal.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`tree`] | [`AvlTree`]: insert / find / remove / bounds / validator |
//! | [`iter`] | [`Direction`] and the [`TreeIter`] cursor |
//! | [`error`] | [`TreeError`] for detectable handle misuse |
//!
//! # Example
//!
//! ```
//! use avl_arena::{AvlTree, Direction};
//!
//! let mut tree = AvlTree::new();
//! let five = tree.insert(5);
//! tree.insert(3);
//! tree.insert(8);
//!
//! assert_eq!(tree.len(), 3);
//! assert_eq!(tree.find(&8).map(|n| *tree.value(n)), Some(8));
//!
//! let forward: Vec<i32> = tree
//!     .iter(Direction::Forward)
//!     .map(|n| *tree.value(n))
//!     .collect();
//! assert_eq!(forward, vec![3, 5, 8]);
//!
//! assert_eq!(tree.remove(five), Ok(5));
//! assert_eq!(tree.find(&5), None);
//! ```

mod arena;
mod balance;
mod node;
mod util;

pub mod error;
pub mod iter;
pub mod tree;

pub use error::TreeError;
pub use iter::{Direction, TreeIter};
pub use node::NodeId;
pub use tree::AvlTree;
