use thiserror::Error;

/// Detectable handle misuse, reported instead of corrupting the tree.
///
/// A stale handle whose slot has since been reused by a newer insertion is
/// indistinguishable from a live one and stays a documented caller error,
/// as does a handle minted by a different tree that happens to land on an
/// occupied slot.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    /// The handle's slot was vacated by a prior removal.
    #[error("node handle refers to a removed entry")]
    StaleNode,

    /// The handle does not address a slot of this tree's arena.
    #[error("node handle is out of bounds for this tree")]
    OutOfBounds,
}
