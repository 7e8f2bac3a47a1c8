use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Caller misuse reported by the tree.
///
/// None of these leave the tree in a changed state: a rejected call keeps all
/// prior assignments and resolution progress, and the tree stays usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// A fixed size tree needs at least one leaf.
    #[error("width cannot be less than 1 (got {width})")]
    InvalidWidth {
        /// Requested width.
        width: usize,
    },

    /// Leaf index outside `[0, width)`.
    #[error("{index} is out of bounds (width: {width})")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of leafs in the tree.
        width: usize,
    },

    /// Leaf already holds a value.
    #[error("leaf {index} can only be set once")]
    DuplicateAssignment {
        /// Requested index.
        index: usize,
    },

    /// Leafs can't be added once the tree shape is final.
    #[error("tree is locked")]
    Locked,

    /// Content can't be split into zero-sized chunks.
    #[error("chunk size must be greater than 0")]
    InvalidChunkSize,
}
