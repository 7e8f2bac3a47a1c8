//! Incremental _Merkle Tree_ of a fixed width.
//!
//! The tree root is computed over a number of leafs known up front, while the
//! leafs themselves arrive one by one and in any order, e.g. chunks of a file
//! downloaded out of sequence. Hashing starts with the first leaf: every
//! subtree is hashed as soon as its last leaf arrives and its children are
//! dropped, so memory follows the unresolved frontier rather than the leaf
//! count.
//!
//! The tree is stored as a vec of levels, level 0 being the leafs, with nodes
//! addressed by `(level, index)`. Each level has `ceil(n / 2)` nodes of the
//! level below it. Hashing follows the Bitcoin style duplication scheme:
//!
//! ```text
//! leaf        = H(data)
//! interior    = H(left || right)
//! no sibling  = H(left || left)
//! ```
//!
//! A node without a right sibling is hashed against itself rather than
//! promoted unchanged. Verifiers of the root must use the same rule.
//!
//! Link: [](https://en.wikipedia.org/wiki/Merkle_tree)
//!
//! # Interface
//!
//! ```text
//! - new (width, algorithm, on_complete?) -> tree
//! - set (index, data)
//! - hash -> root?
//! ```
//!
//! [`hash::Algorithm`] is the hash function. It follows [`std::hash::Hasher`]
//! and returns full length digests; [`hash::FnAlgorithm`] adapts a plain
//! closure. The crate does not depend on any crypto library.
//!
//! # Quick start
//!
//! ```
//! use incremental_merkle::hash::FnAlgorithm;
//! use incremental_merkle::merkle::FixedSizeTree;
//!
//! // toy hash for the example: wrapping byte sum
//! let alg = FnAlgorithm::new(|data: &[u8]| {
//!     vec![data.iter().fold(0u8, |acc, x| acc.wrapping_add(*x))]
//! });
//!
//! let mut t = FixedSizeTree::new(3, alg).unwrap();
//! t.set(2, "Dune").unwrap();
//! t.set(0, "Children").unwrap();
//! assert_eq!(t.hash(), None);
//!
//! t.set(1, "of").unwrap();
//! assert!(t.hash().is_some());
//! ```

#![deny(
    missing_docs,
    unused_qualifications,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unstable_features,
    unused_import_braces
)]

/// Hash infrastructure for nodes in the tree.
pub mod hash;

/// Tree errors.
pub mod error;

/// Tree nodes.
pub mod node;

/// Tree growing one leaf at a time.
pub mod growable;

/// Fixed width tree filled in any order.
pub mod merkle;

/// Tree configuration.
pub mod config;

/// Tree shared between threads.
pub mod shared;

pub use config::TreeConfig;
pub use error::{Error, Result};
pub use merkle::FixedSizeTree;
pub use shared::SharedTree;


/// Tests XOR128.
#[cfg(test)]
mod test_xor128;

/// Tests for closure hash functions.
#[cfg(test)]
mod test_cmh;
