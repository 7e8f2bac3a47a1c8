use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::Result;
use crate::hash::{Algorithm, Element};
use crate::merkle::FixedSizeTree;

/// Cloneable handle to a [`FixedSizeTree`] shared between producers.
///
/// Every call takes a single tree-wide lock, so leafs fetched by independent
/// threads can be set as they arrive. The completion callback runs on the
/// thread whose `set` resolved the root, with the lock held: it must not
/// call back into the same tree.
#[derive(Debug)]
pub struct SharedTree<T, A>
where
    T: Element,
    A: Algorithm<T>,
{
    tree: Arc<Mutex<FixedSizeTree<T, A>>>,
}

impl<T: Element, A: Algorithm<T>> Clone for SharedTree<T, A> {
    fn clone(&self) -> Self {
        SharedTree {
            tree: Arc::clone(&self.tree),
        }
    }
}

impl<T: Element, A: Algorithm<T>> From<FixedSizeTree<T, A>> for SharedTree<T, A> {
    fn from(tree: FixedSizeTree<T, A>) -> Self {
        SharedTree {
            tree: Arc::new(Mutex::new(tree)),
        }
    }
}

impl<T: Element, A: Algorithm<T>> SharedTree<T, A> {
    // A failed `set` never leaves the tree half updated, and a panicking
    // callback has already been taken out, so the state behind a poisoned
    // lock is still consistent.
    fn lock(&self) -> MutexGuard<'_, FixedSizeTree<T, A>> {
        self.tree.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// See [`FixedSizeTree::set`].
    pub fn set<D: AsRef<[u8]>>(&self, index: usize, data: D) -> Result<()> {
        self.lock().set(index, data)
    }

    /// See [`FixedSizeTree::set_digest`].
    pub fn set_digest(&self, index: usize, digest: T) -> Result<()> {
        self.lock().set_digest(index, digest)
    }

    /// See [`FixedSizeTree::hash`].
    pub fn hash(&self) -> Option<T> {
        self.lock().hash()
    }

    /// See [`FixedSizeTree::is_complete`].
    pub fn is_complete(&self) -> bool {
        self.lock().is_complete()
    }

    /// See [`FixedSizeTree::width`].
    pub fn width(&self) -> usize {
        self.lock().width()
    }
}
