use std::fmt;

use log::debug;

use crate::config::TreeConfig;
use crate::error::{Error, Result};
use crate::growable::GrowableBinaryTree;
use crate::hash::{Algorithm, Element};

/// Callback invoked with the root digest when the tree completes.
pub type OnComplete<T> = Box<dyn FnOnce(&T) + Send>;

/// Merkle tree of a width known up front, filled in any order.
///
/// The whole node graph is built and locked on construction, before any
/// data is known. Leafs are then [`set`] one at a time, in any order, and
/// every subtree that can be hashed is hashed as soon as its last leaf
/// arrives. This fits data received out of order, e.g. chunks of a file
/// fetched concurrently: knowing the file length and the chunk size gives
/// the width (see [`TreeConfig::for_content`]).
///
/// ```text
///         root = h(h01 + h22)
///        /                   \
///  h01 = h(h0 + h1)     h22 = h(h2 + h2)
///   /        \            /
/// h0 = h(d0) h1 = h(d1) h2 = h(d2)
/// ```
///
/// A node without a right sibling is hashed against itself (`h22` above).
/// The root does not depend on the order leafs were set in.
///
/// [`set`]: FixedSizeTree::set
pub struct FixedSizeTree<T, A>
where
    T: Element,
    A: Algorithm<T>,
{
    tree: GrowableBinaryTree<T, A>,
    on_complete: Option<OnComplete<T>>,
}

impl<T: Element, A: Algorithm<T>> FixedSizeTree<T, A> {
    /// Creates new tree of `width` leafs.
    pub fn new(width: usize, alg: A) -> Result<FixedSizeTree<T, A>> {
        if width < 1 {
            return Err(Error::InvalidWidth { width });
        }

        let mut tree = GrowableBinaryTree::new(alg);
        for _ in 0..width {
            tree.add_leaf_node()?;
        }
        tree.lock();
        debug!("fixed size tree: width {}, height {}", width, tree.height());

        Ok(FixedSizeTree {
            tree,
            on_complete: None,
        })
    }

    /// Creates new tree of `width` leafs calling `on_complete` once with the
    /// root digest, from within the [`FixedSizeTree::set`] call that resolves it.
    pub fn with_callback<F>(width: usize, alg: A, on_complete: F) -> Result<FixedSizeTree<T, A>>
    where
        F: FnOnce(&T) + Send + 'static,
    {
        let mut tree = Self::new(width, alg)?;
        tree.on_complete = Some(Box::new(on_complete));
        Ok(tree)
    }

    /// Creates new tree of `config.width` leafs.
    pub fn from_config(config: &TreeConfig, alg: A) -> Result<FixedSizeTree<T, A>> {
        Self::new(config.width, alg)
    }

    /// Hashes `data` into leaf `index`.
    pub fn set<D: AsRef<[u8]>>(&mut self, index: usize, data: D) -> Result<()> {
        let root = self.tree.set_data(index, data)?;
        self.resolved(root);
        Ok(())
    }

    /// Sets leaf `index` to an already hashed value.
    pub fn set_digest(&mut self, index: usize, digest: T) -> Result<()> {
        let root = self.tree.set(index, digest)?;
        self.resolved(root);
        Ok(())
    }

    fn resolved(&mut self, root: Option<T>) {
        if let Some(root) = root {
            if let Some(on_complete) = self.on_complete.take() {
                on_complete(&root);
            }
        }
    }

    /// Returns merkle root, `None` until every leaf is set.
    pub fn hash(&self) -> Option<T> {
        self.tree.root()
    }

    /// Returns `true` once the root is resolved.
    pub fn is_complete(&self) -> bool {
        self.tree.root().is_some()
    }

    /// Returns `true` if leaf `index` was set.
    pub fn is_assigned(&self, index: usize) -> bool {
        self.tree.is_assigned(index)
    }

    /// Returns number of leafs set so far.
    pub fn assigned(&self) -> usize {
        (0..self.width()).filter(|&i| self.is_assigned(i)).count()
    }

    /// Returns number of leafs.
    pub fn width(&self) -> usize {
        self.tree.leafs()
    }

    /// Returns height of the tree, leafs included.
    pub fn height(&self) -> usize {
        self.tree.height()
    }
}

impl<T, A> fmt::Debug for FixedSizeTree<T, A>
where
    T: Element,
    A: Algorithm<T> + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("FixedSizeTree")
            .field("tree", &self.tree)
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}
