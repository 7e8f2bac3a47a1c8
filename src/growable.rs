use log::{debug, trace};

use crate::error::{Error, Result};
use crate::hash::{Algorithm, Element};
use crate::node::{Children, Node};

/// Binary tree that grows from the bottom up, one leaf at a time.
///
/// Nodes are kept level by level, level 0 being the leafs. The parent of the
/// node at `(level, i)` is `(level + 1, i / 2)`. A tree with five leafs
/// looks like this:
///
/// ```text
///             O
///           /   \
///          /     \
///         O       O
///       /   \      \
///      O     O      O
///     / \   / \   /
///    O   O O   O O
/// ```
///
/// Level sizes always satisfy `size(k + 1) == ceil(size(k) / 2)` and the top
/// level holds the single root. As leafs are added the tree grows upward and
/// the root changes. Interior nodes without a right sibling subtree are
/// degenerate: they stay unresolved until either a later leaf completes them
/// or [`lock`] fixes the shape and lets them hash their lone child against
/// itself.
///
/// Digests flow upward on [`set`]: each assignment resolves as much of its
/// ancestor chain as the sibling digests allow, and children digests are
/// dropped as soon as their parent has them.
///
/// [`lock`]: GrowableBinaryTree::lock
/// [`set`]: GrowableBinaryTree::set
#[derive(Debug, Clone)]
pub struct GrowableBinaryTree<T, A>
where
    T: Element,
    A: Algorithm<T>,
{
    levels: Vec<Vec<Node<T>>>,
    alg: A,
    locked: bool,
    root: Option<T>,
}

impl<T: Element, A: Algorithm<T>> GrowableBinaryTree<T, A> {
    /// Creates an empty tree hashing with `alg`.
    pub fn new(alg: A) -> GrowableBinaryTree<T, A> {
        GrowableBinaryTree {
            levels: vec![Vec::new()],
            alg,
            locked: false,
            root: None,
        }
    }

    /// Adds a new leaf and returns its index.
    pub fn add_leaf_node(&mut self) -> Result<usize> {
        if self.locked {
            return Err(Error::Locked);
        }

        let index = self.leafs();
        let mut level = 0;
        let mut node = Node::leaf();
        loop {
            if self.levels.len() == level {
                self.levels.push(Vec::new());
            }
            self.levels[level].push(node);

            let size = self.levels[level].len();
            match size {
                // new provisional root
                1 => break,
                2 => {
                    debug_assert_eq!(self.levels.len(), level + 1);
                    self.levels.push(vec![Node::pair()]);
                    break;
                }
                // odd: the new node waits for a sibling under a degenerate parent
                _ if size & 1 == 1 => {
                    node = Node::degenerate();
                    level += 1;
                }
                // even: it is the sibling the previous degenerate parent waited for
                _ => {
                    self.levels[level + 1][size / 2 - 1].complete();
                    break;
                }
            }
        }

        Ok(index)
    }

    /// Fixes the tree shape.
    ///
    /// Degenerate nodes become duplicable. Those whose child was already
    /// resolved are resolved right away. Returns the root digest if this
    /// completes the tree. Locking twice is a no-op.
    pub fn lock(&mut self) -> Option<T> {
        if self.locked {
            return None;
        }
        self.locked = true;

        for level in self.levels.iter_mut().skip(1) {
            for node in level.iter_mut() {
                node.lock();
            }
        }

        debug!(
            "locked tree: {} leafs, {} levels",
            self.leafs(),
            self.height()
        );

        for level in 0..self.height() {
            let size = self.levels[level].len();
            let last = size.saturating_sub(1);
            // top level resolved before lock, or an odd tail that waited for lock
            let pending = size & 1 == 1 && self.levels[level][last].digest().is_some();
            if pending {
                if let Some(root) = self.propagate(level, last) {
                    return Some(root);
                }
            }
        }

        None
    }

    /// Assigns the digest of leaf `index` and resolves its ancestors.
    ///
    /// Returns the root digest if this assignment completed the tree.
    pub fn set(&mut self, index: usize, digest: T) -> Result<Option<T>> {
        self.check_leaf(index)?;
        self.levels[0][index].assign_digest(digest);
        Ok(self.propagate(0, index))
    }

    /// Hashes `data` into leaf `index` and resolves its ancestors.
    ///
    /// Returns the root digest if this assignment completed the tree.
    pub fn set_data<D: AsRef<[u8]>>(&mut self, index: usize, data: D) -> Result<Option<T>> {
        self.check_leaf(index)?;
        let leaf = &mut self.levels[0][index];
        leaf.assign_leaf(data.as_ref());
        leaf.try_resolve(&mut self.alg, None, None);
        Ok(self.propagate(0, index))
    }

    fn check_leaf(&self, index: usize) -> Result<()> {
        let width = self.leafs();
        if index >= width {
            return Err(Error::IndexOutOfRange { index, width });
        }
        if !self.levels[0][index].is_empty() {
            return Err(Error::DuplicateAssignment { index });
        }

        Ok(())
    }

    /// Walks up from a resolved node, resolving parents until one is
    /// missing data. Returns the root if the walk reached it in a locked tree.
    fn propagate(&mut self, mut level: usize, mut i: usize) -> Option<T> {
        loop {
            if self.levels[level].len() == 1 {
                return self.complete(level);
            }

            let parent = i / 2;
            let left = parent * 2;
            let (below, above) = self.levels.split_at_mut(level + 1);
            let row = &mut below[level];

            let digest = above[0][parent].try_resolve(
                &mut self.alg,
                row[left].digest(),
                row.get(left + 1).and_then(Node::digest),
            )?;
            trace!("resolved node {} at level {}", parent, level + 1);

            row[left].release();
            if let Some(right) = row.get_mut(left + 1) {
                right.release();
            }

            debug_assert!(above[0][parent].digest() == Some(&digest));
            level += 1;
            i = parent;
        }
    }

    fn complete(&mut self, level: usize) -> Option<T> {
        if !self.locked || self.root.is_some() {
            return None;
        }

        let root = self.levels[level][0].digest().cloned();
        if root.is_some() {
            debug!("tree of {} leafs resolved", self.leafs());
            self.root = root.clone();
        }
        root
    }

    /// Returns the root digest once the locked tree is fully resolved.
    pub fn root(&self) -> Option<T> {
        self.root.clone()
    }

    /// Returns `true` once [`GrowableBinaryTree::lock`] was called.
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Returns `true` if leaf `index` holds a value.
    pub fn is_assigned(&self, index: usize) -> bool {
        self.levels[0].get(index).map_or(false, |leaf| !leaf.is_empty())
    }

    /// Returns number of leafs in the tree.
    pub fn leafs(&self) -> usize {
        self.levels[0].len()
    }

    /// Returns number of levels, leafs included.
    pub fn height(&self) -> usize {
        self.levels.len()
    }

    /// Returns nodes of `level`, level 0 being the leafs.
    pub fn level(&self, level: usize) -> &[Node<T>] {
        &self.levels[level]
    }

    /// Returns number of interior nodes still waiting for a single child.
    pub fn degenerate(&self) -> usize {
        self.levels
            .iter()
            .flatten()
            .filter(|n| n.children() == Children::Left)
            .count()
    }
}
