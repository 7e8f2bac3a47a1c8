use std::mem;

use crate::hash::{Algorithm, Element};

/// Shape of a node relative to the level below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Children {
    /// Leaf, lives on level 0.
    None,
    /// Interior node with both children.
    Pair,
    /// Interior node with a lone left child. The right slot may still be
    /// filled while the tree grows.
    Left,
    /// Lone left child in a locked tree, hashed against itself.
    Duplicate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum State<T> {
    Empty,
    Value(Vec<u8>),
    Resolved(T),
    // digest was handed to the parent and dropped
    Released,
}

/// A single vertex of the tree.
///
/// Nodes don't reference each other: the tree keeps them in levels and
/// passes the children digests in when a node is asked to resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node<T: Element> {
    children: Children,
    state: State<T>,
}

impl<T: Element> Node<T> {
    /// Creates an empty leaf.
    pub fn leaf() -> Node<T> {
        Node {
            children: Children::None,
            state: State::Empty,
        }
    }

    /// Creates an interior node over two children.
    pub fn pair() -> Node<T> {
        Node {
            children: Children::Pair,
            state: State::Empty,
        }
    }

    /// Creates an interior node over a lone left child.
    pub fn degenerate() -> Node<T> {
        Node {
            children: Children::Left,
            state: State::Empty,
        }
    }

    /// Returns the node shape.
    pub fn children(&self) -> Children {
        self.children
    }

    /// Returns `true` if the node has neither a value nor a digest.
    pub fn is_empty(&self) -> bool {
        self.state == State::Empty
    }

    /// Returns `true` once the node digest is known, even if it was
    /// already released.
    pub fn is_resolved(&self) -> bool {
        matches!(self.state, State::Resolved(_) | State::Released)
    }

    /// Returns the memoized digest, unless unresolved or released.
    pub fn digest(&self) -> Option<&T> {
        match self.state {
            State::Resolved(ref digest) => Some(digest),
            _ => None,
        }
    }

    /// Fills the right slot of a degenerate node.
    pub(crate) fn complete(&mut self) {
        debug_assert_eq!(self.children, Children::Left);
        self.children = Children::Pair;
    }

    /// Marks a degenerate node as duplicable. No-op for other shapes.
    pub(crate) fn lock(&mut self) {
        if self.children == Children::Left {
            self.children = Children::Duplicate;
        }
    }

    /// Sets the raw leaf value. The value is hashed on [`Node::try_resolve`].
    pub fn assign_leaf(&mut self, value: &[u8]) {
        debug_assert_eq!(self.children, Children::None);
        debug_assert!(self.is_empty());
        self.state = State::Value(value.to_vec());
    }

    /// Sets an already hashed leaf value.
    pub fn assign_digest(&mut self, digest: T) {
        debug_assert_eq!(self.children, Children::None);
        debug_assert!(self.is_empty());
        self.state = State::Resolved(digest);
    }

    /// Resolves the node digest if enough is known.
    ///
    /// `left` and `right` are the digests of the children, if any. A leaf
    /// hashes its value, a pair needs both children, a duplicable node needs
    /// its left child and a degenerate one never resolves.
    pub fn try_resolve<A: Algorithm<T>>(
        &mut self,
        alg: &mut A,
        left: Option<&T>,
        right: Option<&T>,
    ) -> Option<T> {
        let digest = match (&self.state, self.children) {
            (State::Resolved(digest), _) => return Some(digest.clone()),
            (State::Released, _) => return None,
            (State::Value(value), Children::None) => alg.leaf(value),
            (State::Empty, Children::Pair) => alg.node(left?, right?),
            (State::Empty, Children::Duplicate) => {
                let left = left?;
                alg.node(left, left)
            }
            _ => return None,
        };

        self.state = State::Resolved(digest.clone());
        Some(digest)
    }

    /// Drops the memoized digest once the parent consumed it.
    pub fn release(&mut self) -> Option<T> {
        match mem::replace(&mut self.state, State::Released) {
            State::Resolved(digest) => Some(digest),
            state => {
                self.state = state;
                None
            }
        }
    }
}
