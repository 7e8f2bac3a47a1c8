//! Hash infrastructure for nodes of the incremental tree.

use std::fmt::{self, Debug};
use std::hash::Hasher;

/// Digest stored in the tree.
///
/// Any cloneable, comparable value with a byte view qualifies: fixed arrays
/// such as `[u8; 32]`, `Vec<u8>`, or a hex `String` when the digest is kept in
/// its textual form.
pub trait Element: Clone + Eq + AsRef<[u8]> + Debug {}

impl<T: Clone + Eq + AsRef<[u8]> + Debug> Element for T {}

/// Hashing algorithm type.
///
/// Algorithm conforms standard [`Hasher`] trait and provides methods to return
/// full length hash and reset current state. Data is written into the stream
/// with [`Hasher::write`].
///
/// The tree never inspects digests: a leaf is `hash(data)` and an interior
/// node is `hash(left ++ right)`, always left child first. A node with no right
/// sibling in a locked tree is hashed against itself, `hash(left ++ left)`.
pub trait Algorithm<T>: Hasher
where
    T: Element,
{
    /// Returns the hash value for the data stream written so far.
    fn hash(&mut self) -> T;

    /// Reset Hasher state.
    fn reset(&mut self);

    /// Returns the hash value for a leaf holding `data`.
    fn leaf(&mut self, data: &[u8]) -> T {
        self.reset();
        self.write(data);
        self.hash()
    }

    /// Returns the hash value for an interior node over `left` and `right`.
    fn node(&mut self, left: &T, right: &T) -> T {
        self.reset();
        self.write(left.as_ref());
        self.write(right.as_ref());
        self.hash()
    }
}

/// Adapts a plain `FnMut(&[u8]) -> T` into an [`Algorithm`].
///
/// Written bytes are buffered until [`Algorithm::hash`] hands the whole stream
/// to the closure, so `node(l, r)` calls the closure once with `l ++ r`.
///
/// ```
/// use incremental_merkle::hash::{Algorithm, FnAlgorithm};
///
/// let mut alg = FnAlgorithm::new(|data: &[u8]| data.len().to_string());
/// assert_eq!(alg.leaf(b"hello"), "5");
/// assert_eq!(alg.node(&"ab".to_string(), &"cde".to_string()), "5");
/// ```
pub struct FnAlgorithm<F> {
    f: F,
    buf: Vec<u8>,
}

impl<F> FnAlgorithm<F> {
    /// Wraps the hash function `f`.
    pub fn new(f: F) -> FnAlgorithm<F> {
        FnAlgorithm { f, buf: Vec::new() }
    }
}

impl<F> Debug for FnAlgorithm<F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("FnAlgorithm")
            .field("buffered", &self.buf.len())
            .finish()
    }
}

impl<F> Hasher for FnAlgorithm<F> {
    #[inline]
    fn write(&mut self, msg: &[u8]) {
        self.buf.extend_from_slice(msg)
    }

    #[inline]
    fn finish(&self) -> u64 {
        0
    }
}

impl<T, F> Algorithm<T> for FnAlgorithm<F>
where
    T: Element,
    F: FnMut(&[u8]) -> T,
{
    #[inline]
    fn hash(&mut self) -> T {
        (self.f)(&self.buf[..])
    }

    #[inline]
    fn reset(&mut self) {
        self.buf.clear();
    }
}
