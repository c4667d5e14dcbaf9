//! Incremental traversal of a [`MultiKeyMap`] trie.
//!
//! A [`Traversal`] descends the trie one atomic key at a time,
//! independently of the key registry, so a caller can discover whether a
//! growing prefix of keys already resolves to a stored value without
//! supplying a full tuple upfront.

use std::borrow::Borrow;
use std::hash::Hash;

use super::node::TrieNode;

/// The outcome of one [`Traversal::advance`] step.
///
/// Distinguishes a dead end ([`Exhausted`](TraversalStep::Exhausted))
/// from a node that exists but holds no value yet
/// ([`Bridge`](TraversalStep::Bridge)): a bridge is an intermediate
/// prefix on the way to one or more stored entries.
#[derive(Debug, PartialEq, Eq)]
pub enum TraversalStep<'a, V> {
    /// No edge existed for the supplied key. The cursor is permanently
    /// exhausted; every further advance reports this again.
    Exhausted,
    /// The edge existed and the cursor moved, but the reached node stores
    /// no value of its own.
    Bridge,
    /// The edge existed and the reached node stores a value.
    Found(&'a V),
}

impl<'a, V> TraversalStep<'a, V> {
    /// Returns `true` for [`TraversalStep::Exhausted`].
    #[inline]
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted)
    }

    /// Returns the stored value for [`TraversalStep::Found`], `None`
    /// otherwise.
    #[inline]
    #[must_use]
    pub const fn value(&self) -> Option<&'a V> {
        match *self {
            Self::Found(value) => Some(value),
            Self::Exhausted | Self::Bridge => None,
        }
    }
}

// Manual impls: the step holds at most a `&V`, which is copyable even
// when `V` is not, so no `V: Copy` bound is needed.
impl<V> Clone for TraversalStep<'_, V> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for TraversalStep<'_, V> {}

/// A cursor descending the trie one atomic key at a time.
///
/// Created by [`MultiKeyMap::traverse`](super::MultiKeyMap::traverse),
/// positioned at the root. The cursor only moves forward; once a supplied
/// key has no edge it becomes exhausted and stays so.
///
/// # Examples
///
/// ```rust
/// use multikey_map::{MultiKeyMap, TraversalStep};
///
/// let mut map = MultiKeyMap::new();
/// map.set(["a", "b", "c"], "v");
///
/// let mut cursor = map.traverse();
/// assert_eq!(cursor.advance(&"a"), TraversalStep::Bridge);
/// assert_eq!(cursor.advance(&"b"), TraversalStep::Bridge);
/// assert_eq!(cursor.advance(&"c"), TraversalStep::Found(&"v"));
///
/// // A dead end is permanent
/// assert_eq!(cursor.advance(&"d"), TraversalStep::Exhausted);
/// assert_eq!(cursor.advance(&"a"), TraversalStep::Exhausted);
/// ```
pub struct Traversal<'a, K: Clone + Eq + Hash, V: Clone> {
    node: Option<&'a TrieNode<K, V>>,
}

impl<'a, K: Clone + Eq + Hash, V: Clone> Traversal<'a, K, V> {
    #[inline]
    pub(crate) fn new(root: &'a TrieNode<K, V>) -> Self {
        Self { node: Some(root) }
    }

    /// Follows the edge for `key` from the current node.
    ///
    /// If the cursor is already exhausted, or no edge exists for `key`,
    /// returns [`TraversalStep::Exhausted`] now and forever. Otherwise
    /// the cursor moves to the child and reports whether that node stores
    /// a value ([`TraversalStep::Found`]) or is an intermediate prefix
    /// ([`TraversalStep::Bridge`]).
    ///
    /// The key can be supplied in any borrowed form, as with
    /// [`MultiKeyMap::get`](super::MultiKeyMap::get).
    pub fn advance<Q>(&mut self, key: &Q) -> TraversalStep<'a, V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let Some(node) = self.node else {
            return TraversalStep::Exhausted;
        };

        match node.children.get(key) {
            None => {
                self.node = None;
                TraversalStep::Exhausted
            }
            Some(child) => {
                self.node = Some(child);
                child.entry.as_ref().map_or(TraversalStep::Bridge, |entry| {
                    TraversalStep::Found(&entry.value)
                })
            }
        }
    }

    /// Returns `true` once the cursor has hit a dead end.
    #[inline]
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.node.is_none()
    }
}
