//! The [`MultiKeyMap`] container: key registry plus trie root.

use std::borrow::Borrow;
use std::hash::Hash;

use smallvec::SmallVec;

use super::iter::{Entries, Keys, Values};
use super::node::{INLINE_KEYS, TrieNode};
use super::traverse::Traversal;
use super::{ReferenceCounter, SharedKeys};

/// An associative container keyed by a tuple of atomic keys, where lookup
/// is insensitive to the order in which the keys were supplied.
///
/// Any permutation of a stored key tuple resolves to the same value:
/// `set(["a", "b"], v)` makes both `get(&["a", "b"])` and
/// `get(&["b", "a"])` return `v`. Order-insensitivity is achieved by
/// indexing every permutation of the tuple into a prefix tree at
/// insertion time; lookups walk the supplied order directly and never
/// search.
///
/// An entry with `n` distinct atomic keys therefore materializes `n!`
/// trie paths. This memory-for-order-independence trade-off is
/// intentional; keep tuples small (roughly 6-7 keys at most).
///
/// The map is single-threaded and synchronous. With the `arc` feature the
/// shared key-tuple handles become `Arc`, but mutating operations still
/// require exclusive access (`&mut self`), as the borrow checker enforces.
///
/// # Type Parameters
///
/// * `K` - The atomic key type. Must implement `Clone`, `Eq`, and `Hash`.
/// * `V` - The value type. Must implement `Clone`; the value is cloned
///   into every permutation leaf of its entry.
///
/// # Examples
///
/// ```rust
/// use multikey_map::MultiKeyMap;
///
/// let mut map = MultiKeyMap::new();
/// map.set(["a", "b", "c"], "foo");
///
/// assert_eq!(map.get(&["c", "a", "b"]), Some(&"foo"));
/// assert_eq!(map.len(), 1);
///
/// assert!(map.delete(&["b", "c", "a"]));
/// assert_eq!(map.get(&["a", "b", "c"]), None);
/// assert!(map.is_empty());
/// ```
#[derive(Clone)]
pub struct MultiKeyMap<K: Clone + Eq + Hash, V: Clone> {
    root: TrieNode<K, V>,
    registry: Vec<SharedKeys<K>>,
}

impl<K: Clone + Eq + Hash, V: Clone> MultiKeyMap<K, V> {
    /// Creates a new empty map.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use multikey_map::MultiKeyMap;
    ///
    /// let map: MultiKeyMap<&str, i32> = MultiKeyMap::new();
    /// assert!(map.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: TrieNode::new(),
            registry: Vec::new(),
        }
    }

    /// Returns the number of distinct key tuples currently stored.
    ///
    /// Two tuples containing the same atomic keys in different orders
    /// count as one entry.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use multikey_map::MultiKeyMap;
    ///
    /// let mut map = MultiKeyMap::new();
    /// map.set(["a", "b"], 1);
    /// map.set(["b", "a"], 2); // overwrite, not a new entry
    /// assert_eq!(map.len(), 1);
    /// ```
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// Returns `true` if the map contains no entries.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use multikey_map::MultiKeyMap;
    ///
    /// let map: MultiKeyMap<&str, i32> = MultiKeyMap::new();
    /// assert!(map.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Removes all entries from the map.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use multikey_map::MultiKeyMap;
    ///
    /// let mut map = MultiKeyMap::new();
    /// map.set(["a", "b"], 1);
    /// map.clear();
    ///
    /// assert!(map.is_empty());
    /// assert_eq!(map.get(&["a", "b"]), None);
    /// ```
    pub fn clear(&mut self) {
        self.root.children.clear();
        self.registry.clear();
    }

    /// Stores `value` under the given key tuple, addressable through any
    /// permutation of its keys.
    ///
    /// If an entry with the same multiset of keys already exists, its
    /// value is overwritten; the tuple originally used to create the
    /// entry is retained and keeps being the one yielded by iteration.
    ///
    /// An empty key tuple is a silent no-op: nothing is stored and no
    /// entry is ever observable for it.
    ///
    /// Returns `&mut Self` so calls can be chained.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use multikey_map::MultiKeyMap;
    ///
    /// let mut map = MultiKeyMap::new();
    /// map.set(["a", "b"], 1).set(["c"], 2);
    ///
    /// assert_eq!(map.get(&["b", "a"]), Some(&1));
    /// assert_eq!(map.get(&["c"]), Some(&2));
    ///
    /// // Empty tuples store nothing
    /// map.set([], 3);
    /// assert_eq!(map.len(), 2);
    /// ```
    pub fn set<I>(&mut self, keys: I, value: V) -> &mut Self
    where
        I: IntoIterator<Item = K>,
    {
        let keys: SharedKeys<K> = ReferenceCounter::new(keys.into_iter().collect());
        if keys.is_empty() {
            return self;
        }

        let key_refs: SmallVec<[&K; INLINE_KEYS]> = keys.iter().collect();
        let added = self.root.insert_permutations(&key_refs, &keys, &value);
        drop(key_refs);

        if added {
            self.registry.push(keys);
        }

        self
    }

    /// Returns a reference to the value stored under the given key tuple,
    /// or `None` if no entry matches.
    ///
    /// The trie is walked strictly in the supplied key order; because
    /// every permutation was indexed at insertion time, any ordering of a
    /// stored tuple resolves. An empty key tuple always misses.
    ///
    /// Keys can be supplied in any borrowed form, as with the standard
    /// map types: a `MultiKeyMap<String, _>` can be queried with `&str`
    /// keys directly.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use multikey_map::MultiKeyMap;
    ///
    /// let mut map = MultiKeyMap::new();
    /// map.set(["alpha".to_string(), "beta".to_string()], 1);
    ///
    /// // Query with &str, in either order, without allocating
    /// assert_eq!(map.get(["beta", "alpha"]), Some(&1));
    /// assert_eq!(map.get(["alpha", "gamma"]), None);
    /// ```
    #[must_use]
    pub fn get<'k, I, Q>(&self, keys: I) -> Option<&V>
    where
        I: IntoIterator<Item = &'k Q>,
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized + 'k,
    {
        let mut node = &self.root;
        let mut descended = false;

        for key in keys {
            node = node.children.get(key)?;
            descended = true;
        }

        if descended {
            node.entry.as_ref().map(|entry| &entry.value)
        } else {
            None
        }
    }

    /// Returns `true` if an entry is stored under the given key tuple, in
    /// any order of its keys.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use multikey_map::MultiKeyMap;
    ///
    /// let mut map = MultiKeyMap::new();
    /// map.set(["a", "b"], 1);
    ///
    /// assert!(map.has(&["b", "a"]));
    /// assert!(!map.has(&["a"]));
    /// ```
    #[must_use]
    pub fn has<'k, I, Q>(&self, keys: I) -> bool
    where
        I: IntoIterator<Item = &'k Q>,
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized + 'k,
    {
        self.get(keys).is_some()
    }

    /// Removes the entry stored under the given key tuple, retracting
    /// every permutation path it occupies and pruning trie branches that
    /// become empty.
    ///
    /// Returns `true` if an entry was removed. An empty key tuple or a
    /// tuple with no matching entry returns `false`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use multikey_map::MultiKeyMap;
    ///
    /// let mut map = MultiKeyMap::new();
    /// map.set(["a", "b"], 1);
    ///
    /// assert!(map.delete(&["b", "a"]));
    /// assert_eq!(map.get(&["a", "b"]), None);
    /// assert!(!map.delete(&["a", "b"]));
    ///
    /// let empty: [&str; 0] = [];
    /// assert!(!map.delete(&empty));
    /// ```
    pub fn delete<'k, I, Q>(&mut self, keys: I) -> bool
    where
        I: IntoIterator<Item = &'k Q>,
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized + 'k,
    {
        let keys: SmallVec<[&Q; INLINE_KEYS]> = keys.into_iter().collect();
        if keys.is_empty() {
            return false;
        }

        let Some(removed) = self.root.remove_permutations(&keys) else {
            return false;
        };

        // Every live path of the entry shares one handle, so a single
        // identity lookup retires the whole entry from the registry.
        if let Some(position) = self
            .registry
            .iter()
            .position(|stored| ReferenceCounter::ptr_eq(stored, &removed))
        {
            self.registry.remove(position);
        }

        true
    }

    /// Calls `callback` once per entry, in insertion order, passing the
    /// key tuple, the value, and the map itself.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use multikey_map::MultiKeyMap;
    ///
    /// let mut map = MultiKeyMap::new();
    /// map.set(["a"], 1).set(["b"], 2);
    ///
    /// let mut total = 0;
    /// map.for_each(|_keys, value, _map| total += value);
    /// assert_eq!(total, 3);
    /// ```
    pub fn for_each<F>(&self, mut callback: F)
    where
        F: FnMut(&[K], &V, &Self),
    {
        for keys in &self.registry {
            if let Some(value) = self.get(keys.iter()) {
                callback(keys.as_slice(), value, self);
            }
        }
    }

    /// Returns an iterator over the stored key tuples, in insertion
    /// order.
    ///
    /// Each tuple is yielded exactly as it was supplied to the `set` call
    /// that created its entry, regardless of which permutation later
    /// overwrites used.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use multikey_map::MultiKeyMap;
    ///
    /// let mut map = MultiKeyMap::new();
    /// map.set(["a", "b"], 1);
    /// map.set(["b", "a"], 2); // overwrite through a permutation
    ///
    /// let keys: Vec<&[&str]> = map.keys().collect();
    /// assert_eq!(keys, vec![&["a", "b"][..]]);
    /// ```
    #[inline]
    #[must_use]
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys::new(self)
    }

    /// Returns an iterator over the stored values, in insertion order of
    /// their entries.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use multikey_map::MultiKeyMap;
    ///
    /// let mut map = MultiKeyMap::new();
    /// map.set(["a"], 1).set(["b"], 2);
    ///
    /// let values: Vec<&i32> = map.values().collect();
    /// assert_eq!(values, vec![&1, &2]);
    /// ```
    #[inline]
    #[must_use]
    pub fn values(&self) -> Values<'_, K, V> {
        Values::new(self)
    }

    /// Returns an iterator over `(key tuple, value)` pairs, in insertion
    /// order.
    ///
    /// The cursor re-resolves each registry tuple through [`get`] when it
    /// is advanced, and once it reports exhaustion it stays exhausted.
    ///
    /// [`get`]: MultiKeyMap::get
    ///
    /// # Examples
    ///
    /// ```rust
    /// use multikey_map::MultiKeyMap;
    ///
    /// let mut map = MultiKeyMap::new();
    /// map.set(["a", "b"], 1);
    ///
    /// let entries: Vec<(&[&str], &i32)> = map.entries().collect();
    /// assert_eq!(entries, vec![(&["a", "b"][..], &1)]);
    /// ```
    #[inline]
    #[must_use]
    pub fn entries(&self) -> Entries<'_, K, V> {
        Entries::new(self)
    }

    /// Returns a fresh [`Traversal`] cursor positioned at the trie root,
    /// for exploring the map one atomic key at a time without supplying a
    /// full tuple upfront.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use multikey_map::{MultiKeyMap, TraversalStep};
    ///
    /// let mut map = MultiKeyMap::new();
    /// map.set(["a", "b"], "v");
    ///
    /// let mut cursor = map.traverse();
    /// assert_eq!(cursor.advance(&"a"), TraversalStep::Bridge);
    /// assert_eq!(cursor.advance(&"b"), TraversalStep::Found(&"v"));
    /// ```
    #[inline]
    #[must_use]
    pub fn traverse(&self) -> Traversal<'_, K, V> {
        Traversal::new(&self.root)
    }

    /// The insertion-ordered registry of stored key tuples.
    #[inline]
    pub(crate) fn registry(&self) -> &[SharedKeys<K>] {
        &self.registry
    }

    #[cfg(test)]
    pub(crate) fn root(&self) -> &TrieNode<K, V> {
        &self.root
    }
}

impl<K: Clone + Eq + Hash, V: Clone> Default for MultiKeyMap<K, V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone + Eq + Hash + std::fmt::Debug, V: Clone + std::fmt::Debug> std::fmt::Debug
    for MultiKeyMap<K, V>
{
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.debug_map().entries(self.entries()).finish()
    }
}

impl<K: Clone + Eq + Hash, V: Clone + PartialEq> PartialEq for MultiKeyMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .entries()
                .all(|(keys, value)| other.get(keys.iter()) == Some(value))
    }
}

impl<K: Clone + Eq + Hash, V: Clone + Eq> Eq for MultiKeyMap<K, V> {}

impl<K: Clone + Eq + Hash, V: Clone> Extend<(Vec<K>, V)> for MultiKeyMap<K, V> {
    fn extend<T: IntoIterator<Item = (Vec<K>, V)>>(&mut self, iter: T) {
        for (keys, value) in iter {
            self.set(keys, value);
        }
    }
}

impl<K: Clone + Eq + Hash, V: Clone> FromIterator<(Vec<K>, V)> for MultiKeyMap<K, V> {
    fn from_iter<T: IntoIterator<Item = (Vec<K>, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_set_empty_tuple_creates_no_nodes() {
        let mut map: MultiKeyMap<&str, i32> = MultiKeyMap::new();
        map.set([], 1);

        assert_eq!(map.len(), 0);
        assert_eq!(map.root().descendant_count(), 0);
    }

    #[rstest]
    fn test_delete_prunes_every_dead_branch() {
        let mut map = MultiKeyMap::new();
        map.set(["a", "b", "c"], 1).set(["x", "y"], 2);

        assert!(map.delete(&["a", "b", "c"]));
        assert!(map.delete(&["x", "y"]));

        // Only the root remains once every entry is gone.
        assert_eq!(map.root().descendant_count(), 0);
    }

    #[rstest]
    fn test_shared_prefix_survives_deletion_of_sibling_entry() {
        let mut map = MultiKeyMap::new();
        map.set(["a", "b"], 1).set(["a", "c"], 2);

        assert!(map.delete(&["a", "b"]));

        assert_eq!(map.get(&["a", "c"]), Some(&2));
        assert_eq!(map.get(&["c", "a"]), Some(&2));
        assert_eq!(map.root().live_paths(), 2);
    }

    #[rstest]
    fn test_registry_handle_shared_with_all_leaves() {
        let mut map = MultiKeyMap::new();
        map.set(["a", "b", "c"], 1);

        let handle = &map.registry()[0];
        // 3! leaves plus the registry slot itself.
        assert_eq!(ReferenceCounter::strong_count(handle), 7);
    }

    #[rstest]
    fn test_overwrite_through_permutation_keeps_registry_identity() {
        let mut map = MultiKeyMap::new();
        map.set(["a", "b"], 1);
        map.set(["b", "a"], 2);

        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&["a", "b"]), Some(&2));

        // Deleting after the overwrite must still retire the registry
        // slot, which requires the leaves to keep the original handle.
        assert!(map.delete(&["a", "b"]));
        assert_eq!(map.len(), 0);
        assert_eq!(map.root().descendant_count(), 0);
    }

    #[rstest]
    fn test_clear_resets_trie_and_registry() {
        let mut map = MultiKeyMap::new();
        map.set(["a", "b"], 1).set(["c"], 2);
        map.clear();

        assert_eq!(map.len(), 0);
        assert_eq!(map.root().descendant_count(), 0);
        assert_eq!(map.get(&["a", "b"]), None);
    }

    #[rstest]
    fn test_duplicate_atomic_keys_register_once() {
        let mut map = MultiKeyMap::new();
        map.set(["a", "a"], 1);

        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&["a", "a"]), Some(&1));
        assert_eq!(map.get(&["a"]), None);

        assert!(map.delete(&["a", "a"]));
        assert_eq!(map.len(), 0);
        assert_eq!(map.root().descendant_count(), 0);
    }

    #[rstest]
    fn test_clone_preserves_handle_identity_within_the_clone() {
        let mut map = MultiKeyMap::new();
        map.set(["a", "b"], 1);

        let mut clone = map.clone();
        assert!(clone.delete(&["b", "a"]));
        assert_eq!(clone.len(), 0);
        assert_eq!(clone.root().descendant_count(), 0);

        // The original is untouched.
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&["a", "b"]), Some(&1));
    }

    #[rstest]
    fn test_equality_ignores_insertion_order_and_permutation() {
        let mut left = MultiKeyMap::new();
        left.set(["a", "b"], 1).set(["c"], 2);

        let mut right = MultiKeyMap::new();
        right.set(["c"], 2).set(["b", "a"], 1);

        assert_eq!(left, right);

        right.set(["c"], 3);
        assert_ne!(left, right);
    }

    #[rstest]
    fn test_from_iterator_collects_entries() {
        let map: MultiKeyMap<&str, i32> =
            vec![(vec!["a", "b"], 1), (vec!["c"], 2)].into_iter().collect();

        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&["b", "a"]), Some(&1));
        assert_eq!(map.get(&["c"]), Some(&2));
    }
}
