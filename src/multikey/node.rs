//! Trie engine backing [`MultiKeyMap`](super::MultiKeyMap).
//!
//! Each stored entry owns one root-to-leaf path per distinct ordering of
//! its key tuple. Insertion expands the orderings below the root,
//! deletion retracts all of them and prunes branches that become empty.

use std::borrow::Borrow;
use std::hash::Hash;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use super::SharedKeys;

/// Number of atomic keys the recursion scratch buffers hold inline.
///
/// Longer tuples still work; their scratch slices spill to the heap. The
/// factorial path count makes such tuples impractical long before that.
pub(crate) const INLINE_KEYS: usize = 8;

/// The value stored at a permutation leaf, together with the handle of
/// the key tuple that owns the entry.
#[derive(Clone)]
pub(crate) struct TrieEntry<K, V> {
    pub(crate) value: V,
    pub(crate) keys: SharedKeys<K>,
}

/// One node of the permutation trie: an optional stored entry plus the
/// outgoing edges keyed by atomic key.
#[derive(Clone)]
pub(crate) struct TrieNode<K, V> {
    pub(crate) entry: Option<TrieEntry<K, V>>,
    pub(crate) children: FxHashMap<K, TrieNode<K, V>>,
}

impl<K, V> TrieNode<K, V> {
    pub(crate) fn new() -> Self {
        Self {
            entry: None,
            children: FxHashMap::default(),
        }
    }

    /// A node with neither an entry nor children must not persist in the
    /// trie.
    #[inline]
    fn is_dead(&self) -> bool {
        self.entry.is_none() && self.children.is_empty()
    }
}

impl<K: Clone + Eq + Hash, V: Clone> TrieNode<K, V> {
    /// Writes `value` at the terminal node of every ordering of
    /// `remaining` below this node, creating edges as needed.
    ///
    /// Returns `true` when a brand-new entry was created and `false` when
    /// an existing one was overwritten. Overwrites keep the entry's
    /// original key-tuple handle so registry identity stays intact.
    ///
    /// The flag is accumulated with `|=` across sibling orderings: when
    /// the tuple contains duplicate atomic keys, later orderings revisit
    /// terminals the same call just wrote, and only the first visit
    /// decides whether the entry existed beforehand.
    pub(crate) fn insert_permutations(
        &mut self,
        remaining: &[&K],
        keys: &SharedKeys<K>,
        value: &V,
    ) -> bool {
        let mut added = false;

        for (index, &key) in remaining.iter().enumerate() {
            let child = self.children.entry(key.clone()).or_insert_with(Self::new);

            if remaining.len() == 1 {
                return match child.entry.take() {
                    Some(existing) => {
                        child.entry = Some(TrieEntry {
                            value: value.clone(),
                            keys: existing.keys,
                        });
                        false
                    }
                    None => {
                        child.entry = Some(TrieEntry {
                            value: value.clone(),
                            keys: keys.clone(),
                        });
                        true
                    }
                };
            }

            let mut rest: SmallVec<[&K; INLINE_KEYS]> =
                SmallVec::with_capacity(remaining.len() - 1);
            rest.extend_from_slice(&remaining[..index]);
            rest.extend_from_slice(&remaining[index + 1..]);

            added |= child.insert_permutations(&rest, keys, value);
        }

        added
    }

    /// Clears the entry at the terminal node of every ordering of
    /// `remaining` below this node, pruning dead branches on the way back
    /// up.
    ///
    /// Returns the owning key-tuple handle of the removed entry if at
    /// least one ordering still held a live entry. All live orderings
    /// share the same handle, so any of them identifies the entry.
    pub(crate) fn remove_permutations<Q>(&mut self, remaining: &[&Q]) -> Option<SharedKeys<K>>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let mut removed = None;

        for (index, &key) in remaining.iter().enumerate() {
            let Some(child) = self.children.get_mut(key) else {
                continue;
            };

            if remaining.len() == 1 {
                if let Some(entry) = child.entry.take() {
                    removed = Some(entry.keys);
                }
            } else {
                let mut rest: SmallVec<[&Q; INLINE_KEYS]> =
                    SmallVec::with_capacity(remaining.len() - 1);
                rest.extend_from_slice(&remaining[..index]);
                rest.extend_from_slice(&remaining[index + 1..]);

                if let Some(keys) = child.remove_permutations(&rest) {
                    removed = Some(keys);
                }
            }

            if child.is_dead() {
                self.children.remove(key);
            }
        }

        removed
    }
}

#[cfg(test)]
impl<K, V> TrieNode<K, V> {
    /// Number of live entries stored at or below this node.
    pub(crate) fn live_paths(&self) -> usize {
        self.children
            .values()
            .map(|child| usize::from(child.entry.is_some()) + child.live_paths())
            .sum()
    }

    /// Total number of nodes below this one.
    pub(crate) fn descendant_count(&self) -> usize {
        self.children
            .values()
            .map(|child| 1 + child.descendant_count())
            .sum()
    }
}
