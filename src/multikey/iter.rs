//! Sequential iterators over a [`MultiKeyMap`].
//!
//! All flavors share one cursor engine: a position over the key registry
//! that re-resolves the current tuple through the trie on each advance.
//! [`Keys`] and [`Values`] are projections of [`Entries`]. The cursors
//! are single-pass; once one reports exhaustion it stays exhausted.

use std::hash::Hash;

use super::map::MultiKeyMap;

/// Iterator over `(key tuple, value)` pairs in insertion order.
///
/// This is the cursor engine shared by all iteration flavors: it walks
/// the key registry by position and resolves each tuple through
/// [`MultiKeyMap::get`] at advance time.
pub struct Entries<'a, K: Clone + Eq + Hash, V: Clone> {
    map: &'a MultiKeyMap<K, V>,
    position: usize,
}

impl<'a, K: Clone + Eq + Hash, V: Clone> Entries<'a, K, V> {
    #[inline]
    pub(crate) fn new(map: &'a MultiKeyMap<K, V>) -> Self {
        Self { map, position: 0 }
    }

    #[inline]
    fn remaining(&self) -> usize {
        self.map.registry().len().saturating_sub(self.position)
    }
}

impl<'a, K: Clone + Eq + Hash, V: Clone> Iterator for Entries<'a, K, V> {
    type Item = (&'a [K], &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let map = self.map;
        while self.position < map.registry().len() {
            let keys = &map.registry()[self.position];
            self.position += 1;
            if let Some(value) = map.get(keys.iter()) {
                return Some((keys.as_slice(), value));
            }
        }
        None
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl<K: Clone + Eq + Hash, V: Clone> ExactSizeIterator for Entries<'_, K, V> {
    #[inline]
    fn len(&self) -> usize {
        self.remaining()
    }
}

/// Iterator over stored key tuples in insertion order.
///
/// Yields each tuple exactly as supplied to the `set` call that created
/// its entry.
pub struct Keys<'a, K: Clone + Eq + Hash, V: Clone> {
    inner: Entries<'a, K, V>,
}

impl<'a, K: Clone + Eq + Hash, V: Clone> Keys<'a, K, V> {
    #[inline]
    pub(crate) fn new(map: &'a MultiKeyMap<K, V>) -> Self {
        Self {
            inner: Entries::new(map),
        }
    }
}

impl<'a, K: Clone + Eq + Hash, V: Clone> Iterator for Keys<'a, K, V> {
    type Item = &'a [K];

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(keys, _)| keys)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K: Clone + Eq + Hash, V: Clone> ExactSizeIterator for Keys<'_, K, V> {
    #[inline]
    fn len(&self) -> usize {
        self.inner.len()
    }
}

/// Iterator over stored values in insertion order of their entries.
pub struct Values<'a, K: Clone + Eq + Hash, V: Clone> {
    inner: Entries<'a, K, V>,
}

impl<'a, K: Clone + Eq + Hash, V: Clone> Values<'a, K, V> {
    #[inline]
    pub(crate) fn new(map: &'a MultiKeyMap<K, V>) -> Self {
        Self {
            inner: Entries::new(map),
        }
    }
}

impl<'a, K: Clone + Eq + Hash, V: Clone> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K: Clone + Eq + Hash, V: Clone> ExactSizeIterator for Values<'_, K, V> {
    #[inline]
    fn len(&self) -> usize {
        self.inner.len()
    }
}

/// Consuming iterator over `(key tuple, value)` pairs in insertion order.
///
/// Key tuples and values are cloned out of the map as it is consumed.
pub struct MultiKeyMapIntoIterator<K: Clone + Eq + Hash, V: Clone> {
    map: MultiKeyMap<K, V>,
    position: usize,
}

impl<K: Clone + Eq + Hash, V: Clone> Iterator for MultiKeyMapIntoIterator<K, V> {
    type Item = (Vec<K>, V);

    fn next(&mut self) -> Option<Self::Item> {
        while self.position < self.map.registry().len() {
            let keys = self.map.registry()[self.position].clone();
            self.position += 1;
            if let Some(value) = self.map.get(keys.iter()).cloned() {
                return Some(((*keys).clone(), value));
            }
        }
        None
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.map.registry().len().saturating_sub(self.position);
        (remaining, Some(remaining))
    }
}

impl<K: Clone + Eq + Hash, V: Clone> ExactSizeIterator for MultiKeyMapIntoIterator<K, V> {
    #[inline]
    fn len(&self) -> usize {
        self.map.registry().len().saturating_sub(self.position)
    }
}

impl<'a, K: Clone + Eq + Hash, V: Clone> IntoIterator for &'a MultiKeyMap<K, V> {
    type Item = (&'a [K], &'a V);
    type IntoIter = Entries<'a, K, V>;

    /// Default iteration is equivalent to [`MultiKeyMap::entries`].
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.entries()
    }
}

impl<K: Clone + Eq + Hash, V: Clone> IntoIterator for MultiKeyMap<K, V> {
    type Item = (Vec<K>, V);
    type IntoIter = MultiKeyMapIntoIterator<K, V>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        MultiKeyMapIntoIterator {
            map: self,
            position: 0,
        }
    }
}
