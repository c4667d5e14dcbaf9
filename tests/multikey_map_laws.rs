//! Property-based tests for MultiKeyMap.
//!
//! This module verifies the container's laws with proptest: permutation
//! equivalence, round-tripping, size accounting against a multiset model,
//! and the empty-tuple edge cases.

use multikey_map::MultiKeyMap;
use proptest::prelude::*;
use std::collections::HashMap;

// =============================================================================
// Strategy for generating test data
// =============================================================================

fn arbitrary_key() -> impl Strategy<Value = String> {
    "[a-f]{1,3}"
}

fn arbitrary_value() -> impl Strategy<Value = i32> {
    any::<i32>()
}

fn arbitrary_tuple() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(arbitrary_key(), 1..=4)
}

fn arbitrary_entries() -> impl Strategy<Value = Vec<(Vec<String>, i32)>> {
    prop::collection::vec((arbitrary_tuple(), arbitrary_value()), 0..20)
}

fn tuple_and_permutation() -> impl Strategy<Value = (Vec<String>, Vec<String>)> {
    arbitrary_tuple().prop_flat_map(|tuple| {
        let original = tuple.clone();
        Just(tuple)
            .prop_shuffle()
            .prop_map(move |shuffled| (original.clone(), shuffled))
    })
}

/// The canonical form of a key tuple: its multiset of keys, as a sorted
/// vector.
fn canonical(tuple: &[String]) -> Vec<String> {
    let mut sorted = tuple.to_vec();
    sorted.sort();
    sorted
}

// =============================================================================
// Permutation Equivalence Law: set(K, v) => get(P) == Some(v) for all P
// =============================================================================

proptest! {
    #[test]
    fn prop_permutation_equivalence_law((tuple, permutation) in tuple_and_permutation(), value in arbitrary_value()) {
        let mut map = MultiKeyMap::new();
        map.set(tuple, value);

        prop_assert_eq!(map.get(&permutation), Some(&value));
        prop_assert!(map.has(&permutation));
    }
}

// =============================================================================
// Round-Trip Law: delete(P) retires the entry for every ordering
// =============================================================================

proptest! {
    #[test]
    fn prop_delete_through_permutation_law((tuple, permutation) in tuple_and_permutation(), value in arbitrary_value()) {
        let mut map = MultiKeyMap::new();
        map.set(tuple.clone(), value);

        prop_assert!(map.delete(&permutation));
        prop_assert_eq!(map.get(&tuple), None);
        prop_assert_eq!(map.get(&permutation), None);
        prop_assert_eq!(map.len(), 0);

        // A second delete has nothing left to remove.
        prop_assert!(!map.delete(&tuple));
    }
}

// =============================================================================
// Size Model Law: len() equals the number of distinct key multisets
// =============================================================================

proptest! {
    #[test]
    fn prop_len_matches_multiset_model_law(entries in arbitrary_entries()) {
        let mut map = MultiKeyMap::new();
        let mut model: HashMap<Vec<String>, i32> = HashMap::new();

        for (tuple, value) in &entries {
            map.set(tuple.clone(), *value);
            model.insert(canonical(tuple), *value);
        }

        prop_assert_eq!(map.len(), model.len());

        // The canonical (sorted) tuple is itself a permutation, so every
        // model entry must resolve through it.
        for (sorted, value) in &model {
            prop_assert_eq!(map.get(sorted), Some(value));
        }

        for sorted in model.keys() {
            prop_assert!(map.delete(sorted));
        }
        prop_assert!(map.is_empty());
    }
}

// =============================================================================
// Overwrite Law: same multiset keeps len and the original tuple
// =============================================================================

proptest! {
    #[test]
    fn prop_overwrite_keeps_len_and_original_tuple_law(
        (tuple, permutation) in tuple_and_permutation(),
        first in arbitrary_value(),
        second in arbitrary_value()
    ) {
        let mut map = MultiKeyMap::new();
        map.set(tuple.clone(), first);
        map.set(permutation.clone(), second);

        prop_assert_eq!(map.len(), 1);
        prop_assert_eq!(map.get(&tuple), Some(&second));

        // Iteration still yields the tuple used at first insertion.
        let keys: Vec<&[String]> = map.keys().collect();
        prop_assert_eq!(keys, vec![tuple.as_slice()]);
    }
}

// =============================================================================
// Empty Tuple Law: empty-key operations are defined no-ops
// =============================================================================

proptest! {
    #[test]
    fn prop_empty_tuple_law(entries in arbitrary_entries(), value in arbitrary_value()) {
        let mut map: MultiKeyMap<String, i32> = MultiKeyMap::new();
        for (tuple, entry_value) in entries {
            map.set(tuple, entry_value);
        }
        let len_before = map.len();

        let empty: Vec<String> = Vec::new();
        map.set(empty.clone(), value);
        prop_assert_eq!(map.len(), len_before);
        prop_assert_eq!(map.get(&empty), None);
        prop_assert!(!map.has(&empty));
        prop_assert!(!map.delete(&empty));
        prop_assert_eq!(map.len(), len_before);
    }
}

// =============================================================================
// Iteration Order Law: entries() follows first-insertion order
// =============================================================================

proptest! {
    #[test]
    fn prop_iteration_order_law(entries in arbitrary_entries()) {
        let mut map = MultiKeyMap::new();
        let mut first_seen: Vec<(Vec<String>, Vec<String>)> = Vec::new();
        let mut latest: HashMap<Vec<String>, i32> = HashMap::new();

        for (tuple, value) in &entries {
            map.set(tuple.clone(), *value);
            let sorted = canonical(tuple);
            if !first_seen.iter().any(|(canon, _)| canon == &sorted) {
                first_seen.push((sorted.clone(), tuple.clone()));
            }
            latest.insert(sorted, *value);
        }

        let expected: Vec<(Vec<String>, i32)> = first_seen
            .iter()
            .map(|(sorted, original)| (original.clone(), latest[sorted]))
            .collect();
        let observed: Vec<(Vec<String>, i32)> = map
            .entries()
            .map(|(keys, entry_value)| (keys.to_vec(), *entry_value))
            .collect();

        prop_assert_eq!(observed, expected);
    }
}

// =============================================================================
// Traversal Law: walking a stored tuple key by key ends on its value
// =============================================================================

proptest! {
    #[test]
    fn prop_traversal_reaches_stored_value_law((tuple, permutation) in tuple_and_permutation(), value in arbitrary_value()) {
        let mut map = MultiKeyMap::new();
        map.set(tuple, value);

        let mut cursor = map.traverse();
        let mut last = None;
        for key in &permutation {
            let step = cursor.advance(key);
            prop_assert!(!step.is_exhausted());
            last = step.value().copied();
        }

        prop_assert_eq!(last, Some(value));
    }
}
