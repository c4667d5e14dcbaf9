//! Order-insensitive multi-key map.
//!
//! This module provides [`MultiKeyMap`], a container addressed by tuples
//! of atomic keys where any permutation of a stored tuple resolves to the
//! same value:
//!
//! - [`MultiKeyMap`]: the container itself
//! - [`Entries`], [`Keys`], [`Values`]: borrowing iterators in insertion order
//! - [`MultiKeyMapIntoIterator`]: consuming iterator
//! - [`Traversal`]: incremental cursor descending the trie one key at a time
//!
//! # How it works
//!
//! Every `set` expands the key tuple into all of its permutations and
//! records each of them as a path in a prefix tree. A `get` then walks the
//! tree strictly in the supplied key order; permutation-insensitivity was
//! paid for at insertion time, so lookups never search.
//!
//! The key tuple itself is stored once, behind a reference-counted handle
//! shared by every leaf of the entry and by the insertion-ordered key
//! registry. Deletion retracts all permutation paths, prunes branches that
//! become empty, and retires the registry slot by handle identity.
//!
//! # Time Complexity
//!
//! For a tuple of `n` atomic keys in a map holding `m` entries:
//!
//! | Operation  | Cost                          |
//! |------------|-------------------------------|
//! | `set`      | O(n!) node visits             |
//! | `get`/`has`| O(n) hash lookups             |
//! | `delete`   | O(n!) node visits             |
//! | `len`      | O(1)                          |
//! | `clear`    | O(nodes)                      |
//! | iteration  | O(n) per yielded entry        |
//! | traversal  | O(1) hash lookup per advance  |
//!
//! The factorial terms are the cost of order-independence; keep tuples
//! small (&le; 6-7 keys).
//!
//! # Examples
//!
//! ```rust
//! use multikey_map::MultiKeyMap;
//!
//! let mut map = MultiKeyMap::new();
//! map.set(["user", "session"], 1).set(["user", "profile"], 2);
//!
//! // Lookup through any key order
//! assert_eq!(map.get(&["session", "user"]), Some(&1));
//!
//! // Deletion through any key order retires the whole entry
//! assert!(map.delete(&["profile", "user"]));
//! assert_eq!(map.len(), 1);
//! ```

// =============================================================================
// Reference Counter Type Alias
// =============================================================================

/// Reference-counted smart pointer type.
///
/// When the `arc` feature is enabled, this is `std::sync::Arc`,
/// which is thread-safe but has slightly higher overhead.
///
/// When the `arc` feature is disabled (default), this is `std::rc::Rc`,
/// which is faster but not thread-safe.
#[cfg(feature = "arc")]
pub(crate) type ReferenceCounter<T> = std::sync::Arc<T>;

#[cfg(not(feature = "arc"))]
pub(crate) type ReferenceCounter<T> = std::rc::Rc<T>;

/// Shared handle to the key tuple used at insertion time.
///
/// All permutation leaves of one entry and the key registry hold clones of
/// the same handle, so the tuple data exists once per entry and deletion
/// can retire the registry slot by pointer identity.
pub(crate) type SharedKeys<K> = ReferenceCounter<Vec<K>>;

mod iter;
mod map;
mod node;
mod traverse;

pub use iter::Entries;
pub use iter::Keys;
pub use iter::MultiKeyMapIntoIterator;
pub use iter::Values;
pub use map::MultiKeyMap;
pub use traverse::Traversal;
pub use traverse::TraversalStep;

// =============================================================================
// Tests
// =============================================================================
