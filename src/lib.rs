//! # multikey-map
//!
//! An in-memory associative container keyed by a tuple of atomic keys,
//! where lookup is insensitive to the order in which the keys were
//! supplied: any permutation of a stored key tuple resolves to the same
//! value.
//!
//! ## Overview
//!
//! [`MultiKeyMap`] indexes every permutation of a key tuple into a prefix
//! tree at insertion time, so lookups are a single ordered walk with no
//! permutation search:
//!
//! ```rust
//! use multikey_map::MultiKeyMap;
//!
//! let mut map = MultiKeyMap::new();
//! map.set(["a", "b", "c"], "foo");
//!
//! assert_eq!(map.get(&["c", "a", "b"]), Some(&"foo"));
//! assert_eq!(map.get(&["b", "c", "a"]), Some(&"foo"));
//! assert_eq!(map.len(), 1);
//! ```
//!
//! ## Space trade-off
//!
//! Order-independence is paid for in memory, not lookup time: an entry
//! with `n` distinct atomic keys materializes `n!` root-to-leaf paths
//! (shared prefixes between entries are reused). This is a deliberate
//! design choice, intended for small key tuples — roughly 6 to 7 keys at
//! most. The map does not attempt to bound this growth.
//!
//! ## Feature Flags
//!
//! - `arc`: store shared key tuples behind `Arc` instead of `Rc`

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types.
///
/// # Usage
///
/// ```rust
/// use multikey_map::prelude::*;
/// ```
pub mod prelude {
    pub use crate::multikey::*;
}

pub mod multikey;

pub use multikey::MultiKeyMap;
pub use multikey::Traversal;
pub use multikey::TraversalStep;
