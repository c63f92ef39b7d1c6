//! Reconciling collection ("watched list")
//!
//! A `WatchedList` snapshots the persisted members of a one-to-many relation
//! and lets a caller replace them with a desired membership. It then answers
//! which members are new and which were removed, so persistence can apply
//! only the delta instead of deleting and reinserting the whole relation.
//!
//! Equality is identity equality: each list is built with a key function
//! that extracts the member's identity. Payload differences between two
//! members with the same key are invisible to the list.
//!
//! ## Invariants
//!
//! - `initial` is fixed at construction and is the sole basis for
//!   [`WatchedList::new_items`] and [`WatchedList::removed_items`].
//! - `current` never holds two members with the same key.
//!
//! ## Example
//!
//! ```
//! use bazaar_core::watched_list::WatchedList;
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Tag { id: u32, label: &'static str }
//!
//! let mut tags = WatchedList::try_new(
//!     vec![Tag { id: 1, label: "a" }, Tag { id: 2, label: "b" }],
//!     |t: &Tag| t.id,
//! ).unwrap();
//!
//! tags.replace_all(vec![Tag { id: 1, label: "a" }, Tag { id: 3, label: "c" }]);
//!
//! assert_eq!(tags.new_items(), vec![Tag { id: 3, label: "c" }]);
//! assert_eq!(tags.removed_items(), vec![Tag { id: 2, label: "b" }]);
//! ```

use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;

use crate::errors::{BazaarError, Result};

/// Generic reconciling collection keyed by member identity
#[derive(Clone)]
pub struct WatchedList<T, K> {
    initial: Vec<T>,
    current: Vec<T>,
    key: fn(&T) -> K,
}

impl<T, K> WatchedList<T, K>
where
    T: Clone,
    K: Eq + Hash + Clone + fmt::Display,
{
    /// Snapshot `items` as both the initial and the current membership
    ///
    /// # Errors
    ///
    /// Returns `DuplicateIdentity` if two items share a key.
    pub fn try_new(items: Vec<T>, key: fn(&T) -> K) -> Result<Self> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            let k = key(item);
            if !seen.insert(k.clone()) {
                return Err(BazaarError::DuplicateIdentity { id: k.to_string() });
            }
        }

        Ok(Self {
            current: items.clone(),
            initial: items,
            key,
        })
    }

    /// An empty list; everything added later counts as new
    pub fn empty(key: fn(&T) -> K) -> Self {
        Self {
            initial: Vec::new(),
            current: Vec::new(),
            key,
        }
    }

    /// The present working set, in insertion order
    pub fn current_items(&self) -> &[T] {
        &self.current
    }

    /// The snapshot taken at construction
    pub fn initial_items(&self) -> &[T] {
        &self.initial
    }

    pub fn len(&self) -> usize {
        self.current.len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    /// Whether `current` holds a member with the same identity as `item`
    pub fn contains(&self, item: &T) -> bool {
        let k = (self.key)(item);
        self.current.iter().any(|c| (self.key)(c) == k)
    }

    /// Append `item` unless a member with the same identity is present
    pub fn add(&mut self, item: T) {
        if !self.contains(&item) {
            self.current.push(item);
        }
    }

    /// Remove the member with the same identity as `item`, if present
    pub fn remove(&mut self, item: &T) {
        let k = (self.key)(item);
        self.current.retain(|c| (self.key)(c) != k);
    }

    /// Overwrite `current` with the caller's full desired state
    ///
    /// Not cumulative: each call discards the previous `current`. When
    /// `items` repeats an identity only the first occurrence is kept.
    pub fn replace_all(&mut self, items: Vec<T>) {
        let mut seen = HashSet::with_capacity(items.len());
        self.current = items
            .into_iter()
            .filter(|item| seen.insert((self.key)(item)))
            .collect();
    }

    /// Members of `current` with no counterpart in `initial`
    pub fn new_items(&self) -> Vec<T> {
        difference(&self.current, &self.initial, self.key)
    }

    /// Members of `initial` with no counterpart in `current`
    pub fn removed_items(&self) -> Vec<T> {
        difference(&self.initial, &self.current, self.key)
    }

    /// Whether persisting this list would touch storage at all
    pub fn has_changes(&self) -> bool {
        !self.new_items().is_empty() || !self.removed_items().is_empty()
    }
}

/// `left \ right` under the key function, preserving `left`'s order
fn difference<T: Clone, K: Eq + Hash>(left: &[T], right: &[T], key: fn(&T) -> K) -> Vec<T> {
    let right_keys: HashSet<K> = right.iter().map(key).collect();
    left.iter()
        .filter(|item| !right_keys.contains(&key(item)))
        .cloned()
        .collect()
}

impl<T: fmt::Debug, K> fmt::Debug for WatchedList<T, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WatchedList")
            .field("initial", &self.initial)
            .field("current", &self.current)
            .finish()
    }
}
