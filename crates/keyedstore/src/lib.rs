//! # KeyedStore
//!
//! A hash-indexed, insertion-ordered container mapping `i32` keys to short
//! string values.
//!
//! Entries live in a flat slot table in traversal order; a hash index maps
//! each key to its slot, so point lookups never scan the table. Mutating
//! operations consult the index first, which is what makes a stale entry
//! reference a safe no-op rather than a corruption hazard.
//!
//! ## Key properties
//! - **Unique keys**: inserting an existing key replaces its value in place;
//!   at no point do two entries share a key.
//! - **Traversal order**: insertion order by default; ascending key order
//!   after [`KeyedStore::sort_by_key`], until the next new key is inserted.
//! - **Bounded values**: a value longer than [`MAX_VALUE_LEN`] bytes is
//!   rejected before anything is modified.
//! - **Deletion notices**: every removal reports one human-readable line to
//!   the [`NoticeSink`](notice::NoticeSink) installed at construction.
//!
//! ## Example
//! ```rust
//! use keyedstore::KeyedStore;
//!
//! let mut store = KeyedStore::new();
//! store.insert(7, "anna").unwrap();
//! store.insert(3, "bert").unwrap();
//! store.insert(7, "carl").unwrap();
//! assert_eq!(store.find(7).map(|e| e.value.as_str()), Some("carl"));
//!
//! store.sort_by_key();
//! let keys: Vec<i32> = store.iter().map(|e| e.key).collect();
//! assert_eq!(keys, vec![3, 7]);
//! ```

use std::collections::HashMap;
use std::mem;

use notice::{LogSink, NoticeSink};
use thiserror::Error;

/// Maximum value length in bytes.
///
/// The value slot is modeled on a fixed nine-character buffer; anything
/// longer is rejected at [`KeyedStore::insert`] time.
pub const MAX_VALUE_LEN: usize = 9;

/// A single key/value pair held by the store.
///
/// `Entry` is `Clone` so a caller can detach a copy of a lookup result and
/// later hand it to [`KeyedStore::delete_one`]; the store never trusts such
/// a copy and always re-checks the key against its index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// The unique key.
    pub key: i32,
    /// The payload, at most [`MAX_VALUE_LEN`] bytes.
    pub value: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("value too long: {len} bytes, limit {limit}")]
    ValueTooLong { len: usize, limit: usize },
}

/// An insertion-ordered keyed container with a hash index.
///
/// The slot table (`Vec<Entry>`) defines traversal order; the index
/// (`HashMap<i32, usize>`) maps each key to its slot position. The two are
/// kept in agreement by every operation, so between calls there is never a
/// dangling or duplicate key to observe.
///
/// All mutating operations take `&mut self` and all reads take `&self`;
/// the borrow checker therefore rejects mutation while an iterator from
/// [`iter`](KeyedStore::iter) is still alive.
pub struct KeyedStore {
    slots: Vec<Entry>,
    index: HashMap<i32, usize>,
    sink: Box<dyn NoticeSink>,
}

impl KeyedStore {
    /// Creates an empty store whose notices go to the `log` facade.
    pub fn new() -> Self {
        Self::with_sink(Box::new(LogSink))
    }

    /// Creates an empty store with a caller-chosen notice sink.
    pub fn with_sink(sink: Box<dyn NoticeSink>) -> Self {
        Self {
            slots: Vec::new(),
            index: HashMap::new(),
            sink,
        }
    }

    /// Inserts a key-value pair, or replaces the value of an existing key.
    ///
    /// A new key appends its entry at the end of the traversal order. An
    /// existing key keeps its slot: only the value is replaced, reusing the
    /// slot's string allocation where possible.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ValueTooLong`] if `value` exceeds
    /// [`MAX_VALUE_LEN`] bytes. The store is left exactly as it was.
    pub fn insert(&mut self, key: i32, value: &str) -> Result<(), StoreError> {
        if value.len() > MAX_VALUE_LEN {
            return Err(StoreError::ValueTooLong {
                len: value.len(),
                limit: MAX_VALUE_LEN,
            });
        }

        match self.index.get(&key).copied() {
            Some(pos) => {
                // existing key: replace the value in its slot
                let slot = &mut self.slots[pos];
                slot.value.clear();
                slot.value.push_str(value);
            }
            None => {
                let pos = self.slots.len();
                self.slots.push(Entry {
                    key,
                    value: value.to_string(),
                });
                self.index.insert(key, pos);
            }
        }
        Ok(())
    }

    /// Point lookup for a single key.
    ///
    /// One hash probe plus one slot access; an absent key is the `None`
    /// result, not an error.
    pub fn find(&self, key: i32) -> Option<&Entry> {
        self.index.get(&key).map(|&pos| &self.slots[pos])
    }

    /// Removes the entry matching `entry.key`, if it is still present.
    ///
    /// Presence is re-derived from the index, never taken from the caller's
    /// copy: deleting with a stale `Entry` (already removed, or removed and
    /// never re-inserted) is a no-op. On removal, one `"<key> deleted."`
    /// notice is emitted.
    pub fn delete_one(&mut self, entry: &Entry) {
        if let Some(pos) = self.index.remove(&entry.key) {
            let removed = self.slots.remove(pos);
            // slots behind the removed one shifted down by one
            for slot_pos in self.index.values_mut() {
                if *slot_pos > pos {
                    *slot_pos -= 1;
                }
            }
            self.sink.emit(&format!("{} deleted.", removed.key));
        }
    }

    /// Removes every entry, leaving the store empty.
    ///
    /// Emits one `"<key>:\"<value>\" deleted."` notice per entry in
    /// traversal order, then a `"<count> entries deleted."` summary. The
    /// summary is emitted even for an already-empty store, so a second call
    /// in a row reports zero deletions.
    pub fn delete_all(&mut self) {
        let drained = mem::take(&mut self.slots);
        self.index.clear();

        let count = drained.len();
        // The consuming iterator moves each entry out before the loop body
        // runs; dropping the entry cannot disturb the traversal position.
        for entry in drained {
            self.sink
                .emit(&format!("{}:\"{}\" deleted.", entry.key, entry.value));
        }
        self.sink.emit(&format!("{} entries deleted.", count));
    }

    /// Returns an iterator over all entries in current traversal order.
    ///
    /// The iterator borrows the store, so mutation while it is being
    /// consumed does not compile. A fresh call after any mutation restarts
    /// from the beginning.
    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.slots.iter()
    }

    /// Reorders traversal to ascending key order.
    ///
    /// A stable sort of the slot table (keys are unique, so the result is
    /// deterministic for a given key set) followed by an index rebuild.
    /// Which entries exist, and their values, are unchanged. Keys inserted
    /// afterwards append at the end of the traversal order.
    pub fn sort_by_key(&mut self) {
        self.slots.sort_by_key(|entry| entry.key);
        for (pos, entry) in self.slots.iter().enumerate() {
            self.index.insert(entry.key, pos);
        }
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if the store contains zero entries.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns `true` if the store contains the given key.
    pub fn contains_key(&self, key: i32) -> bool {
        self.index.contains_key(&key)
    }
}

impl Default for KeyedStore {
    fn default() -> Self {
        Self::new()
    }
}
