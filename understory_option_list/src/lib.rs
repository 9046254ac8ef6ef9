// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Option List: an ordered option collection for selection widgets.
//!
//! This crate models the option side of a single-select widget (a listbox,
//! dropdown, or menu) as a plain, renderer-agnostic collection:
//!
//! - Options are registered and unregistered dynamically as host content
//!   mounts and unmounts; registration order is authoritative and stable,
//!   decoupled from any layout or document reflow.
//! - Each option carries an opaque identity, display text, a caller value,
//!   and a `disabled` flag (the only mutable field).
//! - Traversal queries ([`OptionList::next_enabled`],
//!   [`OptionList::prev_enabled`], [`OptionList::first_enabled`],
//!   [`OptionList::last_enabled`]) skip disabled entries and optionally wrap
//!   around the ends. They return `None` only when no enabled entry exists
//!   at all.
//! - [`OptionList::match_prefix`] resolves accumulated typeahead text to the
//!   first enabled entry whose display text starts with it,
//!   case-insensitively, scanning forward from just past a caller-supplied
//!   origin and wrapping.
//!
//! The collection is generic over the id type `K`, so callers can use any
//! small, copyable handle (a node id, a slot index, an interned symbol), and
//! over the value type `V` bound to each option.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_option_list::OptionList;
//!
//! let mut list: OptionList<u32, &str> = OptionList::new();
//! list.register(1, "Alice", "alice", false).unwrap();
//! list.register(2, "Bob", "bob", true).unwrap();
//! list.register(3, "Carol", "carol", false).unwrap();
//!
//! // Traversal skips the disabled entry and wraps past the end.
//! assert_eq!(list.next_enabled(Some(&1), true).map(|e| e.id), Some(3));
//! assert_eq!(list.next_enabled(Some(&3), true).map(|e| e.id), Some(1));
//!
//! // Prefix matching is case-insensitive and skips disabled entries.
//! assert_eq!(list.match_prefix("ca", None).map(|e| e.id), Some(3));
//! assert_eq!(list.match_prefix("b", None), None);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::hash::Hash;

use hashbrown::HashMap;

/// Error returned by [`OptionList::register`] when the id is already present.
///
/// Duplicate registration is a host programming error; it is surfaced rather
/// than silently merged so the offending mount can be found and fixed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DuplicateId;

impl fmt::Display for DuplicateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("option id is already registered")
    }
}

impl core::error::Error for DuplicateId {}

/// A single registered option.
///
/// All fields except `disabled` are fixed for the lifetime of the entry;
/// `disabled` is toggled through [`OptionList::set_disabled`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry<K, V> {
    /// Opaque identity supplied by the host at registration.
    pub id: K,
    /// Display text, used for typeahead prefix matching.
    pub text: String,
    /// Caller value this option represents when selected.
    pub value: V,
    /// Whether the option is excluded from traversal and matching.
    pub disabled: bool,
    /// Registration sequence number. Strictly increasing, never reused.
    pub order: u32,
}

/// Ordered collection of options with enabled-only traversal.
///
/// Entries keep their registration order; ids are unique. Lookups go through
/// an id → slot map, traversal walks the ordered storage directly.
#[derive(Clone, Debug)]
pub struct OptionList<K, V> {
    entries: Vec<Entry<K, V>>,
    slots: HashMap<K, usize>,
    next_order: u32,
}

impl<K, V> Default for OptionList<K, V>
where
    K: Copy + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> OptionList<K, V>
where
    K: Copy + Eq + Hash,
{
    /// Creates an empty option list.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            slots: HashMap::new(),
            next_order: 0,
        }
    }

    /// Number of registered options, enabled or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no options are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of enabled options.
    #[must_use]
    pub fn enabled_count(&self) -> usize {
        self.entries.iter().filter(|e| !e.disabled).count()
    }

    /// Iterates all entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Entry<K, V>> {
        self.entries.iter()
    }

    /// Appends an option with the next order index.
    ///
    /// # Errors
    ///
    /// Returns [`DuplicateId`] if `id` is already registered. The list is
    /// unchanged in that case.
    pub fn register(
        &mut self,
        id: K,
        text: impl Into<String>,
        value: V,
        disabled: bool,
    ) -> Result<(), DuplicateId> {
        if self.slots.contains_key(&id) {
            return Err(DuplicateId);
        }
        let order = self.next_order;
        self.next_order += 1;
        self.slots.insert(id, self.entries.len());
        self.entries.push(Entry {
            id,
            text: text.into(),
            value,
            disabled,
            order,
        });
        Ok(())
    }

    /// Removes an option, returning its entry if it was present.
    ///
    /// Order indices of remaining entries are unaffected; the vacated
    /// position is reported by [`OptionList::position`] of neighbors.
    pub fn unregister(&mut self, id: &K) -> Option<Entry<K, V>> {
        let index = self.slots.remove(id)?;
        let entry = self.entries.remove(index);
        // Slots past the removed entry shift down by one.
        for slot in self.slots.values_mut() {
            if *slot > index {
                *slot -= 1;
            }
        }
        Some(entry)
    }

    /// Looks up an option by id. `None` means not found.
    #[must_use]
    pub fn find(&self, id: &K) -> Option<&Entry<K, V>> {
        self.slots.get(id).map(|&i| &self.entries[i])
    }

    /// Position of an option in registration order.
    #[must_use]
    pub fn position(&self, id: &K) -> Option<usize> {
        self.slots.get(id).copied()
    }

    /// Toggles the `disabled` flag of an option.
    ///
    /// Returns `false` if the id is not registered.
    pub fn set_disabled(&mut self, id: &K, disabled: bool) -> bool {
        match self.slots.get(id) {
            Some(&i) => {
                self.entries[i].disabled = disabled;
                true
            }
            None => false,
        }
    }

    /// First enabled option in registration order.
    #[must_use]
    pub fn first_enabled(&self) -> Option<&Entry<K, V>> {
        self.entries.iter().find(|e| !e.disabled)
    }

    /// Last enabled option in registration order.
    #[must_use]
    pub fn last_enabled(&self) -> Option<&Entry<K, V>> {
        self.entries.iter().rev().find(|e| !e.disabled)
    }

    /// Next enabled option after `from`.
    ///
    /// Scans forward starting just past `from`. With `wrap`, the scan
    /// continues from the start once it reaches the end, covering the full
    /// cycle: if `from` is the only enabled entry, it is its own successor.
    /// Returns `None` only when no enabled entry exists at all (or, without
    /// `wrap`, when none exists past `from`).
    ///
    /// A `from` of `None` — and an id that is no longer registered — behaves
    /// as [`OptionList::first_enabled`].
    #[must_use]
    pub fn next_enabled(&self, from: Option<&K>, wrap: bool) -> Option<&Entry<K, V>> {
        self.scan_enabled(from, wrap, Step::Forward)
    }

    /// Previous enabled option before `from`.
    ///
    /// Mirror of [`OptionList::next_enabled`]: scans backward starting just
    /// before `from`, wrapping from the end when `wrap` is set. A `from` of
    /// `None` — and an unregistered id — behaves as
    /// [`OptionList::last_enabled`].
    #[must_use]
    pub fn prev_enabled(&self, from: Option<&K>, wrap: bool) -> Option<&Entry<K, V>> {
        self.scan_enabled(from, wrap, Step::Backward)
    }

    /// Enabled option nearest to a vacated position.
    ///
    /// Looks forward from `index` first, then backward. Used to re-resolve
    /// an active option after the entry at `index` was removed.
    #[must_use]
    pub fn nearest_enabled(&self, index: usize) -> Option<&Entry<K, V>> {
        self.entries
            .iter()
            .skip(index)
            .find(|e| !e.disabled)
            .or_else(|| {
                self.entries
                    .iter()
                    .take(index.min(self.entries.len()))
                    .rev()
                    .find(|e| !e.disabled)
            })
    }

    /// First enabled option whose display text starts with `prefix`,
    /// case-insensitively.
    ///
    /// The scan starts just past `after` and wraps forward over the whole
    /// collection, so repeated queries against the current active option
    /// cycle through all candidates sharing the prefix. `after = None`
    /// starts from the beginning. An empty prefix matches nothing.
    #[must_use]
    pub fn match_prefix(&self, prefix: &str, after: Option<&K>) -> Option<&Entry<K, V>> {
        if prefix.is_empty() || self.entries.is_empty() {
            return None;
        }
        let start = match after.and_then(|id| self.position(id)) {
            Some(i) => i + 1,
            None => 0,
        };
        let len = self.entries.len();
        (0..len)
            .map(|offset| &self.entries[(start + offset) % len])
            .find(|e| !e.disabled && starts_with_ignore_case(&e.text, prefix))
    }

    fn scan_enabled(&self, from: Option<&K>, wrap: bool, step: Step) -> Option<&Entry<K, V>> {
        let origin = from.and_then(|id| self.position(id));
        let len = self.entries.len();
        if len == 0 {
            return None;
        }
        let Some(pos) = origin else {
            return match step {
                Step::Forward => self.first_enabled(),
                Step::Backward => self.last_enabled(),
            };
        };
        // Walk offsets 1..=len around the cycle; without wrap, stop at the edge.
        for offset in 1..=len {
            let index = match step {
                Step::Forward => {
                    if !wrap && pos + offset >= len {
                        return None;
                    }
                    (pos + offset) % len
                }
                Step::Backward => {
                    if !wrap && offset > pos {
                        return None;
                    }
                    (pos + len - (offset % len)) % len
                }
            };
            let entry = &self.entries[index];
            if !entry.disabled {
                return Some(entry);
            }
        }
        None
    }
}

#[derive(Copy, Clone)]
enum Step {
    Forward,
    Backward,
}

fn eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    let mut chars = text.chars();
    prefix
        .chars()
        .all(|p| chars.next().is_some_and(|c| eq_ignore_case(c, p)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> OptionList<u32, &'static str> {
        let mut list = OptionList::new();
        list.register(1, "Alpha", "a", false).unwrap();
        list.register(2, "Beta", "b", true).unwrap();
        list.register(3, "Gamma", "c", false).unwrap();
        list
    }

    #[test]
    fn register_assigns_increasing_order() {
        let list = abc();
        let orders: Vec<u32> = list.iter().map(|e| e.order).collect();
        assert_eq!(orders, [0, 1, 2]);
    }

    #[test]
    fn register_rejects_duplicate_id() {
        let mut list = abc();
        assert_eq!(list.register(2, "Again", "x", false), Err(DuplicateId));
        assert_eq!(list.len(), 3);
        // The original entry is untouched.
        assert_eq!(list.find(&2).map(|e| e.text.as_str()), Some("Beta"));
    }

    #[test]
    fn unregister_keeps_lookup_consistent() {
        let mut list = abc();
        let removed = list.unregister(&1).unwrap();
        assert_eq!(removed.text, "Alpha");
        assert_eq!(list.len(), 2);
        assert_eq!(list.position(&2), Some(0));
        assert_eq!(list.position(&3), Some(1));
        assert!(list.unregister(&1).is_none());
    }

    #[test]
    fn orders_survive_unregister() {
        let mut list = abc();
        list.unregister(&2);
        list.register(4, "Delta", "d", false).unwrap();
        // Order indices keep increasing; the freed one is not reused.
        let orders: Vec<u32> = list.iter().map(|e| e.order).collect();
        assert_eq!(orders, [0, 2, 3]);
    }

    #[test]
    fn traversal_skips_disabled() {
        let list = abc();
        assert_eq!(list.next_enabled(Some(&1), false).map(|e| e.id), Some(3));
        assert_eq!(list.prev_enabled(Some(&3), false).map(|e| e.id), Some(1));
    }

    #[test]
    fn traversal_wraps_past_the_ends() {
        let list = abc();
        assert_eq!(list.next_enabled(Some(&3), true).map(|e| e.id), Some(1));
        assert_eq!(list.prev_enabled(Some(&1), true).map(|e| e.id), Some(3));
        // Without wrap the same scans stop at the edge.
        assert_eq!(list.next_enabled(Some(&3), false), None);
        assert_eq!(list.prev_enabled(Some(&1), false), None);
    }

    #[test]
    fn no_origin_degenerates_to_the_ends() {
        let list = abc();
        assert_eq!(list.next_enabled(None, true).map(|e| e.id), Some(1));
        assert_eq!(list.prev_enabled(None, true).map(|e| e.id), Some(3));
        // Unknown origin behaves the same way.
        assert_eq!(list.next_enabled(Some(&99), true).map(|e| e.id), Some(1));
        assert_eq!(list.prev_enabled(Some(&99), true).map(|e| e.id), Some(3));
    }

    #[test]
    fn sole_enabled_entry_is_its_own_neighbor() {
        let mut list = abc();
        list.set_disabled(&3, true);
        assert_eq!(list.next_enabled(Some(&1), true).map(|e| e.id), Some(1));
        assert_eq!(list.prev_enabled(Some(&1), true).map(|e| e.id), Some(1));
    }

    #[test]
    fn all_disabled_yields_none() {
        let mut list = abc();
        list.set_disabled(&1, true);
        list.set_disabled(&3, true);
        assert_eq!(list.first_enabled(), None);
        assert_eq!(list.last_enabled(), None);
        assert_eq!(list.next_enabled(Some(&1), true), None);
        assert_eq!(list.prev_enabled(Some(&3), true), None);
        assert_eq!(list.enabled_count(), 0);
    }

    #[test]
    fn set_disabled_reports_missing_ids() {
        let mut list = abc();
        assert!(list.set_disabled(&2, false));
        assert!(!list.set_disabled(&99, true));
        assert_eq!(list.enabled_count(), 3);
    }

    #[test]
    fn nearest_enabled_prefers_forward() {
        let mut list = abc();
        list.unregister(&2);
        // Vacated position 1: Gamma sits there now.
        assert_eq!(list.nearest_enabled(1).map(|e| e.id), Some(3));
        // Past the end: falls back to the previous enabled entry.
        assert_eq!(list.nearest_enabled(5).map(|e| e.id), Some(3));
    }

    #[test]
    fn match_prefix_is_case_insensitive() {
        let list = abc();
        assert_eq!(list.match_prefix("ga", None).map(|e| e.id), Some(3));
        assert_eq!(list.match_prefix("GA", None).map(|e| e.id), Some(3));
        assert_eq!(list.match_prefix("x", None), None);
        assert_eq!(list.match_prefix("", None), None);
    }

    #[test]
    fn match_prefix_skips_disabled() {
        let list = abc();
        // "Beta" matches "b" but is disabled.
        assert_eq!(list.match_prefix("b", None), None);
    }

    #[test]
    fn match_prefix_wraps_from_past_the_origin() {
        let mut list = OptionList::new();
        list.register(1, "Alice", "alice", false).unwrap();
        list.register(2, "Amy", "amy", false).unwrap();
        list.register(3, "Bob", "bob", false).unwrap();
        // Starting past Alice, "a" reaches Amy first…
        assert_eq!(list.match_prefix("a", Some(&1)).map(|e| e.id), Some(2));
        // …and past Amy it wraps back around to Alice.
        assert_eq!(list.match_prefix("a", Some(&2)).map(|e| e.id), Some(1));
        // The origin itself is the last candidate considered.
        assert_eq!(list.match_prefix("b", Some(&3)).map(|e| e.id), Some(3));
    }

    #[test]
    fn match_prefix_handles_multibyte_text() {
        let mut list: OptionList<u32, u32> = OptionList::new();
        list.register(1, "Ärmel", 1, false).unwrap();
        list.register(2, "Straße", 2, false).unwrap();
        assert_eq!(list.match_prefix("ä", None).map(|e| e.id), Some(1));
        assert_eq!(list.match_prefix("STRA", None).map(|e| e.id), Some(2));
    }
}
