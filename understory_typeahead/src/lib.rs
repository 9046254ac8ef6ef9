// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Typeahead: a time-bounded keystroke accumulator.
//!
//! Selection widgets resolve typed characters to options by prefix: typing
//! `"a"` then `"m"` in quick succession searches for `"am"`, while a pause
//! starts a fresh search. This crate owns the buffer half of that behavior —
//! accumulation, expiry, and the timer contract — and leaves matching to the
//! option collection.
//!
//! Like the rest of the event-state crates in this workspace, [`TypeBuffer`]
//! never reads a clock. Every call takes an event timestamp in milliseconds,
//! so behavior is deterministic and replayable, and the idle timer is plain
//! data: hosts read [`TypeBuffer::deadline`], schedule a wakeup, and deliver
//! it back as an ordinary serialized event via
//! [`TypeBuffer::on_idle_deadline`]. A keystroke moves the deadline, which
//! implicitly cancels the previously scheduled wakeup — a stale wakeup is a
//! no-op.
//!
//! Two resets beyond idle expiry:
//!
//! - **Repeated identical keystroke**: when the live buffer is exactly the
//!   incoming character, the buffer stays one character long instead of
//!   growing (`"a"`, `"a"` searches `"a"` twice, not `"aa"`). Combined with
//!   a matcher that scans from just past the current result, this cycles
//!   through all options sharing that initial letter.
//! - **Unmatched cap**: a buffer that keeps failing to match clears once it
//!   outgrows a configured length, rather than jamming until idle expiry.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_typeahead::TypeBuffer;
//!
//! let mut buffer = TypeBuffer::new();
//!
//! // Two keystrokes inside the idle window accumulate.
//! assert_eq!(buffer.push('a', 1_000), "a");
//! assert_eq!(buffer.push('m', 1_100), "am");
//!
//! // A pause past the idle window starts over.
//! assert_eq!(buffer.push('b', 2_000), "b");
//!
//! // The host schedules the clear at the exposed deadline.
//! assert_eq!(buffer.deadline(), Some(2_350));
//! assert!(buffer.on_idle_deadline(2_350));
//! assert!(buffer.query().is_empty());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::string::String;

/// Idle window after the last keystroke before the buffer goes stale.
pub const DEFAULT_IDLE_WINDOW_MS: u64 = 350;

/// Default buffer length past which an unmatched sequence clears itself.
pub const DEFAULT_UNMATCHED_CAP: usize = 16;

/// Accumulates printable keystrokes into a search query.
///
/// The buffer preserves the case of typed characters; matching against it is
/// expected to be case-insensitive (see `understory_option_list`).
#[derive(Clone, Debug)]
pub struct TypeBuffer {
    buffer: String,
    last_keystroke: Option<u64>,
    idle_window_ms: u64,
    unmatched_cap: usize,
}

impl TypeBuffer {
    /// Creates a buffer with the default idle window and unmatched cap.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            last_keystroke: None,
            idle_window_ms: DEFAULT_IDLE_WINDOW_MS,
            unmatched_cap: DEFAULT_UNMATCHED_CAP,
        }
    }

    /// Overrides the idle window.
    #[must_use]
    pub fn with_idle_window(mut self, idle_window_ms: u64) -> Self {
        self.idle_window_ms = idle_window_ms;
        self
    }

    /// Overrides the unmatched-buffer cap.
    #[must_use]
    pub fn with_unmatched_cap(mut self, unmatched_cap: usize) -> Self {
        self.unmatched_cap = unmatched_cap;
        self
    }

    /// The accumulated query.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.buffer
    }

    /// Returns `true` if a search is live at `now`: the buffer is non-empty
    /// and the last keystroke is within the idle window.
    #[must_use]
    pub fn is_live(&self, now: u64) -> bool {
        !self.buffer.is_empty()
            && self
                .last_keystroke
                .is_some_and(|last| now.saturating_sub(last) <= self.idle_window_ms)
    }

    /// Appends a printable keystroke and returns the query to match.
    ///
    /// Clears first when the previous keystroke is older than the idle
    /// window. A single-character live buffer equal to `c`
    /// (case-insensitively) resets to length one instead of growing, so
    /// immediate repetition of one key keeps issuing single-character
    /// queries.
    pub fn push(&mut self, c: char, now: u64) -> &str {
        if let Some(last) = self.last_keystroke
            && now.saturating_sub(last) > self.idle_window_ms
        {
            self.buffer.clear();
        }
        let mut chars = self.buffer.chars();
        if let (Some(only), None) = (chars.next(), chars.next())
            && eq_ignore_case(only, c)
        {
            self.buffer.clear();
        }
        self.buffer.push(c);
        self.last_keystroke = Some(now);
        &self.buffer
    }

    /// Reports that the current query matched nothing.
    ///
    /// The buffer is retained — a longer query may simply keep failing until
    /// the idle window clears it — unless it has outgrown the unmatched cap,
    /// in which case it clears immediately.
    pub fn mark_unmatched(&mut self) {
        if self.buffer.chars().count() > self.unmatched_cap {
            self.buffer.clear();
        }
    }

    /// Clears immediately. Called for navigational (non-character) input.
    pub fn interrupt(&mut self) {
        self.buffer.clear();
        self.last_keystroke = None;
    }

    /// Instant at which the buffer goes stale, if a clear needs scheduling.
    ///
    /// Hosts schedule one wakeup for this instant and deliver it through
    /// [`TypeBuffer::on_idle_deadline`]. Each keystroke moves the deadline;
    /// the superseded wakeup becomes stale and is ignored.
    #[must_use]
    pub fn deadline(&self) -> Option<u64> {
        if self.buffer.is_empty() {
            return None;
        }
        self.last_keystroke
            .map(|last| last + self.idle_window_ms)
    }

    /// Handles the scheduled idle wakeup as an ordinary serialized event.
    ///
    /// Clears the buffer and returns `true` if the idle window has genuinely
    /// elapsed at `now`; a stale wakeup (the deadline moved after it was
    /// scheduled) returns `false` and changes nothing.
    pub fn on_idle_deadline(&mut self, now: u64) -> bool {
        let stale = self
            .last_keystroke
            .is_none_or(|last| now.saturating_sub(last) < self.idle_window_ms);
        if stale || self.buffer.is_empty() {
            return false;
        }
        self.buffer.clear();
        true
    }
}

impl Default for TypeBuffer {
    fn default() -> Self {
        Self::new()
    }
}

fn eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keystrokes_accumulate_within_the_window() {
        let mut buffer = TypeBuffer::new();
        assert_eq!(buffer.push('a', 1_000), "a");
        assert_eq!(buffer.push('m', 1_349), "am");
        assert_eq!(buffer.push('y', 1_500), "amy");
    }

    #[test]
    fn pause_past_the_window_starts_over() {
        let mut buffer = TypeBuffer::new();
        buffer.push('a', 1_000);
        assert_eq!(buffer.push('b', 1_351), "b");
    }

    #[test]
    fn boundary_keystroke_still_accumulates() {
        let mut buffer = TypeBuffer::new();
        buffer.push('a', 1_000);
        // Exactly the idle window does not exceed it.
        assert_eq!(buffer.push('m', 1_350), "am");
    }

    #[test]
    fn repeated_key_stays_single_character() {
        let mut buffer = TypeBuffer::new();
        assert_eq!(buffer.push('a', 1_000), "a");
        assert_eq!(buffer.push('a', 1_100), "a");
        assert_eq!(buffer.push('A', 1_200), "A");
        // A different key resumes normal accumulation.
        assert_eq!(buffer.push('m', 1_300), "Am");
    }

    #[test]
    fn repeat_reset_applies_only_to_single_character_buffers() {
        let mut buffer = TypeBuffer::new();
        buffer.push('a', 1_000);
        buffer.push('m', 1_050);
        // "m" repeats the last character but the buffer is longer than one.
        assert_eq!(buffer.push('m', 1_100), "amm");
    }

    #[test]
    fn unmatched_buffer_is_retained_until_the_cap() {
        let mut buffer = TypeBuffer::new().with_unmatched_cap(3);
        buffer.push('x', 1_000);
        buffer.push('y', 1_010);
        buffer.push('z', 1_020);
        buffer.mark_unmatched();
        assert_eq!(buffer.query(), "xyz");
        buffer.push('w', 1_030);
        buffer.mark_unmatched();
        assert_eq!(buffer.query(), "");
    }

    #[test]
    fn interrupt_clears_immediately() {
        let mut buffer = TypeBuffer::new();
        buffer.push('a', 1_000);
        buffer.interrupt();
        assert_eq!(buffer.query(), "");
        assert_eq!(buffer.deadline(), None);
    }

    #[test]
    fn deadline_follows_the_last_keystroke() {
        let mut buffer = TypeBuffer::new();
        assert_eq!(buffer.deadline(), None);
        buffer.push('a', 1_000);
        assert_eq!(buffer.deadline(), Some(1_350));
        buffer.push('m', 1_200);
        assert_eq!(buffer.deadline(), Some(1_550));
    }

    #[test]
    fn stale_wakeup_is_ignored() {
        let mut buffer = TypeBuffer::new();
        buffer.push('a', 1_000);
        // Keystroke at 1_200 moved the deadline to 1_550; the wakeup
        // scheduled for 1_350 arrives late and must not clear.
        buffer.push('m', 1_200);
        assert!(!buffer.on_idle_deadline(1_350));
        assert_eq!(buffer.query(), "am");
        assert!(buffer.on_idle_deadline(1_550));
        assert_eq!(buffer.query(), "");
        // A wakeup with nothing to clear reports false.
        assert!(!buffer.on_idle_deadline(2_000));
    }

    #[test]
    fn liveness_tracks_the_idle_window() {
        let mut buffer = TypeBuffer::new();
        assert!(!buffer.is_live(1_000));
        buffer.push('a', 1_000);
        assert!(buffer.is_live(1_350));
        assert!(!buffer.is_live(1_351));
    }

    #[test]
    fn space_is_an_ordinary_character() {
        let mut buffer = TypeBuffer::new();
        buffer.push('n', 1_000);
        buffer.push('e', 1_010);
        buffer.push('w', 1_020);
        assert_eq!(buffer.push(' ', 1_030), "new ");
        assert_eq!(buffer.push('y', 1_040), "new y");
    }
}
