// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The listbox state machine.
//!
//! [`Listbox`] is the aggregate: it owns the option collection and the
//! typeahead buffer, holds open/closed status, the active option, and the
//! bound selection, and drives the host's [`FocusCoordinator`] and
//! [`ListenerScope`] as side effects of transitions.
//!
//! ## Semantics
//!
//! - Every event method runs synchronously to completion; events are
//!   processed strictly in arrival order and never re-enter.
//! - Invalid transitions (selecting while closed, moving with no enabled
//!   option, closing an already-closed panel) are silent no-ops: they arise
//!   from ordinary input races, not bugs.
//! - The active option is always either `None` or a registered, enabled
//!   option; the machine re-validates this after every collection mutation
//!   and resets to the nearest valid neighbor when the active option is
//!   removed or disabled.
//! - While closed, the active option is always `None`; activation is
//!   recomputed on each open. The selection is independent and persists
//!   across open/close cycles and content churn.
//! - Selection is written only through [`Listbox::select_active`] (or its
//!   pointer equivalent [`Listbox::on_option_click`]) and the
//!   construction-time initial binding; disabled options never come out of
//!   the enabled scans or the prefix match, so selecting one is structurally
//!   impossible.
//!
//! Observable changes bump a revision counter and deliver a fresh
//! [`Snapshot`] to watchers registered with [`Listbox::watch`].

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::hash::Hash;

use understory_option_list::{DuplicateId, OptionList};
use understory_typeahead::TypeBuffer;

use crate::focus::{FocusCoordinator, ListenerScope, Region};
use crate::keymap::{self, Anchor, FocusReturn, Intent, Key, Move};
use crate::projection::{
    ButtonSemantics, Disclosure, OptionFlags, OptionSemantics, OptionsSemantics, Part, Role,
    Snapshot, Status,
};

/// Handle for removing a watcher registered with [`Listbox::watch`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct WatchId(u64);

type Watcher<K, V> = Box<dyn FnMut(&Snapshot<K, V>)>;

/// Interaction engine for one rendered listbox.
///
/// Generic over the option id `K` (any small copyable handle), the bound
/// value `V`, and the host handle `H` implementing [`FocusCoordinator`] and
/// [`ListenerScope`]. One instance per rendered listbox; instances share
/// nothing.
pub struct Listbox<K, V, H> {
    options: OptionList<K, V>,
    typeahead: TypeBuffer,
    status: Status,
    active: Option<K>,
    selected: Option<V>,
    disabled: bool,
    disclosure: Disclosure,
    labeled: bool,
    host: H,
    watchers: Vec<(WatchId, Watcher<K, V>)>,
    next_watch: u64,
    revision: u64,
}

impl<K, V, H> Listbox<K, V, H>
where
    K: Copy + Eq + Hash,
    V: Clone + PartialEq,
    H: FocusCoordinator + ListenerScope,
{
    /// Creates a closed, empty listbox around a host handle.
    #[must_use]
    pub fn new(host: H) -> Self {
        Self {
            options: OptionList::new(),
            typeahead: TypeBuffer::new(),
            status: Status::Closed,
            active: None,
            selected: None,
            disabled: false,
            disclosure: Disclosure::Managed,
            labeled: false,
            host,
            watchers: Vec::new(),
            next_watch: 0,
            revision: 0,
        }
    }

    /// Sets the initial bound value.
    #[must_use]
    pub fn with_selected(mut self, value: V) -> Self {
        self.selected = Some(value);
        self
    }

    /// Chooses who gates the mounting of the options container.
    #[must_use]
    pub fn with_disclosure(mut self, disclosure: Disclosure) -> Self {
        self.disclosure = disclosure;
        self
    }

    /// Declares that a label part is rendered; semantic projections then
    /// carry the label relation on both the button and the container.
    #[must_use]
    pub fn with_label(mut self) -> Self {
        self.labeled = true;
        self
    }

    /// Starts the listbox disabled.
    #[must_use]
    pub fn with_disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Replaces the typeahead buffer, e.g. to adjust its idle window.
    #[must_use]
    pub fn with_typeahead(mut self, typeahead: TypeBuffer) -> Self {
        self.typeahead = typeahead;
        self
    }

    // ---------------------------------------------------------------------
    // Option collection

    /// Registers an option as host content mounts it.
    ///
    /// # Errors
    ///
    /// Returns [`DuplicateId`] if the id is already registered.
    pub fn register_option(
        &mut self,
        id: K,
        text: impl Into<String>,
        value: V,
        disabled: bool,
    ) -> Result<(), DuplicateId> {
        self.options.register(id, text, value, disabled)?;
        self.touch();
        Ok(())
    }

    /// Unregisters an option as host content unmounts it.
    ///
    /// If it was the active option, activation re-resolves to the nearest
    /// enabled neighbor of the vacated position, or `None`.
    pub fn unregister_option(&mut self, id: &K) -> bool {
        let position = self.options.position(id);
        if self.options.unregister(id).is_none() {
            return false;
        }
        if self.active == Some(*id) {
            self.active = self
                .options
                .nearest_enabled(position.unwrap_or(0))
                .map(|e| e.id);
        }
        self.touch();
        true
    }

    /// Toggles an option's disabled flag.
    ///
    /// Disabling the active option re-resolves activation to the next
    /// enabled option, else the previous, else `None`.
    pub fn set_option_disabled(&mut self, id: &K, disabled: bool) -> bool {
        if !self.options.set_disabled(id, disabled) {
            return false;
        }
        if disabled && self.active == Some(*id) {
            self.active = self
                .options
                .next_enabled(Some(id), false)
                .or_else(|| self.options.prev_enabled(Some(id), false))
                .map(|e| e.id);
        }
        self.touch();
        true
    }

    /// The option collection, for iteration and lookups.
    #[must_use]
    pub fn options(&self) -> &OptionList<K, V> {
        &self.options
    }

    // ---------------------------------------------------------------------
    // Input events

    /// Handles a key event at `now` (milliseconds).
    ///
    /// Returns `true` when the key was consumed and the host must suppress
    /// the input's default behavior. A Tab-away close returns `false` so
    /// focus follows the natural order.
    pub fn on_key(&mut self, key: Key, now: u64) -> bool {
        if self.disabled {
            return false;
        }
        let searching = self.typeahead.is_live(now);
        let Some(intent) = keymap::resolve(key, self.status, searching) else {
            return false;
        };
        let changed = match intent {
            Intent::Open(anchor) => self.enter_open(anchor, now),
            Intent::Move(direction) => {
                self.typeahead.interrupt();
                self.do_move(direction)
            }
            Intent::Select => {
                self.typeahead.interrupt();
                self.do_select()
            }
            Intent::Close(ret) => self.leave_open(ret),
            Intent::Type(c) => {
                let after = self.active;
                self.search_char(c, now, after)
            }
        };
        if changed {
            self.touch();
        }
        intent.suppresses_default()
    }

    /// Handles activation of the button: opens when closed, closes (and
    /// restores focus) when open, inert while disabled.
    pub fn on_button_activate(&mut self) {
        if self.disabled {
            return;
        }
        let changed = match self.status {
            Status::Closed => self.enter_open(Anchor::First, 0),
            Status::Open => self.leave_open(FocusReturn::Restore),
        };
        if changed {
            self.touch();
        }
    }

    /// Handles the pointer entering an option: hover activation.
    ///
    /// Updates the logical active indicator only; real focus stays on the
    /// options container.
    pub fn on_option_pointer_enter(&mut self, id: K) {
        self.set_active(id);
    }

    /// Handles a pointer press on an option: activates and selects in one
    /// step. Structurally inert on disabled options and while closed.
    pub fn on_option_click(&mut self, id: K) {
        if self.status != Status::Open {
            return;
        }
        match self.options.find(&id) {
            Some(entry) if !entry.disabled => {}
            _ => return,
        }
        self.active = Some(id);
        if self.do_select() {
            self.touch();
        }
    }

    /// Handles a press outside both the button and the options container.
    pub fn on_outside_press(&mut self) {
        if self.leave_open(FocusReturn::Restore) {
            self.touch();
        }
    }

    /// Handles real focus leaving the panel entirely (e.g. Tab-away
    /// completed elsewhere). Closes without forcing focus anywhere; no-op
    /// if focus is still within the options container.
    pub fn on_focus_left(&mut self) {
        if self.status != Status::Open || self.host.is_focus_within(Region::Options) {
            return;
        }
        if self.leave_open(FocusReturn::Natural) {
            self.touch();
        }
    }

    /// Handles the typeahead idle wakeup scheduled for
    /// [`Listbox::typeahead_deadline`]. Stale wakeups are no-ops.
    ///
    /// Returns `true` if the buffer cleared.
    pub fn on_typeahead_deadline(&mut self, now: u64) -> bool {
        self.typeahead.on_idle_deadline(now)
    }

    /// Instant the host should deliver [`Listbox::on_typeahead_deadline`],
    /// if a wakeup is needed. Moves with every searched keystroke.
    #[must_use]
    pub fn typeahead_deadline(&self) -> Option<u64> {
        self.typeahead.deadline()
    }

    // ---------------------------------------------------------------------
    // Programmatic transitions

    /// Opens the panel. No-op while open or disabled.
    pub fn open(&mut self) {
        if self.enter_open(Anchor::First, 0) {
            self.touch();
        }
    }

    /// Closes the panel, restoring focus to the button. No-op while closed.
    pub fn close(&mut self) {
        if self.leave_open(FocusReturn::Restore) {
            self.touch();
        }
    }

    /// Makes `id` the active option, if it is registered and enabled.
    /// Valid only while open; never moves real focus.
    pub fn set_active(&mut self, id: K) -> bool {
        let changed = self.do_set_active(id);
        if changed {
            self.touch();
        }
        changed
    }

    /// Moves the active option. Valid only while open; no-op when no
    /// enabled option exists.
    pub fn move_active(&mut self, direction: Move) -> bool {
        if self.status == Status::Open {
            self.typeahead.interrupt();
        }
        let changed = self.do_move(direction);
        if changed {
            self.touch();
        }
        changed
    }

    /// Binds the active option's value and closes.
    ///
    /// The sole mutation path for the selection. Valid only while open with
    /// an enabled active option; returns whether a selection was made.
    pub fn select_active(&mut self) -> bool {
        let changed = self.do_select();
        if changed {
            self.touch();
        }
        changed
    }

    /// Disables or re-enables the whole listbox.
    ///
    /// Disabling while open forces an immediate close; while disabled, all
    /// open-triggering input is inert.
    pub fn set_disabled(&mut self, disabled: bool) {
        if self.disabled == disabled {
            return;
        }
        self.disabled = disabled;
        if disabled {
            self.leave_open(FocusReturn::Restore);
        }
        self.touch();
    }

    // ---------------------------------------------------------------------
    // Projections

    /// Open/closed status.
    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    /// Returns `true` while the panel is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.status == Status::Open
    }

    /// The active option id, if any.
    #[must_use]
    pub fn active_id(&self) -> Option<K> {
        self.active
    }

    /// The bound value, if any.
    #[must_use]
    pub fn selected(&self) -> Option<&V> {
        self.selected.as_ref()
    }

    /// Whether the whole listbox is disabled.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Monotonically increasing change counter.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Whether the options container should currently be mounted.
    ///
    /// Under [`Disclosure::Static`] mounting is delegated to the caller's
    /// own conditional rendering, so this always reports `true`; the
    /// open/closed status is still computed and exposed.
    #[must_use]
    pub fn panel_presented(&self) -> bool {
        match self.disclosure {
            Disclosure::Managed => self.status == Status::Open,
            Disclosure::Static => true,
        }
    }

    /// An immutable view of the current state.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot<K, V> {
        Snapshot {
            status: self.status,
            active: self.active,
            selected: self.selected.clone(),
            disabled: self.disabled,
            revision: self.revision,
        }
    }

    /// Per-option state flags, or `None` for an unregistered id.
    #[must_use]
    pub fn option_flags(&self, id: &K) -> Option<OptionFlags> {
        let entry = self.options.find(id)?;
        let mut flags = OptionFlags::empty();
        if self.active == Some(entry.id) {
            flags |= OptionFlags::ACTIVE;
        }
        if self.selected.as_ref() == Some(&entry.value) {
            flags |= OptionFlags::SELECTED;
        }
        if entry.disabled {
            flags |= OptionFlags::DISABLED;
        }
        Some(flags)
    }

    /// Accessibility contract for the button part.
    #[must_use]
    pub fn button_semantics(&self) -> ButtonSemantics {
        ButtonSemantics {
            controls: Part::Options,
            expanded: self.status == Status::Open,
            labelled_by: self.labeled.then_some(Part::Label),
            disabled: self.disabled,
        }
    }

    /// Accessibility contract for the options container part.
    #[must_use]
    pub fn options_semantics(&self) -> OptionsSemantics<K> {
        OptionsSemantics {
            role: Role::Listbox,
            active_descendant: self.active,
            labelled_by: self.labeled.then_some(Part::Label),
        }
    }

    /// Accessibility contract for one option part, or `None` for an
    /// unregistered id.
    #[must_use]
    pub fn option_semantics(&self, id: &K) -> Option<OptionSemantics> {
        let flags = self.option_flags(id)?;
        Some(OptionSemantics {
            role: Role::Option,
            selected: flags.contains(OptionFlags::SELECTED),
            disabled: flags.contains(OptionFlags::DISABLED),
        })
    }

    /// The host handle.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The host handle, mutably.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    // ---------------------------------------------------------------------
    // Watchers

    /// Registers a watcher delivered one [`Snapshot`] per completed
    /// observable transition.
    pub fn watch(&mut self, watcher: impl FnMut(&Snapshot<K, V>) + 'static) -> WatchId {
        let id = WatchId(self.next_watch);
        self.next_watch += 1;
        self.watchers.push((id, Box::new(watcher)));
        id
    }

    /// Removes a watcher. Returns `false` if it was already removed.
    pub fn unwatch(&mut self, id: WatchId) -> bool {
        match self.watchers.iter().position(|(w, _)| *w == id) {
            Some(index) => {
                self.watchers.remove(index);
                true
            }
            None => false,
        }
    }

    // ---------------------------------------------------------------------
    // Transition internals. Each returns whether observable state changed;
    // event entry points notify once per completed transition.

    fn enter_open(&mut self, anchor: Anchor, now: u64) -> bool {
        if self.disabled || self.status == Status::Open {
            return false;
        }
        self.status = Status::Open;
        self.active = self.selected_option_id().or_else(|| {
            match anchor {
                Anchor::Last => self.options.last_enabled(),
                Anchor::First | Anchor::Typed(_) => self.options.first_enabled(),
            }
            .map(|e| e.id)
        });
        // Focus must land before the next event is processed.
        self.host.focus_options();
        self.host.acquire();
        if let Anchor::Typed(c) = anchor {
            // The just-opened panel has no prior active baseline; a typed
            // opener searches from past the selection, or from the start.
            let after = self.selected_option_id();
            self.search_char(c, now, after);
        }
        true
    }

    fn leave_open(&mut self, ret: FocusReturn) -> bool {
        if self.status == Status::Closed {
            return false;
        }
        self.status = Status::Closed;
        self.active = None;
        self.typeahead.interrupt();
        self.host.release();
        if matches!(ret, FocusReturn::Restore) {
            self.host.focus_button();
        }
        true
    }

    fn do_move(&mut self, direction: Move) -> bool {
        if self.status != Status::Open {
            return false;
        }
        let next = match direction {
            Move::Next => self.options.next_enabled(self.active.as_ref(), true),
            Move::Prev => self.options.prev_enabled(self.active.as_ref(), true),
            Move::First => self.options.first_enabled(),
            Move::Last => self.options.last_enabled(),
        }
        .map(|e| e.id);
        match next {
            Some(id) if self.active != Some(id) => {
                self.active = Some(id);
                true
            }
            _ => false,
        }
    }

    fn do_set_active(&mut self, id: K) -> bool {
        if self.status != Status::Open || self.active == Some(id) {
            return false;
        }
        match self.options.find(&id) {
            Some(entry) if !entry.disabled => {
                self.active = Some(id);
                true
            }
            _ => false,
        }
    }

    fn do_select(&mut self) -> bool {
        if self.status != Status::Open {
            return false;
        }
        let Some(id) = self.active else {
            return false;
        };
        let value = match self.options.find(&id) {
            Some(entry) if !entry.disabled => entry.value.clone(),
            _ => return false,
        };
        self.selected = Some(value);
        self.leave_open(FocusReturn::Restore);
        true
    }

    fn search_char(&mut self, c: char, now: u64, after: Option<K>) -> bool {
        let query = self.typeahead.push(c, now);
        let hit = self.options.match_prefix(query, after.as_ref()).map(|e| e.id);
        match hit {
            Some(id) => self.do_set_active(id),
            None => {
                self.typeahead.mark_unmatched();
                false
            }
        }
    }

    fn selected_option_id(&self) -> Option<K> {
        let selected = self.selected.as_ref()?;
        self.options
            .iter()
            .find(|e| !e.disabled && e.value == *selected)
            .map(|e| e.id)
    }

    fn touch(&mut self) {
        self.revision += 1;
        if self.watchers.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        for (_, watcher) in &mut self.watchers {
            watcher(&snapshot);
        }
    }
}

impl<K, V, H> fmt::Debug for Listbox<K, V, H>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listbox")
            .field("status", &self.status)
            .field("active", &self.active)
            .field("selected", &self.selected)
            .field("disabled", &self.disabled)
            .field("disclosure", &self.disclosure)
            .field("revision", &self.revision)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
