// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Listbox: a deterministic interaction engine for an accessible
//! single-select listbox.
//!
//! ## Overview
//!
//! This crate decides *when the option panel is open*, *which option is
//! active* (the roving keyboard/pointer target, distinct from real input
//! focus), and *which value is selected*, for a dropdown built from a button
//! plus an options container. It owns the hard part of the widget — the
//! state machine reconciling open/closed status, a dynamically registered
//! option collection, disabled-option skipping, wraparound navigation, and
//! debounced typeahead — and leaves rendering, styling, and attribute
//! serialization to the host.
//!
//! ## Workflow
//!
//! 1) Construct a [`Listbox`] around a host handle implementing
//!    [`FocusCoordinator`] and [`ListenerScope`]; register options as host
//!    content mounts them and unregister as it unmounts them.
//! 2) Feed input events — [`Listbox::on_key`], [`Listbox::on_button_activate`],
//!    [`Listbox::on_option_pointer_enter`], [`Listbox::on_option_click`],
//!    [`Listbox::on_outside_press`], [`Listbox::on_focus_left`] — each with
//!    an event timestamp where timing matters. Every transition runs
//!    synchronously to completion; the engine never reads a clock.
//! 3) Read projections: [`Listbox::snapshot`], per-option [`OptionFlags`],
//!    and the semantic accessibility contract
//!    ([`Listbox::button_semantics`], [`Listbox::options_semantics`],
//!    [`Listbox::option_semantics`]). Or subscribe with [`Listbox::watch`]
//!    to receive each new [`Snapshot`].
//!
//! Real input focus stays on the options container while open; per-option
//! activity is surfaced as a logical active-descendant reference, which is
//! what keeps typeahead and hover activation from fighting over focus.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_listbox::{Headless, Key, Listbox};
//!
//! let mut listbox: Listbox<u32, &str, Headless> = Listbox::new(Headless);
//! listbox.register_option(1, "Alice", "alice", false).unwrap();
//! listbox.register_option(2, "Amy", "amy", false).unwrap();
//! listbox.register_option(3, "Bob", "bob", false).unwrap();
//!
//! // Enter on the closed button opens without selecting.
//! listbox.on_key(Key::Enter, 0);
//! assert_eq!(listbox.active_id(), Some(1));
//! assert_eq!(listbox.selected(), None);
//!
//! // Typeahead moves the active option; Enter selects it and closes.
//! listbox.on_key(Key::Char('b'), 100);
//! assert_eq!(listbox.active_id(), Some(3));
//! listbox.on_key(Key::Enter, 200);
//! assert_eq!(listbox.selected(), Some(&"bob"));
//! ```
//!
//! ## Features
//!
//! - `std`: enables `std` support for dependencies that support it.
//! - `libm`: enables `no_std` + `alloc` builds that rely on `libm` for
//!   floating-point math.
//! - `outside_adapter`: enables rect-based outside-press hit testing in
//!   [`outside`] and pulls in `kurbo`; defaults to `libm` for `no_std`
//!   builds.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod focus;
pub mod keymap;
pub mod listbox;
pub mod outside;
pub mod projection;

pub use focus::{FocusCoordinator, Headless, ListenerScope, Region};
pub use keymap::{Anchor, FocusReturn, Intent, Key, Move};
pub use listbox::{Listbox, WatchId};
pub use projection::{
    ButtonSemantics, Disclosure, OptionFlags, OptionSemantics, OptionsSemantics, Part, RenderAs,
    Role, Snapshot, Status, Surface,
};
pub use understory_option_list::{DuplicateId, Entry, OptionList};
