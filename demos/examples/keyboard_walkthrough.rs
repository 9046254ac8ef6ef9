// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scripted keyboard session against the listbox engine.
//!
//! Drives a small fruit listbox through open, arrow navigation, typeahead,
//! and selection, printing the observable state after each key.
//!
//! Run:
//! - `cargo run -p understory_demos --example keyboard_walkthrough`

use understory_demos::PrintHost;
use understory_listbox::{Key, Listbox};

fn main() {
    let mut listbox: Listbox<u32, &str, PrintHost> = Listbox::new(PrintHost::new());
    for (id, name) in [(1, "Apple"), (2, "Apricot"), (3, "Banana"), (4, "Cherry")] {
        // Banana is out of season.
        let disabled = name == "Banana";
        listbox
            .register_option(id, name, name, disabled)
            .expect("ids are unique");
    }

    let script: &[(Key, u64, &str)] = &[
        (Key::Enter, 0, "Enter on the closed button"),
        (Key::ArrowDown, 100, "ArrowDown"),
        (Key::Char('a'), 200, "type 'a'"),
        (Key::Char('p'), 250, "type 'p'"),
        (Key::Char('r'), 300, "type 'r'"),
        (Key::Enter, 500, "Enter on the open panel"),
    ];

    for (key, now, label) in script {
        println!("{label}");
        let handled = listbox.on_key(*key, *now);
        let active = listbox
            .active_id()
            .and_then(|id| listbox.options().find(&id))
            .map(|entry| entry.text.as_str());
        println!(
            "  handled={handled} status={:?} active={active:?} selected={:?}",
            listbox.status(),
            listbox.selected(),
        );
        if let Some(deadline) = listbox.typeahead_deadline() {
            println!("  (typeahead clear due at {deadline}ms)");
        }
    }
}
