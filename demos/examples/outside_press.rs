// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Outside-press dispatch across two open listbox instances.
//!
//! A single process-wide listener routes presses through `BoundedScopes`:
//! each open instance registers its button and panel rectangles, a press
//! closes every instance it missed, and the registry going empty is the
//! host's cue to drop the real listener.
//!
//! Run:
//! - `cargo run -p understory_demos --example outside_press`

use kurbo::{Point, Rect};
use understory_demos::PrintHost;
use understory_listbox::Listbox;
use understory_listbox::outside::{BoundedScopes, ScopeBounds};

fn bounds_at(x: f64) -> ScopeBounds {
    ScopeBounds {
        button: Rect::new(x, 0.0, x + 80.0, 24.0),
        options: Rect::new(x, 28.0, x + 80.0, 120.0),
    }
}

fn main() {
    let mut left: Listbox<u32, &str, PrintHost> = Listbox::new(PrintHost::new());
    let mut right: Listbox<u32, &str, PrintHost> = Listbox::new(PrintHost::new());
    for (listbox, names) in [
        (&mut left, ["Red", "Green", "Blue"]),
        (&mut right, ["Small", "Medium", "Large"]),
    ] {
        for (index, name) in names.into_iter().enumerate() {
            let id = u32::try_from(index).unwrap() + 1;
            listbox
                .register_option(id, name, name, false)
                .expect("ids are unique");
        }
    }

    let mut scopes: BoundedScopes<&'static str> = BoundedScopes::new();

    println!("open both instances");
    left.open();
    scopes.open_scope("left", bounds_at(0.0));
    right.open();
    scopes.open_scope("right", bounds_at(200.0));

    for press in [
        Point::new(40.0, 60.0),  // inside the left panel
        Point::new(150.0, 60.0), // in the void between the two
    ] {
        println!("press at ({}, {})", press.x, press.y);
        let closing: Vec<&'static str> = scopes.pressed(press).collect();
        for name in closing {
            println!("  outside press for {name:?}");
            let listbox = if name == "left" { &mut left } else { &mut right };
            listbox.on_outside_press();
            scopes.close_scope(&name);
        }
    }

    assert!(scopes.is_empty());
    println!("no open scopes left; the document listener can be dropped");
}
