// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared helpers for the listbox demos.

use understory_listbox::{FocusCoordinator, ListenerScope, Region};

/// Host that prints focus and listener transitions to stdout and tracks
/// where the pretend real focus sits.
#[derive(Debug, Default)]
pub struct PrintHost {
    focus: Option<Region>,
}

impl PrintHost {
    /// Creates a host with focus nowhere.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl FocusCoordinator for PrintHost {
    fn focus_button(&mut self) {
        self.focus = Some(Region::Button);
        println!("  [focus] -> button");
    }

    fn focus_options(&mut self) {
        self.focus = Some(Region::Options);
        println!("  [focus] -> options container");
    }

    fn is_focus_within(&self, region: Region) -> bool {
        self.focus == Some(region)
    }
}

impl ListenerScope for PrintHost {
    fn acquire(&mut self) {
        println!("  [listeners] acquired");
    }

    fn release(&mut self) {
        println!("  [listeners] released");
    }
}
