// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Outside-press dispatch for open listbox instances.
//!
//! A press outside both the button and the options container closes the
//! panel. Rather than each instance installing its own document listener,
//! the host keeps one process-wide listener and routes through a single
//! [`OutsideScopes`]: instances enter the registry when they open and leave
//! it when they close (mirroring the engine's listener scope), and
//! [`OutsideScopes::is_empty`] tells the host when the real listener can be
//! dropped entirely. This keeps listener count bounded across arbitrary
//! open/close cycles.
//!
//! The core registry routes by container identity only: the host resolves
//! which instance (if any) a press landed in and asks for the instances that
//! must close. With the `outside_adapter` feature, [`BoundedScopes`] does
//! the containment test itself from per-instance rectangles.

use smallvec::SmallVec;

/// Registry of instances currently holding an open panel.
///
/// `I` identifies an instance (a widget id, a slot index); routing is by
/// identity, the host decides what a press landed in.
#[derive(Clone, Debug, Default)]
pub struct OutsideScopes<I> {
    open: SmallVec<[I; 2]>,
}

impl<I: Copy + Eq> OutsideScopes<I> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            open: SmallVec::new(),
        }
    }

    /// Returns `true` when no instance is open; the host can drop its
    /// process-wide listener.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }

    /// Number of open instances.
    #[must_use]
    pub fn len(&self) -> usize {
        self.open.len()
    }

    /// Registers an instance on open. Idempotent.
    pub fn open_scope(&mut self, instance: I) {
        if !self.open.contains(&instance) {
            self.open.push(instance);
        }
    }

    /// Removes an instance on close. Returns `false` if it was not open.
    pub fn close_scope(&mut self, instance: &I) -> bool {
        match self.open.iter().position(|i| i == instance) {
            Some(index) => {
                self.open.remove(index);
                true
            }
            None => false,
        }
    }

    /// Routes a press.
    ///
    /// `hit` is the instance whose button or panel contained the press, if
    /// any; every *other* open instance saw an outside press and must close.
    pub fn pressed(&self, hit: Option<&I>) -> impl Iterator<Item = I> + '_ {
        let hit = hit.copied();
        self.open
            .iter()
            .copied()
            .filter(move |i| Some(*i) != hit)
    }
}

#[cfg(feature = "outside_adapter")]
pub use bounded::{BoundedScopes, ScopeBounds};

#[cfg(feature = "outside_adapter")]
mod bounded {
    use kurbo::{Point, Rect};
    use smallvec::SmallVec;

    /// The two rectangles a press can land in without being "outside".
    #[derive(Copy, Clone, Debug, PartialEq)]
    pub struct ScopeBounds {
        /// Bounds of the disclosure button.
        pub button: Rect,
        /// Bounds of the options container.
        pub options: Rect,
    }

    impl ScopeBounds {
        /// Whether a point is inside either rectangle.
        #[must_use]
        pub fn contains(&self, point: Point) -> bool {
            self.button.contains(point) || self.options.contains(point)
        }
    }

    /// [`OutsideScopes`](super::OutsideScopes) with per-instance geometry.
    ///
    /// Hosts that track plain rectangles register them here and feed raw
    /// press positions; containment replaces the identity lookup.
    #[derive(Clone, Debug, Default)]
    pub struct BoundedScopes<I> {
        open: SmallVec<[(I, ScopeBounds); 2]>,
    }

    impl<I: Copy + Eq> BoundedScopes<I> {
        /// Creates an empty registry.
        #[must_use]
        pub fn new() -> Self {
            Self {
                open: SmallVec::new(),
            }
        }

        /// Returns `true` when no instance is open.
        #[must_use]
        pub fn is_empty(&self) -> bool {
            self.open.is_empty()
        }

        /// Registers an instance with its bounds on open; re-registering
        /// updates the bounds.
        pub fn open_scope(&mut self, instance: I, bounds: ScopeBounds) {
            match self.open.iter_mut().find(|(i, _)| *i == instance) {
                Some((_, b)) => *b = bounds,
                None => self.open.push((instance, bounds)),
            }
        }

        /// Removes an instance on close. Returns `false` if it was not open.
        pub fn close_scope(&mut self, instance: &I) -> bool {
            match self.open.iter().position(|(i, _)| i == instance) {
                Some(index) => {
                    self.open.remove(index);
                    true
                }
                None => false,
            }
        }

        /// The open instance containing a point, if any.
        #[must_use]
        pub fn hit_at(&self, point: Point) -> Option<&I> {
            self.open
                .iter()
                .find(|(_, b)| b.contains(point))
                .map(|(i, _)| i)
        }

        /// Routes a press position: every open instance whose own button and
        /// panel both miss the point must close.
        pub fn pressed(&self, point: Point) -> impl Iterator<Item = I> + '_ {
            self.open
                .iter()
                .filter(move |(_, b)| !b.contains(point))
                .map(|(i, _)| *i)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn scopes_track_open_instances() {
        let mut scopes: OutsideScopes<u32> = OutsideScopes::new();
        assert!(scopes.is_empty());
        scopes.open_scope(1);
        scopes.open_scope(1);
        scopes.open_scope(2);
        assert_eq!(scopes.len(), 2);
        assert!(scopes.close_scope(&1));
        assert!(!scopes.close_scope(&1));
        assert!(!scopes.is_empty());
        assert!(scopes.close_scope(&2));
        assert!(scopes.is_empty());
    }

    #[test]
    fn press_inside_one_instance_closes_only_the_others() {
        let mut scopes: OutsideScopes<u32> = OutsideScopes::new();
        scopes.open_scope(1);
        scopes.open_scope(2);
        let closing: Vec<u32> = scopes.pressed(Some(&1)).collect();
        assert_eq!(closing, [2]);
        let closing: Vec<u32> = scopes.pressed(None).collect();
        assert_eq!(closing, [1, 2]);
    }

    #[cfg(feature = "outside_adapter")]
    mod bounded {
        use super::super::{BoundedScopes, ScopeBounds};
        use alloc::vec::Vec;
        use kurbo::{Point, Rect};

        fn bounds(x: f64) -> ScopeBounds {
            ScopeBounds {
                button: Rect::new(x, 0.0, x + 10.0, 10.0),
                options: Rect::new(x, 12.0, x + 10.0, 50.0),
            }
        }

        #[test]
        fn containment_covers_button_and_panel() {
            let b = bounds(0.0);
            assert!(b.contains(Point::new(5.0, 5.0)));
            assert!(b.contains(Point::new(5.0, 30.0)));
            // The gap between button and panel counts as outside.
            assert!(!b.contains(Point::new(5.0, 11.0)));
        }

        #[test]
        fn press_routes_by_geometry() {
            let mut scopes: BoundedScopes<u32> = BoundedScopes::new();
            scopes.open_scope(1, bounds(0.0));
            scopes.open_scope(2, bounds(100.0));
            // Inside instance 1's panel: only instance 2 closes.
            let closing: Vec<u32> = scopes.pressed(Point::new(5.0, 30.0)).collect();
            assert_eq!(closing, [2]);
            assert_eq!(scopes.hit_at(Point::new(5.0, 30.0)), Some(&1));
            // In the void: both close.
            let closing: Vec<u32> = scopes.pressed(Point::new(60.0, 30.0)).collect();
            assert_eq!(closing, [1, 2]);
            assert_eq!(scopes.hit_at(Point::new(60.0, 30.0)), None);
        }
    }
}
