// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pure key → intent mapping.
//!
//! [`resolve`] turns a discrete key into an [`Intent`] evaluated against the
//! current open/closed status; it holds no state and performs no transition.
//! The engine executes the intent; hosts use
//! [`Intent::suppresses_default`] to decide whether to swallow the input's
//! default behavior (the options container is not a text field, so printable
//! characters are always suppressed).
//!
//! Keys with no entry for the current status — and modifier or control input
//! the host maps to no [`Key`] at all — resolve to `None` and produce no
//! transition.

use crate::projection::Status;

/// Discrete key input, pre-translated by the host.
///
/// `Char` carries printable characters only; control characters resolve to
/// nothing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Down arrow.
    ArrowDown,
    /// Up arrow.
    ArrowUp,
    /// Home.
    Home,
    /// End.
    End,
    /// Page up.
    PageUp,
    /// Page down.
    PageDown,
    /// Enter / Return.
    Enter,
    /// Space bar.
    Space,
    /// Escape.
    Escape,
    /// Tab (any direction; the engine never redirects tab focus).
    Tab,
    /// A printable character.
    Char(char),
}

/// Where the active option lands when a key opens the panel.
///
/// A currently selected, enabled option always wins; the anchor picks the
/// fallback when there is none.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Anchor {
    /// Fall back to the first enabled option.
    First,
    /// Fall back to the last enabled option.
    Last,
    /// Open and immediately run this character through typeahead.
    Typed(char),
}

/// Direction of an active-option move while open.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    /// Next enabled option, wrapping past the end.
    Next,
    /// Previous enabled option, wrapping past the start.
    Prev,
    /// First enabled option.
    First,
    /// Last enabled option.
    Last,
}

/// What happens to real focus when a key closes the panel.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FocusReturn {
    /// Return focus to the button.
    Restore,
    /// Leave focus to follow the natural order (Tab-away).
    Natural,
}

/// Resolved meaning of a key press.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    /// Open the panel with the given activation anchor.
    Open(Anchor),
    /// Move the active option.
    Move(Move),
    /// Select the active option and close.
    Select,
    /// Close the panel.
    Close(FocusReturn),
    /// Append a character to the typeahead buffer.
    Type(char),
}

impl Intent {
    /// Whether the host must suppress the input's default behavior.
    ///
    /// True for everything except a Tab-away close, where the default must
    /// proceed so focus follows the natural order.
    #[must_use]
    pub const fn suppresses_default(self) -> bool {
        !matches!(self, Self::Close(FocusReturn::Natural))
    }
}

/// Maps a key to an intent for the given status.
///
/// `searching` reports whether a typeahead query is live; it only affects
/// Space, which extends a live search (option labels contain spaces) and
/// selects otherwise.
#[must_use]
pub fn resolve(key: Key, status: Status, searching: bool) -> Option<Intent> {
    match status {
        Status::Closed => match key {
            Key::ArrowDown => Some(Intent::Open(Anchor::First)),
            Key::ArrowUp => Some(Intent::Open(Anchor::Last)),
            Key::Enter | Key::Space => Some(Intent::Open(Anchor::First)),
            Key::Char(c) if !c.is_control() => Some(Intent::Open(Anchor::Typed(c))),
            _ => None,
        },
        Status::Open => match key {
            Key::ArrowDown => Some(Intent::Move(Move::Next)),
            Key::ArrowUp => Some(Intent::Move(Move::Prev)),
            Key::Home | Key::PageUp => Some(Intent::Move(Move::First)),
            Key::End | Key::PageDown => Some(Intent::Move(Move::Last)),
            Key::Enter => Some(Intent::Select),
            Key::Space if searching => Some(Intent::Type(' ')),
            Key::Space => Some(Intent::Select),
            Key::Escape => Some(Intent::Close(FocusReturn::Restore)),
            Key::Tab => Some(Intent::Close(FocusReturn::Natural)),
            Key::Char(c) if !c.is_control() => Some(Intent::Type(c)),
            Key::Char(_) => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_arrows_open_toward_the_ends() {
        assert_eq!(
            resolve(Key::ArrowDown, Status::Closed, false),
            Some(Intent::Open(Anchor::First))
        );
        assert_eq!(
            resolve(Key::ArrowUp, Status::Closed, false),
            Some(Intent::Open(Anchor::Last))
        );
    }

    #[test]
    fn closed_home_end_are_ignored() {
        for key in [Key::Home, Key::End, Key::PageUp, Key::PageDown, Key::Escape, Key::Tab] {
            assert_eq!(resolve(key, Status::Closed, false), None);
        }
    }

    #[test]
    fn closed_activation_opens_without_selecting() {
        assert_eq!(
            resolve(Key::Enter, Status::Closed, false),
            Some(Intent::Open(Anchor::First))
        );
        assert_eq!(
            resolve(Key::Space, Status::Closed, false),
            Some(Intent::Open(Anchor::First))
        );
    }

    #[test]
    fn closed_printable_opens_and_seeds_typeahead() {
        assert_eq!(
            resolve(Key::Char('q'), Status::Closed, false),
            Some(Intent::Open(Anchor::Typed('q')))
        );
    }

    #[test]
    fn open_navigation_moves_the_active_option() {
        assert_eq!(
            resolve(Key::ArrowDown, Status::Open, false),
            Some(Intent::Move(Move::Next))
        );
        assert_eq!(
            resolve(Key::ArrowUp, Status::Open, false),
            Some(Intent::Move(Move::Prev))
        );
        assert_eq!(
            resolve(Key::Home, Status::Open, false),
            Some(Intent::Move(Move::First))
        );
        assert_eq!(
            resolve(Key::PageDown, Status::Open, false),
            Some(Intent::Move(Move::Last))
        );
    }

    #[test]
    fn space_extends_a_live_search_and_selects_otherwise() {
        assert_eq!(resolve(Key::Space, Status::Open, true), Some(Intent::Type(' ')));
        assert_eq!(resolve(Key::Space, Status::Open, false), Some(Intent::Select));
    }

    #[test]
    fn tab_close_leaves_the_default_alone() {
        let tab = resolve(Key::Tab, Status::Open, false).unwrap();
        assert_eq!(tab, Intent::Close(FocusReturn::Natural));
        assert!(!tab.suppresses_default());
        let escape = resolve(Key::Escape, Status::Open, false).unwrap();
        assert!(escape.suppresses_default());
        let typed = resolve(Key::Char('a'), Status::Open, false).unwrap();
        assert!(typed.suppresses_default());
    }

    #[test]
    fn control_characters_resolve_to_nothing() {
        assert_eq!(resolve(Key::Char('\u{8}'), Status::Open, false), None);
        assert_eq!(resolve(Key::Char('\u{8}'), Status::Closed, false), None);
    }
}
