// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Read-only projections: snapshots, per-option flags, semantic
//! accessibility data, and render descriptors.
//!
//! The engine does not push state into a framework's reactivity system;
//! consumers read an immutable [`Snapshot`] (or receive one per completed
//! transition through `Listbox::watch`) and pull per-option [`OptionFlags`]
//! as pure functions of the current state.
//!
//! The semantic structs ([`ButtonSemantics`], [`OptionsSemantics`],
//! [`OptionSemantics`]) carry the accessibility contract as plain data —
//! which relations and booleans each part must surface — leaving the
//! attribute string encoding to the rendering layer. [`Part`] and
//! [`Surface`] do the same for the "render as" indirection: each part
//! resolves to a default output element, overridable by the caller,
//! including a pass-children-through mode.

use bitflags::bitflags;

/// Open/closed status of the option panel.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Status {
    /// Panel is closed; no option is active.
    Closed,
    /// Panel is open.
    Open,
}

/// Immutable view of the engine state after a completed transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot<K, V> {
    /// Open/closed status.
    pub status: Status,
    /// The active option, if any. Always `None` while closed, and always an
    /// enabled, registered option while open.
    pub active: Option<K>,
    /// The bound value. Independent of `active`; survives open/close cycles.
    pub selected: Option<V>,
    /// Whether the whole listbox is disabled.
    pub disabled: bool,
    /// Monotonically increasing change counter.
    pub revision: u64,
}

bitflags! {
    /// Per-option state flags, projected for the rendering layer.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct OptionFlags: u8 {
        /// The option is the logical keyboard/pointer target.
        const ACTIVE   = 0b0000_0001;
        /// The option's value equals the bound selection.
        const SELECTED = 0b0000_0010;
        /// The option is excluded from traversal and matching.
        const DISABLED = 0b0000_0100;
    }
}

/// Semantic role a part must surface.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    /// The options container.
    Listbox,
    /// A single option.
    Option,
}

/// The parts a listbox is assembled from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Part {
    /// The top-level composition; renders no wrapper of its own.
    Listbox,
    /// The disclosure button.
    Button,
    /// The optional label.
    Label,
    /// The options container.
    Options,
    /// A single option.
    OptionItem,
}

/// Output element a part materializes as.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Surface {
    /// A pressable control.
    PressableControl,
    /// A label element.
    LabelElement,
    /// A list container.
    ListContainer,
    /// A list item.
    ListItem,
    /// No element; children are rendered directly.
    NoWrapper,
}

/// Caller override for a part's output element.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum RenderAs {
    /// Use the part's default surface.
    #[default]
    Default,
    /// Materialize as the given surface instead.
    Surface(Surface),
    /// Render no element and pass children through.
    Passthrough,
}

impl Part {
    /// The surface a part materializes as when the caller does not override.
    #[must_use]
    pub const fn default_surface(self) -> Surface {
        match self {
            Self::Listbox => Surface::NoWrapper,
            Self::Button => Surface::PressableControl,
            Self::Label => Surface::LabelElement,
            Self::Options => Surface::ListContainer,
            Self::OptionItem => Surface::ListItem,
        }
    }

    /// Resolves the output surface for this part under a caller choice.
    #[must_use]
    pub const fn resolve_surface(self, choice: RenderAs) -> Surface {
        match choice {
            RenderAs::Default => self.default_surface(),
            RenderAs::Surface(surface) => surface,
            RenderAs::Passthrough => Surface::NoWrapper,
        }
    }
}

/// Who controls the mounting of the options container.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Disclosure {
    /// The engine's open/closed status gates the panel.
    #[default]
    Managed,
    /// The caller's own conditional rendering gates the panel; the engine
    /// still computes and exposes `status`.
    Static,
}

/// Accessibility contract for the button part.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ButtonSemantics {
    /// The part this button controls (always the options container).
    pub controls: Part,
    /// Mirrors the open/closed status.
    pub expanded: bool,
    /// Label relation, when a label part is declared.
    pub labelled_by: Option<Part>,
    /// Mirrors the whole-listbox disabled flag.
    pub disabled: bool,
}

/// Accessibility contract for the options container part.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct OptionsSemantics<K> {
    /// Role the container must surface.
    pub role: Role,
    /// Logical active-descendant reference, mirroring the active option.
    pub active_descendant: Option<K>,
    /// Label relation, when a label part is declared.
    pub labelled_by: Option<Part>,
}

/// Accessibility contract for a single option part.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct OptionSemantics {
    /// Role the option must surface.
    pub role: Role,
    /// Mirrors equality with the bound selection.
    pub selected: bool,
    /// Mirrors the option's disabled flag.
    pub disabled: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parts_have_the_documented_default_surfaces() {
        assert_eq!(Part::Listbox.default_surface(), Surface::NoWrapper);
        assert_eq!(Part::Button.default_surface(), Surface::PressableControl);
        assert_eq!(Part::Label.default_surface(), Surface::LabelElement);
        assert_eq!(Part::Options.default_surface(), Surface::ListContainer);
        assert_eq!(Part::OptionItem.default_surface(), Surface::ListItem);
    }

    #[test]
    fn overrides_and_passthrough_win_over_defaults() {
        assert_eq!(
            Part::Button.resolve_surface(RenderAs::Surface(Surface::ListItem)),
            Surface::ListItem
        );
        assert_eq!(
            Part::Options.resolve_surface(RenderAs::Passthrough),
            Surface::NoWrapper
        );
        assert_eq!(
            Part::OptionItem.resolve_surface(RenderAs::Default),
            Surface::ListItem
        );
    }

    #[test]
    fn option_flags_compose() {
        let flags = OptionFlags::ACTIVE | OptionFlags::SELECTED;
        assert!(flags.contains(OptionFlags::ACTIVE));
        assert!(!flags.contains(OptionFlags::DISABLED));
    }
}
