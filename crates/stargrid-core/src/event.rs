#![forbid(unsafe_code)]

//! Input types consumed by the grid.
//!
//! # Design Notes
//!
//! - The grid never interprets raw input. Hosts translate engine clicks into
//!   a [`MouseButton`] plus [`Modifiers`] and call [`ClickGesture::classify`].
//! - `Modifiers` use bitflags for easy combination.

use bitflags::bitflags;

/// Mouse button that produced a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button.
    Left,

    /// Right mouse button.
    Right,

    /// Middle mouse button (scroll wheel click).
    Middle,
}

bitflags! {
    /// Modifier keys held during a click.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Super/Meta/Command key.
        const SUPER = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

/// A click already resolved into the gesture the grid understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClickGesture {
    /// Plain left click: pick only this icon.
    Plain,
    /// Ctrl (or Command) + left click: toggle this icon.
    Ctrl,
    /// Shift + left click: pick the contiguous range from the anchor.
    Shift,
    /// Middle click: inspect the item without touching the selection.
    Middle,
}

impl ClickGesture {
    /// Classify a raw button/modifier combination.
    ///
    /// Shift takes precedence over Ctrl when both are held. Right clicks
    /// belong to context menus and yield `None`.
    #[must_use]
    pub fn classify(button: MouseButton, modifiers: Modifiers) -> Option<Self> {
        let gesture = match button {
            MouseButton::Middle => Some(Self::Middle),
            MouseButton::Right => None,
            MouseButton::Left if modifiers.contains(Modifiers::SHIFT) => Some(Self::Shift),
            MouseButton::Left if modifiers.intersects(Modifiers::CTRL | Modifiers::SUPER) => {
                Some(Self::Ctrl)
            }
            MouseButton::Left => Some(Self::Plain),
        };
        tracing::trace!(message = "grid.click", ?button, ?modifiers, ?gesture);
        gesture
    }

    /// Whether this gesture changes the picked set.
    #[must_use]
    pub const fn is_selection(self) -> bool {
        !matches!(self, Self::Middle)
    }
}
