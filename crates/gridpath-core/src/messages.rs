//! Input events: [`Msg`], [`Key`], [`MouseAction`], [`ModMask`].

use std::time::Instant;

use crate::geom::Point;

/// A keyboard key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Escape,
    Enter,
    Tab,
    Space,
    Backspace,
    Delete,
    /// A printable character.
    Char(char),
}

/// Bitmask of modifier keys held during an input event.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModMask(pub u8);

impl ModMask {
    pub const NONE: Self = Self(0);
    pub const SHIFT: Self = Self(1 << 0);
    pub const CTRL: Self = Self(1 << 1);
    pub const ALT: Self = Self(1 << 2);

    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }
}

impl std::ops::BitOr for ModMask {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// A mouse action.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MouseAction {
    /// Primary (left) button pressed.
    Main,
    /// Secondary (right) button pressed.
    Secondary,
    /// Pointer moved with the primary button held.
    DragMain,
    /// Pointer moved with the secondary button held.
    DragSecondary,
    /// Button released.
    Release,
}

/// An input message delivered to the application.
#[derive(Clone, Debug)]
pub enum Msg {
    /// A key was pressed.
    KeyDown {
        key: Key,
        modifiers: ModMask,
        time: Instant,
    },
    /// A mouse event, in screen coordinates.
    Mouse {
        action: MouseAction,
        pos: Point,
        modifiers: ModMask,
        time: Instant,
    },
    /// The screen was resized.
    Screen {
        width: i32,
        height: i32,
        time: Instant,
    },
    /// Sent once when the application starts.
    Init,
    /// Request to quit.
    Quit,
}

impl Msg {
    /// A `KeyDown` with no modifiers.
    pub fn key(key: Key) -> Self {
        Self::KeyDown {
            key,
            modifiers: ModMask::NONE,
            time: Instant::now(),
        }
    }

    /// A mouse event with no modifiers.
    pub fn mouse(action: MouseAction, pos: Point) -> Self {
        Self::Mouse {
            action,
            pos,
            modifiers: ModMask::NONE,
            time: Instant::now(),
        }
    }

    /// Whether this message asks a running animation to stop: Escape, a
    /// quit request, or Ctrl-C.
    pub fn is_interrupt(&self) -> bool {
        match self {
            Self::Quit => true,
            Self::KeyDown { key, modifiers, .. } => {
                *key == Key::Escape
                    || (*key == Key::Char('c') && modifiers.contains(ModMask::CTRL))
            }
            _ => false,
        }
    }
}
