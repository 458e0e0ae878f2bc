//! Input events delivered by the host.

use crate::model::RowId;

/// Modifier keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Control key held
    pub ctrl: bool,
    /// Shift key held
    pub shift: bool,
    /// Alt key held
    pub alt: bool,
}

impl Modifiers {
    /// No modifiers
    pub const NONE: Self = Self {
        ctrl: false,
        shift: false,
        alt: false,
    };

    /// Only shift held
    pub const SHIFT: Self = Self {
        ctrl: false,
        shift: true,
        alt: false,
    };

    /// Only ctrl held
    pub const CTRL: Self = Self {
        ctrl: true,
        shift: false,
        alt: false,
    };

    /// Check if any modifier is active
    pub fn any(&self) -> bool {
        self.ctrl || self.shift || self.alt
    }
}

/// Keys the table reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Space,
    Other,
}

impl Key {
    /// Returns `true` for keys that activate a focused header.
    pub fn activates(self) -> bool {
        matches!(self, Key::Enter | Key::Space)
    }
}

/// Mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Left,
    Middle,
    Right,
}

/// A pointer press or release over a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointerEvent {
    /// Row under the pointer.
    pub row: RowId,
    /// Data column under the pointer, if any.
    pub column: Option<String>,
    /// Button pressed or released.
    pub button: PointerButton,
    /// Modifier keys held.
    pub modifiers: Modifiers,
    /// The target is a link, button or form control inside the row.
    pub interactive: bool,
    /// The target or one of its ancestors opts out of row navigation.
    pub ignore_url: bool,
    /// The document has a non-empty text selection.
    pub text_selected: bool,
}

impl PointerEvent {
    /// A plain left-button event on a row.
    pub fn left(row: RowId) -> Self {
        Self {
            row,
            column: None,
            button: PointerButton::Left,
            modifiers: Modifiers::NONE,
            interactive: false,
            ignore_url: false,
            text_selected: false,
        }
    }

    /// Sets the button.
    pub fn button(mut self, button: PointerButton) -> Self {
        self.button = button;
        self
    }

    /// Sets the column under the pointer.
    pub fn column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    /// Sets the modifiers.
    pub fn modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Marks the target as an interactive child.
    pub fn interactive(mut self) -> Self {
        self.interactive = true;
        self
    }

    /// Marks the target as opted out of navigation.
    pub fn ignore_url(mut self) -> Self {
        self.ignore_url = true;
        self
    }

    /// Marks a text selection as active.
    pub fn text_selected(mut self) -> Self {
        self.text_selected = true;
        self
    }
}

/// Where a dragged row lands relative to the drop target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropPosition {
    Before,
    After,
}

/// Result of handling an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventResult {
    /// Event was ignored, try other handlers.
    Ignored,
    /// Event was consumed, stop propagation.
    Consumed,
}

impl EventResult {
    /// Check if the event was handled.
    pub fn is_handled(&self) -> bool {
        !matches!(self, EventResult::Ignored)
    }
}
