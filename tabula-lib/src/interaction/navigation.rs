//! Row navigation.
//!
//! A row with a url navigates on Enter, or on a left/middle release over the
//! row that was pressed. Requiring the press and release to match keeps drag
//! selections from navigating.

use super::Key;
use super::Modifiers;
use super::PointerButton;
use super::PointerEvent;
use crate::model::RowId;

/// Navigation requested by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    /// Target url.
    pub url: String,
    /// Open in a new tab instead of the current one.
    pub new_tab: bool,
}

/// Remembers the last pointer press.
#[derive(Debug, Clone, Default)]
pub struct NavigationTracker {
    pressed: Option<(RowId, PointerButton)>,
}

impl NavigationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a press.
    pub fn press(&mut self, event: &PointerEvent) {
        self.pressed = Some((event.row, event.button));
    }

    /// Consumes the recorded press and decides whether `event` navigates.
    ///
    /// `ignore_column` tells whether the column under the pointer opts out of
    /// navigation.
    pub fn release(&mut self, event: &PointerEvent, ignore_column: bool) -> Option<bool> {
        let pressed = self.pressed.take()?;
        if pressed != (event.row, event.button) {
            return None;
        }
        if event.button == PointerButton::Right
            || event.interactive
            || event.ignore_url
            || event.text_selected
            || ignore_column
        {
            return None;
        }
        Some(event.modifiers.ctrl || event.button == PointerButton::Middle)
    }

    /// Forgets any recorded press.
    pub fn clear(&mut self) {
        self.pressed = None;
    }
}

/// New-tab flag for a key press on a focused row, or `None` if the key does
/// not navigate.
pub fn key_navigation(key: Key, modifiers: Modifiers) -> Option<bool> {
    (key == Key::Enter).then_some(modifiers.ctrl)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> RowId {
        RowId::new(3)
    }

    #[test]
    fn test_matching_press_and_release() {
        let mut tracker = NavigationTracker::new();
        let event = PointerEvent::left(row());
        tracker.press(&event);
        assert_eq!(tracker.release(&event, false), Some(false));
        assert_eq!(tracker.release(&event, false), None);
    }

    #[test]
    fn test_middle_and_ctrl_open_new_tab() {
        let mut tracker = NavigationTracker::new();
        let middle = PointerEvent::left(row()).button(PointerButton::Middle);
        tracker.press(&middle);
        assert_eq!(tracker.release(&middle, false), Some(true));

        let ctrl = PointerEvent::left(row()).modifiers(Modifiers::CTRL);
        tracker.press(&ctrl);
        assert_eq!(tracker.release(&ctrl, false), Some(true));
    }

    #[test]
    fn test_release_elsewhere_is_ignored() {
        let mut tracker = NavigationTracker::new();
        tracker.press(&PointerEvent::left(row()));
        assert_eq!(
            tracker.release(&PointerEvent::left(RowId::new(4)), false),
            None
        );
    }

    #[test]
    fn test_suppressed_targets() {
        let mut tracker = NavigationTracker::new();
        for event in [
            PointerEvent::left(row()).interactive(),
            PointerEvent::left(row()).ignore_url(),
            PointerEvent::left(row()).text_selected(),
            PointerEvent::left(row()).button(PointerButton::Right),
        ] {
            tracker.press(&event);
            assert_eq!(tracker.release(&event, false), None);
        }

        let event = PointerEvent::left(row());
        tracker.press(&event);
        assert_eq!(tracker.release(&event, true), None);
    }

    #[test]
    fn test_key_navigation() {
        assert_eq!(key_navigation(Key::Enter, Modifiers::NONE), Some(false));
        assert_eq!(key_navigation(Key::Enter, Modifiers::CTRL), Some(true));
        assert_eq!(key_navigation(Key::Space, Modifiers::NONE), None);
    }
}
