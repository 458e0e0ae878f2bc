//! Header activation state machine.

use super::Modifiers;
use crate::model::Direction;
use crate::model::SortEntry;
use crate::model::SortSpec;

/// What a header activation does to the sort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortAction {
    /// Replace the active specification.
    Apply(SortSpec),
    /// Clear the sort and restore insertion order.
    Reset,
}

/// Computes the effect of activating the header of `column`.
///
/// - ctrl: reset, whatever the column.
/// - shift: flip `column` in place if it is a key, else append it ascending.
/// - plain: flip `column` if it is the primary key (other keys are kept),
///   else sort by `column` ascending alone.
pub fn next_spec(current: Option<&SortSpec>, column: &str, modifiers: Modifiers) -> SortAction {
    if modifiers.ctrl {
        return SortAction::Reset;
    }

    let mut spec = current.cloned().unwrap_or_default();
    if modifiers.shift {
        if !spec.flip(column) {
            spec.push(SortEntry::new(column, Direction::Asc));
        }
        return SortAction::Apply(spec);
    }

    match spec.primary() {
        Some(primary) if primary.column == column => {
            spec.flip(column);
            SortAction::Apply(spec)
        }
        _ => SortAction::Apply(SortSpec::asc(column)),
    }
}
