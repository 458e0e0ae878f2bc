//! Table event types.

use crate::model::RowId;

// =============================================================================
// Table Event Types
// =============================================================================

/// What happened to a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableEventKind {
    /// The active sort specification changed (including a reset)
    ColumnSortChanged,
    /// The user reordered rows by dragging
    DragSortChanged,
    /// The visible body order changed, from a sort, a reset or a drag
    RowOrderChanged,
    /// A row was deleted remotely and marked removed
    RowRemoved(RowId),
    /// Checkbox selection changed
    SelectionChanged,
}

/// An event broadcast to subscribers of [`Table::subscribe`](crate::Table::subscribe).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableEvent {
    /// Which kind of event
    pub kind: TableEventKind,
    /// Table that raised the event
    pub table_id: String,
}

impl TableEvent {
    /// Create a new table event.
    pub fn new(kind: TableEventKind, table_id: impl Into<String>) -> Self {
        Self {
            kind,
            table_id: table_id.into(),
        }
    }
}
