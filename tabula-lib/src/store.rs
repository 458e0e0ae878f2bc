//! Canonical in-memory rows.
//!
//! Rows live in an arena indexed by [`RowId`]; each section keeps an ordered
//! list of ids. Sorting and drag reorders only rewrite the body id list, so
//! the arena doubles as the "original insertion order" reference.

use std::collections::HashMap;
use std::collections::HashSet;

use crate::dom::ElementRef;
use crate::model::ColumnFlag;
use crate::model::ColumnFlags;
use crate::model::Row;
use crate::model::RowDefinition;
use crate::model::RowId;
use crate::model::Section;

/// Rows grouped into head, body and foot, plus column order and flags.
#[derive(Debug, Clone, Default)]
pub struct RowStore {
    columns: Vec<String>,
    flags: HashMap<String, ColumnFlags>,
    rows: Vec<Row>,
    order: [Vec<RowId>; 3],
    elements: HashMap<ElementRef, RowId>,
}

impl RowStore {
    /// Creates an empty store with the given columns.
    pub fn new(columns: Vec<String>, flags: HashMap<String, ColumnFlags>) -> Self {
        Self {
            columns,
            flags,
            ..Default::default()
        }
    }

    /// Appends a row at the end of a section.
    pub fn push(&mut self, section: Section, definition: RowDefinition) -> RowId {
        let id = RowId::new(self.rows.len());
        let initial_key = self.order[section.slot()].len();
        self.rows
            .push(Row::from_definition(id, section, initial_key, definition));
        self.order[section.slot()].push(id);
        id
    }

    /// Appends rows in bulk.
    pub fn extend(&mut self, section: Section, rows: impl IntoIterator<Item = RowDefinition>) {
        for row in rows {
            self.push(section, row);
        }
    }

    // -------------------------------------------------------------------------
    // Columns
    // -------------------------------------------------------------------------

    /// Column order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns `true` if the column is part of the column order.
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Flags for a column (empty when none were given).
    pub fn flags(&self, column: &str) -> ColumnFlags {
        self.flags.get(column).cloned().unwrap_or_default()
    }

    /// Returns `true` if the column carries the flag.
    pub fn has_flag(&self, column: &str, flag: ColumnFlag) -> bool {
        self.flags.get(column).is_some_and(|f| f.contains(flag))
    }

    /// Returns `true` if the column can be used as a sort key.
    pub fn is_sortable_column(&self, column: &str) -> bool {
        self.has_column(column) && !self.has_flag(column, ColumnFlag::IgnoreSort)
    }

    // -------------------------------------------------------------------------
    // Rows
    // -------------------------------------------------------------------------

    /// Looks up a row.
    pub fn row(&self, id: RowId) -> Option<&Row> {
        self.rows.get(id.index())
    }

    /// Looks up a row mutably.
    pub fn row_mut(&mut self, id: RowId) -> Option<&mut Row> {
        self.rows.get_mut(id.index())
    }

    /// Row ids of a section in current order.
    pub fn order(&self, section: Section) -> &[RowId] {
        &self.order[section.slot()]
    }

    /// Rows of a section in current order.
    pub fn rows(&self, section: Section) -> impl Iterator<Item = &Row> + '_ {
        self.order[section.slot()]
            .iter()
            .filter_map(|id| self.rows.get(id.index()))
    }

    /// Number of body rows.
    pub fn body_len(&self) -> usize {
        self.order[Section::Body.slot()].len()
    }

    /// Rewrites the body order.
    ///
    /// Ids that are not body rows, and repeats, are dropped. Body rows missing
    /// from `order` keep their relative order after the listed ones. Returns
    /// `true` if the order changed.
    pub fn reorder_body(&mut self, order: &[RowId]) -> bool {
        let current = &self.order[Section::Body.slot()];
        let members: HashSet<RowId> = current.iter().copied().collect();
        let mut seen = HashSet::with_capacity(current.len());

        let mut next: Vec<RowId> = order
            .iter()
            .copied()
            .filter(|id| members.contains(id) && seen.insert(*id))
            .collect();
        next.extend(current.iter().copied().filter(|id| !seen.contains(id)));

        if next == *current {
            return false;
        }
        self.order[Section::Body.slot()] = next;
        true
    }

    /// Puts the body back into insertion order.
    pub fn restore_initial_order(&mut self) -> bool {
        let mut order = self.order[Section::Body.slot()].clone();
        order.sort_by_key(|id| self.rows[id.index()].initial_key);
        self.reorder_body(&order)
    }

    // -------------------------------------------------------------------------
    // Element bindings
    // -------------------------------------------------------------------------

    /// Binds live elements to body rows, 1:1 by position.
    ///
    /// Returns the number of rows bound.
    pub fn bind_body(&mut self, elements: &[ElementRef]) -> usize {
        let order = self.order[Section::Body.slot()].clone();
        let bound = order.len().min(elements.len());
        if order.len() != elements.len() {
            log::warn!(
                "Body has {} rows but host returned {} elements",
                order.len(),
                elements.len()
            );
        }
        for (id, element) in order.iter().zip(elements) {
            self.rows[id.index()].element = Some(*element);
            self.elements.insert(*element, *id);
        }
        bound
    }

    /// Clears every element binding.
    pub fn clear_bindings(&mut self) {
        for row in &mut self.rows {
            row.element = None;
        }
        self.elements.clear();
    }

    /// The row bound to an element.
    pub fn row_for_element(&self, element: ElementRef) -> Option<RowId> {
        self.elements.get(&element).copied()
    }

    /// Elements of bound body rows, in body order.
    pub fn body_elements(&self) -> Vec<ElementRef> {
        self.rows(Section::Body).filter_map(|row| row.element).collect()
    }

    /// Rewrites the body order from a document order of elements.
    ///
    /// Unknown elements are ignored. Returns `true` if the order changed.
    pub fn reorder_body_from_elements(&mut self, elements: &[ElementRef]) -> bool {
        let order: Vec<RowId> = elements
            .iter()
            .filter_map(|e| self.row_for_element(*e))
            .collect();
        self.reorder_body(&order)
    }
}
