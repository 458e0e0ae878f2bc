//! Rows and sections

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use super::CellValue;
use super::RowDefinition;
use super::Scalar;
use crate::dom::ElementRef;

/// Stable identifier of a row inside one table's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RowId(usize);

impl RowId {
    /// Creates an id from an arena index.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// The arena index.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row-{}", self.0)
    }
}

/// The three row groups of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Head,
    Body,
    Foot,
}

impl Section {
    /// All sections in document order.
    pub const ALL: [Section; 3] = [Section::Head, Section::Body, Section::Foot];

    pub(crate) fn slot(self) -> usize {
        match self {
            Section::Head => 0,
            Section::Body => 1,
            Section::Foot => 2,
        }
    }

    /// Markup element wrapping this section.
    pub fn tag(self) -> &'static str {
        match self {
            Section::Head => "thead",
            Section::Body => "tbody",
            Section::Foot => "tfoot",
        }
    }
}

/// A row record owned by the row store.
///
/// Reorders never touch cell content; only the section order and the bound
/// element change over a row's life.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Arena id.
    pub id: RowId,
    /// Section this row belongs to.
    pub section: Section,
    /// Cell values by column name.
    pub cells: HashMap<String, CellValue>,
    /// Explicit sort values by column name, preferred over cell values.
    pub sort_values: HashMap<String, Scalar>,
    /// Extra attributes emitted on the row element.
    pub attributes: BTreeMap<String, String>,
    /// Navigation target.
    pub url: Option<String>,
    /// Position in the section at insertion time.
    pub initial_key: usize,
    /// Live element, bound after mount and cleared on teardown.
    pub element: Option<ElementRef>,
    /// Checkbox state.
    pub checked: bool,
    /// Set once the row was deleted remotely.
    pub removed: bool,
}

impl Row {
    pub(crate) fn from_definition(
        id: RowId,
        section: Section,
        initial_key: usize,
        definition: RowDefinition,
    ) -> Self {
        Self {
            id,
            section,
            cells: definition.cells,
            sort_values: definition.sort_values,
            attributes: definition.attributes,
            url: definition.url,
            initial_key,
            element: None,
            checked: false,
            removed: false,
        }
    }

    /// The cell for a column, if present.
    pub fn cell(&self, column: &str) -> Option<&CellValue> {
        self.cells.get(column)
    }

    /// Returns `true` if the cell is missing or renders nothing.
    pub fn cell_is_empty(&self, column: &str) -> bool {
        self.cell(column).is_none_or(CellValue::is_empty)
    }
}
