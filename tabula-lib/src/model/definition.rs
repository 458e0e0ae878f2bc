//! Table definitions supplied by the data-producing layer

use std::collections::BTreeMap;
use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;

use super::CellValue;
use super::ColumnFlag;
use super::ColumnFlags;
use super::Scalar;
use super::SortSpec;

fn default_true() -> bool {
    true
}

/// Everything needed to build a [`Table`](crate::Table).
///
/// Deserializes from the JSON payload produced by the backend:
///
/// ```json
/// {
///   "id": "orders",
///   "columns": ["number", "priority", "actions"],
///   "flags": { "actions": ["icon", "ignore-sort", "ignore-url"] },
///   "remember_sort": true,
///   "initial_sort": ["-priority"],
///   "body": [
///     { "cells": { "number": 1, "priority": { "display": "High", "sortable": 3 } },
///       "url": "/orders/1" }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableDefinition {
    /// Table identifier; also keys the persisted sort.
    pub id: String,
    /// Column order.
    pub columns: Vec<String>,
    /// Flags by column name.
    #[serde(default)]
    pub flags: HashMap<String, ColumnFlags>,
    /// Headers bind sort events.
    #[serde(default = "default_true")]
    pub sortable: bool,
    /// Persist the sort chosen by the user.
    #[serde(default)]
    pub remember_sort: bool,
    /// Leading drag-handle column for manual reorder.
    #[serde(default)]
    pub drag_sort: bool,
    /// Leading checkbox column.
    #[serde(default)]
    pub checkbox_column: bool,
    /// Sort applied when nothing was persisted, as signed tokens.
    #[serde(default)]
    pub initial_sort: Vec<String>,
    /// Rows rendered in the head section, below the header row.
    #[serde(default)]
    pub head: Vec<RowDefinition>,
    /// Sortable body rows.
    #[serde(default)]
    pub body: Vec<RowDefinition>,
    /// Rows rendered in the foot section.
    #[serde(default)]
    pub foot: Vec<RowDefinition>,
}

impl TableDefinition {
    /// Parses a definition from the backend's JSON payload.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Creates a sortable definition with the given column order.
    pub fn new<I, S>(id: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            columns: columns.into_iter().map(Into::into).collect(),
            sortable: true,
            ..Default::default()
        }
    }

    /// Adds a flag to a column.
    pub fn flag(mut self, column: impl Into<String>, flag: ColumnFlag) -> Self {
        let column = column.into();
        let flags = self.flags.remove(&column).unwrap_or_default();
        self.flags.insert(column, flags.with(flag));
        self
    }

    /// Sets the sortable flag.
    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    /// Enables sort persistence.
    pub fn remember_sort(mut self, remember: bool) -> Self {
        self.remember_sort = remember;
        self
    }

    /// Enables the drag-handle column.
    pub fn drag_sort(mut self, enabled: bool) -> Self {
        self.drag_sort = enabled;
        self
    }

    /// Enables the checkbox column.
    pub fn checkbox_column(mut self, enabled: bool) -> Self {
        self.checkbox_column = enabled;
        self
    }

    /// Sets the initial sort.
    pub fn initial_sort(mut self, spec: &SortSpec) -> Self {
        self.initial_sort = spec.to_tokens();
        self
    }

    /// Appends a head row.
    pub fn head_row(mut self, row: RowDefinition) -> Self {
        self.head.push(row);
        self
    }

    /// Appends a body row.
    pub fn body_row(mut self, row: RowDefinition) -> Self {
        self.body.push(row);
        self
    }

    /// Appends a foot row.
    pub fn foot_row(mut self, row: RowDefinition) -> Self {
        self.foot.push(row);
        self
    }
}

/// One row of a [`TableDefinition`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RowDefinition {
    /// Cell values by column name.
    #[serde(default)]
    pub cells: HashMap<String, CellValue>,
    /// Explicit sort values by column name.
    #[serde(default)]
    pub sort_values: HashMap<String, Scalar>,
    /// Attributes emitted on the row element.
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    /// Navigation target for the row.
    #[serde(default)]
    pub url: Option<String>,
}

impl RowDefinition {
    /// Creates an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a cell value.
    pub fn cell(mut self, column: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.cells.insert(column.into(), value.into());
        self
    }

    /// Sets an explicit sort value for a column.
    pub fn sort_value(mut self, column: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.sort_values.insert(column.into(), value.into());
        self
    }

    /// Sets a row attribute.
    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Sets the navigation target.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}
