//! Sorting: key extraction, the stable multi-key comparator, and the worker
//! that runs it off the interaction thread.

mod compare;
mod key;
mod service;
mod worker;

pub use compare::*;
pub use key::*;
pub use service::*;
pub use worker::SortRequest;
pub use worker::SortResponse;
pub use worker::SortRow;

use crate::model::SortSpec;
use crate::store::RowStore;

/// Builds the worker request for the current body order.
///
/// Entries naming columns the store cannot sort by are left out.
pub fn build_request(store: &RowStore, spec: &SortSpec) -> SortRequest {
    let entries: Vec<_> = spec
        .entries()
        .iter()
        .filter(|e| store.is_sortable_column(&e.column))
        .cloned()
        .collect();

    let rows = store
        .rows(crate::model::Section::Body)
        .map(|row| SortRow {
            row: row.id,
            keys: extract_keys(row, &entries),
        })
        .collect();

    SortRequest {
        spec: entries,
        rows,
    }
}
