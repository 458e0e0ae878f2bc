//! Multi-key comparison and the stable sort shared by the worker and the
//! in-process fallback.

use std::cmp::Ordering;

use super::SortRequest;
use super::SortResponse;
use super::SortRow;
use crate::model::Direction;

/// Compares two rows key by key.
///
/// The first unequal key decides, signed by its direction. Rows equal on
/// every key compare `Equal`.
pub fn compare_rows(a: &SortRow, b: &SortRow, directions: &[Direction]) -> Ordering {
    for (i, direction) in directions.iter().enumerate() {
        let (Some(ka), Some(kb)) = (a.keys.get(i), b.keys.get(i)) else {
            break;
        };
        let ordering = ka.compare(kb);
        if ordering != Ordering::Equal {
            return match direction {
                Direction::Asc => ordering,
                Direction::Desc => ordering.reverse(),
            };
        }
    }
    Ordering::Equal
}

/// Sorts a request and returns the row order.
///
/// The sort is stable: rows equal on every key keep the order they have in
/// the request.
pub fn sort_rows(request: &SortRequest) -> SortResponse {
    let directions: Vec<Direction> = request.spec.iter().map(|e| e.direction).collect();
    let mut rows: Vec<&SortRow> = request.rows.iter().collect();
    rows.sort_by(|a, b| compare_rows(a, b, &directions));
    SortResponse {
        order: rows.into_iter().map(|r| r.row).collect(),
    }
}
