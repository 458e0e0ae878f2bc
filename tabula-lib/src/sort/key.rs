//! Sort key extraction.

use std::cmp::Ordering;

use serde::Deserialize;
use serde::Serialize;

use crate::model::CellValue;
use crate::model::Row;
use crate::model::Scalar;
use crate::model::SortEntry;

/// A comparable value derived from one cell.
///
/// Keys of different kinds order as `Null < Bool < Number < Text`. Integer and
/// float keys compare numerically with each other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SortKey {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl SortKey {
    fn rank(&self) -> u8 {
        match self {
            SortKey::Null => 0,
            SortKey::Bool(_) => 1,
            SortKey::Int(_) | SortKey::Float(_) => 2,
            SortKey::Text(_) => 3,
        }
    }

    /// Total order over keys.
    pub fn compare(&self, other: &SortKey) -> Ordering {
        match (self, other) {
            (SortKey::Null, SortKey::Null) => Ordering::Equal,
            (SortKey::Bool(a), SortKey::Bool(b)) => a.cmp(b),
            (SortKey::Int(a), SortKey::Int(b)) => a.cmp(b),
            (SortKey::Float(a), SortKey::Float(b)) => a.total_cmp(b),
            (SortKey::Int(a), SortKey::Float(b)) => compare_int_float(*a, *b),
            (SortKey::Float(a), SortKey::Int(b)) => compare_int_float(*b, *a).reverse(),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

/// Compares an integer with a float without rounding either.
///
/// NaN orders the way `f64::total_cmp` places it: negative NaN below every
/// integer, positive NaN above.
fn compare_int_float(int: i64, float: f64) -> Ordering {
    // 2^63, exactly representable.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;

    if float.is_nan() {
        return if float.is_sign_negative() {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }
    if float >= LIMIT {
        return Ordering::Less;
    }
    if float < -LIMIT {
        return Ordering::Greater;
    }
    // In range, so the truncated value converts exactly.
    let whole = float.trunc();
    int.cmp(&(whole as i64)).then_with(|| whole.total_cmp(&float))
}

impl From<&Scalar> for SortKey {
    fn from(value: &Scalar) -> Self {
        match value {
            Scalar::Null => SortKey::Null,
            Scalar::Bool(v) => SortKey::Bool(*v),
            Scalar::Int(v) => SortKey::Int(*v),
            Scalar::Float(v) => SortKey::Float(*v),
            Scalar::String(v) if v.is_empty() => SortKey::Null,
            Scalar::String(v) => SortKey::Text(v.clone()),
        }
    }
}

/// The key of `row` for one sort entry.
///
/// An explicit sort value wins. Otherwise the cell is used: a plain cell as
/// is, a structured cell through its sortable value and never its display
/// text. Missing cells give [`SortKey::Null`].
pub fn extract_key(row: &Row, entry: &SortEntry) -> SortKey {
    if let Some(value) = row.sort_values.get(&entry.column) {
        return value.into();
    }
    match row.cell(&entry.column) {
        Some(CellValue::Plain(value)) => value.into(),
        Some(CellValue::Structured(cell)) => (&cell.sortable).into(),
        None => SortKey::Null,
    }
}

/// Keys of `row` for every entry, in precedence order.
pub fn extract_keys(row: &Row, entries: &[SortEntry]) -> Vec<SortKey> {
    entries.iter().map(|entry| extract_key(row, entry)).collect()
}
