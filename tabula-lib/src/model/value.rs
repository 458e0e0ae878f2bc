//! Cell values

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// A plain value held by a cell or used as an explicit sort override.
///
/// # Example
///
/// ```
/// use tabula_lib::model::Scalar;
///
/// let name = Scalar::from("Contoso");
/// let amount = Scalar::from(42i64);
/// let empty = Scalar::Null;
/// assert!(empty.is_empty());
/// assert_eq!(amount.to_string(), "42");
/// # let _ = name;
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    /// Null/empty value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating point value.
    Float(f64),
    /// String value.
    String(String),
}

impl Scalar {
    /// Returns `true` for `Null` and for the empty string.
    pub fn is_empty(&self) -> bool {
        match self {
            Scalar::Null => true,
            Scalar::String(s) => s.is_empty(),
            _ => false,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => Ok(()),
            Scalar::Bool(v) => write!(f, "{v}"),
            Scalar::Int(v) => write!(f, "{v}"),
            Scalar::Float(v) => write!(f, "{v}"),
            Scalar::String(v) => f.write_str(v),
        }
    }
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Scalar::Bool(v)
    }
}

impl From<i32> for Scalar {
    fn from(v: i32) -> Self {
        Scalar::Int(v.into())
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Scalar::Int(v)
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Scalar::Float(v)
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Scalar::String(v)
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Scalar::String(v.to_string())
    }
}

impl<T: Into<Scalar>> From<Option<T>> for Scalar {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Scalar::Null,
        }
    }
}

/// Icon shown in a structured cell, optionally acting as a link or action.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Icon {
    /// Icon name, rendered as an `icon-{name}` class.
    pub name: String,
    /// CSS color for the icon.
    #[serde(default)]
    pub color: Option<String>,
    /// Tooltip text.
    #[serde(default)]
    pub tooltip: Option<String>,
    /// Link target; when set the icon renders as an anchor.
    #[serde(default)]
    pub link: Option<String>,
    /// Open the link in a new browsing context.
    #[serde(default)]
    pub link_blank: bool,
    /// Action id dispatched when the icon is activated.
    #[serde(default)]
    pub action: Option<String>,
}

impl Icon {
    /// Creates an icon with only a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Sets the icon color.
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Sets the tooltip.
    pub fn tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    /// Makes the icon a link.
    pub fn link(mut self, url: impl Into<String>, blank: bool) -> Self {
        self.link = Some(url.into());
        self.link_blank = blank;
        self
    }

    /// Attaches an action id.
    pub fn action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }
}

/// A cell whose displayed text and sort value are independent.
///
/// `display` may hold formatted text or markup; sorting always uses
/// `sortable`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StructuredCell {
    /// Text shown in the cell.
    #[serde(default)]
    pub display: Option<String>,
    /// Value the column sorts by.
    pub sortable: Scalar,
    /// Icon replacing the display text.
    #[serde(default)]
    pub icon: Option<Icon>,
}

impl StructuredCell {
    /// Creates a structured cell from display text and a sort value.
    pub fn new(display: impl Into<String>, sortable: impl Into<Scalar>) -> Self {
        Self {
            display: Some(display.into()),
            sortable: sortable.into(),
            icon: None,
        }
    }

    /// Creates an icon cell with a sort value.
    pub fn icon(icon: Icon, sortable: impl Into<Scalar>) -> Self {
        Self {
            display: None,
            sortable: sortable.into(),
            icon: Some(icon),
        }
    }
}

/// The content of one cell.
///
/// Structured objects are tried first when deserializing, so any JSON object
/// carrying a `sortable` field becomes [`CellValue::Structured`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Display and sort value differ.
    Structured(StructuredCell),
    /// The value is displayed and sorted as is.
    Plain(Scalar),
}

impl CellValue {
    /// Returns `true` if nothing would be rendered for this cell.
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Plain(scalar) => scalar.is_empty(),
            CellValue::Structured(cell) => {
                cell.icon.is_none() && cell.display.as_deref().is_none_or(str::is_empty)
            }
        }
    }

    /// The value used when this cell is a sort key.
    pub fn sort_value(&self) -> &Scalar {
        match self {
            CellValue::Plain(scalar) => scalar,
            CellValue::Structured(cell) => &cell.sortable,
        }
    }
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Plain(Scalar::Null)
    }
}

impl From<StructuredCell> for CellValue {
    fn from(v: StructuredCell) -> Self {
        CellValue::Structured(v)
    }
}

impl From<Scalar> for CellValue {
    fn from(v: Scalar) -> Self {
        CellValue::Plain(v)
    }
}

impl From<&str> for CellValue {
    fn from(v: &str) -> Self {
        CellValue::Plain(v.into())
    }
}

impl From<String> for CellValue {
    fn from(v: String) -> Self {
        CellValue::Plain(v.into())
    }
}

impl From<i32> for CellValue {
    fn from(v: i32) -> Self {
        CellValue::Plain(v.into())
    }
}

impl From<i64> for CellValue {
    fn from(v: i64) -> Self {
        CellValue::Plain(v.into())
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Plain(v.into())
    }
}

impl From<bool> for CellValue {
    fn from(v: bool) -> Self {
        CellValue::Plain(v.into())
    }
}
