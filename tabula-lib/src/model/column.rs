//! Column flags

use std::collections::BTreeSet;

use serde::Deserialize;
use serde::Serialize;

/// Per-column behaviour and presentation flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColumnFlag {
    /// Column belongs to the default column set.
    Default,
    /// Column holds icons.
    Icon,
    /// Narrow column.
    SmallWidth,
    /// Smaller text.
    SmallFont,
    /// Header never binds sort events.
    IgnoreSort,
    /// Clicks inside this column never navigate to the row url.
    IgnoreUrl,
    /// Dropped table-wide when every body cell is empty.
    RemoveIfEmpty,
}

impl ColumnFlag {
    /// CSS class carried by header and body cells of a flagged column.
    ///
    /// Behaviour-only flags have no class.
    pub fn css_class(self) -> Option<&'static str> {
        match self {
            ColumnFlag::Default => Some("col-default"),
            ColumnFlag::Icon => Some("col-icon"),
            ColumnFlag::SmallWidth => Some("col-small-width"),
            ColumnFlag::SmallFont => Some("col-small-font"),
            ColumnFlag::IgnoreSort | ColumnFlag::IgnoreUrl | ColumnFlag::RemoveIfEmpty => None,
        }
    }
}

/// The set of flags on one column.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnFlags(BTreeSet<ColumnFlag>);

impl ColumnFlags {
    /// Creates an empty flag set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a flag.
    pub fn with(mut self, flag: ColumnFlag) -> Self {
        self.0.insert(flag);
        self
    }

    /// Returns `true` if the flag is set.
    pub fn contains(&self, flag: ColumnFlag) -> bool {
        self.0.contains(&flag)
    }

    /// Iterates flags in a stable order.
    pub fn iter(&self) -> impl Iterator<Item = ColumnFlag> + '_ {
        self.0.iter().copied()
    }

    /// Space separated CSS classes for the presentation flags.
    pub fn css_classes(&self) -> String {
        self.iter()
            .filter_map(ColumnFlag::css_class)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl FromIterator<ColumnFlag> for ColumnFlags {
    fn from_iter<I: IntoIterator<Item = ColumnFlag>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
