//! Sort specification

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// Sort direction for one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Ascending order (A-Z, 0-9).
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl Direction {
    /// The opposite direction.
    pub fn flipped(self) -> Self {
        match self {
            Direction::Asc => Direction::Desc,
            Direction::Desc => Direction::Asc,
        }
    }

    /// Token prefix used when persisting (`+` or `-`).
    pub fn sign(self) -> char {
        match self {
            Direction::Asc => '+',
            Direction::Desc => '-',
        }
    }
}

/// One key of a [`SortSpec`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortEntry {
    /// Column name.
    pub column: String,
    /// Direction for this column.
    pub direction: Direction,
}

impl SortEntry {
    /// Creates an entry.
    pub fn new(column: impl Into<String>, direction: Direction) -> Self {
        Self {
            column: column.into(),
            direction,
        }
    }

    /// Parses a signed token such as `"+name"` or `"-age"`.
    ///
    /// A token without a sign sorts ascending. Empty names are rejected.
    pub fn parse(token: &str) -> Option<Self> {
        let token = token.trim();
        let (direction, column) = match token.chars().next()? {
            '+' => (Direction::Asc, &token[1..]),
            '-' => (Direction::Desc, &token[1..]),
            _ => (Direction::Asc, token),
        };
        if column.is_empty() {
            return None;
        }
        Some(Self::new(column, direction))
    }

    /// Formats this entry as a signed token.
    pub fn token(&self) -> String {
        format!("{}{}", self.direction.sign(), self.column)
    }
}

/// Ordered multi-key sort specification.
///
/// Entry order encodes key precedence. A column appears at most once; adding a
/// column that is already present is ignored.
///
/// # Example
///
/// ```
/// use tabula_lib::model::{Direction, SortSpec};
///
/// let spec = SortSpec::asc("name").then_desc("age");
/// assert_eq!(spec.to_tokens(), vec!["+name", "-age"]);
/// assert_eq!(spec.primary().map(|e| e.direction), Some(Direction::Asc));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortSpec {
    entries: Vec<SortEntry>,
}

impl SortSpec {
    /// Creates an empty specification.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an ascending specification on one column.
    pub fn asc(column: impl Into<String>) -> Self {
        Self::new().then(column, Direction::Asc)
    }

    /// Creates a descending specification on one column.
    pub fn desc(column: impl Into<String>) -> Self {
        Self::new().then(column, Direction::Desc)
    }

    /// Adds a secondary ascending key.
    pub fn then_asc(self, column: impl Into<String>) -> Self {
        self.then(column, Direction::Asc)
    }

    /// Adds a secondary descending key.
    pub fn then_desc(self, column: impl Into<String>) -> Self {
        self.then(column, Direction::Desc)
    }

    /// Adds a key with an explicit direction.
    pub fn then(mut self, column: impl Into<String>, direction: Direction) -> Self {
        self.push(SortEntry::new(column, direction));
        self
    }

    /// Appends an entry unless its column is already present.
    ///
    /// Returns `true` if the entry was added.
    pub fn push(&mut self, entry: SortEntry) -> bool {
        if self.contains(&entry.column) {
            return false;
        }
        self.entries.push(entry);
        true
    }

    /// Flips the direction of a column in place.
    ///
    /// Returns `false` if the column is not part of the specification.
    pub fn flip(&mut self, column: &str) -> bool {
        match self.entries.iter_mut().find(|e| e.column == column) {
            Some(entry) => {
                entry.direction = entry.direction.flipped();
                true
            }
            None => false,
        }
    }

    /// Returns `true` if the column is a key.
    pub fn contains(&self, column: &str) -> bool {
        self.entries.iter().any(|e| e.column == column)
    }

    /// Direction and precedence (0-based) of a column, if it is a key.
    pub fn position(&self, column: &str) -> Option<(usize, Direction)> {
        self.entries
            .iter()
            .position(|e| e.column == column)
            .map(|i| (i, self.entries[i].direction))
    }

    /// The highest precedence key.
    pub fn primary(&self) -> Option<&SortEntry> {
        self.entries.first()
    }

    /// Keys in precedence order.
    pub fn entries(&self) -> &[SortEntry] {
        &self.entries
    }

    /// Returns `true` if there are no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Drops keys whose column fails the predicate, keeping order.
    pub fn retain_columns(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.entries.retain(|e| keep(&e.column));
    }

    /// Builds a specification from signed tokens.
    ///
    /// Malformed tokens and repeated columns are skipped.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut spec = Self::new();
        for token in tokens {
            match SortEntry::parse(token.as_ref()) {
                Some(entry) => {
                    spec.push(entry);
                }
                None => log::debug!("Skipping malformed sort token {:?}", token.as_ref()),
            }
        }
        spec
    }

    /// Signed tokens in precedence order.
    pub fn to_tokens(&self) -> Vec<String> {
        self.entries.iter().map(SortEntry::token).collect()
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.to_tokens().join(", "))
    }
}

impl FromIterator<SortEntry> for SortSpec {
    fn from_iter<I: IntoIterator<Item = SortEntry>>(iter: I) -> Self {
        let mut spec = Self::new();
        for entry in iter {
            spec.push(entry);
        }
        spec
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tokens() {
        assert_eq!(SortEntry::parse("+name"), Some(SortEntry::new("name", Direction::Asc)));
        assert_eq!(SortEntry::parse("-age"), Some(SortEntry::new("age", Direction::Desc)));
        assert_eq!(SortEntry::parse("city"), Some(SortEntry::new("city", Direction::Asc)));
        assert_eq!(SortEntry::parse("-"), None);
        assert_eq!(SortEntry::parse(""), None);
    }

    #[test]
    fn test_tokens_keep_order() {
        let spec = SortSpec::from_tokens(["-b", "+a", "+c"]);
        assert_eq!(spec.to_tokens(), vec!["-b", "+a", "+c"]);
        assert_eq!(SortSpec::from_tokens(spec.to_tokens()), spec);
    }

    #[test]
    fn test_column_at_most_once() {
        let spec = SortSpec::from_tokens(["+a", "-a", "+b"]);
        assert_eq!(spec.to_tokens(), vec!["+a", "+b"]);

        let mut spec = SortSpec::asc("a");
        assert!(!spec.push(SortEntry::new("a", Direction::Desc)));
        assert_eq!(spec.len(), 1);
    }

    #[test]
    fn test_flip_in_place() {
        let mut spec = SortSpec::asc("a").then_asc("b");
        assert!(spec.flip("a"));
        assert_eq!(spec.to_tokens(), vec!["-a", "+b"]);
        assert!(!spec.flip("z"));
        assert_eq!(spec.position("b"), Some((1, Direction::Asc)));
    }

    #[test]
    fn test_display() {
        assert_eq!(SortSpec::asc("a").then_desc("b").to_string(), "[+a, -b]");
    }
}
