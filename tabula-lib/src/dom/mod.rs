//! The live document seen by a table.
//!
//! A [`RowHost`] is whatever shows the rendered markup: a browser bridge, a
//! terminal front end, or the headless [`MemoryHost`]. The table never
//! inspects the host's tree beyond the body row elements it gets back from
//! [`RowHost::mount`].

mod memory;
mod sync;

pub use memory::*;
pub use sync::*;

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::model::SortSpec;
use crate::render::Markup;

/// Opaque handle to a live element owned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ElementRef(u64);

impl ElementRef {
    /// Wraps a host-specific handle.
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The host-specific handle.
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "el-{}", self.0)
    }
}

/// State of the header "check all" box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckState {
    /// No body row is checked.
    #[default]
    Unchecked,
    /// Some, but not all, body rows are checked.
    Mixed,
    /// Every body row is checked.
    Checked,
}

/// Document operations a table needs from its host.
///
/// All calls happen on the interaction thread and are expected to be fast;
/// the only slow work, sorting, never goes through this trait.
pub trait RowHost: Send + Sync {
    /// Inserts the rendered markup and returns the body row elements in
    /// document order.
    fn mount(&mut self, markup: &Markup) -> Vec<ElementRef>;

    /// Body row elements in current document order.
    fn body_children(&self) -> Vec<ElementRef>;

    /// Moves a body element before `anchor`, or to the end when `anchor` is
    /// `None`. Moving never duplicates the element.
    fn move_before(&mut self, element: ElementRef, anchor: Option<ElementRef>);

    /// Shows or hides the header busy indication.
    fn set_busy(&mut self, busy: bool);

    /// Updates header direction and precedence markers.
    fn set_sort_indicators(&mut self, spec: &SortSpec);

    /// Sets a row checkbox.
    fn set_checked(&mut self, element: ElementRef, checked: bool);

    /// Sets the header "check all" box.
    fn set_check_all(&mut self, state: CheckState);

    /// Marks a row as removed.
    fn mark_removed(&mut self, element: ElementRef);

    /// Removes everything mounted by this table.
    fn unmount(&mut self);
}
