//! Headless host keeping the document in memory.

use std::collections::HashMap;
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

use super::CheckState;
use super::ElementRef;
use super::RowHost;
use crate::model::SortSpec;
use crate::render::Markup;

/// Document state recorded by [`MemoryHost`].
#[derive(Debug, Default, Clone)]
pub struct MemoryDocument {
    /// Markup of the last mount.
    pub markup: Option<String>,
    /// Body row elements in document order.
    pub body: Vec<ElementRef>,
    /// Header busy flag.
    pub busy: bool,
    /// Every value passed to `set_busy`, in call order.
    pub busy_history: Vec<bool>,
    /// Tokens of the last sort indicator update.
    pub indicators: Vec<String>,
    /// Row checkbox states.
    pub checked: HashMap<ElementRef, bool>,
    /// Header checkbox state.
    pub check_all: CheckState,
    /// Rows marked removed.
    pub removed: HashSet<ElementRef>,
    /// Number of element moves performed.
    pub moves: usize,
    /// Number of mounts.
    pub mounts: usize,
}

/// In-memory [`RowHost`].
///
/// Clones share one document, so a caller can keep a clone to inspect what
/// the table did.
#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    document: Arc<Mutex<MemoryDocument>>,
    next_element: Arc<AtomicU64>,
}

impl MemoryHost {
    /// Creates an empty host.
    pub fn new() -> Self {
        Self::default()
    }

    fn doc(&self) -> MutexGuard<'_, MemoryDocument> {
        // A poisoned document only means a test panicked mid-call.
        self.document.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// A snapshot of the document.
    pub fn snapshot(&self) -> MemoryDocument {
        self.doc().clone()
    }

    /// Body row elements in document order.
    pub fn body(&self) -> Vec<ElementRef> {
        self.doc().body.clone()
    }

    /// Moves an element the way a pointer drag would, without the table
    /// knowing.
    pub fn drag_element(&self, element: ElementRef, anchor: Option<ElementRef>) {
        let mut doc = self.doc();
        move_in(&mut doc.body, element, anchor);
    }
}

fn move_in(body: &mut Vec<ElementRef>, element: ElementRef, anchor: Option<ElementRef>) {
    body.retain(|e| *e != element);
    let at = anchor
        .and_then(|a| body.iter().position(|e| *e == a))
        .unwrap_or(body.len());
    body.insert(at, element);
}

impl RowHost for MemoryHost {
    fn mount(&mut self, markup: &Markup) -> Vec<ElementRef> {
        let count = markup.body_rows as u64;
        let first = self.next_element.fetch_add(count, Ordering::SeqCst);
        let elements: Vec<ElementRef> = (first..first + count)
            .map(ElementRef::new)
            .collect();

        let mut doc = self.doc();
        doc.markup = Some(markup.html.clone());
        doc.body = elements.clone();
        doc.checked.clear();
        doc.removed.clear();
        doc.mounts += 1;
        elements
    }

    fn body_children(&self) -> Vec<ElementRef> {
        self.body()
    }

    fn move_before(&mut self, element: ElementRef, anchor: Option<ElementRef>) {
        let mut doc = self.doc();
        move_in(&mut doc.body, element, anchor);
        doc.moves += 1;
    }

    fn set_busy(&mut self, busy: bool) {
        let mut doc = self.doc();
        doc.busy = busy;
        doc.busy_history.push(busy);
    }

    fn set_sort_indicators(&mut self, spec: &SortSpec) {
        self.doc().indicators = spec.to_tokens();
    }

    fn set_checked(&mut self, element: ElementRef, checked: bool) {
        self.doc().checked.insert(element, checked);
    }

    fn set_check_all(&mut self, state: CheckState) {
        self.doc().check_all = state;
    }

    fn mark_removed(&mut self, element: ElementRef) {
        self.doc().removed.insert(element);
    }

    fn unmount(&mut self) {
        let mut doc = self.doc();
        doc.markup = None;
        doc.body.clear();
    }
}
