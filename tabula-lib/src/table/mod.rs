//! The table aggregate.
//!
//! A [`Table`] owns its [`RowStore`] and its host, and shares a
//! [`SortService`](crate::sort::SortService) with every other table built
//! from the same [`TableServices`]. State sits behind one lock that is never
//! held across an `await`; the only suspension point of a sort is the worker
//! round trip.

mod events;
mod interact;
mod services;

pub use events::*;
pub use interact::ActionOutcome;
pub use services::*;

use std::sync::Arc;
use std::sync::RwLock;
use std::sync::RwLockReadGuard;
use std::sync::RwLockWriteGuard;

use tokio::sync::broadcast;

use crate::dom::CheckState;
use crate::dom::RowHost;
use crate::dom::sync_order;
use crate::error::TableError;
use crate::interaction::NavigationTracker;
use crate::model::Row;
use crate::model::RowId;
use crate::model::Section;
use crate::model::SortSpec;
use crate::model::TableDefinition;
use crate::render::Markup;
use crate::render::RenderOptions;
use crate::sort::build_request;
use crate::store::RowStore;

/// Internal state for a table.
struct TableInner {
    store: RowStore,
    /// Active sort, `None` when unsorted.
    spec: Option<SortSpec>,
    /// Sort used when nothing was persisted.
    initial: SortSpec,
    host: Box<dyn RowHost>,
    sortable: bool,
    remember_sort: bool,
    drag_sort: bool,
    checkbox: bool,
    mounted: bool,
    /// Sorts submitted but not yet applied.
    pending: usize,
    /// Ticket given to the next submitted sort.
    next_ticket: u64,
    /// Oldest ticket still allowed to apply. Raised past every applied sort
    /// and by resets, so a response never overwrites a newer state.
    floor: u64,
    navigation: NavigationTracker,
    drag: Option<RowId>,
}

impl TableInner {
    fn render(&self, table_id: &str, labels: &dyn crate::render::Labels) -> Markup {
        crate::render::render(
            &self.store,
            RenderOptions {
                table_id,
                sortable: self.sortable,
                drag_handle: self.drag_enabled(),
                checkbox: self.checkbox,
                spec: self.spec.as_ref(),
            },
            labels,
        )
    }

    fn drag_enabled(&self) -> bool {
        self.drag_sort && self.store.body_len() >= 2
    }

    /// Brings the host into store order. Before mount only the store counts.
    fn sync_host(&mut self, store_changed: bool) -> bool {
        if !self.mounted {
            return store_changed;
        }
        let target = self.store.body_elements();
        sync_order(self.host.as_mut(), &target)
    }

    fn show_indicators(&mut self) {
        if self.mounted {
            let spec = self.spec.clone().unwrap_or_default();
            self.host.set_sort_indicators(&spec);
        }
    }

    fn check_state(&self) -> CheckState {
        let mut total = 0;
        let mut checked = 0;
        for row in self.store.rows(Section::Body).filter(|r| !r.removed) {
            total += 1;
            if row.checked {
                checked += 1;
            }
        }
        match checked {
            0 => CheckState::Unchecked,
            n if n == total => CheckState::Checked,
            _ => CheckState::Mixed,
        }
    }
}

/// A sortable table bound to a host document.
///
/// Cloning gives another handle to the same table.
#[derive(Clone)]
pub struct Table {
    id: Arc<str>,
    inner: Arc<RwLock<TableInner>>,
    services: TableServices,
    events: broadcast::Sender<TableEvent>,
}

impl std::fmt::Debug for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Table").field("id", &self.id).finish_non_exhaustive()
    }
}

impl Table {
    /// Builds a table from a definition.
    ///
    /// Fails if the id is empty or the column order has empty or repeated
    /// names. Initial sort tokens naming unknown or `ignore-sort` columns are
    /// dropped.
    pub fn new(
        definition: TableDefinition,
        host: impl RowHost + 'static,
        services: TableServices,
    ) -> Result<Self, TableError> {
        if definition.id.trim().is_empty() {
            return Err(TableError::definition("table id is empty"));
        }
        let mut seen = std::collections::HashSet::new();
        for column in &definition.columns {
            if column.is_empty() {
                return Err(TableError::definition("empty column name"));
            }
            if !seen.insert(column.as_str()) {
                return Err(TableError::definition(format!("duplicate column {column}")));
            }
        }

        let mut store = RowStore::new(definition.columns, definition.flags);
        store.extend(Section::Head, definition.head);
        store.extend(Section::Body, definition.body);
        store.extend(Section::Foot, definition.foot);

        let mut initial = SortSpec::from_tokens(&definition.initial_sort);
        initial.retain_columns(|c| store.is_sortable_column(c));

        log::debug!(
            "Created table {} with {} body rows",
            definition.id,
            store.body_len()
        );

        let (events, _) = broadcast::channel(services.config.event_capacity);

        Ok(Self {
            id: Arc::from(definition.id.as_str()),
            inner: Arc::new(RwLock::new(TableInner {
                store,
                spec: None,
                initial,
                host: Box::new(host),
                sortable: definition.sortable,
                remember_sort: definition.remember_sort,
                drag_sort: definition.drag_sort,
                checkbox: definition.checkbox_column,
                mounted: false,
                pending: 0,
                next_ticket: 0,
                floor: 0,
                navigation: NavigationTracker::new(),
                drag: None,
            })),
            services,
            events,
        })
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, TableInner>, TableError> {
        self.inner.read().map_err(|_| TableError::Poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, TableInner>, TableError> {
        self.inner.write().map_err(|_| TableError::Poisoned)
    }

    fn emit(&self, kind: TableEventKind) {
        log::debug!("Table {} event {:?}", self.id, kind);
        // No subscribers is fine.
        let _ = self.events.send(TableEvent::new(kind, self.id.as_ref()));
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Table identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Receives the table's events from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<TableEvent> {
        self.events.subscribe()
    }

    /// The active sort, `None` when unsorted.
    pub fn sort_spec(&self) -> Result<Option<SortSpec>, TableError> {
        Ok(self.read()?.spec.clone())
    }

    /// Body row ids in current order.
    pub fn body_order(&self) -> Result<Vec<RowId>, TableError> {
        Ok(self.read()?.store.order(Section::Body).to_vec())
    }

    /// A copy of a row.
    pub fn row(&self, id: RowId) -> Result<Row, TableError> {
        self.read()?
            .store
            .row(id)
            .cloned()
            .ok_or(TableError::UnknownRow(id))
    }

    /// Returns `true` while the table is mounted in its host.
    pub fn is_mounted(&self) -> Result<bool, TableError> {
        Ok(self.read()?.mounted)
    }

    /// Number of sorts submitted and not yet applied.
    pub fn pending_sorts(&self) -> Result<usize, TableError> {
        Ok(self.read()?.pending)
    }

    /// Renders the table in its current order without touching the host.
    pub fn render(&self) -> Result<Markup, TableError> {
        Ok(self.read()?.render(&self.id, self.services.labels.as_ref()))
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Renders the table into its host, binds the body elements and applies
    /// the persisted sort, or the initial sort when none is stored.
    pub async fn mount(&self) -> Result<bool, TableError> {
        let restored = self.load_persisted().await;

        {
            let mut inner = self.write()?;
            let spec = restored.or_else(|| {
                (!inner.initial.is_empty()).then(|| inner.initial.clone())
            });
            inner.spec = spec;

            let markup = inner.render(&self.id, self.services.labels.as_ref());
            inner.store.clear_bindings();
            let elements = inner.host.mount(&markup);
            let bound = inner.store.bind_body(&elements);
            inner.mounted = true;
            inner.show_indicators();
            if inner.checkbox {
                let state = inner.check_state();
                inner.host.set_check_all(state);
            }
            log::debug!("Mounted table {} ({} rows bound)", self.id, bound);
        }

        self.sort().await
    }

    /// Removes the table from its host and drops the element bindings.
    pub fn unmount(&self) -> Result<(), TableError> {
        let mut inner = self.write()?;
        if !inner.mounted {
            return Ok(());
        }
        inner.host.unmount();
        inner.store.clear_bindings();
        inner.mounted = false;
        inner.navigation.clear();
        inner.drag = None;
        log::debug!("Unmounted table {}", self.id);
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Sorting
    // -------------------------------------------------------------------------

    /// Sorts the body by the active specification and brings the host into
    /// the new order.
    ///
    /// Resolves immediately when unsorted. When calls overlap, the order of
    /// the last submitted sort wins; an older response arriving late is
    /// dropped. Returns `true` (and emits
    /// [`TableEventKind::RowOrderChanged`] once) if the visible order changed.
    pub async fn sort(&self) -> Result<bool, TableError> {
        let (pending, ticket) = {
            let mut inner = self.write()?;
            let Some(spec) = inner.spec.clone().filter(|s| !s.is_empty()) else {
                return Ok(false);
            };
            let request = build_request(&inner.store, &spec);
            log::debug!(
                "Sorting table {} by {} ({} rows)",
                self.id,
                spec,
                request.rows.len()
            );
            inner.pending += 1;
            if inner.mounted {
                inner.host.set_busy(true);
            }
            let ticket = inner.next_ticket;
            inner.next_ticket += 1;
            (self.services.sort.submit(request), ticket)
        };

        let response = pending.await;

        let changed = {
            let mut inner = self.write()?;
            inner.pending = inner.pending.saturating_sub(1);
            if inner.pending == 0 && inner.mounted {
                inner.host.set_busy(false);
            }
            if ticket < inner.floor {
                log::debug!("Dropping superseded sort of table {}", self.id);
                return Ok(false);
            }
            inner.floor = ticket + 1;
            let moved = inner.store.reorder_body(&response.order);
            inner.sync_host(moved)
        };

        if changed {
            self.emit(TableEventKind::RowOrderChanged);
        }
        Ok(changed)
    }

    /// Replaces the active specification and sorts.
    ///
    /// Keys naming unknown or `ignore-sort` columns are dropped; an empty
    /// result resets the table instead.
    pub async fn set_sort_spec(&self, mut spec: SortSpec) -> Result<bool, TableError> {
        {
            let inner = self.read()?;
            spec.retain_columns(|c| inner.store.is_sortable_column(c));
        }
        if spec.is_empty() {
            return self.reset_sort().await;
        }
        self.apply_spec(spec).await
    }

    pub(crate) async fn apply_spec(&self, spec: SortSpec) -> Result<bool, TableError> {
        let remember = {
            let mut inner = self.write()?;
            inner.spec = Some(spec.clone());
            inner.show_indicators();
            inner.remember_sort
        };

        if remember
            && let Some(persistence) = &self.services.persistence
            && let Err(e) = persistence.save(&self.id, &spec).await
        {
            log::warn!("Failed to persist sort for table {}: {}", self.id, e);
        }

        self.emit(TableEventKind::ColumnSortChanged);
        self.sort().await
    }

    /// Clears the sort, forgets the persisted one and restores insertion
    /// order.
    ///
    /// Sorts still pending when this is called are discarded on arrival.
    pub async fn reset_sort(&self) -> Result<bool, TableError> {
        let (changed, remember) = {
            let mut inner = self.write()?;
            inner.spec = None;
            inner.floor = inner.next_ticket;
            inner.show_indicators();
            let moved = inner.store.restore_initial_order();
            (inner.sync_host(moved), inner.remember_sort)
        };

        if remember
            && let Some(persistence) = &self.services.persistence
            && let Err(e) = persistence.clear(&self.id).await
        {
            log::warn!("Failed to clear persisted sort for table {}: {}", self.id, e);
        }

        self.emit(TableEventKind::ColumnSortChanged);
        if changed {
            self.emit(TableEventKind::RowOrderChanged);
        }
        Ok(changed)
    }

    async fn load_persisted(&self) -> Option<SortSpec> {
        let remember = self.read().map(|inner| inner.remember_sort).unwrap_or(false);
        if !remember {
            return None;
        }
        let persistence = self.services.persistence.as_ref()?;

        let mut spec = match persistence.load(&self.id).await {
            Ok(spec) => spec?,
            Err(e) => {
                log::warn!("Failed to load persisted sort for table {}: {}", self.id, e);
                return None;
            }
        };

        let inner = self.read().ok()?;
        let stored = spec.len();
        spec.retain_columns(|c| inner.store.is_sortable_column(c));
        if spec.len() < stored {
            log::debug!(
                "Skipped {} stale sort keys for table {}",
                stored - spec.len(),
                self.id
            );
        }
        if spec.is_empty() {
            return None;
        }
        log::info!("Restored sort {} for table {}", spec, self.id);
        Some(spec)
    }
}
