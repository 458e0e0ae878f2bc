//! Event handlers: headers, row navigation, drag reorder, checkboxes and row
//! actions.

use super::RemovalRequest;
use super::Table;
use super::TableEventKind;
use crate::dom::CheckState;
use crate::error::RemoteError;
use crate::error::TableError;
use crate::interaction::DropPosition;
use crate::interaction::EventResult;
use crate::interaction::Key;
use crate::interaction::Modifiers;
use crate::interaction::Navigation;
use crate::interaction::PointerEvent;
use crate::interaction::SortAction;
use crate::interaction::key_navigation;
use crate::interaction::next_spec;
use crate::model::ColumnFlag;
use crate::model::RowId;
use crate::model::Section;
use crate::render::DELETE_ACTION;

/// Result of a row icon action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The action id is not handled by the table.
    Ignored,
    /// The user declined the confirmation.
    Cancelled,
    /// The row was removed remotely and marked removed.
    Removed,
    /// The remote call failed; the row is left intact.
    Failed(RemoteError),
}

impl Table {
    // -------------------------------------------------------------------------
    // Headers
    // -------------------------------------------------------------------------

    /// Handles a click on a column header.
    ///
    /// Ignored on tables that are not sortable and on `ignore-sort` columns.
    pub async fn on_header_activate(
        &self,
        column: &str,
        modifiers: Modifiers,
    ) -> Result<EventResult, TableError> {
        let current = {
            let inner = self.read()?;
            if !inner.store.has_column(column) {
                return Err(TableError::UnknownColumn(column.to_string()));
            }
            if !inner.sortable || inner.store.has_flag(column, ColumnFlag::IgnoreSort) {
                return Ok(EventResult::Ignored);
            }
            inner.spec.clone()
        };

        match next_spec(current.as_ref(), column, modifiers) {
            SortAction::Apply(spec) => self.apply_spec(spec).await?,
            SortAction::Reset => self.reset_sort().await?,
        };
        Ok(EventResult::Consumed)
    }

    /// Handles a key press on a focused header. Enter and Space act like a
    /// click.
    pub async fn on_header_key(
        &self,
        column: &str,
        key: Key,
        modifiers: Modifiers,
    ) -> Result<EventResult, TableError> {
        if !key.activates() {
            return Ok(EventResult::Ignored);
        }
        self.on_header_activate(column, modifiers).await
    }

    // -------------------------------------------------------------------------
    // Row navigation
    // -------------------------------------------------------------------------

    /// Records a pointer press over a row.
    pub fn on_pointer_down(&self, event: &PointerEvent) -> Result<(), TableError> {
        let mut inner = self.write()?;
        if inner.store.row(event.row).is_none() {
            return Err(TableError::UnknownRow(event.row));
        }
        inner.navigation.press(event);
        Ok(())
    }

    /// Handles a pointer release over a row and returns the navigation it
    /// triggers, if any.
    pub fn on_pointer_up(&self, event: &PointerEvent) -> Result<Option<Navigation>, TableError> {
        let mut inner = self.write()?;
        let url = inner
            .store
            .row(event.row)
            .ok_or(TableError::UnknownRow(event.row))?
            .url
            .clone();
        let ignore_column = event
            .column
            .as_deref()
            .is_some_and(|c| inner.store.has_flag(c, ColumnFlag::IgnoreUrl));

        let new_tab = inner.navigation.release(event, ignore_column);
        Ok(url.zip(new_tab).map(|(url, new_tab)| Navigation { url, new_tab }))
    }

    /// Handles a key press on a focused row. Enter navigates.
    pub fn on_row_key(
        &self,
        row: RowId,
        key: Key,
        modifiers: Modifiers,
    ) -> Result<Option<Navigation>, TableError> {
        let inner = self.read()?;
        let url = inner
            .store
            .row(row)
            .ok_or(TableError::UnknownRow(row))?
            .url
            .clone();
        Ok(url
            .zip(key_navigation(key, modifiers))
            .map(|(url, new_tab)| Navigation { url, new_tab }))
    }

    // -------------------------------------------------------------------------
    // Drag reorder
    // -------------------------------------------------------------------------

    /// Starts dragging a body row by its handle.
    ///
    /// Ignored unless drag sorting is enabled and the body has at least two
    /// rows.
    pub fn on_drag_start(&self, row: RowId) -> Result<EventResult, TableError> {
        let mut inner = self.write()?;
        let section = inner
            .store
            .row(row)
            .ok_or(TableError::UnknownRow(row))?
            .section;
        if !inner.drag_enabled() || section != Section::Body {
            return Ok(EventResult::Ignored);
        }
        if !inner.mounted {
            return Err(TableError::NotMounted);
        }
        inner.drag = Some(row);
        Ok(EventResult::Consumed)
    }

    /// Drops the dragged row before or after `target`.
    ///
    /// Returns `true` if the order changed. The active sort is kept.
    pub fn on_drop(&self, target: RowId, position: DropPosition) -> Result<bool, TableError> {
        {
            let mut inner = self.write()?;
            let Some(dragged) = inner.drag.take() else {
                return Ok(false);
            };
            if dragged == target {
                return Ok(false);
            }
            let target_row = inner.store.row(target).ok_or(TableError::UnknownRow(target))?;
            if target_row.section != Section::Body {
                return Ok(false);
            }
            let (Some(target_el), Some(element)) = (
                target_row.element,
                inner.store.row(dragged).and_then(|r| r.element),
            ) else {
                return Ok(false);
            };

            let anchor = match position {
                DropPosition::Before => Some(target_el),
                DropPosition::After => inner
                    .host
                    .body_children()
                    .into_iter()
                    .skip_while(|e| *e != target_el)
                    .skip(1)
                    .find(|e| *e != element),
            };
            inner.host.move_before(element, anchor);
        }
        self.on_drag_end()
    }

    /// Reads the body order back from the host after the user moved rows.
    ///
    /// Returns `true` and emits [`TableEventKind::DragSortChanged`] followed
    /// by [`TableEventKind::RowOrderChanged`] if the order changed.
    pub fn on_drag_end(&self) -> Result<bool, TableError> {
        let changed = {
            let mut inner = self.write()?;
            inner.drag = None;
            if !inner.mounted {
                return Err(TableError::NotMounted);
            }
            let children = inner.host.body_children();
            inner.store.reorder_body_from_elements(&children)
        };

        if changed {
            log::debug!("Rows of table {} reordered by drag", self.id);
            self.emit(TableEventKind::DragSortChanged);
            self.emit(TableEventKind::RowOrderChanged);
        }
        Ok(changed)
    }

    // -------------------------------------------------------------------------
    // Checkboxes
    // -------------------------------------------------------------------------

    /// State of the header checkbox.
    pub fn check_state(&self) -> Result<CheckState, TableError> {
        Ok(self.read()?.check_state())
    }

    /// Checked body rows in body order.
    pub fn checked_rows(&self) -> Result<Vec<RowId>, TableError> {
        Ok(self
            .read()?
            .store
            .rows(Section::Body)
            .filter(|r| r.checked && !r.removed)
            .map(|r| r.id)
            .collect())
    }

    /// Sets one row checkbox and updates the header checkbox.
    pub fn set_row_checked(&self, row: RowId, checked: bool) -> Result<EventResult, TableError> {
        {
            let mut inner = self.write()?;
            if !inner.checkbox {
                return Ok(EventResult::Ignored);
            }
            let record = inner
                .store
                .row_mut(row)
                .ok_or(TableError::UnknownRow(row))?;
            if record.section != Section::Body || record.checked == checked {
                return Ok(EventResult::Ignored);
            }
            record.checked = checked;
            let element = record.element;

            if inner.mounted {
                if let Some(element) = element {
                    inner.host.set_checked(element, checked);
                }
                let state = inner.check_state();
                inner.host.set_check_all(state);
            }
        }
        self.emit(TableEventKind::SelectionChanged);
        Ok(EventResult::Consumed)
    }

    /// Handles the header checkbox: sets every body row.
    pub fn set_all_checked(&self, checked: bool) -> Result<EventResult, TableError> {
        let changed = {
            let mut inner = self.write()?;
            if !inner.checkbox {
                return Ok(EventResult::Ignored);
            }
            let order = inner.store.order(Section::Body).to_vec();
            let mut touched = Vec::new();
            for id in order {
                if let Some(record) = inner.store.row_mut(id)
                    && !record.removed
                    && record.checked != checked
                {
                    record.checked = checked;
                    touched.push(record.element);
                }
            }
            if inner.mounted {
                for element in touched.iter().flatten() {
                    inner.host.set_checked(*element, checked);
                }
                let state = inner.check_state();
                inner.host.set_check_all(state);
            }
            !touched.is_empty()
        };

        if changed {
            self.emit(TableEventKind::SelectionChanged);
        }
        Ok(EventResult::Consumed)
    }

    // -------------------------------------------------------------------------
    // Row actions
    // -------------------------------------------------------------------------

    /// Handles a click on a row icon carrying an action id.
    ///
    /// Only the remote delete action is handled: after confirmation the row
    /// is removed remotely, then marked removed and
    /// [`TableEventKind::RowRemoved`] is emitted. A failed removal is reported
    /// through the notifier and leaves the row intact.
    pub async fn on_icon_action(
        &self,
        row: RowId,
        action_id: &str,
    ) -> Result<ActionOutcome, TableError> {
        if action_id != DELETE_ACTION {
            return Ok(ActionOutcome::Ignored);
        }
        let Some(remover) = self.services.remover.clone() else {
            log::warn!("Table {} has no remover for {}", self.id, action_id);
            return Ok(ActionOutcome::Ignored);
        };

        let request = {
            let inner = self.read()?;
            let record = inner.store.row(row).ok_or(TableError::UnknownRow(row))?;
            if record.removed {
                return Ok(ActionOutcome::Ignored);
            }
            RemovalRequest {
                table_id: self.id.to_string(),
                row,
                attributes: record.attributes.clone(),
            }
        };

        if let Some(confirm) = &self.services.confirm
            && !confirm.confirm(&self.id, row).await
        {
            return Ok(ActionOutcome::Cancelled);
        }

        if let Err(e) = remover.remove(&request).await {
            log::warn!("Failed to remove {} from table {}: {}", row, self.id, e);
            self.services.notifier.notify_error(&self.id, &e.to_string());
            return Ok(ActionOutcome::Failed(e));
        }

        {
            let mut inner = self.write()?;
            let element = match inner.store.row_mut(row) {
                Some(record) => {
                    record.removed = true;
                    record.checked = false;
                    record.element
                }
                None => None,
            };
            if inner.mounted {
                if let Some(element) = element {
                    inner.host.mark_removed(element);
                }
                if inner.checkbox {
                    let state = inner.check_state();
                    inner.host.set_check_all(state);
                }
            }
        }

        self.emit(TableEventKind::RowRemoved(row));
        Ok(ActionOutcome::Removed)
    }
}
