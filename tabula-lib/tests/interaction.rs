//! Header, row, drag, checkbox and row action handling.

use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use tabula_lib::dom::CheckState;
use tabula_lib::dom::ElementRef;
use tabula_lib::dom::MemoryHost;
use tabula_lib::interaction::DropPosition;
use tabula_lib::interaction::EventResult;
use tabula_lib::interaction::Key;
use tabula_lib::interaction::Modifiers;
use tabula_lib::interaction::Navigation;
use tabula_lib::interaction::PointerButton;
use tabula_lib::interaction::PointerEvent;
use tabula_lib::model::ColumnFlag;
use tabula_lib::model::Icon;
use tabula_lib::model::RowDefinition;
use tabula_lib::model::RowId;
use tabula_lib::model::Scalar;
use tabula_lib::model::SortSpec;
use tabula_lib::model::StructuredCell;
use tabula_lib::model::TableDefinition;
use tabula_lib::render::DELETE_ACTION;
use tabula_lib::{
    ActionOutcome, Confirm, EngineConfig, Notifier, RemoteError, RemovalRequest, RowRemover,
    Table, TableError, TableEvent, TableEventKind, TableServices,
};
use tokio::sync::broadcast;

fn services() -> TableServices {
    TableServices::new(EngineConfig::default().with_worker(false))
}

fn ids(raw: &[usize]) -> Vec<RowId> {
    raw.iter().copied().map(RowId::new).collect()
}

fn elements(raw: &[u64]) -> Vec<ElementRef> {
    raw.iter().copied().map(ElementRef::new).collect()
}

fn drain(rx: &mut broadcast::Receiver<TableEvent>) -> Vec<TableEventKind> {
    let mut kinds = Vec::new();
    while let Ok(event) = rx.try_recv() {
        kinds.push(event.kind);
    }
    kinds
}

fn rows(definition: TableDefinition, names: &[&str]) -> TableDefinition {
    names.iter().fold(definition, |definition, name| {
        definition.body_row(
            RowDefinition::new()
                .cell("name", *name)
                .url(format!("/people/{name}")),
        )
    })
}

async fn mounted(definition: TableDefinition, services: TableServices) -> (Table, MemoryHost) {
    let host = MemoryHost::new();
    let table = Table::new(definition, host.clone(), services).unwrap();
    table.mount().await.unwrap();
    (table, host)
}

// =============================================================================
// Headers
// =============================================================================

#[tokio::test]
async fn test_header_keys() {
    let definition = rows(TableDefinition::new("t", ["name"]), &["b", "a"]);
    let (table, _) = mounted(definition, services()).await;

    let result = table
        .on_header_key("name", Key::Other, Modifiers::NONE)
        .await
        .unwrap();
    assert_eq!(result, EventResult::Ignored);

    table
        .on_header_key("name", Key::Enter, Modifiers::NONE)
        .await
        .unwrap();
    assert_eq!(table.sort_spec().unwrap(), Some(SortSpec::asc("name")));

    table
        .on_header_key("name", Key::Space, Modifiers::NONE)
        .await
        .unwrap();
    assert_eq!(table.sort_spec().unwrap(), Some(SortSpec::desc("name")));
}

#[tokio::test]
async fn test_headers_that_do_not_sort() {
    let definition = rows(
        TableDefinition::new("t", ["name", "actions"]).flag("actions", ColumnFlag::IgnoreSort),
        &["b", "a"],
    );
    let (table, _) = mounted(definition.clone(), services()).await;

    let result = table
        .on_header_activate("actions", Modifiers::NONE)
        .await
        .unwrap();
    assert_eq!(result, EventResult::Ignored);
    assert!(matches!(
        table.on_header_activate("missing", Modifiers::NONE).await,
        Err(TableError::UnknownColumn(_))
    ));

    let (fixed, _) = mounted(definition.sortable(false), services()).await;
    let result = fixed
        .on_header_activate("name", Modifiers::NONE)
        .await
        .unwrap();
    assert_eq!(result, EventResult::Ignored);
    assert_eq!(fixed.sort_spec().unwrap(), None);
}

// =============================================================================
// Navigation
// =============================================================================

#[tokio::test]
async fn test_click_navigates() {
    let definition = rows(TableDefinition::new("t", ["name"]), &["ann", "ben"]);
    let (table, _) = mounted(definition, services()).await;

    let click = PointerEvent::left(RowId::new(1));
    table.on_pointer_down(&click).unwrap();
    assert_eq!(
        table.on_pointer_up(&click).unwrap(),
        Some(Navigation {
            url: "/people/ben".to_string(),
            new_tab: false,
        })
    );

    let middle = PointerEvent::left(RowId::new(0)).button(PointerButton::Middle);
    table.on_pointer_down(&middle).unwrap();
    let navigation = table.on_pointer_up(&middle).unwrap().unwrap();
    assert!(navigation.new_tab);

    let enter = table
        .on_row_key(RowId::new(0), Key::Enter, Modifiers::CTRL)
        .unwrap();
    assert_eq!(
        enter,
        Some(Navigation {
            url: "/people/ann".to_string(),
            new_tab: true,
        })
    );
}

#[tokio::test]
async fn test_navigation_suppressed() {
    let definition = rows(
        TableDefinition::new("t", ["name", "link"]).flag("link", ColumnFlag::IgnoreUrl),
        &["ann", "ben"],
    )
    .body_row(RowDefinition::new().cell("name", "nobody"));
    let (table, _) = mounted(definition, services()).await;
    let row = RowId::new(0);

    // released over a different row
    table.on_pointer_down(&PointerEvent::left(row)).unwrap();
    assert_eq!(
        table.on_pointer_up(&PointerEvent::left(RowId::new(1))).unwrap(),
        None
    );

    for event in [
        PointerEvent::left(row).interactive(),
        PointerEvent::left(row).text_selected(),
        PointerEvent::left(row).ignore_url(),
        PointerEvent::left(row).column("link"),
        PointerEvent::left(RowId::new(2)),
    ] {
        table.on_pointer_down(&event).unwrap();
        assert_eq!(table.on_pointer_up(&event).unwrap(), None);
    }

    assert!(matches!(
        table.on_pointer_down(&PointerEvent::left(RowId::new(99))),
        Err(TableError::UnknownRow(_))
    ));
}

// =============================================================================
// Drag reorder
// =============================================================================

#[tokio::test]
async fn test_drop_after_reorders() {
    let definition = rows(TableDefinition::new("t", ["name"]).drag_sort(true), &["a", "b", "c"]);
    let (table, host) = mounted(definition, services()).await;
    let mut rx = table.subscribe();

    assert_eq!(
        table.on_drag_start(RowId::new(0)).unwrap(),
        EventResult::Consumed
    );
    assert!(table.on_drop(RowId::new(2), DropPosition::After).unwrap());

    assert_eq!(table.body_order().unwrap(), ids(&[1, 2, 0]));
    assert_eq!(host.body(), elements(&[1, 2, 0]));
    assert_eq!(
        drain(&mut rx),
        vec![
            TableEventKind::DragSortChanged,
            TableEventKind::RowOrderChanged
        ]
    );
}

#[tokio::test]
async fn test_drop_in_place_emits_nothing() {
    let definition = rows(TableDefinition::new("t", ["name"]).drag_sort(true), &["a", "b", "c"]);
    let (table, _) = mounted(definition, services()).await;
    let mut rx = table.subscribe();

    table.on_drag_start(RowId::new(1)).unwrap();
    assert!(!table.on_drop(RowId::new(0), DropPosition::After).unwrap());
    table.on_drag_start(RowId::new(1)).unwrap();
    assert!(!table.on_drop(RowId::new(1), DropPosition::Before).unwrap());
    assert!(!table.on_drop(RowId::new(0), DropPosition::Before).unwrap());

    assert_eq!(table.body_order().unwrap(), ids(&[0, 1, 2]));
    assert!(drain(&mut rx).is_empty());
}

#[tokio::test]
async fn test_host_drag_is_read_back_and_keeps_sort() {
    let definition = rows(TableDefinition::new("t", ["name"]).drag_sort(true), &["a", "b", "c"]);
    let (table, host) = mounted(definition, services()).await;
    table.set_sort_spec(SortSpec::asc("name")).await.unwrap();

    host.drag_element(ElementRef::new(2), Some(ElementRef::new(0)));
    assert!(table.on_drag_end().unwrap());

    assert_eq!(table.body_order().unwrap(), ids(&[2, 0, 1]));
    assert_eq!(table.sort_spec().unwrap(), Some(SortSpec::asc("name")));
}

#[tokio::test]
async fn test_drag_needs_two_rows_and_the_flag() {
    let single = rows(TableDefinition::new("t", ["name"]).drag_sort(true), &["a"]);
    let (table, _) = mounted(single, services()).await;
    assert_eq!(
        table.on_drag_start(RowId::new(0)).unwrap(),
        EventResult::Ignored
    );
    assert!(!table.render().unwrap().html.contains("drag-handle"));

    let disabled = rows(TableDefinition::new("t", ["name"]), &["a", "b"]);
    let (table, _) = mounted(disabled, services()).await;
    assert_eq!(
        table.on_drag_start(RowId::new(0)).unwrap(),
        EventResult::Ignored
    );
}

// =============================================================================
// Checkboxes
// =============================================================================

#[tokio::test]
async fn test_checkbox_propagation() {
    let definition = rows(
        TableDefinition::new("t", ["name"]).checkbox_column(true),
        &["a", "b", "c"],
    );
    let (table, host) = mounted(definition, services()).await;
    let mut rx = table.subscribe();

    table.set_row_checked(RowId::new(1), true).unwrap();
    assert_eq!(table.check_state().unwrap(), CheckState::Mixed);
    assert_eq!(host.snapshot().check_all, CheckState::Mixed);
    assert_eq!(host.snapshot().checked.get(&ElementRef::new(1)), Some(&true));

    table.set_all_checked(true).unwrap();
    assert_eq!(table.check_state().unwrap(), CheckState::Checked);
    assert_eq!(table.checked_rows().unwrap(), ids(&[0, 1, 2]));

    table.set_all_checked(false).unwrap();
    assert_eq!(host.snapshot().check_all, CheckState::Unchecked);
    assert!(table.checked_rows().unwrap().is_empty());

    assert_eq!(drain(&mut rx), vec![TableEventKind::SelectionChanged; 3]);
}

#[tokio::test]
async fn test_checkbox_ignored_without_column() {
    let definition = rows(TableDefinition::new("t", ["name"]), &["a"]);
    let (table, _) = mounted(definition, services()).await;
    assert_eq!(
        table.set_row_checked(RowId::new(0), true).unwrap(),
        EventResult::Ignored
    );
}

// =============================================================================
// Remote delete
// =============================================================================

struct Answer(bool);

#[async_trait]
impl Confirm for Answer {
    async fn confirm(&self, _table_id: &str, _row: RowId) -> bool {
        self.0
    }
}

#[derive(Clone, Default)]
struct Remover {
    fail: Option<RemoteError>,
    calls: Arc<Mutex<Vec<RemovalRequest>>>,
}

#[async_trait]
impl RowRemover for Remover {
    async fn remove(&self, request: &RemovalRequest) -> Result<(), RemoteError> {
        self.calls.lock().unwrap().push(request.clone());
        match &self.fail {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }
}

#[derive(Clone, Default)]
struct Messages(Arc<Mutex<Vec<String>>>);

impl Notifier for Messages {
    fn notify_error(&self, _table_id: &str, message: &str) {
        self.0.lock().unwrap().push(message.to_string());
    }
}

fn deletable() -> TableDefinition {
    let delete = StructuredCell::icon(Icon::new("trash").action(DELETE_ACTION), Scalar::Null);
    TableDefinition::new("records", ["name", "actions"])
        .flag("actions", ColumnFlag::IgnoreSort)
        .checkbox_column(true)
        .body_row(
            RowDefinition::new()
                .cell("name", "first")
                .cell("actions", delete.clone())
                .attribute("data-id", "17"),
        )
        .body_row(
            RowDefinition::new()
                .cell("name", "second")
                .cell("actions", delete)
                .attribute("data-id", "18"),
        )
}

#[tokio::test]
async fn test_delete_confirmed() {
    let remover = Remover::default();
    let services = services().with_confirm(Answer(true)).with_remover(remover.clone());
    let (table, host) = mounted(deletable(), services).await;
    let mut rx = table.subscribe();

    let outcome = table
        .on_icon_action(RowId::new(1), DELETE_ACTION)
        .await
        .unwrap();
    assert_eq!(outcome, ActionOutcome::Removed);

    let calls = remover.calls.lock().unwrap().clone();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].table_id, "records");
    assert_eq!(calls[0].attributes.get("data-id").map(String::as_str), Some("18"));

    assert!(table.row(RowId::new(1)).unwrap().removed);
    assert!(host.snapshot().removed.contains(&ElementRef::new(1)));
    assert_eq!(drain(&mut rx), vec![TableEventKind::RowRemoved(RowId::new(1))]);

    let again = table
        .on_icon_action(RowId::new(1), DELETE_ACTION)
        .await
        .unwrap();
    assert_eq!(again, ActionOutcome::Ignored);
}

#[tokio::test]
async fn test_delete_declined() {
    let remover = Remover::default();
    let services = services().with_confirm(Answer(false)).with_remover(remover.clone());
    let (table, _) = mounted(deletable(), services).await;

    let outcome = table
        .on_icon_action(RowId::new(0), DELETE_ACTION)
        .await
        .unwrap();
    assert_eq!(outcome, ActionOutcome::Cancelled);
    assert!(remover.calls.lock().unwrap().is_empty());
    assert!(!table.row(RowId::new(0)).unwrap().removed);
}

#[tokio::test]
async fn test_delete_failure_is_notified() {
    let remover = Remover {
        fail: Some(RemoteError::rejected("record is locked")),
        ..Default::default()
    };
    let messages = Messages::default();
    let services = services()
        .with_confirm(Answer(true))
        .with_remover(remover)
        .with_notifier(messages.clone());
    let (table, host) = mounted(deletable(), services).await;

    let outcome = table
        .on_icon_action(RowId::new(0), DELETE_ACTION)
        .await
        .unwrap();
    assert_eq!(
        outcome,
        ActionOutcome::Failed(RemoteError::rejected("record is locked"))
    );
    assert_eq!(
        messages.0.lock().unwrap().as_slice(),
        ["removal rejected: record is locked"]
    );
    assert!(!table.row(RowId::new(0)).unwrap().removed);
    assert!(host.snapshot().removed.is_empty());
}

#[tokio::test]
async fn test_other_actions_are_ignored() {
    let services = services().with_remover(Remover::default());
    let (table, _) = mounted(deletable(), services).await;
    let outcome = table.on_icon_action(RowId::new(0), "archive").await.unwrap();
    assert_eq!(outcome, ActionOutcome::Ignored);
}
