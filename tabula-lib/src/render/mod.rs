//! Bulk markup generation.
//!
//! The whole table is produced as one string in a single pass; the host
//! inserts it at once and hands back the body row elements. Building markup
//! this way stays fast for tables with thousands of rows, where creating
//! elements one by one does not.

mod markup;

pub use markup::*;

use crate::model::CellValue;
use crate::model::ColumnFlag;
use crate::model::Direction;
use crate::model::Icon;
use crate::model::Row;
use crate::model::Section;
use crate::model::SortSpec;
use crate::model::StructuredCell;
use crate::store::RowStore;

/// Action id of the remote delete-row icon.
pub const DELETE_ACTION: &str = "delete-storable";

/// Header label lookup.
pub trait Labels: Send + Sync {
    /// Label shown in the header of `column`.
    fn column_label(&self, table_id: &str, column: &str) -> String;
}

/// Uses column names as labels.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColumnNames;

impl Labels for ColumnNames {
    fn column_label(&self, _table_id: &str, column: &str) -> String {
        column.to_string()
    }
}

/// Output of [`render`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Markup {
    /// The complete table markup.
    pub html: String,
    /// Number of body rows, in document order, the host must return.
    pub body_rows: usize,
    /// Data columns actually rendered, after empty columns were dropped.
    pub columns: Vec<String>,
}

/// What to draw besides the data columns.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions<'a> {
    /// Table id, emitted on the table element.
    pub table_id: &'a str,
    /// Headers are sort controls.
    pub sortable: bool,
    /// Leading drag-handle column.
    pub drag_handle: bool,
    /// Leading checkbox column.
    pub checkbox: bool,
    /// Active sort, drawn as header indicators.
    pub spec: Option<&'a SortSpec>,
}

/// Columns left after dropping `remove-if-empty` columns whose body cells are
/// all empty.
pub fn visible_columns(store: &RowStore) -> Vec<String> {
    store
        .columns()
        .iter()
        .filter(|column| {
            !store.has_flag(column, ColumnFlag::RemoveIfEmpty)
                || store
                    .rows(Section::Body)
                    .any(|row| !row.cell_is_empty(column))
        })
        .cloned()
        .collect()
}

/// Renders the whole table.
pub fn render(store: &RowStore, options: RenderOptions<'_>, labels: &dyn Labels) -> Markup {
    let columns = visible_columns(store);
    let mut html = String::with_capacity(256 + store.body_len() * columns.len() * 32);

    html.push_str("<table");
    push_classes(&mut html, ["tabula", if options.sortable { "sortable" } else { "" }]);
    push_attr(&mut html, "data-table", options.table_id);
    html.push('>');

    html.push_str("<thead>");
    render_header(&mut html, store, &columns, &options, labels);
    for row in store.rows(Section::Head) {
        render_row(&mut html, store, row, &columns, &options);
    }
    html.push_str("</thead>");

    for section in [Section::Body, Section::Foot] {
        html.push('<');
        html.push_str(section.tag());
        html.push('>');
        for row in store.rows(section) {
            render_row(&mut html, store, row, &columns, &options);
        }
        html.push_str("</");
        html.push_str(section.tag());
        html.push('>');
    }

    html.push_str("</table>");

    Markup {
        html,
        body_rows: store.body_len(),
        columns,
    }
}

fn render_header(
    html: &mut String,
    store: &RowStore,
    columns: &[String],
    options: &RenderOptions<'_>,
    labels: &dyn Labels,
) {
    html.push_str("<tr class=\"header\">");
    if options.drag_handle {
        html.push_str("<th class=\"drag-handle\"></th>");
    }
    if options.checkbox {
        html.push_str("<th class=\"select\"><input type=\"checkbox\" class=\"check-all\"></th>");
    }

    for column in columns {
        let flags = store.flags(column);
        let sortable = options.sortable && !flags.contains(ColumnFlag::IgnoreSort);
        let position = options.spec.and_then(|spec| spec.position(column));

        html.push_str("<th");
        let flag_classes = flags.css_classes();
        let direction_class = match position {
            Some((_, Direction::Asc)) => "sort-asc",
            Some((_, Direction::Desc)) => "sort-desc",
            None => "",
        };
        push_classes(
            html,
            [
                flag_classes.as_str(),
                if sortable { "sortable" } else { "" },
                direction_class,
            ],
        );
        push_attr(html, "data-column", column);
        if sortable {
            push_attr(html, "tabindex", "0");
        }
        if let Some((index, direction)) = position {
            let aria = match direction {
                Direction::Asc => "ascending",
                Direction::Desc => "descending",
            };
            push_attr(html, "aria-sort", aria);
            push_attr(html, "data-sort-position", &(index + 1).to_string());
        }
        html.push('>');
        html.push_str(&escape_html(&labels.column_label(options.table_id, column)));
        html.push_str("</th>");
    }
    html.push_str("</tr>");
}

fn render_row(
    html: &mut String,
    store: &RowStore,
    row: &Row,
    columns: &[String],
    options: &RenderOptions<'_>,
) {
    let is_body = row.section == Section::Body;

    html.push_str("<tr");
    push_classes(
        html,
        [
            row.attributes.get("class").map(String::as_str).unwrap_or(""),
            if row.removed { "removed" } else { "" },
            if row.url.is_some() { "link" } else { "" },
        ],
    );
    push_attr(html, "data-row", &row.id.index().to_string());
    if let Some(url) = &row.url {
        push_attr(html, "data-url", url);
        push_attr(html, "tabindex", "0");
    }
    for (name, value) in &row.attributes {
        if name != "class" {
            push_attr(html, name, value);
        }
    }
    html.push('>');

    if options.drag_handle {
        if is_body {
            html.push_str("<td class=\"drag-handle\" draggable=\"true\"></td>");
        } else {
            html.push_str("<td class=\"drag-handle\"></td>");
        }
    }
    if options.checkbox {
        if is_body {
            html.push_str("<td class=\"select\"><input type=\"checkbox\"");
            push_attr(html, "value", &row.id.index().to_string());
            if row.checked {
                html.push_str(" checked");
            }
            html.push_str("></td>");
        } else {
            html.push_str("<td class=\"select\"></td>");
        }
    }

    for column in columns {
        html.push_str("<td");
        push_classes(html, [store.flags(column).css_classes().as_str()]);
        push_attr(html, "data-column", column);
        html.push('>');
        if let Some(cell) = row.cell(column) {
            render_cell(html, cell);
        }
        html.push_str("</td>");
    }

    html.push_str("</tr>");
}

/// Cell content. Structured display text is trusted markup from the data
/// layer and is emitted as is; plain values are escaped.
fn render_cell(html: &mut String, cell: &CellValue) {
    match cell {
        CellValue::Plain(value) => html.push_str(&escape_html(&value.to_string())),
        CellValue::Structured(StructuredCell {
            icon: Some(icon), ..
        }) => render_icon(html, icon),
        CellValue::Structured(StructuredCell {
            display: Some(display),
            ..
        }) => html.push_str(display),
        // The sortable value is never shown.
        CellValue::Structured(_) => {}
    }
}

fn render_icon(html: &mut String, icon: &Icon) {
    let class = format!("icon icon-{}", icon.name);
    let tag = if icon.link.is_some() { "a" } else { "button" };

    html.push('<');
    html.push_str(tag);
    push_attr(html, "class", &class);
    match &icon.link {
        Some(url) => {
            push_attr(html, "href", url);
            if icon.link_blank {
                push_attr(html, "target", "_blank");
                push_attr(html, "rel", "noopener");
            }
        }
        None => push_attr(html, "type", "button"),
    }
    if let Some(color) = &icon.color {
        push_attr(html, "style", &format!("color: {color}"));
    }
    if let Some(tooltip) = &icon.tooltip {
        push_attr(html, "title", tooltip);
    }
    if let Some(action) = &icon.action {
        push_attr(html, "data-action", action);
    }
    html.push_str("></");
    html.push_str(tag);
    html.push('>');
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::model::ColumnFlags;
    use crate::model::RowDefinition;

    fn options(spec: Option<&SortSpec>) -> RenderOptions<'_> {
        RenderOptions {
            table_id: "t",
            sortable: true,
            drag_handle: false,
            checkbox: false,
            spec,
        }
    }

    fn store_with(flags: HashMap<String, ColumnFlags>, rows: Vec<RowDefinition>) -> RowStore {
        let mut store = RowStore::new(vec!["a".into(), "b".into()], flags);
        store.extend(Section::Body, rows);
        store
    }

    #[test]
    fn test_remove_if_empty_column() {
        let flags = HashMap::from([(
            "b".to_string(),
            ColumnFlags::new().with(ColumnFlag::RemoveIfEmpty),
        )]);
        let store = store_with(
            flags,
            vec![
                RowDefinition::new().cell("a", 1).cell("b", ""),
                RowDefinition::new().cell("a", 2),
            ],
        );
        let markup = render(&store, options(None), &ColumnNames);
        assert_eq!(markup.columns, vec!["a"]);
        assert!(!markup.html.contains(r#"data-column="b""#));
        assert_eq!(markup.body_rows, 2);
    }

    #[test]
    fn test_non_empty_flagged_column_is_kept() {
        let flags = HashMap::from([(
            "b".to_string(),
            ColumnFlags::new().with(ColumnFlag::RemoveIfEmpty),
        )]);
        let store = store_with(
            flags,
            vec![
                RowDefinition::new().cell("a", 1),
                RowDefinition::new().cell("a", 2).cell("b", "x"),
            ],
        );
        assert_eq!(visible_columns(&store), vec!["a", "b"]);
    }

    #[test]
    fn test_structured_cell_without_display_renders_empty() {
        let cell = StructuredCell {
            display: None,
            sortable: 5.into(),
            icon: None,
        };
        let store = store_with(
            HashMap::new(),
            vec![RowDefinition::new().cell("a", "x").cell("b", cell.clone())],
        );
        let html = render(&store, options(None), &ColumnNames).html;
        assert!(html.contains(r#"<td data-column="b"></td>"#));
        assert!(!html.contains(">5<"));

        let flags = HashMap::from([(
            "b".to_string(),
            ColumnFlags::new().with(ColumnFlag::RemoveIfEmpty),
        )]);
        let store = store_with(flags, vec![RowDefinition::new().cell("a", "x").cell("b", cell)]);
        assert_eq!(visible_columns(&store), vec!["a"]);
    }

    #[test]
    fn test_icon_takes_precedence_over_display() {
        let icon = Icon::new("trash")
            .color("red")
            .tooltip("Delete")
            .action(DELETE_ACTION);
        let cell = StructuredCell {
            display: Some("ignored".into()),
            sortable: 1.into(),
            icon: Some(icon),
        };
        let store = store_with(HashMap::new(), vec![RowDefinition::new().cell("a", cell)]);
        let html = render(&store, options(None), &ColumnNames).html;
        assert!(html.contains(
            r#"<button class="icon icon-trash" type="button" style="color: red" title="Delete" data-action="delete-storable"></button>"#
        ));
        assert!(!html.contains("ignored"));
    }

    #[test]
    fn test_icon_link_blank() {
        let icon = Icon::new("open").link("/doc?a=1&b=2", true);
        let store = store_with(
            HashMap::new(),
            vec![RowDefinition::new().cell("a", StructuredCell::icon(icon, 0))],
        );
        let html = render(&store, options(None), &ColumnNames).html;
        assert!(html.contains(
            r#"<a class="icon icon-open" href="/doc?a=1&amp;b=2" target="_blank" rel="noopener"></a>"#
        ));
    }

    #[test]
    fn test_plain_values_escaped_structured_display_raw() {
        let store = store_with(
            HashMap::new(),
            vec![
                RowDefinition::new()
                    .cell("a", "<i>x</i>")
                    .cell("b", StructuredCell::new("<b>High</b>", 3)),
            ],
        );
        let html = render(&store, options(None), &ColumnNames).html;
        assert!(html.contains("&lt;i&gt;x&lt;/i&gt;"));
        assert!(html.contains("<b>High</b>"));
    }

    #[test]
    fn test_header_sort_markers() {
        let store = store_with(HashMap::new(), vec![]);
        let spec = SortSpec::desc("b").then_asc("a");
        let html = render(&store, options(Some(&spec)), &ColumnNames).html;
        assert!(html.contains(
            r#"<th class="sortable sort-asc" data-column="a" tabindex="0" aria-sort="ascending" data-sort-position="2">a</th>"#
        ));
        assert!(html.contains(r#"aria-sort="descending" data-sort-position="1""#));
    }

    #[test]
    fn test_ignore_sort_header_is_not_a_control() {
        let flags = HashMap::from([(
            "b".to_string(),
            ColumnFlags::new().with(ColumnFlag::IgnoreSort),
        )]);
        let store = store_with(flags, vec![]);
        let html = render(&store, options(None), &ColumnNames).html;
        assert!(html.contains(r#"<th data-column="b">b</th>"#));
    }

    #[test]
    fn test_row_attributes_and_leading_columns() {
        let store = store_with(
            HashMap::new(),
            vec![
                RowDefinition::new()
                    .cell("a", 1)
                    .url("/rows/1")
                    .attribute("class", "warn")
                    .attribute("data-id", "42"),
            ],
        );
        let opts = RenderOptions {
            drag_handle: true,
            checkbox: true,
            ..options(None)
        };
        let html = render(&store, opts, &ColumnNames).html;
        assert!(html.contains(
            r#"<tr class="warn link" data-row="0" data-url="/rows/1" tabindex="0" data-id="42"><td class="drag-handle" draggable="true"></td><td class="select"><input type="checkbox" value="0"></td>"#
        ));
    }

    #[test]
    fn test_sections_in_document_order() {
        let mut store = store_with(HashMap::new(), vec![RowDefinition::new().cell("a", "body")]);
        store.push(Section::Head, RowDefinition::new().cell("a", "head"));
        store.push(Section::Foot, RowDefinition::new().cell("a", "foot"));
        let html = render(&store, options(None), &ColumnNames).html;
        let head = html.find("head</td>").unwrap();
        let body = html.find("body</td>").unwrap();
        let foot = html.find("foot</td>").unwrap();
        assert!(head < body && body < foot);
        assert!(html.find("<tbody>").unwrap() < body);
    }
}
