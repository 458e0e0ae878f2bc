//! Markup string helpers.

use std::fmt::Write;

/// Escapes a string for element text and attribute values.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Appends ` name="value"` with the value escaped.
pub fn push_attr(out: &mut String, name: &str, value: &str) {
    // Writing into a String cannot fail.
    let _ = write!(out, r#" {}="{}""#, name, escape_html(value));
}

/// Appends ` class="..."` unless there are no classes.
pub fn push_classes<'a>(out: &mut String, classes: impl IntoIterator<Item = &'a str>) {
    let joined = classes
        .into_iter()
        .filter(|c| !c.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if !joined.is_empty() {
        push_attr(out, "class", &joined);
    }
}
