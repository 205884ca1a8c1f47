//! Output formatting utilities

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL_CONDENSED, ContentArrangement, Table};
use docloud_core::{AccountInfo, ErrorDetail};
use serde_json::Value as JsonValue;

/// Print a success message
pub fn success(msg: &str) {
    println!("{}", msg.green());
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{}", msg.red());
}

/// Print a warning message
pub fn warning(msg: &str) {
    println!("{}", msg.yellow());
}

/// Create a styled table
pub fn create_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Vertical key/value table of every account field, sorted by key
pub fn account_table(account: &AccountInfo) -> Table {
    let mut table = create_table();
    table.set_header(vec!["Field", "Value"]);
    for (key, value) in account.fields() {
        table.add_row(vec![key.clone(), format_value(value)]);
    }
    table
}

pub fn error_table(detail: &ErrorDetail) -> Table {
    let mut table = create_table();
    table.add_row(vec!["Message".to_string(), detail.message.clone()]);
    table.add_row(vec!["Status Code".to_string(), detail.status_code.to_string()]);
    table.add_row(vec!["Reason".to_string(), detail.reason.clone()]);
    table
}

/// Render a JSON value for a table cell
pub fn format_value(value: &JsonValue) -> String {
    match value {
        JsonValue::Null => "-".to_string(),
        JsonValue::String(s) => s.clone(),
        JsonValue::Object(map) => map
            .iter()
            .map(|(k, v)| format!("{}: {}", k, format_value(v)))
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}
