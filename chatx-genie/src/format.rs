//! Cell-value formatting and table assembly for query results.
//!
//! Values arrive as raw JSON and are inspected per cell, never per column: a
//! column declared as double still carries interleaved nulls, so the declared
//! type cannot be trusted for any individual value.

use serde_json::Value;

/// Token rendered for null/missing cell values.
pub const NULL_TOKEN: &str = "NULL";

/// Formats a single cell value for display.
///
/// Nulls render as `NULL`, float-valued numbers with exactly two decimal
/// places, strings as-is, everything else via its JSON display form.
pub fn format_cell(value: &Value) -> String {
    match value {
        Value::Null => NULL_TOKEN.to_string(),
        Value::Number(n) if n.is_f64() => format!("{:.2}", n.as_f64().unwrap_or_default()),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Resolves the header for column position `i`.
///
/// Uses the declared name when the manifest provides one at that position,
/// otherwise falls back to the positional `col{i}` header.
pub fn header_at(declared: &[String], i: usize) -> String {
    declared
        .get(i)
        .cloned()
        .unwrap_or_else(|| format!("col{}", i))
}

/// Builds a markdown table from declared column names and raw rows.
///
/// The header spans the wider of the declared column list and the first row,
/// so extra declared columns still appear and extra cells still get a
/// positional header. Cells beyond a row's width are simply not emitted.
pub fn markdown_table(declared: &[String], rows: &[Vec<Value>]) -> String {
    let width = declared
        .len()
        .max(rows.first().map(Vec::len).unwrap_or(0));

    let headers: Vec<String> = (0..width).map(|i| header_at(declared, i)).collect();

    let mut table = String::new();
    table.push_str(&format!("| {} |\n", headers.join(" | ")));
    table.push_str(&format!(
        "| {} |\n",
        headers.iter().map(|_| "---").collect::<Vec<_>>().join(" | ")
    ));
    for row in rows {
        let cells: Vec<String> = row.iter().map(format_cell).collect();
        table.push_str(&format!("| {} |\n", cells.join(" | ")));
    }
    table
}
