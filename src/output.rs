//! Table and JSON output formatting for console commands.

use serde::Serialize;
use tabled::{Table, Tabled};

use brainbox_core::error::AppError;
use brainbox_core::types::{Page, render_window};

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON output
    Json,
}

/// Print a list of items in the selected format
pub fn print_list<T: Serialize + Tabled>(items: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            if items.is_empty() {
                println!("No results found.");
            } else {
                println!("{}", Table::new(items));
            }
        }
        OutputFormat::Json => print_json(&items),
    }
}

/// Print one page of a list: numbered rows plus the page strip.
///
/// `rows` are the page's items already mapped to display rows, in display
/// order; `page` supplies the totals.
pub fn print_page<T, R: Serialize + Tabled>(
    page: &Page<T>,
    page_number: u64,
    rows: &[R],
    format: OutputFormat,
) {
    match format {
        OutputFormat::Table => {
            print_list(rows, format);
            let total = page.total_pages();
            if total > 0 {
                println!(
                    "Page {page_number} of {total} ({} items)   {}",
                    page.count,
                    render_window(page_number, total)
                );
            }
        }
        OutputFormat::Json => print_json(&serde_json::json!({
            "page": page_number,
            "total_pages": page.total_pages(),
            "count": page.count,
            "page_size": page.page_size,
            "results": rows,
        })),
    }
}

/// Print a single item in the selected format
pub fn print_item<T: Serialize>(item: &T, format: OutputFormat) {
    match format {
        OutputFormat::Table => match serde_json::to_value(item) {
            Ok(serde_json::Value::Object(map)) => {
                for (key, value) in map {
                    print_kv(&key, &display_value(&value));
                }
            }
            Ok(other) => println!("{}", display_value(&other)),
            Err(_) => println!("<unprintable>"),
        },
        OutputFormat::Json => print_json(item),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    let json = serde_json::to_string_pretty(value).unwrap_or_else(|_| "null".to_string());
    println!("{json}");
}

fn display_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => "-".to_string(),
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Array(items) => format!("{} item(s)", items.len()),
        other => other.to_string(),
    }
}

/// Print a success message
pub fn print_success(msg: &str) {
    println!("✓ {msg}");
}

/// Print a warning message
pub fn print_warning(msg: &str) {
    println!("⚠ {msg}");
}

/// Print an error message
pub fn print_error(msg: &str) {
    eprintln!("✗ {msg}");
}

/// Print an error with any per-field messages the backend attached.
pub fn print_app_error(err: &AppError) {
    print_error(&err.message);
    for (field, message) in err.field_errors() {
        if field == "detail" {
            continue;
        }
        eprintln!("    {field}: {message}");
    }
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:<24} {}", format!("{key}:"), value);
}

/// Render an optional value for a table cell.
pub fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}
