//! Table output formatting

use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Rows},
};

/// Format data as a table with the given border style.
///
/// Known styles are `rounded`, `ascii`, `modern`, `markdown` and `blank`;
/// anything else falls back to `rounded`.
pub fn format_table<T: Tabled>(data: &[T], borders: &str) -> String {
    if data.is_empty() {
        return "No results found.".to_string();
    }

    let mut table = Table::new(data);
    match borders {
        "ascii" => table.with(Style::ascii()),
        "modern" => table.with(Style::modern()),
        "markdown" => table.with(Style::markdown()),
        "blank" => table.with(Style::blank()),
        _ => table.with(Style::rounded()),
    };
    table.with(Modify::new(Rows::first()).with(Alignment::center()));

    table.to_string()
}
