//! Output formatting for CLI results

use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::error::Result;

pub mod json;
pub mod markdown;
pub mod table;

/// Print rows as a table, or wrapped in JSON metadata
pub fn print_rows<T: Tabled + Serialize>(
    rows: &[T],
    format: OutputFormat,
    borders: &str,
) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", json::format_rows(rows)?),
        OutputFormat::Pretty | OutputFormat::Table => {
            println!("{}", table::format_table(rows, borders))
        }
    }
    Ok(())
}

/// Print a markdown document: styled for pretty, raw for table
pub fn print_document<T: Serialize>(markdown: &str, json: &T, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", json::format_json(json)?),
        OutputFormat::Pretty => println!("{}", markdown::render(markdown)),
        OutputFormat::Table => println!("{}", markdown),
    }
    Ok(())
}
