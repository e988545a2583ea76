//! Common CLI types shared across commands

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty format - styled tables and rendered markdown
    #[default]
    Pretty,
    /// Table format - plain tables and raw markdown
    Table,
    /// JSON format - structured for scripts
    Json,
}
