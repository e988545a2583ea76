//! Provider command implementations

use colored::Colorize;

use crate::cli::{CommandContext, GlobalOptions, OutputFormat};
use crate::error::{NavigationError, Result};
use crate::models::display::{ProviderDisplay, VersionDisplay};
use crate::output;

/// Run the providers command
pub async fn list(opts: &GlobalOptions, search: Option<&str>) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let session = ctx.load_session().await?;

    let matches = session.search_providers(search.unwrap_or_default());
    log::debug!("{} of {} providers match", matches.len(), session.providers().len());

    let rows: Vec<ProviderDisplay> = matches.into_iter().map(ProviderDisplay::from).collect();
    output::print_rows(&rows, ctx.format, ctx.borders())?;

    if ctx.format == OutputFormat::Pretty && !rows.is_empty() {
        println!(
            "{} providers, {} marked C have docs in the local cache",
            rows.len(),
            rows.iter().filter(|r| !r.cached.is_empty()).count()
        );
    }
    Ok(())
}

/// Run the versions command
pub async fn versions(opts: &GlobalOptions, name: &str) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let session = ctx.load_session().await?;

    let provider = session
        .provider(name)
        .ok_or_else(|| NavigationError::UnknownProvider(name.to_string()))?;

    let rows: Vec<VersionDisplay> = provider
        .versions
        .iter()
        .map(|v| VersionDisplay::new(v, provider.active_version()))
        .collect();

    if ctx.format == OutputFormat::Pretty {
        println!("{}\n", provider.display_name().bold());
    }
    output::print_rows(&rows, ctx.format, ctx.borders())
}
