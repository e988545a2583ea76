//! Documentation command implementations

use colored::Colorize;

use crate::cli::{CommandContext, GlobalOptions, OutputFormat};
use crate::error::{NavigationError, Result};
use crate::models::ResourceKind;
use crate::models::display::{DocumentOutput, ResourceDisplay};
use crate::output;
use crate::session::Session;

/// Load the index and select a provider at the requested version
async fn open_provider(
    ctx: &CommandContext,
    name: &str,
    version: Option<&str>,
) -> Result<Session> {
    let mut session = ctx.load_session().await?;
    ctx.with_spinner(
        &format!("Loading {}", name),
        session.select_provider_at(name, version, &ctx.docs),
    )
    .await?;
    Ok(session)
}

/// Run the resources command
pub async fn resources(
    opts: &GlobalOptions,
    provider: &str,
    version: Option<&str>,
    search: Option<&str>,
) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let session = open_provider(&ctx, provider, version).await?;

    let rows: Vec<ResourceDisplay> = session
        .search_resources(search.unwrap_or_default())?
        .into_iter()
        .map(ResourceDisplay::from)
        .collect();

    if ctx.format == OutputFormat::Pretty
        && let Some(active) = session.active_provider()
    {
        println!(
            "{} {}\n",
            active.display_name().bold(),
            active.active_version().dimmed()
        );
    }
    output::print_rows(&rows, ctx.format, ctx.borders())
}

/// Run the overview command
pub async fn overview(opts: &GlobalOptions, provider: &str, version: Option<&str>) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let session = open_provider(&ctx, provider, version).await?;

    let Some(active) = session.active_provider() else {
        return Ok(());
    };
    let content = active.overview().unwrap_or_default();
    if content.is_empty() {
        log::warn!("No overview available for {}", active.display_name());
    }

    let doc = DocumentOutput {
        provider: active.display_name(),
        version: active.active_version(),
        kind: None,
        name: None,
        content,
    };
    output::print_document(content, &doc, ctx.format)
}

/// Run the show command
pub async fn show(
    opts: &GlobalOptions,
    provider: &str,
    resource: &str,
    kind: Option<ResourceKind>,
    version: Option<&str>,
) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let mut session = open_provider(&ctx, provider, version).await?;

    let content = ctx
        .with_spinner(
            &format!("Loading {}", resource),
            session.select_resource_by_name(resource, kind, &ctx.docs),
        )
        .await?;

    let (Some(active), Some(selected)) = (session.active_provider(), session.active_resource())
    else {
        return Ok(());
    };
    if content.is_empty() {
        log::warn!("No content available for {}", selected.id);
    }

    let doc = DocumentOutput {
        provider: active.display_name(),
        version: active.active_version(),
        kind: Some(selected.kind()),
        name: Some(selected.name()),
        content: &content,
    };
    output::print_document(&content, &doc, ctx.format)
}

/// Run the use command
pub async fn use_snippet(opts: &GlobalOptions, provider: &str, version: Option<&str>) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let session = ctx.load_session().await?;

    // Only the version list is needed, not the documents
    let mut selected = session
        .provider(provider)
        .cloned()
        .ok_or_else(|| NavigationError::UnknownProvider(provider.to_string()))?;
    if let Some(version) = version {
        if !selected.has_version(version) {
            return Err(NavigationError::UnknownVersion {
                provider: provider.to_string(),
                version: version.to_string(),
            }
            .into());
        }
        selected.set_active_version(version);
    }

    let snippet = selected.use_configuration();
    match ctx.format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "provider": selected.display_name(),
                "version": selected.active_version(),
                "snippet": snippet,
            });
            println!("{}", output::json::format_json(&json)?);
        }
        _ => println!("terraform {{\n  required_providers {{\n{}\n  }}\n}}", snippet),
    }
    Ok(())
}
