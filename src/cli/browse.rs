//! Interactive documentation browser
//!
//! A prompt loop over a [`Session`]: pick a provider, then a document, and
//! read it in the terminal. Every menu can go back one level.

use colored::Colorize;
use console::Term;
use dialoguer::{Input, Select, theme::ColorfulTheme};

use crate::cli::{CommandContext, GlobalOptions};
use crate::error::{Error, Result};
use crate::models::{Provider, Resource};
use crate::output::markdown;
use crate::session::{NavState, Session};

/// Rows visible at once in a selection list
const PAGE_SIZE: usize = 20;

/// Longest provider description shown in the picker
const MAX_DESCRIPTION: usize = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Continue,
    Quit,
}

#[derive(Debug, Clone, Copy)]
enum ProviderAction {
    OpenDocument,
    Overview,
    SwitchVersion,
    UseConfiguration,
    ToggleFullscreen,
    FetchLog,
    Back,
    Quit,
}

impl ProviderAction {
    const ALL: [ProviderAction; 8] = [
        ProviderAction::OpenDocument,
        ProviderAction::Overview,
        ProviderAction::SwitchVersion,
        ProviderAction::UseConfiguration,
        ProviderAction::ToggleFullscreen,
        ProviderAction::FetchLog,
        ProviderAction::Back,
        ProviderAction::Quit,
    ];

    fn label(&self) -> &'static str {
        match self {
            ProviderAction::OpenDocument => "Open a document",
            ProviderAction::Overview => "Show overview",
            ProviderAction::SwitchVersion => "Switch version",
            ProviderAction::UseConfiguration => "Show use configuration",
            ProviderAction::ToggleFullscreen => "Toggle fullscreen",
            ProviderAction::FetchLog => "Show fetch log",
            ProviderAction::Back => "Back to providers",
            ProviderAction::Quit => "Quit",
        }
    }
}

/// Run the browse command
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    if !Term::stdout().is_term() {
        return Err(Error::Dialoguer(
            "The browser needs an interactive terminal; try `tofuref providers`".to_string(),
        ));
    }

    let ctx = CommandContext::new(opts)?;
    let mut session = ctx.load_session().await?;
    let theme = ColorfulTheme::default();

    if session.is_fullscreen() {
        log::debug!("Narrow terminal, starting in fullscreen mode");
    }

    loop {
        let step = match session.state() {
            NavState::NoProvider => pick_provider(&ctx, &mut session, &theme).await?,
            NavState::ProviderSelected => provider_menu(&ctx, &mut session, &theme).await?,
            NavState::ResourceSelected => resource_menu(&mut session, &theme)?,
        };
        if step == Step::Quit {
            break;
        }
    }

    Ok(())
}

async fn pick_provider(
    ctx: &CommandContext,
    session: &mut Session,
    theme: &ColorfulTheme,
) -> Result<Step> {
    let query: String = Input::with_theme(theme)
        .with_prompt("Search providers (empty lists all, q quits)")
        .allow_empty(true)
        .interact_text()?;
    if query.trim() == "q" {
        return Ok(Step::Quit);
    }

    let emoji = ctx.config.theme.emoji;
    let (names, labels): (Vec<String>, Vec<String>) = session
        .search_providers(&query)
        .into_iter()
        .map(|p| (p.display_name(), provider_label(p, emoji)))
        .unzip();
    if names.is_empty() {
        println!("No providers match '{}'", query.trim());
        return Ok(Step::Continue);
    }

    let Some(choice) = Select::with_theme(theme)
        .with_prompt(format!("{} providers", names.len()))
        .items(&labels)
        .default(0)
        .max_length(PAGE_SIZE)
        .interact_opt()?
    else {
        return Ok(Step::Continue);
    };

    ctx.with_spinner(
        &format!("Loading {}", names[choice]),
        session.select_provider(&names[choice], &ctx.docs),
    )
    .await?;
    show_overview(session);
    Ok(Step::Continue)
}

async fn provider_menu(
    ctx: &CommandContext,
    session: &mut Session,
    theme: &ColorfulTheme,
) -> Result<Step> {
    let Some(provider) = session.active_provider() else {
        return Ok(Step::Continue);
    };
    let prompt = format!("{} {}", provider.display_name(), provider.active_version());

    let labels: Vec<&str> = ProviderAction::ALL.iter().map(|a| a.label()).collect();
    let Some(choice) = Select::with_theme(theme)
        .with_prompt(prompt)
        .items(&labels)
        .default(0)
        .interact_opt()?
    else {
        session.back_to_providers();
        return Ok(Step::Continue);
    };

    match ProviderAction::ALL[choice] {
        ProviderAction::OpenDocument => open_document(ctx, session, theme).await?,
        ProviderAction::Overview => show_overview(session),
        ProviderAction::SwitchVersion => switch_version(ctx, session, theme).await?,
        ProviderAction::UseConfiguration => {
            if let Some(provider) = session.active_provider() {
                println!("\n{}\n", provider.use_configuration().cyan());
            }
        }
        ProviderAction::ToggleFullscreen => {
            session.toggle_fullscreen();
        }
        ProviderAction::FetchLog => show_fetch_log(ctx),
        ProviderAction::Back => session.back_to_providers(),
        ProviderAction::Quit => return Ok(Step::Quit),
    }
    Ok(Step::Continue)
}

async fn open_document(
    ctx: &CommandContext,
    session: &mut Session,
    theme: &ColorfulTheme,
) -> Result<()> {
    let query: String = Input::with_theme(theme)
        .with_prompt("Search documents (empty lists all)")
        .allow_empty(true)
        .interact_text()?;

    let emoji = ctx.config.theme.emoji;
    let (ids, labels): (Vec<_>, Vec<String>) = session
        .search_resources(&query)?
        .into_iter()
        .map(|r| (r.id.clone(), resource_label(r, emoji)))
        .unzip();
    if ids.is_empty() {
        println!("No documents match '{}'", query.trim());
        return Ok(());
    }

    let Some(choice) = Select::with_theme(theme)
        .with_prompt(format!("{} documents", ids.len()))
        .items(&labels)
        .default(0)
        .max_length(PAGE_SIZE)
        .interact_opt()?
    else {
        return Ok(());
    };

    let content = ctx
        .with_spinner(
            &format!("Loading {}", ids[choice]),
            session.select_resource(&ids[choice], &ctx.docs),
        )
        .await?;
    show_resource(session, &content);
    Ok(())
}

async fn switch_version(
    ctx: &CommandContext,
    session: &mut Session,
    theme: &ColorfulTheme,
) -> Result<()> {
    let Some(provider) = session.active_provider() else {
        return Ok(());
    };

    let versions: Vec<String> = provider.versions.iter().map(|v| v.id.clone()).collect();
    let labels: Vec<String> = provider
        .versions
        .iter()
        .map(|v| {
            let published = v.published.as_deref().and_then(|p| p.get(..10)).unwrap_or("");
            let marker = if v.id == provider.active_version() { "*" } else { " " };
            format!("{} {:<14} {}", marker, v.id, published.dimmed())
        })
        .collect();
    let current = versions
        .iter()
        .position(|v| v == provider.active_version())
        .unwrap_or(0);

    let Some(choice) = Select::with_theme(theme)
        .with_prompt("Version")
        .items(&labels)
        .default(current)
        .max_length(PAGE_SIZE)
        .interact_opt()?
    else {
        return Ok(());
    };

    ctx.with_spinner(
        &format!("Loading {}", versions[choice]),
        session.set_active_version(&versions[choice], &ctx.docs),
    )
    .await?;
    show_overview(session);
    Ok(())
}

fn resource_menu(session: &mut Session, theme: &ColorfulTheme) -> Result<Step> {
    let items = ["Back to provider", "Show again", "Toggle fullscreen", "Quit"];
    let choice = Select::with_theme(theme)
        .items(&items)
        .default(0)
        .interact_opt()?;

    match choice {
        None | Some(0) => session.deselect_resource(),
        Some(1) => {
            let content = session
                .active_resource()
                .and_then(|r| r.content.clone())
                .unwrap_or_default();
            show_resource(session, &content);
        }
        Some(2) => {
            session.toggle_fullscreen();
        }
        _ => return Ok(Step::Quit),
    }
    Ok(Step::Continue)
}

fn show_overview(session: &Session) {
    let Some(provider) = session.active_provider() else {
        return;
    };
    let title = format!("{} {}", provider.display_name(), provider.active_version());
    show_page(session, &title, provider.overview().unwrap_or_default());
}

fn show_resource(session: &Session, content: &str) {
    let (Some(provider), Some(resource)) = (session.active_provider(), session.active_resource())
    else {
        return;
    };
    let title = format!(
        "{} {} › {} {}",
        provider.display_name(),
        provider.active_version(),
        resource.kind(),
        resource.name()
    );
    show_page(session, &title, content);
}

/// Print a document. Fullscreen clears the terminal and drops the title.
fn show_page(session: &Session, title: &str, body: &str) {
    if session.is_fullscreen() {
        let _ = Term::stdout().clear_screen();
    } else {
        println!("\n{}\n", title.bold().cyan());
    }

    if body.trim().is_empty() {
        println!("{}", "(no content available)".dimmed());
    } else {
        println!("{}\n", markdown::render(body));
    }
}

fn show_fetch_log(ctx: &CommandContext) {
    let events = ctx.docs.client().events();
    if events.is_empty() {
        println!("{}", "No registry requests yet".dimmed());
        return;
    }
    for event in events {
        println!("{}", event);
    }
}

fn provider_label(provider: &Provider, emoji: bool) -> String {
    let cached = match (provider.cached, emoji) {
        (true, true) => "💾",
        (true, false) => "C",
        (false, true) => "  ",
        (false, false) => " ",
    };
    let mut description = provider.description.trim().to_string();
    if description.chars().count() > MAX_DESCRIPTION {
        description = description.chars().take(MAX_DESCRIPTION - 3).collect::<String>() + "...";
    }
    let blocked = if provider.blocked { " [blocked]" } else { "" };
    format!(
        "{} {}{} {}",
        cached,
        provider.display_name(),
        blocked.red(),
        description.dimmed()
    )
}

fn resource_label(resource: &Resource, emoji: bool) -> String {
    let cached = if resource.cached { "C" } else { " " };
    format!(
        "{} {} {}",
        resource.kind().marker(emoji),
        cached.dimmed(),
        resource.name()
    )
}
