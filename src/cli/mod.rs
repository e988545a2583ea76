//! CLI command definitions and handlers

use clap::{Parser, Subcommand};
pub use clap_complete::Shell;

use completions::provider_name_candidates;

use crate::models::ResourceKind;

pub mod args;
pub mod browse;
pub mod cache;
pub mod completions;
pub mod context;
pub mod docs;
pub mod providers;

pub use args::{GlobalOptions, OutputFormat};
pub use context::CommandContext;

/// tofuref - browse OpenTofu provider documentation from the terminal
#[derive(Parser, Debug)]
#[command(name = "tofuref")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute (defaults to the interactive browser)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format (pretty, table, json)
    #[arg(
        long,
        global = true,
        env = "TOFUREF_FORMAT",
        default_value = "pretty",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: OutputFormat,

    /// Override config file location
    #[arg(long, global = true, env = "TOFUREF_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "TOFUREF_DEBUG", hide_env = true)]
    pub debug: bool,

    /// Registry API base URL
    #[arg(long, global = true, env = "TOFUREF_API_HOST", hide = true)]
    pub api_host: Option<String>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Browse providers and their docs interactively
    Browse,

    /// List providers in the registry
    #[command(visible_alias = "ls")]
    Providers {
        /// Only providers whose name contains this text
        #[arg(long, short = 's')]
        search: Option<String>,
    },

    /// List published versions of a provider
    Versions {
        /// Provider as organization/name
        #[arg(add = provider_name_candidates())]
        provider: String,
    },

    /// List the documents (guides, resources, data sources, functions) of a provider
    Resources {
        /// Provider as organization/name
        #[arg(add = provider_name_candidates())]
        provider: String,

        /// Provider version (defaults to the latest)
        #[arg(long, short = 'v')]
        version: Option<String>,

        /// Only documents whose name contains this text
        #[arg(long, short = 's')]
        search: Option<String>,
    },

    /// Show the overview page of a provider
    Overview {
        /// Provider as organization/name
        #[arg(add = provider_name_candidates())]
        provider: String,

        /// Provider version (defaults to the latest)
        #[arg(long, short = 'v')]
        version: Option<String>,
    },

    /// Show one document of a provider
    #[command(after_help = "EXAMPLES:\n  \
        tofuref show hashicorp/aws instance\n  \
        tofuref show hashicorp/aws instance --kind datasource\n  \
        tofuref show hashicorp/aws tutorial --kind guide --version v5.0.0")]
    Show {
        /// Provider as organization/name
        #[arg(add = provider_name_candidates())]
        provider: String,

        /// Document name, e.g. `instance`
        resource: String,

        /// Document kind (guide, resource, datasource, function)
        #[arg(long, short = 'k')]
        kind: Option<ResourceKind>,

        /// Provider version (defaults to the latest)
        #[arg(long, short = 'v')]
        version: Option<String>,
    },

    /// Print a required_providers snippet for a provider
    Use {
        /// Provider as organization/name
        #[arg(add = provider_name_candidates())]
        provider: String,

        /// Provider version (defaults to the latest)
        #[arg(long, short = 'v')]
        version: Option<String>,
    },

    /// Manage the local documentation cache
    #[command(subcommand)]
    Cache(CacheCommands),

    /// Generate shell completions (static)
    #[command(after_help = "\
Static completions (subcommands/flags only):
  bash:   tofuref completion bash > /etc/bash_completion.d/tofuref
  zsh:    tofuref completion zsh > \"${fpath[1]}/_tofuref\"
  fish:   tofuref completion fish > ~/.config/fish/completions/tofuref.fish

Dynamic completions (includes provider names from the cached index):
  bash:   echo 'source <(COMPLETE=bash tofuref)' >> ~/.bashrc
  zsh:    echo 'source <(COMPLETE=zsh tofuref)' >> ~/.zshrc
  fish:   echo 'COMPLETE=fish tofuref | source' >> ~/.config/fish/config.fish")]
    Completion {
        /// Shell to generate completions for (static only)
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Display version information
    Version,
}

/// Cache management subcommands
#[derive(Subcommand, Debug)]
pub enum CacheCommands {
    /// Show cache statistics
    Status,
    /// Clear all cached data
    Clear,
    /// Print cache directory path
    Path,
}
