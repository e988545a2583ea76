//! Command execution context
//!
//! Provides a unified context for command execution: loaded configuration,
//! the cached registry client behind a docs service, and the output format.

use std::future::Future;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::cache::{CacheStorage, CachedRegistryClient};
use crate::cli::{GlobalOptions, OutputFormat};
use crate::client::RegistryHttpClient;
use crate::config::Config;
use crate::docs::DocsService;
use crate::error::{RegistryError, Result};
use crate::session::Session;

/// Context for command execution containing config, client, and runtime options.
pub struct CommandContext {
    /// Loaded configuration
    pub config: Config,
    /// Docs service over the cached HTTP client
    pub docs: DocsService<RegistryHttpClient>,
    /// Output format preference
    pub format: OutputFormat,
}

impl CommandContext {
    /// Create a new command context.
    ///
    /// Loads config from the given path (or the default location), opens the
    /// cache directory and builds the HTTP client.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let config = Config::load_at(opts.config_ref());
        log::debug!("Config: {:?}", config);

        let mut client = RegistryHttpClient::new(config.request_timeout())?;
        if let Some(host) = opts.api_host_ref() {
            client = client.with_base_url(host);
        }

        let cache = CacheStorage::open(config.index_ttl())?;
        let docs = DocsService::new(CachedRegistryClient::new(client, cache));

        Ok(Self {
            config,
            docs,
            format: opts.format,
        })
    }

    /// Border style for tables
    pub fn borders(&self) -> &str {
        &self.config.theme.borders_style
    }

    /// Load the provider index into a new session.
    ///
    /// An empty index means the registry could not be reached and nothing
    /// was cached.
    pub async fn load_session(&self) -> Result<Session> {
        let mut session = Session::with_terminal_width(
            terminal_width(),
            self.config.fullscreen_init_threshold,
        );

        let count = self
            .with_spinner("Loading provider index", session.load_index(&self.docs))
            .await;
        if count == 0 {
            return Err(RegistryError::InvalidResponse(
                "No providers available (registry unreachable and nothing cached)".to_string(),
            )
            .into());
        }
        Ok(session)
    }

    /// Run a future while showing a spinner on stderr (pretty output only)
    pub async fn with_spinner<F: Future>(&self, message: &str, future: F) -> F::Output {
        if self.format != OutputFormat::Pretty {
            return future.await;
        }

        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(80));

        let output = future.await;
        spinner.finish_and_clear();
        output
    }
}

/// Width of the attached terminal, if stdout is one
pub fn terminal_width() -> Option<u16> {
    let term = console::Term::stdout();
    if !term.is_term() {
        return None;
    }
    term.size_checked().map(|(_rows, cols)| cols)
}
