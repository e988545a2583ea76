//! tofuref - terminal browser for OpenTofu provider documentation

use clap::{CommandFactory, Parser};
use clap_complete::CompleteEnv;

mod cache;
mod cli;
mod client;
mod config;
mod docs;
mod error;
mod models;
mod output;
mod search;
mod session;

use cli::{CacheCommands, Cli, Commands, GlobalOptions};
use error::Result;

#[tokio::main]
async fn main() {
    // Answers dynamic completion requests (COMPLETE=<shell>) and exits
    CompleteEnv::with_factory(Cli::command).complete();

    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let opts = GlobalOptions::from_cli(&cli);

    match cli.command.unwrap_or(Commands::Browse) {
        Commands::Browse => cli::browse::run(&opts).await,
        Commands::Providers { search } => cli::providers::list(&opts, search.as_deref()).await,
        Commands::Versions { provider } => cli::providers::versions(&opts, &provider).await,
        Commands::Resources {
            provider,
            version,
            search,
        } => {
            cli::docs::resources(&opts, &provider, version.as_deref(), search.as_deref()).await
        }
        Commands::Overview { provider, version } => {
            cli::docs::overview(&opts, &provider, version.as_deref()).await
        }
        Commands::Show {
            provider,
            resource,
            kind,
            version,
        } => cli::docs::show(&opts, &provider, &resource, kind, version.as_deref()).await,
        Commands::Use { provider, version } => {
            cli::docs::use_snippet(&opts, &provider, version.as_deref()).await
        }
        Commands::Cache(cache_cmd) => match cache_cmd {
            CacheCommands::Status => cli::cache::status(&opts),
            CacheCommands::Clear => cli::cache::clear(&opts),
            CacheCommands::Path => cli::cache::path(),
        },
        Commands::Completion { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "tofuref",
                &mut std::io::stdout(),
            );
            Ok(())
        }
        Commands::Version => {
            println!("tofuref version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

/// Log to stderr. `--debug` shows debug output for this crate; otherwise
/// `RUST_LOG` decides, defaulting to warnings.
fn init_logging(debug: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if debug {
        builder.filter_module(env!("CARGO_PKG_NAME"), log::LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();
}
