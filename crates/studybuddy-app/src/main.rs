mod cli;
mod controller;
mod repl;
mod wiring;

use std::process::ExitCode;
use std::sync::Arc;

use studybuddy_common::StudyBuddyError;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, reload, EnvFilter, Registry};

use crate::controller::ChatController;

const DEFAULT_LOG_DIRECTIVE: &str = "studybuddy=info";

/// Load environment variables from a .env file (KEY=VALUE lines).
///
/// Variables already set in the environment win.
fn load_dotenv() {
    let manifest_dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let candidates = [
        std::path::PathBuf::from(".env"),
        // Workspace root, two levels up from crates/studybuddy-app/
        manifest_dir.join("..").join("..").join(".env"),
    ];

    for path in &candidates {
        if let Ok(contents) = std::fs::read_to_string(path) {
            for line in contents.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }
                if let Some((key, value)) = line.split_once('=') {
                    let key = key.trim().trim_start_matches("export ").trim();
                    let value = value.trim().trim_matches('"').trim_matches('\'');
                    if std::env::var(key).is_err() {
                        std::env::set_var(key, value);
                    }
                }
            }
            return;
        }
    }
}

type FilterHandle = reload::Handle<EnvFilter, Registry>;

/// `RUST_LOG` plus one extra directive.
fn env_filter(directive: &str) -> EnvFilter {
    let filter = EnvFilter::from_default_env();
    match directive
        .parse::<Directive>()
        .or_else(|_| DEFAULT_LOG_DIRECTIVE.parse())
    {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    }
}

/// Install the subscriber before anything logs. The filter can be swapped
/// once the config file has been read.
fn init_logging(cli_level: Option<&str>) -> FilterHandle {
    let (filter, handle) =
        reload::Layer::new(env_filter(cli_level.unwrap_or(DEFAULT_LOG_DIRECTIVE)));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
    handle
}

async fn run() -> Result<(), StudyBuddyError> {
    let args = cli::parse();
    let log_filter = init_logging(args.log_level.as_deref());

    if let Some(ref path) = args.config {
        tracing::info!("Using config override: {}", path.display());
    }
    let config = studybuddy_config::load_config(args.config.as_deref())?;

    // An explicit --log-level beats the config file.
    if args.log_level.is_none() {
        let directive = config.logging.level.directive();
        if let Err(e) = log_filter.reload(env_filter(directive)) {
            tracing::warn!("failed to apply log level {directive}: {e}");
        }
    }
    tracing::info!("Study Buddy v{} starting...", env!("CARGO_PKG_VERSION"));

    let model = args.model.as_deref();
    let connector = Arc::new(wiring::connector(&config.model));
    let options = wiring::controller_options(&config, model);
    tracing::info!(model = %options.setup.model, "opening chat session");

    let controller = ChatController::initialize(connector, options);
    repl::run(controller).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    load_dotenv();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("studybuddy: {e}");
            ExitCode::FAILURE
        }
    }
}
