//! Placebot CLI - ask about nearby sushi restaurants and parking.
//!
//! Reads the category and question from stdin and prints the validated
//! answer to stdout. Logs go to stderr.

mod config;
mod error;

use clap::Parser;
use error::{CliError, Result};
use placebot::prelude::*;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tokio::io::BufReader;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Placebot - structured answers about sushi restaurants and parking
#[derive(Parser)]
#[command(name = "placebot")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file path
    #[arg(short, long, env = "PLACEBOT_CONFIG", default_value = config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Directory holding `sushi.json` and `parking.json`
    #[arg(short, long, env = "PLACEBOT_DATA_DIR", default_value = DirectoryStore::DEFAULT_DIR)]
    data_dir: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)
        .and_then(|rt| rt.block_on(run(cli)));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Initialize logging with the given verbosity level.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "placebot={level},placebot_cli={level},{}",
            if verbosity >= 3 { "debug" } else { "warn" }
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbosity >= 2)
        .with_writer(std::io::stderr)
        .init();
}

/// Main async entry point.
async fn run(cli: Cli) -> Result<()> {
    let config = config::load_config_from(&cli.config).await?;
    config::load_dotenv(Path::new(config::DOTENV_PATH));
    let api_key = config::api_key_from_env()?;

    let provider = OpenAI::new(config.client_config(api_key))?;
    tracing::info!(
        model = %config.openai.model,
        base_url = %provider.base_url(),
        data_dir = %cli.data_dir.display(),
        "starting assistant"
    );

    let assistant = Assistant::new(provider, config.assistant_settings())?;
    let session = Session::new(assistant, DirectoryStore::new(cli.data_dir));

    session
        .run(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
        .await?;
    Ok(())
}
