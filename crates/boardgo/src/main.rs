//! BoardAndGo flight notifier binary.
//!
//! ```bash
//! boardgo status RJA3813
//! boardgo send RJA3813 +15551234567
//! boardgo serve --port 8000
//! ```

mod cli;
mod commands;

use clap::Parser;
use boardgo_core::{config, Settings};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load environment variables from config directory first
    let env_path = config::env_file();
    if env_path.exists() {
        let _ = dotenvy::from_path(&env_path);
    }
    // Then local .env.local or .env
    let _ = dotenvy::from_filename(".env.local").or_else(|_| dotenvy::dotenv());

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(cli.filter_directives(std::env::var(EnvFilter::DEFAULT_ENV).ok()))
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = Settings::from_env()?;
    tracing::debug!(
        project = %settings.project_name,
        polish = !cli.no_polish,
        llm_available = settings.llm.is_available(),
        "Settings loaded"
    );

    commands::execute(cli.command, settings, !cli.no_polish, cli.format).await
}
