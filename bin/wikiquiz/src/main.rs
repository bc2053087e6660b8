mod cli;
mod console;
mod render;
mod shell;
mod take;
mod tabs;

use clap::Parser;
use tokio::io::BufReader;
use wq_api::{ClientConfig, QuizClient, tracing::init_tracing};

use crate::{
    cli::{Cli, Command},
    console::Console,
    shell::Shell,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment variables
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let mut config = ClientConfig::from_env()?;
    if let Some(api_base_url) = cli.api_base_url {
        config.api_base_url = api_base_url;
    }

    // Held until exit so buffered log lines are flushed
    let _log_guard = init_tracing(&config.env, config.log_dir.as_deref())?;
    tracing::debug!(api_base_url = %config.api_base_url, "configuration loaded");

    let client = QuizClient::new(&config)?;
    let console = Console::new(BufReader::new(tokio::io::stdin()), std::io::stdout());
    let mut shell = Shell::new(client, console);

    match cli.command {
        None => shell.run().await,
        Some(Command::Generate { url, take }) => shell.generate_once(url, take).await,
        Some(Command::Preview { url }) => shell.preview_once(url).await,
        Some(Command::History) => shell.history_once().await,
        Some(Command::Show { id, take }) => shell.show_once(id, take).await,
    }
}
