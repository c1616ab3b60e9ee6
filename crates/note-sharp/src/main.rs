mod command;
mod session;

use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use note_sharp_config::AppConfig;

use crate::session::Session;

/// A minimal notepad driven by line commands, with snapshot undo/redo.
#[derive(Parser, Debug)]
#[command(name = "note-sharp", version, about)]
struct Cli {
    /// File to open on startup.
    file: Option<PathBuf>,

    /// Read commands from this file instead of stdin.
    #[arg(long)]
    script: Option<PathBuf>,

    /// Config file to use instead of `note-sharp.json` next to the executable.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries command output
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting note-sharp");

    let config_path = cli.config.unwrap_or_else(AppConfig::config_path);
    let config = AppConfig::load_or_create(&config_path);
    let mut session = Session::new(config, Some(config_path));

    if let Some(file) = &cli.file {
        session.open(file)?;
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match &cli.script {
        Some(script) => {
            let file = std::fs::File::open(script)
                .with_context(|| format!("failed to open script: {}", script.display()))?;
            session.run(BufReader::new(file), &mut out)?;
        }
        None => session.run(std::io::stdin().lock(), &mut out)?,
    }

    let doc = session.document();
    if doc.modified {
        tracing::warn!("Exiting with unsaved changes in {}", doc.title);
    }
    Ok(())
}
