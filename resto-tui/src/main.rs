mod api;
mod app;
mod bootstrap;
mod cli;
mod config;
mod runtime;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use bootstrap::Mode;
use cli::{Cli, Commands};
use config::RestoConfig;

const DEBUG_LOG: &str = "resto-tui-debug.log";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    if cli.debug {
        init_debug_log()?;
    }

    match cli.command {
        Commands::ConfigPath => {
            let path = RestoConfig::config_path()?;
            if !path.exists() {
                RestoConfig::default().save()?;
                println!("Created default config at {}", path.display());
            }
            println!("{}", path.display());
            Ok(())
        }
        Commands::Run => run(Mode::Supabase).await,
        Commands::Dev => run(Mode::Dev).await,
    }
}

/// The terminal belongs to the UI, so logs go to a file.
fn init_debug_log() -> Result<()> {
    let path = std::env::temp_dir().join(DEBUG_LOG);
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open debug log at {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .init();
    tracing::info!("resto-tui debug log started at {}", path.display());
    Ok(())
}

async fn run(mode: Mode) -> Result<()> {
    let config = RestoConfig::load()?;
    let mut app = bootstrap::build_app(mode, &config)?;

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = runtime::run_app(&mut terminal, &mut app).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!("resto-tui exited with error: {:?}", err);
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
