use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "resto-tui")]
#[command(about = "Terminal browser for the restaurant directory")]
pub struct Cli {
    /// Write a debug log to the system temp directory
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run against the configured Supabase project
    Run,
    /// Run against a local in-memory catalog with simulated latency
    Dev,
    /// Print config path and create default file if missing
    ConfigPath,
}
