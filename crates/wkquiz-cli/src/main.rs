//! wkquiz CLI — a terminal quiz over the subjects you have already reviewed.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use wkquiz_core::traits::Prompter;

mod commands;
mod terminal;

use terminal::Terminal;

#[derive(Parser)]
#[command(name = "wkquiz", version, about = "Terminal vocabulary quiz for WaniKani")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the quiz (the default)
    Quiz,

    /// Create a starter wkquiz.toml
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("wkquiz=warn".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Quiz) {
        Commands::Quiz => {
            let mut terminal = Terminal::stdio();
            if let Err(e) = commands::quiz::execute(cli.config, &mut terminal).await {
                tracing::debug!(error = ?e, "quiz aborted");
                if let Err(io) = terminal.say(&format!("Error: {e:#}")).await {
                    eprintln!("Error: {e:#} ({io})");
                }
            }
            if let Err(e) = terminal.close().await {
                eprintln!("Error: {e:#}");
            }
        }
        Commands::Init => {
            if let Err(e) = commands::init::execute() {
                eprintln!("Error: {e:#}");
                process::exit(1);
            }
        }
    }
}
