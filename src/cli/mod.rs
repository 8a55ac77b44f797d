//! CLI adapter for ColepsBot
//!
//! Command-line front end over `core/`: one-shot questions, an
//! interactive chat loop, document management and statistics.
//!
//! ```text
//! +------------------+
//! |     core/        |
//! |  (domain logic)  |
//! +--------+---------+
//!          |
//!          v
//! +------------------+
//! |      cli/        |
//! | (clap adapter)   |
//! +------------------+
//! ```

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

/// ColepsBot - layered question answering
///
/// Answers questions from scripted intents, a curated knowledge base
/// and the documents you load, in that order.
#[derive(Parser, Debug)]
#[command(name = "colepsbot")]
#[command(version)]
#[command(about = "Question answering over intents, FAQ and documents", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "human")]
    pub format: OutputFormat,

    /// Emit logs as JSON on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for scripting
    Json,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ask one question
    Ask(commands::AskArgs),

    /// Start an interactive conversation
    Chat(commands::ChatArgs),

    /// Add a .txt, .pdf or .docx file to the documents directory
    #[command(name = "add-document")]
    AddDocument(commands::AddDocumentArgs),

    /// List documents in the documents directory
    #[command(name = "list-documents")]
    ListDocuments(commands::ListDocumentsArgs),

    /// Show knowledge base hit statistics
    #[command(name = "show-stats")]
    ShowStats(commands::StatsArgs),

    /// Show current configuration
    #[command(name = "show-config")]
    ShowConfig(commands::ConfigArgs),

    /// Generate shell completion scripts
    ///
    /// Output completion script to stdout. To install:
    ///
    ///   bash:  colepsbot completions bash > ~/.local/share/bash-completion/completions/colepsbot
    ///   zsh:   colepsbot completions zsh > ~/.zfunc/_colepsbot
    ///   fish:  colepsbot completions fish > ~/.config/fish/completions/colepsbot.fish
    Completions(commands::CompletionsArgs),
}

/// Run the CLI with the provided arguments
pub async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    use crate::core::config::Config;
    use crate::core::services::Services;
    use crate::core::xdg::XdgDirs;
    use std::sync::Arc;

    // Handle completions command early (doesn't need services)
    if let Commands::Completions(args) = cli.command {
        return commands::completions::execute(args);
    }

    let xdg = XdgDirs::new();
    xdg.ensure_dirs_exist()?;
    xdg.log_paths();

    let config = Config::load()?;
    config.log_config();

    let services = Arc::new(Services::new(config)?);

    match cli.command {
        Commands::Ask(args) => commands::ask::execute(args, &services, cli.format).await,
        Commands::Chat(args) => commands::chat::execute(args, &services, cli.format).await,
        Commands::AddDocument(args) => {
            commands::documents::execute_add(args, &services, cli.format).await
        }
        Commands::ListDocuments(args) => {
            commands::documents::execute_list(args, &services, cli.format).await
        }
        Commands::ShowStats(args) => commands::stats::execute(args, &services, cli.format).await,
        Commands::ShowConfig(args) => commands::config::execute(args, &services, cli.format).await,
        Commands::Completions(_) => unreachable!(), // Handled above
    }
}
