//! ColepsBot CLI - ask questions, chat and manage documents
//!
//! # Examples
//!
//! ```bash
//! # One question
//! colepsbot ask "Quelles sont les heures d'ouverture ?"
//!
//! # Interactive session
//! colepsbot chat
//!
//! # Add a document to the corpus
//! colepsbot add-document ~/guide.pdf
//!
//! # Most asked questions
//! colepsbot show-stats --top 5
//! ```

use clap::Parser;
use colepsbot::cli::{output, run, Cli};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "colepsbot=warn".into());
    let registry = tracing_subscriber::registry().with(filter);
    // Logs go to stderr so stdout stays clean for answers and JSON
    if cli.log_json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }

    if let Err(e) = run(cli).await {
        output::print_error(&e.to_string());
        std::process::exit(1);
    }
}
