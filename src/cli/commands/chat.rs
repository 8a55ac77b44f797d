//! Chat command - interactive conversation on stdin

use crate::cli::commands::ask::print_answer;
use crate::cli::commands::documents::load_corpus;
use crate::cli::output::colors;
use crate::cli::OutputFormat;
use crate::core::services::Services;
use clap::Args;
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

/// Words that end the conversation
const EXIT_WORDS: &[&str] = &["quit", "exit", "quitter"];

/// Arguments for the chat command
#[derive(Args, Debug)]
pub struct ChatArgs {
    /// Answer from intents and the knowledge base only
    #[arg(long)]
    pub no_documents: bool,
}

/// Whether an input line ends the conversation
pub fn is_exit(line: &str) -> bool {
    let line = line.trim();
    EXIT_WORDS.iter().any(|w| line.eq_ignore_ascii_case(w))
}

/// Execute the chat command
pub async fn execute(
    args: ChatArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    if !args.no_documents {
        load_corpus(services, format)?;
    }

    if format == OutputFormat::Human {
        println!(
            "{} {}",
            colors::label("ColepsBot"),
            colors::dim("(quit or exit to leave)")
        );
    }

    let stdin = BufReader::new(tokio::io::stdin());
    let asked = converse(stdin, services, format).await?;

    if format == OutputFormat::Human {
        println!("{}", colors::dim(&format!("{asked} question(s) answered")));
    }
    Ok(())
}

/// Answer every line from `input` until EOF or an exit word.
///
/// Returns the number of questions answered.
pub async fn converse<R: AsyncBufRead + Unpin>(
    input: R,
    services: &Services,
    format: OutputFormat,
) -> Result<usize, Box<dyn std::error::Error>> {
    let mut lines = input.lines();
    let mut asked = 0;

    loop {
        if format == OutputFormat::Human {
            print!("{} ", colors::label("Vous:"));
            std::io::stdout().flush()?;
        }

        let line = match lines.next_line().await? {
            Some(line) => line,
            None => break,
        };
        if is_exit(&line) {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        let answer = services.chatbot.resolve(&line);
        print_answer(&answer, format)?;
        asked += 1;
    }

    Ok(asked)
}
