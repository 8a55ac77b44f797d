//! Ask command - answer one question

use crate::cli::commands::documents::load_corpus;
use crate::cli::output::{self, colors};
use crate::cli::OutputFormat;
use crate::core::services::Services;
use crate::core::types::Answer;
use clap::Args;
use std::sync::Arc;

/// Arguments for the ask command
#[derive(Args, Debug)]
pub struct AskArgs {
    /// Question to answer
    #[arg(required = true, num_args = 1..)]
    pub question: Vec<String>,

    /// Answer from intents and the knowledge base only
    #[arg(long)]
    pub no_documents: bool,
}

impl AskArgs {
    pub fn question(&self) -> String {
        self.question.join(" ")
    }
}

/// Execute the ask command
pub async fn execute(
    args: AskArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let question = args.question();
    if question.trim().is_empty() {
        return Err("Question cannot be empty".into());
    }

    if !args.no_documents {
        load_corpus(services, format)?;
    }

    let answer = services.chatbot.resolve(&question);
    print_answer(&answer, format)?;
    Ok(())
}

/// Print an answer in the requested format
pub fn print_answer(answer: &Answer, format: OutputFormat) -> Result<(), serde_json::Error> {
    match format {
        OutputFormat::Human => {
            let response = if answer.is_fallback() {
                colors::warning(&answer.response)
            } else {
                colors::answer(&answer.response)
            };
            println!("{response}");
            println!(
                "{}",
                colors::dim(&format!(
                    "({}, confidence {})",
                    answer.source.as_str(),
                    output::format_confidence(answer.confidence)
                ))
            );
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(answer)?);
        }
    }
    Ok(())
}
