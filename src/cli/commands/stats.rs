//! Stats command - most frequently asked knowledge base questions

use crate::cli::output::colors;
use crate::cli::OutputFormat;
use crate::core::services::Services;
use clap::Args;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Arguments for show-stats
#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Only show the N most asked questions
    #[arg(long, short = 'n')]
    pub top: Option<usize>,
}

/// One counted question
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct StatsItem {
    pub question: String,
    pub count: u64,
}

/// show-stats response
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub total_hits: u64,
    pub questions: Vec<StatsItem>,
}

/// Counters sorted by count (descending) then question.
pub fn ranked(counts: &BTreeMap<String, u64>, top: Option<usize>) -> Vec<StatsItem> {
    let mut items: Vec<StatsItem> = counts
        .iter()
        .map(|(question, &count)| StatsItem {
            question: question.clone(),
            count,
        })
        .collect();
    // BTreeMap order already sorts by question; the sort is stable
    items.sort_by(|a, b| b.count.cmp(&a.count));
    if let Some(top) = top {
        items.truncate(top);
    }
    items
}

/// Execute show-stats
pub async fn execute(
    args: StatsArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let counts = services.chatbot.statistics_snapshot();
    let response = StatsResponse {
        total_hits: counts.values().sum(),
        questions: ranked(&counts, args.top),
    };

    match format {
        OutputFormat::Human => {
            if response.questions.is_empty() {
                println!("No knowledge base questions answered yet.");
            } else {
                println!(
                    "{} ({} hits):",
                    colors::label("Most asked questions"),
                    colors::number(&response.total_hits.to_string())
                );
                for (rank, item) in response.questions.iter().enumerate() {
                    println!(
                        "  [{}] {:>5}  {}",
                        colors::rank(&(rank + 1).to_string()),
                        colors::number(&item.count.to_string()),
                        item.question
                    );
                }
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
