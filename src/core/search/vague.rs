//! Navigation hints for vague queries.
//!
//! When document search finds nothing for a short or unspecific
//! question, the section titles of the ingested documents are offered
//! instead so the user can rephrase.

use crate::core::indexer::Document;
use crate::core::text::NormalizedText;
use std::collections::HashSet;

/// Default token count at or below which a query is vague.
pub const DEFAULT_VAGUE_MAX_TOKENS: usize = 3;

/// Tokens of this many characters or fewer carry no specificity.
const SPECIFIC_TOKEN_CHARS: usize = 3;

/// Prefix of the titles reply.
pub const TITLES_PREFIX: &str = "Veuillez orienter vos recherches en fonction des points suivants:";

/// Supplies section titles for an ingested document.
pub trait TitleSource: Send + Sync {
    /// Titles of `document_id` in document order. Unknown documents
    /// and formats without structure yield nothing.
    fn extract_titles(&self, document_id: &str) -> Vec<String>;
}

/// Short, or made only of short words.
pub fn is_vague(query: &NormalizedText, max_tokens: usize) -> bool {
    let tokens: Vec<&str> = query.tokens().collect();
    if tokens.is_empty() {
        return false;
    }
    tokens.len() <= max_tokens
        || tokens
            .iter()
            .all(|t| t.chars().count() <= SPECIFIC_TOKEN_CHARS)
}

/// Distinct titles across `documents`, first occurrence kept.
pub fn collect_titles(source: &dyn TitleSource, documents: &[Document]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut titles = Vec::new();
    for document in documents {
        for title in source.extract_titles(&document.id) {
            let title = title.trim().to_string();
            if !title.is_empty() && seen.insert(title.clone()) {
                titles.push(title);
            }
        }
    }
    titles
}

/// Reply listing `titles` as bullet points.
pub fn titles_reply(titles: &[String]) -> String {
    format!("{}\n- {}", TITLES_PREFIX, titles.join("\n- "))
}
