//! Document retrieval.
//!
//! TF-IDF dot-product search over the live index snapshot, plus the
//! title hints offered when a vague query finds nothing.

mod similarity;
mod vague;

pub use similarity::{SimilaritySearch, DEFAULT_RELEVANCE_FLOOR};
pub use vague::{
    collect_titles, is_vague, titles_reply, TitleSource, DEFAULT_VAGUE_MAX_TOKENS, TITLES_PREFIX,
};
