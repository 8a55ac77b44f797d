//! Text canonicalization and fuzzy comparison.
//!
//! - **normalize**: canonical comparison form ([`NormalizedText`])
//! - **lemma**: optional lemmatization pass
//! - **similarity**: character-level similarity ratio

pub mod lemma;
pub mod normalize;
pub mod similarity;

pub use lemma::{LemmaTable, Lemmatizer};
pub use normalize::{normalize, NormalizedText};
pub use similarity::similarity_ratio;
