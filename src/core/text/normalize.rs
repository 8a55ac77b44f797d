//! Text canonicalization.
//!
//! Every comparison the resolver makes (intent triggers, knowledge
//! base keys, fuzzy matching) goes through [`normalize`], so the
//! canonical form lives in its own type: [`NormalizedText`] can only
//! be produced here, which keeps raw user input from being compared
//! against canonical keys by accident.
//!
//! # Example
//!
//! ```
//! use colepsbot::core::text::normalize;
//!
//! let text = normalize("  Étude   de CAS !  ");
//! assert_eq!(text.as_str(), "etude de cas");
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Serializer};
use std::fmt;
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

// Elision apostrophes separate words ("d'ouverture" -> "d ouverture").
static APOSTROPHE: Lazy<Regex> = Lazy::new(|| Regex::new(r"['\u{2019}\u{02BC}]").unwrap());

static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s]").unwrap());

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Lowercase, accent-free, punctuation-free, whitespace-collapsed text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct NormalizedText(String);

impl NormalizedText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whitespace-separated tokens.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.0.split(' ').filter(|t| !t.is_empty())
    }

    /// Substring containment against another canonical string.
    pub fn contains(&self, needle: &NormalizedText) -> bool {
        self.0.contains(needle.as_str())
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for NormalizedText {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// Canonicalize raw text for comparison.
///
/// Steps, in order: lowercase, NFD decomposition with combining marks
/// removed, elision apostrophes turned into spaces, strip everything
/// that is neither a word character nor whitespace, collapse
/// whitespace runs, trim. Idempotent.
pub fn normalize(text: &str) -> NormalizedText {
    let lowered = text.to_lowercase();
    let stripped: String = lowered.nfd().filter(|c| !is_combining_mark(*c)).collect();
    let split = APOSTROPHE.replace_all(&stripped, " ");
    let no_punct = NON_WORD.replace_all(&split, "");
    let collapsed = WHITESPACE_RUN.replace_all(&no_punct, " ");
    NormalizedText(collapsed.trim().to_string())
}
