//! Intent catalog and knowledge base loading.
//!
//! The catalog file is JSON:
//!
//! ```json
//! {
//!   "intents": {"saluer": ["bonjour", "salut"], "remercier": ["merci"]},
//!   "knowledge_base": {"Heures d'ouverture": "9h-18h"},
//!   "responses": {"meteo": ["Je ne connais pas la météo."]}
//! }
//! ```
//!
//! Built-in intents take their triggers from `intents` by name.
//! Other names declared in `intents` become custom intents, appended
//! after the built-ins in file order, and need a `responses` entry.

use crate::core::error::{ColepsError, Result};
use crate::core::knowledge::base::KnowledgeBase;
use crate::core::knowledge::intent::{
    builtin_intents, current_time_reply, Intent, IntentReply, ResponseChooser,
};
use crate::core::text::NormalizedText;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// A matched intent and its reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntentMatch {
    pub intent: String,
    pub reply: String,
}

/// Ordered intents; the first match is authoritative.
#[derive(Debug, Clone)]
pub struct IntentCatalog {
    intents: Vec<Intent>,
}

impl Default for IntentCatalog {
    /// Built-in intents without triggers; nothing matches.
    fn default() -> Self {
        Self {
            intents: builtin_intents(),
        }
    }
}

impl IntentCatalog {
    pub fn from_intents(intents: Vec<Intent>) -> Self {
        Self { intents }
    }

    pub fn intents(&self) -> &[Intent] {
        &self.intents
    }

    pub fn get(&self, name: &str) -> Option<&Intent> {
        self.intents.iter().find(|i| i.name == name)
    }

    /// Set the triggers of a named intent. Returns false if unknown.
    pub fn set_triggers(&mut self, name: &str, triggers: &[&str]) -> bool {
        match self.intents.iter_mut().find(|i| i.name == name) {
            Some(intent) => {
                intent.set_triggers(triggers.iter().copied());
                true
            }
            None => false,
        }
    }

    /// First intent in catalog order with a trigger inside `message`.
    pub fn match_intent(
        &self,
        message: &NormalizedText,
        chooser: &dyn ResponseChooser,
    ) -> Option<IntentMatch> {
        let intent = self.intents.iter().find(|i| i.matches(message))?;
        let reply = match &intent.reply {
            IntentReply::CurrentTime => current_time_reply(),
            IntentReply::Responses(responses) if responses.is_empty() => return None,
            IntentReply::Responses(responses) => {
                let idx = chooser.choose(responses.len()).min(responses.len() - 1);
                responses[idx].clone()
            }
        };

        Some(IntentMatch {
            intent: intent.name.clone(),
            reply,
        })
    }
}

/// Everything loaded from the catalog file.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub intents: IntentCatalog,
    pub knowledge: KnowledgeBase,
}

#[derive(Debug, Deserialize)]
struct RawCatalog {
    #[serde(default)]
    intents: Value,
    #[serde(default)]
    knowledge_base: Map<String, Value>,
    #[serde(default)]
    responses: Map<String, Value>,
}

fn string_list(value: &Value) -> Vec<&str> {
    match value {
        Value::Array(items) => items.iter().filter_map(Value::as_str).collect(),
        Value::String(s) => vec![s.as_str()],
        _ => Vec::new(),
    }
}

impl Catalog {
    /// Parse a catalog from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: RawCatalog = serde_json::from_str(json)?;
        let mut intents = IntentCatalog::default();

        let declared = match &raw.intents {
            Value::Object(map) => map.clone(),
            // Older catalogs store an empty list
            Value::Array(items) if items.is_empty() => Map::new(),
            Value::Null => Map::new(),
            other => {
                return Err(ColepsError::CatalogError(format!(
                    "'intents' must be an object, found {other}"
                )))
            }
        };

        for (name, phrases) in &declared {
            let triggers = string_list(phrases);
            if intents.set_triggers(name, &triggers) {
                continue;
            }

            let replies: Vec<String> = raw
                .responses
                .get(name)
                .map(|v| string_list(v).into_iter().map(str::to_string).collect())
                .unwrap_or_default();
            if replies.is_empty() {
                tracing::warn!("Intent '{}' has no responses, skipping", name);
                continue;
            }
            intents
                .intents
                .push(Intent::new(name.as_str(), &triggers, IntentReply::Responses(replies)));
        }

        for (name, value) in &raw.responses {
            let replies: Vec<String> = string_list(value).into_iter().map(str::to_string).collect();
            if let Some(intent) = intents.intents.iter_mut().find(|i| &i.name == name) {
                if matches!(intent.reply, IntentReply::Responses(_)) && !replies.is_empty() {
                    intent.reply = IntentReply::Responses(replies);
                }
            }
        }

        let mut knowledge = KnowledgeBase::new();
        for (question, answer) in &raw.knowledge_base {
            match answer {
                Value::String(answer) => knowledge.insert(question, answer.as_str()),
                other => {
                    tracing::warn!("Answer for '{}' is not a string: {}", question, other);
                }
            }
        }

        Ok(Self { intents, knowledge })
    }

    /// Load a catalog file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            ColepsError::CatalogError(format!("Failed to read catalog {path:?}: {e}"))
        })?;
        Self::from_json_str(&contents)
    }

    /// Load a catalog file, substituting an empty catalog when it is
    /// missing or malformed.
    pub fn load_or_empty(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::from_file(path) {
            Ok(catalog) => {
                tracing::info!(
                    "Catalog loaded from {:?}: {} intents, {} knowledge base entries",
                    path,
                    catalog.intents.intents().len(),
                    catalog.knowledge.len()
                );
                catalog
            }
            Err(e) => {
                tracing::warn!("Using empty catalog: {}", e);
                Self::default()
            }
        }
    }
}
