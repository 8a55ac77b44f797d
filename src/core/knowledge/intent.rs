//! Scripted conversational intents.
//!
//! Intents are tried in catalog order and the first one with a
//! trigger contained in the message wins; there is no scoring across
//! intents.

use crate::core::text::{normalize, NormalizedText};
use rand::Rng;

/// Picks one of `n` candidate responses.
pub trait ResponseChooser: Send + Sync {
    /// Return an index in `0..n`. Only called with `n > 0`.
    fn choose(&self, n: usize) -> usize;
}

/// Uniform random choice.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomChooser;

impl ResponseChooser for RandomChooser {
    fn choose(&self, n: usize) -> usize {
        rand::thread_rng().gen_range(0..n)
    }
}

/// Always the first candidate; makes responses deterministic.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstChooser;

impl ResponseChooser for FirstChooser {
    fn choose(&self, _n: usize) -> usize {
        0
    }
}

/// How an intent produces its reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentReply {
    /// One of a fixed set of responses.
    Responses(Vec<String>),
    /// The current local date and time.
    CurrentTime,
}

/// A named intent with its normalized triggers.
#[derive(Debug, Clone)]
pub struct Intent {
    pub name: String,
    pub triggers: Vec<NormalizedText>,
    pub reply: IntentReply,
}

impl Intent {
    pub fn new(name: impl Into<String>, triggers: &[&str], reply: IntentReply) -> Self {
        let mut intent = Self {
            name: name.into(),
            triggers: Vec::new(),
            reply,
        };
        intent.set_triggers(triggers.iter().copied());
        intent
    }

    /// Replace triggers, normalizing them and dropping empty ones.
    pub fn set_triggers<'a>(&mut self, triggers: impl IntoIterator<Item = &'a str>) {
        self.triggers.clear();
        for trigger in triggers {
            let trigger = normalize(trigger);
            if !trigger.is_empty() && !self.triggers.contains(&trigger) {
                self.triggers.push(trigger);
            }
        }
    }

    pub fn matches(&self, message: &NormalizedText) -> bool {
        self.triggers.iter().any(|t| message.contains(t))
    }
}

fn responses(items: &[&str]) -> IntentReply {
    IntentReply::Responses(items.iter().map(|s| s.to_string()).collect())
}

/// Intents whose replies are built in, in matching order.
///
/// None carries triggers; they come from the catalog file.
pub fn builtin_intents() -> Vec<Intent> {
    vec![
        Intent::new(
            "saluer",
            &[],
            responses(&[
                "Bonjour ! Que puis-je faire pour vous?",
                "Salut, comment puis-je vous aider?",
                "Bonjour, en quoi puis-je vous être utile?",
            ]),
        ),
        Intent::new(
            "comment_cv",
            &[],
            responses(&[
                "Je vais bien, merci. Et vous?",
                "Je suis toujours en forme pour vous aider.",
                "Tout va bien, prêt à vous assister.",
            ]),
        ),
        Intent::new("heure", &[], IntentReply::CurrentTime),
        Intent::new(
            "remercier",
            &[],
            responses(&[
                "Avec plaisir!",
                "Il n'y a pas de quoi.",
                "C'est un plaisir de vous aider.",
            ]),
        ),
        Intent::new(
            "aurevoir",
            &[],
            responses(&["À bientôt !", "Au revoir, à très vite."]),
        ),
        Intent::new(
            "capacites",
            &[],
            responses(&[
                "Je suis un assistant virtuel capable de vous aider à trouver des informations \
                 dans les documents que vous chargez. Vous pouvez me poser des questions et je \
                 chercherai les réponses dans ces documents.",
            ]),
        ),
        Intent::new(
            "bien_etre",
            &[],
            responses(&[
                "Je suis heureux de l'apprendre.",
                "Parfait! En quoi puis-je vous aider?",
            ]),
        ),
    ]
}

/// Format the reply of the time intent.
pub fn current_time_reply() -> String {
    format!(
        "Il est {}",
        chrono::Local::now().format("%d/%m/%Y, %H:%M:%S")
    )
}
