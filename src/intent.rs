//! Keyword rules for routing free text to a topic.
//!
//! Runs whenever the dialogue engine has no data-collection flow in progress.
//! Rules are evaluated in a fixed priority order and the first keyword hit
//! wins. Keyword sets overlap (a message can mention both pricing and
//! support), so the order is load-bearing: it resolves ambiguity
//! deterministically instead of scoring.

use tracing::debug;

/// Greeting keywords, matched as substrings of the normalized message.
///
/// Shared between the greeting-stage check and the router's first rule.
pub const GREETING_KEYWORDS: [&str; 7] = [
    "hi",
    "hello",
    "hey",
    "greetings",
    "good morning",
    "good afternoon",
    "good evening",
];

/// Whether a normalized message reads as a greeting.
pub fn is_greeting(message: &str) -> bool {
    GREETING_KEYWORDS.iter().any(|kw| message.contains(kw))
}

/// A topic inferred from free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Greeting,
    Pricing,
    Features,
    Support,
    Integration,
    /// The one intent with a stage side effect: the engine pulls the
    /// conversation into the email collection flow when this fires.
    DemoRequest,
    Thanks,
    Goodbye,
}

/// A single routing rule: the intent it names plus the substrings that
/// trigger it.
#[derive(Debug, Clone)]
struct IntentRule {
    intent: Intent,
    keywords: &'static [&'static str],
}

/// First-match-wins keyword router.
pub struct IntentRouter {
    rules: Vec<IntentRule>,
}

impl IntentRouter {
    /// Create a router with the default rule list, in priority order.
    pub fn new() -> Self {
        let rules = vec![
            IntentRule {
                intent: Intent::Greeting,
                keywords: &GREETING_KEYWORDS,
            },
            IntentRule {
                intent: Intent::Pricing,
                keywords: &["pricing", "price", "cost", "plan"],
            },
            IntentRule {
                intent: Intent::Features,
                keywords: &["feature", "product", "offer", "what do you"],
            },
            IntentRule {
                intent: Intent::Support,
                keywords: &["support", "help", "contact", "reach"],
            },
            IntentRule {
                intent: Intent::Integration,
                keywords: &["integration", "integrate", "api", "connect"],
            },
            IntentRule {
                intent: Intent::DemoRequest,
                keywords: &["demo", "trial", "try", "test"],
            },
            IntentRule {
                intent: Intent::Thanks,
                keywords: &["thank", "thanks", "appreciate"],
            },
            IntentRule {
                intent: Intent::Goodbye,
                keywords: &["bye", "goodbye", "end", "quit", "exit"],
            },
        ];

        Self { rules }
    }

    /// Route a normalized (trimmed, lowercased) message to an intent.
    ///
    /// Returns `None` when no rule matches; callers fall back to the default
    /// topic menu. No rule after the first hit is considered, even if its
    /// keywords also match.
    pub fn route(&self, message: &str) -> Option<Intent> {
        for rule in &self.rules {
            if rule.keywords.iter().any(|kw| message.contains(kw)) {
                debug!(intent = ?rule.intent, "message matched intent rule");
                return Some(rule.intent);
            }
        }
        None
    }
}

impl Default for IntentRouter {
    fn default() -> Self {
        Self::new()
    }
}
