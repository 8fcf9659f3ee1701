//! Dialogue stage machine — tracks where a conversation currently stands.

use serde::{Deserialize, Serialize};

/// The stages of a conversation.
///
/// The main line runs Greeting → AskName → AskHelp → CollectEmail →
/// CollectPhone → Complete, but the graph is not strictly linear: a
/// free-form stage can jump into the email collection flow when the
/// demo/trial intent fires, and a completed conversation drops back to
/// AskHelp for follow-up questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Greeting,
    AskName,
    AskHelp,
    CollectEmail,
    CollectPhone,
    Complete,
}

impl Stage {
    /// Check if a transition from `self` to `target` is part of the
    /// dialogue graph.
    pub fn can_transition_to(&self, target: Stage) -> bool {
        use Stage::*;
        matches!(
            (self, target),
            (Greeting, AskName)
                | (Greeting, CollectEmail)
                | (AskName, AskHelp)
                | (AskHelp, CollectEmail)
                | (CollectEmail, CollectPhone)
                | (CollectPhone, Complete)
                | (Complete, AskHelp)
        )
    }

    /// Whether the guided flow has run to completion in this stage.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete)
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::Greeting
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Greeting => "greeting",
            Self::AskName => "ask_name",
            Self::AskHelp => "ask_help",
            Self::CollectEmail => "collect_email",
            Self::CollectPhone => "collect_phone",
            Self::Complete => "complete",
        };
        write!(f, "{s}")
    }
}
