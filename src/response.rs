//! Response wire model — the structured reply unit returned to the caller.

use serde::{Deserialize, Serialize};

/// Whether a response is plain text or carries selectable options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseKind {
    Text,
    Buttons,
}

/// One selectable follow-up option presented to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseOption {
    pub label: String,
    pub value: String,
}

impl ResponseOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// A structured reply: display text, a type tag, and an ordered option list.
///
/// `options` is `null` on the wire for plain text responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub message: String,
    #[serde(rename = "type")]
    pub kind: ResponseKind,
    pub options: Option<Vec<ResponseOption>>,
}

impl Response {
    /// A plain text response with no options.
    pub fn text(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ResponseKind::Text,
            options: None,
        }
    }

    /// A response with selectable options, in the order given.
    pub fn buttons(message: impl Into<String>, options: Vec<ResponseOption>) -> Self {
        Self {
            message: message.into(),
            kind: ResponseKind::Buttons,
            options: Some(options),
        }
    }
}
