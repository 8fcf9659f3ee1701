//! Canned replies — the texts and option lists for every stage and topic.
//!
//! Pure formatting: the same inputs always produce the same response, aside
//! from the interpolated user data.

use crate::intent::Intent;
use crate::knowledge::{KnowledgeBase, Topic};
use crate::response::{Response, ResponseOption};

/// The four primary topic buttons offered alongside a greeting.
fn topic_menu() -> Vec<ResponseOption> {
    vec![
        ResponseOption::new("Product Info", "product"),
        ResponseOption::new("Pricing", "pricing"),
        ResponseOption::new("Schedule Demo", "demo"),
        ResponseOption::new("Support", "support"),
    ]
}

/// First reply of the guided flow: ask for the user's name.
pub fn name_prompt() -> Response {
    Response::text("Hello! 👋 I'm here to help you. What's your name?")
}

/// Greet a newly introduced user by name and offer the topic menu.
pub fn greet_by_name(name: &str) -> Response {
    Response::buttons(
        format!("Nice to meet you, {name}! 😊\n\nHow can I help you today?"),
        topic_menu(),
    )
}

/// Entry into the contact-collection flow: ask for an email address.
pub fn email_prompt() -> Response {
    Response::text("Excellent! I'd be happy to set that up for you. 🚀\n\nWhat's your email address?")
}

/// Re-prompt after a malformed email address.
pub fn invalid_email() -> Response {
    Response::text(
        "That doesn't look like a valid email. Could you please provide a valid email address?",
    )
}

/// Ask for a phone number, with a skip option.
pub fn phone_prompt() -> Response {
    Response::buttons(
        "Great! And what's the best phone number to reach you?",
        vec![ResponseOption::new("Skip", "skip")],
    )
}

/// Summarize the collected contact details, interpolated verbatim.
///
/// `name` is `None` when the user reached the contact flow without going
/// through the name stage.
pub fn summary(name: Option<&str>, email: &str, phone: &str) -> Response {
    let greeting_name = name.unwrap_or("there");
    let listed_name = name.unwrap_or("Not provided");
    Response::buttons(
        format!(
            "Thank you, {greeting_name}! 🎉\n\nI've collected your information:\n• Name: {listed_name}\n• Email: {email}\n• Phone: {phone}\n\nOur team will reach out to you shortly. Is there anything else I can help you with?"
        ),
        vec![
            ResponseOption::new("Ask Another Question", "question"),
            ResponseOption::new("End Chat", "end"),
        ],
    )
}

/// Farewell when a completed conversation is ended; the session is gone.
pub fn farewell() -> Response {
    Response::text("Thank you for chatting with us! Have a great day! 👋")
}

/// Fallback when no intent rule matched.
pub fn fallback() -> Response {
    Response::buttons(
        "I'm not sure I understand. Let me help you with some common topics:",
        vec![
            ResponseOption::new("Product Features", "product"),
            ResponseOption::new("Pricing Plans", "pricing"),
            ResponseOption::new("Schedule Demo", "demo"),
            ResponseOption::new("Contact Support", "support"),
        ],
    )
}

/// Build the reply for a routed intent.
///
/// The demo/trial intent gets the email prompt here, but the accompanying
/// stage transition belongs to the engine, not to this module.
pub fn for_intent(intent: Intent, kb: &KnowledgeBase) -> Response {
    match intent {
        Intent::Greeting => Response::buttons("Hello! How can I assist you today?", topic_menu()),
        Intent::Pricing => Response::buttons(
            format!(
                "{}\n\nWould you like to try our free trial?",
                kb.article(Topic::Pricing)
            ),
            vec![
                ResponseOption::new("Yes, start trial", "trial"),
                ResponseOption::new("Schedule demo", "demo"),
                ResponseOption::new("Ask something else", "question"),
            ],
        ),
        Intent::Features => Response::buttons(
            format!("{}\n\nWant to see it in action?", kb.article(Topic::Features)),
            vec![
                ResponseOption::new("Schedule Demo", "demo"),
                ResponseOption::new("Pricing Info", "pricing"),
                ResponseOption::new("Start Free Trial", "trial"),
            ],
        ),
        Intent::Support => Response::buttons(
            format!(
                "{}\n\nHow would you like to proceed?",
                kb.article(Topic::Support)
            ),
            vec![
                ResponseOption::new("Contact Support", "demo"),
                ResponseOption::new("FAQs", "faq"),
                ResponseOption::new("Ask Another Question", "question"),
            ],
        ),
        Intent::Integration => Response::buttons(
            format!("{}\n\nWant to learn more?", kb.article(Topic::Integration)),
            vec![
                ResponseOption::new("View Documentation", "docs"),
                ResponseOption::new("Schedule Demo", "demo"),
                ResponseOption::new("Ask Another Question", "question"),
            ],
        ),
        Intent::DemoRequest => email_prompt(),
        Intent::Thanks => Response::buttons(
            "You're welcome! Is there anything else I can help you with?",
            vec![
                ResponseOption::new("Yes", "yes"),
                ResponseOption::new("No, thanks", "end"),
            ],
        ),
        Intent::Goodbye => Response::text("Thank you for chatting! Have a wonderful day! 👋"),
    }
}
