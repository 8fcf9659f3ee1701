//! Dialogue engine — interprets each incoming message against the
//! session's current stage.
//!
//! Data-collection stages (name, email, phone) advance the stage directly;
//! free-form stages delegate to the intent router. The demo/trial intent is
//! the one routing outcome that changes the stage.

use std::collections::HashMap;
use std::sync::Arc;

use regex::Regex;
use tracing::{debug, info};

use crate::error::Result;
use crate::intent::{self, Intent, IntentRouter};
use crate::knowledge::KnowledgeBase;
use crate::response::Response;

use super::replies;
use super::session::{Session, SessionStore};
use super::stage::Stage;

/// Messages that end a completed conversation (exact match, normalized).
const END_KEYWORDS: [&str; 4] = ["end", "end chat", "goodbye", "bye"];

/// Drives the per-session state machine and owns the read-only pieces it
/// consults: the intent router and the knowledge base. The session store is
/// injected by the serving component.
pub struct DialogueEngine {
    store: Arc<SessionStore>,
    router: IntentRouter,
    knowledge: KnowledgeBase,
    /// local part "@" domain "." 2+-letter TLD
    email_re: Regex,
}

impl DialogueEngine {
    pub fn new(store: Arc<SessionStore>) -> Self {
        Self {
            store,
            router: IntentRouter::new(),
            knowledge: KnowledgeBase::new(),
            email_re: Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap(),
        }
    }

    /// Process one incoming message for a session and produce the reply.
    ///
    /// The session is locked for the whole call, so concurrent requests for
    /// the same id are serialized and each request's mutation is atomic.
    pub async fn respond(
        &self,
        message: &str,
        session_id: &str,
        user_data: Option<HashMap<String, String>>,
    ) -> Result<Response> {
        let entry = self.store.get_or_create(session_id).await;
        let mut session = entry.lock().await;

        if let Some(data) = user_data {
            session.merge_user_data(data);
        }
        session.record(message);

        let normalized = message.trim().to_lowercase();
        debug!(session_id = %session.id, stage = %session.stage, "processing message");

        let response = match session.stage {
            Stage::Greeting => {
                if intent::is_greeting(&normalized) {
                    advance(&mut session, Stage::AskName);
                    replies::name_prompt()
                } else {
                    // The user jumped straight to a question.
                    self.handle_query(&mut session, &normalized)
                }
            }

            Stage::AskName => {
                if normalized.is_empty() {
                    replies::name_prompt()
                } else {
                    session
                        .user_data
                        .insert("name".to_string(), message.to_string());
                    advance(&mut session, Stage::AskHelp);
                    replies::greet_by_name(message)
                }
            }

            Stage::AskHelp => self.handle_query(&mut session, &normalized),

            Stage::CollectEmail => {
                if self.email_re.is_match(message) {
                    session
                        .user_data
                        .insert("email".to_string(), message.to_string());
                    advance(&mut session, Stage::CollectPhone);
                    replies::phone_prompt()
                } else {
                    debug!(session_id = %session.id, "rejected malformed email");
                    replies::invalid_email()
                }
            }

            Stage::CollectPhone => {
                let phone = if normalized == "skip" {
                    "Not provided".to_string()
                } else {
                    message.to_string()
                };
                session.user_data.insert("phone".to_string(), phone);
                advance(&mut session, Stage::Complete);
                info!(session_id = %session.id, "contact details collected");

                let name = session.user_data.get("name").map(String::as_str);
                let email = session.user_data.get("email").cloned().unwrap_or_default();
                let phone = session.user_data.get("phone").cloned().unwrap_or_default();
                replies::summary(name, &email, &phone)
            }

            Stage::Complete => {
                if END_KEYWORDS.contains(&normalized.as_str()) {
                    let id = session.id.clone();
                    drop(session);
                    self.store.reset(&id).await;
                    return Ok(replies::farewell());
                }
                advance(&mut session, Stage::AskHelp);
                self.handle_query(&mut session, &normalized)
            }
        };

        Ok(response)
    }

    /// Free-form handling: route the message to a topic and build the reply.
    ///
    /// The demo/trial intent pulls the conversation into the email
    /// collection flow; every other intent leaves the stage untouched.
    fn handle_query(&self, session: &mut Session, normalized: &str) -> Response {
        match self.router.route(normalized) {
            Some(Intent::DemoRequest) => {
                advance(session, Stage::CollectEmail);
                replies::for_intent(Intent::DemoRequest, &self.knowledge)
            }
            Some(intent) => replies::for_intent(intent, &self.knowledge),
            None => replies::fallback(),
        }
    }
}

/// Move a session to `next`.
fn advance(session: &mut Session, next: Stage) {
    debug_assert!(
        session.stage.can_transition_to(next),
        "invalid stage transition {} -> {}",
        session.stage,
        next
    );
    debug!(session_id = %session.id, from = %session.stage, to = %next, "stage transition");
    session.stage = next;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::ResponseKind;

    fn setup() -> (DialogueEngine, Arc<SessionStore>) {
        let store = SessionStore::new();
        (DialogueEngine::new(Arc::clone(&store)), store)
    }

    async fn stage_of(store: &SessionStore, id: &str) -> Stage {
        store.get_or_create(id).await.lock().await.stage
    }

    async fn user_datum(store: &SessionStore, id: &str, key: &str) -> Option<String> {
        store
            .get_or_create(id)
            .await
            .lock()
            .await
            .user_data
            .get(key)
            .cloned()
    }

    /// Walk a session to the CollectEmail stage via the demo intent.
    async fn walk_to_collect_email(engine: &DialogueEngine, id: &str) {
        engine.respond("hello", id, None).await.unwrap();
        engine.respond("Maria", id, None).await.unwrap();
        engine.respond("i want a demo", id, None).await.unwrap();
    }

    #[tokio::test]
    async fn greeting_advances_to_ask_name_regardless_of_case() {
        for (i, greeting) in ["hello", "Hi there", "HELLO", "Good Morning"].iter().enumerate() {
            let (engine, store) = setup();
            let id = format!("s{i}");

            let response = engine.respond(greeting, &id, None).await.unwrap();
            assert_eq!(response.kind, ResponseKind::Text);
            assert!(response.message.contains("What's your name?"));
            assert_eq!(stage_of(&store, &id).await, Stage::AskName);
        }
    }

    #[tokio::test]
    async fn greeting_stage_question_is_routed_without_advancing() {
        let (engine, store) = setup();

        let response = engine
            .respond("how much does it cost", "s1", None)
            .await
            .unwrap();
        assert_eq!(response.kind, ResponseKind::Buttons);
        assert!(response.message.contains("$29/month"));
        assert_eq!(stage_of(&store, "s1").await, Stage::Greeting);
    }

    #[tokio::test]
    async fn greeting_stage_demo_request_jumps_to_collect_email() {
        let (engine, store) = setup();

        let response = engine.respond("can i get a trial", "s1", None).await.unwrap();
        assert!(response.message.contains("What's your email address?"));
        assert_eq!(stage_of(&store, "s1").await, Stage::CollectEmail);
    }

    #[tokio::test]
    async fn ask_name_stores_the_raw_text() {
        let (engine, store) = setup();
        engine.respond("hello", "s1", None).await.unwrap();

        let response = engine.respond("Maria", "s1", None).await.unwrap();
        assert_eq!(response.kind, ResponseKind::Buttons);
        assert_eq!(response.options.as_ref().unwrap().len(), 4);
        assert!(response.message.contains("Nice to meet you, Maria!"));
        assert_eq!(user_datum(&store, "s1", "name").await.as_deref(), Some("Maria"));
        assert_eq!(stage_of(&store, "s1").await, Stage::AskHelp);
    }

    #[tokio::test]
    async fn ask_name_holds_on_blank_input() {
        let (engine, store) = setup();
        engine.respond("hello", "s1", None).await.unwrap();

        let response = engine.respond("   ", "s1", None).await.unwrap();
        assert!(response.message.contains("What's your name?"));
        assert_eq!(stage_of(&store, "s1").await, Stage::AskName);
        assert_eq!(user_datum(&store, "s1", "name").await, None);
    }

    #[tokio::test]
    async fn email_validation_accepts_and_rejects() {
        let (engine, store) = setup();
        walk_to_collect_email(&engine, "s1").await;

        for bad in ["not-an-email", "user@com", "user at example.com"] {
            let response = engine.respond(bad, "s1", None).await.unwrap();
            assert!(response.message.contains("valid email"), "{bad} should be rejected");
            assert_eq!(stage_of(&store, "s1").await, Stage::CollectEmail);
        }

        let response = engine.respond("user@example.com", "s1", None).await.unwrap();
        assert!(response.message.contains("phone number"));
        assert_eq!(
            user_datum(&store, "s1", "email").await.as_deref(),
            Some("user@example.com")
        );
        assert_eq!(stage_of(&store, "s1").await, Stage::CollectPhone);
    }

    #[tokio::test]
    async fn phone_skip_is_case_insensitive() {
        let (engine, store) = setup();
        walk_to_collect_email(&engine, "s1").await;
        engine.respond("maria@x.com", "s1", None).await.unwrap();

        let response = engine.respond("SKIP", "s1", None).await.unwrap();
        assert_eq!(
            user_datum(&store, "s1", "phone").await.as_deref(),
            Some("Not provided")
        );
        assert_eq!(stage_of(&store, "s1").await, Stage::Complete);
        assert!(response.message.contains("• Phone: Not provided"));
    }

    #[tokio::test]
    async fn phone_is_stored_verbatim() {
        let (engine, store) = setup();
        walk_to_collect_email(&engine, "s1").await;
        engine.respond("maria@x.com", "s1", None).await.unwrap();

        let response = engine.respond("+1 555 0100", "s1", None).await.unwrap();
        assert_eq!(
            user_datum(&store, "s1", "phone").await.as_deref(),
            Some("+1 555 0100")
        );
        assert!(response.message.contains("• Phone: +1 555 0100"));
    }

    #[tokio::test]
    async fn summary_interpolates_collected_data() {
        let (engine, _store) = setup();
        walk_to_collect_email(&engine, "s1").await;
        engine.respond("maria@x.com", "s1", None).await.unwrap();

        let response = engine.respond("skip", "s1", None).await.unwrap();
        assert!(response.message.contains("Maria"));
        assert!(response.message.contains("maria@x.com"));
        assert!(response.message.contains("Not provided"));
    }

    #[tokio::test]
    async fn complete_end_keyword_deletes_the_session() {
        let (engine, store) = setup();
        walk_to_collect_email(&engine, "s1").await;
        engine.respond("maria@x.com", "s1", None).await.unwrap();
        engine.respond("skip", "s1", None).await.unwrap();

        let response = engine.respond("bye", "s1", None).await.unwrap();
        assert_eq!(response.kind, ResponseKind::Text);
        assert!(response.message.contains("Have a great day!"));
        assert!(store.is_empty().await);

        // The next message behaves as a brand-new session.
        let response = engine.respond("hello", "s1", None).await.unwrap();
        assert!(response.message.contains("What's your name?"));
    }

    #[tokio::test]
    async fn complete_follow_up_question_returns_to_ask_help() {
        let (engine, store) = setup();
        walk_to_collect_email(&engine, "s1").await;
        engine.respond("maria@x.com", "s1", None).await.unwrap();
        engine.respond("skip", "s1", None).await.unwrap();

        let response = engine
            .respond("tell me about integrations", "s1", None)
            .await
            .unwrap();
        assert!(response.message.contains("Slack"));
        assert_eq!(stage_of(&store, "s1").await, Stage::AskHelp);
    }

    #[tokio::test]
    async fn merged_user_data_accumulates() {
        let (engine, store) = setup();

        let data = HashMap::from([("plan".to_string(), "enterprise".to_string())]);
        engine.respond("hello", "s1", Some(data)).await.unwrap();
        engine.respond("Maria", "s1", None).await.unwrap();

        assert_eq!(
            user_datum(&store, "s1", "plan").await.as_deref(),
            Some("enterprise")
        );
        assert_eq!(user_datum(&store, "s1", "name").await.as_deref(), Some("Maria"));
    }

    #[tokio::test]
    async fn history_preserves_every_message_in_order() {
        let (engine, store) = setup();
        engine.respond("hello", "s1", None).await.unwrap();
        engine.respond("Maria", "s1", None).await.unwrap();
        engine.respond("pricing?", "s1", None).await.unwrap();

        let entry = store.get_or_create("s1").await;
        let session = entry.lock().await;
        let messages: Vec<&str> = session.history.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, ["hello", "Maria", "pricing?"]);
    }

    #[tokio::test]
    async fn unmatched_message_gets_the_fallback_menu() {
        let (engine, _store) = setup();
        engine.respond("hello", "s1", None).await.unwrap();
        engine.respond("Maria", "s1", None).await.unwrap();

        let response = engine.respond("xyzzy", "s1", None).await.unwrap();
        assert!(response.message.contains("not sure I understand"));
        assert_eq!(response.options.as_ref().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn end_to_end_lead_capture() {
        let (engine, store) = setup();

        let r1 = engine.respond("hello", "e2e", None).await.unwrap();
        assert_eq!(r1.kind, ResponseKind::Text);
        assert_eq!(stage_of(&store, "e2e").await, Stage::AskName);

        let r2 = engine.respond("Maria", "e2e", None).await.unwrap();
        assert_eq!(r2.kind, ResponseKind::Buttons);
        assert_eq!(r2.options.as_ref().unwrap().len(), 4);
        assert_eq!(stage_of(&store, "e2e").await, Stage::AskHelp);

        engine.respond("I want a demo", "e2e", None).await.unwrap();
        assert_eq!(stage_of(&store, "e2e").await, Stage::CollectEmail);

        engine.respond("maria@x.com", "e2e", None).await.unwrap();
        assert_eq!(stage_of(&store, "e2e").await, Stage::CollectPhone);

        let r5 = engine.respond("skip", "e2e", None).await.unwrap();
        assert_eq!(stage_of(&store, "e2e").await, Stage::Complete);
        assert!(r5.message.contains("Maria"));
        assert!(r5.message.contains("maria@x.com"));
        assert!(r5.message.contains("Not provided"));

        let r6 = engine.respond("bye", "e2e", None).await.unwrap();
        assert!(r6.message.contains("Thank you for chatting with us!"));
        assert!(store.is_empty().await);
    }
}
