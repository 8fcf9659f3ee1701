//! Canned informational answers, keyed by topic.

/// Topics the knowledge base can answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    Pricing,
    Features,
    Support,
    Integration,
    Trial,
    Demo,
}

/// Immutable topic → canned-text lookup. Never mutated after initialization;
/// consumed read-only by the intent router and the reply builders.
#[derive(Debug, Clone, Copy, Default)]
pub struct KnowledgeBase;

impl KnowledgeBase {
    pub fn new() -> Self {
        Self
    }

    /// Canned informational text for a topic.
    pub fn article(&self, topic: Topic) -> &'static str {
        match topic {
            Topic::Pricing => {
                "Our pricing starts at $29/month for the basic plan, $79/month for professional, and $199/month for enterprise."
            }
            Topic::Features => {
                "We offer AI-powered responses, multi-channel support, analytics dashboard, custom branding, and 24/7 availability."
            }
            Topic::Support => {
                "Our support team is available 24/7 via chat, email, and phone. Enterprise customers get dedicated account managers."
            }
            Topic::Integration => {
                "We integrate with Slack, Zendesk, Salesforce, HubSpot, and many more platforms via our API."
            }
            Topic::Trial => {
                "Yes! We offer a 14-day free trial with full access to all features. No credit card required."
            }
            Topic::Demo => {
                "I'd be happy to schedule a demo! Please provide your email and our team will reach out within 24 hours."
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_topic_has_an_article() {
        let kb = KnowledgeBase::new();
        let topics = [
            Topic::Pricing,
            Topic::Features,
            Topic::Support,
            Topic::Integration,
            Topic::Trial,
            Topic::Demo,
        ];
        for topic in topics {
            assert!(!kb.article(topic).is_empty(), "{topic:?} should have text");
        }
    }

    #[test]
    fn articles_cover_expected_facts() {
        let kb = KnowledgeBase::new();
        assert!(kb.article(Topic::Pricing).contains("$29/month"));
        assert!(kb.article(Topic::Features).contains("analytics dashboard"));
        assert!(kb.article(Topic::Support).contains("24/7"));
        assert!(kb.article(Topic::Integration).contains("Slack"));
        assert!(kb.article(Topic::Trial).contains("14-day free trial"));
        assert!(kb.article(Topic::Demo).contains("schedule a demo"));
    }
}
