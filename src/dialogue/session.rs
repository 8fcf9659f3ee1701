//! Session records and the process-wide session store.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

use super::stage::Stage;

/// One message as it arrived, with its arrival time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Per-conversation mutable record, keyed by an external identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub stage: Stage,
    /// Collected user data (name, email, phone). Keys accumulate; a merge
    /// never removes previously set keys.
    pub user_data: HashMap<String, String>,
    /// Append-only message log, insertion order = arrival order.
    pub history: Vec<HistoryEntry>,
}

impl Session {
    /// A fresh session at the start of the dialogue.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            stage: Stage::Greeting,
            user_data: HashMap::new(),
            history: Vec::new(),
        }
    }

    /// Merge caller-supplied user data. Existing keys are overwritten,
    /// never removed.
    pub fn merge_user_data(&mut self, data: HashMap<String, String>) {
        self.user_data.extend(data);
    }

    /// Append an incoming message to the history.
    pub fn record(&mut self, message: &str) {
        self.history.push(HistoryEntry {
            message: message.to_string(),
            timestamp: Utc::now(),
        });
    }
}

/// In-memory session store. Sessions are created lazily on first access and
/// live until an explicit reset or the end of the conversation. No expiry —
/// the map grows with distinct ids for the life of the process.
///
/// The outer map is read-mostly; each session carries its own mutex so
/// concurrent requests for the same id are serialized without blocking
/// unrelated sessions.
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Arc<Mutex<Session>>>>,
}

impl SessionStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            sessions: RwLock::new(HashMap::new()),
        })
    }

    /// Fetch the session for `id`, creating it if this is the first message.
    pub async fn get_or_create(&self, id: &str) -> Arc<Mutex<Session>> {
        {
            let sessions = self.sessions.read().await;
            if let Some(session) = sessions.get(id) {
                return Arc::clone(session);
            }
        }

        let mut sessions = self.sessions.write().await;
        // Re-check under the write lock: a concurrent request may have
        // created the session between the two lock acquisitions.
        let session = sessions.entry(id.to_string()).or_insert_with(|| {
            info!(session_id = %id, "new session");
            Arc::new(Mutex::new(Session::new(id)))
        });
        Arc::clone(session)
    }

    /// Remove the session for `id`. A missing id is a no-op, not an error.
    pub async fn reset(&self, id: &str) {
        let removed = self.sessions.write().await.remove(id).is_some();
        if removed {
            info!(session_id = %id, "session reset");
        } else {
            debug!(session_id = %id, "reset for unknown session");
        }
    }

    /// Number of live sessions.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}
