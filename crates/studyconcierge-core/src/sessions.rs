//! In-memory session store.

use crate::types::{SessionId, SessionState};
use chrono::Utc;
use log::{debug, info};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// Session id to progress state, shared by clones.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, SessionState>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty session for `user_id` and return its id.
    pub fn create(&self, user_id: &str) -> SessionId {
        let session_id = format!("session_{user_id}_{}", Uuid::new_v4().simple());
        let state = SessionState::new(session_id.clone(), Some(user_id.to_string()));
        self.sessions.write().insert(session_id.clone(), state);
        info!("created session (session_id={session_id}, user_id={user_id})");
        session_id
    }

    /// Add `delta` to `topic`, creating the session and topic as needed.
    pub fn update(&self, session_id: &str, topic: &str, delta: i64) -> SessionState {
        let mut sessions = self.sessions.write();
        let state = sessions
            .entry(session_id.to_string())
            .or_insert_with(|| SessionState::new(session_id, None));
        let value = state.progress.entry(topic.to_string()).or_insert(0);
        *value = value.saturating_add(delta);
        state.last_updated = Utc::now();
        debug!(
            "updated session progress (session_id={session_id}, topic={topic}, delta={delta}, value={})",
            state.progress[topic]
        );
        state.clone()
    }

    /// Current state, or `None` for an unknown session.
    pub fn get(&self, session_id: &str) -> Option<SessionState> {
        self.sessions.read().get(session_id).cloned()
    }

    /// Remove a session, returning its final state.
    pub fn remove(&self, session_id: &str) -> Option<SessionState> {
        let removed = self.sessions.write().remove(session_id);
        if removed.is_some() {
            info!("removed session (session_id={session_id})");
        }
        removed
    }

    /// All sessions, newest first.
    pub fn list(&self) -> Vec<SessionState> {
        let mut sessions: Vec<SessionState> = self.sessions.read().values().cloned().collect();
        sessions.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.session_id.cmp(&b.session_id))
        });
        sessions
    }
}
