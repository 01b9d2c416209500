//! Study session lifecycle and per-user history.

use super::record;
use crate::error::StudyError;
use crate::model::StudyModel;
use crate::sessions::SessionStore;
use crate::types::{
    SessionEvent, SessionEventKind, SessionId, SessionState, UserHistory, memory_keys,
};
use chrono::Utc;
use log::{debug, info};
use serde_json::json;
use std::sync::Arc;
use studyconcierge_memory::MemoryBank;

/// Tracks sessions in the store and mirrors their lifecycle into memory.
#[derive(Clone)]
pub struct SessionManager {
    store: SessionStore,
    memory: Arc<dyn MemoryBank>,
    model: Arc<dyn StudyModel>,
}

impl SessionManager {
    pub fn new(store: SessionStore, memory: Arc<dyn MemoryBank>, model: Arc<dyn StudyModel>) -> Self {
        Self {
            store,
            memory,
            model,
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Open a session for `user_id`.
    pub fn start_session(&self, user_id: &str) -> Result<SessionId, StudyError> {
        let user_id = user_id.trim();
        if user_id.is_empty() {
            return Err(StudyError::invalid("user_id cannot be empty"));
        }
        let session_id = self.store.create(user_id);
        self.event(&session_id, Some(user_id), SessionEventKind::SessionStarted, None, None);
        Ok(session_id)
    }

    /// Add `delta` to `topic`. Unknown sessions are created on the fly.
    pub fn update_progress(&self, session_id: &str, topic: &str, delta: i64) -> SessionState {
        let state = self.store.update(session_id, topic, delta);
        self.event(
            session_id,
            state.user_id.as_deref(),
            SessionEventKind::ProgressUpdated,
            Some(topic),
            Some(delta),
        );
        state
    }

    pub fn get_session(&self, session_id: &str) -> Option<SessionState> {
        self.store.get(session_id)
    }

    pub fn list_sessions(&self) -> Vec<SessionState> {
        self.store.list()
    }

    /// Close a session and save its digest. Returns `false` for unknown ids.
    pub async fn end_session(&self, session_id: &str) -> bool {
        let Some(state) = self.store.remove(session_id) else {
            debug!("end_session ignored unknown session (session_id={session_id})");
            return false;
        };
        let digest = self.model.session_digest(&state).await;
        record(
            self.memory.as_ref(),
            memory_keys::SESSION_SUMMARY,
            &json!({
                "session_id": state.session_id,
                "user_id": state.user_id,
                "progress": state.progress,
                "total_progress": state.total_progress(),
                "digest": digest,
                "ended_at": Utc::now(),
            }),
        );
        self.event(
            session_id,
            state.user_id.as_deref(),
            SessionEventKind::SessionEnded,
            None,
            None,
        );
        info!(
            "ended session (session_id={session_id}, topics={})",
            state.progress.len()
        );
        true
    }

    /// Aggregate the recorded events of `user_id`.
    pub fn user_history(&self, user_id: &str) -> UserHistory {
        let mut history = UserHistory {
            user_id: user_id.to_string(),
            sessions_count: 0,
            total_progress: 0,
            topics: Default::default(),
        };
        let events = self
            .memory
            .recall(memory_keys::SESSION_EVENTS)
            .into_iter()
            .filter_map(|record| serde_json::from_value::<SessionEvent>(record.value).ok())
            .filter(|event| event.user_id.as_deref() == Some(user_id));
        for event in events {
            match event.event {
                SessionEventKind::SessionStarted => history.sessions_count += 1,
                SessionEventKind::ProgressUpdated => {
                    let delta = event.delta.unwrap_or(0);
                    history.total_progress = history.total_progress.saturating_add(delta);
                    if let Some(topic) = event.topic {
                        let value = history.topics.entry(topic).or_insert(0);
                        *value = value.saturating_add(delta);
                    }
                }
                SessionEventKind::SessionEnded => {}
            }
        }
        history
    }

    fn event(
        &self,
        session_id: &str,
        user_id: Option<&str>,
        kind: SessionEventKind,
        topic: Option<&str>,
        delta: Option<i64>,
    ) {
        let event = SessionEvent {
            session_id: session_id.to_string(),
            user_id: user_id.map(str::to_string),
            event: kind,
            topic: topic.map(str::to_string),
            delta,
            timestamp: Utc::now(),
        };
        record(self.memory.as_ref(), memory_keys::SESSION_EVENTS, &event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TemplateModel;
    use pretty_assertions::assert_eq;
    use studyconcierge_memory::InMemoryBank;

    fn manager(memory: Arc<InMemoryBank>) -> SessionManager {
        SessionManager::new(
            SessionStore::new(),
            memory,
            Arc::new(TemplateModel::default()),
        )
    }

    #[test]
    fn blank_user_is_rejected() {
        let err = manager(Arc::new(InMemoryBank::new()))
            .start_session(" ")
            .unwrap_err();
        assert!(matches!(err, StudyError::InvalidArgument(_)));
    }

    #[test]
    fn progress_accumulates_per_topic() {
        let manager = manager(Arc::new(InMemoryBank::new()));
        let session = manager.start_session("ana").expect("session");
        manager.update_progress(&session, "math", 2);
        let state = manager.update_progress(&session, "math", 3);
        assert_eq!(state.progress["math"], 5);
        assert_eq!(state.user_id.as_deref(), Some("ana"));
        assert_eq!(manager.get_session("unknown"), None);
    }

    #[tokio::test]
    async fn end_session_saves_digest_once() {
        let memory = Arc::new(InMemoryBank::new());
        let manager = manager(memory.clone());
        let session = manager.start_session("ana").expect("session");
        manager.update_progress(&session, "math", 4);

        assert!(manager.end_session(&session).await);
        assert!(!manager.end_session(&session).await);
        assert_eq!(manager.get_session(&session), None);

        let summaries = memory.recall(memory_keys::SESSION_SUMMARY);
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].value["total_progress"], json!(4));
        assert!(
            summaries[0].value["digest"]
                .as_str()
                .is_some_and(|digest| digest.contains("math"))
        );
        assert_eq!(memory.recall(memory_keys::SESSION_EVENTS).len(), 3);
    }

    #[tokio::test]
    async fn history_aggregates_across_sessions() {
        let memory = Arc::new(InMemoryBank::new());
        let manager = manager(memory);
        let first = manager.start_session("ana").expect("session");
        manager.update_progress(&first, "math", 2);
        manager.end_session(&first).await;
        let second = manager.start_session("ana").expect("session");
        manager.update_progress(&second, "math", 1);
        manager.update_progress(&second, "art", 3);
        let other = manager.start_session("ben").expect("session");
        manager.update_progress(&other, "math", 10);

        let history = manager.user_history("ana");
        assert_eq!(history.sessions_count, 2);
        assert_eq!(history.total_progress, 6);
        assert_eq!(history.topics["math"], 3);
        assert_eq!(history.topics["art"], 3);
        assert_eq!(manager.user_history("nobody").sessions_count, 0);
        assert_eq!(manager.list_sessions().len(), 2);
    }

    #[tokio::test]
    async fn history_totals_saturate() {
        let memory = Arc::new(InMemoryBank::new());
        let manager = manager(memory.clone());
        let session = manager.start_session("ana").expect("session");
        manager.update_progress(&session, "math", i64::MAX);
        manager.update_progress(&session, "art", 5);
        assert!(manager.end_session(&session).await);
        let summaries = memory.recall(memory_keys::SESSION_SUMMARY);
        assert_eq!(summaries[0].value["total_progress"], json!(i64::MAX));

        let history = manager.user_history("ana");
        assert_eq!(history.total_progress, i64::MAX);
        assert_eq!(history.topics["math"], i64::MAX);
        assert_eq!(history.topics["art"], 5);
    }
}
