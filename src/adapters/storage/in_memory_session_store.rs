//! In-Memory Session Store Adapter
//!
//! Keeps generation sessions in a lock-guarded map. Each mutation takes the
//! write lock for the whole check-and-set, so `begin` is atomic.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::SessionId;
use crate::domain::visualization::{
    Concept, GenerationOutcome, GenerationSession, SessionError,
};
use crate::ports::SessionStore;

/// In-memory storage for generation sessions
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, GenerationSession>>>,
}

impl InMemorySessionStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of stored sessions
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Applies `f` to the stored session under the write lock.
    async fn update<F>(&self, id: &SessionId, f: F) -> Result<GenerationSession, SessionError>
    where
        F: FnOnce(&mut GenerationSession) -> Result<(), SessionError> + Send,
    {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(id)
            .ok_or(SessionError::NotFound(*id))?;
        f(session)?;
        Ok(session.clone())
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create(&self) -> GenerationSession {
        let session = GenerationSession::new(SessionId::new());
        self.sessions
            .write()
            .await
            .insert(session.id(), session.clone());
        session
    }

    async fn find(&self, id: &SessionId) -> Option<GenerationSession> {
        self.sessions.read().await.get(id).cloned()
    }

    async fn begin(
        &self,
        id: &SessionId,
        concept: Concept,
    ) -> Result<GenerationSession, SessionError> {
        self.update(id, move |session| session.begin(concept)).await
    }

    async fn complete(
        &self,
        id: &SessionId,
        outcome: GenerationOutcome,
    ) -> Result<GenerationSession, SessionError> {
        self.update(id, move |session| session.complete(outcome)).await
    }

    async fn reset(&self, id: &SessionId) -> Result<GenerationSession, SessionError> {
        self.update(id, |session| session.reset()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::visualization::{FailureCategory, GenerationFailure, GenerationStatus};

    fn concept(s: &str) -> Concept {
        Concept::new(s).unwrap()
    }

    #[tokio::test]
    async fn create_stores_idle_session() {
        let store = InMemorySessionStore::new();

        let session = store.create().await;

        assert_eq!(session.status(), GenerationStatus::Idle);
        assert_eq!(store.session_count().await, 1);
        assert!(store.find(&session.id()).await.is_some());
    }

    #[tokio::test]
    async fn find_unknown_returns_none() {
        let store = InMemorySessionStore::new();
        assert!(store.find(&SessionId::new()).await.is_none());
    }

    #[tokio::test]
    async fn begin_unknown_session_is_not_found() {
        let store = InMemorySessionStore::new();
        let id = SessionId::new();

        let result = store.begin(&id, concept("gravity")).await;

        assert_eq!(result.unwrap_err(), SessionError::NotFound(id));
    }

    #[tokio::test]
    async fn second_begin_is_rejected_while_busy() {
        let store = InMemorySessionStore::new();
        let id = store.create().await.id();

        store.begin(&id, concept("gravity")).await.unwrap();
        let second = store.begin(&id, concept("magnetism")).await;

        assert_eq!(second.unwrap_err(), SessionError::Busy);
        let stored = store.find(&id).await.unwrap();
        assert_eq!(stored.concept().map(Concept::as_str), Some("gravity"));
    }

    #[tokio::test]
    async fn concurrent_begins_admit_exactly_one() {
        let store = InMemorySessionStore::new();
        let id = store.create().await.id();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move { store.begin(&id, concept(&format!("c{}", i))).await })
            })
            .collect();

        let mut admitted = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                admitted += 1;
            }
        }
        assert_eq!(admitted, 1);
    }

    #[tokio::test]
    async fn complete_and_reset_round_trip() {
        let store = InMemorySessionStore::new();
        let id = store.create().await.id();
        store.begin(&id, concept("gravity")).await.unwrap();

        let failed = GenerationOutcome::failed(GenerationFailure::new(
            FailureCategory::Transport,
            "connection refused",
        ));
        let session = store.complete(&id, failed).await.unwrap();
        assert_eq!(session.status(), GenerationStatus::Failed);

        let session = store.reset(&id).await.unwrap();
        assert_eq!(session.status(), GenerationStatus::Idle);
        assert!(session.outcome().is_none());
    }

    #[tokio::test]
    async fn reset_while_busy_is_rejected() {
        let store = InMemorySessionStore::new();
        let id = store.create().await.id();
        store.begin(&id, concept("gravity")).await.unwrap();

        assert_eq!(store.reset(&id).await.unwrap_err(), SessionError::Busy);
    }
}
