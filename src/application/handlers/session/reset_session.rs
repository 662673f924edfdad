//! ResetSessionHandler - clears a session back to idle.

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::domain::visualization::{GenerationSession, SessionError};
use crate::ports::SessionStore;

/// Command to reset a session.
#[derive(Debug, Clone)]
pub struct ResetSessionCommand {
    pub session_id: SessionId,
}

/// Handler for resetting sessions.
pub struct ResetSessionHandler {
    store: Arc<dyn SessionStore>,
}

impl ResetSessionHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// # Errors
    ///
    /// - `NotFound` if the session doesn't exist
    /// - `Busy` if a cycle is in flight
    pub async fn handle(
        &self,
        cmd: ResetSessionCommand,
    ) -> Result<GenerationSession, SessionError> {
        let session = self.store.reset(&cmd.session_id).await?;
        tracing::debug!(session_id = %cmd.session_id, "Reset generation session");
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::visualization::{
        Concept, FailureCategory, GenerationFailure, GenerationOutcome, GenerationStatus,
    };
    use crate::adapters::storage::InMemorySessionStore;

    #[tokio::test]
    async fn reset_clears_finished_session() {
        let store = InMemorySessionStore::new();
        let id = store.create().await.id();
        store.begin(&id, Concept::new("tides").unwrap()).await.unwrap();
        store
            .complete(
                &id,
                GenerationOutcome::failed(GenerationFailure::new(FailureCategory::Status, "503")),
            )
            .await
            .unwrap();
        let handler = ResetSessionHandler::new(Arc::new(store));

        let session = handler.handle(ResetSessionCommand { session_id: id }).await.unwrap();

        assert_eq!(session.status(), GenerationStatus::Idle);
        assert!(session.concept().is_none());
    }

    #[tokio::test]
    async fn reset_while_busy_is_rejected() {
        let store = InMemorySessionStore::new();
        let id = store.create().await.id();
        store.begin(&id, Concept::new("tides").unwrap()).await.unwrap();
        let handler = ResetSessionHandler::new(Arc::new(store));

        let err = handler.handle(ResetSessionCommand { session_id: id }).await.unwrap_err();

        assert_eq!(err, SessionError::Busy);
    }
}
