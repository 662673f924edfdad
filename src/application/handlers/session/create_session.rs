//! CreateSessionHandler - Command handler for creating new sessions.

use std::sync::Arc;

use crate::domain::visualization::GenerationSession;
use crate::ports::SessionStore;

/// Handler for creating idle generation sessions.
pub struct CreateSessionHandler {
    store: Arc<dyn SessionStore>,
}

impl CreateSessionHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self) -> GenerationSession {
        let session = self.store.create().await;
        tracing::debug!(session_id = %session.id(), "Created generation session");
        session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemorySessionStore;
    use crate::domain::visualization::GenerationStatus;

    #[tokio::test]
    async fn creates_idle_session_in_store() {
        let store = InMemorySessionStore::new();
        let handler = CreateSessionHandler::new(Arc::new(store.clone()));

        let session = handler.handle().await;

        assert_eq!(session.status(), GenerationStatus::Idle);
        assert!(store.find(&session.id()).await.is_some());
    }
}
