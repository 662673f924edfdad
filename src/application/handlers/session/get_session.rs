//! GetSessionHandler - Query handler for retrieving session details.

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::domain::visualization::{GenerationSession, SessionError};
use crate::ports::SessionStore;

/// Query to get a session by ID.
#[derive(Debug, Clone)]
pub struct GetSessionQuery {
    pub session_id: SessionId,
}

/// Handler for retrieving session details.
pub struct GetSessionHandler {
    store: Arc<dyn SessionStore>,
}

impl GetSessionHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, query: GetSessionQuery) -> Result<GenerationSession, SessionError> {
        self.store
            .find(&query.session_id)
            .await
            .ok_or(SessionError::NotFound(query.session_id))
    }
}
