//! VisualizeInSessionHandler - runs a cycle under a session's busy flag.

use std::sync::Arc;

use super::generate_visualization::{GenerateVisualizationCommand, GenerateVisualizationHandler};
use crate::domain::foundation::SessionId;
use crate::domain::visualization::{
    Concept, FailureCategory, GenerationFailure, GenerationOutcome, GenerationSession,
    SessionError,
};
use crate::ports::SessionStore;

/// Command to visualize a concept inside a session.
#[derive(Debug, Clone)]
pub struct VisualizeInSessionCommand {
    pub session_id: SessionId,
    pub concept: Concept,
}

/// Handler that marks the session busy, runs one cycle, and stores the result.
pub struct VisualizeInSessionHandler {
    store: Arc<dyn SessionStore>,
    generator: Arc<GenerateVisualizationHandler>,
}

impl VisualizeInSessionHandler {
    pub fn new(store: Arc<dyn SessionStore>, generator: Arc<GenerateVisualizationHandler>) -> Self {
        Self { store, generator }
    }

    /// Generation and completion run on a detached task, so the session is
    /// released even if the caller stops waiting (e.g. the client disconnects).
    ///
    /// # Errors
    ///
    /// - `NotFound` if the session doesn't exist
    /// - `Busy` if the session already has a cycle in flight
    pub async fn handle(
        &self,
        cmd: VisualizeInSessionCommand,
    ) -> Result<GenerationSession, SessionError> {
        let session_id = cmd.session_id;

        // 1. Claim the session (atomic check-and-set)
        self.store.begin(&session_id, cmd.concept.clone()).await?;

        // 2. Run the cycle and record its outcome, detached from this future
        let store = Arc::clone(&self.store);
        let generator = Arc::clone(&self.generator);
        let cycle = tokio::spawn(async move {
            let generation = tokio::spawn(async move {
                generator
                    .handle(GenerateVisualizationCommand {
                        concept: cmd.concept,
                    })
                    .await
            });

            let outcome = match generation.await {
                Ok(outcome) => outcome,
                Err(err) => {
                    tracing::error!(session_id = %session_id, error = %err, "Generation task died");
                    GenerationOutcome::failed(GenerationFailure::new(
                        FailureCategory::Internal,
                        "generation was interrupted",
                    ))
                }
            };

            // 3. Record the outcome and release the session
            store.complete(&session_id, outcome).await
        });

        match cycle.await {
            Ok(result) => result,
            Err(err) => {
                tracing::error!(session_id = %session_id, error = %err, "Session cycle task died");
                self.store
                    .find(&session_id)
                    .await
                    .ok_or(SessionError::NotFound(session_id))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};
    use crate::adapters::backend::MockPlanBackend;
    use crate::adapters::storage::InMemorySessionStore;
    use crate::domain::visualization::GenerationStatus;
    use std::time::Duration;

    fn handler_with(ai: MockAIProvider, store: InMemorySessionStore) -> VisualizeInSessionHandler {
        let generator = GenerateVisualizationHandler::new(Arc::new(MockPlanBackend::new()), Arc::new(ai));
        VisualizeInSessionHandler::new(Arc::new(store), Arc::new(generator))
    }

    fn command(session_id: SessionId, concept: &str) -> VisualizeInSessionCommand {
        VisualizeInSessionCommand {
            session_id,
            concept: Concept::new(concept).unwrap(),
        }
    }

    #[tokio::test]
    async fn successful_cycle_leaves_session_succeeded() {
        let store = InMemorySessionStore::new();
        let id = store.create().await.id();
        let handler = handler_with(MockAIProvider::new(), store.clone());

        let session = handler.handle(command(id, "tides")).await.unwrap();

        assert_eq!(session.status(), GenerationStatus::Succeeded);
        assert!(session.outcome().unwrap().is_rendered());
        assert_eq!(store.find(&id).await.unwrap().status(), GenerationStatus::Succeeded);
    }

    #[tokio::test]
    async fn failed_cycle_leaves_session_failed() {
        let store = InMemorySessionStore::new();
        let id = store.create().await.id();
        let ai = MockAIProvider::new().with_error(MockError::AuthenticationFailed);
        let handler = handler_with(ai, store);

        let session = handler.handle(command(id, "tides")).await.unwrap();

        assert_eq!(session.status(), GenerationStatus::Failed);
        assert!(session.outcome().unwrap().html().contains("authentication failed"));
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let handler = handler_with(MockAIProvider::new(), InMemorySessionStore::new());
        let id = SessionId::new();

        let err = handler.handle(command(id, "tides")).await.unwrap_err();

        assert_eq!(err, SessionError::NotFound(id));
    }

    #[tokio::test]
    async fn concurrent_submission_is_rejected_without_aborting_first() {
        let store = InMemorySessionStore::new();
        let id = store.create().await.id();
        let ai = MockAIProvider::new().with_delay(Duration::from_millis(100));
        let handler = Arc::new(handler_with(ai.clone(), store.clone()));

        let first = {
            let handler = handler.clone();
            tokio::spawn(async move { handler.handle(command(id, "tides")).await })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;

        let second = handler.handle(command(id, "waves")).await;
        assert_eq!(second.unwrap_err(), SessionError::Busy);

        let first = first.await.unwrap().unwrap();
        assert_eq!(first.status(), GenerationStatus::Succeeded);
        assert_eq!(first.concept().map(Concept::as_str), Some("tides"));
        assert_eq!(ai.call_count(), 1);
    }

    #[tokio::test]
    async fn dropped_caller_still_releases_session() {
        let store = InMemorySessionStore::new();
        let id = store.create().await.id();
        let ai = MockAIProvider::new().with_delay(Duration::from_millis(200));
        let handler = Arc::new(handler_with(ai, store.clone()));

        let task = {
            let handler = handler.clone();
            tokio::spawn(async move { handler.handle(command(id, "tides")).await })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(store.find(&id).await.unwrap().is_busy());

        task.abort();
        tokio::time::sleep(Duration::from_millis(400)).await;

        let session = store.find(&id).await.unwrap();
        assert_eq!(session.status(), GenerationStatus::Succeeded);
        assert!(store.reset(&id).await.is_ok());
        assert!(handler.handle(command(id, "waves")).await.is_ok());
    }

    #[tokio::test]
    async fn regenerate_after_completion_runs_again() {
        let store = InMemorySessionStore::new();
        let id = store.create().await.id();
        let ai = MockAIProvider::new();
        let handler = handler_with(ai.clone(), store);

        handler.handle(command(id, "tides")).await.unwrap();
        let session = handler.handle(command(id, "tides")).await.unwrap();

        assert_eq!(session.status(), GenerationStatus::Succeeded);
        assert_eq!(ai.call_count(), 2);
    }
}
