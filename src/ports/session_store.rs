//! Session store port.
//!
//! Keeps [`GenerationSession`]s by id. `begin` is the only place the busy
//! flag is set, and implementations must make its check-and-set atomic so two
//! concurrent submissions for one session cannot both start a cycle.

use async_trait::async_trait;

use crate::domain::foundation::SessionId;
use crate::domain::visualization::{
    Concept, GenerationOutcome, GenerationSession, SessionError,
};

/// Store port for generation sessions.
///
/// Every mutating method returns a snapshot of the session after the change.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Creates and stores a new idle session.
    async fn create(&self) -> GenerationSession;

    /// Finds a session by id. Returns `None` if unknown.
    async fn find(&self, id: &SessionId) -> Option<GenerationSession>;

    /// Atomically marks the session busy for `concept`.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the session doesn't exist
    /// - `Busy` if a cycle is already in flight
    async fn begin(
        &self,
        id: &SessionId,
        concept: Concept,
    ) -> Result<GenerationSession, SessionError>;

    /// Records the outcome of the in-flight cycle.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the session doesn't exist
    /// - `InvalidTransition` if no cycle is in flight
    async fn complete(
        &self,
        id: &SessionId,
        outcome: GenerationOutcome,
    ) -> Result<GenerationSession, SessionError>;

    /// Clears the session back to idle.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the session doesn't exist
    /// - `Busy` if a cycle is in flight
    async fn reset(&self, id: &SessionId) -> Result<GenerationSession, SessionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn SessionStore) {}
    }
}
