//! Generation status state machine.

use crate::domain::foundation::StateMachine;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of one generation session.
///
/// `Idle -> Requesting -> {Succeeded, Failed} -> Idle`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationStatus {
    /// Nothing in flight. Initial state.
    #[default]
    Idle,

    /// A plan/generate cycle is in flight. Submissions are rejected.
    Requesting,

    /// The last cycle produced a rendered document.
    Succeeded,

    /// The last cycle failed upstream; an error page is shown.
    Failed,
}

impl GenerationStatus {
    /// True while a cycle is in flight.
    pub fn is_busy(&self) -> bool {
        matches!(self, GenerationStatus::Requesting)
    }

    /// True once a cycle has finished, either way.
    pub fn is_finished(&self) -> bool {
        matches!(self, GenerationStatus::Succeeded | GenerationStatus::Failed)
    }
}

impl fmt::Display for GenerationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GenerationStatus::Idle => "idle",
            GenerationStatus::Requesting => "requesting",
            GenerationStatus::Succeeded => "succeeded",
            GenerationStatus::Failed => "failed",
        };
        f.write_str(s)
    }
}

impl StateMachine for GenerationStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use GenerationStatus::*;
        matches!(
            (self, target),
            (Idle, Requesting)
                | (Requesting, Succeeded)
                | (Requesting, Failed)
                // Regenerate / clear
                | (Succeeded, Idle)
                | (Failed, Idle)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use GenerationStatus::*;
        match self {
            Idle => vec![Requesting],
            Requesting => vec![Succeeded, Failed],
            Succeeded => vec![Idle],
            Failed => vec![Idle],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_can_start_request() {
        let status = GenerationStatus::Idle;
        assert_eq!(
            status.transition_to(GenerationStatus::Requesting),
            Ok(GenerationStatus::Requesting)
        );
    }

    #[test]
    fn idle_cannot_jump_to_finished() {
        assert!(GenerationStatus::Idle
            .transition_to(GenerationStatus::Succeeded)
            .is_err());
        assert!(GenerationStatus::Idle
            .transition_to(GenerationStatus::Failed)
            .is_err());
    }

    #[test]
    fn requesting_finishes_either_way() {
        let status = GenerationStatus::Requesting;
        assert!(status.can_transition_to(&GenerationStatus::Succeeded));
        assert!(status.can_transition_to(&GenerationStatus::Failed));
        assert!(!status.can_transition_to(&GenerationStatus::Idle));
        assert!(!status.can_transition_to(&GenerationStatus::Requesting));
    }

    #[test]
    fn finished_states_return_to_idle() {
        for status in [GenerationStatus::Succeeded, GenerationStatus::Failed] {
            assert_eq!(status.valid_transitions(), vec![GenerationStatus::Idle]);
            assert!(!status.can_transition_to(&GenerationStatus::Requesting));
        }
    }

    #[test]
    fn no_status_is_terminal() {
        for status in [
            GenerationStatus::Idle,
            GenerationStatus::Requesting,
            GenerationStatus::Succeeded,
            GenerationStatus::Failed,
        ] {
            assert!(!status.is_terminal());
        }
    }

    #[test]
    fn only_requesting_is_busy() {
        assert!(GenerationStatus::Requesting.is_busy());
        assert!(!GenerationStatus::Idle.is_busy());
        assert!(!GenerationStatus::Succeeded.is_busy());
        assert!(!GenerationStatus::Failed.is_busy());
    }

    #[test]
    fn serializes_snake_case() {
        let json = serde_json::to_string(&GenerationStatus::Requesting).unwrap();
        assert_eq!(json, "\"requesting\"");
    }
}
