//! Mock Plan Backend for testing.
//!
//! Returns queued plans or errors and records every concept it was asked for.

use async_trait::async_trait;
use serde_json::json;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use crate::domain::visualization::{Concept, StructuredPlan};
use crate::ports::{PlanBackend, PlanError};

/// A configured mock plan response.
#[derive(Debug, Clone)]
pub enum MockPlanResponse {
    /// Return this plan.
    Plan(StructuredPlan),
    /// Fail with a non-success status.
    Status { status: u16, body: String },
    /// Fail as if the backend were unreachable.
    Network(String),
    /// Return a body without a plan.
    MissingPlan,
}

/// Mock plan backend for testing.
#[derive(Debug, Clone, Default)]
pub struct MockPlanBackend {
    responses: Arc<Mutex<VecDeque<MockPlanResponse>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockPlanBackend {
    /// Creates a mock that returns a default plan for every concept.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful plan.
    pub fn with_plan(self, plan: StructuredPlan) -> Self {
        self.push(MockPlanResponse::Plan(plan))
    }

    /// Queues a non-success status.
    pub fn with_status_error(self, status: u16, body: impl Into<String>) -> Self {
        self.push(MockPlanResponse::Status {
            status,
            body: body.into(),
        })
    }

    /// Queues a transport failure.
    pub fn with_network_error(self, message: impl Into<String>) -> Self {
        self.push(MockPlanResponse::Network(message.into()))
    }

    /// Queues a response without a `visualization` payload.
    pub fn with_missing_plan(self) -> Self {
        self.push(MockPlanResponse::MissingPlan)
    }

    /// Returns the number of calls made to this backend.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Returns the concepts requested so far, in order.
    pub fn requested_concepts(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn push(self, response: MockPlanResponse) -> Self {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(response);
        self
    }

    fn next_response(&self, concept: &Concept) -> MockPlanResponse {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| {
                MockPlanResponse::Plan(StructuredPlan::new(json!({
                    "title": concept.as_str(),
                    "elements": []
                })))
            })
    }
}

#[async_trait]
impl PlanBackend for MockPlanBackend {
    async fn fetch_plan(&self, concept: &Concept) -> Result<StructuredPlan, PlanError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(concept.as_str().to_string());

        match self.next_response(concept) {
            MockPlanResponse::Plan(plan) => Ok(plan),
            MockPlanResponse::Status { status, body } => Err(PlanError::status(status, body)),
            MockPlanResponse::Network(message) => Err(PlanError::network(message)),
            MockPlanResponse::MissingPlan => Err(PlanError::MissingPlan),
        }
    }
}
