//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `AIProvider` - Generative text service that authors the HTML
//! - `PlanBackend` - Service that turns a concept into a structured plan
//! - `SessionStore` - Keeps generation sessions and guards the busy flag

mod ai_provider;
mod plan_backend;
mod session_store;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, ProviderInfo, TokenUsage,
};
pub use plan_backend::{PlanBackend, PlanError};
pub use session_store::SessionStore;
