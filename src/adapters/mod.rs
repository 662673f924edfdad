//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Generative text service (Gemini, mock)
//! - `backend` - Plan backend (HTTP, mock)
//! - `storage` - Session store (in-memory)
//! - `http` - REST API (axum)

pub mod ai;
pub mod backend;
pub mod http;
pub mod storage;

pub use ai::{GeminiConfig, GeminiProvider, MockAIProvider};
pub use backend::{HttpPlanBackend, HttpPlanBackendConfig, MockPlanBackend};
pub use http::{visualization_router, VisualizationAppState};
pub use storage::InMemorySessionStore;
