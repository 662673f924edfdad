//! Plan Backend Adapters.
//!
//! - `HttpPlanBackend` - `POST /visualize` over HTTP
//! - `MockPlanBackend` - Configurable mock for testing

mod http_plan_backend;
mod mock_plan_backend;

pub use http_plan_backend::{HttpPlanBackend, HttpPlanBackendConfig};
pub use mock_plan_backend::{MockPlanBackend, MockPlanResponse};
