//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod session;
pub mod visualization;

pub use session::{
    CreateSessionHandler, GetSessionHandler, GetSessionQuery, ResetSessionCommand,
    ResetSessionHandler,
};
pub use visualization::{
    GenerateVisualizationCommand, GenerateVisualizationHandler, GenerationError,
    GenerationSettings, VisualizeInSessionCommand, VisualizeInSessionHandler,
};
