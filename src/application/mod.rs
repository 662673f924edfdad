//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;

pub use handlers::{
    // Session handlers
    CreateSessionHandler, GetSessionHandler, GetSessionQuery, ResetSessionCommand,
    ResetSessionHandler,
    // Visualization handlers
    GenerateVisualizationCommand, GenerateVisualizationHandler, GenerationError,
    GenerationSettings, VisualizeInSessionCommand, VisualizeInSessionHandler,
};
