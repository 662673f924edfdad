//! Visualization command handlers.

mod generate_visualization;
mod visualize_in_session;

pub use generate_visualization::{
    GenerateVisualizationCommand, GenerateVisualizationHandler, GenerationError,
    GenerationSettings,
};
pub use visualize_in_session::{VisualizeInSessionCommand, VisualizeInSessionHandler};
