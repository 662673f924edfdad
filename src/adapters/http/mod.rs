//! HTTP adapters - REST API implementations.

pub mod visualization;

// Re-export key types for convenience
pub use visualization::visualization_router;
pub use visualization::VisualizationAppState;
