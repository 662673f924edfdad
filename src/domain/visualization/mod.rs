//! Visualization domain.
//!
//! - `concept` / `plan` - inputs to a generation cycle
//! - `prompt` - authoring prompt for the generative model
//! - `extractor` - HTML extraction fallback chain
//! - `document` / `error_page` / `outcome` - what gets rendered
//! - `status` / `session` - per-client generation lifecycle

mod concept;
mod document;
mod error_page;
mod extractor;
mod outcome;
mod plan;
mod prompt;
mod session;
mod status;

pub use concept::{Concept, MAX_CONCEPT_LENGTH};
pub use document::{ExtractionPath, SanitizedDocument};
pub use error_page::render_error_page;
pub use extractor::HtmlExtractor;
pub use outcome::{FailureCategory, GenerationFailure, GenerationOutcome};
pub use plan::StructuredPlan;
pub use prompt::VisualizationPrompt;
pub use session::{GenerationSession, SessionError};
pub use status::GenerationStatus;
