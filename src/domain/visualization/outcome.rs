//! Result of one generation cycle.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::document::{ExtractionPath, SanitizedDocument};
use super::error_page::render_error_page;

/// Classification of upstream failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureCategory {
    /// Connection, DNS, or timeout errors.
    Transport,
    /// A collaborator answered with a non-success status.
    Status,
    /// A response arrived but was empty or malformed.
    Payload,
    /// The cycle itself died before producing an outcome.
    Internal,
}

impl fmt::Display for FailureCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FailureCategory::Transport => "transport",
            FailureCategory::Status => "status",
            FailureCategory::Payload => "payload",
            FailureCategory::Internal => "internal",
        };
        f.write_str(s)
    }
}

/// Summary of a failed cycle, as recorded on the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationFailure {
    pub category: FailureCategory,
    pub message: String,
}

impl GenerationFailure {
    pub fn new(category: FailureCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
        }
    }
}

impl fmt::Display for GenerationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failure: {}", self.category, self.message)
    }
}

/// What a cycle hands to the render target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// The model responded and the extractor produced a document.
    Rendered(SanitizedDocument),
    /// An upstream call failed; `page` is the error document to show.
    Failed {
        page: String,
        failure: GenerationFailure,
    },
}

impl GenerationOutcome {
    /// Builds a failed outcome with its error page.
    pub fn failed(failure: GenerationFailure) -> Self {
        let page = render_error_page(&failure.message);
        GenerationOutcome::Failed { page, failure }
    }

    /// The HTML to render, whichever way the cycle went.
    pub fn html(&self) -> &str {
        match self {
            GenerationOutcome::Rendered(doc) => doc.as_str(),
            GenerationOutcome::Failed { page, .. } => page,
        }
    }

    pub fn is_rendered(&self) -> bool {
        matches!(self, GenerationOutcome::Rendered(_))
    }

    /// Extraction path, present only for rendered outcomes.
    pub fn extraction_path(&self) -> Option<ExtractionPath> {
        match self {
            GenerationOutcome::Rendered(doc) => Some(doc.path()),
            GenerationOutcome::Failed { .. } => None,
        }
    }

    pub fn failure(&self) -> Option<&GenerationFailure> {
        match self {
            GenerationOutcome::Rendered(_) => None,
            GenerationOutcome::Failed { failure, .. } => Some(failure),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_outcome_carries_error_page() {
        let outcome = GenerationOutcome::failed(GenerationFailure::new(
            FailureCategory::Status,
            "plan backend returned 502",
        ));

        assert!(!outcome.is_rendered());
        assert!(outcome.html().contains("Error generating visualization"));
        assert!(outcome.html().contains("plan backend returned 502"));
        assert_eq!(outcome.extraction_path(), None);
        assert_eq!(
            outcome.failure().map(|f| f.category),
            Some(FailureCategory::Status)
        );
    }

    #[test]
    fn rendered_outcome_exposes_document() {
        let doc = SanitizedDocument::new("<html></html>", ExtractionPath::RootElement);
        let outcome = GenerationOutcome::Rendered(doc);

        assert!(outcome.is_rendered());
        assert_eq!(outcome.html(), "<html></html>");
        assert_eq!(outcome.extraction_path(), Some(ExtractionPath::RootElement));
        assert!(outcome.failure().is_none());
    }

    #[test]
    fn failure_display_includes_category() {
        let failure = GenerationFailure::new(FailureCategory::Transport, "connection refused");
        assert_eq!(failure.to_string(), "transport failure: connection refused");

        let interrupted = GenerationFailure::new(FailureCategory::Internal, "generation was interrupted");
        assert_eq!(interrupted.to_string(), "internal failure: generation was interrupted");
    }
}
