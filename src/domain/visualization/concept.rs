//! Concept value object - the topic a user asks to have visualized.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Maximum concept length in characters.
pub const MAX_CONCEPT_LENGTH: usize = 500;

/// A validated, trimmed, non-empty concept string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Concept(String);

impl Concept {
    /// Creates a concept, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns `EmptyField` for blank input and `TooLong` past [`MAX_CONCEPT_LENGTH`].
    pub fn new(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("concept"));
        }
        let length = trimmed.chars().count();
        if length > MAX_CONCEPT_LENGTH {
            return Err(ValidationError::too_long("concept", MAX_CONCEPT_LENGTH, length));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Concept {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Concept> for String {
    fn from(concept: Concept) -> Self {
        concept.0
    }
}

impl fmt::Display for Concept {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
