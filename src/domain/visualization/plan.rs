//! Structured plan returned by the plan backend.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Opaque visualization plan.
///
/// The shape is owned by the plan backend; this crate only serializes it
/// into the authoring prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredPlan {
    /// The `visualization` payload, never interpreted.
    pub visualization: Value,
    /// Category the backend classified the concept into, if reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl StructuredPlan {
    pub fn new(visualization: Value) -> Self {
        Self {
            visualization,
            category: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Pretty-printed JSON of the payload (2-space indent).
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(&self.visualization)
            .unwrap_or_else(|_| self.visualization.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn pretty_json_uses_two_space_indent() {
        let plan = StructuredPlan::new(json!({ "title": "Binary Search" }));
        assert_eq!(plan.to_pretty_json(), "{\n  \"title\": \"Binary Search\"\n}");
    }

    #[test]
    fn category_is_optional() {
        let plan = StructuredPlan::new(json!(null)).with_category("Mathematics & Logic");
        assert_eq!(plan.category.as_deref(), Some("Mathematics & Logic"));
    }
}
