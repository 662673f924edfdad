//! GenerateVisualizationHandler - runs one plan/generate/extract cycle.
//!
//! The handler never fails: any upstream error is classified, logged, and
//! turned into an error document the render target can show as-is.

use std::sync::Arc;
use thiserror::Error;

use crate::config::AiConfig;
use crate::domain::visualization::{
    Concept, FailureCategory, GenerationFailure, GenerationOutcome, HtmlExtractor,
    SanitizedDocument, VisualizationPrompt,
};
use crate::ports::{AIError, AIProvider, CompletionRequest, MessageRole, PlanBackend, PlanError};

/// Characters of the raw model response included in debug logs.
const RAW_LOG_PREVIEW_CHARS: usize = 500;

/// Sampling parameters for the authoring call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationSettings {
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub max_output_tokens: u32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            temperature: 0.3,
            top_k: 40,
            top_p: 0.95,
            max_output_tokens: 8192,
        }
    }
}

impl From<&AiConfig> for GenerationSettings {
    fn from(config: &AiConfig) -> Self {
        Self {
            temperature: config.temperature,
            top_k: config.top_k,
            top_p: config.top_p,
            max_output_tokens: config.max_output_tokens,
        }
    }
}

/// Errors from either collaborator during a cycle.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Plan backend error: {0}")]
    Plan(#[from] PlanError),

    #[error("AI provider error: {0}")]
    Provider(#[from] AIError),
}

impl GenerationError {
    pub fn category(&self) -> FailureCategory {
        match self {
            GenerationError::Plan(err) => err.category(),
            GenerationError::Provider(err) => err.category(),
        }
    }

    /// Summary recorded on the session and shown on the error page.
    pub fn to_failure(&self) -> GenerationFailure {
        GenerationFailure::new(self.category(), self.to_string())
    }
}

/// Command to visualize a concept.
#[derive(Debug, Clone)]
pub struct GenerateVisualizationCommand {
    pub concept: Concept,
}

/// Handler for one generation cycle.
pub struct GenerateVisualizationHandler {
    plan_backend: Arc<dyn PlanBackend>,
    ai_provider: Arc<dyn AIProvider>,
    extractor: HtmlExtractor,
    settings: GenerationSettings,
}

impl GenerateVisualizationHandler {
    pub fn new(plan_backend: Arc<dyn PlanBackend>, ai_provider: Arc<dyn AIProvider>) -> Self {
        Self {
            plan_backend,
            ai_provider,
            extractor: HtmlExtractor::default(),
            settings: GenerationSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: GenerationSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_extractor(mut self, extractor: HtmlExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    pub async fn handle(&self, cmd: GenerateVisualizationCommand) -> GenerationOutcome {
        tracing::info!(concept = %cmd.concept, "Starting visualization cycle");

        match self.generate(&cmd.concept).await {
            Ok(document) => {
                tracing::info!(
                    concept = %cmd.concept,
                    path = %document.path(),
                    length = document.len(),
                    "Visualization cycle finished"
                );
                GenerationOutcome::Rendered(document)
            }
            Err(err) => {
                tracing::warn!(
                    concept = %cmd.concept,
                    category = %err.category(),
                    error = %err,
                    "Visualization cycle failed"
                );
                GenerationOutcome::failed(err.to_failure())
            }
        }
    }

    async fn generate(&self, concept: &Concept) -> Result<SanitizedDocument, GenerationError> {
        // 1. Plan
        let plan = self.plan_backend.fetch_plan(concept).await?;
        if let Some(category) = plan.category.as_deref() {
            tracing::debug!(category, "Plan backend classified concept");
        }

        // 2. Prompt
        let prompt = VisualizationPrompt::new(concept, &plan).render();
        let request = CompletionRequest::new()
            .with_message(MessageRole::User, prompt)
            .with_temperature(self.settings.temperature)
            .with_top_k(self.settings.top_k)
            .with_top_p(self.settings.top_p)
            .with_max_tokens(self.settings.max_output_tokens);

        // 3. Generate
        let response = self.ai_provider.complete(request).await?;
        tracing::debug!(
            model = %response.model,
            raw_len = response.content.len(),
            preview = %preview(&response.content),
            "Raw model response"
        );

        // 4. Extract
        Ok(self.extractor.extract(&response.content))
    }
}

fn preview(raw: &str) -> &str {
    match raw.char_indices().nth(RAW_LOG_PREVIEW_CHARS) {
        Some((idx, _)) => &raw[..idx],
        None => raw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};
    use crate::adapters::backend::MockPlanBackend;
    use crate::domain::visualization::{ExtractionPath, StructuredPlan};
    use serde_json::json;

    fn command(concept: &str) -> GenerateVisualizationCommand {
        GenerateVisualizationCommand {
            concept: Concept::new(concept).unwrap(),
        }
    }

    #[tokio::test]
    async fn success_renders_extracted_document() {
        let plan = MockPlanBackend::new();
        let ai = MockAIProvider::new()
            .with_response("```html\n<!DOCTYPE html><html><body>hi</body></html>\n```");
        let handler = GenerateVisualizationHandler::new(Arc::new(plan), Arc::new(ai));

        let outcome = handler.handle(command("recursion")).await;

        assert!(outcome.is_rendered());
        assert_eq!(outcome.html(), "<!DOCTYPE html><html><body>hi</body></html>");
        assert_eq!(outcome.extraction_path(), Some(ExtractionPath::FullDocument));
    }

    #[tokio::test]
    async fn unusable_model_text_still_renders_diagnostic() {
        let ai = MockAIProvider::new().with_response("I cannot draw that.");
        let handler =
            GenerateVisualizationHandler::new(Arc::new(MockPlanBackend::new()), Arc::new(ai));

        let outcome = handler.handle(command("recursion")).await;

        assert_eq!(outcome.extraction_path(), Some(ExtractionPath::Diagnostic));
        assert!(outcome.html().contains("I cannot draw that."));
    }

    #[tokio::test]
    async fn plan_failure_skips_ai_call() {
        let plan = MockPlanBackend::new().with_status_error(502, "bad gateway");
        let ai = MockAIProvider::new();
        let handler =
            GenerateVisualizationHandler::new(Arc::new(plan.clone()), Arc::new(ai.clone()));

        let outcome = handler.handle(command("recursion")).await;

        let failure = outcome.failure().unwrap();
        assert_eq!(failure.category, FailureCategory::Status);
        assert!(outcome.html().contains("Error generating visualization"));
        assert!(outcome.html().contains("bad gateway"));
        assert_eq!(plan.call_count(), 1);
        assert_eq!(ai.call_count(), 0);
    }

    #[tokio::test]
    async fn missing_plan_is_a_payload_failure() {
        let plan = MockPlanBackend::new().with_missing_plan();
        let handler =
            GenerateVisualizationHandler::new(Arc::new(plan), Arc::new(MockAIProvider::new()));

        let outcome = handler.handle(command("recursion")).await;

        assert_eq!(outcome.failure().unwrap().category, FailureCategory::Payload);
    }

    #[tokio::test]
    async fn ai_failure_yields_failed_outcome() {
        let ai = MockAIProvider::new().with_error(MockError::Network {
            message: "connection reset".to_string(),
        });
        let handler =
            GenerateVisualizationHandler::new(Arc::new(MockPlanBackend::new()), Arc::new(ai));

        let outcome = handler.handle(command("recursion")).await;

        let failure = outcome.failure().unwrap();
        assert_eq!(failure.category, FailureCategory::Transport);
        assert!(failure.message.contains("connection reset"));
    }

    #[tokio::test]
    async fn empty_candidates_yield_failed_outcome() {
        let ai = MockAIProvider::new().with_error(MockError::NoCandidates);
        let handler =
            GenerateVisualizationHandler::new(Arc::new(MockPlanBackend::new()), Arc::new(ai));

        let outcome = handler.handle(command("recursion")).await;

        assert_eq!(outcome.failure().unwrap().category, FailureCategory::Payload);
    }

    #[tokio::test]
    async fn prompt_carries_concept_plan_and_settings() {
        let plan = MockPlanBackend::new()
            .with_plan(StructuredPlan::new(json!({ "title": "Stacks" })).with_category("CS"));
        let ai = MockAIProvider::new();
        let handler = GenerateVisualizationHandler::new(Arc::new(plan), Arc::new(ai.clone()));

        handler.handle(command("call stack")).await;

        let calls = ai.get_calls();
        assert_eq!(calls.len(), 1);
        let request = &calls[0];
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].role, MessageRole::User);
        let text = &request.messages[0].content;
        assert!(text.contains("CREATE AN INTERACTIVE EDUCATIONAL VISUALIZATION FOR: call stack"));
        assert!(text.contains("Based on this structured plan: {\n  \"title\": \"Stacks\"\n}"));
        assert_eq!(request.temperature, Some(0.3));
        assert_eq!(request.top_k, Some(40));
        assert_eq!(request.top_p, Some(0.95));
        assert_eq!(request.max_tokens, Some(8192));
        assert!(request.system_prompt.is_none());
    }

    #[tokio::test]
    async fn custom_settings_are_forwarded() {
        let ai = MockAIProvider::new();
        let settings = GenerationSettings {
            temperature: 0.7,
            top_k: 20,
            top_p: 0.5,
            max_output_tokens: 1024,
        };
        let handler =
            GenerateVisualizationHandler::new(Arc::new(MockPlanBackend::new()), Arc::new(ai.clone()))
                .with_settings(settings);

        handler.handle(command("recursion")).await;

        let request = &ai.get_calls()[0];
        assert_eq!(request.temperature, Some(0.7));
        assert_eq!(request.max_tokens, Some(1024));
    }

    #[test]
    fn settings_follow_ai_config() {
        let config = AiConfig::default();
        assert_eq!(GenerationSettings::from(&config), GenerationSettings::default());
    }

    #[test]
    fn preview_truncates_on_char_boundary() {
        let raw = "é".repeat(600);
        assert_eq!(preview(&raw).chars().count(), 500);
        assert_eq!(preview("short"), "short");
    }

    #[test]
    fn generation_error_reports_inner_category() {
        let err: GenerationError = PlanError::network("refused").into();
        assert_eq!(err.category(), FailureCategory::Transport);
        assert_eq!(err.to_failure().message, "Plan backend error: network error: refused");
    }
}
