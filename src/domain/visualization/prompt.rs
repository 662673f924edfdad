//! Prompt sent to the generative model to author the visualization.

use super::concept::Concept;
use super::plan::StructuredPlan;

const INSTRUCTIONS: &str = "\
You are an expert educational content creator and frontend developer. Create a comprehensive, interactive HTML visualization that teaches the given concept effectively.

CRITICAL REQUIREMENTS:
1. Create a COMPLETE, standalone HTML document with embedded CSS and JavaScript
2. The visualization must be genuinely educational and detailed - not just decorative
3. Use rich SVG graphics with proper diagrams, flowcharts, or process illustrations
4. Include multiple interactive elements: clickable areas, hover effects, animations
5. Add informational tooltips, pop-ups, or detail panels that appear on interaction
6. Use a professional color scheme with good contrast (blues, greens, oranges for educational content)
7. Include step-by-step processes, labeled components, and clear visual hierarchy
8. Add smooth CSS transitions and micro-animations to enhance engagement
9. Make it responsive and visually appealing on different screen sizes
10. Include a proper title, description, and interactive instructions

EDUCATIONAL FOCUS:
- Break down complex concepts into visual components
- Show processes, relationships, and cause-and-effect
- Use analogies and visual metaphors where helpful
- Include key terms, definitions, and explanations
- Make abstract concepts concrete through visualization

OUTPUT FORMAT:
Provide ONLY the complete HTML code starting with <!DOCTYPE html> and ending with </html>. Do not include any markdown formatting, explanations, or code blocks.";

const CLOSING: &str = "Make it comprehensive, engaging, and truly educational. Include multiple interactive elements and detailed explanations.";

/// Authoring prompt for one concept and its plan.
#[derive(Debug, Clone)]
pub struct VisualizationPrompt<'a> {
    concept: &'a Concept,
    plan: &'a StructuredPlan,
}

impl<'a> VisualizationPrompt<'a> {
    pub fn new(concept: &'a Concept, plan: &'a StructuredPlan) -> Self {
        Self { concept, plan }
    }

    /// Renders the full prompt text.
    pub fn render(&self) -> String {
        format!(
            "{INSTRUCTIONS}\n\nCREATE AN INTERACTIVE EDUCATIONAL VISUALIZATION FOR: {concept}\n\nBased on this structured plan: {plan}\n\n{CLOSING}",
            concept = self.concept,
            plan = self.plan.to_pretty_json(),
        )
    }
}
