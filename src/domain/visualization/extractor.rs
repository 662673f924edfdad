//! HTML extraction from unstructured model output.
//!
//! Generative models do not reliably honor "return only code". Output may be
//! wrapped in markdown fences or prose, truncated, or not HTML at all. The
//! extractor walks an ordered fallback chain and always yields a complete
//! document:
//!
//! 1. strip markdown fence markers and trim
//! 2. `<!DOCTYPE html>` through the last `</html>` (case-insensitive)
//! 3. `<html` through the last `</html>` (case-insensitive)
//! 4. any text containing both `<` and `>` is wrapped in a document shell
//! 5. otherwise a diagnostic page echoing the escaped raw input

use once_cell::sync::Lazy;
use regex::Regex;

use super::document::{html_escape, ExtractionPath, SanitizedDocument};

static FENCE_WITH_HTML_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)```html\n?").expect("fence pattern is valid"));

static FENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"```\n?").expect("fence pattern is valid"));

static FULL_DOCUMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<!DOCTYPE html>.*</html>").expect("document pattern is valid")
});

static ROOT_ELEMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<html.*</html>").expect("root pattern is valid"));

const DEFAULT_FRAGMENT_TITLE: &str = "Concept Visualization";

/// Turns raw model text into a [`SanitizedDocument`]. Never fails.
#[derive(Debug, Clone)]
pub struct HtmlExtractor {
    fragment_title: String,
}

impl Default for HtmlExtractor {
    fn default() -> Self {
        Self {
            fragment_title: DEFAULT_FRAGMENT_TITLE.to_string(),
        }
    }
}

impl HtmlExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the `<title>` used when a bare fragment is wrapped.
    pub fn with_fragment_title(mut self, title: impl Into<String>) -> Self {
        self.fragment_title = title.into();
        self
    }

    /// Extracts a complete HTML document from `raw`.
    pub fn extract(&self, raw: &str) -> SanitizedDocument {
        let cleaned = strip_fences(raw);

        if let Some(found) = FULL_DOCUMENT.find(&cleaned) {
            return SanitizedDocument::new(found.as_str(), ExtractionPath::FullDocument);
        }

        if let Some(found) = ROOT_ELEMENT.find(&cleaned) {
            return SanitizedDocument::new(found.as_str(), ExtractionPath::RootElement);
        }

        if cleaned.contains('<') && cleaned.contains('>') {
            return SanitizedDocument::new(
                self.wrap_fragment(&cleaned),
                ExtractionPath::WrappedFragment,
            );
        }

        SanitizedDocument::new(diagnostic_page(raw), ExtractionPath::Diagnostic)
    }

    fn wrap_fragment(&self, fragment: &str) -> String {
        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
</head>
<body>
    {fragment}
</body>
</html>"#,
            title = html_escape(&self.fragment_title),
            fragment = fragment,
        )
    }
}

/// Removes fence markers (not their contents) until none remain, then trims.
///
/// A single pass can splice stray backticks into a fresh fence, hence the loop.
fn strip_fences(raw: &str) -> String {
    let mut text = raw.to_string();
    while text.contains("```") {
        let untagged = FENCE_WITH_HTML_TAG.replace_all(&text, "").into_owned();
        text = FENCE.replace_all(&untagged, "").into_owned();
    }
    text.trim().to_string()
}

fn diagnostic_page(raw: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Error</title>
</head>
<body>
    <div style="padding: 20px; text-align: center; font-family: Arial, sans-serif;">
        <h2>&#9888;&#65039; Could not extract HTML content</h2>
        <p>The AI response could not be parsed as HTML.</p>
        <details>
            <summary>Raw Response</summary>
            <pre style="text-align: left; background: #f5f5f5; padding: 10px; margin: 10px 0; border-radius: 5px;">{raw}</pre>
        </details>
    </div>
</body>
</html>"#,
        raw = html_escape(raw),
    )
}
