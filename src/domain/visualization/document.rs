//! Sanitized HTML documents handed to the render target.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which step of the extraction chain produced a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionPath {
    /// A `<!DOCTYPE html>` ... `</html>` span was found.
    FullDocument,
    /// An `<html>` ... `</html>` span was found without a doctype.
    RootElement,
    /// Bare markup was wrapped in a minimal document shell.
    WrappedFragment,
    /// Nothing usable; the raw response is shown for diagnosis.
    Diagnostic,
}

impl ExtractionPath {
    /// True when the model output itself carried a root element.
    pub fn is_verbatim(&self) -> bool {
        matches!(self, ExtractionPath::FullDocument | ExtractionPath::RootElement)
    }
}

impl fmt::Display for ExtractionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ExtractionPath::FullDocument => "full_document",
            ExtractionPath::RootElement => "root_element",
            ExtractionPath::WrappedFragment => "wrapped_fragment",
            ExtractionPath::Diagnostic => "diagnostic",
        };
        f.write_str(s)
    }
}

/// A complete HTML document safe to hand to a sandboxed frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedDocument {
    html: String,
    path: ExtractionPath,
}

impl SanitizedDocument {
    pub(crate) fn new(html: impl Into<String>, path: ExtractionPath) -> Self {
        Self {
            html: html.into(),
            path,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.html
    }

    pub fn path(&self) -> ExtractionPath {
        self.path
    }

    pub fn len(&self) -> usize {
        self.html.len()
    }

    pub fn is_empty(&self) -> bool {
        self.html.is_empty()
    }

    pub fn into_html(self) -> String {
        self.html
    }
}

impl fmt::Display for SanitizedDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.html)
    }
}

/// Escapes text for embedding in HTML element content or attribute values.
///
/// Backticks are escaped too so embedded text can never form a markdown fence.
pub(crate) fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '`' => out.push_str("&#96;"),
            _ => out.push(c),
        }
    }
    out
}
