//! Static error document shown when a generation cycle fails upstream.

use super::document::html_escape;

/// Renders the user-facing error page offering a retry.
///
/// The message is escaped; upstream error bodies can contain arbitrary text.
pub fn render_error_page(message: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>Error</title>
    <style>
        body {{ font-family: Arial, sans-serif; padding: 20px; text-align: center; }}
        .error {{ color: #dc3545; margin: 20px 0; }}
        .retry {{ background: #007bff; color: white; padding: 10px 20px; border: none; border-radius: 5px; cursor: pointer; }}
    </style>
</head>
<body>
    <h2 class="error">&#9888;&#65039; Error generating visualization</h2>
    <p>Error: {message}</p>
    <p>Please try again with a different concept or check the server logs for details.</p>
    <button class="retry" onclick="window.location.reload()">Try Again</button>
</body>
</html>"#,
        message = html_escape(message),
    )
}
