//! Address bar component.

use common::{ShellError, ShellResult};
use url::Url;

/// Schemes accepted as typed.
const KNOWN_SCHEMES: [&str; 2] = ["http://", "https://"];

/// Scheme prepended to bare input.
const DEFAULT_SCHEME: &str = "https://";

/// Turn typed address bar input into a navigable URL.
///
/// Returns `Ok(None)` for blank input. Input without an `http://` or
/// `https://` prefix gets `https://` prepended; the result is returned as
/// text, not re-serialized, so `example.com` becomes `https://example.com`.
pub fn normalize_input(input: &str) -> ShellResult<Option<String>> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }

    let url = if KNOWN_SCHEMES.iter().any(|scheme| input.starts_with(scheme)) {
        input.to_string()
    } else {
        format!("{}{}", DEFAULT_SCHEME, input)
    };

    match Url::parse(&url) {
        Ok(parsed) if parsed.host_str().is_some_and(|host| !host.is_empty()) => Ok(Some(url)),
        Ok(_) => Err(ShellError::invalid_url(url)),
        Err(err) => Err(ShellError::invalid_url(format!("{}: {}", url, err))),
    }
}

/// Address bar.
pub struct UrlBar {
    /// Displayed text.
    text: String,
    /// Cursor position, in characters.
    cursor: usize,
}

impl UrlBar {
    /// Create an empty address bar.
    pub fn new() -> Self {
        Self {
            text: String::new(),
            cursor: 0,
        }
    }

    /// Get the displayed text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get cursor position.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Replace the text with a committed page URL and move the cursor to the start.
    pub fn set_url(&mut self, url: &str) {
        self.text = url.to_string();
        self.cursor = 0;
    }

    /// Set the text as typed by the user.
    pub fn set_input(&mut self, input: &str) {
        self.text = input.to_string();
        self.cursor = self.text.chars().count();
    }

    /// Commit the current text, returning the URL to navigate to.
    pub fn submit(&self) -> ShellResult<Option<String>> {
        normalize_input(&self.text)
    }
}

impl Default for UrlBar {
    fn default() -> Self {
        Self::new()
    }
}
