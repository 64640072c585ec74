use crate::error::{BrowserError, Result};

/// Browser actions for automation
#[async_trait::async_trait]
pub trait BrowserActions: Send + Sync {
    /// Navigate to a URL
    async fn navigate(&self, url: &str) -> Result<()>;

    /// Type into a form field by selector
    async fn fill_field(&self, selector: &str, value: &str) -> Result<()>;

    /// Assign a form field's value through script.
    ///
    /// Works on inputs that reject synthetic typing ("invalid element state").
    async fn set_value(&self, selector: &str, value: &str) -> Result<()>;

    /// Click an element by selector
    async fn click(&self, selector: &str) -> Result<()>;

    /// Click an element by dispatching `click()` from script
    async fn click_via_script(&self, selector: &str) -> Result<()>;

    /// Wait for a selector to appear
    async fn wait_for_selector(&self, selector: &str, timeout_ms: u64) -> Result<()>;

    /// Extract text from an element
    async fn extract_text(&self, selector: &str) -> Result<String>;

    /// Current page HTML
    async fn content(&self) -> Result<String>;

    /// Scroll the window to the bottom of the document
    async fn scroll_to_bottom(&self) -> Result<()>;

    /// Take a screenshot
    async fn screenshot(&self) -> Result<Vec<u8>>;
}

/// Helper to extract domain from URL
pub fn extract_domain(url: &str) -> Result<String> {
    let url = url::Url::parse(url)
        .map_err(|e| BrowserError::NavigationError(format!("Invalid URL: {}", e)))?;

    url.host_str()
        .ok_or_else(|| BrowserError::NavigationError("No host in URL".to_string()))
        .map(|s| s.to_string())
}

/// Script scrolling the window to the end of the document.
pub const SCROLL_TO_BOTTOM: &str = "window.scrollTo(0, document.body.scrollHeight); true";

/// Quote a Rust string as a JavaScript string literal.
fn js_string(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

/// Script assigning `value` to the first element matching `selector`.
///
/// Evaluates to `false` when nothing matches.
pub fn set_value_script(selector: &str, value: &str) -> String {
    format!(
        "(() => {{ const el = document.querySelector({sel}); if (!el) return false; el.value = {val}; return true; }})()",
        sel = js_string(selector),
        val = js_string(value),
    )
}

/// Script clicking the first element matching `selector`.
///
/// Evaluates to `false` when nothing matches.
pub fn click_script(selector: &str) -> String {
    format!(
        "(() => {{ const el = document.querySelector({sel}); if (!el) return false; el.click(); return true; }})()",
        sel = js_string(selector),
    )
}
