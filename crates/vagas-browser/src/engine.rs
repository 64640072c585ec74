use crate::actions::{self, BrowserActions};
use crate::error::{BrowserError, Result};
use chromiumoxide::browser::{Browser, BrowserConfig as ChromiumConfig};
use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::Page;
use futures_util::stream::StreamExt;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use vagas_core::BrowserConfig;

/// Interval between element lookups while waiting for a selector.
const SELECTOR_POLL_MS: u64 = 250;

/// Rate limiter per domain
#[derive(Debug)]
struct RateLimiter {
    last_access: HashMap<String, Instant>,
    min_delay: Duration,
}

impl RateLimiter {
    fn new(min_delay_ms: u64) -> Self {
        Self {
            last_access: HashMap::new(),
            min_delay: Duration::from_millis(min_delay_ms),
        }
    }

    fn check_and_update(&mut self, domain: &str) -> Result<()> {
        if let Some(last) = self.last_access.get(domain) {
            let elapsed = last.elapsed();
            if elapsed < self.min_delay {
                return Err(BrowserError::RateLimitExceeded(domain.to_string()));
            }
        }
        self.last_access.insert(domain.to_string(), Instant::now());
        Ok(())
    }
}

/// Browser automation engine driving a single Chromium page.
pub struct BrowserEngine {
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
    rate_limiter: RwLock<RateLimiter>,
    navigation_timeout: Duration,
}

impl BrowserEngine {
    /// Launch Chromium with the given settings and open a blank page.
    pub async fn launch(config: &BrowserConfig) -> Result<Self> {
        let mut builder = ChromiumConfig::builder()
            .no_sandbox()
            .arg("--disable-dev-shm-usage")
            .window_size(config.window_width, config.window_height);
        if !config.headless {
            builder = builder.with_head();
        }
        let chromium_config = builder.build().map_err(BrowserError::ChromiumError)?;

        let (browser, mut handler) = Browser::launch(chromium_config)
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("chromium handler event error: {}", e);
                }
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;

        tracing::info!(
            "Browser launched (headless={}, {}x{})",
            config.headless,
            config.window_width,
            config.window_height
        );

        Ok(Self {
            browser,
            page,
            handler,
            rate_limiter: RwLock::new(RateLimiter::new(config.min_navigation_delay_ms)),
            navigation_timeout: Duration::from_secs(config.navigation_timeout_secs),
        })
    }

    /// Close the browser and stop the event handler.
    pub async fn close(mut self) -> Result<()> {
        let closed = self
            .browser
            .close()
            .await
            .map(|_| ())
            .map_err(|e| BrowserError::ChromiumError(e.to_string()));
        if let Err(e) = self.browser.wait().await {
            tracing::debug!("waiting for browser exit failed: {}", e);
        }
        self.handler.abort();
        closed
    }

    async fn eval_bool(&self, script: String, selector: &str) -> Result<()> {
        let found = self
            .page
            .evaluate(script)
            .await
            .map_err(|e| BrowserError::ScriptError(e.to_string()))?
            .into_value::<bool>()
            .map_err(|e| BrowserError::ScriptError(e.to_string()))?;

        if found {
            Ok(())
        } else {
            Err(BrowserError::SelectorNotFound(selector.to_string()))
        }
    }
}

#[async_trait::async_trait]
impl BrowserActions for BrowserEngine {
    async fn navigate(&self, url: &str) -> Result<()> {
        let domain = actions::extract_domain(url)?;
        self.rate_limiter.write().await.check_and_update(&domain)?;

        tracing::debug!("Navigating to {}", url);
        tokio::time::timeout(self.navigation_timeout, self.page.goto(url))
            .await
            .map_err(|_| BrowserError::Timeout(format!("navigation to {url}")))?
            .map_err(|e| BrowserError::NavigationError(e.to_string()))?;
        Ok(())
    }

    async fn fill_field(&self, selector: &str, value: &str) -> Result<()> {
        let element = self
            .page
            .find_element(selector)
            .await
            .map_err(|_| BrowserError::SelectorNotFound(selector.to_string()))?;
        element
            .click()
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?
            .type_str(value)
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;
        Ok(())
    }

    async fn set_value(&self, selector: &str, value: &str) -> Result<()> {
        self.eval_bool(actions::set_value_script(selector, value), selector)
            .await
    }

    async fn click(&self, selector: &str) -> Result<()> {
        let element = self
            .page
            .find_element(selector)
            .await
            .map_err(|_| BrowserError::SelectorNotFound(selector.to_string()))?;
        element
            .click()
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;
        Ok(())
    }

    async fn click_via_script(&self, selector: &str) -> Result<()> {
        self.eval_bool(actions::click_script(selector), selector)
            .await
    }

    async fn wait_for_selector(&self, selector: &str, timeout_ms: u64) -> Result<()> {
        // A deadline past what `Instant` can represent means wait indefinitely.
        let deadline = Instant::now().checked_add(Duration::from_millis(timeout_ms));
        loop {
            if self.page.find_element(selector).await.is_ok() {
                return Ok(());
            }
            if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                return Err(BrowserError::Timeout(format!(
                    "selector {selector} did not appear within {timeout_ms}ms"
                )));
            }
            tokio::time::sleep(Duration::from_millis(SELECTOR_POLL_MS)).await;
        }
    }

    async fn extract_text(&self, selector: &str) -> Result<String> {
        let element = self
            .page
            .find_element(selector)
            .await
            .map_err(|_| BrowserError::SelectorNotFound(selector.to_string()))?;
        let text = element
            .inner_text()
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;
        Ok(text.unwrap_or_default())
    }

    async fn content(&self) -> Result<String> {
        self.page
            .content()
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))
    }

    async fn scroll_to_bottom(&self) -> Result<()> {
        self.page
            .evaluate(actions::SCROLL_TO_BOTTOM)
            .await
            .map_err(|e| BrowserError::ScriptError(e.to_string()))?;
        Ok(())
    }

    async fn screenshot(&self) -> Result<Vec<u8>> {
        self.page
            .screenshot(ScreenshotParams::builder().full_page(true).build())
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))
    }
}
