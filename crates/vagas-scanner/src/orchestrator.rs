//! Scrape orchestrator for walking the paginated result list.
//!
//! This module provides the `ScrapeOrchestrator` which submits the search
//! form, reads a bounded number of result pages and segments each one into
//! job records.

use crate::error::{Result, ScanError};
use crate::parser;
use chrono::{Local, NaiveDate};
use std::sync::Arc;
use std::time::Duration;
use vagas_browser::{BrowserActions, BrowserError};
use vagas_core::{JobRecord, ScraperConfig};

/// Outcome of a scrape run.
///
/// Records gathered before a failure are always kept.
#[derive(Debug, Clone, Default)]
pub struct ScrapeReport {
    /// Listings in the order they were read
    pub records: Vec<JobRecord>,
    /// Number of result pages that were read
    pub pages_read: u32,
    /// Error message if the run ended before the page target
    pub error: Option<String>,
}

impl ScrapeReport {
    /// Whether every requested page was read.
    #[must_use]
    pub fn completed(&self) -> bool {
        self.error.is_none()
    }
}

/// Drives the search form and pagination of the listing site.
pub struct ScrapeOrchestrator<B: BrowserActions> {
    /// Browser used for every page interaction
    browser: Arc<B>,
    /// Site selectors, page target and timings
    config: ScraperConfig,
    /// Date stamped on every collected record
    collected_on: NaiveDate,
}

impl<B: BrowserActions> ScrapeOrchestrator<B> {
    /// Create a new orchestrator stamping records with today's date.
    #[must_use]
    pub fn new(browser: Arc<B>, config: ScraperConfig) -> Self {
        Self {
            browser,
            config,
            collected_on: Local::now().date_naive(),
        }
    }

    /// Stamp records with a fixed collection date.
    #[must_use]
    pub fn with_collection_date(mut self, date: NaiveDate) -> Self {
        self.collected_on = date;
        self
    }

    /// Run the scrape.
    ///
    /// Never fails: a fatal error (site unreachable, search button missing)
    /// is logged and reported in [`ScrapeReport::error`] alongside whatever
    /// was collected before it.
    pub async fn run(&self) -> ScrapeReport {
        let mut report = ScrapeReport::default();

        if let Err(e) = self.scrape_pages(&mut report).await {
            match &e {
                ScanError::Pagination { .. } => {
                    tracing::warn!("{}; keeping {} listings", e, report.records.len());
                }
                _ => tracing::error!("Fatal scrape error: {}", e),
            }
            report.error = Some(e.to_string());
        }

        tracing::info!(
            "Scrape finished: {} listings from {} pages",
            report.records.len(),
            report.pages_read
        );
        report
    }

    async fn scrape_pages(&self, report: &mut ScrapeReport) -> Result<()> {
        tracing::info!("Opening {}", self.config.start_url);
        self.browser.navigate(&self.config.start_url).await?;

        tracing::info!("Submitting search");
        self.submit_search().await?;

        let max_pages = self.config.max_pages;
        for page in 1..=max_pages {
            tracing::info!("Reading page {}", page);
            sleep_ms(self.config.page_settle_ms).await;

            let html = self.browser.content().await?;
            let records = parser::segment(&parser::page_text(&html), page, self.collected_on);
            tracing::info!("Page {}: {} listings found", page, records.len());

            report.records.extend(records);
            report.pages_read = page;

            if page == max_pages {
                tracing::info!("Page target of {} reached", max_pages);
                break;
            }

            self.advance_to(page + 1)
                .await
                .map_err(|source| ScanError::Pagination {
                    page: page + 1,
                    source,
                })?;
        }

        Ok(())
    }

    async fn submit_search(&self) -> Result<()> {
        let selector = &self.config.submit_selector;
        let timeout_secs = self.config.submit_timeout_secs;

        match self
            .browser
            .wait_for_selector(selector, timeout_secs.saturating_mul(1000))
            .await
        {
            Ok(()) => {}
            Err(BrowserError::Timeout(_)) => {
                return Err(ScanError::SubmitNotFound {
                    selector: selector.clone(),
                    timeout_secs,
                })
            }
            Err(e) => return Err(e.into()),
        }

        self.browser.click(selector).await?;
        Ok(())
    }

    /// Move the result list to `next`.
    ///
    /// The page input rejects typed input, so both the value and the confirm
    /// click go through script.
    async fn advance_to(&self, next: u32) -> std::result::Result<(), BrowserError> {
        self.browser.scroll_to_bottom().await?;
        sleep_ms(self.config.scroll_settle_ms).await;

        let field = format!("input[name='{}']", self.config.page_field_name);
        self.browser.set_value(&field, &next.to_string()).await?;
        self.browser
            .click_via_script(&self.config.page_button_selector)
            .await?;

        tracing::debug!("Requested page {}", next);
        Ok(())
    }
}

async fn sleep_ms(ms: u64) {
    if ms > 0 {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }
}
