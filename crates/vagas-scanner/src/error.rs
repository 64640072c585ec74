use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Search button {selector} not clickable after {timeout_secs}s")]
    SubmitNotFound { selector: String, timeout_secs: u64 },

    #[error("Could not move to page {page}: {source}")]
    Pagination {
        page: u32,
        #[source]
        source: vagas_browser::BrowserError,
    },

    #[error("Browser error: {0}")]
    Browser(#[from] vagas_browser::BrowserError),
}

pub type Result<T> = std::result::Result<T, ScanError>;
