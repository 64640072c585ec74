//! Vagas Scanner - listing extraction from the job board.
//!
//! This crate turns the rendered result pages of the job board into
//! [`JobRecord`](vagas_core::JobRecord)s. It drives the search form and
//! pagination through a [`BrowserActions`](vagas_browser::BrowserActions)
//! implementation, flattens each page to text, segments the text into
//! listings and classifies every listing by work model and seniority.
//!
//! # Example
//!
//! ```rust,ignore
//! use vagas_scanner::ScrapeOrchestrator;
//! use std::sync::Arc;
//!
//! let orchestrator = ScrapeOrchestrator::new(Arc::new(browser_engine), config.scraper);
//! let report = orchestrator.run().await;
//! println!("{} listings from {} pages", report.records.len(), report.pages_read);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod classify;
#[allow(missing_docs)]
pub mod error;
pub mod orchestrator;
pub mod parser;

// Re-export commonly used types
pub use classify::{classify_seniority, classify_work_model};
pub use error::{Result, ScanError};
pub use orchestrator::{ScrapeOrchestrator, ScrapeReport};
pub use parser::{page_text, segment};
