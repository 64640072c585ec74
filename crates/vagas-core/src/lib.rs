//! Vagas Core - Foundation crate for the Vagas job-listing scraper.
//!
//! This crate provides shared types, error handling and configuration
//! management that the browser, scanner and store crates depend on.
//!
//! # Modules
//!
//! - [`error`] - Central error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths
//! - [`types`] - Job records and their derived classifications (`JobId`, `WorkModel`, `Seniority`)
//!
//! # Example
//!
//! ```rust
//! use vagas_core::AppConfig;
//!
//! let config = AppConfig::default();
//! assert_eq!(config.scraper.max_pages, 20);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{AppConfig, BrowserConfig, OutputConfig, ScraperConfig};
pub use error::{ConfigError, ConfigResult, Result, VagasError};
pub use types::{
    JobId, JobRecord, Seniority, WorkModel, COLUMNS, DATE_FORMAT, ID_COLUMN, PAGE_COLUMN,
};
