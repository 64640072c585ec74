//! Browser automation engine for the listing site.
//!
//! Provides headless Chromium control over a single page, with
//! script-driven form manipulation and per-domain rate limiting.

pub mod actions;
pub mod engine;
pub mod error;

pub use actions::BrowserActions;
pub use engine::BrowserEngine;
pub use error::{BrowserError, Result};
