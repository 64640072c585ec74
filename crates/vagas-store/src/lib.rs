//! Vagas Spreadsheet Archive
//!
//! Keeps every listing ever collected in a single `.xlsx` workbook. Each run
//! loads the existing sheet, appends only listings whose code is not there
//! yet and rewrites the workbook.
//!
//! # Example
//!
//! ```ignore
//! use vagas_store::{Archive, PersistOutcome};
//!
//! let archive = Archive::new("vagas_apinfo.xlsx", "Vagas");
//! match archive.persist(report.records)? {
//!     PersistOutcome::Appended { read, new } => println!("{read} read, {new} new saved"),
//!     other => println!("{other:?}"),
//! }
//! ```
//!
//! # Layout
//!
//! - Row 1 holds the column names, the remaining rows hold one listing each
//! - Listing codes are compared as text, whatever cell type they were read from
//! - Columns unknown to this version are carried over untouched

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod archive;
pub mod error;
pub mod sheet;
pub mod workbook;

pub use archive::{Archive, PersistOutcome};
pub use error::{Result, StoreError};
pub use sheet::{dedupe_batch, merge, MergeOutcome, Sheet};
