//! The listing archive on disk.
//!
//! Provides `Archive`, which owns the workbook path and applies a batch of
//! freshly scraped records to it.

use crate::error::Result;
use crate::sheet::{dedupe_batch, merge, Sheet};
use crate::workbook;
use std::path::PathBuf;
use vagas_core::JobRecord;

/// What [`Archive::persist`] did with a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistOutcome {
    /// The batch was empty; the workbook was not touched.
    NothingCollected,
    /// No workbook existed; one was created.
    Created {
        /// Rows written
        written: usize,
    },
    /// Every listing was already archived; the workbook was not touched.
    UpToDate {
        /// Listings in the batch
        read: usize,
    },
    /// New listings were appended to the workbook.
    Appended {
        /// Listings in the batch
        read: usize,
        /// Listings not previously archived
        new: usize,
    },
    /// The existing workbook could not be read and was overwritten.
    Replaced {
        /// Rows written
        written: usize,
    },
}

/// Workbook holding every listing collected so far.
#[derive(Debug, Clone)]
pub struct Archive {
    path: PathBuf,
    sheet_name: String,
}

impl Archive {
    /// Create an archive handle. Nothing is read until it is used.
    pub fn new(path: impl Into<PathBuf>, sheet_name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            sheet_name: sheet_name.into(),
        }
    }

    /// Whether the workbook file exists.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read the archived sheet.
    pub fn load(&self) -> Result<Sheet> {
        workbook::read_sheet(&self.path)
    }

    /// Overwrite the workbook with `sheet`.
    pub fn save(&self, sheet: &Sheet) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        workbook::write_sheet(&self.path, &self.sheet_name, sheet)
    }

    /// Add the listings of `records` that are not archived yet.
    ///
    /// Duplicate codes within the batch keep their first occurrence. An
    /// existing workbook that cannot be read (or has no code column) is
    /// replaced by the batch.
    pub fn persist(&self, records: Vec<JobRecord>) -> Result<PersistOutcome> {
        if records.is_empty() {
            tracing::info!("No listings collected");
            return Ok(PersistOutcome::NothingCollected);
        }

        let read = records.len();
        let batch = dedupe_batch(records);

        if !self.exists() {
            let sheet = Sheet::from_records(&batch);
            self.save(&sheet)?;
            tracing::info!(
                "Created {} with {} listings",
                self.path.display(),
                sheet.len()
            );
            return Ok(PersistOutcome::Created {
                written: sheet.len(),
            });
        }

        match self.load().and_then(|existing| merge(existing, &batch)) {
            Ok(outcome) => {
                tracing::info!("{} read, {} new saved", read, outcome.new_count);
                if outcome.new_count == 0 {
                    tracing::info!("Spreadsheet already up to date");
                    return Ok(PersistOutcome::UpToDate { read });
                }
                self.save(&outcome.sheet)?;
                Ok(PersistOutcome::Appended {
                    read,
                    new: outcome.new_count,
                })
            }
            Err(e) => {
                tracing::warn!(
                    "Could not read {} ({}); replacing it with this run's listings",
                    self.path.display(),
                    e
                );
                let sheet = Sheet::from_records(&batch);
                self.save(&sheet)?;
                Ok(PersistOutcome::Replaced {
                    written: sheet.len(),
                })
            }
        }
    }
}
