//! Shared types used across the Vagas scraper.
//!
//! This module defines the job record assembled from a listing page,
//! the newtype for listing codes, and the two derived classifications.

use crate::error::{Result, VagasError};
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Spreadsheet columns, in the order records are written.
pub const COLUMNS: [&str; 9] = [
    "Data_Coleta",
    "ID_Vaga",
    "Titulo_Empresa",
    "Local",
    "Data_Publicacao",
    "Descricao",
    "Pagina",
    "Modelo_Trabalho",
    "Senioridade",
];

/// Column holding the listing code, used for deduplication.
pub const ID_COLUMN: &str = "ID_Vaga";

/// Column holding the page number, written as a numeric cell.
pub const PAGE_COLUMN: &str = "Pagina";

/// Date format used for collection and publication dates.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Newtype for listing codes ("Código" on the listing page).
///
/// Codes are compared as strings. A code that went through a spreadsheet as a
/// number (`12345.0`) is normalised back to its integral text form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct JobId(String);

impl JobId {
    /// Create a new `JobId` from a string.
    ///
    /// # Errors
    /// Returns error if the code is empty after trimming.
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = Self::normalize(&id.into());
        if id.is_empty() {
            return Err(VagasError::Validation(
                "invalid job ID: must not be empty".to_string(),
            ));
        }
        Ok(Self(id))
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Trim and strip a float suffix such as `.0` from integral codes.
    #[must_use]
    pub fn normalize(raw: &str) -> String {
        static INTEGRAL_FLOAT: OnceLock<Regex> = OnceLock::new();
        let regex =
            INTEGRAL_FLOAT.get_or_init(|| Regex::new(r"^(\d+)\.0+$").expect("valid regex"));

        let trimmed = raw.trim();
        match regex.captures(trimmed) {
            Some(caps) => caps[1].to_string(),
            None => trimmed.to_string(),
        }
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

/// Where the work happens, as advertised by the listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkModel {
    /// "home office"
    HomeOffice,
    /// Fully remote
    Remote,
    /// Mix of on-site and remote
    Hybrid,
    /// On-site or not stated
    #[default]
    Unspecified,
}

impl WorkModel {
    /// Label written to the spreadsheet.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::HomeOffice => "Home Office",
            Self::Remote => "Remoto",
            Self::Hybrid => "Híbrido",
            Self::Unspecified => "Presencial/Não informado",
        }
    }
}

impl fmt::Display for WorkModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Experience level asked for by the listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Seniority {
    /// Senior / specialist
    Senior,
    /// "Pleno"
    MidLevel,
    /// Junior
    Junior,
    /// Internship / trainee
    Intern,
    /// Not stated
    #[default]
    Unspecified,
}

impl Seniority {
    /// Label written to the spreadsheet.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Senior => "Sênior",
            Self::MidLevel => "Pleno",
            Self::Junior => "Júnior",
            Self::Intern => "Estágio",
            Self::Unspecified => "Não informado",
        }
    }
}

impl fmt::Display for Seniority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One job listing segmented out of a result page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    /// Day the listing was collected
    pub collected_on: NaiveDate,
    /// Listing code
    pub id: JobId,
    /// Title / company line
    pub title: String,
    /// Location from the location/date line, when the listing has one
    pub location: Option<String>,
    /// Date at the end of the location/date line, as printed
    pub published_on: Option<String>,
    /// Remaining lines joined with `" | "`
    pub description: String,
    /// 1-based result page the listing was read on
    pub page: u32,
    /// Derived work model
    pub work_model: WorkModel,
    /// Derived seniority
    pub seniority: Seniority,
}

impl JobRecord {
    /// Render the record as spreadsheet cells, in [`COLUMNS`] order.
    #[must_use]
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.collected_on.format(DATE_FORMAT).to_string(),
            self.id.to_string(),
            self.title.clone(),
            self.location.clone().unwrap_or_default(),
            self.published_on.clone().unwrap_or_default(),
            self.description.clone(),
            self.page.to_string(),
            self.work_model.label().to_string(),
            self.seniority.label().to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> JobRecord {
        JobRecord {
            collected_on: NaiveDate::from_ymd_opt(2024, 3, 7).expect("valid date"),
            id: JobId::new("98765").expect("valid id"),
            title: "Desenvolvedor Java Pleno - ACME".to_string(),
            location: Some("São Paulo - SP".to_string()),
            published_on: Some("06/03/2024".to_string()),
            description: "Spring Boot | Kafka".to_string(),
            page: 2,
            work_model: WorkModel::Hybrid,
            seniority: Seniority::MidLevel,
        }
    }

    #[test]
    fn test_job_id_valid() {
        let id = JobId::new(" 12345 ").expect("valid job ID");
        assert_eq!(id.as_str(), "12345");
    }

    #[test]
    fn test_job_id_empty() {
        assert!(JobId::new("   ").is_err());
        assert!(JobId::new("").is_err());
    }

    #[test]
    fn test_job_id_float_normalization() {
        assert_eq!(JobId::normalize("12345.0"), "12345");
        assert_eq!(JobId::normalize("12345.000"), "12345");
        assert_eq!(JobId::normalize("12345.5"), "12345.5");
        assert_eq!(JobId::normalize("ABC-1"), "ABC-1");
        assert_eq!(JobId::new("777.0").expect("valid"), JobId::new("777").expect("valid"));
    }

    #[test]
    fn test_labels() {
        assert_eq!(WorkModel::HomeOffice.to_string(), "Home Office");
        assert_eq!(WorkModel::default().label(), "Presencial/Não informado");
        assert_eq!(Seniority::Senior.to_string(), "Sênior");
        assert_eq!(Seniority::default().label(), "Não informado");
    }

    #[test]
    fn test_to_row_matches_columns() {
        let row = sample_record().to_row();
        assert_eq!(row.len(), COLUMNS.len());
        assert_eq!(row[0], "07/03/2024");
        assert_eq!(row[1], "98765");
        assert_eq!(row[6], "2");
        assert_eq!(row[7], "Híbrido");
        assert_eq!(row[8], "Pleno");
    }

    #[test]
    fn test_missing_location_renders_empty() {
        let mut record = sample_record();
        record.location = None;
        record.published_on = None;
        let row = record.to_row();
        assert_eq!(row[3], "");
        assert_eq!(row[4], "");
    }

    #[test]
    fn test_work_model_serialization() {
        let json = serde_json::to_string(&WorkModel::HomeOffice).expect("serialize work model");
        assert_eq!(json, "\"home_office\"");

        let parsed: WorkModel = serde_json::from_str(&json).expect("deserialize work model");
        assert_eq!(parsed, WorkModel::HomeOffice);
    }
}
