//! In-memory worksheet and the deduplicating merge.

use crate::error::{Result, StoreError};
use std::collections::HashSet;
use vagas_core::{JobId, JobRecord, COLUMNS, ID_COLUMN};

/// A worksheet as text cells: a header row plus data rows.
///
/// Every row has exactly `columns.len()` cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sheet {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Sheet {
    /// Build a sheet with the recognised columns from fresh records.
    #[must_use]
    pub fn from_records(records: &[JobRecord]) -> Self {
        Self {
            columns: COLUMNS.iter().map(ToString::to_string).collect(),
            rows: records.iter().map(JobRecord::to_row).collect(),
        }
    }

    /// Build a sheet from raw rows, padding or truncating them to the header width.
    #[must_use]
    pub fn from_raw(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();
        Self { columns, rows }
    }

    /// Column names from the header row.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Data rows, each as wide as the header.
    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Position of a column by name.
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Listing codes present in the sheet, normalised for comparison.
    pub fn ids(&self) -> Result<HashSet<String>> {
        let idx = self
            .column_index(ID_COLUMN)
            .ok_or_else(|| StoreError::MissingColumn(ID_COLUMN.to_string()))?;
        Ok(self
            .rows
            .iter()
            .map(|row| JobId::normalize(row.get(idx).map_or("", String::as_str)))
            .collect())
    }

    /// Number of data rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the sheet has no data rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Result of merging fresh records into an existing sheet.
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    /// Existing rows followed by the new ones
    pub sheet: Sheet,
    /// Number of records that were not in the existing sheet
    pub new_count: usize,
}

/// Drop records whose code already appeared earlier in the batch.
#[must_use]
pub fn dedupe_batch(records: Vec<JobRecord>) -> Vec<JobRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| seen.insert(record.id.clone()))
        .collect()
}

/// Append the records of `fresh` whose code is not already in `existing`.
///
/// Columns of the existing sheet keep their order; recognised columns it
/// lacks are appended and left empty for the old rows.
pub fn merge(existing: Sheet, fresh: &[JobRecord]) -> Result<MergeOutcome> {
    let known = existing.ids()?;

    let mut columns = existing.columns;
    for column in COLUMNS {
        if !columns.iter().any(|c| c == column) {
            columns.push(column.to_string());
        }
    }

    let width = columns.len();
    let mut rows: Vec<Vec<String>> = existing
        .rows
        .into_iter()
        .map(|mut row| {
            row.resize(width, String::new());
            row
        })
        .collect();

    // Position of each output column within a record row.
    let sources: Vec<Option<usize>> = columns
        .iter()
        .map(|column| COLUMNS.iter().position(|c| *c == column.as_str()))
        .collect();

    let mut new_count = 0;
    for record in fresh.iter().filter(|r| !known.contains(r.id.as_str())) {
        let cells = record.to_row();
        rows.push(
            sources
                .iter()
                .map(|source| source.map(|idx| cells[idx].clone()).unwrap_or_default())
                .collect(),
        );
        new_count += 1;
    }

    Ok(MergeOutcome {
        sheet: Sheet { columns, rows },
        new_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use vagas_core::{Seniority, WorkModel};

    fn record(id: &str, title: &str) -> JobRecord {
        JobRecord {
            collected_on: NaiveDate::from_ymd_opt(2024, 3, 7).expect("valid date"),
            id: JobId::new(id).expect("valid id"),
            title: title.to_string(),
            location: None,
            published_on: None,
            description: String::new(),
            page: 1,
            work_model: WorkModel::Unspecified,
            seniority: Seniority::Unspecified,
        }
    }

    fn legacy_sheet() -> Sheet {
        Sheet::from_raw(
            vec![
                "Data_Coleta".to_string(),
                "ID_Vaga".to_string(),
                "Titulo_Empresa".to_string(),
                "Descricao".to_string(),
                "Pagina".to_string(),
            ],
            vec![
                vec!["01/03/2024".into(), "100".into(), "Dev A".into(), "".into(), "1".into()],
                vec!["01/03/2024".into(), "200.0".into(), "Dev B".into(), "".into(), "2".into()],
            ],
        )
    }

    #[test]
    fn test_dedupe_batch_keeps_first() {
        let records = vec![record("1", "first"), record("2", "x"), record("1", "second")];
        let deduped = dedupe_batch(records);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].title, "first");
        assert_eq!(deduped[1].id.as_str(), "2");
    }

    #[test]
    fn test_from_raw_pads_rows() {
        let sheet = Sheet::from_raw(
            vec!["a".to_string(), "b".to_string()],
            vec![vec!["1".to_string()], vec!["1".into(), "2".into(), "3".into()]],
        );
        assert_eq!(sheet.rows[0], vec!["1".to_string(), String::new()]);
        assert_eq!(sheet.rows[1].len(), 2);
    }

    #[test]
    fn test_merge_filters_known_ids() {
        let fresh = vec![record("100", "dup"), record("200", "dup float"), record("300", "new")];
        let outcome = merge(legacy_sheet(), &fresh).expect("merge");

        assert_eq!(outcome.new_count, 1);
        assert_eq!(outcome.sheet.len(), 3);

        let id_idx = outcome.sheet.column_index(ID_COLUMN).expect("id column");
        let ids: Vec<&str> = outcome.sheet.rows.iter().map(|r| r[id_idx].as_str()).collect();
        assert_eq!(ids, vec!["100", "200.0", "300"]);
    }

    #[test]
    fn test_merge_unions_columns() {
        let mut fresh = record("300", "Dev C");
        fresh.work_model = WorkModel::Remote;
        let outcome = merge(legacy_sheet(), &[fresh]).expect("merge");
        let sheet = outcome.sheet;

        // Legacy order first, then the columns the old file lacked.
        assert_eq!(
            sheet.columns,
            vec![
                "Data_Coleta",
                "ID_Vaga",
                "Titulo_Empresa",
                "Descricao",
                "Pagina",
                "Local",
                "Data_Publicacao",
                "Modelo_Trabalho",
                "Senioridade",
            ]
        );

        let model_idx = sheet.column_index("Modelo_Trabalho").expect("column");
        assert_eq!(sheet.rows[0][model_idx], "");
        assert_eq!(sheet.rows[2][model_idx], "Remoto");
        assert!(sheet.rows.iter().all(|r| r.len() == sheet.columns.len()));
    }

    #[test]
    fn test_merge_keeps_unknown_columns() {
        let existing = Sheet::from_raw(
            vec!["ID_Vaga".to_string(), "Observacao".to_string()],
            vec![vec!["1".into(), "ligar".into()]],
        );
        let outcome = merge(existing, &[record("2", "Dev")]).expect("merge");
        let obs = outcome.sheet.column_index("Observacao").expect("column");
        assert_eq!(outcome.sheet.rows[0][obs], "ligar");
        assert_eq!(outcome.sheet.rows[1][obs], "");
    }

    #[test]
    fn test_merge_requires_id_column() {
        let existing = Sheet::from_raw(vec!["Titulo".to_string()], vec![]);
        let err = merge(existing, &[record("1", "x")]).unwrap_err();
        assert!(matches!(err, StoreError::MissingColumn(_)));
    }

    #[test]
    fn test_ids_tolerate_short_rows() {
        let existing = Sheet {
            columns: vec!["Titulo".to_string(), "ID_Vaga".to_string()],
            rows: vec![vec!["only title".to_string()]],
        };

        assert_eq!(existing.ids().expect("ids"), HashSet::from([String::new()]));

        let outcome = merge(existing, &[record("1", "Dev")]).expect("merge");
        assert_eq!(outcome.new_count, 1);
        assert!(outcome.sheet.rows().iter().all(|r| r.len() == outcome.sheet.columns().len()));
        assert_eq!(outcome.sheet.rows()[0], vec!["only title".to_string(), String::new()]);
    }

    #[test]
    fn test_merge_fills_cells_by_column_name() {
        let mut fresh = record("42", "Dev Rust");
        fresh.location = Some("Recife - PE".to_string());
        fresh.seniority = Seniority::Senior;

        let existing = Sheet::from_raw(
            vec!["Senioridade".to_string(), "ID_Vaga".to_string(), "Local".to_string()],
            vec![],
        );
        let outcome = merge(existing, &[fresh]).expect("merge");
        let sheet = outcome.sheet;
        let row = &sheet.rows()[0];

        assert_eq!(&row[..3], &["Sênior", "42", "Recife - PE"]);
        let title = sheet.column_index("Titulo_Empresa").expect("column");
        assert_eq!(row[title], "Dev Rust");
    }

    #[test]
    fn test_merge_nothing_new() {
        let outcome = merge(legacy_sheet(), &[record("100", "again")]).expect("merge");
        assert_eq!(outcome.new_count, 0);
        assert_eq!(outcome.sheet.len(), 2);
    }
}
