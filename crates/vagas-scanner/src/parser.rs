//! Segmentation of rendered result pages into job records.
//!
//! The listing page has no per-listing markup worth selecting on, so the
//! page is flattened to text and split on the "Código:" line that closes
//! every listing. Lines seen since the previous marker form one listing.

use crate::classify::{classify_seniority, classify_work_model};
use chrono::NaiveDate;
use regex::Regex;
use scraper::Html;
use std::sync::OnceLock;
use vagas_core::{JobId, JobRecord};

/// Word that marks the code line closing each listing.
const CODE_MARKER: &str = "Código";

/// Separator placed between description lines.
const DESCRIPTION_SEPARATOR: &str = " | ";

/// Elements whose text is never part of the visible listing.
const SKIPPED_ELEMENTS: [&str; 3] = ["script", "style", "noscript"];

/// All text of the document, in document order.
///
/// Text nodes are concatenated as-is, so line breaks in the markup survive
/// and can be used for segmentation.
#[must_use]
pub fn page_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut out = String::with_capacity(html.len() / 2);

    for node in document.tree.root().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let skipped = node.parent().is_some_and(|parent| {
            parent
                .value()
                .as_element()
                .is_some_and(|el| SKIPPED_ELEMENTS.contains(&el.name()))
        });
        if !skipped {
            out.push_str(&text.text);
        }
    }

    out
}

/// Whether a trimmed line is the code line that closes a listing.
fn is_code_line(line: &str) -> bool {
    line.contains(CODE_MARKER) && line.contains(':')
}

/// Listing code from a code line such as `Código: 123456 - Enviar CV`.
///
/// Takes the text between the first and second `:`, up to the first `-`.
/// Falls back to the whole line when that piece is empty.
fn extract_code(line: &str) -> String {
    let code = line
        .split(':')
        .nth(1)
        .and_then(|after| after.split('-').next())
        .map(str::trim)
        .unwrap_or_default();

    if code.is_empty() {
        line.to_string()
    } else {
        code.to_string()
    }
}

/// Split a line ending in a date into (location, date).
fn split_location_date(line: &str) -> Option<(Option<String>, String)> {
    static DATE_SUFFIX: OnceLock<Regex> = OnceLock::new();
    let regex = DATE_SUFFIX.get_or_init(|| {
        Regex::new(r"^(.*?)(\d{1,2}/\d{1,2}/(?:\d{4}|\d{2}))\s*$").expect("valid regex")
    });

    let caps = regex.captures(line)?;
    let location = caps[1]
        .trim_end_matches(|c: char| c == '-' || c == ',' || c.is_whitespace())
        .trim();
    let location = (!location.is_empty()).then(|| location.to_string());
    Some((location, caps[2].to_string()))
}

/// Build a record from the lines buffered before a code line.
fn assemble(lines: &[String], code: &str, page: u32, collected_on: NaiveDate) -> Option<JobRecord> {
    let id = match JobId::new(code) {
        Ok(id) => id,
        Err(e) => {
            tracing::warn!("Skipping listing on page {}: {}", page, e);
            return None;
        }
    };

    let (first, rest) = lines.split_first()?;
    let (location, published_on, title, description_lines) = match split_location_date(first) {
        Some((location, date)) => {
            let (title, description) = match rest.split_first() {
                Some((title, description)) => (title.clone(), description),
                None => (String::new(), rest),
            };
            (location, Some(date), title, description)
        }
        None => (None, None, first.clone(), rest),
    };

    let description = description_lines.join(DESCRIPTION_SEPARATOR);
    let assembled = format!(
        "{title} {} {description}",
        location.as_deref().unwrap_or_default()
    );

    Some(JobRecord {
        collected_on,
        id,
        title,
        location,
        published_on,
        description,
        page,
        work_model: classify_work_model(&assembled),
        seniority: classify_seniority(&assembled),
    })
}

/// Segment page text into job records.
///
/// Blank lines are ignored. Lines accumulate until a code line is seen; the
/// code line then closes a record built from the accumulated lines. Lines
/// after the last code line are dropped.
#[must_use]
pub fn segment(text: &str, page: u32, collected_on: NaiveDate) -> Vec<JobRecord> {
    let mut records = Vec::new();
    let mut buffer: Vec<String> = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if is_code_line(line) {
            let code = extract_code(line);
            if !buffer.is_empty() {
                if let Some(record) = assemble(&buffer, &code, page, collected_on) {
                    records.push(record);
                }
            }
            buffer.clear();
        } else {
            buffer.push(line.to_string());
        }
    }

    if !buffer.is_empty() {
        tracing::trace!("Dropping {} trailing lines on page {}", buffer.len(), page);
    }

    records
}
