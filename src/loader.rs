//! CSV loader for class grade journals.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use tracing::{error, info};

use crate::error::{JournalError, Result};

/// Header names accepted for the student identifier column.
pub const ID_COLUMNS: &[&str] = &["Ученик", "Student"];

/// One input row: a student and their grades, aligned with [`GradeSheet::subjects`].
#[derive(Debug, Clone, PartialEq)]
pub struct GradeRow {
    pub name: String,
    pub grades: Vec<f64>,
}

/// A parsed journal before any statistics are attached.
#[derive(Debug, Clone, PartialEq)]
pub struct GradeSheet {
    pub id_column: String,
    pub subjects: Vec<String>,
    pub rows: Vec<GradeRow>,
}

/// Loads a journal from `path`, logging the outcome.
///
/// # Errors
///
/// Returns [`JournalError::NotFound`] when `path` is not a regular file and a
/// parse error when the table is malformed. See [`parse_journal`].
#[tracing::instrument(skip(path), fields(path = %path.display()))]
pub fn load_journal(path: &Path) -> Result<GradeSheet> {
    let result = open_and_parse(path);

    match &result {
        Ok(sheet) => info!(
            students = sheet.rows.len(),
            subjects = sheet.subjects.len(),
            "Journal loaded"
        ),
        Err(e) => error!(error = %e, "Failed to load journal"),
    }

    result
}

fn open_and_parse(path: &Path) -> Result<GradeSheet> {
    if !path.is_file() {
        return Err(JournalError::NotFound(path.to_path_buf()));
    }

    let file = File::open(path).map_err(|source| JournalError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_journal(file)
}

/// Parses a comma-separated journal with a header row.
///
/// The identifier column is located by name (see [`ID_COLUMNS`]); every
/// other column is a subject. Each grade must parse as a finite number.
pub fn parse_journal<R: Read>(reader: R) -> Result<GradeSheet> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();

    let id_index = headers
        .iter()
        .position(|h| is_id_column(h))
        .ok_or_else(|| JournalError::MissingIdentifier {
            expected: ID_COLUMNS.join(", "),
        })?;

    let subject_indices: Vec<usize> = (0..headers.len()).filter(|&i| i != id_index).collect();
    if subject_indices.is_empty() {
        return Err(JournalError::NoSubjects);
    }

    let subjects: Vec<String> = subject_indices.iter().map(|&i| headers[i].clone()).collect();
    let mut seen = HashSet::new();
    let mut rows = Vec::new();

    for (line, record) in rdr.records().enumerate() {
        let record = record?;
        let name = record.get(id_index).unwrap_or_default().to_string();

        let mut grades = Vec::with_capacity(subject_indices.len());
        for (&col, subject) in subject_indices.iter().zip(&subjects) {
            let raw = record.get(col).unwrap_or_default();
            let grade = raw
                .parse::<f64>()
                .ok()
                .filter(|g| g.is_finite())
                .ok_or_else(|| JournalError::InvalidGrade {
                    // header is line 1
                    row: line + 2,
                    student: name.clone(),
                    subject: subject.clone(),
                    value: raw.to_string(),
                })?;
            grades.push(grade);
        }

        if !seen.insert(name.clone()) {
            return Err(JournalError::DuplicateStudent(name));
        }

        rows.push(GradeRow { name, grades });
    }

    if rows.is_empty() {
        return Err(JournalError::Empty);
    }

    Ok(GradeSheet {
        id_column: headers[id_index].clone(),
        subjects,
        rows,
    })
}

fn is_id_column(header: &str) -> bool {
    ID_COLUMNS.iter().any(|c| c.eq_ignore_ascii_case(header))
}
