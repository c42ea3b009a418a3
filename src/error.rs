//! Error types for loading a grade journal.

use std::path::PathBuf;

use thiserror::Error;

/// Reasons a journal file cannot be turned into a [`GradeSheet`](crate::loader::GradeSheet).
#[derive(Error, Debug)]
pub enum JournalError {
    #[error("journal file not found or not a regular file: {}", .0.display())]
    NotFound(PathBuf),
    #[error("failed to read journal {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed journal: {0}")]
    Csv(#[from] csv::Error),
    #[error("missing identifier column (expected one of: {expected})")]
    MissingIdentifier { expected: String },
    #[error("journal has no subject columns")]
    NoSubjects,
    #[error("journal contains no students")]
    Empty,
    #[error("row {row}: grade for {subject} of {student} is not a number: {value:?}")]
    InvalidGrade {
        row: usize,
        student: String,
        subject: String,
        value: String,
    },
    #[error("duplicate student name {0:?}")]
    DuplicateStudent(String),
}

pub type Result<T> = std::result::Result<T, JournalError>;
