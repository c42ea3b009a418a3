use std::fmt;

use serde::Serialize;

/// Performance category derived from a student's average grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Excellent,
    Good,
    Satisfactory,
    NeedsAttention,
}

impl Status {
    /// All categories, best first.
    pub const ALL: [Status; 4] = [
        Status::Excellent,
        Status::Good,
        Status::Satisfactory,
        Status::NeedsAttention,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Status::Excellent => "excellent",
            Status::Good => "good",
            Status::Satisfactory => "satisfactory",
            Status::NeedsAttention => "needs attention",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Converts an average grade into a [`Status`].
///
/// | Range           | Status          |
/// |-----------------|-----------------|
/// | >= 4.5          | excellent       |
/// | >= 3.5          | good            |
/// | >= 2.5          | satisfactory    |
/// | < 2.5           | needs attention |
pub fn status(average: f64) -> Status {
    match average {
        a if a >= 4.5 => Status::Excellent,
        a if a >= 3.5 => Status::Good,
        a if a >= 2.5 => Status::Satisfactory,
        _ => Status::NeedsAttention,
    }
}
