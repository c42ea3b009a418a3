//! Data types produced by the statistics pipeline.

use serde::Serialize;

use crate::analyzers::grade::Status;

/// Mean, median, sample standard deviation and range of a series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DescriptiveStats {
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

/// Number of students per [`Status`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub excellent: usize,
    pub good: usize,
    pub satisfactory: usize,
    pub needs_attention: usize,
}

impl StatusCounts {
    pub fn get(&self, status: Status) -> usize {
        match status {
            Status::Excellent => self.excellent,
            Status::Good => self.good,
            Status::Satisfactory => self.satisfactory,
            Status::NeedsAttention => self.needs_attention,
        }
    }

    pub fn increment(&mut self, status: Status) {
        match status {
            Status::Excellent => self.excellent += 1,
            Status::Good => self.good += 1,
            Status::Satisfactory => self.satisfactory += 1,
            Status::NeedsAttention => self.needs_attention += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.excellent + self.good + self.satisfactory + self.needs_attention
    }
}

/// Class-wide statistics over per-student averages.
#[derive(Debug, Clone, Serialize)]
pub struct ClassStatistics {
    pub total_students: usize,
    pub averages: DescriptiveStats,
    pub status_counts: StatusCounts,
}

/// Statistics for one subject column across all students.
#[derive(Debug, Clone, Serialize)]
pub struct SubjectStatistics {
    pub subject: String,
    pub stats: DescriptiveStats,
}
