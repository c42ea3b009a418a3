//! Journal statistics and grading.
//!
//! This module turns a loaded journal into per-student averages and
//! statuses, aggregates class-wide and per-subject statistics, selects the
//! top and struggling students, and drives the report writers.

pub mod aggregate;
pub mod analyzer;
pub mod grade;
pub mod selectors;
pub mod types;
pub mod utility;
