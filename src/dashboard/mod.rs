//! Static chart dashboard over synthetic class data.
//!
//! [`synthetic`] generates a reproducible grade sheet, [`panels`] derives
//! what each chart shows, and [`render`] draws them onto one PNG using the
//! settings in [`style::DashboardStyle`].

pub mod panels;
pub mod render;
pub mod style;
pub mod synthetic;

use anyhow::{Result, ensure};
use chrono::Local;
use tracing::info;

use crate::config::DashboardConfig;
use crate::stats::compute_student_stats;

pub use panels::DashboardData;

/// Generates synthetic grades from `config.seed` and computes the panel data.
pub fn prepare_dashboard(config: &DashboardConfig) -> Result<DashboardData> {
    ensure!(config.students > 0, "dashboard needs at least one student");
    ensure!(
        !config.subjects.is_empty(),
        "dashboard needs at least one subject"
    );

    let sheet = synthetic::generate_sheet(config.seed, config.students, &config.subjects);
    let journal = compute_student_stats(sheet);

    Ok(DashboardData::from_journal(
        &journal,
        config.top_n,
        &synthetic::QUARTER_TREND,
        Local::now().date_naive(),
    ))
}

/// Builds the dashboard and saves it to `config.output`.
#[tracing::instrument(skip(config), fields(seed = config.seed, students = config.students))]
pub fn build_dashboard(config: &DashboardConfig) -> Result<DashboardData> {
    let data = prepare_dashboard(config)?;
    render::render_dashboard(&config.output, &data, &config.style)?;

    info!(path = %config.output.display(), "Dashboard saved");
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare_is_reproducible() {
        let config = DashboardConfig::default();
        let a = prepare_dashboard(&config).unwrap();
        let b = prepare_dashboard(&config).unwrap();

        assert_eq!(a.grade_matrix, b.grade_matrix);
        assert_eq!(a.grade_matrix.len(), 25);
        assert_eq!(a.top_students.len(), 10);
        assert_eq!(a.subject_means.len(), 5);
    }

    #[test]
    fn test_prepare_rejects_empty_inputs() {
        let no_students = DashboardConfig {
            students: 0,
            ..DashboardConfig::default()
        };
        assert!(prepare_dashboard(&no_students).is_err());

        let no_subjects = DashboardConfig {
            subjects: vec![],
            ..DashboardConfig::default()
        };
        assert!(prepare_dashboard(&no_subjects).is_err());
    }
}
