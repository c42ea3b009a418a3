use anyhow::Result;
use tracing::debug;

use crate::analyzers::grade::Status;
use crate::analyzers::types::ClassStatistics;
use crate::stats::StudentRecord;

/// Builds the short summary shown on stdout after an analysis run.
pub fn summary_lines(class: &ClassStatistics, top: &[&StudentRecord]) -> Vec<String> {
    let mut lines = vec![
        format!("Class average: {:.2}", class.averages.mean),
        format!("Median: {:.2}", class.averages.median),
        String::new(),
        "Students by status:".to_string(),
    ];

    for status in Status::ALL {
        lines.push(format!(
            "   {}: {}",
            status.label(),
            class.status_counts.get(status)
        ));
    }

    lines.push(String::new());
    lines.push(format!("Top {} students:", top.len()));
    for (rank, student) in top.iter().enumerate() {
        lines.push(format!(
            "   {}. {}: {:.2}",
            rank + 1,
            student.name,
            student.average
        ));
    }

    lines
}

pub fn print_summary(class: &ClassStatistics, top: &[&StudentRecord]) {
    for line in summary_lines(class, top) {
        println!("{line}");
    }
}

/// Logs class statistics as pretty-printed JSON.
pub fn log_json(class: &ClassStatistics) -> Result<()> {
    debug!("{}", serde_json::to_string_pretty(class)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::aggregate::class_statistics;
    use crate::analyzers::selectors::top_students;
    use crate::loader::parse_journal;
    use crate::stats::compute_student_stats;

    #[test]
    fn test_summary_lines() {
        let csv = "Student,Math,Physics,History\nA,5,5,5\nB,3,3,4\n";
        let journal = compute_student_stats(parse_journal(csv.as_bytes()).unwrap());
        let class = class_statistics(&journal);
        let top = top_students(&journal, 5);

        let lines = summary_lines(&class, &top);
        assert!(lines.contains(&"   excellent: 1".to_string()));
        assert!(lines.contains(&"   satisfactory: 1".to_string()));
        assert!(lines.contains(&"Top 2 students:".to_string()));
        assert!(lines.contains(&"   1. A: 5.00".to_string()));
        assert!(lines.contains(&"   2. B: 3.33".to_string()));
    }

    #[test]
    fn test_log_json_does_not_panic() {
        let csv = "Student,Math\nA,4\n";
        let journal = compute_student_stats(parse_journal(csv.as_bytes()).unwrap());
        log_json(&class_statistics(&journal)).unwrap();
    }
}
