//! Flat JSON report of a suite run

use crate::error::CliResult;
use crate::suite::Category;
use crate::utils::write_output_data;
use apiprobe_fixtures::calculate_percentage;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
pub struct CaseResult {
    pub id: String,
    pub category: Category,
    pub name: String,
    pub passed: bool,
    pub duration_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SuiteReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub base_url: String,
    pub environment: String,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub pass_rate: f64,
    pub duration_ms: u64,
    pub cases: Vec<CaseResult>,
}

impl SuiteReport {
    pub fn new(
        started_at: DateTime<Utc>,
        base_url: impl Into<String>,
        environment: impl Into<String>,
        duration: Duration,
        cases: Vec<CaseResult>,
    ) -> Self {
        let total = cases.len();
        let passed = cases.iter().filter(|c| c.passed).count();
        Self {
            run_id: Uuid::new_v4(),
            started_at,
            base_url: base_url.into(),
            environment: environment.into(),
            total,
            passed,
            failed: total - passed,
            pass_rate: calculate_percentage(passed as f64, total as f64),
            duration_ms: duration.as_millis() as u64,
            cases,
        }
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    pub fn failures(&self) -> impl Iterator<Item = &CaseResult> {
        self.cases.iter().filter(|c| !c.passed)
    }

    /// `<dir>/report-YYYYMMDD-HHMMSS.json` for the run's start time
    pub fn default_path(&self, report_dir: &Path) -> PathBuf {
        report_dir.join(format!(
            "report-{}.json",
            self.started_at.format("%Y%m%d-%H%M%S")
        ))
    }

    pub fn write_json(&self, path: &Path) -> CliResult<()> {
        let content = serde_json::to_string_pretty(self)?;
        write_output_data(path, &content)?;
        tracing::info!(path = %path.display(), "Report written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn case(name: &str, passed: bool) -> CaseResult {
        CaseResult {
            id: format!("users::{}", name),
            category: Category::Users,
            name: name.to_string(),
            passed,
            duration_ms: 12,
            error: (!passed).then(|| "status code mismatch".to_string()),
        }
    }

    fn report() -> SuiteReport {
        SuiteReport::new(
            Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap(),
            "https://api.example.com",
            "test",
            Duration::from_millis(345),
            vec![case("a", true), case("b", false), case("c", true)],
        )
    }

    #[test]
    fn test_counts_and_rate() {
        let report = report();
        assert_eq!((report.total, report.passed, report.failed), (3, 2, 1));
        assert_eq!(report.pass_rate, 66.67);
        assert!(!report.all_passed());
        assert_eq!(report.failures().map(|c| c.name.as_str()).collect::<Vec<_>>(), vec!["b"]);
    }

    #[test]
    fn test_empty_report() {
        let report = SuiteReport::new(Utc::now(), "", "test", Duration::ZERO, Vec::new());
        assert_eq!(report.pass_rate, 0.0);
        assert!(report.all_passed());
    }

    #[test]
    fn test_write_json_report() {
        let dir = tempfile::tempdir().unwrap();
        let report = report();
        let path = report.default_path(&dir.path().join("reports"));
        assert!(path.ends_with("reports/report-20240506-070809.json"));

        report.write_json(&path).unwrap();
        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["failed"], 1);
        assert_eq!(written["cases"][1]["error"], "status code mismatch");
        assert_eq!(written["cases"][0]["category"], "users");
        assert!(written["cases"][0].get("error").is_none());
    }
}
