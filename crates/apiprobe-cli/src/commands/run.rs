use crate::error::{CliError, CliResult};
use crate::report::SuiteReport;
use crate::runner::SuiteRunner;
use crate::suite::all_cases;
use crate::utils::{format_duration, truncate_text, ColoredOutput};
use apiprobe_core::{EndpointTable, Settings};
use colored::ColoredString;
use std::path::PathBuf;
use std::time::Duration;

pub struct RunCommand;

impl RunCommand {
    pub async fn run(
        settings: Settings,
        endpoints: EndpointTable,
        filter: Option<String>,
        workers: Option<usize>,
        report_path: Option<PathBuf>,
    ) -> CliResult<()> {
        let cases = SuiteRunner::select(all_cases(), filter.as_deref());
        if cases.is_empty() {
            return Err(CliError::InvalidArgument(format!(
                "No test cases match '{}'",
                filter.unwrap_or_default()
            )));
        }

        let mut runner = SuiteRunner::new(settings.clone(), endpoints);
        if let Some(workers) = workers {
            runner = runner.with_workers(workers);
        }

        println!(
            "{} {} cases against {} ({} workers)",
            ColoredOutput::highlight("Running"),
            cases.len(),
            settings.base_url,
            runner.workers()
        );
        if let Some(notice) = insecure_notice(&settings) {
            println!("{}", notice);
        }
        let report = runner.run(cases).await;
        print_report(&report);

        let report_path = report_path.or_else(|| {
            settings
                .json_report
                .then(|| report.default_path(&settings.report_dir))
        });
        if let Some(path) = report_path {
            report.write_json(&path)?;
            println!("{} {}", ColoredOutput::info("Report:"), path.display());
        }

        if report.all_passed() {
            Ok(())
        } else {
            Err(CliError::SuiteFailed {
                failed: report.failed,
                total: report.total,
            })
        }
    }
}

/// Warning line printed when the suite runs with TLS verification off
fn insecure_notice(settings: &Settings) -> Option<ColoredString> {
    (!settings.verify_ssl).then(|| {
        ColoredOutput::warning("Warning: TLS certificate verification is disabled (VERIFY_SSL=false)")
    })
}

fn print_report(report: &SuiteReport) {
    for case in &report.cases {
        let duration = format_duration(Duration::from_millis(case.duration_ms));
        if case.passed {
            println!("{} {} {}", ColoredOutput::success("PASS"), case.id, ColoredOutput::dim(&duration));
        } else {
            println!("{} {} {}", ColoredOutput::error("FAIL"), case.id, ColoredOutput::dim(&duration));
            if let Some(error) = &case.error {
                println!("     {}", truncate_text(error, 300));
            }
        }
    }

    let summary = format!(
        "{} passed, {} failed, {} total ({:.2}%) in {}",
        report.passed,
        report.failed,
        report.total,
        report.pass_rate,
        format_duration(Duration::from_millis(report.duration_ms))
    );
    if report.all_passed() {
        println!("\n{}", ColoredOutput::success(&summary));
    } else {
        println!("\n{}", ColoredOutput::error(&summary));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insecure_notice_only_without_verification() {
        let mut settings = Settings::default();
        assert!(insecure_notice(&settings).is_none());

        settings.verify_ssl = false;
        let notice = insecure_notice(&settings).unwrap();
        assert!(notice.contains("TLS certificate verification is disabled"));
    }
}
