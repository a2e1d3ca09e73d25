use anyhow::Result;

use crate::checks::traits::CheckStatus;
use crate::core::checker::HealthReport;
use crate::core::score::BeautificationReport;
use crate::reporters::traits::Reporter;

pub struct JsonReporter;

impl Reporter for JsonReporter {
    fn name(&self) -> &str {
        "JSON"
    }

    fn extension(&self) -> &str {
        "json"
    }

    fn generate(&self, health: &HealthReport, score: &BeautificationReport) -> Result<String> {
        let count = |status: CheckStatus| health.checks.iter().filter(|c| c.status == status).count();
        let output = serde_json::json!({
            "repository": health.repo_path.to_string_lossy(),
            "health": {
                "overall_score": health.overall_score,
                "max_score": health.max_score,
                "checks": health.checks,
                "recommendations": health.recommendations,
                "quick_wins": health.quick_wins,
                "critical_issues": health.critical_issues,
            },
            "beautification": score,
            "summary": {
                "total_checks": health.checks.len(),
                "good": count(CheckStatus::Good),
                "basic": count(CheckStatus::Basic),
                "missing": count(CheckStatus::Missing),
                "unknown": count(CheckStatus::Unknown),
            },
            "duration_ms": health.duration.as_millis(),
        });
        Ok(serde_json::to_string_pretty(&output)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::traits::{HealthCheckResult, Priority};
    use std::path::PathBuf;
    use std::time::Duration;

    fn make_reports() -> (HealthReport, BeautificationReport) {
        let checks = vec![
            HealthCheckResult::new("README.md", CheckStatus::Missing, 0, 15, "Missing")
                .with_priority(Priority::Critical)
                .with_fix_time("10 minutes"),
            HealthCheckResult::new("LICENSE", CheckStatus::Good, 10, 10, "License file exists"),
        ];
        let score = BeautificationReport::calculate(&checks);
        let mut health = HealthReport::from_results(PathBuf::from("/tmp/test"), checks);
        health.duration = Duration::from_millis(42);
        (health, score)
    }

    #[test]
    fn test_json_report_valid_json() {
        let (health, score) = make_reports();
        let output = JsonReporter.generate(&health, &score).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["repository"], "/tmp/test");
        assert_eq!(parsed["health"]["overall_score"], 10);
        assert_eq!(parsed["health"]["max_score"], 25);
        assert_eq!(parsed["duration_ms"], 42);
    }

    #[test]
    fn test_json_report_details() {
        let (health, score) = make_reports();
        let output = JsonReporter.generate(&health, &score).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["summary"]["good"], 1);
        assert_eq!(parsed["summary"]["missing"], 1);
        assert_eq!(parsed["health"]["checks"][0]["priority"], "critical");
        assert_eq!(parsed["health"]["critical_issues"][0], "README.md: Missing");
        assert_eq!(parsed["beautification"]["level"], "intermediate");
        assert_eq!(parsed["beautification"]["achievements"][0]["id"], "licensed");
    }

    #[test]
    fn test_json_reporter_metadata() {
        assert_eq!(JsonReporter.name(), "JSON");
        assert_eq!(JsonReporter.extension(), "json");
    }
}
