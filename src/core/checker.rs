use serde::Serialize;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::checks::traits::{CheckStatus, HealthCheck, HealthCheckResult, Priority};
use crate::core::project::Repository;

const QUICK_WIN_MINUTES: u32 = 5;

#[derive(Debug, Clone, Serialize)]
pub struct QuickWin {
    pub name: String,
    pub time: String,
    pub points: u32,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub repo_path: PathBuf,
    pub checks: Vec<HealthCheckResult>,
    pub overall_score: u32,
    pub max_score: u32,
    pub recommendations: Vec<String>,
    pub quick_wins: Vec<QuickWin>,
    pub critical_issues: Vec<String>,
    #[serde(skip)]
    pub duration: Duration,
}

impl HealthReport {
    pub fn from_results(repo_path: PathBuf, checks: Vec<HealthCheckResult>) -> Self {
        let overall_score = checks.iter().map(|c| c.score).sum();
        let max_score = checks.iter().map(|c| c.max_score).sum();
        let recommendations = recommendations(&checks);
        let quick_wins = quick_wins(&checks);
        let critical_issues = critical_issues(&checks);
        Self {
            repo_path,
            checks,
            overall_score,
            max_score,
            recommendations,
            quick_wins,
            critical_issues,
            duration: Duration::ZERO,
        }
    }
}

fn recommendations(checks: &[HealthCheckResult]) -> Vec<String> {
    checks
        .iter()
        .filter(|c| matches!(c.status, CheckStatus::Missing | CheckStatus::Basic))
        .filter(|c| c.priority.is_some_and(|p| p.is_urgent()))
        .map(|c| match &c.fix_time {
            Some(t) => format!("{} ({})", c.message, t),
            None => c.message.clone(),
        })
        .collect()
}

fn quick_wins(checks: &[HealthCheckResult]) -> Vec<QuickWin> {
    let mut wins: Vec<QuickWin> = checks
        .iter()
        .filter(|c| c.status == CheckStatus::Missing)
        .filter_map(|c| {
            let minutes = c.fix_minutes()?;
            (minutes <= QUICK_WIN_MINUTES).then(|| QuickWin {
                name: c.name.clone(),
                time: c.fix_time.clone().unwrap_or_default(),
                points: c.max_score,
                message: c.message.clone(),
            })
        })
        .collect();
    wins.sort_by(|a, b| b.points.cmp(&a.points));
    wins
}

fn critical_issues(checks: &[HealthCheckResult]) -> Vec<String> {
    checks
        .iter()
        .filter(|c| c.priority == Some(Priority::Critical) && c.status != CheckStatus::Good)
        .map(|c| format!("{}: {}", c.name, c.message))
        .collect()
}

pub struct HealthChecker {
    checks: Vec<Box<dyn HealthCheck>>,
}

impl HealthChecker {
    pub fn new(checks: Vec<Box<dyn HealthCheck>>) -> Self {
        Self { checks }
    }

    pub async fn run(&self, repo: &Repository) -> HealthReport {
        let start = Instant::now();
        let mut results = Vec::with_capacity(self.checks.len());
        for check in &self.checks {
            let result = check.evaluate(repo).await;
            tracing::debug!(check = check.name(), status = %result.status, score = result.score, "evaluated");
            results.push(result);
        }

        let mut report = HealthReport::from_results(repo.path.clone(), results);
        report.duration = start.elapsed();
        report
    }
}

pub fn default_checker() -> HealthChecker {
    HealthChecker::new(crate::checks::default_checks())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_checks_run_in_fixed_order() {
        let tmp = TempDir::new().unwrap();
        let report = default_checker().run(&Repository::at(tmp.path())).await;
        let names: Vec<&str> = report.checks.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "README.md",
                "LICENSE",
                "CONTRIBUTING.md",
                ".gitignore",
                "CODE_OF_CONDUCT.md",
                "SECURITY.md",
                "GitHub Actions",
                "Issues",
                "Wiki",
                "Description",
                "Topics",
                "Branch Protection",
                "Documentation",
            ]
        );
    }

    #[tokio::test]
    async fn test_empty_repository_report() {
        let tmp = TempDir::new().unwrap();
        let report = default_checker().run(&Repository::at(tmp.path())).await;

        assert_eq!(report.max_score, 90);
        // Only the assumed remote settings score: Issues 5 + Wiki 3.
        assert_eq!(report.overall_score, 8);

        assert_eq!(
            report.critical_issues,
            [
                "README.md: Missing - your project needs a README",
                ".gitignore: Critical - prevents committing secrets and build files",
            ]
        );
        assert_eq!(report.recommendations.len(), 3);
        assert!(report.recommendations[0].ends_with("(10 minutes)"));

        let wins: Vec<(&str, u32)> = report
            .quick_wins
            .iter()
            .map(|w| (w.name.as_str(), w.points))
            .collect();
        assert_eq!(wins, [("LICENSE", 10), (".gitignore", 10), ("CODE_OF_CONDUCT.md", 5)]);
    }

    #[tokio::test]
    async fn test_complete_repository_scores_all_local_checks() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::write(
            root.join("README.md"),
            "# Demo\n![ci](https://img.shields.io/x)\n## Table of Contents\n\
Install with cargo. Usage example below. This line pads the description past the length threshold.\n",
        )
        .unwrap();
        for file in ["LICENSE", "CONTRIBUTING.md", "CODE_OF_CONDUCT.md", "SECURITY.md"] {
            fs::write(root.join(file), "x").unwrap();
        }
        fs::write(root.join(".gitignore"), "node_modules\n").unwrap();
        fs::create_dir_all(root.join(".github/workflows")).unwrap();
        fs::write(root.join(".github/workflows/ci.yml"), "on: push").unwrap();
        fs::create_dir_all(root.join("docs")).unwrap();
        fs::write(root.join("docs/index.md"), "# Docs").unwrap();

        let report = default_checker().run(&Repository::at(root)).await;
        // 69 local points plus the assumed 8 remote points.
        assert_eq!(report.overall_score, 77);
        assert!(report.critical_issues.is_empty());
        assert!(report.recommendations.is_empty());
        assert!(report.quick_wins.is_empty());
    }

    #[test]
    fn test_basic_urgent_check_is_recommended() {
        let checks = vec![
            HealthCheckResult::new("A", CheckStatus::Basic, 5, 10, "half done")
                .with_priority(Priority::High),
            HealthCheckResult::new("B", CheckStatus::Missing, 0, 10, "later")
                .with_priority(Priority::Low)
                .with_fix_time("1 minute"),
        ];
        let report = HealthReport::from_results(PathBuf::from("/r"), checks);
        assert_eq!(report.recommendations, ["half done"]);
        assert_eq!(report.quick_wins.len(), 1);
        assert_eq!(report.quick_wins[0].name, "B");
    }
}
