use async_trait::async_trait;

use crate::checks::traits::{CheckStatus, HealthCheck, HealthCheckResult, Priority};
use crate::core::project::Repository;

const MAX_SCORE: u32 = 15;
const BASE_SCORE: u32 = 5;
const POINTS_PER_FEATURE: u32 = 2;
const GOOD_THRESHOLD: u32 = 12;

pub struct ReadmeCheck;

/// Which quality markers a README has, in report order.
pub fn quality_markers(content: &str) -> Vec<(&'static str, bool)> {
    let lower = content.to_lowercase();
    vec![
        ("has_title", content.lines().any(|line| line.starts_with("# "))),
        ("has_description", content.chars().count() > 100),
        ("has_installation", lower.contains("install")),
        ("has_usage", lower.contains("usage") || lower.contains("example")),
        ("has_badges", content.contains("shields.io") || content.contains("![")),
        (
            "has_toc",
            lower.contains("table of contents") || content.contains("## Contents"),
        ),
    ]
}

#[async_trait]
impl HealthCheck for ReadmeCheck {
    fn name(&self) -> &'static str {
        "README.md"
    }

    fn max_score(&self) -> u32 {
        MAX_SCORE
    }

    async fn evaluate(&self, repo: &Repository) -> HealthCheckResult {
        let content = match std::fs::read_to_string(repo.path.join("README.md")) {
            Ok(content) => content,
            Err(_) => {
                return HealthCheckResult::new(
                    self.name(),
                    CheckStatus::Missing,
                    0,
                    MAX_SCORE,
                    "Missing - your project needs a README",
                )
                .with_priority(Priority::Critical)
                .with_fix_time("10 minutes")
                .with_learn_url("https://docs.github.com/en/repositories/managing-your-repositorys-settings-and-features/customizing-your-repository/about-readmes");
            }
        };

        let markers = quality_markers(&content);
        let raw = BASE_SCORE
            + markers.iter().filter(|(_, hit)| *hit).count() as u32 * POINTS_PER_FEATURE;
        let status = if raw >= GOOD_THRESHOLD {
            CheckStatus::Good
        } else {
            CheckStatus::Basic
        };

        let mut result = HealthCheckResult::new(
            self.name(),
            status,
            raw.min(MAX_SCORE),
            MAX_SCORE,
            &format!("Exists ({}/{} quality points)", raw.min(MAX_SCORE), MAX_SCORE),
        )
        .with_priority(Priority::Normal);
        result.quality = markers
            .into_iter()
            .map(|(name, hit)| (name.to_string(), hit))
            .collect();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const FULL_README: &str = "# Demo\n\n![build](https://img.shields.io/badge/build-passing-green)\n\n\
## Table of Contents\n\nA small demo project that shows every section a README should carry for newcomers.\n\n\
## Installation\n\ncargo install demo\n\n## Usage\n\ndemo --help\n";

    #[tokio::test]
    async fn test_missing_readme() {
        let tmp = TempDir::new().unwrap();
        let result = ReadmeCheck.evaluate(&Repository::at(tmp.path())).await;
        assert_eq!(result.status, CheckStatus::Missing);
        assert_eq!(result.score, 0);
        assert_eq!(result.priority, Some(Priority::Critical));
        assert_eq!(result.fix_time.as_deref(), Some("10 minutes"));
    }

    #[tokio::test]
    async fn test_minimal_readme_is_basic() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("README.md"), "# Demo\n").unwrap();
        let result = ReadmeCheck.evaluate(&Repository::at(tmp.path())).await;
        assert_eq!(result.status, CheckStatus::Basic);
        assert_eq!(result.score, 7);
        assert_eq!(result.quality["has_title"], true);
        assert_eq!(result.quality["has_installation"], false);
    }

    #[tokio::test]
    async fn test_full_readme_capped_at_max() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("README.md"), FULL_README).unwrap();
        let result = ReadmeCheck.evaluate(&Repository::at(tmp.path())).await;
        assert_eq!(result.status, CheckStatus::Good);
        assert_eq!(result.score, 15);
        assert!(result.quality.values().all(|hit| *hit));
    }

    #[tokio::test]
    async fn test_good_threshold() {
        let tmp = TempDir::new().unwrap();
        // title + install + usage + badges = 5 + 8 = 13
        fs::write(
            tmp.path().join("README.md"),
            "# Demo\nInstall it.\nUsage: run.\n![logo](logo.png)\n",
        )
        .unwrap();
        let result = ReadmeCheck.evaluate(&Repository::at(tmp.path())).await;
        assert_eq!(result.score, 13);
        assert_eq!(result.status, CheckStatus::Good);
    }

    #[test]
    fn test_title_requires_h1_at_line_start() {
        let markers = quality_markers("## Subtitle only\n #not a title");
        assert_eq!(markers[0], ("has_title", false));
    }
}
