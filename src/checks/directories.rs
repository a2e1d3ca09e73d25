use async_trait::async_trait;

use crate::checks::traits::{CheckStatus, HealthCheck, HealthCheckResult, Priority};
use crate::core::project::Repository;
use crate::utils::fs::has_files_with_extension;

/// Passes when `dir` directly holds a file with one of `extensions`.
pub struct DirectoryCheck {
    name: &'static str,
    dir: &'static str,
    extensions: &'static [&'static str],
    max_score: u32,
    present: &'static str,
    absent: &'static str,
    priority: Priority,
    fix_time: &'static str,
    learn_url: Option<&'static str>,
}

impl DirectoryCheck {
    pub fn github_actions() -> Self {
        Self {
            name: "GitHub Actions",
            dir: ".github/workflows",
            extensions: &["yml", "yaml"],
            max_score: 10,
            present: "CI/CD workflows configured",
            absent: "Add CI/CD automation for testing and deployment",
            priority: Priority::Medium,
            fix_time: "20 minutes",
            learn_url: Some("https://docs.github.com/en/actions/quickstart"),
        }
    }

    pub fn documentation() -> Self {
        Self {
            name: "Documentation",
            dir: "docs",
            extensions: &["md"],
            max_score: 6,
            present: "Documentation directory exists",
            absent: "Create docs/ for detailed documentation",
            priority: Priority::Low,
            fix_time: "30 minutes",
            learn_url: None,
        }
    }
}

#[async_trait]
impl HealthCheck for DirectoryCheck {
    fn name(&self) -> &'static str {
        self.name
    }

    fn max_score(&self) -> u32 {
        self.max_score
    }

    async fn evaluate(&self, repo: &Repository) -> HealthCheckResult {
        if has_files_with_extension(&repo.path.join(self.dir), self.extensions) {
            return HealthCheckResult::new(
                self.name,
                CheckStatus::Good,
                self.max_score,
                self.max_score,
                self.present,
            )
            .with_priority(Priority::Normal);
        }

        let result = HealthCheckResult::new(self.name, CheckStatus::Missing, 0, self.max_score, self.absent)
            .with_priority(self.priority)
            .with_fix_time(self.fix_time);
        match self.learn_url {
            Some(url) => result.with_learn_url(url),
            None => result,
        }
    }
}
