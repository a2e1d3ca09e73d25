use async_trait::async_trait;

use crate::checks::traits::{CheckStatus, HealthCheck, HealthCheckResult, Priority};
use crate::core::project::Repository;

const MAX_SCORE: u32 = 10;
const BASIC_SCORE: u32 = 5;

/// Entries that suggest the ignore file was written with intent.
const COMMON_PATTERNS: &[&str] = &["node_modules", "__pycache__", ".env", "*.pyc", "dist/", "build/"];

pub struct GitignoreCheck;

#[async_trait]
impl HealthCheck for GitignoreCheck {
    fn name(&self) -> &'static str {
        ".gitignore"
    }

    fn max_score(&self) -> u32 {
        MAX_SCORE
    }

    async fn evaluate(&self, repo: &Repository) -> HealthCheckResult {
        let Ok(content) = std::fs::read_to_string(repo.path.join(".gitignore")) else {
            return HealthCheckResult::new(
                self.name(),
                CheckStatus::Missing,
                0,
                MAX_SCORE,
                "Critical - prevents committing secrets and build files",
            )
            .with_priority(Priority::Critical)
            .with_fix_time("3 minutes")
            .with_learn_url("https://git-scm.com/docs/gitignore");
        };

        let result = if COMMON_PATTERNS.iter().any(|p| content.contains(p)) {
            HealthCheckResult::new(self.name(), CheckStatus::Good, MAX_SCORE, MAX_SCORE, ".gitignore exists")
        } else {
            HealthCheckResult::new(
                self.name(),
                CheckStatus::Basic,
                BASIC_SCORE,
                MAX_SCORE,
                ".gitignore exists (basic)",
            )
        };
        result.with_priority(Priority::Normal)
    }
}
