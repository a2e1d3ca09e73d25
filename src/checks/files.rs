use async_trait::async_trait;

use crate::checks::traits::{CheckStatus, HealthCheck, HealthCheckResult, Priority};
use crate::core::project::Repository;
use crate::utils::fs::first_existing;

/// Full marks when any of `candidates` exists at the repository root.
pub struct FileCheck {
    name: &'static str,
    candidates: &'static [&'static str],
    max_score: u32,
    present: &'static str,
    absent: &'static str,
    priority: Priority,
    fix_time: &'static str,
    learn_url: Option<&'static str>,
}

impl FileCheck {
    pub fn license() -> Self {
        Self {
            name: "LICENSE",
            candidates: &["LICENSE", "LICENSE.md", "LICENSE.txt", "COPYING"],
            max_score: 10,
            present: "License file exists",
            absent: "Add a license - see choosealicense.com",
            priority: Priority::High,
            fix_time: "2 minutes",
            learn_url: Some("https://choosealicense.com"),
        }
    }

    pub fn contributing() -> Self {
        Self {
            name: "CONTRIBUTING.md",
            candidates: &["CONTRIBUTING.md"],
            max_score: 8,
            present: "Contributing guidelines exist",
            absent: "Optional - helps contributors understand how to help",
            priority: Priority::Low,
            fix_time: "15 minutes",
            learn_url: Some("https://docs.github.com/en/communities/setting-up-your-project-for-healthy-contributions/setting-guidelines-for-repository-contributors"),
        }
    }

    pub fn code_of_conduct() -> Self {
        Self {
            name: "CODE_OF_CONDUCT.md",
            candidates: &["CODE_OF_CONDUCT.md"],
            max_score: 5,
            present: "Code of Conduct exists",
            absent: "Optional - sets community standards",
            priority: Priority::Low,
            fix_time: "5 minutes",
            learn_url: Some("https://docs.github.com/en/communities/setting-up-your-project-for-healthy-contributions/adding-a-code-of-conduct-to-your-project"),
        }
    }

    pub fn security_policy() -> Self {
        Self {
            name: "SECURITY.md",
            candidates: &["SECURITY.md"],
            max_score: 5,
            present: "Security policy exists",
            absent: "Optional - explains how to report vulnerabilities",
            priority: Priority::Low,
            fix_time: "10 minutes",
            learn_url: None,
        }
    }
}

#[async_trait]
impl HealthCheck for FileCheck {
    fn name(&self) -> &'static str {
        self.name
    }

    fn max_score(&self) -> u32 {
        self.max_score
    }

    async fn evaluate(&self, repo: &Repository) -> HealthCheckResult {
        if let Some(found) = first_existing(&repo.path, self.candidates) {
            tracing::debug!(check = self.name, file = found, "found");
            return HealthCheckResult::new(
                self.name,
                CheckStatus::Good,
                self.max_score,
                self.max_score,
                self.present,
            )
            .with_priority(Priority::Normal);
        }

        let result = HealthCheckResult::new(
            self.name,
            CheckStatus::Missing,
            0,
            self.max_score,
            self.absent,
        )
        .with_priority(self.priority)
        .with_fix_time(self.fix_time);
        match self.learn_url {
            Some(url) => result.with_learn_url(url),
            None => result,
        }
    }
}
