use async_trait::async_trait;

use crate::checks::traits::{CheckStatus, HealthCheck, HealthCheckResult, Priority};
use crate::core::project::Repository;

/// A hosting-side setting that cannot be read from the working tree.
/// Always reports `unknown` with a fixed assumed score.
pub struct RemoteSettingCheck {
    name: &'static str,
    assumed_score: u32,
    max_score: u32,
    message: &'static str,
    priority: Priority,
    fix_time: Option<&'static str>,
    learn_url: Option<&'static str>,
}

impl RemoteSettingCheck {
    pub fn issues() -> Self {
        Self {
            name: "Issues",
            assumed_score: 5,
            max_score: 5,
            message: "Enable in Settings > Features > Issues",
            priority: Priority::Low,
            fix_time: None,
            learn_url: None,
        }
    }

    pub fn wiki() -> Self {
        Self {
            name: "Wiki",
            assumed_score: 3,
            max_score: 5,
            message: "Enable in Settings > Features > Wiki",
            priority: Priority::Low,
            fix_time: Some("30 seconds"),
            learn_url: Some("https://docs.github.com/en/communities/documenting-your-project-with-wikis"),
        }
    }

    pub fn description() -> Self {
        Self {
            name: "Description",
            assumed_score: 0,
            max_score: 3,
            message: "Add a repository description in the GitHub settings",
            priority: Priority::Medium,
            fix_time: Some("1 minute"),
            learn_url: None,
        }
    }

    pub fn topics() -> Self {
        Self {
            name: "Topics",
            assumed_score: 0,
            max_score: 3,
            message: "Add 3-5 topics to improve discoverability",
            priority: Priority::Medium,
            fix_time: Some("2 minutes"),
            learn_url: None,
        }
    }

    pub fn branch_protection() -> Self {
        Self {
            name: "Branch Protection",
            assumed_score: 0,
            max_score: 5,
            message: "Protect the main branch (require PR reviews)",
            priority: Priority::Medium,
            fix_time: None,
            learn_url: Some("https://docs.github.com/en/repositories/configuring-branches-and-merges-in-your-repository/managing-protected-branches"),
        }
    }
}

#[async_trait]
impl HealthCheck for RemoteSettingCheck {
    fn name(&self) -> &'static str {
        self.name
    }

    fn max_score(&self) -> u32 {
        self.max_score
    }

    async fn evaluate(&self, _repo: &Repository) -> HealthCheckResult {
        let mut result = HealthCheckResult::new(
            self.name,
            CheckStatus::Unknown,
            self.assumed_score,
            self.max_score,
            self.message,
        )
        .with_priority(self.priority);
        if let Some(fix_time) = self.fix_time {
            result = result.with_fix_time(fix_time);
        }
        if let Some(url) = self.learn_url {
            result = result.with_learn_url(url);
        }
        result
    }
}
