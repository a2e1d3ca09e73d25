use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::core::project::Repository;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Good,
    Basic,
    Missing,
    Unknown,
}

impl std::fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckStatus::Good => write!(f, "good"),
            CheckStatus::Basic => write!(f, "basic"),
            CheckStatus::Missing => write!(f, "missing"),
            CheckStatus::Unknown => write!(f, "unknown"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Normal,
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    pub fn is_urgent(&self) -> bool {
        matches!(self, Priority::Critical | Priority::High)
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::Normal => write!(f, "normal"),
            Priority::Low => write!(f, "low"),
            Priority::Medium => write!(f, "medium"),
            Priority::High => write!(f, "high"),
            Priority::Critical => write!(f, "critical"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthCheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub score: u32,
    pub max_score: u32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// Rough effort estimate, e.g. "10 minutes".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub learn_url: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub quality: BTreeMap<String, bool>,
}

impl HealthCheckResult {
    pub fn new(name: &str, status: CheckStatus, score: u32, max_score: u32, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status,
            score,
            max_score,
            message: message.to_string(),
            priority: None,
            fix_time: None,
            learn_url: None,
            quality: BTreeMap::new(),
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_fix_time(mut self, fix_time: &str) -> Self {
        self.fix_time = Some(fix_time.to_string());
        self
    }

    pub fn with_learn_url(mut self, url: &str) -> Self {
        self.learn_url = Some(url.to_string());
        self
    }

    pub fn is_good(&self) -> bool {
        self.status == CheckStatus::Good
    }

    /// Fix time in whole minutes, only when it is stated in minutes.
    pub fn fix_minutes(&self) -> Option<u32> {
        static MINUTES: OnceLock<Option<Regex>> = OnceLock::new();
        let re = MINUTES
            .get_or_init(|| Regex::new(r"(\d+)\s*minutes?").ok())
            .as_ref()?;
        let fix_time = self.fix_time.as_deref()?;
        re.captures(fix_time)?.get(1)?.as_str().parse().ok()
    }
}

#[async_trait]
pub trait HealthCheck: Send + Sync {
    fn name(&self) -> &'static str;
    fn max_score(&self) -> u32;
    /// Never fails: unreadable or absent files score as missing.
    async fn evaluate(&self, repo: &Repository) -> HealthCheckResult;
}
