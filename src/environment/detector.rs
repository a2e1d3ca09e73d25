use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::process::Command;

use crate::checks::traits::Priority;

const PROBE_TIMEOUT: Duration = Duration::from_secs(5);
const SHELLS: &[&str] = &["bash", "zsh", "fish", "pwsh"];

#[derive(Debug, Clone, Serialize)]
pub struct ToolStatus {
    pub name: String,
    pub path: Option<PathBuf>,
    pub version: Option<String>,
}

impl ToolStatus {
    pub fn installed(&self) -> bool {
        self.path.is_some()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub priority: Priority,
    pub message: String,
    pub hint: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnvironmentReport {
    pub os: &'static str,
    pub git: ToolStatus,
    pub gh: ToolStatus,
    pub gh_authenticated: bool,
    pub shells: BTreeMap<String, bool>,
    pub recommendations: Vec<Recommendation>,
}

pub struct ToolDetector {
    timeout: Duration,
}

impl Default for ToolDetector {
    fn default() -> Self {
        Self {
            timeout: PROBE_TIMEOUT,
        }
    }
}

impl ToolDetector {
    pub async fn detect(&self) -> EnvironmentReport {
        let git = self.tool("git").await;
        let gh = self.tool("gh").await;
        let gh_authenticated = match &gh.path {
            Some(path) => self.succeeds(path, &["auth", "status"]).await,
            None => false,
        };
        let shells = SHELLS
            .iter()
            .map(|s| (s.to_string(), which::which(s).is_ok()))
            .collect();
        let os = std::env::consts::OS;
        let recommendations = recommendations(os, &git, &gh, gh_authenticated);

        EnvironmentReport {
            os,
            git,
            gh,
            gh_authenticated,
            shells,
            recommendations,
        }
    }

    async fn tool(&self, name: &str) -> ToolStatus {
        let path = which::which(name).ok();
        let version = match &path {
            Some(path) => self.first_line(path, &["--version"]).await,
            None => None,
        };
        tracing::debug!(tool = name, found = path.is_some(), ?version, "probed");
        ToolStatus {
            name: name.to_string(),
            path,
            version,
        }
    }

    /// Runs `program args`, giving up after the probe timeout.
    async fn run(&self, program: &Path, args: &[&str]) -> Option<std::process::Output> {
        let child = Command::new(program).args(args).kill_on_drop(true).output();
        match tokio::time::timeout(self.timeout, child).await {
            Ok(Ok(output)) => Some(output),
            Ok(Err(err)) => {
                tracing::warn!(program = %program.display(), error = %err, "probe failed to start");
                None
            }
            Err(_) => {
                tracing::warn!(program = %program.display(), "probe timed out");
                None
            }
        }
    }

    async fn first_line(&self, program: &Path, args: &[&str]) -> Option<String> {
        let output = self.run(program, args).await?;
        if !output.status.success() {
            return None;
        }
        String::from_utf8_lossy(&output.stdout)
            .lines()
            .next()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
    }

    async fn succeeds(&self, program: &Path, args: &[&str]) -> bool {
        self.run(program, args)
            .await
            .is_some_and(|output| output.status.success())
    }
}

fn install_hint(os: &str, tool: &str) -> String {
    match (os, tool) {
        ("windows", "git") => "Download the installer from https://git-scm.com/download/win".into(),
        ("windows", _) => "winget install GitHub.cli".into(),
        ("macos", t) => format!("brew install {}", t),
        (_, "git") => "Install git with your distribution's package manager".into(),
        _ => "Install gh from https://github.com/cli/cli/releases".into(),
    }
}

pub fn recommendations(os: &str, git: &ToolStatus, gh: &ToolStatus, gh_authenticated: bool) -> Vec<Recommendation> {
    let mut recs = Vec::new();
    if !git.installed() {
        recs.push(Recommendation {
            priority: Priority::High,
            message: "Git is not installed".into(),
            hint: install_hint(os, "git"),
        });
    }
    if !gh.installed() {
        recs.push(Recommendation {
            priority: Priority::High,
            message: "GitHub CLI is not installed".into(),
            hint: install_hint(os, "gh"),
        });
    } else if !gh_authenticated {
        recs.push(Recommendation {
            priority: Priority::Medium,
            message: "GitHub CLI is not authenticated".into(),
            hint: "gh auth login".into(),
        });
    }
    recs
}
