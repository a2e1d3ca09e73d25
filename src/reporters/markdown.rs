use anyhow::Result;
use std::fmt::Write;

use crate::core::checker::HealthReport;
use crate::core::score::BeautificationReport;
use crate::reporters::traits::Reporter;

pub struct MarkdownReporter;

impl Reporter for MarkdownReporter {
    fn name(&self) -> &str {
        "Markdown"
    }

    fn extension(&self) -> &str {
        "md"
    }

    fn generate(&self, health: &HealthReport, score: &BeautificationReport) -> Result<String> {
        let mut md = String::with_capacity(4096);

        writeln!(md, "# Repository Health Report")?;
        writeln!(md)?;
        writeln!(md, "**Repository:** `{}`", health.repo_path.display())?;
        writeln!(
            md,
            "**Score:** {}/{} ({:.1}%)",
            score.total_score, score.max_score, score.percentage
        )?;
        writeln!(
            md,
            "**Level:** {} {} - {}",
            score.level.icon(),
            score.level,
            score.level.tagline()
        )?;
        if let Some(milestone) = &score.next_milestone {
            writeln!(
                md,
                "**Next level:** {} at {:.0}% ({:.1} points to go)",
                milestone.level, milestone.target, milestone.points_needed
            )?;
        }
        writeln!(md)?;

        writeln!(md, "## Checks")?;
        writeln!(md)?;
        writeln!(md, "| Check | Status | Score | Notes |")?;
        writeln!(md, "|-------|--------|------:|-------|")?;
        for check in &health.checks {
            writeln!(
                md,
                "| {} | {} | {}/{} | {} |",
                check.name,
                check.status,
                check.score,
                check.max_score,
                check.message.replace('|', "\\|")
            )?;
        }
        writeln!(md)?;

        writeln!(md, "## Categories")?;
        writeln!(md)?;
        writeln!(md, "| Category | Status | Score | Progress |")?;
        writeln!(md, "|----------|--------|------:|---------:|")?;
        for cat in &score.categories {
            writeln!(
                md,
                "| {} | {} | {}/{} | {:.0}% |",
                cat.name, cat.status, cat.score, cat.max_score, cat.percentage
            )?;
        }
        writeln!(md)?;

        if !score.achievements.is_empty() {
            writeln!(md, "## Achievements")?;
            writeln!(md)?;
            for a in &score.achievements {
                writeln!(md, "- **{}**: {} (+{} pts)", a.name, a.description, a.points)?;
            }
            writeln!(md)?;
        }

        if !health.critical_issues.is_empty() {
            writeln!(md, "## Critical Issues")?;
            writeln!(md)?;
            for issue in &health.critical_issues {
                writeln!(md, "- {}", issue)?;
            }
            writeln!(md)?;
        }

        if !health.quick_wins.is_empty() {
            writeln!(md, "## Quick Wins")?;
            writeln!(md)?;
            for win in &health.quick_wins {
                writeln!(md, "- **{}** (+{} pts, {}): {}", win.name, win.points, win.time, win.message)?;
            }
            writeln!(md)?;
        }

        if !score.improvements.is_empty() {
            writeln!(md, "## Suggested Improvements")?;
            writeln!(md)?;
            for imp in &score.improvements {
                writeln!(md, "### {} ({:.0}%)", imp.category, imp.percentage)?;
                writeln!(md)?;
                for s in &imp.suggestions {
                    let time = s.time.as_deref().unwrap_or("unknown");
                    writeln!(md, "- {} (+{} pts, {}): {}", s.name, s.points, time, s.message)?;
                }
                writeln!(md)?;
            }
        }

        Ok(md)
    }
}
