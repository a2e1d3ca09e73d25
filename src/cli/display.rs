use crate::backup::index::BackupRecord;
use crate::checks::traits::CheckStatus;
use crate::cli::output::Output;
use crate::core::checker::HealthReport;
use crate::core::score::{BeautificationReport, CategoryStatus};
use crate::environment::detector::{EnvironmentReport, ToolStatus};
use crate::utils::fs::human_size;

fn status_marker(status: CheckStatus) -> &'static str {
    match status {
        CheckStatus::Good => "[ok]",
        CheckStatus::Basic => "[~~]",
        CheckStatus::Missing => "[--]",
        CheckStatus::Unknown => "[??]",
    }
}

fn category_marker(status: CategoryStatus) -> &'static str {
    match status {
        CategoryStatus::Excellent => "++",
        CategoryStatus::Good => "+ ",
        CategoryStatus::Fair => "~ ",
        CategoryStatus::Poor => "- ",
    }
}

fn progress_bar(percentage: f64, width: usize) -> String {
    let filled = ((percentage.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!("{}{}", "#".repeat(filled), ".".repeat(width - filled))
}

pub fn render_health(out: &dyn Output, report: &HealthReport) {
    out.heading(&format!("Repository Health: {}", report.repo_path.display()));
    for check in &report.checks {
        out.line(&format!(
            "  {} {:<20} {:>2}/{:<2}  {}",
            status_marker(check.status),
            check.name,
            check.score,
            check.max_score,
            check.message
        ));
    }
    out.line("");
    out.info(&format!(
        "Overall score: {}/{}",
        report.overall_score, report.max_score
    ));

    if !report.critical_issues.is_empty() {
        out.heading("Critical Issues");
        for issue in &report.critical_issues {
            out.error(issue);
        }
    }

    if !report.quick_wins.is_empty() {
        out.heading("Quick Wins");
        for win in &report.quick_wins {
            out.line(&format!(
                "  +{:<3} {} ({}): {}",
                win.points, win.name, win.time, win.message
            ));
        }
    }

    if !report.recommendations.is_empty() {
        out.heading("Recommendations");
        for rec in &report.recommendations {
            out.warn(rec);
        }
    }
}

pub fn render_score(out: &dyn Output, score: &BeautificationReport) {
    out.heading("Repository Beautification Score");
    out.line(&format!(
        "  {} {} - {}",
        score.level.icon(),
        score.level.to_string().to_uppercase(),
        score.level.tagline()
    ));
    out.line(&format!(
        "  Score: {}/{} ({:.1}%)",
        score.total_score, score.max_score, score.percentage
    ));

    if !score.achievements.is_empty() {
        out.heading(&format!("Achievements Unlocked ({} pts)", score.achievement_points()));
        for a in &score.achievements {
            out.success(&format!("{}: {} (+{} pts)", a.name, a.description, a.points));
        }
    }

    out.heading("Category Breakdown");
    for cat in &score.categories {
        out.line(&format!(
            "  {} {:<16} {:>2}/{:<2} {} {:>3.0}%",
            category_marker(cat.status),
            cat.name,
            cat.score,
            cat.max_score,
            progress_bar(cat.percentage, 20),
            cat.percentage
        ));
    }

    if !score.improvements.is_empty() {
        out.heading("Suggested Improvements");
        for imp in &score.improvements {
            out.info(&format!("{} ({:.0}%)", imp.category, imp.percentage));
            for s in &imp.suggestions {
                out.line(&format!(
                    "    {} (+{} pts, {}): {}",
                    s.name,
                    s.points,
                    s.time.as_deref().unwrap_or("unknown"),
                    s.message
                ));
            }
        }
    }

    match &score.next_milestone {
        Some(m) => out.info(&format!(
            "Next level: {} {} at {:.0}% ({:.1} points to go)",
            m.level.icon(),
            m.level,
            m.target,
            m.points_needed
        )),
        None => out.success("Top level reached"),
    }
}

pub fn render_backups(out: &dyn Output, records: &[&BackupRecord]) {
    if records.is_empty() {
        out.info("No backups found");
        return;
    }
    out.heading(&format!("Backups ({})", records.len()));
    for record in records {
        out.line(&format!("  {}", record.backup_id));
        out.line(&format!(
            "      repo: {}  operation: {}  created: {}",
            record.repo_name, record.operation, record.timestamp
        ));
        out.line(&format!(
            "      archive: {}  source: {}",
            human_size(record.archive_size),
            human_size(record.repo_size)
        ));
        out.line(&format!("      from: {}", record.repo_path.display()));
    }
}

fn tool_line(tool: &ToolStatus) -> String {
    match (&tool.path, &tool.version) {
        (Some(_), Some(version)) => format!("{}: {}", tool.name, version),
        (Some(path), None) => format!("{}: {} (version unknown)", tool.name, path.display()),
        (None, _) => format!("{}: not installed", tool.name),
    }
}

pub fn render_environment(out: &dyn Output, env: &EnvironmentReport) {
    out.heading(&format!("Environment ({})", env.os));
    for tool in [&env.git, &env.gh] {
        if tool.installed() {
            out.success(&tool_line(tool));
        } else {
            out.warn(&tool_line(tool));
        }
    }
    if env.gh.installed() {
        if env.gh_authenticated {
            out.success("gh: authenticated");
        } else {
            out.warn("gh: not authenticated");
        }
    }
    let shells: Vec<&str> = env
        .shells
        .iter()
        .filter(|(_, found)| **found)
        .map(|(name, _)| name.as_str())
        .collect();
    out.info(&format!(
        "Shells: {}",
        if shells.is_empty() { "none found".to_string() } else { shells.join(", ") }
    ));

    if !env.recommendations.is_empty() {
        out.heading("Recommendations");
        for rec in &env.recommendations {
            out.warn(&format!("[{}] {} ({})", rec.priority, rec.message, rec.hint));
        }
    }
}
