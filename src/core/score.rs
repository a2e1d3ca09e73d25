use serde::Serialize;

use crate::checks::traits::{CheckStatus, HealthCheckResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
    Master,
}

impl Level {
    pub const ALL: [Level; 5] = [
        Level::Beginner,
        Level::Intermediate,
        Level::Advanced,
        Level::Expert,
        Level::Master,
    ];

    /// Bands are half-open `[min, next.min)`; master closes at 100.
    pub fn from_percentage(percentage: f64) -> Self {
        if !percentage.is_finite() {
            return Level::Beginner;
        }
        Self::ALL
            .iter()
            .rev()
            .copied()
            .find(|level| percentage >= level.min_percentage())
            .unwrap_or(Level::Beginner)
    }

    pub fn min_percentage(&self) -> f64 {
        match self {
            Level::Beginner => 0.0,
            Level::Intermediate => 30.0,
            Level::Advanced => 60.0,
            Level::Expert => 80.0,
            Level::Master => 95.0,
        }
    }

    pub fn next(&self) -> Option<Level> {
        match self {
            Level::Beginner => Some(Level::Intermediate),
            Level::Intermediate => Some(Level::Advanced),
            Level::Advanced => Some(Level::Expert),
            Level::Expert => Some(Level::Master),
            Level::Master => None,
        }
    }

    pub fn tagline(&self) -> &'static str {
        match self {
            Level::Beginner => "Just Getting Started",
            Level::Intermediate => "Building Momentum",
            Level::Advanced => "Looking Professional",
            Level::Expert => "Production Ready",
            Level::Master => "Open Source Champion",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Level::Beginner => "🌱",
            Level::Intermediate => "🌿",
            Level::Advanced => "🌳",
            Level::Expert => "🌟",
            Level::Master => "💎",
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Level::Beginner => write!(f, "beginner"),
            Level::Intermediate => write!(f, "intermediate"),
            Level::Advanced => write!(f, "advanced"),
            Level::Expert => write!(f, "expert"),
            Level::Master => write!(f, "master"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryStatus {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl CategoryStatus {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 90.0 {
            CategoryStatus::Excellent
        } else if percentage >= 70.0 {
            CategoryStatus::Good
        } else if percentage >= 40.0 {
            CategoryStatus::Fair
        } else {
            CategoryStatus::Poor
        }
    }
}

impl std::fmt::Display for CategoryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CategoryStatus::Excellent => write!(f, "excellent"),
            CategoryStatus::Good => write!(f, "good"),
            CategoryStatus::Fair => write!(f, "fair"),
            CategoryStatus::Poor => write!(f, "poor"),
        }
    }
}

struct CategoryDef {
    name: &'static str,
    checks: &'static [&'static str],
}

const CATEGORIES: &[CategoryDef] = &[
    CategoryDef {
        name: "Documentation",
        checks: &["README.md", "Documentation", "Wiki"],
    },
    CategoryDef {
        name: "Community",
        checks: &["CONTRIBUTING.md", "CODE_OF_CONDUCT.md", "LICENSE"],
    },
    CategoryDef {
        name: "Automation",
        checks: &["GitHub Actions", "Branch Protection"],
    },
    CategoryDef {
        name: "Security",
        checks: &["SECURITY.md", ".gitignore"],
    },
    CategoryDef {
        name: "Discoverability",
        checks: &["Description", "Topics"],
    },
    CategoryDef {
        name: "Engagement",
        checks: &["Issues"],
    },
];

const IMPROVEMENT_CATEGORIES: usize = 3;
const IMPROVEMENT_THRESHOLD: f64 = 80.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Achievement {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub points: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryScore {
    pub name: String,
    pub score: u32,
    pub max_score: u32,
    pub percentage: f64,
    pub status: CategoryStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct Suggestion {
    pub name: String,
    pub message: String,
    pub points: u32,
    pub time: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Improvement {
    pub category: String,
    pub percentage: f64,
    pub suggestions: Vec<Suggestion>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Milestone {
    pub level: Level,
    pub target: f64,
    pub points_needed: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct BeautificationReport {
    pub total_score: u32,
    pub max_score: u32,
    pub percentage: f64,
    pub level: Level,
    pub achievements: Vec<Achievement>,
    pub categories: Vec<CategoryScore>,
    pub improvements: Vec<Improvement>,
    pub next_milestone: Option<Milestone>,
}

impl BeautificationReport {
    pub fn calculate(results: &[HealthCheckResult]) -> Self {
        let total_score: u32 = results.iter().map(|r| r.score).sum();
        let max_score: u32 = results.iter().map(|r| r.max_score).sum();
        let percentage = percent(total_score, max_score);
        let level = Level::from_percentage(percentage);

        let categories: Vec<CategoryScore> = CATEGORIES
            .iter()
            .map(|def| category_score(def, results))
            .collect();
        let improvements = improvements(&categories, results);

        let next_milestone = level.next().map(|next| Milestone {
            level: next,
            target: next.min_percentage(),
            points_needed: next.min_percentage() - percentage,
        });

        Self {
            total_score,
            max_score,
            percentage,
            level,
            achievements: achievements(results, percentage),
            categories,
            improvements,
            next_milestone,
        }
    }

    pub fn achievement_points(&self) -> u32 {
        self.achievements.iter().map(|a| a.points).sum()
    }
}

fn percent(score: u32, max: u32) -> f64 {
    if max == 0 {
        0.0
    } else {
        f64::from(score) / f64::from(max) * 100.0
    }
}

fn category_score(def: &CategoryDef, results: &[HealthCheckResult]) -> CategoryScore {
    let (score, max_score) = results
        .iter()
        .filter(|r| def.checks.contains(&r.name.as_str()))
        .fold((0, 0), |(s, m), r| (s + r.score, m + r.max_score));
    let percentage = percent(score, max_score);
    CategoryScore {
        name: def.name.to_string(),
        score,
        max_score,
        percentage,
        status: CategoryStatus::from_percentage(percentage),
    }
}

fn improvements(categories: &[CategoryScore], results: &[HealthCheckResult]) -> Vec<Improvement> {
    let mut weakest: Vec<(&CategoryDef, &CategoryScore)> = CATEGORIES.iter().zip(categories).collect();
    weakest.sort_by(|a, b| a.1.percentage.total_cmp(&b.1.percentage));

    weakest
        .into_iter()
        .take(IMPROVEMENT_CATEGORIES)
        .filter(|(_, cat)| cat.percentage < IMPROVEMENT_THRESHOLD)
        .filter_map(|(def, cat)| {
            let suggestions: Vec<Suggestion> = def
                .checks
                .iter()
                .filter_map(|name| results.iter().find(|r| r.name == *name))
                .filter(|r| !r.is_good())
                .map(|r| Suggestion {
                    name: r.name.clone(),
                    message: r.message.clone(),
                    points: r.max_score,
                    time: r.fix_time.clone(),
                })
                .collect();
            (!suggestions.is_empty()).then(|| Improvement {
                category: cat.name.clone(),
                percentage: cat.percentage,
                suggestions,
            })
        })
        .collect()
}

fn achievements(results: &[HealthCheckResult], percentage: f64) -> Vec<Achievement> {
    let status = |name: &str| results.iter().find(|r| r.name == name).map(|r| r.status);
    let good = |name: &str| status(name) == Some(CheckStatus::Good);

    let table: [(bool, Achievement); 9] = [
        (
            matches!(status("README.md"), Some(CheckStatus::Good | CheckStatus::Basic)),
            Achievement { id: "first_readme", name: "First Steps", description: "Created README.md", points: 5 },
        ),
        (
            good("LICENSE"),
            Achievement { id: "licensed", name: "Licensed to Code", description: "Added a LICENSE file", points: 5 },
        ),
        (
            good("README.md") && good("Documentation"),
            Achievement { id: "professional_docs", name: "Documentation Master", description: "Complete documentation", points: 10 },
        ),
        (
            good("GitHub Actions"),
            Achievement { id: "ci_cd_setup", name: "Automation Engineer", description: "Set up a CI/CD pipeline", points: 10 },
        ),
        (
            good("CONTRIBUTING.md") && good("CODE_OF_CONDUCT.md"),
            Achievement { id: "community_ready", name: "Community Builder", description: "Contributing guide and code of conduct", points: 8 },
        ),
        (
            good("SECURITY.md"),
            Achievement { id: "security_conscious", name: "Security First", description: "Added SECURITY.md", points: 5 },
        ),
        (
            good("Description") && good("Topics"),
            Achievement { id: "well_branded", name: "Well Branded", description: "Description and topics set", points: 8 },
        ),
        (
            good("Wiki"),
            Achievement { id: "wiki_master", name: "Wiki Master", description: "Created a comprehensive wiki", points: 10 },
        ),
        (
            percentage >= 100.0,
            Achievement { id: "perfectionist", name: "Perfectionist", description: "Achieved a 100% score", points: 20 },
        ),
    ];

    table
        .into_iter()
        .filter_map(|(unlocked, achievement)| unlocked.then_some(achievement))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(name: &str, status: CheckStatus, score: u32, max: u32) -> HealthCheckResult {
        HealthCheckResult::new(name, status, score, max, "msg")
    }

    /// One check per category-less name so the percentage is exactly `score`%.
    fn single(score: u32) -> Vec<HealthCheckResult> {
        vec![result("Custom", CheckStatus::Basic, score, 100)]
    }

    #[test]
    fn test_band_boundaries_are_contiguous() {
        assert_eq!(BeautificationReport::calculate(&single(29)).level, Level::Beginner);
        assert_eq!(BeautificationReport::calculate(&single(30)).level, Level::Intermediate);
        assert_eq!(BeautificationReport::calculate(&single(59)).level, Level::Intermediate);
        assert_eq!(BeautificationReport::calculate(&single(60)).level, Level::Advanced);
        assert_eq!(BeautificationReport::calculate(&single(79)).level, Level::Advanced);
        assert_eq!(BeautificationReport::calculate(&single(80)).level, Level::Expert);
        assert_eq!(BeautificationReport::calculate(&single(94)).level, Level::Expert);
        assert_eq!(BeautificationReport::calculate(&single(95)).level, Level::Master);
        assert_eq!(BeautificationReport::calculate(&single(100)).level, Level::Master);
    }

    #[test]
    fn test_fractional_percentages_fall_in_a_band() {
        assert_eq!(Level::from_percentage(29.5), Level::Beginner);
        assert_eq!(Level::from_percentage(59.99), Level::Intermediate);
        assert_eq!(Level::from_percentage(94.5), Level::Expert);
        assert_eq!(Level::from_percentage(0.0), Level::Beginner);
        assert_eq!(Level::from_percentage(f64::NAN), Level::Beginner);
    }

    #[test]
    fn test_empty_results() {
        let report = BeautificationReport::calculate(&[]);
        assert_eq!(report.percentage, 0.0);
        assert_eq!(report.level, Level::Beginner);
        assert!(report.achievements.is_empty());
        assert!(report.categories.iter().all(|c| c.max_score == 0));
    }

    #[test]
    fn test_next_milestone() {
        let report = BeautificationReport::calculate(&single(45));
        let milestone = report.next_milestone.unwrap();
        assert_eq!(milestone.level, Level::Advanced);
        assert_eq!(milestone.target, 60.0);
        assert!((milestone.points_needed - 15.0).abs() < 1e-9);

        assert!(BeautificationReport::calculate(&single(97)).next_milestone.is_none());
    }

    #[test]
    fn test_achievements() {
        let results = vec![
            result("README.md", CheckStatus::Basic, 9, 15),
            result("LICENSE", CheckStatus::Good, 10, 10),
            result("Documentation", CheckStatus::Good, 6, 6),
            result("CONTRIBUTING.md", CheckStatus::Good, 8, 8),
            result("CODE_OF_CONDUCT.md", CheckStatus::Missing, 0, 5),
        ];
        let report = BeautificationReport::calculate(&results);
        let ids: Vec<&str> = report.achievements.iter().map(|a| a.id).collect();
        assert_eq!(ids, ["first_readme", "licensed"]);
        assert_eq!(report.achievement_points(), 10);
    }

    #[test]
    fn test_perfectionist_requires_full_score() {
        let results = vec![
            result("README.md", CheckStatus::Good, 15, 15),
            result("Wiki", CheckStatus::Good, 5, 5),
            result("Description", CheckStatus::Good, 3, 3),
            result("Topics", CheckStatus::Good, 3, 3),
        ];
        let report = BeautificationReport::calculate(&results);
        let ids: Vec<&str> = report.achievements.iter().map(|a| a.id).collect();
        assert_eq!(ids, ["first_readme", "well_branded", "wiki_master", "perfectionist"]);

        let mut partial = results.clone();
        partial[1] = result("Wiki", CheckStatus::Unknown, 3, 5);
        let report = BeautificationReport::calculate(&partial);
        assert!(report.achievements.iter().all(|a| a.id != "perfectionist"));
    }

    #[test]
    fn test_categories_and_status_buckets() {
        let results = vec![
            result("SECURITY.md", CheckStatus::Good, 5, 5),
            result(".gitignore", CheckStatus::Basic, 5, 10),
            result("Issues", CheckStatus::Unknown, 5, 5),
        ];
        let report = BeautificationReport::calculate(&results);
        let names: Vec<&str> = report.categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            ["Documentation", "Community", "Automation", "Security", "Discoverability", "Engagement"]
        );
        let security = &report.categories[3];
        assert_eq!((security.score, security.max_score), (10, 15));
        assert_eq!(security.status, CategoryStatus::Fair);
        assert_eq!(report.categories[5].status, CategoryStatus::Excellent);

        assert_eq!(CategoryStatus::from_percentage(70.0), CategoryStatus::Good);
        assert_eq!(CategoryStatus::from_percentage(39.9), CategoryStatus::Poor);
    }

    #[test]
    fn test_improvements_target_weakest_categories() {
        let results = vec![
            result("README.md", CheckStatus::Good, 15, 15),
            result("LICENSE", CheckStatus::Missing, 0, 10),
            result("GitHub Actions", CheckStatus::Missing, 0, 10).with_fix_time("20 minutes"),
            result("SECURITY.md", CheckStatus::Good, 5, 5),
            result(".gitignore", CheckStatus::Basic, 5, 10),
            result("Issues", CheckStatus::Unknown, 5, 5),
        ];
        let report = BeautificationReport::calculate(&results);
        let cats: Vec<&str> = report.improvements.iter().map(|i| i.category.as_str()).collect();
        // Community and Automation at 0%, Discoverability has no checks so no suggestions.
        assert_eq!(cats, ["Community", "Automation"]);
        assert_eq!(report.improvements[1].suggestions[0].time.as_deref(), Some("20 minutes"));
        assert!(report.improvements.iter().all(|i| i.percentage < 80.0));
    }
}
