use anyhow::Result;

use crate::core::checker::HealthReport;
use crate::core::score::BeautificationReport;

pub trait Reporter: Send + Sync {
    /// Reporter name for display
    fn name(&self) -> &str;

    /// File extension for the output file
    fn extension(&self) -> &str;

    /// Render the health report and its score as one document
    fn generate(&self, health: &HealthReport, score: &BeautificationReport) -> Result<String>;
}
