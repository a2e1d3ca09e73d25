pub mod json;
pub mod markdown;
pub mod traits;

use traits::Reporter;

/// Looks up a reporter by its `--format` name.
pub fn for_format(format: &str) -> Option<Box<dyn Reporter>> {
    match format {
        "json" => Some(Box::new(json::JsonReporter)),
        "markdown" | "md" => Some(Box::new(markdown::MarkdownReporter)),
        _ => None,
    }
}
