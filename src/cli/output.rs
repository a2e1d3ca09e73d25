use colored::*;
use std::io::IsTerminal;
use std::sync::Arc;

use crate::cli::progress::ActivityProgress;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Info,
    Success,
    Warning,
    Error,
}

/// Everything the tool tells the user goes through here.
pub trait Output: Send + Sync {
    /// Render one status line. Errors go to stderr.
    fn status(&self, status: Status, message: &str);

    fn heading(&self, title: &str);

    fn line(&self, text: &str);

    /// Starts an activity indicator for a blocking step.
    fn activity(&self, message: &str) -> ActivityProgress;

    fn info(&self, message: &str) {
        self.status(Status::Info, message);
    }

    fn success(&self, message: &str) {
        self.status(Status::Success, message);
    }

    fn warn(&self, message: &str) {
        self.status(Status::Warning, message);
    }

    fn error(&self, message: &str) {
        self.status(Status::Error, message);
    }
}

pub struct PlainOutput;

impl Output for PlainOutput {
    fn status(&self, status: Status, message: &str) {
        match status {
            Status::Info | Status::Success => println!("{}", message),
            Status::Warning => println!("WARNING: {}", message),
            Status::Error => eprintln!("ERROR: {}", message),
        }
    }

    fn heading(&self, title: &str) {
        println!();
        println!("{}", title);
        println!("{}", "=".repeat(title.chars().count().max(8)));
    }

    fn line(&self, text: &str) {
        println!("{}", text);
    }

    fn activity(&self, message: &str) -> ActivityProgress {
        println!("{}", message);
        ActivityProgress::hidden()
    }
}

pub struct StyledOutput;

impl Output for StyledOutput {
    fn status(&self, status: Status, message: &str) {
        match status {
            Status::Info => println!("{} {}", "ℹ".blue().bold(), message.cyan()),
            Status::Success => println!("{} {}", "✓".green().bold(), message.green()),
            Status::Warning => println!("{} {}", "⚠".yellow().bold(), message.yellow()),
            Status::Error => eprintln!("{} {}", "✗".red().bold(), message.red()),
        }
    }

    fn heading(&self, title: &str) {
        println!();
        println!("{}", title.bold());
        println!("{}", "─".repeat(64));
    }

    fn line(&self, text: &str) {
        println!("{}", text);
    }

    fn activity(&self, message: &str) -> ActivityProgress {
        ActivityProgress::spinner(message)
    }
}

/// Plain when asked for, or when stdout is not a terminal.
pub fn for_terminal(force_plain: bool) -> Arc<dyn Output> {
    if force_plain || !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
        Arc::new(PlainOutput)
    } else {
        Arc::new(StyledOutput)
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::sync::Mutex;

    /// Captures status lines for assertions.
    #[derive(Default)]
    pub struct RecordingOutput {
        pub lines: Mutex<Vec<(Status, String)>>,
    }

    impl RecordingOutput {
        pub fn contains(&self, status: Status, needle: &str) -> bool {
            self.lines
                .lock()
                .unwrap()
                .iter()
                .any(|(s, m)| *s == status && m.contains(needle))
        }
    }

    impl Output for RecordingOutput {
        fn status(&self, status: Status, message: &str) {
            self.lines.lock().unwrap().push((status, message.to_string()));
        }

        fn heading(&self, title: &str) {
            self.lines.lock().unwrap().push((Status::Info, title.to_string()));
        }

        fn line(&self, text: &str) {
            self.lines.lock().unwrap().push((Status::Info, text.to_string()));
        }

        fn activity(&self, _message: &str) -> ActivityProgress {
            ActivityProgress::hidden()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::RecordingOutput;
    use super::*;

    #[test]
    fn test_convenience_methods_route_to_status() {
        let out = RecordingOutput::default();
        out.info("one");
        out.success("two");
        out.warn("three");
        out.error("four");
        assert!(out.contains(Status::Info, "one"));
        assert!(out.contains(Status::Success, "two"));
        assert!(out.contains(Status::Warning, "three"));
        assert!(out.contains(Status::Error, "four"));
    }

    #[test]
    fn test_forced_plain_output() {
        let out = for_terminal(true);
        out.info("plain line");
    }
}
