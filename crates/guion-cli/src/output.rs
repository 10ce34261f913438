//! Output formatting for scenario results

use console::{style, Term};
use guion::{AssertionStatus, RunReport};

/// Writes human-readable run output to the terminal
#[derive(Debug)]
pub struct Printer {
    term: Term,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl Printer {
    /// Create a new printer
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            term: Term::stderr(),
            use_color,
            quiet,
        }
    }

    fn write(&self, line: &str) {
        let _ = self.term.write_line(line);
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if self.quiet {
            return;
        }
        let prefix = if self.use_color {
            style("✓").green().bold().to_string()
        } else {
            "PASS".to_string()
        };
        self.write(&format!("{prefix} {message}"));
    }

    /// Print a failure message (shown even in quiet mode)
    pub fn failure(&self, message: &str) {
        let prefix = if self.use_color {
            style("✗").red().bold().to_string()
        } else {
            "FAIL".to_string()
        };
        self.write(&format!("{prefix} {message}"));
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if self.quiet {
            return;
        }
        let prefix = if self.use_color {
            style("⚠").yellow().bold().to_string()
        } else {
            "WARN".to_string()
        };
        self.write(&format!("{prefix} {message}"));
    }

    /// Print an informational message
    pub fn info(&self, message: &str) {
        if self.quiet {
            return;
        }
        self.write(message);
    }

    /// Print the full run report: per-assertion lines plus a summary.
    pub fn report(&self, report: &RunReport) {
        for outcome in &report.summary.outcomes {
            match outcome.status {
                AssertionStatus::Passed => self.success(&outcome.description),
                AssertionStatus::Failed => {
                    let detail = outcome.error.as_deref().unwrap_or("");
                    self.failure(&format!("{}: {detail}", outcome.description));
                }
                AssertionStatus::Skipped => {
                    self.warning(&format!("{} (skipped)", outcome.description));
                }
            }
        }

        let summary = &report.summary;
        if !summary.count_matches() {
            self.failure(&format!(
                "scenario declares {} assertions but {} were evaluated",
                summary.expected, summary.evaluated
            ));
        }

        let totals = format!(
            "{}: {} passed, {} failed, {} skipped in {:.2}s",
            report.scenario,
            summary.passed,
            summary.failed,
            summary.skipped,
            report.total_time.as_secs_f64()
        );
        if report.success() {
            self.success(&totals);
        } else {
            self.failure(&totals);
        }

        if let Some(path) = &report.artifact {
            self.info(&format!("recording written to {}", path.display()));
        }
    }
}
