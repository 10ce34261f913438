//! Assertion reporting.
//!
//! Failures are surfaced here rather than raised as process faults; the
//! summary aggregates all recorded outcomes and maps them to an exit code.
//! The summary also checks the scenario's declared assertion count against
//! what was actually evaluated, catching silently-skipped checks.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Status of a single assertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssertionStatus {
    /// Predicate evaluated true
    Passed,
    /// Predicate evaluated false or could not be evaluated
    Failed,
    /// Not evaluated because the run aborted first
    Skipped,
}

/// Recorded outcome of one assertion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssertionOutcome {
    /// Predicate description
    pub description: String,
    /// Status
    pub status: AssertionStatus,
    /// Error message if failed
    pub error: Option<String>,
}

impl AssertionOutcome {
    /// A passing outcome.
    #[must_use]
    pub fn passed(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            status: AssertionStatus::Passed,
            error: None,
        }
    }

    /// A failing outcome.
    #[must_use]
    pub fn failed(description: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            status: AssertionStatus::Failed,
            error: Some(error.into()),
        }
    }

    /// A skipped outcome.
    #[must_use]
    pub fn skipped(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            status: AssertionStatus::Skipped,
            error: None,
        }
    }
}

/// Collects assertion outcomes for one scenario run.
#[derive(Debug)]
pub struct Reporter {
    name: String,
    expected: usize,
    outcomes: Vec<AssertionOutcome>,
    started: Instant,
}

impl Reporter {
    /// Begin reporting for a scenario with a declared assertion count.
    #[must_use]
    pub fn begin(name: impl Into<String>, expected: usize) -> Self {
        Self {
            name: name.into(),
            expected,
            outcomes: Vec::new(),
            started: Instant::now(),
        }
    }

    /// Record an assertion outcome.
    pub fn record(&mut self, outcome: AssertionOutcome) {
        match outcome.status {
            AssertionStatus::Passed => {
                tracing::debug!(assertion = %outcome.description, "assertion passed");
            }
            AssertionStatus::Failed => {
                tracing::warn!(
                    assertion = %outcome.description,
                    error = outcome.error.as_deref().unwrap_or(""),
                    "assertion failed"
                );
            }
            AssertionStatus::Skipped => {
                tracing::warn!(assertion = %outcome.description, "assertion skipped");
            }
        }
        self.outcomes.push(outcome);
    }

    /// Number of outcomes recorded so far (including skipped).
    #[must_use]
    pub fn recorded(&self) -> usize {
        self.outcomes.len()
    }

    /// Finish reporting and produce the summary.
    #[must_use]
    pub fn done(self) -> ReportSummary {
        let evaluated = self
            .outcomes
            .iter()
            .filter(|o| o.status != AssertionStatus::Skipped)
            .count();
        let passed = self
            .outcomes
            .iter()
            .filter(|o| o.status == AssertionStatus::Passed)
            .count();
        let failed = self
            .outcomes
            .iter()
            .filter(|o| o.status == AssertionStatus::Failed)
            .count();
        let skipped = self.outcomes.len() - evaluated;

        ReportSummary {
            name: self.name,
            expected: self.expected,
            evaluated,
            passed,
            failed,
            skipped,
            outcomes: self.outcomes,
            duration: self.started.elapsed(),
        }
    }
}

/// Aggregated result of one scenario run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Scenario name
    pub name: String,
    /// Declared assertion count
    pub expected: usize,
    /// Assertions actually evaluated
    pub evaluated: usize,
    /// Passing assertions
    pub passed: usize,
    /// Failing assertions
    pub failed: usize,
    /// Assertions skipped by an aborted run
    pub skipped: usize,
    /// Individual outcomes in evaluation order
    pub outcomes: Vec<AssertionOutcome>,
    /// Wall-clock duration of the run
    #[serde(skip, default = "Duration::default")]
    pub duration: Duration,
}

impl ReportSummary {
    /// Whether every evaluated assertion passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failed == 0 && self.skipped == 0
    }

    /// Whether the evaluated count matches the declared count.
    #[must_use]
    pub const fn count_matches(&self) -> bool {
        self.evaluated == self.expected
    }

    /// Process exit code: 0 only when all assertions passed and none were
    /// silently skipped.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        i32::from(!(self.all_passed() && self.count_matches()))
    }

    /// Failing outcomes.
    #[must_use]
    pub fn failures(&self) -> Vec<&AssertionOutcome> {
        self.outcomes
            .iter()
            .filter(|o| o.status == AssertionStatus::Failed)
            .collect()
    }
}
