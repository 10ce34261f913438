//! Scenario runner: the single control loop.
//!
//! Executes steps strictly in order; each driver call is awaited to
//! completion before the next step starts. The session is exclusively owned
//! for the scenario's duration, so no locking exists anywhere in the loop.
//! There is no retry: every action and assertion executes exactly once.
//!
//! Failure semantics follow the error taxonomy: missing elements and false
//! assertions are recorded and the run continues; driver faults abort it;
//! checkpoint timeouts abort or continue depending on
//! [`TimeoutPolicy`](crate::config::TimeoutPolicy).

use crate::config::{RunnerConfig, TimeoutPolicy};
use crate::driver::{PageDriver, TypeOptions};
use crate::recorder::{NullSink, RecordingSink};
use crate::reporter::{AssertionOutcome, Reporter, ReportSummary};
use crate::result::{GuionError, GuionResult};
use crate::scenario::{Predicate, Scenario, Step};
use crate::wait::wait_until_hidden;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Lifecycle state of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    /// No scenario has been run yet
    NotStarted,
    /// A scenario is currently executing
    Running,
    /// The last run finished with all assertions passing
    Completed,
    /// The last run finished with failures or was aborted
    Failed,
}

/// Recorded outcome of one step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepOutcome {
    /// Step position in the scenario
    pub index: usize,
    /// Step label
    pub label: String,
    /// Execution time
    #[serde(skip, default = "Duration::default")]
    pub duration: Duration,
    /// Error message if the step failed
    pub error: Option<String>,
}

/// Structured result of one scenario run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Scenario name
    pub scenario: String,
    /// Final run state
    pub state: RunState,
    /// Per-step outcomes in execution order
    pub steps: Vec<StepOutcome>,
    /// Assertion summary
    pub summary: ReportSummary,
    /// Recording artifact, if a sink produced one
    pub artifact: Option<PathBuf>,
    /// Total wall-clock time
    pub total_time: Duration,
}

impl RunReport {
    /// Whether the run completed with every assertion passing and the
    /// declared count satisfied.
    #[must_use]
    pub fn success(&self) -> bool {
        self.state == RunState::Completed && self.summary.exit_code() == 0
    }

    /// Process exit code for this run.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        if self.success() {
            0
        } else {
            1
        }
    }
}

/// Executes scenarios against an exclusively-owned page session.
pub struct ScenarioRunner<D: PageDriver> {
    driver: D,
    config: RunnerConfig,
    recorder: Box<dyn RecordingSink>,
    state: RunState,
}

impl<D: PageDriver + std::fmt::Debug> std::fmt::Debug for ScenarioRunner<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScenarioRunner")
            .field("driver", &self.driver)
            .field("config", &self.config)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<D: PageDriver> ScenarioRunner<D> {
    /// Create a runner owning the given session, with no recording.
    pub fn new(driver: D, config: RunnerConfig) -> Self {
        Self {
            driver,
            config,
            recorder: Box::new(NullSink),
            state: RunState::NotStarted,
        }
    }

    /// Attach a recording sink.
    #[must_use]
    pub fn with_recorder(mut self, recorder: Box<dyn RecordingSink>) -> Self {
        self.recorder = recorder;
        self
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> RunState {
        self.state
    }

    /// Borrow the underlying driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Release the session.
    pub fn into_driver(self) -> D {
        self.driver
    }

    /// Run one scenario to completion.
    ///
    /// Returns `Err` only for misuse (invalid scenario, runner already
    /// running) or a broken recording sink; execution failures are part of
    /// the returned report.
    pub async fn run(&mut self, scenario: &Scenario) -> GuionResult<RunReport> {
        if self.state == RunState::Running {
            return Err(GuionError::InvalidState {
                message: "runner is already executing a scenario".to_string(),
            });
        }
        scenario.validate()?;
        self.state = RunState::Running;

        let started = Instant::now();
        tracing::info!(scenario = %scenario.name, steps = scenario.steps.len(), "run started");

        self.recorder.start(&scenario.name)?;
        if let Some(url) = self.config.base_url.clone() {
            if let Err(e) = self.driver.goto(&url).await {
                self.state = RunState::Failed;
                return Err(e);
            }
        }

        let mut reporter = Reporter::begin(&scenario.name, scenario.expected_assertions);
        let mut steps = Vec::with_capacity(scenario.steps.len());
        let mut aborted_at = None;

        for (index, step) in scenario.steps.iter().enumerate() {
            let label = step.label();
            tracing::debug!(index, step = %label, "executing step");
            let step_started = Instant::now();
            let result = self.execute_step(step, &mut reporter).await;
            let duration = step_started.elapsed();

            let error = match result {
                Ok(()) => None,
                Err(e) => {
                    let fatal = match &e {
                        GuionError::Timeout { .. } => {
                            self.config.timeout_policy == TimeoutPolicy::Fatal
                        }
                        other => !other.is_recoverable(),
                    };
                    tracing::warn!(index, step = %label, error = %e, fatal, "step failed");
                    let message = e.to_string();
                    if fatal {
                        steps.push(StepOutcome {
                            index,
                            label,
                            duration,
                            error: Some(message),
                        });
                        aborted_at = Some(index);
                        break;
                    }
                    Some(message)
                }
            };

            steps.push(StepOutcome {
                index,
                label,
                duration,
                error,
            });
            self.capture_frame().await;
        }

        // Assertions in steps the abort never reached are reported as
        // skipped so the expected-count check can explain the shortfall.
        if let Some(stop) = aborted_at {
            for step in &scenario.steps[stop + 1..] {
                record_skipped(&mut reporter, step);
            }
        }

        if !scenario.title.is_empty() || !scenario.description.is_empty() {
            self.recorder
                .annotate(&scenario.title, &scenario.description)?;
        }
        let artifact = self.recorder.finish()?;

        let summary = reporter.done();
        self.state = if aborted_at.is_none() && summary.all_passed() && summary.count_matches() {
            RunState::Completed
        } else {
            RunState::Failed
        };

        tracing::info!(
            scenario = %scenario.name,
            passed = summary.passed,
            failed = summary.failed,
            skipped = summary.skipped,
            state = ?self.state,
            "run finished"
        );

        Ok(RunReport {
            scenario: scenario.name.clone(),
            state: self.state,
            steps,
            summary,
            artifact,
            total_time: started.elapsed(),
        })
    }

    async fn execute_step(
        &mut self,
        step: &Step,
        reporter: &mut Reporter,
    ) -> GuionResult<()> {
        match step {
            Step::TypeText {
                selector,
                text,
                animated,
                clear_first,
            } => {
                let options = TypeOptions {
                    animated: *animated,
                    clear: *clear_first,
                };
                self.driver.type_text(selector, text, &options).await
            }
            Step::Click { selector } => self.driver.click(selector).await,
            Step::MovePointer { target } => self.driver.move_pointer(target).await,
            Step::Wait { ms } => {
                tokio::time::sleep(Duration::from_millis(*ms)).await;
                Ok(())
            }
            Step::Assert { predicate } => {
                let outcome = self.eval_predicate(predicate).await;
                reporter.record(outcome);
                Ok(())
            }
            Step::WaitUntilHidden { selector, asserts } => {
                let options = self.config.wait_options();
                let result = match wait_until_hidden(&mut self.driver, selector, &options).await {
                    Ok(result) => result,
                    Err(e) => {
                        // A driver fault aborts the run; this checkpoint's
                        // own assertions never got a chance either.
                        for predicate in asserts {
                            reporter.record(AssertionOutcome::skipped(predicate.describe()));
                        }
                        return Err(e);
                    }
                };
                if result.success {
                    for predicate in asserts {
                        let outcome = self.eval_predicate(predicate).await;
                        reporter.record(outcome);
                    }
                    return Ok(());
                }

                match self.config.timeout_policy {
                    TimeoutPolicy::Continue => {
                        // Best-effort: the transient element is still up,
                        // but the nested assertions run anyway.
                        for predicate in asserts {
                            let outcome = self.eval_predicate(predicate).await;
                            reporter.record(outcome);
                        }
                    }
                    TimeoutPolicy::Fatal => {
                        for predicate in asserts {
                            reporter.record(AssertionOutcome::skipped(predicate.describe()));
                        }
                    }
                }
                Err(GuionError::Timeout {
                    ms: options.timeout_ms,
                    waited_for: result.waited_for,
                })
            }
        }
    }

    async fn eval_predicate(&mut self, predicate: &Predicate) -> AssertionOutcome {
        let description = predicate.describe();
        match predicate {
            Predicate::TextEquals { selector, expected } => {
                match self.driver.text(selector).await {
                    Ok(actual) if actual == *expected => AssertionOutcome::passed(description),
                    Ok(actual) => AssertionOutcome::failed(
                        description,
                        format!("expected {expected:?}, got {actual:?}"),
                    ),
                    Err(e) => AssertionOutcome::failed(description, e.to_string()),
                }
            }
            Predicate::TextContains {
                selector,
                substring,
            } => match self.driver.text(selector).await {
                Ok(actual) if actual.contains(substring.as_str()) => {
                    AssertionOutcome::passed(description)
                }
                Ok(actual) => AssertionOutcome::failed(
                    description,
                    format!("{substring:?} not found in {actual:?}"),
                ),
                Err(e) => AssertionOutcome::failed(description, e.to_string()),
            },
            Predicate::Visible { selector } => match self.driver.is_visible(selector).await {
                Ok(true) => AssertionOutcome::passed(description),
                Ok(false) => {
                    AssertionOutcome::failed(description, format!("{selector} is not visible"))
                }
                Err(e) => AssertionOutcome::failed(description, e.to_string()),
            },
            Predicate::Hidden { selector } => match self.driver.is_visible(selector).await {
                Ok(false) => AssertionOutcome::passed(description),
                Ok(true) => {
                    AssertionOutcome::failed(description, format!("{selector} is still visible"))
                }
                Err(e) => AssertionOutcome::failed(description, e.to_string()),
            },
            Predicate::Eval { expression } => match self.driver.evaluate(expression).await {
                Ok(true) => AssertionOutcome::passed(description),
                Ok(false) => {
                    AssertionOutcome::failed(description, "expression evaluated to false")
                }
                Err(e) => AssertionOutcome::failed(description, e.to_string()),
            },
        }
    }

    async fn capture_frame(&mut self) {
        if !self.config.capture_frames {
            return;
        }
        match self.driver.screenshot().await {
            Ok(screenshot) => {
                if let Err(e) = self.recorder.capture_frame(&screenshot) {
                    tracing::warn!(error = %e, "frame capture failed");
                }
            }
            Err(e) => tracing::warn!(error = %e, "screenshot failed"),
        }
    }
}

fn record_skipped(reporter: &mut Reporter, step: &Step) {
    match step {
        Step::Assert { predicate } => {
            reporter.record(AssertionOutcome::skipped(predicate.describe()));
        }
        Step::WaitUntilHidden { asserts, .. } => {
            for predicate in asserts {
                reporter.record(AssertionOutcome::skipped(predicate.describe()));
            }
        }
        _ => {}
    }
}
