//! Scenario schema: an ordered list of steps plus metadata.
//!
//! A scenario is fixed at definition time and executed once per run. Steps
//! never branch or loop; order is significant. Scenarios are built in Rust
//! with [`ScenarioBuilder`] or loaded from YAML.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Supported schema version for serialized scenarios.
pub const SCENARIO_VERSION: &str = "1.0";

/// Target of a pointer move: a selector or absolute page coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PointerTarget {
    /// Move the pointer over the element matching the selector
    Selector {
        /// CSS selector
        selector: String,
    },
    /// Move the pointer to absolute coordinates
    Coords {
        /// Horizontal offset in pixels
        x: f64,
        /// Vertical offset in pixels
        y: f64,
    },
}

impl PointerTarget {
    /// Target an element by selector
    pub fn selector(selector: impl Into<String>) -> Self {
        Self::Selector {
            selector: selector.into(),
        }
    }

    /// Target absolute coordinates
    #[must_use]
    pub const fn coords(x: f64, y: f64) -> Self {
        Self::Coords { x, y }
    }
}

/// Boolean predicate evaluated against current page state.
///
/// Typed variants replace opaque in-page script strings so failures carry a
/// selector and an expectation, not just `false`. [`Predicate::Eval`] remains
/// as the escape hatch for raw page expressions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Predicate {
    /// Element text content equals the expected string
    TextEquals {
        /// CSS selector
        selector: String,
        /// Expected text content
        expected: String,
    },
    /// Element text content contains the substring
    TextContains {
        /// CSS selector
        selector: String,
        /// Required substring
        substring: String,
    },
    /// Element is visible
    Visible {
        /// CSS selector
        selector: String,
    },
    /// Element is hidden or absent
    Hidden {
        /// CSS selector
        selector: String,
    },
    /// Raw page expression evaluating to a boolean
    Eval {
        /// Expression source
        expression: String,
    },
}

impl Predicate {
    /// Human-readable description used in reports.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::TextEquals { selector, expected } => {
                format!("text of {selector} == {expected:?}")
            }
            Self::TextContains {
                selector,
                substring,
            } => format!("text of {selector} contains {substring:?}"),
            Self::Visible { selector } => format!("{selector} is visible"),
            Self::Hidden { selector } => format!("{selector} is hidden"),
            Self::Eval { expression } => format!("eval: {expression}"),
        }
    }
}

/// One step of a scenario.
///
/// Actions mutate the page, `Assert` evaluates a predicate, and
/// `WaitUntilHidden` is a checkpoint: it blocks until a transient element
/// (a dialog, a spinner) has dismissed, then runs its nested assertions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Step {
    /// Type text into the element matching the selector
    TypeText {
        /// CSS selector
        selector: String,
        /// Text to enter
        text: String,
        /// Type character-by-character for recordings
        #[serde(default)]
        animated: bool,
        /// Clear existing content first
        #[serde(default)]
        clear_first: bool,
    },
    /// Click the element matching the selector
    Click {
        /// CSS selector
        selector: String,
    },
    /// Move the pointer to an element or to coordinates
    MovePointer {
        /// Where to move the pointer
        target: PointerTarget,
    },
    /// Suspend for a fixed duration
    Wait {
        /// Duration in milliseconds
        ms: u64,
    },
    /// Poll until the element is no longer visible, then run the nested
    /// assertions
    WaitUntilHidden {
        /// CSS selector of the transient element
        selector: String,
        /// Assertions evaluated once the element has dismissed
        #[serde(default)]
        asserts: Vec<Predicate>,
    },
    /// Evaluate a predicate and record pass/fail
    Assert {
        /// Predicate to evaluate
        predicate: Predicate,
    },
}

impl Step {
    /// Number of assertions this step contributes to a run.
    #[must_use]
    pub fn assertion_count(&self) -> usize {
        match self {
            Self::Assert { .. } => 1,
            Self::WaitUntilHidden { asserts, .. } => asserts.len(),
            _ => 0,
        }
    }

    /// Short label used in step outcomes and tracing.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::TypeText { selector, text, .. } => format!("type {text:?} into {selector}"),
            Self::Click { selector } => format!("click {selector}"),
            Self::MovePointer {
                target: PointerTarget::Selector { selector },
            } => format!("move pointer to {selector}"),
            Self::MovePointer {
                target: PointerTarget::Coords { x, y },
            } => format!("move pointer to ({x}, {y})"),
            Self::Wait { ms } => format!("wait {ms}ms"),
            Self::WaitUntilHidden { selector, .. } => format!("wait until {selector} hidden"),
            Self::Assert { predicate } => format!("assert {}", predicate.describe()),
        }
    }
}

/// A named, ordered end-to-end UI test case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// Schema version (must be "1.0")
    #[serde(default = "default_version")]
    pub version: String,
    /// Machine-friendly scenario name, keys recording artifacts
    pub name: String,
    /// Human-readable title
    #[serde(default)]
    pub title: String,
    /// Human-readable description
    #[serde(default)]
    pub description: String,
    /// Declared number of assertions.
    ///
    /// Checked against the count actually evaluated during a run to detect
    /// silently-skipped checks.
    pub expected_assertions: usize,
    /// Ordered steps
    pub steps: Vec<Step>,
    /// Optional metadata
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

fn default_version() -> String {
    SCENARIO_VERSION.to_string()
}

impl Scenario {
    /// Start building a scenario with the given name.
    pub fn builder(name: impl Into<String>) -> ScenarioBuilder {
        ScenarioBuilder::new(name)
    }

    /// Parse a scenario from YAML and validate it.
    pub fn from_yaml(yaml: &str) -> Result<Self, ScenarioError> {
        let scenario: Self =
            serde_yaml_ng::from_str(yaml).map_err(|e| ScenarioError::Parse(e.to_string()))?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Serialize the scenario to YAML.
    pub fn to_yaml(&self) -> Result<String, ScenarioError> {
        serde_yaml_ng::to_string(self).map_err(|e| ScenarioError::Parse(e.to_string()))
    }

    /// Number of assertions derivable from the step list.
    #[must_use]
    pub fn assertion_count(&self) -> usize {
        self.steps.iter().map(Step::assertion_count).sum()
    }

    /// Validate version, non-emptiness, and the declared assertion count.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        if self.version != SCENARIO_VERSION {
            return Err(ScenarioError::UnsupportedVersion(self.version.clone()));
        }
        if self.steps.is_empty() {
            return Err(ScenarioError::EmptySteps);
        }
        let actual = self.assertion_count();
        if self.expected_assertions != actual {
            return Err(ScenarioError::AssertionCountMismatch {
                declared: self.expected_assertions,
                actual,
            });
        }
        Ok(())
    }
}

/// Errors from parsing or validating a scenario definition.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ScenarioError {
    /// YAML was malformed or missing required fields
    #[error("Failed to parse scenario: {0}")]
    Parse(String),

    /// Schema version is not supported
    #[error("Unsupported scenario version '{0}', expected '1.0'")]
    UnsupportedVersion(String),

    /// A scenario must have at least one step
    #[error("Scenario has no steps")]
    EmptySteps,

    /// Declared assertion count disagrees with the steps
    #[error("Scenario declares {declared} assertions but its steps evaluate {actual}")]
    AssertionCountMismatch {
        /// Count from `expected_assertions`
        declared: usize,
        /// Count derived from the step list
        actual: usize,
    },
}

/// Builder for [`Scenario`].
///
/// `build()` derives `expected_assertions` from the steps, so scenarios
/// assembled in Rust cannot declare a stale count. The declared field exists
/// for the serialized form, where it guards hand-edited YAML.
#[derive(Debug, Default)]
pub struct ScenarioBuilder {
    name: String,
    title: String,
    description: String,
    steps: Vec<Step>,
    metadata: HashMap<String, String>,
}

impl ScenarioBuilder {
    /// Create a builder for a scenario with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the human-readable title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Add a metadata entry.
    #[must_use]
    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Append an arbitrary step.
    #[must_use]
    pub fn step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    /// Append a plain `TypeText` step.
    #[must_use]
    pub fn type_text(self, selector: impl Into<String>, text: impl Into<String>) -> Self {
        self.step(Step::TypeText {
            selector: selector.into(),
            text: text.into(),
            animated: false,
            clear_first: false,
        })
    }

    /// Append an animated `TypeText` step, optionally clearing first.
    #[must_use]
    pub fn type_animated(
        self,
        selector: impl Into<String>,
        text: impl Into<String>,
        clear_first: bool,
    ) -> Self {
        self.step(Step::TypeText {
            selector: selector.into(),
            text: text.into(),
            animated: true,
            clear_first,
        })
    }

    /// Append a `Click` step.
    #[must_use]
    pub fn click(self, selector: impl Into<String>) -> Self {
        self.step(Step::Click {
            selector: selector.into(),
        })
    }

    /// Append a `MovePointer` step.
    #[must_use]
    pub fn move_pointer(self, target: PointerTarget) -> Self {
        self.step(Step::MovePointer { target })
    }

    /// Append a fixed `Wait` step.
    #[must_use]
    pub fn wait_ms(self, ms: u64) -> Self {
        self.step(Step::Wait { ms })
    }

    /// Append a `WaitUntilHidden` checkpoint with nested assertions.
    #[must_use]
    pub fn wait_until_hidden(
        self,
        selector: impl Into<String>,
        asserts: Vec<Predicate>,
    ) -> Self {
        self.step(Step::WaitUntilHidden {
            selector: selector.into(),
            asserts,
        })
    }

    /// Append an `Assert` step.
    #[must_use]
    pub fn assert(self, predicate: Predicate) -> Self {
        self.step(Step::Assert { predicate })
    }

    /// Finish the scenario; `expected_assertions` is computed from the steps.
    pub fn build(self) -> Result<Scenario, ScenarioError> {
        let expected_assertions = self.steps.iter().map(Step::assertion_count).sum();
        let scenario = Scenario {
            version: SCENARIO_VERSION.to_string(),
            name: self.name,
            title: self.title,
            description: self.description,
            expected_assertions,
            steps: self.steps,
            metadata: self.metadata,
        };
        scenario.validate()?;
        Ok(scenario)
    }
}
