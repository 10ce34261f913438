//! Guion: typed scenario runner for browser-driven UI tests
//!
//! Guion (Spanish: "script/screenplay") executes named, ordered UI test
//! scenarios against an abstract page driver. A scenario is a fixed list of
//! steps: actions (type, click, move pointer, wait), assertions (typed
//! predicates against page state), and checkpoints that block until a
//! transient element has dismissed. Runs can be recorded as documentation
//! GIFs.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────────┐     ┌──────────────────┐
//! │  Scenario    │     │  ScenarioRunner   │     │  PageDriver      │
//! │  (steps,     │────►│  single control   │────►│  (scripted page  │
//! │   YAML)      │     │  loop             │     │   or browser)    │
//! └──────────────┘     └───────┬──────────┘     └──────────────────┘
//!                              │
//!                   ┌──────────┴──────────┐
//!                   ▼                     ▼
//!             ┌──────────┐         ┌─────────────┐
//!             │ Reporter │         │ Recording   │
//!             │ (exit    │         │ sink (GIF)  │
//!             │  code)   │         └─────────────┘
//!             └──────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use guion::{
//!     ClickEffect, Predicate, RunnerConfig, Scenario, ScenarioRunner, ScriptedDriver,
//! };
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> guion::GuionResult<()> {
//! let scenario = Scenario::builder("login")
//!     .type_text("#usernameField", "admin")
//!     .click("#loginButton")
//!     .wait_until_hidden(
//!         "#dialogBox",
//!         vec![Predicate::TextEquals {
//!             selector: "#errorText".to_string(),
//!             expected: String::new(),
//!         }],
//!     )
//!     .build()?;
//!
//! let driver = ScriptedDriver::new()
//!     .with_element("#usernameField", "", true)
//!     .with_element("#loginButton", "Login", true)
//!     .with_element("#dialogBox", "", true)
//!     .with_element("#errorText", "", true)
//!     .with_click_effect("#loginButton", ClickEffect {
//!         hide: vec!["#dialogBox".to_string()],
//!         ..Default::default()
//!     });
//!
//! let mut runner = ScenarioRunner::new(driver, RunnerConfig::new());
//! let report = runner.run(&scenario).await?;
//! assert!(report.success());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

mod config;
mod driver;
#[cfg(feature = "media")]
mod media;
mod recorder;
mod reporter;
mod result;
mod runner;
mod scenario;
mod scripted;
mod wait;

pub use config::{Credentials, RunnerConfig, TimeoutPolicy};
pub use driver::{ElementHandle, PageDriver, Screenshot, TypeOptions};
#[cfg(feature = "media")]
pub use media::{GifConfig, GifSink};
pub use recorder::{Annotation, NullSink, RecordingSink};
pub use reporter::{AssertionOutcome, AssertionStatus, Reporter, ReportSummary};
pub use result::{GuionError, GuionResult};
pub use runner::{RunReport, RunState, ScenarioRunner, StepOutcome};
pub use scenario::{
    Predicate, PointerTarget, Scenario, ScenarioBuilder, ScenarioError, Step, SCENARIO_VERSION,
};
pub use scripted::{ClickEffect, ElementFixture, PageFixture, ScriptedDriver};
pub use wait::{
    wait_until_hidden, WaitOptions, WaitResult, DEFAULT_POLL_INTERVAL_MS, DEFAULT_WAIT_TIMEOUT_MS,
};
