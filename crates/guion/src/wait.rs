//! Checkpoint wait mechanism.
//!
//! A checkpoint blocks the runner until a transient element (a login dialog,
//! a spinner) is no longer visible, polling the driver at a fixed interval
//! until a timeout elapses.

use crate::driver::PageDriver;
use crate::result::GuionResult;
use std::time::{Duration, Instant};

/// Default timeout for checkpoint waits (10 seconds)
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 10_000;

/// Default polling interval (50ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

/// Options for a checkpoint wait.
#[derive(Debug, Clone, Copy)]
pub struct WaitOptions {
    /// Timeout in milliseconds
    pub timeout_ms: u64,
    /// Polling interval in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl WaitOptions {
    /// Create options with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the timeout in milliseconds.
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set the polling interval in milliseconds.
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    /// Timeout as a `Duration`.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Poll interval as a `Duration`.
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Outcome of a checkpoint wait.
#[derive(Debug, Clone)]
pub struct WaitResult {
    /// Whether the condition was met before the timeout
    pub success: bool,
    /// Time spent waiting
    pub elapsed: Duration,
    /// Description of the awaited condition
    pub waited_for: String,
}

impl WaitResult {
    /// Successful wait.
    #[must_use]
    pub fn success(elapsed: Duration, waited_for: impl Into<String>) -> Self {
        Self {
            success: true,
            elapsed,
            waited_for: waited_for.into(),
        }
    }

    /// Timed-out wait.
    #[must_use]
    pub fn timeout(elapsed: Duration, waited_for: impl Into<String>) -> Self {
        Self {
            success: false,
            elapsed,
            waited_for: waited_for.into(),
        }
    }
}

/// Poll until the element is hidden (or absent), or the timeout elapses.
///
/// Driver faults propagate; a timeout is reported in the `WaitResult`, not
/// as an error, so the caller decides whether it is fatal.
pub async fn wait_until_hidden<D: PageDriver + ?Sized>(
    driver: &mut D,
    selector: &str,
    options: &WaitOptions,
) -> GuionResult<WaitResult> {
    let waited_for = format!("{selector} hidden");
    let start = Instant::now();
    let deadline = start + options.timeout();

    loop {
        if !driver.is_visible(selector).await? {
            return Ok(WaitResult::success(start.elapsed(), waited_for));
        }
        if Instant::now() >= deadline {
            return Ok(WaitResult::timeout(start.elapsed(), waited_for));
        }
        tokio::time::sleep(options.poll_interval()).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scripted::{ClickEffect, ScriptedDriver};

    #[test]
    fn test_options_builder() {
        let options = WaitOptions::new()
            .with_timeout(2_000)
            .with_poll_interval(10);
        assert_eq!(options.timeout(), Duration::from_millis(2_000));
        assert_eq!(options.poll_interval(), Duration::from_millis(10));
    }

    #[test]
    fn test_options_defaults() {
        let options = WaitOptions::default();
        assert_eq!(options.timeout_ms, DEFAULT_WAIT_TIMEOUT_MS);
        assert_eq!(options.poll_interval_ms, DEFAULT_POLL_INTERVAL_MS);
    }

    #[tokio::test]
    async fn test_already_hidden_returns_immediately() {
        let mut driver = ScriptedDriver::new().with_element("#dialogBox", "", false);
        let result = wait_until_hidden(&mut driver, "#dialogBox", &WaitOptions::default())
            .await
            .unwrap();
        assert!(result.success);
        assert!(result.elapsed < Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_absent_element_counts_as_hidden() {
        let mut driver = ScriptedDriver::new();
        let result = wait_until_hidden(&mut driver, "#ghost", &WaitOptions::default())
            .await
            .unwrap();
        assert!(result.success);
    }

    #[tokio::test]
    async fn test_polls_until_delayed_hide() {
        let mut driver = ScriptedDriver::new()
            .with_element("#loginButton", "Login", true)
            .with_element("#dialogBox", "", true)
            .with_click_effect(
                "#loginButton",
                ClickEffect {
                    hide: vec!["#dialogBox".to_string()],
                    delay_ms: 40,
                    ..Default::default()
                },
            );
        driver.click("#loginButton").await.unwrap();

        let options = WaitOptions::new().with_timeout(1_000).with_poll_interval(5);
        let result = wait_until_hidden(&mut driver, "#dialogBox", &options)
            .await
            .unwrap();
        assert!(result.success);
        assert!(result.elapsed >= Duration::from_millis(30));
        assert_eq!(result.waited_for, "#dialogBox hidden");
    }

    #[tokio::test]
    async fn test_timeout_is_reported_not_raised() {
        let mut driver = ScriptedDriver::new().with_element("#dialogBox", "", true);
        let options = WaitOptions::new().with_timeout(60).with_poll_interval(10);
        let result = wait_until_hidden(&mut driver, "#dialogBox", &options)
            .await
            .unwrap();
        assert!(!result.success);
        assert!(result.elapsed >= Duration::from_millis(60));
    }
}
