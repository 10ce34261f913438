//! Runner configuration.
//!
//! Everything a run depends on is passed explicitly at construction; there
//! is no global setup module. Loadable from YAML for CLI use.

use crate::wait::{WaitOptions, DEFAULT_POLL_INTERVAL_MS, DEFAULT_WAIT_TIMEOUT_MS};
use serde::{Deserialize, Serialize};

/// Login credentials for the application under test.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Username
    pub username: String,
    /// Password
    pub password: String,
}

impl Credentials {
    /// Create credentials.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// What to do when a checkpoint wait times out.
///
/// The historical behavior was to continue silently, which can mask real
/// defects; aborting is therefore the default, and `Continue` is opt-in
/// for legacy suites.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeoutPolicy {
    /// Record the timeout and abort the scenario; the checkpoint's nested
    /// assertions are reported as skipped
    #[default]
    Fatal,
    /// Record the timeout and continue best-effort, still evaluating the
    /// nested assertions
    Continue,
}

/// Configuration passed to the runner at construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Base URL of the application under test
    #[serde(default)]
    pub base_url: Option<String>,
    /// Credentials, if the scenario needs them
    #[serde(default)]
    pub credentials: Option<Credentials>,
    /// Checkpoint timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub checkpoint_timeout_ms: u64,
    /// Checkpoint polling interval in milliseconds
    #[serde(default = "default_poll_ms")]
    pub poll_interval_ms: u64,
    /// Checkpoint timeout policy
    #[serde(default)]
    pub timeout_policy: TimeoutPolicy,
    /// Capture a frame after every step when a recording sink is attached
    #[serde(default = "default_true")]
    pub capture_frames: bool,
}

fn default_timeout_ms() -> u64 {
    DEFAULT_WAIT_TIMEOUT_MS
}

fn default_poll_ms() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}

fn default_true() -> bool {
    true
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            credentials: None,
            checkpoint_timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            timeout_policy: TimeoutPolicy::default(),
            capture_frames: true,
        }
    }
}

impl RunnerConfig {
    /// Create a configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL the runner navigates to before the first step.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set credentials.
    #[must_use]
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set the checkpoint timeout in milliseconds.
    #[must_use]
    pub const fn with_checkpoint_timeout(mut self, timeout_ms: u64) -> Self {
        self.checkpoint_timeout_ms = timeout_ms;
        self
    }

    /// Set the checkpoint polling interval in milliseconds.
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    /// Set the timeout policy.
    #[must_use]
    pub const fn with_timeout_policy(mut self, policy: TimeoutPolicy) -> Self {
        self.timeout_policy = policy;
        self
    }

    /// Disable per-step frame capture.
    #[must_use]
    pub const fn without_frame_capture(mut self) -> Self {
        self.capture_frames = false;
        self
    }

    /// Wait options for checkpoint steps.
    #[must_use]
    pub const fn wait_options(&self) -> WaitOptions {
        WaitOptions {
            timeout_ms: self.checkpoint_timeout_ms,
            poll_interval_ms: self.poll_interval_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RunnerConfig::default();
        assert!(config.base_url.is_none());
        assert!(config.credentials.is_none());
        assert_eq!(config.checkpoint_timeout_ms, DEFAULT_WAIT_TIMEOUT_MS);
        assert_eq!(config.timeout_policy, TimeoutPolicy::Fatal);
        assert!(config.capture_frames);
    }

    #[test]
    fn test_builder() {
        let config = RunnerConfig::new()
            .with_base_url("http://localhost:8082/structr/")
            .with_credentials(Credentials::new("admin", "admin"))
            .with_checkpoint_timeout(2_000)
            .with_poll_interval(20)
            .with_timeout_policy(TimeoutPolicy::Continue)
            .without_frame_capture();

        assert_eq!(
            config.base_url.as_deref(),
            Some("http://localhost:8082/structr/")
        );
        assert_eq!(config.credentials.as_ref().unwrap().username, "admin");
        assert_eq!(config.wait_options().timeout_ms, 2_000);
        assert_eq!(config.wait_options().poll_interval_ms, 20);
        assert_eq!(config.timeout_policy, TimeoutPolicy::Continue);
        assert!(!config.capture_frames);
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: RunnerConfig = serde_yaml_ng::from_str(
            r#"
base_url: "http://localhost:8082"
timeout_policy: continue
"#,
        )
        .unwrap();
        assert_eq!(config.timeout_policy, TimeoutPolicy::Continue);
        assert_eq!(config.poll_interval_ms, DEFAULT_POLL_INTERVAL_MS);
        assert!(config.capture_frames);
    }
}
