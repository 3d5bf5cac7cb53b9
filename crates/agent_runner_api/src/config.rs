use std::time::Duration;

use crate::url::DEFAULT_RUNNER_HOST;

/// App name the agent is registered under on the runner service.
pub const DEFAULT_APP_NAME: &str = "agent";
/// Bound for the session-creation call.
pub const DEFAULT_SESSION_TIMEOUT: Duration = Duration::from_secs(10);
/// Bound for one `/run` call.
pub const DEFAULT_RUN_TIMEOUT: Duration = Duration::from_secs(60);

/// Transport configuration for agent-runner requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerApiConfig {
    /// Host or base URL of the runner service. Bare hosts get `http://`.
    pub host: String,
    /// App name used in session paths and run payloads.
    pub app_name: String,
    pub session_timeout: Duration,
    pub run_timeout: Duration,
}

impl Default for RunnerApiConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_RUNNER_HOST.to_string(),
            app_name: DEFAULT_APP_NAME.to_string(),
            session_timeout: DEFAULT_SESSION_TIMEOUT,
            run_timeout: DEFAULT_RUN_TIMEOUT,
        }
    }
}

impl RunnerApiConfig {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Self::default()
        }
    }

    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = app_name.into();
        self
    }

    pub fn with_session_timeout(mut self, timeout: Duration) -> Self {
        self.session_timeout = timeout;
        self
    }

    pub fn with_run_timeout(mut self, timeout: Duration) -> Self {
        self.run_timeout = timeout;
        self
    }
}
