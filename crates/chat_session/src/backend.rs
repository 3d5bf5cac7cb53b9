use agent_runner_api::{AgentRunnerClient, RunReply, RunnerApiConfig, RunnerApiError};
use thiserror::Error;
use tokio::runtime::Runtime;

/// Failure of one backend call, already rendered for display.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct BackendError {
    message: String,
}

impl BackendError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<RunnerApiError> for BackendError {
    fn from(error: RunnerApiError) -> Self {
        Self::new(error.to_string())
    }
}

/// Synchronous seam between the chat state machine and the runner service.
pub trait RunnerBackend {
    fn initialize_session(&self, user_id: &str, session_id: &str) -> Result<(), BackendError>;

    /// `Ok` carries either extracted text or [`RunReply::Unparsable`];
    /// `Err` means the round trip itself failed.
    fn call_agent_run(
        &self,
        user_id: &str,
        session_id: &str,
        prompt: &str,
    ) -> Result<RunReply, BackendError>;
}

impl<T: RunnerBackend + ?Sized> RunnerBackend for &T {
    fn initialize_session(&self, user_id: &str, session_id: &str) -> Result<(), BackendError> {
        (**self).initialize_session(user_id, session_id)
    }

    fn call_agent_run(
        &self,
        user_id: &str,
        session_id: &str,
        prompt: &str,
    ) -> Result<RunReply, BackendError> {
        (**self).call_agent_run(user_id, session_id, prompt)
    }
}

/// [`RunnerBackend`] over the async HTTP client, driven by a private
/// current-thread runtime.
#[derive(Debug)]
pub struct HttpRunnerBackend {
    client: AgentRunnerClient,
    runtime: Runtime,
}

impl HttpRunnerBackend {
    pub fn new(config: RunnerApiConfig) -> Result<Self, BackendError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|error| {
                BackendError::from(RunnerApiError::Runtime(format!(
                    "failed to initialize tokio runtime: {error}"
                )))
            })?;
        let client = AgentRunnerClient::new(config)?;
        Ok(Self { client, runtime })
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }
}

impl RunnerBackend for HttpRunnerBackend {
    fn initialize_session(&self, user_id: &str, session_id: &str) -> Result<(), BackendError> {
        self.runtime
            .block_on(self.client.create_session(user_id, session_id))
            .map_err(|error| {
                tracing::error!(%error, "session initialization failed");
                BackendError::from(error)
            })
    }

    fn call_agent_run(
        &self,
        user_id: &str,
        session_id: &str,
        prompt: &str,
    ) -> Result<RunReply, BackendError> {
        self.runtime
            .block_on(self.client.run(user_id, session_id, prompt))
            .map(|result| result.reply)
            .map_err(|error| {
                tracing::error!(%error, "run call failed");
                BackendError::from(error)
            })
    }
}
