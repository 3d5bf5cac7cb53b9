use std::time::Duration;

use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, Response};

use crate::config::RunnerApiConfig;
use crate::error::{parse_error_message, RunnerApiError};
use crate::events::{decode_run_events, RunEvent, RunReply};
use crate::payload::{CreateSessionRequest, RunRequest};
use crate::url::{normalize_host_url, run_url, session_url};

#[derive(Debug)]
pub struct AgentRunnerClient {
    http: Client,
    config: RunnerApiConfig,
    base_url: String,
}

/// Decoded `/run` response plus the reply extracted from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResult {
    pub events: Vec<RunEvent>,
    pub reply: RunReply,
}

impl AgentRunnerClient {
    pub fn new(config: RunnerApiConfig) -> Result<Self, RunnerApiError> {
        let base_url = normalize_host_url(&config.host);
        run_url(&base_url)?;
        let http = Client::builder().build().map_err(RunnerApiError::Request)?;
        Ok(Self {
            http,
            config,
            base_url,
        })
    }

    pub fn config(&self) -> &RunnerApiConfig {
        &self.config
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_create_session(
        &self,
        user_id: &str,
        session_id: &str,
    ) -> Result<RequestBuilder, RunnerApiError> {
        require_non_empty("user_id", user_id)?;
        require_non_empty("session_id", session_id)?;

        let url = session_url(&self.base_url, &self.config.app_name, user_id, session_id)?;
        tracing::debug!(%url, "building session request");
        Ok(self
            .http
            .post(url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .timeout(self.config.session_timeout)
            .json(&CreateSessionRequest::default()))
    }

    pub fn build_run(&self, request: &RunRequest) -> Result<RequestBuilder, RunnerApiError> {
        require_non_empty("user_id", &request.user_id)?;
        require_non_empty("session_id", &request.session_id)?;
        let has_text = request
            .new_message
            .parts
            .iter()
            .any(|part| !part.text.is_empty());
        if !has_text {
            return Err(RunnerApiError::InvalidRequest(
                "prompt text must not be empty".to_string(),
            ));
        }

        let url = run_url(&self.base_url)?;
        tracing::debug!(%url, "building run request");
        Ok(self
            .http
            .post(url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .timeout(self.config.run_timeout)
            .json(request))
    }

    /// Create the server-side session. Any 2xx counts as success.
    pub async fn create_session(
        &self,
        user_id: &str,
        session_id: &str,
    ) -> Result<(), RunnerApiError> {
        let timeout = self.config.session_timeout;
        let response = self
            .build_create_session(user_id, session_id)?
            .send()
            .await
            .map_err(|error| RunnerApiError::from_reqwest(error, timeout))?;
        ensure_success(response, timeout).await?;

        tracing::info!(user_id, session_id, "agent session created");
        Ok(())
    }

    /// Send one user message and extract the reply from the returned events.
    pub async fn run(
        &self,
        user_id: &str,
        session_id: &str,
        prompt: &str,
    ) -> Result<RunResult, RunnerApiError> {
        let request = RunRequest::new(&self.config.app_name, user_id, session_id, prompt);
        let timeout = self.config.run_timeout;
        let response = self
            .build_run(&request)?
            .send()
            .await
            .map_err(|error| RunnerApiError::from_reqwest(error, timeout))?;
        let response = ensure_success(response, timeout).await?;
        let body = response
            .text()
            .await
            .map_err(|error| RunnerApiError::from_reqwest(error, timeout))?;

        let events = match decode_run_events(&body) {
            Some(events) => events,
            None => {
                tracing::warn!(
                    body_len = body.len(),
                    "run response is not a JSON event array"
                );
                Vec::new()
            }
        };
        let reply = RunReply::from_events(&events);
        if reply.is_extracted() {
            tracing::info!(events = events.len(), "run completed");
        } else {
            tracing::warn!(
                events = events.len(),
                "run completed without extractable model text"
            );
        }

        Ok(RunResult { events, reply })
    }
}

async fn ensure_success(response: Response, timeout: Duration) -> Result<Response, RunnerApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .map_err(|error| RunnerApiError::from_reqwest(error, timeout))?;
    Err(RunnerApiError::Status(
        status,
        parse_error_message(status, &body),
    ))
}

fn require_non_empty(field: &str, value: &str) -> Result<(), RunnerApiError> {
    if value.trim().is_empty() {
        return Err(RunnerApiError::InvalidRequest(format!(
            "{field} must not be empty"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> AgentRunnerClient {
        AgentRunnerClient::new(RunnerApiConfig::default()).expect("client")
    }

    #[test]
    fn create_session_rejects_empty_identifiers() {
        let error = client()
            .build_create_session("", "s-1")
            .expect_err("empty user id must be rejected");
        assert!(matches!(error, RunnerApiError::InvalidRequest(message) if message.contains("user_id")));
        assert!(!RunnerApiError::InvalidRequest(String::new()).is_transport());
    }

    #[test]
    fn run_rejects_empty_prompt() {
        let request = RunRequest::new("agent", "u", "s", "");
        let error = client()
            .build_run(&request)
            .expect_err("empty prompt must be rejected");
        assert!(matches!(error, RunnerApiError::InvalidRequest(_)));
    }

    #[test]
    fn run_request_carries_configured_timeout() {
        let request = RunRequest::new("agent", "u", "s", "hello");
        let built = client()
            .build_run(&request)
            .expect("builder")
            .build()
            .expect("request");
        assert_eq!(built.timeout(), Some(&Duration::from_secs(60)));
        assert_eq!(
            built.headers().get(CONTENT_TYPE).map(HeaderValue::as_bytes),
            Some(&b"application/json"[..])
        );
    }
}
