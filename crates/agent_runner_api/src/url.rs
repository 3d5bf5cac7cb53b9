use url::Url;

use crate::error::RunnerApiError;

/// Default runner host used when no override is configured.
pub const DEFAULT_RUNNER_HOST: &str = "meraki-llm";

/// Normalize a configured host to a base URL without a trailing slash.
///
/// Normalization rules:
/// 1) blank input falls back to [`DEFAULT_RUNNER_HOST`]
/// 2) `http://` and `https://` bases are kept as given
/// 3) bare hosts get an `http://` scheme
pub fn normalize_host_url(input: &str) -> String {
    let host = if input.trim().is_empty() {
        DEFAULT_RUNNER_HOST
    } else {
        input.trim()
    };

    let trimmed = host.trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        return trimmed.to_string();
    }
    format!("http://{trimmed}")
}

/// `{base}/apps/{app}/users/{user}/sessions/{session}` with each segment percent-encoded.
pub fn session_url(
    base: &str,
    app_name: &str,
    user_id: &str,
    session_id: &str,
) -> Result<Url, RunnerApiError> {
    endpoint(
        base,
        &["apps", app_name, "users", user_id, "sessions", session_id],
    )
}

/// `{base}/run`.
pub fn run_url(base: &str) -> Result<Url, RunnerApiError> {
    endpoint(base, &["run"])
}

fn endpoint(base: &str, segments: &[&str]) -> Result<Url, RunnerApiError> {
    let normalized = normalize_host_url(base);
    let mut url = Url::parse(&normalized)
        .map_err(|error| RunnerApiError::InvalidBaseUrl(format!("{normalized}: {error}")))?;
    url.path_segments_mut()
        .map_err(|()| RunnerApiError::InvalidBaseUrl(format!("{normalized}: cannot be a base")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
