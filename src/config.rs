//! Environment configuration.

use std::env;

use agent_runner_api::url::DEFAULT_RUNNER_HOST;
use chat_session::DEFAULT_USER_ID;

pub const HOST_ENV_VAR: &str = "MERAKI_LLM_HOST";
pub const USER_ID_ENV_VAR: &str = "MERAKI_CHAT_USER_ID";
pub const LOG_FILE_ENV_VAR: &str = "MERAKI_CHAT_LOG";
pub const DEFAULT_COLUMNS: usize = 80;
const MIN_COLUMNS: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvConfig {
    pub runner_host: String,
    pub user_id: String,
    pub log_file: Option<String>,
    pub no_color: bool,
    pub columns: usize,
}

impl EnvConfig {
    pub fn from_env() -> Self {
        Self {
            runner_host: env_string_opt(HOST_ENV_VAR)
                .unwrap_or_else(|| DEFAULT_RUNNER_HOST.to_string()),
            user_id: env_string_opt(USER_ID_ENV_VAR).unwrap_or_else(|| DEFAULT_USER_ID.to_string()),
            log_file: env_string_opt(LOG_FILE_ENV_VAR),
            no_color: env_string_opt("NO_COLOR").is_some(),
            columns: env_string_opt("COLUMNS")
                .and_then(|value| value.trim().parse::<usize>().ok())
                .filter(|columns| *columns >= MIN_COLUMNS)
                .unwrap_or(DEFAULT_COLUMNS),
        }
    }
}

fn env_string_opt(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|value| {
        if value.trim().is_empty() {
            None
        } else {
            Some(value.trim().to_string())
        }
    })
}
