//! Transport-only client primitives for the agent-runner HTTP service.
//!
//! This crate owns URL building, request payloads, response decoding and the
//! reply-extraction rule for the two endpoints a chat client needs: session
//! creation and `/run`. It has no UI coupling and no retry policy; callers
//! decide how failures surface.
//!
//! A run reply is either extracted text or [`RunReply::Unparsable`]. The two
//! are kept apart from [`RunnerApiError`], which only covers transport-level
//! failure, so callers can tell the soft and hard failure paths apart.

pub mod client;
pub mod config;
pub mod error;
pub mod events;
pub mod payload;
pub mod url;

pub use client::{AgentRunnerClient, RunResult};
pub use config::RunnerApiConfig;
pub use error::RunnerApiError;
pub use events::{decode_run_events, extract_reply_text, RunEvent, RunReply, FALLBACK_REPLY_TEXT};
pub use payload::{CreateSessionRequest, NewMessage, RunRequest};
pub use url::normalize_host_url;
