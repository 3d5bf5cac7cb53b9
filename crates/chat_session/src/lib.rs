//! Chat session orchestration for the agent-runner service.
//!
//! A [`SessionContext`] is created once per client lifetime and owned by a
//! [`ChatApp`]. The app drives the session through
//! `Uninitialized -> Initializing -> Ready | Failed` and, while `Ready`,
//! performs one blocking run round trip per submitted message.
//!
//! Transport is reached only through [`RunnerBackend`]. [`HttpRunnerBackend`]
//! adapts the async `agent_runner_api` client onto that synchronous seam;
//! tests substitute scripted backends.
//!
//! Rendering belongs to the caller via [`ChatSurface`]. Every failure path
//! reports through it, so nothing is dropped silently.

pub mod app;
pub mod backend;
pub mod commands;
pub mod session;
pub mod transcript;

pub use app::{ChatApp, ChatSurface, SubmitOutcome};
pub use backend::{BackendError, HttpRunnerBackend, RunnerBackend};
pub use session::{SessionContext, SessionState, DEFAULT_USER_ID};
pub use transcript::{Message, Role};
