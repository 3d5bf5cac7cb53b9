//! Terminal chat client for the Meraki agent-runner service.
//!
//! The session state machine lives in `chat_session` and the HTTP transport
//! in `agent_runner_api`. This crate supplies the terminal side: environment
//! configuration, logging, markdown rendering and the input loop.

pub mod config;
pub mod loader;
pub mod logging;
pub mod render;
pub mod terminal;
pub mod theme;

pub use config::EnvConfig;
pub use render::{render_markdown, render_message, visible_width, wrap_text};
pub use terminal::{run_chat, ChatExit, TerminalOptions, TerminalSurface, PROMPT, TITLE};
pub use theme::Theme;
