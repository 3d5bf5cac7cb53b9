use crate::backend::RunnerBackend;
use crate::commands::{parse_slash_command, SlashCommand};
use crate::session::{SessionContext, SessionState};
use crate::transcript::Message;

/// Rendering side of the chat loop.
pub trait ChatSurface {
    fn show_message(&mut self, message: &Message);
    fn show_error(&mut self, error: &str);
    /// Called before a blocking backend call; paired with [`ChatSurface::end_wait`].
    fn begin_wait(&mut self, label: &str);
    fn end_wait(&mut self);
    /// Drop whatever transcript the surface is currently displaying.
    fn clear(&mut self) {}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank input.
    Ignored,
    /// Handled locally by a slash command.
    Command,
    /// Assistant message appended. `extracted` is false for the fallback text.
    Replied { extracted: bool },
    /// Run call failed; the round trip was dropped and an error shown.
    Abandoned,
    /// Session is not `Ready`.
    Rejected,
    Quit,
}

pub const HELP_TEXT: &str = "Commands: /help, /clear, /quit";
pub const TRANSCRIPT_CLEARED: &str = "Transcript cleared";
pub const WAITING_FOR_AGENT: &str = "Waiting for agent...";
pub const STARTING_SESSION: &str = "Starting agent session...";
pub const CRITICAL_INIT_ERROR: &str =
    "Critical Error: Could not initialize agent session. Chat functionality disabled.";
const ERROR_NOT_INITIALIZED: &str = "Agent session is not initialized yet.";

pub struct ChatApp<B> {
    session: SessionContext,
    backend: B,
}

impl<B: RunnerBackend> ChatApp<B> {
    pub fn new(backend: B, session: SessionContext) -> Self {
        Self { session, backend }
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn into_session(self) -> SessionContext {
        self.session
    }

    /// Runs session initialization once. Returns whether the session is `Ready`.
    ///
    /// A failure moves the session to the terminal `Failed` state; calling
    /// again afterwards does not retry.
    pub fn start(&mut self, surface: &mut dyn ChatSurface) -> bool {
        if self.session.state != SessionState::Uninitialized {
            return self.session.is_ready();
        }

        self.session.state = SessionState::Initializing;
        tracing::info!(
            user_id = self.session.user_id(),
            session_id = self.session.session_id(),
            "initializing agent session"
        );

        surface.begin_wait(STARTING_SESSION);
        let result = self
            .backend
            .initialize_session(self.session.user_id(), self.session.session_id());
        surface.end_wait();

        match result {
            Ok(()) => {
                self.session.state = SessionState::Ready;
                true
            }
            Err(error) => {
                surface.show_error(&format!("Failed to initialize agent session: {error}"));
                surface.show_error(CRITICAL_INIT_ERROR);
                self.session.state = SessionState::Failed {
                    reason: error.message().to_string(),
                };
                false
            }
        }
    }

    pub fn on_submit(&mut self, input: &str, surface: &mut dyn ChatSurface) -> SubmitOutcome {
        if input.trim().is_empty() {
            return SubmitOutcome::Ignored;
        }

        if let Some(command) = parse_slash_command(input) {
            return self.handle_slash_command(command, surface);
        }

        match self.session.state {
            SessionState::Ready => self.run_round_trip(input, surface),
            SessionState::Failed { .. } => {
                surface.show_error(CRITICAL_INIT_ERROR);
                SubmitOutcome::Rejected
            }
            SessionState::Uninitialized | SessionState::Initializing => {
                surface.show_error(ERROR_NOT_INITIALIZED);
                SubmitOutcome::Rejected
            }
        }
    }

    fn run_round_trip(&mut self, prompt: &str, surface: &mut dyn ChatSurface) -> SubmitOutcome {
        self.push_and_show(Message::user(prompt), surface);

        surface.begin_wait(WAITING_FOR_AGENT);
        let result = self.backend.call_agent_run(
            self.session.user_id(),
            self.session.session_id(),
            prompt,
        );
        surface.end_wait();

        match result {
            Ok(reply) => {
                let extracted = reply.is_extracted();
                self.push_and_show(Message::assistant(reply.into_display_text()), surface);
                SubmitOutcome::Replied { extracted }
            }
            Err(error) => {
                surface.show_error(&format!("Error contacting agent: {error}"));
                SubmitOutcome::Abandoned
            }
        }
    }

    fn handle_slash_command(
        &mut self,
        command: SlashCommand,
        surface: &mut dyn ChatSurface,
    ) -> SubmitOutcome {
        match command {
            SlashCommand::Help => {
                self.push_and_show(Message::system(HELP_TEXT), surface);
                SubmitOutcome::Command
            }
            SlashCommand::Clear => {
                self.session.transcript.clear();
                surface.clear();
                self.push_and_show(Message::system(TRANSCRIPT_CLEARED), surface);
                SubmitOutcome::Command
            }
            SlashCommand::Quit => SubmitOutcome::Quit,
            SlashCommand::Unknown(command) => {
                self.push_and_show(
                    Message::system(format!("Unknown command: {command}. {HELP_TEXT}")),
                    surface,
                );
                SubmitOutcome::Command
            }
        }
    }

    fn push_and_show(&mut self, message: Message, surface: &mut dyn ChatSurface) {
        surface.show_message(&message);
        self.session.transcript.push(message);
    }
}
