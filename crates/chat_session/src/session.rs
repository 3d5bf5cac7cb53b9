use crate::transcript::Message;

/// User id used when the deployment does not configure one.
pub const DEFAULT_USER_ID: &str = "chat_user";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    Initializing,
    Ready,
    /// Terminal. Initialization failed and no further input is accepted.
    Failed { reason: String },
}

/// Per-client conversation context.
///
/// The transcript is display-only; the runner service holds the
/// authoritative history for `(user_id, session_id)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    user_id: String,
    session_id: String,
    pub(crate) state: SessionState,
    pub(crate) transcript: Vec<Message>,
}

impl SessionContext {
    /// Creates a context with a freshly generated session id.
    pub fn new(user_id: impl Into<String>) -> Self {
        Self::with_ids(user_id, uuid::Uuid::new_v4().to_string())
    }

    pub fn with_ids(user_id: impl Into<String>, session_id: impl Into<String>) -> Self {
        let user_id = user_id.into();
        let user_id = if user_id.trim().is_empty() {
            DEFAULT_USER_ID.to_string()
        } else {
            user_id
        };

        Self {
            user_id,
            session_id: session_id.into(),
            state: SessionState::Uninitialized,
            transcript: Vec::new(),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == SessionState::Ready
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }
}
