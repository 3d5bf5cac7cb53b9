#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use agent_runner_api::RunReply;
use chat_session::{BackendError, ChatSurface, Message, RunnerBackend};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCall {
    Initialize {
        user_id: String,
        session_id: String,
    },
    Run {
        user_id: String,
        session_id: String,
        prompt: String,
    },
}

/// Backend that replays scripted outcomes and records every call.
#[derive(Default)]
pub struct ScriptedBackend {
    init: Mutex<Option<Result<(), BackendError>>>,
    runs: Mutex<VecDeque<Result<RunReply, BackendError>>>,
    calls: Mutex<Vec<BackendCall>>,
}

impl ScriptedBackend {
    pub fn ready() -> Self {
        Self::with_init(Ok(()))
    }

    pub fn with_init(init: Result<(), BackendError>) -> Self {
        Self {
            init: Mutex::new(Some(init)),
            ..Self::default()
        }
    }

    pub fn push_run(self, outcome: Result<RunReply, BackendError>) -> Self {
        lock_unpoisoned(&self.runs).push_back(outcome);
        self
    }

    pub fn calls(&self) -> Vec<BackendCall> {
        lock_unpoisoned(&self.calls).clone()
    }

    pub fn run_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, BackendCall::Run { .. }))
            .count()
    }
}

impl RunnerBackend for ScriptedBackend {
    fn initialize_session(&self, user_id: &str, session_id: &str) -> Result<(), BackendError> {
        lock_unpoisoned(&self.calls).push(BackendCall::Initialize {
            user_id: user_id.to_string(),
            session_id: session_id.to_string(),
        });
        lock_unpoisoned(&self.init)
            .take()
            .unwrap_or_else(|| panic!("session initialization must happen at most once"))
    }

    fn call_agent_run(
        &self,
        user_id: &str,
        session_id: &str,
        prompt: &str,
    ) -> Result<RunReply, BackendError> {
        lock_unpoisoned(&self.calls).push(BackendCall::Run {
            user_id: user_id.to_string(),
            session_id: session_id.to_string(),
            prompt: prompt.to_string(),
        });
        lock_unpoisoned(&self.runs)
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected run call for prompt {prompt:?}"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEvent {
    Message(Message),
    Error(String),
    WaitStarted(String),
    WaitEnded,
    Cleared,
}

#[derive(Default)]
pub struct SurfaceSpy {
    pub events: Vec<SurfaceEvent>,
}

impl SurfaceSpy {
    pub fn errors(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                SurfaceEvent::Error(error) => Some(error.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn messages(&self) -> Vec<&Message> {
        self.events
            .iter()
            .filter_map(|event| match event {
                SurfaceEvent::Message(message) => Some(message),
                _ => None,
            })
            .collect()
    }
}

impl ChatSurface for SurfaceSpy {
    fn show_message(&mut self, message: &Message) {
        self.events.push(SurfaceEvent::Message(message.clone()));
    }

    fn show_error(&mut self, error: &str) {
        self.events.push(SurfaceEvent::Error(error.to_string()));
    }

    fn begin_wait(&mut self, label: &str) {
        self.events.push(SurfaceEvent::WaitStarted(label.to_string()));
    }

    fn end_wait(&mut self) {
        self.events.push(SurfaceEvent::WaitEnded);
    }

    fn clear(&mut self) {
        self.events.push(SurfaceEvent::Cleared);
    }
}

pub fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
