//! Static declaration of the wedding planner agent.
//!
//! The agent-runner host loads this record to decide which model to call and
//! what instruction text to send. It exposes no tools. `agent-descriptor`
//! prints it as JSON for registration with the host.

use serde::{Deserialize, Serialize};

pub const MODEL_ENV_VAR: &str = "MODEL_NAME";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash-lite";
pub const AGENT_NAME: &str = "wedding_planner_agent";
pub const AGENT_DESCRIPTION: &str =
    "A simple wedding planner assistant that can answer general questions about weddings.";
pub const AGENT_INSTRUCTION: &str = "You are a helpful assistant for a wedding planning agency. Your job is to provide helpful, friendly information about wedding planning concepts and best practices.

Be polite, friendly, and provide clear and concise answers to user questions about weddings, venues, planning timelines, and other wedding-related topics.

Always maintain a positive, encouraging tone and offer practical advice based on industry standards.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentDescriptor {
    pub name: String,
    pub model: String,
    pub description: String,
    pub instruction: String,
    pub tools: Vec<ToolDeclaration>,
}

/// A callable capability offered to the model. The wedding planner declares none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDeclaration {
    pub name: String,
    pub description: String,
}

impl AgentDescriptor {
    /// The wedding planner agent with its model resolved from `MODEL_NAME`.
    pub fn from_env() -> Self {
        Self::with_model(std::env::var(MODEL_ENV_VAR).ok())
    }

    /// The wedding planner agent; a blank or missing model uses [`DEFAULT_MODEL`].
    pub fn with_model(model: Option<String>) -> Self {
        let model = model
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        Self {
            name: AGENT_NAME.to_string(),
            model,
            description: AGENT_DESCRIPTION.to_string(),
            instruction: AGENT_INSTRUCTION.to_string(),
            tools: Vec::new(),
        }
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
