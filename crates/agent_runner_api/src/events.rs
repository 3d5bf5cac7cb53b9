use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Shown when a run succeeded but no model text could be extracted.
pub const FALLBACK_REPLY_TEXT: &str = "Received response, but couldn't extract text content";

const MODEL_ROLE: &str = "model";

/// One event from a `/run` response.
///
/// Every field is optional and decoded leniently: a field with an unexpected
/// JSON type is treated as absent rather than failing the whole response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunEvent {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub content: Option<EventContent>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventContent {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub parts: Option<Vec<EventPart>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPart {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl RunEvent {
    /// Text of the first part when this is a model turn with non-empty text.
    pub fn model_text(&self) -> Option<&str> {
        let content = self.content.as_ref()?;
        if content.role.as_deref() != Some(MODEL_ROLE) {
            return None;
        }
        content
            .parts
            .as_deref()?
            .first()?
            .text
            .as_deref()
            .filter(|text| !text.is_empty())
    }
}

/// Outcome of a successful `/run` round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunReply {
    Text(String),
    /// 2xx response with no extractable model text.
    Unparsable,
}

impl RunReply {
    pub fn from_events(events: &[RunEvent]) -> Self {
        match extract_reply_text(events) {
            Some(text) => Self::Text(text.to_string()),
            None => Self::Unparsable,
        }
    }

    /// Text to show in the transcript: the reply, or [`FALLBACK_REPLY_TEXT`].
    pub fn display_text(&self) -> &str {
        match self {
            Self::Text(text) => text,
            Self::Unparsable => FALLBACK_REPLY_TEXT,
        }
    }

    pub fn is_extracted(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    pub fn into_display_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Unparsable => FALLBACK_REPLY_TEXT.to_string(),
        }
    }
}

/// Scan from the last event backwards and return the first model text found.
pub fn extract_reply_text(events: &[RunEvent]) -> Option<&str> {
    events.iter().rev().find_map(RunEvent::model_text)
}

/// Decode a `/run` body. Returns `None` unless the body is a JSON array.
///
/// Array elements that are not objects decode as events without content.
pub fn decode_run_events(body: &str) -> Option<Vec<RunEvent>> {
    let Ok(Value::Array(items)) = serde_json::from_str::<Value>(body) else {
        return None;
    };

    Some(
        items
            .into_iter()
            .map(|item| match item {
                Value::Object(_) => serde_json::from_value(item).unwrap_or_default(),
                _ => RunEvent::default(),
            })
            .collect(),
    )
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}
