//! Chat-completion request/response and model-list payloads.

use super::message::Message;
use serde::{Deserialize, Serialize};

/// `{model, messages}` request body.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
}

impl ChatRequest {
    pub fn new(model: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            model: model.into(),
            messages,
        }
    }

    /// Single user message, the shape every probe sends.
    pub fn single_user(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self::new(model, vec![Message::user(prompt)])
    }
}

/// Response body of a successful completion. Only the fields the probes read
/// are required; the rest is tolerated when missing.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletion {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

impl ChatCompletion {
    /// Text of the first choice, if any.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub index: u32,
    pub message: ChoiceMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: Option<u64>,
    #[serde(default)]
    pub completion_tokens: Option<u64>,
    #[serde(default)]
    pub total_tokens: Option<u64>,
}

/// Model identifiers from a models-listing body, in the order given.
///
/// Reads the OpenAI shape (`data[].id`) and the Gemini-native shape
/// (`models[].name`). `None` when the body has neither array.
pub fn model_ids(body: &serde_json::Value) -> Option<Vec<String>> {
    let (items, field) = if let Some(data) = body.get("data").and_then(|v| v.as_array()) {
        (data, "id")
    } else if let Some(models) = body.get("models").and_then(|v| v.as_array()) {
        (models, "name")
    } else {
        return None;
    };

    Some(
        items
            .iter()
            .filter_map(|m| m.get(field).and_then(|v| v.as_str()).map(str::to_string))
            .collect(),
    )
}
