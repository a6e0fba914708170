use crate::types::{ChatCompletion, ChatRequest, Message};
use crate::{Error, Result};
use tracing::info;

use super::core::{ProbeClient, CHAT_COMPLETIONS_PATH};

impl ProbeClient {
    /// Create a chat completion. Single attempt, no retry.
    pub async fn chat(&self, model: &str, messages: Vec<Message>) -> Result<ChatCompletion> {
        let request = ChatRequest::new(model, messages);
        let body = serde_json::to_value(&request)?;
        let resp = Self::ensure_success(
            self.transport
                .post_json(CHAT_COMPLETIONS_PATH, &body)
                .await?,
        )?;
        let completion: ChatCompletion = serde_json::from_str(&resp.body)?;
        info!(
            model,
            choices = completion.choices.len(),
            "chat completion received"
        );
        Ok(completion)
    }

    /// Send one user prompt and return the reply text of the first choice.
    ///
    /// A 2xx body without a first choice carrying message content is an
    /// [`Error::InvalidResponse`].
    pub async fn chat_text(&self, model: &str, prompt: &str) -> Result<String> {
        let completion = self.chat(model, vec![Message::user(prompt)]).await?;
        completion.text().map(str::to_string).ok_or_else(|| {
            Error::InvalidResponse(if completion.choices.is_empty() {
                "no choices in completion".to_string()
            } else {
                "first choice has no message content".to_string()
            })
        })
    }
}
