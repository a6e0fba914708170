use crate::Result;
use std::io::Write;
use std::time::Instant;
use tracing::warn;

use super::{elapsed_ms, truncate_reply, ProbeOutcome, Prober};

const NAME: &str = "chat";

impl Prober<'_> {
    /// One chat completion through the client; prints the truncated reply or the error.
    pub async fn client_chat<W: Write>(&self, model: &str, out: &mut W) -> Result<ProbeOutcome> {
        let start = Instant::now();
        match self.client.chat_text(model, &self.config.prompt).await {
            Ok(reply) => {
                writeln!(
                    out,
                    "[{}] {}",
                    model,
                    truncate_reply(&reply, self.config.max_reply_chars)
                )?;
                Ok(ProbeOutcome::ok(NAME, model, elapsed_ms(start)))
            }
            Err(e) => {
                warn!(probe = NAME, model, error = %e, "probe failed");
                writeln!(out, "[{}] Error: {}", model, e)?;
                Ok(ProbeOutcome::failed(NAME, model, elapsed_ms(start), e.to_string()))
            }
        }
    }

    /// Repeat [`Prober::client_chat`] for every sweep candidate.
    pub async fn sweep<W: Write>(&self, out: &mut W) -> Result<Vec<ProbeOutcome>> {
        let candidates = self.config.sweep_candidates();
        let mut outcomes = Vec::with_capacity(candidates.len());
        for model in &candidates {
            outcomes.push(self.client_chat(model, out).await?);
        }
        Ok(outcomes)
    }
}
