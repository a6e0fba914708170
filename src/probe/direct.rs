use crate::client::CHAT_COMPLETIONS_PATH;
use crate::types::ChatRequest;
use crate::Result;
use std::io::Write;
use std::time::Instant;
use tracing::{info, warn};

use super::{elapsed_ms, ProbeOutcome, Prober};

const NAME: &str = "direct_http";

impl Prober<'_> {
    /// Hand-built POST to `{base}/chat/completions`, bypassing the client.
    ///
    /// Prints the request (key masked) before sending, then the status and
    /// the full response body. A non-2xx status is printed, not raised.
    pub async fn direct<W: Write>(&self, out: &mut W) -> Result<ProbeOutcome> {
        let start = Instant::now();
        let transport = self.client.transport();

        let url = match transport.endpoint_url(CHAT_COMPLETIONS_PATH) {
            Ok(url) => url,
            Err(e) => {
                writeln!(out, "Error: {}", e)?;
                return Ok(ProbeOutcome::failed(
                    NAME,
                    CHAT_COMPLETIONS_PATH,
                    elapsed_ms(start),
                    e.to_string(),
                ));
            }
        };
        let target = url.to_string();

        let payload = ChatRequest::single_user(&self.config.model, &self.config.prompt);
        let body = match serde_json::to_value(&payload) {
            Ok(v) => v,
            Err(e) => {
                writeln!(out, "Error: {}", e)?;
                return Ok(ProbeOutcome::failed(NAME, target, elapsed_ms(start), e.to_string()));
            }
        };

        writeln!(out, "URL: {}", url)?;
        writeln!(out, "Headers:")?;
        for (name, value) in transport.headers(true) {
            writeln!(out, "  {}: {}", name, value)?;
        }
        writeln!(
            out,
            "Body:\n{}",
            serde_json::to_string_pretty(&body).unwrap_or_else(|_| body.to_string())
        )?;

        match transport.post_json(CHAT_COMPLETIONS_PATH, &body).await {
            Ok(resp) => {
                writeln!(out, "Status: {}", resp.status)?;
                writeln!(out, "Response:\n{}", resp.pretty_body())?;
                info!(probe = NAME, status = resp.status, "direct probe answered");
                if resp.is_success() {
                    Ok(ProbeOutcome::ok(NAME, target, elapsed_ms(start)))
                } else {
                    Ok(ProbeOutcome::failed(
                        NAME,
                        target,
                        elapsed_ms(start),
                        format!("HTTP {}", resp.status),
                    ))
                }
            }
            Err(e) => {
                warn!(probe = NAME, error = %e, "probe failed");
                writeln!(out, "Error: {}", e)?;
                Ok(ProbeOutcome::failed(NAME, target, elapsed_ms(start), e.to_string()))
            }
        }
    }
}
