use crate::client::MODELS_PATH;
use crate::Result;
use std::io::Write;
use std::time::Instant;
use tracing::warn;

use super::{elapsed_ms, ProbeOutcome, Prober};

impl Prober<'_> {
    /// Print every model identifier the service returns, one per line, in order.
    pub async fn list_models<W: Write>(&self, out: &mut W) -> Result<ProbeOutcome> {
        let target = self
            .client
            .transport()
            .endpoint_url(MODELS_PATH)
            .map(|u| u.to_string())
            .unwrap_or_else(|_| MODELS_PATH.to_string());
        let start = Instant::now();

        match self.client.list_models().await {
            Ok(models) => {
                for id in &models {
                    writeln!(out, "{}", id)?;
                }
                Ok(ProbeOutcome::ok("list_models", target, elapsed_ms(start)))
            }
            Err(e) => {
                warn!(probe = "list_models", error = %e, "probe failed");
                writeln!(out, "Error listing models: {}", e)?;
                Ok(ProbeOutcome::failed(
                    "list_models",
                    target,
                    elapsed_ms(start),
                    e.to_string(),
                ))
            }
        }
    }
}
