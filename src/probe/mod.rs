//! 探测操作：列出模型、直接 HTTP 探测、客户端探测与模型名扫描。
//!
//! # Probe Module
//!
//! One-shot diagnostics against a configured endpoint. Every probe writes a
//! human-readable transcript to the sink it is given and reports a
//! [`ProbeOutcome`]. Remote failures are caught where they happen, printed,
//! and recorded in the outcome; they never abort the run.
//!
//! The only error a probe returns is a failure to write to its sink.
//!
//! | Probe | Remote call |
//! |-------|-------------|
//! | [`Prober::list_models`] | `GET {base}/models` via [`ProbeClient`] |
//! | [`Prober::direct`] | hand-built `POST {base}/chat/completions` |
//! | [`Prober::client_chat`] | [`ProbeClient::chat`] with one prompt |
//! | [`Prober::sweep`] | `client_chat` over each model-name candidate |
//!
//! ## Example
//!
//! ```rust,no_run
//! use llm_probe::{ProbeConfig, Prober};
//!
//! #[tokio::main]
//! async fn main() -> llm_probe::Result<()> {
//!     let config = ProbeConfig::new("your-api-key", "https://example.test/v1/")?;
//!     let prober = Prober::new(&config)?;
//!     let report = prober.run_all(&mut std::io::stdout()).await?;
//!     println!("{} OK", report.ok_count());
//!     Ok(())
//! }
//! ```

mod chat;
mod direct;
mod models;
mod report;

pub use report::{ProbeOutcome, ProbeReport, ProbeStatus};

use crate::client::ProbeClient;
use crate::config::ProbeConfig;
use crate::Result;
use std::io::Write;

/// Continuation marker appended to truncated replies.
pub const CONTINUATION_MARKER: &str = "...";

/// Runs probes against one configured endpoint.
pub struct Prober<'a> {
    config: &'a ProbeConfig,
    client: ProbeClient,
}

impl<'a> Prober<'a> {
    pub fn new(config: &'a ProbeConfig) -> Result<Self> {
        Ok(Self {
            config,
            client: ProbeClient::new(config)?,
        })
    }

    /// Run every probe in order and finish with a summary table.
    pub async fn run_all<W: Write>(&self, out: &mut W) -> Result<ProbeReport> {
        let mut report = ProbeReport::default();

        writeln!(out, "=== List models ===")?;
        report.push(self.list_models(out).await?);

        writeln!(out, "\n=== Direct HTTP probe ===")?;
        report.push(self.direct(out).await?);

        writeln!(out, "\n=== Client probe ===")?;
        report.push(self.client_chat(&self.config.model, out).await?);

        writeln!(out, "\n=== Model-name sweep ===")?;
        report.extend(self.sweep(out).await?);

        writeln!(out)?;
        report.write_summary(out)?;
        Ok(report)
    }
}

/// First `max_chars` characters of `text`, plus [`CONTINUATION_MARKER`] if anything was cut.
pub fn truncate_reply(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}{}", &text[..byte_idx], CONTINUATION_MARKER),
        None => text.to_string(),
    }
}

fn elapsed_ms(start: std::time::Instant) -> u64 {
    start.elapsed().as_millis() as u64
}
