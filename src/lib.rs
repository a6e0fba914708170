//! # llm-probe
//!
//! 面向 OpenAI 兼容聊天补全服务的连通性探测工具。
//!
//! Connectivity probe for generative-language services that speak the common
//! chat-completion JSON shape (Gemini's OpenAI-compatible endpoint by default).
//!
//! ## Overview
//!
//! A probe is a one-shot diagnostic call: list the models a key can see, send
//! a hand-built chat request and show exactly what went over the wire, then
//! send the same prompt through a small client under a few model-name
//! spellings. Results and failures are written as plain text; a failing call
//! never stops the ones after it.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use llm_probe::{ProbeConfigBuilder, Prober};
//!
//! #[tokio::main]
//! async fn main() -> llm_probe::Result<()> {
//!     let config = ProbeConfigBuilder::new().merge_env().build()?;
//!     let prober = Prober::new(&config)?;
//!     prober.list_models(&mut std::io::stdout()).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Credentials, base URL, defaults and layered loading |
//! | [`client`] | Chat-completion client (list models, create completion) |
//! | [`probe`] | The probes, the sequential runner and its report |
//! | [`transport`] | HTTP transport on top of reqwest |
//! | [`types`] | Request/response wire types |

pub mod client;
pub mod config;
pub mod probe;
pub mod transport;
pub mod types;

pub use client::ProbeClient;
pub use config::{ProbeConfig, ProbeConfigBuilder};
pub use probe::{truncate_reply, ProbeOutcome, ProbeReport, ProbeStatus, Prober};
pub use types::{ChatCompletion, ChatRequest, Message, MessageRole};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::Error;
