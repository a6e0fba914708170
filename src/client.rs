//! Chat-completion client used by the probes.
//!
//! Keep the public surface small: list models, create a completion.
//! Implementation details are split into submodules under `src/client/`.

mod chat;
pub mod core;
mod endpoint;
mod error_classification;

pub use self::core::{ProbeClient, CHAT_COMPLETIONS_PATH, MODELS_PATH};
