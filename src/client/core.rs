use crate::config::ProbeConfig;
use crate::transport::{HttpTransport, RawResponse};
use crate::Result;

use super::error_classification::remote_error;

/// Relative path of the models-listing endpoint.
pub const MODELS_PATH: &str = "models";
/// Relative path of the chat-completions endpoint.
pub const CHAT_COMPLETIONS_PATH: &str = "chat/completions";

/// Higher-level client for an OpenAI-compatible service.
///
/// Mirrors what a generic chat-completion SDK offers (list models, create a
/// completion) and turns non-2xx responses into [`crate::Error::Remote`].
pub struct ProbeClient {
    pub(crate) transport: HttpTransport,
}

impl ProbeClient {
    pub fn new(config: &ProbeConfig) -> Result<Self> {
        Ok(Self {
            transport: HttpTransport::new(config)?,
        })
    }

    pub fn transport(&self) -> &HttpTransport {
        &self.transport
    }

    pub(crate) fn ensure_success(resp: RawResponse) -> Result<RawResponse> {
        if resp.is_success() {
            Ok(resp)
        } else {
            Err(remote_error(&resp))
        }
    }
}
