//! Models listing

use crate::types::model_ids;
use crate::{Error, Result};
use tracing::info;

use super::core::{ProbeClient, MODELS_PATH};

impl ProbeClient {
    /// List model identifiers available to the configured key, in service order.
    pub async fn list_models(&self) -> Result<Vec<String>> {
        let resp = Self::ensure_success(self.transport.get(MODELS_PATH).await?)?;
        let body: serde_json::Value = serde_json::from_str(&resp.body)?;
        let models = model_ids(&body).ok_or_else(|| {
            Error::InvalidResponse("expected a `data` or `models` array".to_string())
        })?;
        info!(count = models.len(), "listed models");
        Ok(models)
    }
}
