use crate::config::{mask_secret, ProbeConfig};
use crate::Result;
use reqwest::Proxy;
use std::time::Instant;
use tracing::debug;
use url::Url;

/// Status code and unparsed body of a completed HTTP exchange.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub url: Url,
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as JSON, if it parses.
    pub fn json(&self) -> Option<serde_json::Value> {
        serde_json::from_str(&self.body).ok()
    }

    /// Pretty-printed JSON body, falling back to the raw text.
    pub fn pretty_body(&self) -> String {
        self.json()
            .and_then(|v| serde_json::to_string_pretty(&v).ok())
            .unwrap_or_else(|| self.body.clone())
    }
}

pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
    api_key: String,
}

impl HttpTransport {
    pub fn new(config: &ProbeConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("llm-probe/", env!("CARGO_PKG_VERSION")));

        if let Some(proxy_url) = &config.proxy_url {
            let proxy = Proxy::all(proxy_url.as_str()).map_err(|e| {
                crate::Error::configuration_field(format!("invalid proxy: {}", e), "proxy_url")
            })?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| crate::Error::Transport(TransportError::Other(e.to_string())))?;

        Ok(Self {
            client,
            base_url: config.base_url().clone(),
            api_key: config.api_key().to_string(),
        })
    }

    /// Resolve a relative endpoint path against the base URL.
    pub fn endpoint_url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| crate::Error::Transport(TransportError::Other(e.to_string())))
    }

    /// Headers attached to JSON requests. With `masked`, the key is redacted for display.
    pub fn headers(&self, masked: bool) -> Vec<(&'static str, String)> {
        let key = if masked {
            mask_secret(&self.api_key)
        } else {
            self.api_key.clone()
        };
        vec![
            ("Authorization", format!("Bearer {}", key)),
            ("Content-Type", "application/json".to_string()),
        ]
    }

    pub async fn get(&self, path: &str) -> Result<RawResponse> {
        let url = self.endpoint_url(path)?;
        let req = self.client.get(url.clone()).bearer_auth(&self.api_key);
        Self::send(url, "GET", req).await
    }

    pub async fn post_json(&self, path: &str, body: &serde_json::Value) -> Result<RawResponse> {
        let url = self.endpoint_url(path)?;
        let mut req = self.client.post(url.clone());
        for (name, value) in self.headers(false) {
            req = req.header(name, value);
        }
        let req = req.body(serde_json::to_vec(body)?);
        Self::send(url, "POST", req).await
    }

    async fn send(url: Url, method: &str, req: reqwest::RequestBuilder) -> Result<RawResponse> {
        let start = Instant::now();
        debug!(method, url = %url, "sending request");

        let resp = req
            .send()
            .await
            .map_err(|e| crate::Error::Transport(TransportError::Http(e)))?;
        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| crate::Error::Transport(TransportError::Http(e)))?;

        debug!(
            method,
            url = %url,
            status,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "response received"
        );
        Ok(RawResponse { url, status, body })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    Other(String),
}
