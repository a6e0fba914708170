//! 探测配置：凭据、基础 URL 与默认参数。
//!
//! Probe configuration: credentials, base URL and probe defaults.
//!
//! Values are layered: built-in defaults, then an optional YAML file, then
//! environment variables, then explicit overrides (CLI flags). The resulting
//! [`ProbeConfig`] is immutable and passed by reference to everything that
//! talks to the remote service.

use crate::{Error, Result};
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Gemini's OpenAI-compatible surface.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai/";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_PROMPT: &str = "Explain how AI works in a few words";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_REPLY_CHARS: usize = 100;

/// Namespace some services put in front of model identifiers.
pub const MODEL_NAMESPACE: &str = "models/";

const KEYRING_SERVICE: &str = "llm-probe";
const KEYRING_USER: &str = "api-key";

/// Immutable configuration shared by the client and all probes.
#[derive(Clone)]
pub struct ProbeConfig {
    api_key: String,
    base_url: Url,
    pub model: String,
    pub prompt: String,
    /// Explicit sweep list. Empty means "derive from `model`".
    pub candidates: Vec<String>,
    pub timeout: Duration,
    pub proxy_url: Option<String>,
    pub max_reply_chars: usize,
}

impl ProbeConfig {
    /// Config with defaults for everything but the credentials.
    pub fn new(api_key: impl Into<String>, base_url: &str) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(Error::configuration_field(
                "API key must not be empty",
                "api_key",
            ));
        }
        Ok(Self {
            api_key,
            base_url: normalize_base_url(base_url)?,
            model: DEFAULT_MODEL.to_string(),
            prompt: DEFAULT_PROMPT.to_string(),
            candidates: Vec::new(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            proxy_url: None,
            max_reply_chars: DEFAULT_MAX_REPLY_CHARS,
        })
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Base URL, always ending with `/`.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Model names the sweep iterates over.
    pub fn sweep_candidates(&self) -> Vec<String> {
        if self.candidates.is_empty() {
            model_name_variants(&self.model)
        } else {
            self.candidates.clone()
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    pub fn with_candidates(mut self, candidates: Vec<String>) -> Self {
        self.candidates = candidates;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl fmt::Debug for ProbeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProbeConfig")
            .field("api_key", &mask_secret(&self.api_key))
            .field("base_url", &self.base_url.as_str())
            .field("model", &self.model)
            .field("prompt", &self.prompt)
            .field("candidates", &self.candidates)
            .field("timeout", &self.timeout)
            .field("proxy_url", &self.proxy_url)
            .field("max_reply_chars", &self.max_reply_chars)
            .finish()
    }
}

/// Parse and normalize a base URL so relative joins keep its path.
///
/// `https://host/v1` and `https://host/v1/` both become `https://host/v1/`.
pub fn normalize_base_url(raw: &str) -> Result<Url> {
    let raw = raw.trim();
    let mut url = Url::parse(raw).map_err(|e| {
        Error::configuration_field(format!("invalid base URL '{}': {}", raw, e), "base_url")
    })?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(Error::configuration_field(
            format!("unsupported scheme '{}'", url.scheme()),
            "base_url",
        ));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// The bare and the `models/`-prefixed spelling of a model name.
pub fn model_name_variants(model: &str) -> Vec<String> {
    let bare = model.strip_prefix(MODEL_NAMESPACE).unwrap_or(model);
    vec![bare.to_string(), format!("{}{}", MODEL_NAMESPACE, bare)]
}

/// Keep only the last four characters of a secret visible.
pub fn mask_secret(secret: &str) -> String {
    let count = secret.chars().count();
    if count <= 4 {
        return "****".to_string();
    }
    let tail: String = secret.chars().skip(count - 4).collect();
    format!("****{}", tail)
}

/// On-disk YAML layout. Every field is optional.
#[derive(Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub prompt: Option<String>,
    pub candidates: Option<Vec<String>>,
    pub timeout_secs: Option<u64>,
    pub proxy_url: Option<String>,
    pub max_reply_chars: Option<usize>,
}

impl ConfigFile {
    pub fn from_yaml(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&text)
    }
}

/// Layered builder for [`ProbeConfig`].
///
/// An unparsable environment value is held back and returned by [`build`](Self::build).
#[derive(Default)]
pub struct ProbeConfigBuilder {
    layer: ConfigFile,
    invalid: Option<Error>,
}

impl ProbeConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overlay values from a parsed config file.
    pub fn merge_file(mut self, file: ConfigFile) -> Self {
        let l = &mut self.layer;
        overlay(&mut l.api_key, file.api_key);
        overlay(&mut l.base_url, file.base_url);
        overlay(&mut l.model, file.model);
        overlay(&mut l.prompt, file.prompt);
        overlay(&mut l.candidates, file.candidates);
        overlay(&mut l.timeout_secs, file.timeout_secs);
        overlay(&mut l.proxy_url, file.proxy_url);
        overlay(&mut l.max_reply_chars, file.max_reply_chars);
        self
    }

    /// Overlay values from the process environment.
    pub fn merge_env(self) -> Self {
        self.merge_env_with(|k| std::env::var(k).ok())
    }

    /// Overlay values from an arbitrary variable lookup.
    pub fn merge_env_with<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |k: &str| lookup(k).filter(|v| !v.trim().is_empty());
        let timeout_secs = match get("LLM_PROBE_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) => Some(secs),
                Err(_) => {
                    self.invalid.get_or_insert_with(|| {
                        Error::configuration_field(
                            format!("LLM_PROBE_TIMEOUT_SECS is not a number of seconds: {raw:?}"),
                            "timeout_secs",
                        )
                    });
                    None
                }
            },
            None => None,
        };
        let file = ConfigFile {
            api_key: get("LLM_PROBE_API_KEY").or_else(|| get("GEMINI_API_KEY")),
            base_url: get("LLM_PROBE_BASE_URL"),
            model: get("LLM_PROBE_MODEL"),
            prompt: None,
            candidates: None,
            timeout_secs,
            proxy_url: get("LLM_PROBE_PROXY_URL"),
            max_reply_chars: None,
        };
        self.merge_file(file)
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.layer.api_key = Some(key.into());
        self
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.layer.base_url = Some(url.into());
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.layer.model = Some(model.into());
        self
    }

    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.layer.prompt = Some(prompt.into());
        self
    }

    pub fn candidates(mut self, candidates: Vec<String>) -> Self {
        self.layer.candidates = Some(candidates);
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.layer.timeout_secs = Some(secs);
        self
    }

    /// Fill a missing key from the OS keyring, if an entry exists.
    pub fn keyring_fallback(mut self) -> Self {
        if self.layer.api_key.is_none() {
            if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, KEYRING_USER) {
                if let Ok(key) = entry.get_password() {
                    tracing::debug!("api key loaded from keyring");
                    self.layer.api_key = Some(key);
                }
            }
        }
        self
    }

    pub fn build(self) -> Result<ProbeConfig> {
        if let Some(err) = self.invalid {
            return Err(err);
        }
        let l = self.layer;
        let api_key = l.api_key.ok_or_else(|| {
            Error::configuration_field(
                "no API key; set LLM_PROBE_API_KEY, pass --api-key, or add api_key to the config file",
                "api_key",
            )
        })?;
        let base_url = l.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        let mut cfg = ProbeConfig::new(api_key, base_url)?;
        if let Some(model) = l.model {
            cfg.model = model;
        }
        if let Some(prompt) = l.prompt {
            cfg.prompt = prompt;
        }
        if let Some(candidates) = l.candidates {
            cfg.candidates = candidates;
        }
        if let Some(secs) = l.timeout_secs {
            if secs == 0 {
                return Err(Error::configuration_field(
                    "timeout must be at least 1 second",
                    "timeout_secs",
                ));
            }
            cfg.timeout = Duration::from_secs(secs);
        }
        cfg.proxy_url = l.proxy_url;
        if let Some(n) = l.max_reply_chars {
            cfg.max_reply_chars = n;
        }
        Ok(cfg)
    }
}

fn overlay<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}
