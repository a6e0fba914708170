use thiserror::Error;

/// Unified error type for the probe utility.
///
/// Every remote call site matches on this and prints its `Display` text, so the
/// transcript only ever shows "the call failed, here is why". The variants exist
/// so library callers can tell a bad key from a dead network.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}{}", format_field(.field))]
    Configuration {
        message: String,
        field: Option<String>,
    },

    #[error("Network transport error: {0}")]
    Transport(#[from] crate::transport::TransportError),

    #[error("Remote error: HTTP {status} ({class}): {message}")]
    Remote {
        status: u16,
        class: String,
        message: String,
    },

    /// A 2xx reply whose body lacks what the call needs (no choice content, unknown list shape).
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config file error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

fn format_field(field: &Option<String>) -> String {
    match field {
        Some(f) => format!(" (field: {})", f),
        None => String::new(),
    }
}

impl Error {
    /// Configuration error pinned to a specific key (e.g. `"base_url"`).
    pub fn configuration_field(msg: impl Into<String>, field: impl Into<String>) -> Self {
        Error::Configuration {
            message: msg.into(),
            field: Some(field.into()),
        }
    }

    /// HTTP status of a remote failure, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Error class label, e.g. `"authentication"` for a 401.
    pub fn class(&self) -> Option<&str> {
        match self {
            Error::Remote { class, .. } => Some(class.as_str()),
            _ => None,
        }
    }
}
