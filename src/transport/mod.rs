//! HTTP transport: URL joining, bearer auth and raw request execution.

mod http;

pub use http::{HttpTransport, RawResponse, TransportError};
