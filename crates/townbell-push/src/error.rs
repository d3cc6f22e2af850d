use thiserror::Error;

/// Errors raised by a push-delivery transport.
///
/// These cover whole-call failures only. Individual tokens that the transport
/// rejects inside an accepted call are reported through
/// [`DispatchReport`](crate::types::DispatchReport), not through this type.
#[derive(Debug, Error)]
pub enum PushError {
    /// The HTTP request itself failed (connect, TLS, timeout, body read).
    #[error("Push request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The transport rejected the entire call.
    #[error("Push API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// The response body could not be decoded into the expected shape.
    #[error("Push response parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, PushError>;
