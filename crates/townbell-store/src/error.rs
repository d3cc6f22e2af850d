use thiserror::Error;

/// Errors raised by a record-store backend.
///
/// "Record does not exist" is not an error — point lookups return
/// `Option::None` for that case so callers can treat absence as a normal
/// state.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The HTTP request itself failed (connect, TLS, timeout, body read).
    #[error("Store request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The store answered with a non-success status other than 404.
    #[error("Store API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// The response body could not be decoded into the expected shape.
    #[error("Store response parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;
