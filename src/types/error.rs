use thiserror::Error;

/// copilot-metrics error types
#[derive(Error, Debug)]
pub enum MetricsError {
    /// Connection, TLS or timeout failure before a response arrived
    #[error("transport error: {0}")]
    Transport(String),

    /// Non-success HTTP status, carrying GitHub's error message
    #[error("api error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Response body did not match the metrics schema
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Missing or invalid configuration
    #[error("config error: {0}")]
    Config(String),

    /// File I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for copilot-metrics
pub type Result<T> = std::result::Result<T, MetricsError>;
