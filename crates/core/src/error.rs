//! Unified error types for sleuth.
//!
//! Every fallible pipeline step returns one of these instead of an ad hoc
//! error record, so front ends can match on the failure kind.

use rmcp::model::{ErrorCode, ErrorData as McpError};

/// Unified error types for the research pipeline.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid input parameters (e.g., empty query).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// URL could not be parsed or uses an unsupported scheme.
    #[error("INVALID_URL: {0}")]
    InvalidUrl(String),

    /// Request exceeded its timeout.
    #[error("FETCH_TIMEOUT: {0}")]
    FetchTimeout(String),

    /// Server answered with a non-success status.
    #[error("HTTP_ERROR: {0}")]
    HttpError(String),

    /// Connection, DNS or body read failure.
    #[error("NETWORK_ERROR: {0}")]
    Network(String),

    /// Page content could not be turned into an extraction.
    #[error("EXTRACT_FAILED: {0}")]
    ExtractFailed(String),

    /// Cache partition could not be read or written.
    #[error("CACHE_ERROR: {0}")]
    Cache(String),
}

impl Error {
    /// True for failures caused by the remote side or the network.
    pub fn is_network(&self) -> bool {
        matches!(self, Error::FetchTimeout(_) | Error::HttpError(_) | Error::Network(_))
    }
}

impl From<Error> for McpError {
    fn from(err: Error) -> Self {
        let (code, message) = match &err {
            Error::InvalidInput(msg) => (-32602, msg.clone()),
            Error::ExtractFailed(msg) => (-32000, msg.clone()),
            Error::Cache(msg) => (-32002, msg.clone()),
            Error::InvalidUrl(msg) => (-32003, msg.clone()),
            Error::FetchTimeout(msg) => (-32006, msg.clone()),
            Error::HttpError(msg) => (-32008, msg.clone()),
            Error::Network(msg) => (-32008, msg.clone()),
        };

        McpError { code: ErrorCode(code), message: message.into(), data: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::HttpError("status 503".to_string());
        assert!(err.to_string().contains("HTTP_ERROR"));
        assert!(err.to_string().contains("503"));
    }

    #[test]
    fn test_error_to_mcp_error() {
        let mcp_err: McpError = Error::InvalidUrl("ftp://x".to_string()).into();
        assert_eq!(mcp_err.code.0, -32003);

        let mcp_err: McpError = Error::InvalidInput("empty".to_string()).into();
        assert_eq!(mcp_err.code.0, -32602);
    }

    #[test]
    fn test_is_network() {
        assert!(Error::FetchTimeout("10s".into()).is_network());
        assert!(Error::Network("refused".into()).is_network());
        assert!(!Error::ExtractFailed("empty".into()).is_network());
    }
}
