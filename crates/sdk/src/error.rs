//! SDK Error Types

use promarket_protocol::ErrorObject;
use thiserror::Error;

/// SDK Result type
pub type Result<T> = std::result::Result<T, ClientError>;

/// Failure of a single RPC call.
///
/// Every call resolves to exactly one of a result or one of these. The two
/// kinds that matter to callers are `Api` (the server executed the call and
/// answered with an error object) and `Transport` (the call never
/// meaningfully reached or returned from the server).
#[derive(Debug, Error)]
pub enum ClientError {
    /// Semantic error returned by the server (validation failure,
    /// unauthorized, hidden profile, ...).
    #[error("server error {0}")]
    Api(ErrorObject),

    /// Network failure, non-JSON body, or an envelope violating the
    /// result-xor-error contract.
    #[error("network error: {0}")]
    Transport(String),

    /// The endpoint URL could not be parsed.
    #[error("invalid endpoint URL: {0}")]
    InvalidEndpoint(String),

    /// Request parameters failed to encode. Indicates a caller bug.
    #[error("failed to encode request params: {0}")]
    Params(#[source] serde_json::Error),
}

impl ClientError {
    /// The server was reached and executed the call.
    pub fn is_application(&self) -> bool {
        matches!(self, ClientError::Api(_))
    }

    /// The server was never meaningfully reached.
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Transport(_))
    }

    /// The error object, when the server produced one.
    pub fn as_api_error(&self) -> Option<&ErrorObject> {
        match self {
            ClientError::Api(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        ClientError::Transport(e.to_string())
    }
}
