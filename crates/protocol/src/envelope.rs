//! JSON-RPC 2.0 Envelope
//!
//! The fixed request/response wrapper shape carrying method name, parameters,
//! id, and either result or error.

use crate::error::ErrorObject;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Protocol version carried in every request.
pub const JSONRPC_VERSION: &str = "2.0";

/// Request envelope.
///
/// The id is a client-generated integer with no uniqueness guarantee; the
/// API serves one request per HTTP exchange, so ids are never used to
/// correlate responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
    pub id: u64,
}

impl RpcRequest {
    pub fn new(method: impl Into<String>, params: serde_json::Value, id: u64) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: method.into(),
            params,
            id,
        }
    }
}

/// Response envelope. Exactly one of `result` / `error` is populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcResponse {
    #[serde(default)]
    pub jsonrpc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorObject>,
    #[serde(default)]
    pub id: Option<serde_json::Value>,
}

impl RpcResponse {
    /// Collapse the envelope into its single outcome.
    ///
    /// A body carrying both or neither of `result`/`error` violates the
    /// envelope contract and is reported as malformed.
    pub fn into_outcome(self) -> Result<Result<serde_json::Value, ErrorObject>, EnvelopeError> {
        match (self.result, self.error) {
            (Some(result), None) => Ok(Ok(result)),
            (None, Some(error)) => Ok(Err(error)),
            (Some(_), Some(_)) => Err(EnvelopeError::BothPresent),
            (None, None) => Err(EnvelopeError::NeitherPresent),
        }
    }
}

/// Violation of the result-xor-error envelope contract.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EnvelopeError {
    #[error("response carries both result and error")]
    BothPresent,
    #[error("response carries neither result nor error")]
    NeitherPresent,
}
