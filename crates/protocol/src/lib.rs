//! Promarket Wire Protocol
//!
//! Defines the JSON-RPC 2.0 envelope, the server's error-code table, and the
//! typed parameter/result shapes for every method the marketplace API exposes.
//! The SDK serializes these onto the wire; the server is an external
//! collaborator and is not implemented here.

pub mod envelope;
pub mod error;
pub mod method;
pub mod types;

pub use envelope::{EnvelopeError, RpcRequest, RpcResponse, JSONRPC_VERSION};
pub use error::ErrorObject;
