//! RPC Error Object and Error Codes
//!
//! The code table mirrors the server's dispatch layer. Codes are stable and
//! used by clients to branch on failure reasons.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error codes returned by the marketplace API.
pub mod code {
    /// Request body is not a valid JSON-RPC 2.0 request.
    pub const INVALID_REQUEST: i32 = -32600;
    /// Unknown method name.
    pub const METHOD_NOT_FOUND: i32 = -32601;
    /// A required parameter is missing.
    pub const MISSING_FIELDS: i32 = -32000;
    /// Registration with an already-taken username.
    pub const USERNAME_TAKEN: i32 = -32001;
    /// Login with a bad username/password pair.
    pub const INVALID_CREDENTIALS: i32 = -32002;
    /// Method requires an authenticated session.
    pub const NOT_AUTHENTICATED: i32 = -32003;
    /// Referenced user does not exist.
    pub const USER_NOT_FOUND: i32 = -32004;
    /// Profile is hidden from non-owners.
    pub const PROFILE_HIDDEN: i32 = -32005;
    /// Method requires admin privileges.
    pub const ADMIN_REQUIRED: i32 = -32006;
    /// Admins may not delete their own account via the admin API.
    pub const SELF_DELETE: i32 = -32007;
}

/// Error member of a JSON-RPC response.
///
/// Carries a stable numeric code, a human-readable message, and optional
/// machine-readable details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorObject {
    pub code: i32,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl ErrorObject {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    /// True when the failure means the caller has no (valid) session.
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self.code,
            code::NOT_AUTHENTICATED | code::INVALID_CREDENTIALS
        )
    }

    /// True when the caller lacks admin privileges.
    pub fn is_admin_required(&self) -> bool {
        self.code == code::ADMIN_REQUIRED
    }
}

impl fmt::Display for ErrorObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}) {}", self.code, self.message)
    }
}
