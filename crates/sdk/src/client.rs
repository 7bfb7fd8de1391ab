//! Marketplace Client Implementation

use crate::error::{ClientError, Result};
use promarket_protocol::envelope::{RpcRequest, RpcResponse};
use promarket_protocol::method;
use promarket_protocol::types::{
    AckResult, AdminDeleteUserParams, AdminListParams, AdminListResult, AdminUpdateUserParams,
    GetProfileParams, HideProfileParams, HideProfileResult, LoginParams, LoginResult, Profile,
    RegisterParams, RegisterResult, SearchParams, SearchResult, UpdateProfileParams,
};
use rand::Rng;
use reqwest::header::{COOKIE, SET_COOKIE};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::debug;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Name of the server's session cookie.
const SESSION_COOKIE: &str = "session";

/// Request ids are random in this range, matching the server's single
/// request per HTTP exchange model (no response multiplexing, so collisions
/// are harmless).
const MAX_REQUEST_ID: u64 = 1_000_000;

/// Promarket API Client
///
/// Issues JSON-RPC 2.0 calls against the marketplace endpoint and tracks the
/// session cookie across calls, so authenticated methods work after
/// [`login`](ApiClient::login) or [`register`](ApiClient::register).
///
/// # Example
///
/// ```no_run
/// use promarket_sdk::ApiClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ApiClient::new("http://127.0.0.1:8080/api")?;
/// let result = client.login("user1", "pass").await?;
/// println!("Logged in as user {}", result.user_id);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    endpoint: Url,
    session: RwLock<Option<String>>,
}

impl ApiClient {
    /// Create a client for the given RPC endpoint URL
    /// (e.g., `http://127.0.0.1:8080/api`).
    pub fn new(endpoint: impl AsRef<str>) -> Result<Self> {
        let endpoint = Url::parse(endpoint.as_ref())
            .map_err(|e| ClientError::InvalidEndpoint(format!("{}: {}", endpoint.as_ref(), e)))?;

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ClientError::Transport(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            endpoint,
            session: RwLock::new(None),
        })
    }

    /// Perform one JSON-RPC call and resolve it exactly once.
    ///
    /// Serializes the `{"jsonrpc":"2.0",...}` envelope with a random request
    /// id, POSTs it to the endpoint, and collapses the response into either
    /// the `result` value or a [`ClientError`]. No retry, no cancellation.
    pub async fn call(&self, method: &str, params: serde_json::Value) -> Result<serde_json::Value> {
        let id = rand::thread_rng().gen_range(0..MAX_REQUEST_ID);
        let request = RpcRequest::new(method, params, id);

        debug!(method, id, "sending rpc request");

        let mut builder = self.http.post(self.endpoint.clone()).json(&request);
        if let Some(token) = self.session.read().await.as_deref() {
            builder = builder.header(COOKIE, format!("{}={}", SESSION_COOKIE, token));
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        self.capture_session(&response).await;

        let body: RpcResponse = response
            .json()
            .await
            .map_err(|e| ClientError::Transport(format!("malformed response body: {}", e)))?;

        match body.into_outcome() {
            Ok(Ok(result)) => {
                debug!(method, id, "rpc call succeeded");
                Ok(result)
            }
            Ok(Err(error)) => {
                debug!(method, id, code = error.code, "rpc call returned error");
                Err(ClientError::Api(error))
            }
            Err(e) => Err(ClientError::Transport(e.to_string())),
        }
    }

    /// Refresh the stored session cookie from `Set-Cookie` headers.
    ///
    /// The server rotates the cookie on login/register and clears it (empty
    /// value) on logout and account deletion.
    async fn capture_session(&self, response: &reqwest::Response) {
        let mut update = None;
        for header in response.headers().get_all(SET_COOKIE) {
            let Ok(raw) = header.to_str() else { continue };
            let Some((name, rest)) = raw.split_once('=') else {
                continue;
            };
            if name.trim() != SESSION_COOKIE {
                continue;
            }
            let value = rest.split(';').next().unwrap_or("").trim();
            update = Some(if value.is_empty() {
                None
            } else {
                Some(value.to_string())
            });
        }

        if let Some(session) = update {
            debug!(active = session.is_some(), "session cookie updated");
            *self.session.write().await = session;
        }
    }

    /// Current session cookie value, if a session is active.
    pub async fn session_token(&self) -> Option<String> {
        self.session.read().await.clone()
    }

    /// Resume a previously captured session.
    pub async fn restore_session(&self, token: impl Into<String>) {
        *self.session.write().await = Some(token.into());
    }

    /// Drop the stored session without calling the server.
    pub async fn clear_session(&self) {
        *self.session.write().await = None;
    }

    async fn call_typed<P, R>(&self, method: &str, params: &P) -> Result<R>
    where
        P: Serialize,
        R: DeserializeOwned,
    {
        let params = serde_json::to_value(params).map_err(ClientError::Params)?;
        let result = self.call(method, params).await?;
        serde_json::from_value(result)
            .map_err(|e| ClientError::Transport(format!("malformed result payload: {}", e)))
    }

    /// user.register - create an account; the server starts a session for it.
    pub async fn register(&self, params: RegisterParams) -> Result<RegisterResult> {
        self.call_typed(method::USER_REGISTER, &params).await
    }

    /// user.login
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResult> {
        let params = LoginParams {
            username: username.to_string(),
            password: password.to_string(),
        };
        self.call_typed(method::USER_LOGIN, &params).await
    }

    /// user.logout
    pub async fn logout(&self) -> Result<AckResult> {
        self.call_typed(method::USER_LOGOUT, &serde_json::json!({}))
            .await
    }

    /// user.get_profile for another user. Hidden profiles answer with an
    /// error unless the caller is the owner or an admin.
    pub async fn get_profile(&self, user_id: i64) -> Result<Profile> {
        let params = GetProfileParams {
            user_id: Some(user_id),
        };
        self.call_typed(method::USER_GET_PROFILE, &params).await
    }

    /// user.get_profile for the authenticated caller.
    pub async fn my_profile(&self) -> Result<Profile> {
        self.call_typed(method::USER_GET_PROFILE, &GetProfileParams::default())
            .await
    }

    /// user.update_profile - only the fields set in `params` change.
    pub async fn update_profile(&self, params: UpdateProfileParams) -> Result<AckResult> {
        self.call_typed(method::USER_UPDATE_PROFILE, &params).await
    }

    /// user.hide_profile
    pub async fn hide_profile(&self, hide: bool) -> Result<HideProfileResult> {
        self.call_typed(method::USER_HIDE_PROFILE, &HideProfileParams { hide })
            .await
    }

    /// user.delete_account - removes the caller's account and ends the session.
    pub async fn delete_account(&self) -> Result<AckResult> {
        self.call_typed(method::USER_DELETE_ACCOUNT, &serde_json::json!({}))
            .await
    }

    /// search - paginated provider search over visible profiles.
    pub async fn search(&self, params: SearchParams) -> Result<SearchResult> {
        self.call_typed(method::SEARCH, &params).await
    }

    /// admin.get_all_users
    pub async fn admin_get_all_users(&self, params: AdminListParams) -> Result<AdminListResult> {
        self.call_typed(method::ADMIN_GET_ALL_USERS, &params).await
    }

    /// admin.update_user
    pub async fn admin_update_user(&self, params: AdminUpdateUserParams) -> Result<AckResult> {
        self.call_typed(method::ADMIN_UPDATE_USER, &params).await
    }

    /// admin.delete_user
    pub async fn admin_delete_user(&self, user_id: i64) -> Result<AckResult> {
        self.call_typed(method::ADMIN_DELETE_USER, &AdminDeleteUserParams { user_id })
            .await
    }
}
