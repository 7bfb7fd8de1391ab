//! End-to-end account lifecycle against a mock server.
//!
//! The mock plays the server's role: JSON-RPC responses plus the session
//! cookie the real backend sets on login/register and clears on logout.

use mockito::Matcher;
use promarket_protocol::error::code;
use promarket_sdk::ApiClient;
use serde_json::json;

fn rpc_result(result: serde_json::Value) -> String {
    json!({"jsonrpc": "2.0", "result": result, "id": 1}).to_string()
}

fn rpc_error(error_code: i32, message: &str) -> String {
    json!({
        "jsonrpc": "2.0",
        "error": {"code": error_code, "message": message},
        "id": 1,
    })
    .to_string()
}

#[tokio::test]
async fn register_update_hide_logout_flow() {
    let mut server = mockito::Server::new_async().await;

    let register = server
        .mock("POST", "/")
        .match_body(Matcher::PartialJson(json!({
            "jsonrpc": "2.0",
            "method": "user.register",
            "params": {
                "username": "masha",
                "password": "secret",
                "name": "Maria",
                "service_type": "Translator",
                "experience": 5,
                "price": 1200,
                "about": "",
            },
        })))
        .with_status(200)
        .with_header("set-cookie", "session=sess-1; HttpOnly; Path=/")
        .with_body(rpc_result(json!({"success": true, "user_id": 31})))
        .create_async()
        .await;

    let update = server
        .mock("POST", "/")
        .match_header("cookie", "session=sess-1")
        .match_body(Matcher::PartialJson(json!({
            "method": "user.update_profile",
            "params": {"price": 1500},
        })))
        .with_status(200)
        .with_body(rpc_result(json!({"success": true})))
        .create_async()
        .await;

    let hide = server
        .mock("POST", "/")
        .match_header("cookie", "session=sess-1")
        .match_body(Matcher::PartialJson(json!({
            "method": "user.hide_profile",
            "params": {"hide": true},
        })))
        .with_status(200)
        .with_body(rpc_result(json!({"success": true, "is_hidden": true})))
        .create_async()
        .await;

    let logout = server
        .mock("POST", "/")
        .match_header("cookie", "session=sess-1")
        .match_body(Matcher::PartialJson(json!({"method": "user.logout"})))
        .with_status(200)
        .with_header("set-cookie", "session=; Expires=Thu, 01 Jan 1970 00:00:00 GMT; Path=/")
        .with_body(rpc_result(json!({"success": true})))
        .create_async()
        .await;

    let client = ApiClient::new(server.url()).unwrap();

    let registered = client
        .register(promarket_protocol::types::RegisterParams {
            username: "masha".to_string(),
            password: "secret".to_string(),
            name: "Maria".to_string(),
            service_type: "Translator".to_string(),
            experience: 5,
            price: 1200,
            about: String::new(),
        })
        .await
        .unwrap();
    assert_eq!(registered.user_id, 31);

    client
        .update_profile(promarket_protocol::types::UpdateProfileParams {
            price: Some(1500),
            ..Default::default()
        })
        .await
        .unwrap();

    let hidden = client.hide_profile(true).await.unwrap();
    assert!(hidden.is_hidden);

    client.logout().await.unwrap();
    assert_eq!(client.session_token().await, None);

    register.assert_async().await;
    update.assert_async().await;
    hide.assert_async().await;
    logout.assert_async().await;
}

#[tokio::test]
async fn stale_session_surfaces_not_authenticated() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/")
        .match_header("cookie", "session=stale")
        .match_body(Matcher::PartialJson(json!({"method": "user.get_profile"})))
        .with_status(200)
        .with_body(rpc_error(code::NOT_AUTHENTICATED, "Not authenticated"))
        .create_async()
        .await;

    let client = ApiClient::new(server.url()).unwrap();
    client.restore_session("stale").await;

    let err = client.my_profile().await.unwrap_err();
    let api = err.as_api_error().expect("application error expected");
    assert_eq!(api.code, code::NOT_AUTHENTICATED);
    assert!(api.is_auth_failure());
}

#[tokio::test]
async fn delete_account_ends_the_session() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("POST", "/")
        .match_body(Matcher::PartialJson(json!({"method": "user.login"})))
        .with_status(200)
        .with_header("set-cookie", "session=doomed; Path=/")
        .with_body(rpc_result(json!({"success": true, "user_id": 12})))
        .create_async()
        .await;

    let delete = server
        .mock("POST", "/")
        .match_header("cookie", "session=doomed")
        .match_body(Matcher::PartialJson(json!({"method": "user.delete_account"})))
        .with_status(200)
        .with_header("set-cookie", "session=; Path=/")
        .with_body(rpc_result(json!({"success": true})))
        .create_async()
        .await;

    let client = ApiClient::new(server.url()).unwrap();
    client.login("user12", "pass").await.unwrap();

    let ack = client.delete_account().await.unwrap();
    assert!(ack.success);
    assert_eq!(client.session_token().await, None);
    delete.assert_async().await;
}

#[tokio::test]
async fn duplicate_username_surfaces_conflict() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/")
        .match_body(Matcher::PartialJson(json!({"method": "user.register"})))
        .with_status(200)
        .with_body(rpc_error(code::USERNAME_TAKEN, "Username already exists"))
        .create_async()
        .await;

    let client = ApiClient::new(server.url()).unwrap();
    let err = client
        .register(promarket_protocol::types::RegisterParams {
            username: "admin".to_string(),
            password: "x".to_string(),
            name: "X".to_string(),
            service_type: "Tutor".to_string(),
            experience: 1,
            price: 100,
            about: String::new(),
        })
        .await
        .unwrap_err();

    assert_eq!(err.as_api_error().unwrap().code, code::USERNAME_TAKEN);
    // A failed registration must not leave a session behind.
    assert_eq!(client.session_token().await, None);
}
