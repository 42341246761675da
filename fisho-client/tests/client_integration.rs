// fisho-client/tests/client_integration.rs
// Runs the typed API against an in-process axum backend.

use std::collections::HashMap;

use axum::extract::{Path, Query};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use fisho_client::{ClientError, FishoApi, HttpClient, OneshotHttpClient, Session, SessionStore};
use serde_json::{Value, json};
use tempfile::TempDir;

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

fn backend() -> Router {
    Router::new()
        .route(
            "/api/stores/",
            get(|headers: HeaderMap| async move {
                if bearer(&headers).as_deref() != Some("Bearer secret") {
                    return (
                        StatusCode::UNAUTHORIZED,
                        Json(json!({"success": false, "message": "Token missing"})),
                    );
                }
                (
                    StatusCode::OK,
                    Json(json!({"success": true, "data": [
                        {"_id": "s1", "name": "Kochi"},
                        {"_id": "s2", "name": "Calicut", "isActive": false}
                    ]})),
                )
            }),
        )
        .route(
            "/api/categories",
            get(|| async { Json(json!({"success": false, "message": "Categories unavailable"})) }),
        )
        .route(
            "/api/store-inventory/{store_id}",
            get(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"success": false, "message": "Database unavailable"})),
                )
            }),
        )
        .route(
            "/api/auth/login",
            post(|Json(body): Json<Value>| async move {
                if body["password"] == "pw" {
                    Json(json!({"success": true, "data": {
                        "token": "secret",
                        "admin": {"_id": "a1", "name": "Admin", "email": body["email"]}
                    }}))
                } else {
                    Json(json!({"success": false, "message": "Invalid credentials"}))
                }
            }),
        )
}

#[tokio::test]
async fn test_bearer_token_is_sent() {
    let api = FishoApi::new(OneshotHttpClient::new(backend(), &Session::with_token("secret")));
    let stores = api.stores().await.unwrap();
    // the client does not filter; that is the resolver's job
    assert_eq!(stores.len(), 2);
    assert_eq!(stores[0].id, "s1");
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let api = FishoApi::new(OneshotHttpClient::new(backend(), &Session::anonymous()));
    let err = api.stores().await.unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized(_)));
    assert_eq!(err.user_message(), "Token missing");
}

#[tokio::test]
async fn test_success_false_is_business_error() {
    let api = FishoApi::new(OneshotHttpClient::new(backend(), &Session::with_token("secret")));
    let err = api.categories(Some("s1")).await.unwrap_err();
    assert!(err.is_business());
    assert_eq!(err.user_message(), "Categories unavailable");
}

#[tokio::test]
async fn test_server_error_carries_status() {
    let api = FishoApi::new(OneshotHttpClient::new(backend(), &Session::with_token("secret")));
    let err = api.store_inventory("s1").await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.user_message(), "Database unavailable");
}

#[tokio::test]
async fn test_login_installs_token() {
    let mut api = FishoApi::new(OneshotHttpClient::new(backend(), &Session::anonymous()));
    let session = api.login("admin@fisho.in", "pw").await.unwrap();
    assert_eq!(session.token(), Some("secret"));
    assert_eq!(session.admin().map(|a| a.email.as_str()), Some("admin@fisho.in"));
    assert_eq!(api.http().token(), Some("secret"));
    assert_eq!(api.stores().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_login_rejected() {
    let mut api = FishoApi::new(OneshotHttpClient::new(backend(), &Session::anonymous()));
    let err = api.login("admin@fisho.in", "nope").await.unwrap_err();
    assert_eq!(err.user_message(), "Invalid credentials");
    assert!(api.http().token().is_none());
}

#[tokio::test]
async fn test_store_ids_are_percent_encoded() {
    let router = Router::new()
        .route(
            "/api/store-inventory/{store_id}",
            get(|Path(store_id): Path<String>| async move {
                Json(json!({"success": true, "data": [
                    {"productId": "p1", "name": store_id, "totalStock": 1}
                ]}))
            }),
        )
        .route(
            "/api/categories",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                Json(json!({"success": true, "data": [
                    {"_id": "c1", "name": params.get("storeId").cloned().unwrap_or_default()}
                ]}))
            }),
        );
    let api = FishoApi::new(OneshotHttpClient::new(router, &Session::anonymous()));

    let entries = api.store_inventory("north wing/2").await.unwrap();
    assert_eq!(entries[0].name, "north wing/2");

    let categories = api.categories(Some("a&b=c d")).await.unwrap();
    assert_eq!(categories[0].name, "a&b=c d");
}

#[test]
fn test_session_store_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let store = SessionStore::new(temp_dir.path().join("nested").join("session.json"));
    assert!(!store.exists());
    assert!(store.load().is_none());

    let session = Session::with_token("tok");
    store.save(&session).unwrap();
    assert!(store.exists());
    assert_eq!(store.load(), Some(session));

    store.delete().unwrap();
    assert!(!store.exists());
    assert!(!store.load_or_anonymous().is_authenticated());
}

#[test]
fn test_corrupt_session_file_is_ignored() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("session.json");
    std::fs::write(&path, "{not json").unwrap();
    let store = SessionStore::new(&path);
    assert!(store.load().is_none());
}
