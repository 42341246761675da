//! Oneshot HTTP client - in-memory transport
//!
//! Requires the "in-process" feature.

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::{Method, Request};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tower::ServiceExt;

use super::http::{HttpClient, decode_body, error_from_body};
use crate::{ClientError, ClientResult, Session};

/// Oneshot HTTP client (in-memory calls)
///
/// Calls the Router directly through Tower's `oneshot`, with the same
/// envelope and status handling as the network client. Used to run the POS
/// against an in-process backend without a socket.
///
/// # Example
///
/// ```ignore
/// use axum::Router;
/// use fisho_client::{OneshotHttpClient, Session};
///
/// let router: Router = build_backend();
/// let client = OneshotHttpClient::new(router, &Session::with_token("t"));
/// let stores: ApiResponse<Vec<Store>> = client.get("/api/stores/").await?;
/// ```
#[derive(Debug, Clone)]
pub struct OneshotHttpClient {
    router: Router,
    token: Option<String>,
}

impl OneshotHttpClient {
    pub fn new(router: Router, session: &Session) -> Self {
        Self {
            router,
            token: session.token().map(str::to_string),
        }
    }

    fn build_request(&self, method: Method, path: &str, body: Body) -> ClientResult<Request<Body>> {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = &self.token {
            builder = builder.header(http::header::AUTHORIZATION, format!("Bearer {}", token));
        }
        builder
            .header(http::header::CONTENT_TYPE, "application/json")
            .body(body)
            .map_err(|e| ClientError::Internal(format!("Failed to build request: {}", e)))
    }

    async fn execute<T: DeserializeOwned>(&self, request: Request<Body>) -> ClientResult<T> {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .map_err(|e| ClientError::Internal(format!("Oneshot call failed: {}", e)))?;

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .map_err(|e| ClientError::Internal(format!("Failed to read body: {}", e)))?;

        if !status.is_success() {
            let text = String::from_utf8_lossy(&body_bytes);
            return Err(error_from_body(status, &text));
        }
        decode_body(&body_bytes)
    }
}

#[async_trait]
impl HttpClient for OneshotHttpClient {
    async fn get<T: DeserializeOwned + Send>(&self, path: &str) -> ClientResult<T> {
        let request = self.build_request(Method::GET, path, Body::empty())?;
        self.execute(request).await
    }

    async fn post<T: DeserializeOwned + Send, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let bytes = serde_json::to_vec(body)?;
        let request = self.build_request(Method::POST, path, Body::from(bytes))?;
        self.execute(request).await
    }

    fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oneshot_client_creation() {
        let router: Router = Router::new();
        let client = OneshotHttpClient::new(router, &Session::with_token("t1"));
        assert_eq!(client.token(), Some("t1"));
    }
}
