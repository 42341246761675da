//! HTTP client - network transport

use async_trait::async_trait;
use http::StatusCode;
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::ApiResponse;

use crate::{ClientConfig, ClientError, ClientResult, Session};

/// Request transport used by [`crate::FishoApi`]
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get<T: DeserializeOwned + Send>(&self, path: &str) -> ClientResult<T>;

    async fn post<T: DeserializeOwned + Send, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;

    /// Bearer token attached to every request, if any
    fn token(&self) -> Option<&str>;

    fn set_token(&mut self, token: Option<String>);
}

/// Turn a non-2xx body into a [`ClientError`], preferring the envelope's message.
pub(crate) fn error_from_body(status: StatusCode, text: &str) -> ClientError {
    let message = serde_json::from_str::<ApiResponse<serde_json::Value>>(text)
        .ok()
        .and_then(|resp| resp.message)
        .unwrap_or_else(|| text.trim().to_string());
    ClientError::from_status(status, message)
}

/// Decode a 2xx body
pub(crate) fn decode_body<T: DeserializeOwned>(bytes: &[u8]) -> ClientResult<T> {
    serde_json::from_slice(bytes)
        .map_err(|e| ClientError::InvalidResponse(format!("JSON parse error: {}", e)))
}

/// Network HTTP client
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl NetworkHttpClient {
    pub fn new(config: &ClientConfig, session: &Session) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: session.token().map(str::to_string),
        })
    }

    /// Base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> ClientResult<T> {
        let status = response.status();
        let bytes = response.bytes().await?;
        if !status.is_success() {
            let text = String::from_utf8_lossy(&bytes);
            tracing::debug!(status = %status, "Request failed");
            return Err(error_from_body(status, &text));
        }
        decode_body(&bytes)
    }
}

#[async_trait]
impl HttpClient for NetworkHttpClient {
    async fn get<T: DeserializeOwned + Send>(&self, path: &str) -> ClientResult<T> {
        let url = self.url(path);
        tracing::debug!(%url, "GET");
        let mut req = self.client.get(&url);
        if let Some(auth) = self.auth_header() {
            req = req.header(reqwest::header::AUTHORIZATION, auth);
        }
        let response = req.send().await?;
        self.handle_response(response).await
    }

    async fn post<T: DeserializeOwned + Send, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let url = self.url(path);
        tracing::debug!(%url, "POST");
        let mut req = self.client.post(&url).json(body);
        if let Some(auth) = self.auth_header() {
            req = req.header(reqwest::header::AUTHORIZATION, auth);
        }
        let response = req.send().await?;
        self.handle_response(response).await
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
    fn test_url_joins_without_double_slash() {
        let config = ClientConfig::new("http://localhost:5000/");
        let client = NetworkHttpClient::new(&config, &Session::anonymous()).unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000");
        assert_eq!(client.url("/api/stores/"), "http://localhost:5000/api/stores/");
        assert!(client.token().is_none());
    }

    #[test]
    fn test_token_comes_from_session() {
        let config = ClientConfig::default();
        let client = NetworkHttpClient::new(&config, &Session::with_token("abc")).unwrap();
        assert_eq!(client.auth_header().as_deref(), Some("Bearer abc"));
    }

    #[test]
    fn test_error_body_prefers_envelope_message() {
        let err = error_from_body(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"success":false,"message":"Database unavailable"}"#,
        );
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.user_message(), "Database unavailable");

        let err = error_from_body(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>");
        assert_eq!(err.user_message(), "<html>bad gateway</html>");
    }
}
