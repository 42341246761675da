//! Typed bindings for the backend endpoints used by the POS
//!
//! Every endpoint answers with an [`ApiResponse`] envelope. A non-2xx status
//! and a `success: false` envelope are both request failures; the latter
//! surfaces as [`ClientError::Business`].

use serde::de::DeserializeOwned;
use shared::ApiResponse;
use shared::client::{LoginRequest, LoginResponse};
use shared::models::{CatalogEntry, Category, Store};
use shared::order::{PosOrderReceipt, PosOrderRequest};

use crate::{ClientError, ClientResult, HttpClient, Session};

/// Unwrap an envelope whose payload is required.
///
/// `failure` is shown when a failed envelope carries no message.
pub fn require_data<T>(resp: ApiResponse<T>, what: &str, failure: &str) -> ClientResult<T> {
    match resp.into_result() {
        Ok(Some(data)) => Ok(data),
        Ok(None) => Err(ClientError::InvalidResponse(format!("Missing {} data", what))),
        Err(message) => Err(ClientError::Business(
            message.unwrap_or_else(|| failure.to_string()),
        )),
    }
}

/// Unwrap a list envelope; a successful envelope without data is an empty list.
fn list_data<T>(resp: ApiResponse<Vec<T>>, what: &str) -> ClientResult<Vec<T>> {
    match resp.into_result() {
        Ok(data) => Ok(data.unwrap_or_default()),
        Err(message) => Err(ClientError::Business(
            message.unwrap_or_else(|| format!("Failed to load {}", what)),
        )),
    }
}

/// Fisho backend API over any [`HttpClient`]
#[derive(Debug, Clone)]
pub struct FishoApi<C> {
    http: C,
}

impl<C: HttpClient> FishoApi<C> {
    pub fn new(http: C) -> Self {
        Self { http }
    }

    pub fn http(&self) -> &C {
        &self.http
    }

    async fn get_list<T: DeserializeOwned + Send>(&self, path: &str, what: &str) -> ClientResult<Vec<T>> {
        let resp: ApiResponse<Vec<T>> = self.http.get(path).await?;
        list_data(resp, what)
    }

    // ========== Auth API ==========

    /// Log in and return the resulting session. The transport starts
    /// sending the new token immediately.
    pub async fn login(&mut self, email: &str, password: &str) -> ClientResult<Session> {
        let req = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let resp: ApiResponse<LoginResponse> = self.http.post("/api/auth/login", &req).await?;
        let login = require_data(resp, "login", "Login failed")?;
        let session = Session::from_login(login);
        self.http.set_token(session.token().map(str::to_string));
        tracing::info!(admin = ?session.admin().map(|a| &a.email), "Logged in");
        Ok(session)
    }

    // ========== Catalog API ==========

    /// `GET /api/stores/`
    pub async fn stores(&self) -> ClientResult<Vec<Store>> {
        self.get_list("/api/stores/", "stores").await
    }

    /// `GET /api/categories`, optionally scoped to one store
    pub async fn categories(&self, store_id: Option<&str>) -> ClientResult<Vec<Category>> {
        let path = match store_id {
            Some(id) => format!("/api/categories?storeId={}", urlencoding::encode(id)),
            None => "/api/categories".to_string(),
        };
        self.get_list(&path, "categories").await
    }

    /// `GET /api/store-inventory/{storeId}`
    pub async fn store_inventory(&self, store_id: &str) -> ClientResult<Vec<CatalogEntry>> {
        let path = format!("/api/store-inventory/{}", urlencoding::encode(store_id));
        self.get_list(&path, "inventory").await
    }

    // ========== Order API ==========

    /// `POST /api/order/create-pos-order`
    pub async fn create_pos_order(&self, order: &PosOrderRequest) -> ClientResult<PosOrderReceipt> {
        let resp: ApiResponse<PosOrderReceipt> = self
            .http
            .post("/api/order/create-pos-order", order)
            .await?;
        require_data(resp, "order", "Failed to create order")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_data_maps_failure_to_business() {
        let resp: ApiResponse<String> = ApiResponse::error("Store closed");
        let err = require_data(resp, "store", "Failed to load store").unwrap_err();
        assert!(err.is_business());
        assert_eq!(err.user_message(), "Store closed");
    }

    #[test]
    fn test_require_data_fallbacks() {
        let resp: ApiResponse<String> = ApiResponse {
            success: false,
            data: None,
            message: None,
        };
        let err = require_data(resp, "order", "Failed to create order").unwrap_err();
        assert_eq!(err.to_string(), "Failed to create order");

        let resp: ApiResponse<String> = ApiResponse {
            success: true,
            data: None,
            message: None,
        };
        let err = require_data(resp, "order", "Failed to create order").unwrap_err();
        assert!(matches!(err, ClientError::InvalidResponse(_)));
    }

    #[test]
    fn test_list_data_tolerates_missing_payload() {
        let resp: ApiResponse<Vec<Store>> = ApiResponse {
            success: true,
            data: None,
            message: None,
        };
        assert!(list_data(resp, "stores").unwrap().is_empty());
    }

    #[test]
    fn test_list_failure_without_message_gets_generic_text() {
        let resp: ApiResponse<Vec<Store>> = ApiResponse {
            success: false,
            data: None,
            message: None,
        };
        let err = list_data(resp, "stores").unwrap_err();
        assert_eq!(err.to_string(), "Failed to load stores");
    }
}
