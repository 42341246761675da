//! API Response types
//!
//! The Fisho backend wraps every payload in the same envelope:
//! ```json
//! { "success": true, "data": { ... } }
//! { "success": false, "message": "Insufficient stock" }
//! ```

use serde::{Deserialize, Serialize};

/// Unified API response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// `false` means the request failed even if the HTTP status was 2xx
    pub success: bool,
    /// Response data (optional); an absent field decodes as `None`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Human-readable message, mostly present on failures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    /// Create a failure response
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }

    /// Split the envelope into its payload or the failure message.
    ///
    /// A failed envelope without a message yields `None` in the error
    /// position so callers can substitute their own generic text.
    pub fn into_result(self) -> Result<Option<T>, Option<String>> {
        if self.success {
            Ok(self.data)
        } else {
            Err(self.message.filter(|m| !m.trim().is_empty()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_envelope_without_data() {
        let resp: ApiResponse<Vec<String>> =
            serde_json::from_str(r#"{"success":false,"message":"Insufficient stock"}"#).unwrap();
        assert_eq!(resp.into_result(), Err(Some("Insufficient stock".to_string())));
    }

    #[test]
    fn test_blank_failure_message_is_dropped() {
        let resp: ApiResponse<()> = serde_json::from_str(r#"{"success":false,"message":"  "}"#).unwrap();
        assert_eq!(resp.into_result(), Err(None));
    }

    #[test]
    fn test_missing_data_is_none_for_non_default_payload() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct Receipt {
            invoice_no: String,
        }
        let resp: ApiResponse<Receipt> = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert_eq!(resp.into_result(), Ok(None));

        let resp: ApiResponse<Receipt> =
            serde_json::from_str(r#"{"success":true,"data":{"invoice_no":"INV-7"}}"#).unwrap();
        assert_eq!(
            resp.into_result(),
            Ok(Some(Receipt {
                invoice_no: "INV-7".into()
            }))
        );
    }
}
