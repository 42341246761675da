//! POS error types
//!
//! Three kinds of failure reach the user: a [`ValidationError`] raised
//! locally before any request, a fetch failure, and a business failure
//! (`success: false`). The last two both arrive as a [`ClientError`].

use fisho_client::ClientError;
use thiserror::Error;

/// Client-side precondition failure; never sent to the network
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please select a store")]
    StoreNotSelected,

    #[error("Cart is empty, add at least one product")]
    EmptyCart,

    #[error("Customer name is required")]
    MissingCustomerName,

    #[error("Customer phone number is required")]
    MissingCustomerPhone,

    #[error("{name} is out of stock")]
    OutOfStock { name: String },

    #[error("Only {available} of {name} available in stock")]
    StockExceeded { name: String, available: i64 },

    #[error("Cart line {0} not found")]
    LineNotFound(String),

    #[error("Product {0} is not in the catalog")]
    UnknownProduct(String),

    #[error("Variant {0} is not offered")]
    UnknownVariant(String),

    #[error("No price available for {0}")]
    PriceUnavailable(String),

    #[error("Weight must be greater than zero")]
    InvalidWeight,

    #[error("An order is already being submitted")]
    SubmissionInProgress,
}

/// Error type of POS operations
#[derive(Debug, Error)]
pub enum PosError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Fetch(#[from] ClientError),
}

/// How an error is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Fetch,
    Business,
}

impl PosError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Fetch(e) if e.is_business() => ErrorKind::Business,
            Self::Fetch(_) => ErrorKind::Fetch,
        }
    }

    /// HTTP status for fetch failures
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Validation(_) => None,
            Self::Fetch(e) => e.status(),
        }
    }

    /// Text shown in the toast / inline banner
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(e) => e.to_string(),
            Self::Fetch(e) => e.user_message(),
        }
    }
}

/// Result type for POS operations
pub type PosResult<T> = Result<T, PosError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        let err = PosError::from(ValidationError::EmptyCart);
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.status(), None);

        let err = PosError::from(ClientError::Business("Insufficient stock".into()));
        assert_eq!(err.kind(), ErrorKind::Business);
        assert_eq!(err.user_message(), "Insufficient stock");

        let err = PosError::from(ClientError::Status {
            status: 503,
            message: "maintenance".into(),
        });
        assert_eq!(err.kind(), ErrorKind::Fetch);
        assert_eq!(err.status(), Some(503));
    }
}
