//! Shared types for the Fisho POS workspace
//!
//! Wire types used by both the HTTP client and the POS core: the response
//! envelope, catalog models and the POS order DTOs.

pub mod client;
pub mod models;
pub mod order;
pub mod response;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use response::ApiResponse;
