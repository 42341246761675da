//! Fisho Client - HTTP client for the Fisho admin backend
//!
//! Provides the transport ([`HttpClient`]) and typed bindings ([`FishoApi`])
//! for the endpoints the POS workflow consumes. Authentication state lives in
//! an explicit [`Session`] handed to the client at construction.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod session;

pub use api::FishoApi;
pub use client::{HttpClient, NetworkHttpClient};
#[cfg(feature = "in-process")]
pub use client::OneshotHttpClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use session::{Session, SessionStore};

// Re-export shared types for convenience
pub use shared::client::{AdminInfo, ApiResponse, LoginRequest, LoginResponse};
