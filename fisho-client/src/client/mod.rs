//! Transport layer
//!
//! [`HttpClient`] is the seam between the typed API and the wire. The network
//! implementation talks to a real backend over reqwest; the oneshot
//! implementation (feature `in-process`) drives an axum `Router` in memory.

pub mod http;
#[cfg(feature = "in-process")]
pub mod http_oneshot;

pub use self::http::{HttpClient, NetworkHttpClient};
#[cfg(feature = "in-process")]
pub use self::http_oneshot::OneshotHttpClient;
