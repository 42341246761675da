//! POS configuration
//!
//! Read from the environment once at startup; a `.env` file in the working
//! directory is loaded first when present.

use std::path::PathBuf;
use std::time::Duration;

use fisho_client::{ClientConfig, SessionStore};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PosConfig {
    /// Backend base URL
    pub api_url: String,
    pub timeout_secs: u64,
    /// JSON file holding the admin session
    pub session_path: PathBuf,
    pub log_level: String,
    /// Daily rolling log files go here when set
    pub log_dir: Option<String>,
}

impl PosConfig {
    /// Load configuration from environment variables
    ///
    /// Unset or unparsable variables fall back to defaults.
    pub fn from_env() -> Self {
        let _ = dotenv::dotenv();
        Self {
            api_url: std::env::var("FISHO_API_URL").unwrap_or_else(|_| "http://localhost:5000".into()),
            timeout_secs: std::env::var("FISHO_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            session_path: std::env::var("FISHO_SESSION_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./.fisho/session.json")),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.trim().is_empty()),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(&self.api_url).with_timeout(self.timeout_secs)
    }

    pub fn session_store(&self) -> SessionStore {
        SessionStore::new(&self.session_path)
    }
}

impl Default for PosConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:5000".into(),
            timeout_secs: 30,
            session_path: PathBuf::from("./.fisho/session.json"),
            log_level: "info".into(),
            log_dir: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_from_pos_config() {
        let config = PosConfig {
            api_url: "https://api.fisho.in/".into(),
            timeout_secs: 5,
            ..Default::default()
        };
        let client = config.client_config();
        assert_eq!(client.base_url, "https://api.fisho.in/");
        assert_eq!(client.timeout, 5);
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.session_store().path(), config.session_path.as_path());
    }
}
