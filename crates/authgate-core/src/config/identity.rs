//! Identity provider selection and remote client configuration.

use serde::{Deserialize, Serialize};

/// Identity provider configuration.
///
/// `provider = "local"` runs the register/login flows against the local
/// credential store; `provider = "remote"` delegates both operations to a
/// remote identity service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityConfig {
    /// Which provider to use: `"local"` or `"remote"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Wall-clock budget for a single register/login flow, in seconds.
    #[serde(default = "default_flow_timeout")]
    pub flow_timeout_seconds: u64,
    /// Remote identity service settings (used when `provider = "remote"`).
    #[serde(default)]
    pub remote: RemoteConfig,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            flow_timeout_seconds: default_flow_timeout(),
            remote: RemoteConfig::default(),
        }
    }
}

/// Remote identity service client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Base URL of the remote identity service.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Application name sent with login calls.
    #[serde(default = "default_app_name")]
    pub app_name: String,
    /// Path to a PEM root CA certificate for the service, if any.
    /// Certificate provisioning is outside this process; the file is
    /// assumed to exist when the path is set.
    #[serde(default)]
    pub ca_cert_path: String,
    /// Deadline for a single attempt, in seconds.
    #[serde(default = "default_attempt_timeout")]
    pub attempt_timeout_seconds: u64,
    /// Maximum number of attempts per call.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            app_name: default_app_name(),
            ca_cert_path: String::new(),
            attempt_timeout_seconds: default_attempt_timeout(),
            max_attempts: default_max_attempts(),
        }
    }
}

fn default_provider() -> String {
    "local".to_string()
}

fn default_flow_timeout() -> u64 {
    5
}

fn default_endpoint() -> String {
    "https://localhost:44044".to_string()
}

fn default_app_name() -> String {
    "authgate".to_string()
}

fn default_attempt_timeout() -> u64 {
    10
}

fn default_max_attempts() -> u32 {
    10
}
