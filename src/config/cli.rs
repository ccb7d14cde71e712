use crate::app::client::DEFAULT_API_URL;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_positive_number, validate_socket_addr, validate_url, Validate,
};
use clap::{Args, Parser};
use serde::{Deserialize, Serialize};

pub const DEFAULT_BIND: &str = "127.0.0.1:3000";

/// Flags shared by both binaries.
#[derive(Debug, Clone, Serialize, Deserialize, Args)]
pub struct BackendArgs {
    #[arg(long, default_value = DEFAULT_API_URL)]
    pub api_url: String,

    #[arg(long, default_value = "30")]
    pub request_timeout_secs: u64,

    #[arg(long, help = "Bearer token for the remote backend")]
    pub token: Option<String>,

    #[arg(long, help = "Load settings from a TOML file instead of flags")]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "hr-dashboard")]
#[command(about = "Mock HR REST API and client for the HR dashboard backend")]
pub struct CliConfig {
    #[arg(long, default_value = DEFAULT_BIND)]
    pub bind: String,

    #[command(flatten)]
    #[serde(flatten)]
    pub backend: BackendArgs,
}

/// The client never listens, so it runs with the default bind address.
impl From<BackendArgs> for CliConfig {
    fn from(backend: BackendArgs) -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            backend,
        }
    }
}

impl ConfigProvider for CliConfig {
    fn bind_address(&self) -> &str {
        &self.bind
    }

    fn api_base_url(&self) -> &str {
        &self.backend.api_url
    }

    fn request_timeout_secs(&self) -> u64 {
        self.backend.request_timeout_secs
    }

    fn api_token(&self) -> Option<&str> {
        self.backend.token.as_deref()
    }

    fn json_logs(&self) -> bool {
        self.backend.json_logs
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_socket_addr("bind", &self.bind)?;
        validate_url("api_url", &self.backend.api_url)?;
        validate_positive_number("request_timeout_secs", self.backend.request_timeout_secs, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CliConfig::parse_from(["hr-dashboard"]);
        assert_eq!(config.bind_address(), "127.0.0.1:3000");
        assert_eq!(config.api_base_url(), DEFAULT_API_URL);
        assert_eq!(config.request_timeout_secs(), 30);
        assert!(config.api_token().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_backend_args_use_default_bind() {
        let config = CliConfig::from(BackendArgs {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout_secs: 5,
            token: Some("t".into()),
            config: None,
            verbose: false,
            json_logs: false,
        });
        assert_eq!(config.bind_address(), DEFAULT_BIND);
        assert_eq!(config.api_token(), Some("t"));
    }

    #[test]
    fn test_invalid_bind_is_rejected() {
        let config = CliConfig::parse_from(["hr-dashboard", "--bind", "nowhere"]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let config = CliConfig::parse_from(["hr-dashboard", "--request-timeout-secs", "0"]);
        assert!(config.validate().is_err());
    }
}
