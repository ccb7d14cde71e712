use crate::app::client::DEFAULT_API_URL;
use crate::core::ConfigProvider;
use crate::utils::error::{HrError, Result};
use crate::utils::validation::{
    validate_one_of, validate_positive_number, validate_required_field, validate_socket_addr,
    validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub backend: BackendConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    pub base_url: String,
    pub token: Option<String>,
    pub timeout_seconds: Option<u64>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            token: None,
            timeout_seconds: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `trace`, `debug`, `info`, `warn` or `error` for this crate's targets
    pub level: Option<String>,
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(HrError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| HrError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${HR_API_TOKEN})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| HrError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    pub fn verbose(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.verbose)
            .unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    // 驗證後必定存在
    fn bind_address(&self) -> &str {
        self.server.bind.as_deref().unwrap_or_default()
    }

    fn api_base_url(&self) -> &str {
        &self.backend.base_url
    }

    fn request_timeout_secs(&self) -> u64 {
        self.backend.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECS)
    }

    // 未解析的 ${VAR} 視為沒有 token
    fn api_token(&self) -> Option<&str> {
        self.backend
            .token
            .as_deref()
            .filter(|t| !t.trim().is_empty() && !t.starts_with("${"))
    }

    fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }

    fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        let bind = validate_required_field("server.bind", &self.server.bind)?;
        validate_socket_addr("server.bind", bind)?;
        validate_url("backend.base_url", &self.backend.base_url)?;
        if let Some(timeout) = self.backend.timeout_seconds {
            validate_positive_number("backend.timeout_seconds", timeout, 1)?;
        }
        if let Some(level) = self.log_level() {
            validate_one_of("logging.level", level, &LOG_LEVELS)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[server]
bind = "0.0.0.0:8081"

[backend]
base_url = "https://hr.example.com/api"
timeout_seconds = 10

[logging]
level = "warn"
json = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.bind_address(), "0.0.0.0:8081");
        assert_eq!(config.api_base_url(), "https://hr.example.com/api");
        assert_eq!(config.request_timeout_secs(), 10);
        assert!(config.json_logs());
        assert!(!config.verbose());
        assert_eq!(config.log_level(), Some("warn"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_bind_is_reported() {
        let toml_content = r#"
[backend]
base_url = "http://localhost:8080/api"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, HrError::MissingConfigError { ref field } if field == "server.bind"));
    }

    #[test]
    fn test_unknown_log_level_is_rejected() {
        let toml_content = r#"
[server]
bind = "127.0.0.1:3000"

[logging]
level = "loud"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(HrError::InvalidConfigValueError { ref field, .. }) if field == "logging.level"
        ));
    }

    #[test]
    fn test_backend_section_defaults() {
        let config = TomlConfig::from_toml_str("[server]\nbind = \"127.0.0.1:3000\"\n").unwrap();
        assert_eq!(config.api_base_url(), DEFAULT_API_URL);
        assert_eq!(config.request_timeout_secs(), DEFAULT_TIMEOUT_SECS);
        assert!(config.api_token().is_none());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("HR_DASHBOARD_TEST_TOKEN", "secret-token");

        let toml_content = r#"
[server]
bind = "127.0.0.1:3000"

[backend]
base_url = "http://localhost:8080/api"
token = "${HR_DASHBOARD_TEST_TOKEN}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.api_token(), Some("secret-token"));

        std::env::remove_var("HR_DASHBOARD_TEST_TOKEN");
    }

    #[test]
    fn test_unresolved_token_is_ignored() {
        let toml_content = r#"
[server]
bind = "127.0.0.1:3000"

[backend]
base_url = "http://localhost:8080/api"
token = "${HR_DASHBOARD_UNSET_VARIABLE}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.api_token().is_none());
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[server]
bind = "127.0.0.1:3000"

[backend]
base_url = "invalid-url"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[server]\nbind = \"127.0.0.1:4000\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.bind_address(), "127.0.0.1:4000");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = TomlConfig::from_file("/nonexistent/hr-dashboard.toml").unwrap_err();
        assert!(matches!(err, HrError::IoError(_)));
    }
}
