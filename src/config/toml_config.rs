use crate::utils::error::{EngineError, Result};
use crate::utils::validation::{
    validate_delimiter, validate_non_empty_string, validate_one_of, validate_positive_number,
    Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: [&str; 2] = ["compact", "json"];

/// Settings of the upload server, read from a TOML file. Every section is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub server: ServerConfig,
    pub input: InputConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub delimiter: String,
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            delimiter: ",".to_string(),
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "compact".to_string(),
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EngineError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EngineError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${MATRIX_PORT})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| EngineError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn delimiter(&self) -> Result<u8> {
        validate_delimiter("input.delimiter", &self.input.delimiter)
    }

    pub fn json_logs(&self) -> bool {
        self.logging.format == "json"
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("server.host", &self.server.host)?;
        self.delimiter()?;
        validate_positive_number("input.max_upload_bytes", self.input.max_upload_bytes, 1)?;
        validate_one_of("logging.level", &self.logging.level, &LOG_LEVELS)?;
        validate_one_of("logging.format", &self.logging.format, &LOG_FORMATS)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_document() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config.server_addr(), "0.0.0.0:8080");
        assert_eq!(config.delimiter().unwrap(), b',');
        assert_eq!(config.input.max_upload_bytes, 10 * 1024 * 1024);
        assert!(!config.json_logs());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_sections() {
        let config = TomlConfig::from_toml_str(
            r#"
[server]
port = 9090

[input]
delimiter = ";"

[logging]
format = "json"
"#,
        )
        .unwrap();
        assert_eq!(config.server_addr(), "0.0.0.0:9090");
        assert_eq!(config.delimiter().unwrap(), b';');
        assert_eq!(config.input.max_upload_bytes, 10 * 1024 * 1024);
        assert!(config.json_logs());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_substitution() {
        std::env::set_var("MATRIX_CSV_TEST_HOST", "127.0.0.1");
        let config = TomlConfig::from_toml_str(
            r#"
[server]
host = "${MATRIX_CSV_TEST_HOST}"
"#,
        )
        .unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn test_unset_variable_is_left_in_place() {
        let config = TomlConfig::from_toml_str(
            r#"
[logging]
level = "${MATRIX_CSV_TEST_UNSET_LEVEL}"
"#,
        )
        .unwrap();
        assert_eq!(config.logging.level, "${MATRIX_CSV_TEST_UNSET_LEVEL}");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        let config = TomlConfig::from_toml_str("[input]\ndelimiter = \"ab\"\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(EngineError::InvalidConfigValueError { .. })
        ));

        let config = TomlConfig::from_toml_str("[input]\ndelimiter = \" \"\n").unwrap();
        assert!(config.delimiter().is_err());

        let config = TomlConfig::from_toml_str("[input]\nmax_upload_bytes = 0\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_toml() {
        let err = TomlConfig::from_toml_str("[server\nport = 1").unwrap_err();
        assert!(matches!(err, EngineError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_from_missing_file() {
        let err = TomlConfig::from_file("/nonexistent/matrix-server.toml").unwrap_err();
        assert!(matches!(err, EngineError::IoError(_)));
    }
}
