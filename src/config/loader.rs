use std::env;

use url::Url;

use super::env::{
    AppConfig, ClassifierConfig, ConfigError, ControllerConfig, DirectoryConfig, InboxConfig,
    LoggingConfig,
};

pub const DEFAULT_CLASSIFIER_URL: &str = "http://localhost:8000";

pub fn load_config() -> Result<AppConfig, ConfigError> {
    AppConfig::from_lookup(|key| env::var(key).ok())
}

impl AppConfig {
    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let raw_url =
            var("CLASSIFIER_BASE_URL").unwrap_or_else(|| DEFAULT_CLASSIFIER_URL.to_string());
        let base_url = match Url::parse(raw_url.trim()) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => url,
            _ => {
                return Err(ConfigError::InvalidUrl {
                    key: "CLASSIFIER_BASE_URL",
                    value: raw_url,
                })
            }
        };

        let submit_guard = match var("SUBMIT_GUARD") {
            Some(value) => parse_bool(&value).ok_or(ConfigError::Invalid {
                key: "SUBMIT_GUARD",
                value,
            })?,
            None => false,
        };

        Ok(Self {
            classifier: ClassifierConfig { base_url },
            inbox: InboxConfig {
                file: var("INBOX_FILE"),
            },
            controller: ControllerConfig { submit_guard },
            directories: DirectoryConfig {
                logs_dir: var("LOGS_DIR").unwrap_or_else(|| "logs".to_string()),
            },
            logging: LoggingConfig {
                level: var("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            },
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
