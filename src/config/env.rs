use thiserror::Error;
use url::Url;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub classifier: ClassifierConfig,
    pub inbox: InboxConfig,
    pub controller: ControllerConfig,
    pub directories: DirectoryConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    pub base_url: Url,
}

#[derive(Debug, Clone, Default)]
pub struct InboxConfig {
    /// JSON file with the selectable entries. The bundled samples are used when unset.
    pub file: Option<String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ControllerConfig {
    pub submit_guard: bool,
}

#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    pub logs_dir: String,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} is not a valid http(s) url: {value}")]
    InvalidUrl { key: &'static str, value: String },
    #[error("{key} has an invalid value: {value}")]
    Invalid { key: &'static str, value: String },
}
