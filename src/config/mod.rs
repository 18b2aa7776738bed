pub mod env;
mod loader;

pub use env::{AppConfig, ClassifierConfig, ControllerConfig, DirectoryConfig};
pub use loader::load_config;
