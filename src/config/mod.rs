//! Application configuration

mod app_config;

pub use app_config::{
    AiConfig, AppConfig, IdentityConfig, LogFormat, LoggingConfig, ServerConfig, StorageBackend,
    StorageConfig, DEFAULT_SESSION_SECRET,
};
