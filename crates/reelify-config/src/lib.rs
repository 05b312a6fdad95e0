pub mod config;
pub mod credentials;
pub mod paths;

pub use config::{ChatConfig, Config, LoggingConfig, TmdbConfig};
pub use credentials::CredentialStore;
pub use paths::{PathManager, base_path_override};
