#[cfg(feature = "cli")]
pub mod cli;
pub mod settings;
pub mod toml_config;

pub use settings::{Settings, DEFAULT_BACKEND_URL};
pub use toml_config::TomlConfig;

#[cfg(feature = "cli")]
pub use cli::{AdminCommand, CliConfig, Command, OutputFormat};
