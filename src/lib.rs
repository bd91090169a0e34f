pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::{Settings, TomlConfig};

pub use crate::adapters::HttpBackend;
pub use crate::app::{AdminConsole, CompareView, ComparisonPicker};
pub use crate::core::cache::{CacheKey, CachedCatalog, RefetchPolicy};
pub use crate::core::directory::{Directory, DirectoryLoad};
pub use crate::core::navigation::{Navigator, Route};
pub use crate::core::session::{Session, SessionContext};
pub use crate::domain::ports::{AdminBackend, CatalogBackend, ConfigProvider};
pub use crate::utils::error::{PortalError, Result};
