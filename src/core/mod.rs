pub mod cache;
pub mod directory;
pub mod navigation;
pub mod search;
pub mod selection;
pub mod session;
pub mod table;

#[cfg(test)]
pub(crate) mod testing;

pub use crate::domain::model::College;
pub use crate::domain::ports::{AdminBackend, CatalogBackend, ConfigProvider};
pub use crate::utils::error::Result;
