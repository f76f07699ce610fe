//! Service ports: traits + data contracts.

pub mod catalog;
pub mod settings;

pub use catalog::{CatalogError, CatalogRequest, CatalogResult, SnippetCatalog};
pub use settings::{Backend, ConfigError, Credentials, Settings};
