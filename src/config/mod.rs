mod database;
mod pricing;

pub use database::StoreConfig;
pub use pricing::{CatalogOverrides, ConfigError};
