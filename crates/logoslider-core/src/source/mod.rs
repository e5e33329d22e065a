mod client;
mod models;

pub use client::SharePointClient;
pub use models::{DataSourceOption, LinkField, LogoItem, LogoRecord, SourceRecord};

use crate::Result;

/// Read-only access to a list store exposing title / link / image records
#[async_trait::async_trait]
pub trait DataSource: Send + Sync {
    /// Names of every list the store exposes
    async fn list_sources(&self) -> Result<Vec<DataSourceOption>>;

    /// Records of the named list (first page only)
    async fn list_items(&self, source_name: &str) -> Result<Vec<LogoItem>>;
}
