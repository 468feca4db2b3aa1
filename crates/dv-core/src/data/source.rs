use super::{Dataset, LoadError};

/// Trait for data sources
#[async_trait::async_trait]
pub trait DataSource: Send + Sync {
    /// Parse the source and produce a cleaned dataset
    async fn load(&self) -> Result<Dataset, LoadError>;

    /// Get the source name/path
    fn source_name(&self) -> &str;
}
