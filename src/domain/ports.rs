use crate::domain::model::{ApiVersion, ResourceStatus, Schematic, SchematicKeys};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Arkitektonika REST client, one implementation per API version.
#[async_trait]
pub trait ApiClient: Send + Sync {
    fn api_version(&self) -> ApiVersion;

    /// Whether the remote instance speaks this client's API version.
    async fn check_compatibility(&self) -> Result<bool>;

    /// Upload a schematic and return the keys generated for it.
    async fn upload(&self, content: Vec<u8>) -> Result<SchematicKeys>;

    async fn check_status(&self, key: &str) -> Result<ResourceStatus>;

    /// Delete the schematic identified by a deletion key.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Download the schematic identified by an access key.
    async fn download(&self, key: &str) -> Result<Schematic>;
}
