use crate::adapters::http::{build_http_client, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
use crate::config::toml_config::TomlConfig;
use crate::core::factory::ClientFactory;
use crate::core::{ApiClient, ApiVersion, ResourceStatus, Schematic, SchematicKeys, Storage};
use crate::utils::error::{ArkitektonikaError, Result};
use crate::utils::validation::{validate_required_field, validate_url};
use reqwest::Client;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Arkitektonika client.
///
/// Cloning is cheap; clones share the underlying connection pool.
///
/// ```no_run
/// # async fn run() -> arkitektonika::Result<()> {
/// let arkitektonika = arkitektonika::Arkitektonika::builder()
///     .with_url("https://api.schematic.cloud/")
///     .build()?;
/// let keys = arkitektonika.upload_file("plot.schem").await?;
/// println!("download key: {}", keys.access_key);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Arkitektonika {
    client: Arc<dyn ApiClient>,
}

impl std::fmt::Debug for Arkitektonika {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Arkitektonika")
            .field("api_version", &self.client.api_version())
            .finish()
    }
}

impl Arkitektonika {
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Wrap an existing client implementation.
    pub fn from_client(client: Arc<dyn ApiClient>) -> Self {
        Self { client }
    }

    /// The internal client. Prefer the methods on [`Arkitektonika`].
    pub fn client(&self) -> &Arc<dyn ApiClient> {
        &self.client
    }

    pub fn api_version(&self) -> ApiVersion {
        self.client.api_version()
    }

    /// Check if the configured address is compatible with this client.
    pub async fn is_compatible(&self) -> Result<bool> {
        self.client.check_compatibility().await
    }

    /// Upload raw schematic bytes and return the generated keys.
    pub async fn upload(&self, content: impl Into<Vec<u8>>) -> Result<SchematicKeys> {
        self.client.upload(content.into()).await
    }

    pub async fn upload_file(&self, path: impl AsRef<Path>) -> Result<SchematicKeys> {
        let path = path.as_ref();
        let content = tokio::fs::read(path)
            .await
            .map_err(|e| ArkitektonikaError::io(path, e))?;
        self.upload(content).await
    }

    /// Upload a schematic read from `storage`.
    pub async fn upload_from<S: Storage>(&self, storage: &S, path: &str) -> Result<SchematicKeys> {
        let content = storage.read_file(path).await?;
        self.upload(content).await
    }

    pub async fn check_status(&self, key: &str) -> Result<ResourceStatus> {
        self.client.check_status(key).await
    }

    pub async fn delete(&self, key: &str) -> Result<()> {
        self.client.delete(key).await
    }

    pub async fn download(&self, key: &str) -> Result<Schematic> {
        self.client.download(key).await
    }

    /// Download a schematic and write it to `path` in `storage`.
    pub async fn download_to<S: Storage>(&self, key: &str, storage: &S, path: &str) -> Result<Schematic> {
        let schematic = self.download(key).await?;
        storage.write_file(path, &schematic.content).await?;
        Ok(schematic)
    }
}

/// Builder for [`Arkitektonika`] instances.
#[derive(Debug, Clone)]
pub struct Builder {
    url: Option<String>,
    version: ApiVersion,
    timeout: Duration,
    user_agent: String,
    http_client: Option<Client>,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            url: None,
            version: ApiVersion::default(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            http_client: None,
        }
    }
}

impl Builder {
    /// Seed a builder from a loaded configuration file.
    pub fn from_config(config: &TomlConfig) -> Self {
        let mut builder = Self::default()
            .with_url(config.client.url.clone())
            .with_version(config.client.api_version);
        if let Some(seconds) = config.client.timeout_seconds {
            builder = builder.with_timeout(Duration::from_secs(seconds));
        }
        if let Some(user_agent) = &config.client.user_agent {
            builder = builder.with_user_agent(user_agent.clone());
        }
        builder
    }

    /// Base URL of the Arkitektonika instance.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// API version the remote instance uses.
    pub fn with_version(mut self, version: ApiVersion) -> Self {
        self.version = version;
        self
    }

    /// Ignored when a client is supplied through [`Builder::with_http_client`].
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Ignored when a client is supplied through [`Builder::with_http_client`].
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Fails if no URL was specified or it is not an http(s) URL.
    pub fn build(self) -> Result<Arkitektonika> {
        let url = validate_required_field("url", &self.url)?;
        let base_url = validate_url("url", url)?;

        let http = match self.http_client {
            Some(client) => client,
            None => build_http_client(&self.user_agent, self.timeout)?,
        };

        tracing::debug!("Creating Arkitektonika {} client for {}", self.version, base_url);
        let client = ClientFactory::new().get_client(self.version, base_url, http);
        Ok(Arkitektonika { client })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_without_url_fails() {
        match Arkitektonika::builder().build() {
            Err(ArkitektonikaError::MissingConfig { field }) => assert_eq!(field, "url"),
            other => panic!("expected MissingConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_build_rejects_non_http_url() {
        let result = Arkitektonika::builder().with_url("ftp://example.com").build();
        assert!(matches!(
            result,
            Err(ArkitektonikaError::InvalidConfigValue { .. })
        ));
    }

    #[test]
    fn test_build_defaults() {
        let arkitektonika = Arkitektonika::builder()
            .with_url("https://api.example.com")
            .with_timeout(Duration::from_secs(5))
            .with_user_agent("test-agent/1.0")
            .build()
            .unwrap();
        assert_eq!(arkitektonika.api_version(), ApiVersion::V1_0_0);
    }
}
