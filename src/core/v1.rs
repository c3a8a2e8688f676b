use crate::core::{ApiClient, ApiVersion, ResourceStatus, Schematic, SchematicKeys};
use crate::domain::model::{ServerInfo, UploadResponse};
use crate::utils::error::{ArkitektonikaError, Result};
use crate::utils::validation::validate_key;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, StatusCode};
use url::Url;

const SCHEMATIC_FIELD: &str = "schematic";
const SCHEMATIC_FILENAME: &str = "plot.schem";
const SCHEMATIC_MIME: &str = "application/octet-stream";

/// Client for Arkitektonika 1.x instances.
#[derive(Debug, Clone)]
pub struct V1Client {
    base_url: Url,
    client: Client,
}

impl V1Client {
    pub fn new(base_url: Url, client: Client) -> Self {
        Self {
            base_url: normalize_base(base_url),
            client,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        if segments.is_empty() {
            return Ok(url);
        }
        url.path_segments_mut()
            .map_err(|_| ArkitektonikaError::InvalidConfigValue {
                field: "url".to_string(),
                value: self.base_url.to_string(),
                reason: "URL cannot be used as a base".to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send(&self, resource: &str, request: reqwest::RequestBuilder) -> Result<Response> {
        let response = request
            .send()
            .await
            .map_err(|source| ArkitektonikaError::Transport {
                resource: resource.to_string(),
                source,
            })?;
        tracing::debug!("{} -> {}", resource, response.status());
        Ok(response)
    }

    async fn body(resource: &str, response: Response) -> Result<Vec<u8>> {
        let bytes = response
            .bytes()
            .await
            .map_err(|source| ArkitektonikaError::Transport {
                resource: resource.to_string(),
                source,
            })?;
        Ok(bytes.to_vec())
    }

    async fn json<T: serde::de::DeserializeOwned>(resource: &str, response: Response) -> Result<T> {
        let body = Self::body(resource, response).await?;
        serde_json::from_slice(&body).map_err(|e| ArkitektonikaError::InvalidResponse {
            resource: resource.to_string(),
            message: e.to_string(),
        })
    }
}

/// Base URLs always end in `/` so the root resource is the base itself.
fn normalize_base(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

fn status_text(status: StatusCode) -> String {
    status.canonical_reason().unwrap_or("Unknown").to_string()
}

fn retrieval_error(resource: &str, status: StatusCode) -> ArkitektonikaError {
    ArkitektonikaError::ResourceRetrieval {
        resource: resource.to_string(),
        code: status.as_u16(),
        message: status_text(status),
    }
}

#[async_trait]
impl ApiClient for V1Client {
    fn api_version(&self) -> ApiVersion {
        ApiVersion::V1_0_0
    }

    async fn check_compatibility(&self) -> Result<bool> {
        let resource = "/";
        tracing::debug!("Checking compatibility of {}", self.base_url);
        let response = self
            .send(resource, self.client.get(self.endpoint(&[])?))
            .await?;

        if response.status() != StatusCode::OK {
            return Err(retrieval_error(resource, response.status()));
        }

        let info: ServerInfo = Self::json(resource, response).await?;
        let compatible = info.is_compatible_with(self.api_version());
        if !compatible {
            tracing::warn!(
                "Remote reports version {:?}, expected {}x",
                info.version,
                self.api_version().compatible_prefix()
            );
        }
        Ok(compatible)
    }

    async fn upload(&self, content: Vec<u8>) -> Result<SchematicKeys> {
        let resource = "/upload";
        tracing::debug!("Uploading schematic ({} bytes)", content.len());

        let part = Part::bytes(content)
            .file_name(SCHEMATIC_FILENAME)
            .mime_str(SCHEMATIC_MIME)?;
        let form = Form::new().part(SCHEMATIC_FIELD, part);

        let request = self.client.post(self.endpoint(&["upload"])?).multipart(form);
        let response = self.send(resource, request).await?;

        match response.status() {
            StatusCode::OK => {
                let keys: UploadResponse = Self::json(resource, response).await?;
                Ok(keys.into())
            }
            StatusCode::BAD_REQUEST => Err(ArkitektonikaError::InvalidFormat {
                resource: resource.to_string(),
                code: 400,
                message: status_text(StatusCode::BAD_REQUEST),
            }),
            status => Err(ArkitektonikaError::ResourceUpload {
                resource: resource.to_string(),
                code: status.as_u16(),
                message: status_text(status),
                reason: "Other".to_string(),
            }),
        }
    }

    async fn check_status(&self, key: &str) -> Result<ResourceStatus> {
        validate_key("access", key)?;
        let resource = format!("/download/{}", key);
        let request = self.client.head(self.endpoint(&["download", key])?);
        let response = self.send(&resource, request).await?;

        match response.status() {
            StatusCode::OK => Ok(ResourceStatus::Ok),
            StatusCode::NOT_FOUND => Ok(ResourceStatus::NonExistent),
            StatusCode::GONE => Ok(ResourceStatus::Deleted),
            status => Err(retrieval_error(&resource, status)),
        }
    }

    async fn delete(&self, key: &str) -> Result<()> {
        validate_key("deletion", key)?;
        let resource = format!("/delete/{}", key);
        let request = self.client.delete(self.endpoint(&["delete", key])?);
        let response = self.send(&resource, request).await?;

        if response.status() != StatusCode::OK {
            return Err(retrieval_error(&resource, response.status()));
        }
        Ok(())
    }

    async fn download(&self, key: &str) -> Result<Schematic> {
        validate_key("access", key)?;
        let resource = format!("/download/{}", key);
        let request = self.client.get(self.endpoint(&["download", key])?);
        let response = self.send(&resource, request).await?;

        if response.status() != StatusCode::OK {
            return Err(retrieval_error(&resource, response.status()));
        }

        let content = Self::body(&resource, response).await?;
        tracing::debug!("Downloaded {} ({} bytes)", key, content.len());
        Ok(Schematic::new(key, content))
    }
}
