use crate::utils::error::ArkitektonikaError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Access and deletion key pair handed out by an upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchematicKeys {
    /// Used to check the status of, and download, the schematic.
    pub access_key: String,
    /// Used to delete the schematic.
    pub deletion_key: String,
}

impl SchematicKeys {
    pub fn new(access_key: impl Into<String>, deletion_key: impl Into<String>) -> Self {
        Self {
            access_key: access_key.into(),
            deletion_key: deletion_key.into(),
        }
    }
}

/// A downloaded schematic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schematic {
    pub key: String,
    /// Raw schematic bytes, exactly as served.
    pub content: Vec<u8>,
}

impl Schematic {
    pub fn new(key: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            key: key.into(),
            content,
        }
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceStatus {
    /// The schematic exists and can be downloaded.
    Ok,
    /// No schematic was ever stored under the key.
    NonExistent,
    /// The schematic existed but has been deleted or expired.
    Deleted,
}

impl fmt::Display for ResourceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ResourceStatus::Ok => "ok",
            ResourceStatus::NonExistent => "non-existent",
            ResourceStatus::Deleted => "deleted",
        };
        f.write_str(label)
    }
}

/// Remote API versions this crate has an implementation for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ApiVersion {
    #[default]
    V1_0_0,
}

impl ApiVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiVersion::V1_0_0 => "1.0.0",
        }
    }

    /// Prefix a server-reported version must carry to be served by this API version.
    pub fn compatible_prefix(&self) -> &'static str {
        match self {
            ApiVersion::V1_0_0 => "1.",
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApiVersion {
    type Err = ArkitektonikaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1.0.0" | "1.0" | "1" | "v1" => Ok(ApiVersion::V1_0_0),
            other => Err(ArkitektonikaError::InvalidConfigValue {
                field: "api_version".to_string(),
                value: other.to_string(),
                reason: "Supported versions: 1.0.0".to_string(),
            }),
        }
    }
}

impl TryFrom<String> for ApiVersion {
    type Error = ArkitektonikaError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ApiVersion> for String {
    fn from(version: ApiVersion) -> Self {
        version.as_str().to_string()
    }
}

/// Body of `GET /`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ServerInfo {
    #[serde(default)]
    pub version: Option<String>,
}

impl ServerInfo {
    pub fn is_compatible_with(&self, version: ApiVersion) -> bool {
        self.version
            .as_deref()
            .is_some_and(|v| v.starts_with(version.compatible_prefix()))
    }
}

/// Body of a successful `POST /upload`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct UploadResponse {
    pub download_key: String,
    pub delete_key: String,
}

impl From<UploadResponse> for SchematicKeys {
    fn from(response: UploadResponse) -> Self {
        SchematicKeys::new(response.download_key, response.delete_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_info_compatibility() {
        let info: ServerInfo =
            serde_json::from_str(r#"{"version":"1.2.3","name":"arkitektonika"}"#).unwrap();
        assert!(info.is_compatible_with(ApiVersion::V1_0_0));

        let future: ServerInfo = serde_json::from_str(r#"{"version":"2.0.0"}"#).unwrap();
        assert!(!future.is_compatible_with(ApiVersion::V1_0_0));

        let unversioned: ServerInfo = serde_json::from_str("{}").unwrap();
        assert!(!unversioned.is_compatible_with(ApiVersion::V1_0_0));
    }

    #[test]
    fn test_api_version_parsing() {
        assert_eq!("1.0.0".parse::<ApiVersion>().unwrap(), ApiVersion::V1_0_0);
        assert_eq!(" v1 ".parse::<ApiVersion>().unwrap(), ApiVersion::V1_0_0);
        assert!("2.0.0".parse::<ApiVersion>().is_err());
        assert_eq!(ApiVersion::default().to_string(), "1.0.0");
    }

    #[test]
    fn test_upload_response_maps_to_keys() {
        let response: UploadResponse =
            serde_json::from_str(r#"{"download_key":"dl","delete_key":"del"}"#).unwrap();
        let keys = SchematicKeys::from(response);
        assert_eq!(keys.access_key, "dl");
        assert_eq!(keys.deletion_key, "del");
    }

    #[test]
    fn test_resource_status_display() {
        assert_eq!(ResourceStatus::Ok.to_string(), "ok");
        assert_eq!(ResourceStatus::NonExistent.to_string(), "non-existent");
        assert_eq!(ResourceStatus::Deleted.to_string(), "deleted");
    }
}
