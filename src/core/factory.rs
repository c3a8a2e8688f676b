use crate::core::v1::V1Client;
use crate::core::{ApiClient, ApiVersion};
use reqwest::Client;
use std::sync::Arc;
use url::Url;

/// Constructs the [`ApiClient`] implementation for an API version.
#[derive(Debug, Default, Clone, Copy)]
pub struct ClientFactory;

impl ClientFactory {
    pub fn new() -> Self {
        Self
    }

    pub fn get_client(&self, version: ApiVersion, base_url: Url, http: Client) -> Arc<dyn ApiClient> {
        match version {
            ApiVersion::V1_0_0 => Arc::new(V1Client::new(base_url, http)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_returns_client_for_version() {
        let client = ClientFactory::new().get_client(
            ApiVersion::V1_0_0,
            Url::parse("https://api.example.com").unwrap(),
            Client::new(),
        );
        assert_eq!(client.api_version(), ApiVersion::V1_0_0);
    }
}
