use crate::utils::error::Result;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str = concat!("arkitektonika-rs/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub fn build_http_client(user_agent: &str, timeout: Duration) -> Result<Client> {
    let mut default_headers = HeaderMap::new();
    default_headers.insert(ACCEPT, HeaderValue::from_static("application/json, */*"));

    let client = Client::builder()
        .user_agent(user_agent)
        .default_headers(default_headers)
        .timeout(timeout)
        .build()?;
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        assert!(build_http_client(DEFAULT_USER_AGENT, DEFAULT_TIMEOUT).is_ok());
        assert!(DEFAULT_USER_AGENT.starts_with("arkitektonika-rs/"));
    }
}
