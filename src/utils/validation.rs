use crate::utils::error::{ArkitektonikaError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<Url> {
    if url_str.trim().is_empty() {
        return Err(ArkitektonikaError::InvalidConfigValue {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(url),
            scheme => Err(ArkitektonikaError::InvalidConfigValue {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(ArkitektonikaError::InvalidConfigValue {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value
        .as_ref()
        .ok_or_else(|| ArkitektonikaError::MissingConfig {
            field: field_name.to_string(),
        })
}

/// Access and deletion keys end up as a path segment, so blank keys
/// and dot segments would address a different resource entirely.
pub fn validate_key(kind: &str, key: &str) -> Result<()> {
    if key.trim().is_empty() {
        return Err(ArkitektonikaError::Validation {
            message: format!("{} key cannot be empty or whitespace-only", kind),
        });
    }
    if key == "." || key == ".." {
        return Err(ArkitektonikaError::Validation {
            message: format!("{} key cannot be '{}'", kind, key),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(ArkitektonikaError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("url", "https://example.com").is_ok());
        assert!(validate_url("url", "http://localhost:3000/api/").is_ok());
        assert!(validate_url("url", "").is_err());
        assert!(validate_url("url", "invalid-url").is_err());
        assert!(validate_url("url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_key() {
        assert!(validate_key("access", "a1b2c3").is_ok());
        assert!(validate_key("access", "").is_err());
        assert!(validate_key("deletion", "   ").is_err());
        assert!(validate_key("access", ".").is_err());
        assert!(validate_key("deletion", "..").is_err());
        assert!(validate_key("access", "...").is_ok());
        assert!(validate_key("access", ".hidden").is_ok());
    }

    #[test]
    fn test_validate_required_field() {
        let present = Some("https://example.com".to_string());
        let absent: Option<String> = None;
        assert!(validate_required_field("url", &present).is_ok());
        match validate_required_field("url", &absent) {
            Err(ArkitektonikaError::MissingConfig { field }) => assert_eq!(field, "url"),
            other => panic!("expected MissingConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("timeout_seconds", 30, 1, 3600).is_ok());
        assert!(validate_range("timeout_seconds", 0, 1, 3600).is_err());
    }
}
