use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArkitektonikaError {
    #[error("Failed to retrieve '{resource}'. Code: {code} ({message})")]
    ResourceRetrieval {
        resource: String,
        code: u16,
        message: String,
    },

    #[error("Failed to upload to '{resource}'. Code: {code} ({message}): {reason}")]
    ResourceUpload {
        resource: String,
        code: u16,
        message: String,
        reason: String,
    },

    #[error("Schematic rejected by '{resource}'. Code: {code} ({message})")]
    InvalidFormat {
        resource: String,
        code: u16,
        message: String,
    },

    #[error("Failed to retrieve '{resource}': {source}")]
    Transport {
        resource: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Unexpected response from '{resource}': {message}")]
    InvalidResponse { resource: String, message: String },

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Missing configuration: {field}")]
    MissingConfig { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error: {message}")]
    ConfigParse { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },
}

pub type Result<T> = std::result::Result<T, ArkitektonikaError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Remote,
    Network,
    Configuration,
    Input,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit code the CLI reports for an error of this severity.
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl ArkitektonikaError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ArkitektonikaError::Io {
            path: path.into(),
            source,
        }
    }

    /// Remote resource path the error concerns, if any.
    pub fn resource(&self) -> Option<&str> {
        match self {
            ArkitektonikaError::ResourceRetrieval { resource, .. }
            | ArkitektonikaError::ResourceUpload { resource, .. }
            | ArkitektonikaError::InvalidFormat { resource, .. }
            | ArkitektonikaError::Transport { resource, .. }
            | ArkitektonikaError::InvalidResponse { resource, .. } => Some(resource),
            _ => None,
        }
    }

    /// HTTP status code returned by the server, if the request got that far.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ArkitektonikaError::ResourceRetrieval { code, .. }
            | ArkitektonikaError::ResourceUpload { code, .. }
            | ArkitektonikaError::InvalidFormat { code, .. } => Some(*code),
            _ => None,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ArkitektonikaError::ResourceRetrieval { .. }
            | ArkitektonikaError::ResourceUpload { .. }
            | ArkitektonikaError::InvalidResponse { .. } => ErrorCategory::Remote,
            ArkitektonikaError::Transport { .. } | ArkitektonikaError::Http(_) => {
                ErrorCategory::Network
            }
            ArkitektonikaError::MissingConfig { .. }
            | ArkitektonikaError::InvalidConfigValue { .. }
            | ArkitektonikaError::ConfigParse { .. } => ErrorCategory::Configuration,
            ArkitektonikaError::InvalidFormat { .. } | ArkitektonikaError::Validation { .. } => {
                ErrorCategory::Input
            }
            ArkitektonikaError::Io { .. } | ArkitektonikaError::Serialization(_) => {
                ErrorCategory::System
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 5xx and transport failures are worth retrying
            ArkitektonikaError::ResourceRetrieval { code, .. }
            | ArkitektonikaError::ResourceUpload { code, .. }
                if *code >= 500 =>
            {
                ErrorSeverity::Medium
            }
            ArkitektonikaError::Transport { .. } => ErrorSeverity::Medium,
            ArkitektonikaError::ResourceRetrieval { .. }
            | ArkitektonikaError::ResourceUpload { .. }
            | ArkitektonikaError::InvalidFormat { .. }
            | ArkitektonikaError::InvalidResponse { .. }
            | ArkitektonikaError::Validation { .. } => ErrorSeverity::High,
            ArkitektonikaError::MissingConfig { .. }
            | ArkitektonikaError::InvalidConfigValue { .. }
            | ArkitektonikaError::ConfigParse { .. } => ErrorSeverity::High,
            ArkitektonikaError::Http(_)
            | ArkitektonikaError::Io { .. }
            | ArkitektonikaError::Serialization(_) => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ArkitektonikaError::ResourceRetrieval {
                resource, code: 404, ..
            } => format!("Nothing was found at '{}'", resource),
            ArkitektonikaError::ResourceRetrieval { resource, code, .. } => {
                format!("The server could not serve '{}' (HTTP {})", resource, code)
            }
            ArkitektonikaError::ResourceUpload { code, .. } => {
                format!("The upload was not accepted (HTTP {})", code)
            }
            ArkitektonikaError::InvalidFormat { .. } => {
                "The server rejected the file as an invalid schematic".to_string()
            }
            ArkitektonikaError::Transport { resource, .. } => {
                format!("Could not reach the server while requesting '{}'", resource)
            }
            ArkitektonikaError::InvalidResponse { resource, .. } => {
                format!("The server sent an unexpected response for '{}'", resource)
            }
            ArkitektonikaError::MissingConfig { field } => {
                format!("No {} was configured", field)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Remote => "Check the key and that the server runs a compatible Arkitektonika version",
            ErrorCategory::Network => "Check the URL and your network connection, then retry",
            ErrorCategory::Configuration => "Fix the configuration file or command line arguments",
            ErrorCategory::Input => "Check the schematic file or key you supplied",
            ErrorCategory::System => "Check file permissions and available disk space",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retrieval_message_format() {
        let err = ArkitektonikaError::ResourceRetrieval {
            resource: "/download/abc".to_string(),
            code: 500,
            message: "Internal Server Error".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to retrieve '/download/abc'. Code: 500 (Internal Server Error)"
        );
        assert_eq!(err.resource(), Some("/download/abc"));
        assert_eq!(err.status_code(), Some(500));
    }

    #[test]
    fn test_severity_by_status_code() {
        let server_side = ArkitektonikaError::ResourceRetrieval {
            resource: "/".to_string(),
            code: 503,
            message: "Service Unavailable".to_string(),
        };
        let client_side = ArkitektonikaError::ResourceRetrieval {
            resource: "/".to_string(),
            code: 403,
            message: "Forbidden".to_string(),
        };
        assert_eq!(server_side.severity(), ErrorSeverity::Medium);
        assert_eq!(client_side.severity(), ErrorSeverity::High);
    }

    #[test]
    fn test_categories() {
        let missing = ArkitektonikaError::MissingConfig {
            field: "url".to_string(),
        };
        assert_eq!(missing.category(), ErrorCategory::Configuration);
        assert_eq!(missing.resource(), None);
        assert_eq!(missing.user_friendly_message(), "No url was configured");

        let rejected = ArkitektonikaError::InvalidFormat {
            resource: "/upload".to_string(),
            code: 400,
            message: "Bad Request".to_string(),
        };
        assert_eq!(rejected.category(), ErrorCategory::Input);

        let io = ArkitektonikaError::io(
            "plot.schem",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert_eq!(io.severity(), ErrorSeverity::Critical);
    }

    #[test]
    fn test_exit_codes_by_severity() {
        let retryable = ArkitektonikaError::ResourceUpload {
            resource: "/upload".to_string(),
            code: 502,
            message: "Bad Gateway".to_string(),
            reason: "Other".to_string(),
        };
        let rejected = ArkitektonikaError::Validation {
            message: "access key cannot be empty".to_string(),
        };
        let system = ArkitektonikaError::io(
            "out.schem",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(retryable.severity().exit_code(), 2);
        assert_eq!(rejected.severity().exit_code(), 1);
        assert_eq!(system.severity().exit_code(), 3);
    }
}
