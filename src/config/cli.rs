use crate::config::toml_config::TomlConfig;
use crate::core::arkitektonika::Builder;
use crate::utils::error::{ArkitektonikaError, Result};
use crate::utils::validation::{validate_range, Validate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "arkitektonika")]
#[command(about = "Upload, inspect, download and delete schematics on an Arkitektonika instance")]
#[command(version)]
pub struct CliConfig {
    /// Base URL of the Arkitektonika instance
    #[arg(long, env = "ARKITEKTONIKA_URL", global = true)]
    pub url: Option<String>,

    /// TOML configuration file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    #[arg(long, short, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Check whether the instance speaks a compatible API version
    Compat,
    /// Upload a schematic file
    Upload { file: PathBuf },
    /// Show the status of a schematic by access key
    Status { key: String },
    /// Download a schematic by access key
    Download {
        key: String,
        /// Output file, defaults to <key>.schem
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Delete a schematic by deletion key
    Delete { key: String },
}

impl CliConfig {
    pub fn load_file_config(&self) -> Result<Option<TomlConfig>> {
        self.config.as_ref().map(TomlConfig::from_file).transpose()
    }

    /// Command line values win over the configuration file.
    pub fn builder(&self, file_config: Option<&TomlConfig>) -> Result<Builder> {
        let mut builder = file_config.map(Builder::from_config).unwrap_or_default();

        if let Some(url) = &self.url {
            builder = builder.with_url(url.clone());
        } else if file_config.is_none() {
            return Err(ArkitektonikaError::MissingConfig {
                field: "url (use --url, ARKITEKTONIKA_URL or --config)".to_string(),
            });
        }

        if let Some(seconds) = self.timeout {
            builder = builder.with_timeout(Duration::from_secs(seconds));
        }
        Ok(builder)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(timeout) = self.timeout {
            validate_range("timeout", timeout, 1, 3600)?;
        }
        if let Command::Upload { file } = &self.command {
            if file.as_os_str().is_empty() {
                return Err(ArkitektonikaError::Validation {
                    message: "Upload file path cannot be empty".to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_download_with_output() {
        let config = CliConfig::try_parse_from([
            "arkitektonika",
            "--url",
            "https://api.example.com",
            "download",
            "abc",
            "-o",
            "out.schem",
        ])
        .unwrap();
        assert_eq!(config.url.as_deref(), Some("https://api.example.com"));
        match config.command {
            Command::Download { key, output } => {
                assert_eq!(key, "abc");
                assert_eq!(output, Some(PathBuf::from("out.schem")));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let config = CliConfig::try_parse_from([
            "arkitektonika",
            "status",
            "abc",
            "--url",
            "http://localhost:3000",
            "--timeout",
            "5",
            "-v",
        ])
        .unwrap();
        assert!(config.verbose);
        assert_eq!(config.timeout, Some(5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_timeout_fails_validation() {
        let config = CliConfig::try_parse_from([
            "arkitektonika",
            "--url",
            "http://localhost:3000",
            "--timeout",
            "0",
            "compat",
        ])
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_cli_url_overrides_file() {
        let file_config = TomlConfig::from_toml_str(
            r#"
            [client]
            url = "https://from-file.example.com"
            "#,
        )
        .unwrap();
        let config = CliConfig::try_parse_from([
            "arkitektonika",
            "--url",
            "ftp://from-cli.example.com",
            "compat",
        ])
        .unwrap();
        // The CLI URL wins, so the invalid scheme surfaces at build time.
        let result = config.builder(Some(&file_config)).unwrap().build();
        assert!(matches!(
            result,
            Err(ArkitektonikaError::InvalidConfigValue { .. })
        ));
    }
}
