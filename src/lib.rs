pub mod adapters;
#[cfg(feature = "cli")]
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use adapters::storage::LocalStorage;
pub use config::TomlConfig;
pub use crate::core::{
    arkitektonika::{Arkitektonika, Builder},
    factory::ClientFactory,
    v1::V1Client,
};
pub use domain::model::{ApiVersion, ResourceStatus, Schematic, SchematicKeys, ServerInfo};
pub use domain::ports::{ApiClient, Storage};
pub use utils::error::{ArkitektonikaError, Result};
