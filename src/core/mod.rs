pub mod arkitektonika;
pub mod factory;
pub mod v1;

pub use crate::domain::model::{ApiVersion, ResourceStatus, Schematic, SchematicKeys};
pub use crate::domain::ports::{ApiClient, Storage};
pub use crate::utils::error::Result;
