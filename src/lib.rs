pub mod adapters;
pub mod api;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{FsBlobStore, RestDirectory};
pub use api::registry_router;
pub use config::{FileConfig, ServerConfig};
pub use core::registry::RegistrationService;
pub use utils::error::{RegistryError, Result};
