pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use app::client::{HrClient, ResourceClient};
pub use app::server::{router, serve};
pub use core::{CollectionStore, ConfigProvider, RemoteCollection, Resource};
pub use utils::error::{HrError, Result};
