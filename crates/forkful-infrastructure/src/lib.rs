//! Infrastructure layer: concrete I/O behind the core traits.
//!
//! Provides the JSON-file session snapshot repository, the reqwest client
//! for the remote recipe service, configuration loading, and path
//! management.

pub mod config_service;
pub mod http_api;
pub mod paths;
pub mod session_repository;

pub use config_service::{ClientConfig, ConfigService};
pub use http_api::HttpRecipeApi;
pub use paths::ForkfulPaths;
pub use session_repository::JsonSnapshotRepository;
