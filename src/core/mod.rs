// src/core/mod.rs
//! Configuration and backend access

pub mod api_client;
pub mod config_manager;
pub mod error;
pub mod pagination;
pub mod source;

pub use api_client::ApiClient;
pub use config_manager::DashboardConfig;
pub use error::ApiError;
pub use pagination::{drain_job_pages, JobPageSource, JobQuery};
pub use source::DashboardSource;
