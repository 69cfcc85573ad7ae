// src/views/mod.rs
//! View models for each dashboard page.
//!
//! A page is assembled from independently fetched panels. A failed fetch
//! degrades only its own panel to `PanelState::Unavailable`.

pub mod company;
pub mod digest;
pub mod directory;
pub mod feed;
pub mod jobs;
pub mod overview;

pub use company::{load_company_view, CompanyView};
pub use digest::{load_digest, DigestView};
pub use directory::{load_directory, DirectoryView};
pub use feed::{load_feed, FeedView};
pub use jobs::{load_job_directory, JobDirectoryView};
pub use overview::{load_overview, OverviewView};

use serde::Serialize;
use tracing::warn;

use crate::core::ApiError;

/// Neutral text shown in place of a panel whose data could not be loaded.
pub const NO_DATA: &str = "No data available";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum PanelState<T> {
    Loaded(T),
    Unavailable,
}

impl<T> PanelState<T> {
    /// Contain a fetch failure at the panel boundary.
    pub fn from_result(panel: &str, result: Result<T, ApiError>) -> Self {
        match result {
            Ok(value) => PanelState::Loaded(value),
            Err(e) => {
                warn!("Panel '{}' is unavailable: {}", panel, e);
                PanelState::Unavailable
            }
        }
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            PanelState::Loaded(value) => Some(value),
            PanelState::Unavailable => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, PanelState::Loaded(_))
    }

    pub fn map<U, F>(self, f: F) -> PanelState<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            PanelState::Loaded(value) => PanelState::Loaded(f(value)),
            PanelState::Unavailable => PanelState::Unavailable,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Anomaly,
    Signal,
}

impl AlertKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertKind::Anomaly => "anomaly",
            AlertKind::Signal => "signal",
        }
    }
}

/// One entry of the signals column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    pub kind: AlertKind,
    /// Company name, or "Sector" for sector-wide signals.
    pub source: String,
    pub message: String,
}
