// src/web/types.rs
use serde::Serialize;
use std::sync::Arc;

use crate::core::{DashboardConfig, DashboardSource};

/// Managed Rocket state shared by every route.
pub struct DashboardState {
    pub config: DashboardConfig,
    pub source: Arc<dyn DashboardSource>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub api_base_url: String,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub error_code: String,
    pub suggestions: Vec<String>,
}

impl ErrorResponse {
    pub fn new(error: &str, error_code: &str, suggestions: &[&str]) -> Self {
        Self {
            success: false,
            error: error.to_string(),
            error_code: error_code.to_string(),
            suggestions: suggestions.iter().map(|s| s.to_string()).collect(),
        }
    }
}
