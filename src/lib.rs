//! Data and derivation layer of the OpenRoles hiring dashboard.
//!
//! Fetches companies, jobs and weekly summaries from the backend API, derives
//! the figures each dashboard page shows and serves them to the terminal
//! (`cli`) or over HTTP (`web`).

pub mod cli;
pub mod core;
pub mod derive;
pub mod history;
pub mod render;
pub mod selection;
pub mod types;
pub mod velocity;
pub mod views;
pub mod web;

pub use crate::core::{ApiClient, ApiError, DashboardConfig, DashboardSource};
pub use history::{History, HistoryCursor, NavigationError, Position};
pub use selection::{load_company_panel, CompanyPanel, SelectionSlot, Ticket};
pub use velocity::{classify, Velocity, VelocityLevel};
pub use views::PanelState;
pub use web::start_dashboard_server;
