// src/web/handlers.rs
//! Route bodies. Each builds a view model from the shared source; panel
//! failures are already folded into the view, so only bad query values fail.

use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use tracing::{info, warn};

use super::types::{DashboardState, HealthResponse};
use crate::derive::{JobFilter, SortKey, VelocityFilter};
use crate::types::JobStatus;
use crate::views::digest::Digest;
use crate::views::overview::ReportExpansion;
use crate::views::{
    load_company_view, load_digest, load_directory, load_feed, load_job_directory, load_overview,
    CompanyView, DigestView, DirectoryView, FeedView, JobDirectoryView, OverviewView,
};

/// Parse an optional query value, answering 400 on garbage.
pub(crate) fn parse_param<T>(name: &str, raw: Option<&str>) -> Result<Option<T>, Status>
where
    T: std::str::FromStr<Err = String>,
{
    match raw {
        None | Some("") => Ok(None),
        Some(value) => value.parse::<T>().map(Some).map_err(|e| {
            warn!("Rejecting query parameter {}: {}", name, e);
            Status::BadRequest
        }),
    }
}

pub async fn overview_handler(state: &State<DashboardState>, expand: bool) -> Json<OverviewView> {
    let expansion = ReportExpansion {
        roles: expand,
        skills: expand,
    };
    Json(load_overview(state.source.as_ref(), expansion).await)
}

pub async fn directory_handler(
    state: &State<DashboardState>,
    velocity: Option<&str>,
    sort: Option<&str>,
) -> Result<Json<DirectoryView>, Status> {
    let velocity: VelocityFilter = parse_param("velocity", velocity)?.unwrap_or_default();
    let sort: SortKey = parse_param("sort", sort)?.unwrap_or_default();
    Ok(Json(
        load_directory(state.source.as_ref(), velocity, sort).await,
    ))
}

pub async fn jobs_handler(
    state: &State<DashboardState>,
    filter: JobFilter,
    status: Option<&str>,
) -> Result<Json<JobDirectoryView>, Status> {
    let status: Option<JobStatus> = parse_param("status", status)?;
    Ok(Json(
        load_job_directory(state.source.as_ref(), &filter, status).await,
    ))
}

pub async fn feed_handler(state: &State<DashboardState>, limit: Option<u32>) -> Json<FeedView> {
    let limit = limit.unwrap_or(state.config.feed_limit);
    Json(load_feed(state.source.as_ref(), limit).await)
}

/// A week past the stored history answers 400.
pub async fn digest_handler(
    state: &State<DashboardState>,
    week: Option<usize>,
    expand: bool,
) -> Result<Json<DigestView>, Status> {
    let week = week.unwrap_or(0);
    let view = load_digest(state.source.as_ref(), week, state.config.history_limit, expand).await;
    if let Some(Digest::OutOfRange { .. }) = view.digest.loaded() {
        return Err(Status::BadRequest);
    }
    Ok(Json(view))
}

pub async fn company_handler(
    state: &State<DashboardState>,
    slug: &str,
    function: Option<&str>,
) -> Json<CompanyView> {
    info!("Loading company panel for {}", slug);
    Json(
        load_company_view(
            state.source.as_ref(),
            slug,
            function,
            state.config.history_limit,
        )
        .await,
    )
}

pub async fn health_handler(state: &State<DashboardState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        api_base_url: state.config.api_base_url.clone(),
    })
}
