// src/web/mod.rs

pub mod handlers;
pub mod types;

pub use types::*;

use crate::core::{ApiClient, DashboardConfig};
use crate::derive::JobFilter;
use crate::views::{
    CompanyView, DigestView, DirectoryView, FeedView, JobDirectoryView, OverviewView,
};
use anyhow::{Context, Result};
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{Header, Status};
use rocket::serde::json::Json;
use rocket::{catchers, get, options, routes, Build, Request, Response, Rocket, State};
use std::sync::Arc;
use tracing::info;

// CORS Fairing
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new("Access-Control-Allow-Methods", "GET, OPTIONS"));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
    }
}

#[get("/overview?<expand>")]
pub async fn overview(state: &State<DashboardState>, expand: Option<bool>) -> Json<OverviewView> {
    handlers::overview_handler(state, expand.unwrap_or(false)).await
}

#[get("/companies?<velocity>&<sort>")]
pub async fn companies(
    state: &State<DashboardState>,
    velocity: Option<&str>,
    sort: Option<&str>,
) -> Result<Json<DirectoryView>, Status> {
    handlers::directory_handler(state, velocity, sort).await
}

#[get("/jobs?<search>&<company>&<function>&<status>")]
pub async fn jobs(
    state: &State<DashboardState>,
    search: Option<String>,
    company: Option<String>,
    function: Option<String>,
    status: Option<&str>,
) -> Result<Json<JobDirectoryView>, Status> {
    let filter = JobFilter {
        search,
        company,
        function,
    };
    handlers::jobs_handler(state, filter, status).await
}

#[get("/feed?<limit>")]
pub async fn feed(state: &State<DashboardState>, limit: Option<u32>) -> Json<FeedView> {
    handlers::feed_handler(state, limit).await
}

#[get("/digest?<week>&<expand>")]
pub async fn digest(
    state: &State<DashboardState>,
    week: Option<usize>,
    expand: Option<bool>,
) -> Result<Json<DigestView>, Status> {
    handlers::digest_handler(state, week, expand.unwrap_or(false)).await
}

#[get("/companies/<slug>?<function>")]
pub async fn company(
    state: &State<DashboardState>,
    slug: &str,
    function: Option<&str>,
) -> Json<CompanyView> {
    handlers::company_handler(state, slug, function).await
}

#[get("/health")]
pub async fn health(state: &State<DashboardState>) -> Json<HealthResponse> {
    handlers::health_handler(state).await
}

#[options("/<_..>")]
pub async fn options() -> Status {
    Status::Ok
}

// Error catchers
#[rocket::catch(400)]
pub fn bad_request() -> Json<ErrorResponse> {
    Json(ErrorResponse::new(
        "Invalid query parameter",
        "BAD_REQUEST",
        &[
            "velocity: all, up, down, stable",
            "sort: jobs, delta, name",
            "status: active, removed, added_this_week",
            "week: 0 is the current week, up to the stored history length minus one",
        ],
    ))
}

#[rocket::catch(404)]
pub fn not_found() -> Json<ErrorResponse> {
    Json(ErrorResponse::new("Route not found", "NOT_FOUND", &[]))
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<ErrorResponse> {
    Json(ErrorResponse::new(
        "Internal server error",
        "INTERNAL_ERROR",
        &["Try again in a few moments"],
    ))
}

/// Assemble the dashboard service around an already-built state.
pub fn build_rocket(state: DashboardState) -> Rocket<Build> {
    let figment = rocket::Config::figment()
        .merge(("address", "0.0.0.0"))
        .merge(("port", state.config.port));

    rocket::custom(figment)
        .attach(Cors)
        .manage(state)
        .register("/dashboard", catchers![bad_request, not_found, internal_error])
        .mount(
            "/dashboard",
            routes![overview, companies, jobs, feed, digest, company, health, options],
        )
}

pub async fn start_dashboard_server(config: DashboardConfig) -> Result<()> {
    let client = ApiClient::new(&config).context("Failed to create API client")?;

    info!("Starting dashboard server on port {}", config.port);
    info!("Backend: {}", client.base_url());

    let state = DashboardState {
        config,
        source: Arc::new(client),
    };

    build_rocket(state)
        .launch()
        .await
        .map_err(|e| anyhow::anyhow!("Dashboard server failed: {}", e))?;

    Ok(())
}
