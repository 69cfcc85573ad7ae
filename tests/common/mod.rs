#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;

use openroles_dashboard::core::{ApiError, DashboardSource, JobQuery};
use openroles_dashboard::types::{
    Company, CompanyDetail, CompanySummary, Job, JobFeedItem, SectorSummary,
};

fn decode<T: serde::de::DeserializeOwned>(value: Value) -> T {
    serde_json::from_value(value).expect("fixture matches the wire shape")
}

pub fn company(slug: &str, job_count: i64, added: Option<i64>, velocity: Option<&str>) -> Company {
    decode(json!({
        "id": "00000000-0000-4000-8000-000000000000",
        "name": slug.to_uppercase(),
        "slug": slug,
        "ats_type": "greenhouse",
        "tier": "frontier",
        "last_scraped_at": "2025-01-08T06:00:00",
        "job_count": job_count,
        "jobs_added_this_week": added,
        "jobs_removed_this_week": null,
        "hiring_velocity": velocity,
    }))
}

pub fn job(company_slug: &str, company_name: Option<&str>, title: &str) -> Job {
    decode(json!({
        "id": "00000000-0000-4000-8000-000000000001",
        "company_slug": company_slug,
        "company_name": company_name,
        "title_raw": title,
        "normalized_title": null,
        "location_raw": null,
        "function": null,
        "seniority": null,
        "team_area": null,
        "remote_policy": null,
        "job_url": null,
        "first_seen_at": "2025-01-06T10:00:00.123456",
        "removed_at": null,
    }))
}

pub fn sector(week_start: &str, added: i64, removed: i64, signals: &[&str]) -> SectorSummary {
    decode(json!({
        "id": "00000000-0000-4000-8000-000000000002",
        "week_start": week_start,
        "total_companies": 10,
        "total_active_jobs": 1000,
        "total_jobs_added": added,
        "total_jobs_removed": removed,
        "summary_text": "Hiring is up across research roles.",
        "trending_roles": ["Research Engineer"],
        "trending_skills": ["CUDA"],
        "sector_signals": signals,
        "created_at": "2025-01-07T00:00:00",
    }))
}

pub fn detail(slug: &str, profile: Option<&str>) -> CompanyDetail {
    decode(json!({
        "id": "00000000-0000-4000-8000-000000000003",
        "name": slug.to_uppercase(),
        "slug": slug,
        "ats_type": "ashby",
        "tier": "frontier",
        "last_scraped_at": null,
        "website_url": "https://example.com",
        "careers_url": null,
        "profile_markdown": profile,
        "active_jobs_count": 0,
        "jobs": [],
    }))
}

fn failure(path: &str, status: u16) -> ApiError {
    ApiError::Fetch {
        status,
        status_text: "Test failure".to_string(),
        url: format!("http://backend.test/api{}", path),
    }
}

/// In-memory backend. `None` collections fail with 503, unknown slugs with 404.
#[derive(Default)]
pub struct StubBackend {
    pub companies: Option<Vec<Company>>,
    pub details: HashMap<String, CompanyDetail>,
    pub summaries: HashMap<String, CompanySummary>,
    pub jobs: Option<Vec<Job>>,
    pub feed: Option<Vec<JobFeedItem>>,
    pub sector: Option<SectorSummary>,
    pub sector_history: Option<Vec<SectorSummary>>,
}

#[async_trait]
impl DashboardSource for StubBackend {
    async fn companies(&self) -> Result<Vec<Company>, ApiError> {
        self.companies.clone().ok_or_else(|| failure("/companies", 503))
    }

    async fn company(&self, slug: &str) -> Result<CompanyDetail, ApiError> {
        self.details
            .get(slug)
            .cloned()
            .ok_or_else(|| failure(&format!("/companies/{}", slug), 404))
    }

    async fn all_jobs(&self, _query: &JobQuery) -> Result<Vec<Job>, ApiError> {
        self.jobs.clone().ok_or_else(|| failure("/jobs", 503))
    }

    async fn jobs_feed(&self, _limit: u32) -> Result<Vec<JobFeedItem>, ApiError> {
        self.feed.clone().ok_or_else(|| failure("/jobs/feed", 503))
    }

    async fn sector_summary(&self) -> Result<SectorSummary, ApiError> {
        self.sector
            .clone()
            .ok_or_else(|| failure("/summaries/sector", 404))
    }

    async fn sector_history(&self, limit: u32) -> Result<Vec<SectorSummary>, ApiError> {
        let mut history = self
            .sector_history
            .clone()
            .ok_or_else(|| failure("/summaries/sector/history", 503))?;
        history.truncate(limit as usize);
        Ok(history)
    }

    async fn company_summary(&self, slug: &str) -> Result<CompanySummary, ApiError> {
        self.summaries
            .get(slug)
            .cloned()
            .ok_or_else(|| failure(&format!("/summaries/company/{}", slug), 500))
    }

    async fn company_summary_history(
        &self,
        slug: &str,
        _limit: u32,
    ) -> Result<Vec<CompanySummary>, ApiError> {
        Err(failure(&format!("/summaries/company/{}/history", slug), 404))
    }
}
