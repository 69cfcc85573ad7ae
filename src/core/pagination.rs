// src/core/pagination.rs
//! Auto-draining of the offset-paginated `/api/jobs` endpoint.

use async_trait::async_trait;
use tracing::{debug, warn};

use super::error::ApiError;
use crate::types::{Job, JobPage, JobStatus};

/// Filters forwarded to `/api/jobs`. Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobQuery {
    pub company: Option<String>,
    pub function: Option<String>,
    pub seniority: Option<String>,
    pub status: Option<JobStatus>,
}

impl JobQuery {
    pub fn for_company(slug: &str) -> Self {
        Self {
            company: Some(slug.to_string()),
            ..Self::default()
        }
    }

    pub fn with_status(mut self, status: JobStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Query pairs in the order the backend documents them.
    pub fn to_params(&self, limit: u64, offset: u64) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(company) = &self.company {
            params.push(("company", company.clone()));
        }
        if let Some(function) = &self.function {
            params.push(("function", function.clone()));
        }
        if let Some(seniority) = &self.seniority {
            params.push(("seniority", seniority.clone()));
        }
        if let Some(status) = self.status {
            params.push(("status", status.as_str().to_string()));
        }
        params.push(("limit", limit.to_string()));
        params.push(("offset", offset.to_string()));
        params
    }
}

/// Anything that can serve one page of jobs.
#[async_trait]
pub trait JobPageSource {
    async fn fetch_job_page(
        &self,
        query: &JobQuery,
        limit: u64,
        offset: u64,
    ) -> Result<JobPage, ApiError>;
}

/// Fetch pages of `page_size` until the reported total is reached or a short
/// page arrives, whichever comes first.
///
/// A short page ends the loop even when `total` claims more rows. `max_pages`
/// is a hard stop for a server that keeps returning full pages.
pub async fn drain_job_pages<S>(
    source: &S,
    query: &JobQuery,
    page_size: u64,
    max_pages: u32,
) -> Result<Vec<Job>, ApiError>
where
    S: JobPageSource + Sync + ?Sized,
{
    let page_size = page_size.max(1);
    let mut jobs: Vec<Job> = Vec::new();
    let mut offset = 0u64;

    for page_index in 0..max_pages {
        let page = source.fetch_job_page(query, page_size, offset).await?;
        let received = page.jobs.len() as u64;
        jobs.extend(page.jobs);

        debug!(
            "Fetched jobs page {} (offset={}, received={}, total={})",
            page_index, offset, received, page.total
        );

        if jobs.len() as u64 >= page.total || received < page_size {
            return Ok(jobs);
        }
        offset += page_size;
    }

    warn!(
        "Stopped draining jobs after {} pages with {} rows collected",
        max_pages,
        jobs.len()
    );
    Ok(jobs)
}
