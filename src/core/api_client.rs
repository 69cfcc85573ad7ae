// src/core/api_client.rs
//! Typed GET client for the OpenRoles backend API.

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error, info};

use super::config_manager::DashboardConfig;
use super::error::ApiError;
use super::pagination::{drain_job_pages, JobPageSource, JobQuery};
use crate::types::{
    Company, CompanyDetail, CompanySummary, Job, JobFeedItem, JobPage, SectorSummary,
};

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: Url,
    page_size: u64,
    max_pages: u32,
}

impl ApiClient {
    pub fn new(config: &DashboardConfig) -> Result<Self, ApiError> {
        let base_url = Url::parse(&config.api_base_url)
            .map_err(|e| ApiError::InvalidBaseUrl(format!("{}: {}", config.api_base_url, e)))?;

        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl(config.api_base_url.clone()));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(ApiError::Client)?;

        Ok(Self {
            client,
            base_url,
            page_size: config.page_size,
            max_pages: config.max_pages,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Build `{base}/api/{segments...}?{params}` with each segment escaped.
    pub fn endpoint_url(
        &self,
        segments: &[&str],
        params: &[(&str, String)],
    ) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push("api")
            .extend(segments);

        if !params.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(params.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }

    /// GET an endpoint and decode its JSON body.
    pub async fn get<R>(&self, segments: &[&str], params: &[(&str, String)]) -> Result<R, ApiError>
    where
        R: DeserializeOwned,
    {
        let url = self.endpoint_url(segments, params)?;
        debug!("GET {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            error!("Backend returned {} for {}", status, url);
            return Err(status_error(url.as_str(), status));
        }

        let body = response.text().await.map_err(|source| ApiError::Transport {
            url: url.to_string(),
            source,
        })?;

        decode_body(url.as_str(), &body)
    }

    pub async fn companies(&self) -> Result<Vec<Company>, ApiError> {
        let companies: Vec<Company> = self.get(&["companies"], &[]).await?;
        info!("Loaded {} companies", companies.len());
        Ok(companies)
    }

    pub async fn company(&self, slug: &str) -> Result<CompanyDetail, ApiError> {
        self.get(&["companies", slug], &[]).await
    }

    pub async fn jobs_page(
        &self,
        query: &JobQuery,
        limit: u64,
        offset: u64,
    ) -> Result<JobPage, ApiError> {
        self.get(&["jobs"], &query.to_params(limit, offset)).await
    }

    /// Every job matching `query`, drained page by page.
    pub async fn all_jobs(&self, query: &JobQuery) -> Result<Vec<Job>, ApiError> {
        let jobs = drain_job_pages(self, query, self.page_size, self.max_pages).await?;
        info!("Loaded {} jobs", jobs.len());
        Ok(jobs)
    }

    pub async fn jobs_feed(&self, limit: u32) -> Result<Vec<JobFeedItem>, ApiError> {
        self.get(&["jobs", "feed"], &[("limit", limit.to_string())])
            .await
    }

    pub async fn sector_summary(&self) -> Result<SectorSummary, ApiError> {
        self.get(&["summaries", "sector"], &[]).await
    }

    /// Newest first.
    pub async fn sector_history(&self, limit: u32) -> Result<Vec<SectorSummary>, ApiError> {
        self.get(
            &["summaries", "sector", "history"],
            &[("limit", limit.to_string())],
        )
        .await
    }

    pub async fn company_summary(&self, slug: &str) -> Result<CompanySummary, ApiError> {
        self.get(&["summaries", "company", slug], &[]).await
    }

    /// Newest first.
    pub async fn company_summary_history(
        &self,
        slug: &str,
        limit: u32,
    ) -> Result<Vec<CompanySummary>, ApiError> {
        self.get(
            &["summaries", "company", slug, "history"],
            &[("limit", limit.to_string())],
        )
        .await
    }
}

#[async_trait]
impl JobPageSource for ApiClient {
    async fn fetch_job_page(
        &self,
        query: &JobQuery,
        limit: u64,
        offset: u64,
    ) -> Result<JobPage, ApiError> {
        self.jobs_page(query, limit, offset).await
    }
}

pub(crate) fn status_error(url: &str, status: StatusCode) -> ApiError {
    ApiError::Fetch {
        status: status.as_u16(),
        status_text: status.canonical_reason().unwrap_or("Unknown").to_string(),
        url: url.to_string(),
    }
}

pub(crate) fn decode_body<R>(url: &str, body: &str) -> Result<R, ApiError>
where
    R: DeserializeOwned,
{
    serde_json::from_str(body).map_err(|source| ApiError::Decode {
        url: url.to_string(),
        source,
    })
}
