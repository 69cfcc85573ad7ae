// src/core/source.rs
use async_trait::async_trait;

use super::api_client::ApiClient;
use super::error::ApiError;
use super::pagination::JobQuery;
use crate::types::{Company, CompanyDetail, CompanySummary, Job, JobFeedItem, SectorSummary};

/// Everything the dashboard reads from the backend.
///
/// `ApiClient` is the production implementation; view loaders only see this
/// trait.
#[async_trait]
pub trait DashboardSource: Send + Sync {
    async fn companies(&self) -> Result<Vec<Company>, ApiError>;
    async fn company(&self, slug: &str) -> Result<CompanyDetail, ApiError>;
    async fn all_jobs(&self, query: &JobQuery) -> Result<Vec<Job>, ApiError>;
    async fn jobs_feed(&self, limit: u32) -> Result<Vec<JobFeedItem>, ApiError>;
    async fn sector_summary(&self) -> Result<SectorSummary, ApiError>;
    async fn sector_history(&self, limit: u32) -> Result<Vec<SectorSummary>, ApiError>;
    async fn company_summary(&self, slug: &str) -> Result<CompanySummary, ApiError>;
    async fn company_summary_history(
        &self,
        slug: &str,
        limit: u32,
    ) -> Result<Vec<CompanySummary>, ApiError>;
}

#[async_trait]
impl DashboardSource for ApiClient {
    async fn companies(&self) -> Result<Vec<Company>, ApiError> {
        ApiClient::companies(self).await
    }

    async fn company(&self, slug: &str) -> Result<CompanyDetail, ApiError> {
        ApiClient::company(self, slug).await
    }

    async fn all_jobs(&self, query: &JobQuery) -> Result<Vec<Job>, ApiError> {
        ApiClient::all_jobs(self, query).await
    }

    async fn jobs_feed(&self, limit: u32) -> Result<Vec<JobFeedItem>, ApiError> {
        ApiClient::jobs_feed(self, limit).await
    }

    async fn sector_summary(&self) -> Result<SectorSummary, ApiError> {
        ApiClient::sector_summary(self).await
    }

    async fn sector_history(&self, limit: u32) -> Result<Vec<SectorSummary>, ApiError> {
        ApiClient::sector_history(self, limit).await
    }

    async fn company_summary(&self, slug: &str) -> Result<CompanySummary, ApiError> {
        ApiClient::company_summary(self, slug).await
    }

    async fn company_summary_history(
        &self,
        slug: &str,
        limit: u32,
    ) -> Result<Vec<CompanySummary>, ApiError> {
        ApiClient::company_summary_history(self, slug, limit).await
    }
}
