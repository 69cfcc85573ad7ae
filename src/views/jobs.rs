// src/views/jobs.rs
//! Job directory: search box, company and function filters, grouped list.

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::info;

use super::PanelState;
use crate::core::{DashboardSource, JobQuery};
use crate::derive::{distinct_functions, filter_jobs, groups_by_size, JobFilter};
use crate::types::{Company, Job, JobStatus};

/// Jobs shown per company group before "view all".
pub const JOBS_PER_GROUP: usize = 6;
pub const NO_MATCHING_JOBS: &str = "No jobs match your filters.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobRow {
    pub title: String,
    pub company: String,
    pub company_slug: String,
    pub location: Option<String>,
    pub function: Option<String>,
    pub seniority: Option<String>,
    pub remote_policy: Option<String>,
    pub url: Option<String>,
    pub first_seen_at: NaiveDateTime,
    pub active: bool,
}

impl From<&Job> for JobRow {
    fn from(job: &Job) -> Self {
        Self {
            title: job.display_title().to_string(),
            company: job.company_label().to_string(),
            company_slug: job.company_slug.clone(),
            location: job.location_raw.clone(),
            function: job.function.clone(),
            seniority: job.seniority.clone(),
            remote_policy: job.remote_policy.clone(),
            url: job.job_url.clone(),
            first_seen_at: job.first_seen_at,
            active: job.is_active(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobGroupView {
    pub company: String,
    pub total: usize,
    /// First `JOBS_PER_GROUP` jobs of the group.
    pub jobs: Vec<JobRow>,
    pub has_more: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "layout", content = "items", rename_all = "snake_case")]
pub enum JobLayout {
    Grouped(Vec<JobGroupView>),
    /// Used when a single company is selected.
    Flat(Vec<JobRow>),
}

/// Entry of the company filter dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompanyOption {
    pub slug: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobDirectory {
    pub functions: Vec<String>,
    pub shown: usize,
    pub total: usize,
    pub layout: JobLayout,
    pub empty_notice: Option<String>,
}

impl JobDirectory {
    pub fn build(jobs: &[Job], filter: &JobFilter) -> Self {
        let matching = filter_jobs(jobs, filter);

        let layout = if filter.company.is_some() {
            JobLayout::Flat(matching.iter().map(|&job| JobRow::from(job)).collect())
        } else {
            JobLayout::Grouped(
                groups_by_size(&matching)
                    .into_iter()
                    .map(|group| JobGroupView {
                        total: group.jobs.len(),
                        has_more: group.jobs.len() > JOBS_PER_GROUP,
                        jobs: group
                            .jobs
                            .iter()
                            .take(JOBS_PER_GROUP)
                            .map(|&job| JobRow::from(job))
                            .collect(),
                        company: group.company,
                    })
                    .collect(),
            )
        };

        Self {
            functions: distinct_functions(jobs),
            shown: matching.len(),
            total: jobs.len(),
            empty_notice: matching.is_empty().then(|| NO_MATCHING_JOBS.to_string()),
            layout,
        }
    }

    /// `Showing 12 of 340 jobs`.
    pub fn summary_line(&self) -> String {
        format!("Showing {} of {} jobs", self.shown, self.total)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobDirectoryView {
    pub jobs: PanelState<JobDirectory>,
    pub companies: PanelState<Vec<CompanyOption>>,
}

fn company_options(companies: Vec<Company>) -> Vec<CompanyOption> {
    let mut options: Vec<CompanyOption> = companies
        .into_iter()
        .map(|c| CompanyOption {
            slug: c.slug,
            name: c.name,
        })
        .collect();
    options.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    options
}

/// Drain every job page and the company list concurrently.
pub async fn load_job_directory<S>(
    source: &S,
    filter: &JobFilter,
    status: Option<JobStatus>,
) -> JobDirectoryView
where
    S: DashboardSource + ?Sized,
{
    let query = JobQuery {
        status,
        ..JobQuery::default()
    };
    let (jobs, companies) = tokio::join!(source.all_jobs(&query), source.companies());

    let jobs = PanelState::from_result("jobs", jobs).map(|all| JobDirectory::build(&all, filter));
    if let Some(dir) = jobs.loaded() {
        info!("{}", dir.summary_line());
    }

    JobDirectoryView {
        jobs,
        companies: PanelState::from_result("companies", companies).map(company_options),
    }
}
