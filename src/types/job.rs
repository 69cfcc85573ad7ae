// src/types/job.rs
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: Uuid,
    pub company_slug: String,
    pub company_name: Option<String>,
    pub title_raw: String,
    pub normalized_title: Option<String>,
    pub location_raw: Option<String>,
    pub function: Option<String>,
    pub seniority: Option<String>,
    pub team_area: Option<String>,
    pub remote_policy: Option<String>,
    pub job_url: Option<String>,
    #[serde(with = "super::timestamp")]
    pub first_seen_at: NaiveDateTime,
    #[serde(default, with = "super::timestamp::option")]
    pub removed_at: Option<NaiveDateTime>,
}

impl Job {
    pub fn is_active(&self) -> bool {
        self.removed_at.is_none()
    }

    /// Normalized title when the backend produced one, raw title otherwise.
    pub fn display_title(&self) -> &str {
        self.normalized_title.as_deref().unwrap_or(&self.title_raw)
    }

    /// Company name, falling back to the slug.
    pub fn company_label(&self) -> &str {
        match self.company_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.company_slug,
        }
    }
}

/// One page of `/api/jobs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPage {
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
    pub jobs: Vec<Job>,
}

/// `status` filter accepted by `/api/jobs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Active,
    Removed,
    AddedThisWeek,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Active => "active",
            JobStatus::Removed => "removed",
            JobStatus::AddedThisWeek => "added_this_week",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(JobStatus::Active),
            "removed" => Ok(JobStatus::Removed),
            "added_this_week" => Ok(JobStatus::AddedThisWeek),
            other => Err(format!(
                "Unknown job status: {}. Use active, removed or added_this_week",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedEventType {
    Added,
    Removed,
}

impl FeedEventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedEventType::Added => "added",
            FeedEventType::Removed => "removed",
        }
    }
}

/// The slimmer job shape carried inside feed events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedJob {
    pub id: Uuid,
    pub company_slug: String,
    pub company_name: Option<String>,
    pub title_raw: String,
    pub normalized_title: Option<String>,
    pub function: Option<String>,
    pub seniority: Option<String>,
    pub job_url: Option<String>,
}

impl FeedJob {
    pub fn display_title(&self) -> &str {
        self.normalized_title.as_deref().unwrap_or(&self.title_raw)
    }

    pub fn company_label(&self) -> &str {
        match self.company_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.company_slug,
        }
    }
}

/// Append-only change-log entry from `/api/jobs/feed`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobFeedItem {
    pub event_type: FeedEventType,
    #[serde(with = "super::timestamp")]
    pub event_time: NaiveDateTime,
    pub job: FeedJob,
}
