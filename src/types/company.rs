// src/types/company.rs
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::job::Job;
use crate::velocity::Velocity;

/// One tracked company as listed by `/api/companies`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub ats_type: String,
    pub tier: String,
    #[serde(default, with = "super::timestamp::option")]
    pub last_scraped_at: Option<NaiveDateTime>,
    pub job_count: Option<i64>,
    pub jobs_added_this_week: Option<i64>,
    pub jobs_removed_this_week: Option<i64>,
    pub hiring_velocity: Option<Velocity>,
    pub focus_areas: Option<Vec<String>>,
    pub summary_text: Option<String>,
    pub anomalies: Option<Vec<String>>,
}

impl Company {
    pub fn job_count(&self) -> i64 {
        self.job_count.unwrap_or(0)
    }

    pub fn added_this_week(&self) -> i64 {
        self.jobs_added_this_week.unwrap_or(0)
    }

    pub fn removed_this_week(&self) -> i64 {
        self.jobs_removed_this_week.unwrap_or(0)
    }

    /// Velocity with the absent case folded into `Stable`.
    pub fn velocity(&self) -> Velocity {
        self.hiring_velocity.unwrap_or_default()
    }

    pub fn anomalies(&self) -> &[String] {
        self.anomalies.as_deref().unwrap_or(&[])
    }

    pub fn focus_areas(&self) -> &[String] {
        self.focus_areas.as_deref().unwrap_or(&[])
    }
}

/// `/api/companies/{slug}`: the listing fields plus profile and every job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyDetail {
    #[serde(flatten)]
    pub company: Company,
    pub website_url: Option<String>,
    pub careers_url: Option<String>,
    pub profile_markdown: Option<String>,
    pub active_jobs_count: i64,
    pub jobs: Vec<Job>,
}

impl CompanyDetail {
    /// Jobs without a removal timestamp. This is the authority on activity,
    /// not `active_jobs_count`.
    pub fn active_jobs(&self) -> impl Iterator<Item = &Job> {
        self.jobs.iter().filter(|job| job.is_active())
    }
}
