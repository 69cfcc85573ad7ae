// src/types/summary.rs
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::velocity::Velocity;

/// Sector-wide weekly synthesis, keyed by `week_start`.
///
/// The list fields are ordered by the backend and that order is meaningful:
/// `sector_signals[0]` is the lead signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorSummary {
    pub id: Uuid,
    pub week_start: NaiveDate,
    pub total_companies: i64,
    pub total_active_jobs: i64,
    pub total_jobs_added: i64,
    pub total_jobs_removed: i64,
    pub summary_text: Option<String>,
    pub trending_roles: Option<Vec<String>>,
    pub trending_skills: Option<Vec<String>>,
    pub sector_signals: Option<Vec<String>>,
    #[serde(with = "super::timestamp")]
    pub created_at: NaiveDateTime,
}

impl SectorSummary {
    pub fn trending_roles(&self) -> &[String] {
        self.trending_roles.as_deref().unwrap_or(&[])
    }

    pub fn trending_skills(&self) -> &[String] {
        self.trending_skills.as_deref().unwrap_or(&[])
    }

    pub fn sector_signals(&self) -> &[String] {
        self.sector_signals.as_deref().unwrap_or(&[])
    }

    pub fn lead_signal(&self) -> Option<&str> {
        self.sector_signals().first().map(String::as_str)
    }

    pub fn net_change(&self) -> i64 {
        self.total_jobs_added - self.total_jobs_removed
    }
}

/// Per-company weekly synthesis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanySummary {
    pub id: Uuid,
    pub company_slug: String,
    pub company_name: String,
    pub week_start: NaiveDate,
    pub jobs_added_count: Option<i64>,
    pub jobs_removed_count: Option<i64>,
    pub total_active_jobs: Option<i64>,
    pub summary_text: Option<String>,
    pub hiring_velocity: Option<Velocity>,
    pub focus_areas: Option<Vec<String>>,
    pub notable_changes: Option<Vec<String>>,
    pub anomalies: Option<Vec<String>>,
    #[serde(with = "super::timestamp")]
    pub created_at: NaiveDateTime,
}

impl CompanySummary {
    pub fn added(&self) -> i64 {
        self.jobs_added_count.unwrap_or(0)
    }

    pub fn removed(&self) -> i64 {
        self.jobs_removed_count.unwrap_or(0)
    }

    pub fn net_change(&self) -> i64 {
        self.added() - self.removed()
    }

    pub fn notable_changes(&self) -> &[String] {
        self.notable_changes.as_deref().unwrap_or(&[])
    }

    pub fn anomalies(&self) -> &[String] {
        self.anomalies.as_deref().unwrap_or(&[])
    }
}
