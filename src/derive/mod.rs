// src/derive/mod.rs
//! Pure derivations from API snapshots to what the views display.
//!
//! Nothing in here performs I/O or mutates its input; identical inputs give
//! identical outputs.

pub mod companies;
pub mod jobs;
pub mod profile;
pub mod totals;
pub mod trends;

pub use companies::{
    companies_with_anomalies, directory, filter_by_velocity, name_preview, partition_by_velocity,
    sort_companies, top_movers, SortKey, VelocityBuckets, VelocityFilter, TOP_MOVERS,
};
pub use jobs::{
    distinct_functions, filter_jobs, function_counts, group_by_company, groups_by_size,
    matches_search, JobFilter, JobGroup,
};
pub use profile::{extract_overview, focus_areas, overview_or_notice};
pub use totals::{aggregate_totals, signed, weekly_change_label, Totals};
pub use trends::{net_change_series, week_label, week_number, CollapsedList, WeeklyCounts};

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::NaiveDate;
    use uuid::Uuid;

    use crate::types::{Company, CompanySummary, Job, SectorSummary};

    fn midnight(y: i32, m: u32, d: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    pub fn company(slug: &str, name: &str, job_count: i64) -> Company {
        Company {
            id: Uuid::new_v4(),
            name: name.to_string(),
            slug: slug.to_string(),
            ats_type: "greenhouse".to_string(),
            tier: "frontier".to_string(),
            last_scraped_at: None,
            job_count: Some(job_count),
            jobs_added_this_week: None,
            jobs_removed_this_week: None,
            hiring_velocity: None,
            focus_areas: None,
            summary_text: None,
            anomalies: None,
        }
    }

    pub fn job(company_slug: &str, company_name: Option<&str>, title: &str) -> Job {
        Job {
            id: Uuid::new_v4(),
            company_slug: company_slug.to_string(),
            company_name: company_name.map(String::from),
            title_raw: title.to_string(),
            normalized_title: None,
            location_raw: None,
            function: None,
            seniority: None,
            team_area: None,
            remote_policy: None,
            job_url: None,
            first_seen_at: midnight(2025, 1, 1),
            removed_at: None,
        }
    }

    pub fn company_summary(slug: &str) -> CompanySummary {
        CompanySummary {
            id: Uuid::new_v4(),
            company_slug: slug.to_string(),
            company_name: slug.to_uppercase(),
            week_start: NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
            jobs_added_count: None,
            jobs_removed_count: None,
            total_active_jobs: None,
            summary_text: None,
            hiring_velocity: None,
            focus_areas: None,
            notable_changes: None,
            anomalies: None,
            created_at: midnight(2025, 1, 7),
        }
    }

    pub fn sector_summary(week_start: NaiveDate) -> SectorSummary {
        SectorSummary {
            id: Uuid::new_v4(),
            week_start,
            total_companies: 0,
            total_active_jobs: 0,
            total_jobs_added: 0,
            total_jobs_removed: 0,
            summary_text: None,
            trending_roles: None,
            trending_skills: None,
            sector_signals: None,
            created_at: midnight(2025, 1, 7),
        }
    }
}
