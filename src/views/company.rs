// src/views/company.rs
//! Detail panel of the selected company.

use serde::Serialize;
use tracing::info;

use super::jobs::JobRow;
use super::PanelState;
use crate::core::DashboardSource;
use crate::derive::{focus_areas, function_counts, net_change_series, overview_or_notice, signed};
use crate::selection::{load_company_panel, CompanyPanel};
use crate::velocity::{classify, VelocityLevel};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionCount {
    pub function: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyProfile {
    pub slug: String,
    pub name: String,
    pub tier: String,
    pub ats_type: String,
    pub website_url: Option<String>,
    pub careers_url: Option<String>,
    /// Jobs without a removal timestamp.
    pub open_roles: usize,
    /// Jobs added in the summary's week; 0 without a summary.
    pub weekly_change: i64,
    pub weekly_change_label: String,
    pub velocity: VelocityLevel,
    pub velocity_caption: &'static str,
    pub overview: String,
    pub focus_areas: Vec<String>,
    pub summary_text: Option<String>,
    pub notable_changes: Vec<String>,
    pub anomalies: Vec<String>,
    pub has_summary: bool,
    /// Functions in first-seen order with their job counts.
    pub functions: Vec<FunctionCount>,
    pub function_filter: Option<String>,
    /// Every job of the company (active and removed), narrowed by `function_filter`.
    pub jobs: Vec<JobRow>,
    pub total_jobs: usize,
}

impl CompanyProfile {
    pub fn build(panel: &CompanyPanel, function_filter: Option<&str>) -> Self {
        let detail = &panel.detail;
        let company = &detail.company;
        let summary = panel.summary.as_ref();

        let weekly_change = summary.map(|s| s.added()).unwrap_or(0);
        let velocity = summary
            .and_then(|s| s.hiring_velocity)
            .or(company.hiring_velocity);

        let jobs = detail
            .jobs
            .iter()
            .filter(|job| match function_filter {
                Some(function) => job.function.as_deref() == Some(function),
                None => true,
            })
            .map(JobRow::from)
            .collect();

        Self {
            slug: company.slug.clone(),
            name: company.name.clone(),
            tier: company.tier.clone(),
            ats_type: company.ats_type.clone(),
            website_url: detail.website_url.clone(),
            careers_url: detail.careers_url.clone(),
            open_roles: detail.active_jobs().count(),
            weekly_change,
            weekly_change_label: signed(weekly_change),
            velocity: classify(velocity),
            velocity_caption: velocity.unwrap_or_default().caption(),
            overview: overview_or_notice(detail.profile_markdown.as_deref()),
            focus_areas: focus_areas(summary, &detail.jobs),
            summary_text: summary
                .and_then(|s| s.summary_text.clone())
                .or_else(|| company.summary_text.clone()),
            notable_changes: summary.map(|s| s.notable_changes().to_vec()).unwrap_or_default(),
            anomalies: summary
                .map(|s| s.anomalies().to_vec())
                .unwrap_or_else(|| company.anomalies().to_vec()),
            has_summary: summary.is_some(),
            functions: function_counts(&detail.jobs)
                .into_iter()
                .map(|(function, count)| FunctionCount { function, count })
                .collect(),
            function_filter: function_filter.map(String::from),
            jobs,
            total_jobs: detail.jobs.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyView {
    pub slug: String,
    pub profile: PanelState<CompanyProfile>,
    /// Weekly net change, oldest first.
    pub trend: PanelState<Vec<i64>>,
}

/// Load the detail/summary join and the summary history concurrently.
pub async fn load_company_view<S>(
    source: &S,
    slug: &str,
    function_filter: Option<&str>,
    history_limit: u32,
) -> CompanyView
where
    S: DashboardSource + ?Sized,
{
    let (panel, history) = tokio::join!(
        load_company_panel(source, slug),
        source.company_summary_history(slug, history_limit)
    );

    let profile = PanelState::from_result("company detail", panel)
        .map(|panel| CompanyProfile::build(&panel, function_filter));
    let trend = PanelState::from_result("company history", history)
        .map(|entries| net_change_series(&entries));

    if let Some(p) = profile.loaded() {
        info!(
            "Company {}: {} open roles, {} functions",
            p.slug,
            p.open_roles,
            p.functions.len()
        );
    }

    CompanyView {
        slug: slug.to_string(),
        profile,
        trend,
    }
}
