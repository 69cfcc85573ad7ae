// src/views/overview.rs
//! Landing page: company table, signals column and the weekly report tab.

use serde::Serialize;
use tracing::info;

use super::{Alert, AlertKind, PanelState};
use crate::core::DashboardSource;
use crate::derive::{
    aggregate_totals, companies_with_anomalies, sort_companies, CollapsedList, SortKey, Totals,
};
use crate::types::{Company, SectorSummary};
use crate::velocity::{classify, VelocityLevel};

/// Companies whose anomalies are surfaced in the signals column.
pub const ANOMALY_COMPANIES_SHOWN: usize = 3;
pub const NO_SIGNALS: &str = "No signals detected this week.";
pub const NO_SYNTHESIS: &str = "No synthesis available yet.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyRow {
    pub slug: String,
    pub name: String,
    pub jobs: i64,
    pub change: i64,
    pub velocity: VelocityLevel,
    pub focus: Vec<String>,
}

impl From<&Company> for CompanyRow {
    fn from(company: &Company) -> Self {
        Self {
            slug: company.slug.clone(),
            name: company.name.clone(),
            jobs: company.job_count(),
            change: company.added_this_week(),
            velocity: classify(company.hiring_velocity),
            focus: company.focus_areas().to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyTable {
    pub totals: Totals,
    pub net_change: i64,
    /// Largest employers first.
    pub rows: Vec<CompanyRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalsPanel {
    pub alerts: Vec<Alert>,
    pub sector_signal_count: usize,
    pub company_anomaly_count: usize,
    /// Set when there is nothing to show.
    pub empty_notice: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyReport {
    pub synthesis: String,
    pub has_synthesis: bool,
    pub trending_roles: CollapsedList,
    pub trending_skills: CollapsedList,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewView {
    pub companies: PanelState<CompanyTable>,
    pub signals: SignalsPanel,
    pub report: PanelState<WeeklyReport>,
}

/// Which collapsible report lists are expanded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportExpansion {
    pub roles: bool,
    pub skills: bool,
}

impl CompanyTable {
    pub fn build(companies: &[Company]) -> Self {
        let totals = aggregate_totals(companies);
        let mut ordered: Vec<&Company> = companies.iter().collect();
        sort_companies(&mut ordered, SortKey::Jobs);

        Self {
            totals,
            net_change: totals.net_change(),
            rows: ordered.into_iter().map(CompanyRow::from).collect(),
        }
    }
}

impl SignalsPanel {
    pub fn build(companies: &[Company], sector: Option<&SectorSummary>) -> Self {
        let flagged = companies_with_anomalies(companies);
        let sector_signals = sector.map(|s| s.sector_signals()).unwrap_or(&[]);

        let mut alerts: Vec<Alert> = flagged
            .iter()
            .take(ANOMALY_COMPANIES_SHOWN)
            .flat_map(|company| {
                company.anomalies().iter().map(move |anomaly| Alert {
                    kind: AlertKind::Anomaly,
                    source: company.name.clone(),
                    message: anomaly.clone(),
                })
            })
            .collect();

        alerts.extend(sector_signals.iter().map(|signal| Alert {
            kind: AlertKind::Signal,
            source: "Sector".to_string(),
            message: signal.clone(),
        }));

        let company_anomaly_count = flagged.iter().map(|c| c.anomalies().len()).sum();
        let empty_notice =
            (flagged.is_empty() && sector_signals.is_empty()).then(|| NO_SIGNALS.to_string());

        Self {
            alerts,
            sector_signal_count: sector_signals.len(),
            company_anomaly_count,
            empty_notice,
        }
    }
}

impl WeeklyReport {
    pub fn build(sector: &SectorSummary, expansion: ReportExpansion) -> Self {
        let synthesis = sector.summary_text.clone().filter(|text| !text.is_empty());
        Self {
            has_synthesis: synthesis.is_some(),
            synthesis: synthesis.unwrap_or_else(|| NO_SYNTHESIS.to_string()),
            trending_roles: CollapsedList::new(sector.trending_roles(), expansion.roles),
            trending_skills: CollapsedList::new(sector.trending_skills(), expansion.skills),
        }
    }
}

impl OverviewView {
    pub fn build(
        companies: PanelState<Vec<Company>>,
        sector: PanelState<SectorSummary>,
        expansion: ReportExpansion,
    ) -> Self {
        let company_list = companies.loaded().map(Vec::as_slice).unwrap_or(&[]);
        let signals = SignalsPanel::build(company_list, sector.loaded());

        Self {
            signals,
            companies: companies.map(|list| CompanyTable::build(&list)),
            report: sector.map(|summary| WeeklyReport::build(&summary, expansion)),
        }
    }
}

/// Fetch companies and the current sector summary concurrently.
pub async fn load_overview<S>(source: &S, expansion: ReportExpansion) -> OverviewView
where
    S: DashboardSource + ?Sized,
{
    let (companies, sector) = tokio::join!(source.companies(), source.sector_summary());
    let view = OverviewView::build(
        PanelState::from_result("companies", companies),
        PanelState::from_result("sector summary", sector),
        expansion,
    );
    info!(
        "Built overview (companies loaded: {}, report loaded: {})",
        view.companies.is_loaded(),
        view.report.is_loaded()
    );
    view
}
