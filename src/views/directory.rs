// src/views/directory.rs
//! Company directory: velocity filter, sort selector and company cards.

use serde::Serialize;
use tracing::info;

use super::PanelState;
use crate::core::DashboardSource;
use crate::derive::{
    aggregate_totals, directory, partition_by_velocity, SortKey, Totals, VelocityFilter,
};
use crate::types::Company;
use crate::velocity::{classify, VelocityLevel};

pub const NO_MATCHING_COMPANIES: &str = "No companies match the selected filter.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyCard {
    pub slug: String,
    pub name: String,
    pub tier: String,
    pub jobs: i64,
    pub added: i64,
    pub removed: i64,
    pub velocity: VelocityLevel,
    pub velocity_caption: &'static str,
    pub focus: Vec<String>,
}

impl From<&Company> for CompanyCard {
    fn from(company: &Company) -> Self {
        Self {
            slug: company.slug.clone(),
            name: company.name.clone(),
            tier: company.tier.clone(),
            jobs: company.job_count(),
            added: company.added_this_week(),
            removed: company.removed_this_week(),
            velocity: classify(company.hiring_velocity),
            velocity_caption: company.velocity().caption(),
            focus: company.focus_areas().to_vec(),
        }
    }
}

/// How many companies sit in each velocity bucket, for the filter tabs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BucketCounts {
    pub all: usize,
    pub up: usize,
    pub stable: usize,
    pub down: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyDirectory {
    pub filter: VelocityFilter,
    pub sort: SortKey,
    pub buckets: BucketCounts,
    /// Totals over the whole list, not just the filtered cards.
    pub totals: Totals,
    pub cards: Vec<CompanyCard>,
    pub empty_notice: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectoryView {
    pub companies: PanelState<CompanyDirectory>,
}

impl CompanyDirectory {
    pub fn build(companies: &[Company], filter: VelocityFilter, sort: SortKey) -> Self {
        let buckets = partition_by_velocity(companies);
        let cards: Vec<CompanyCard> = directory(companies, filter, sort)
            .into_iter()
            .map(CompanyCard::from)
            .collect();
        let empty_notice = cards
            .is_empty()
            .then(|| NO_MATCHING_COMPANIES.to_string());

        Self {
            filter,
            sort,
            buckets: BucketCounts {
                all: companies.len(),
                up: buckets.up.len(),
                stable: buckets.stable.len(),
                down: buckets.down.len(),
            },
            totals: aggregate_totals(companies),
            cards,
            empty_notice,
        }
    }
}

pub async fn load_directory<S>(
    source: &S,
    filter: VelocityFilter,
    sort: SortKey,
) -> DirectoryView
where
    S: DashboardSource + ?Sized,
{
    let companies = PanelState::from_result("companies", source.companies().await)
        .map(|list| CompanyDirectory::build(&list, filter, sort));
    if let Some(dir) = companies.loaded() {
        info!(
            "Company directory: {} of {} companies ({:?}, sorted by {:?})",
            dir.cards.len(),
            dir.buckets.all,
            filter,
            sort
        );
    }
    DirectoryView { companies }
}
