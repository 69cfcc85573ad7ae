// src/derive/companies.rs
//! Filtering, ordering and ranking of the company list.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::types::Company;
use crate::velocity::Velocity;

/// Number of companies shown as top movers.
pub const TOP_MOVERS: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VelocityFilter {
    #[default]
    All,
    Up,
    Down,
    Stable,
}

impl VelocityFilter {
    pub fn matches(&self, company: &Company) -> bool {
        match self {
            VelocityFilter::All => true,
            VelocityFilter::Up => company.velocity() == Velocity::Up,
            VelocityFilter::Down => company.velocity() == Velocity::Down,
            VelocityFilter::Stable => company.velocity() == Velocity::Stable,
        }
    }
}

impl FromStr for VelocityFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(VelocityFilter::All),
            "up" | "growing" => Ok(VelocityFilter::Up),
            "down" | "declining" => Ok(VelocityFilter::Down),
            "stable" => Ok(VelocityFilter::Stable),
            other => Err(format!("Unknown velocity filter: {}. Use all, up, down or stable", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Open roles, descending.
    #[default]
    Jobs,
    /// Jobs added this week, descending.
    Delta,
    /// Name, ascending.
    Name,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "jobs" => Ok(SortKey::Jobs),
            "delta" => Ok(SortKey::Delta),
            "name" => Ok(SortKey::Name),
            other => Err(format!("Unknown sort key: {}. Use jobs, delta or name", other)),
        }
    }
}

/// Companies split by velocity; absent velocity counts as stable.
#[derive(Debug, Default)]
pub struct VelocityBuckets<'a> {
    pub up: Vec<&'a Company>,
    pub stable: Vec<&'a Company>,
    pub down: Vec<&'a Company>,
}

pub fn partition_by_velocity(companies: &[Company]) -> VelocityBuckets<'_> {
    let mut buckets = VelocityBuckets::default();
    for company in companies {
        match company.velocity() {
            Velocity::Up => buckets.up.push(company),
            Velocity::Stable => buckets.stable.push(company),
            Velocity::Down => buckets.down.push(company),
        }
    }
    buckets
}

pub fn filter_by_velocity(companies: &[Company], filter: VelocityFilter) -> Vec<&Company> {
    companies.iter().filter(|c| filter.matches(c)).collect()
}

/// Stable sort: equal keys keep their input order.
pub fn sort_companies(companies: &mut [&Company], key: SortKey) {
    match key {
        SortKey::Jobs => companies.sort_by(|a, b| b.job_count().cmp(&a.job_count())),
        SortKey::Delta => {
            companies.sort_by(|a, b| b.added_this_week().cmp(&a.added_this_week()))
        }
        SortKey::Name => {
            companies.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        }
    }
}

/// Filter then sort, as the company directory shows them.
pub fn directory(companies: &[Company], filter: VelocityFilter, key: SortKey) -> Vec<&Company> {
    let mut selected = filter_by_velocity(companies, filter);
    sort_companies(&mut selected, key);
    selected
}

/// Companies that added jobs this week, most added first, at most `k`.
pub fn top_movers(companies: &[Company], k: usize) -> Vec<&Company> {
    let mut movers: Vec<&Company> = companies
        .iter()
        .filter(|c| c.added_this_week() > 0)
        .collect();
    sort_companies(&mut movers, SortKey::Delta);
    movers.truncate(k);
    movers
}

/// Companies carrying at least one anomaly, ordered by slug.
pub fn companies_with_anomalies(companies: &[Company]) -> Vec<&Company> {
    let mut flagged: Vec<&Company> = companies
        .iter()
        .filter(|c| !c.anomalies().is_empty())
        .collect();
    flagged.sort_by(|a, b| a.slug.cmp(&b.slug));
    flagged
}

/// Up to `shown` names joined by ", ", with a `+N more` suffix.
pub fn name_preview(companies: &[&Company], shown: usize) -> String {
    let names: Vec<&str> = companies
        .iter()
        .take(shown)
        .map(|c| c.name.as_str())
        .collect();
    let mut preview = names.join(", ");
    if companies.len() > shown {
        preview.push_str(&format!(" +{} more", companies.len() - shown));
    }
    preview
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derive::test_support::company;

    fn with_velocity(slug: &str, velocity: Option<Velocity>) -> Company {
        let mut c = company(slug, &slug.to_uppercase(), 1);
        c.hiring_velocity = velocity;
        c
    }

    fn slugs(companies: &[&Company]) -> Vec<String> {
        companies.iter().map(|c| c.slug.clone()).collect()
    }

    #[test]
    fn test_absent_velocity_lands_in_stable_bucket() {
        let companies = vec![
            with_velocity("a", Some(Velocity::Up)),
            with_velocity("b", None),
            with_velocity("c", Some(Velocity::Down)),
            with_velocity("d", Some(Velocity::Stable)),
        ];
        let buckets = partition_by_velocity(&companies);
        assert_eq!(slugs(&buckets.up), vec!["a"]);
        assert_eq!(slugs(&buckets.stable), vec!["b", "d"]);
        assert_eq!(slugs(&buckets.down), vec!["c"]);

        let stable = filter_by_velocity(&companies, VelocityFilter::Stable);
        assert_eq!(slugs(&stable), vec!["b", "d"]);
        assert_eq!(filter_by_velocity(&companies, VelocityFilter::All).len(), 4);
    }

    #[test]
    fn test_sort_by_jobs_is_stable_for_ties() {
        let companies = vec![
            company("first", "First", 5),
            company("big", "Big", 9),
            company("second", "Second", 5),
            company("third", "Third", 5),
        ];
        let sorted = directory(&companies, VelocityFilter::All, SortKey::Jobs);
        assert_eq!(slugs(&sorted), vec!["big", "first", "second", "third"]);
    }

    #[test]
    fn test_sort_by_delta_treats_absent_as_zero() {
        let mut a = company("a", "A", 1);
        a.jobs_added_this_week = None;
        let mut b = company("b", "B", 1);
        b.jobs_added_this_week = Some(3);
        let mut c = company("c", "C", 1);
        c.jobs_added_this_week = Some(0);
        let companies = vec![a, b, c];
        let sorted = directory(&companies, VelocityFilter::All, SortKey::Delta);
        assert_eq!(slugs(&sorted), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_sort_by_name_ascending() {
        let companies = vec![
            company("x", "xAI", 1),
            company("a", "Anthropic", 1),
            company("c", "Cohere", 1),
        ];
        let sorted = directory(&companies, VelocityFilter::All, SortKey::Name);
        assert_eq!(slugs(&sorted), vec!["a", "c", "x"]);
    }

    #[test]
    fn test_top_movers_excludes_non_positive_and_caps_at_k() {
        let mut companies = Vec::new();
        for (slug, added) in [("a", Some(2)), ("b", Some(0)), ("c", Some(-1)), ("d", None), ("e", Some(7))] {
            let mut c = company(slug, slug, 1);
            c.jobs_added_this_week = added;
            companies.push(c);
        }
        let movers = top_movers(&companies, TOP_MOVERS);
        assert_eq!(slugs(&movers), vec!["e", "a"]);

        let many: Vec<Company> = (1..=8)
            .map(|n| {
                let mut c = company(&format!("c{}", n), "C", 1);
                c.jobs_added_this_week = Some(n);
                c
            })
            .collect();
        assert_eq!(top_movers(&many, TOP_MOVERS).len(), 5);
        assert_eq!(top_movers(&many, TOP_MOVERS)[0].slug, "c8");
    }

    #[test]
    fn test_anomalies_are_ordered_by_slug() {
        let mut z = company("zeta", "Zeta", 1);
        z.anomalies = Some(vec!["Hiring freeze".into()]);
        let mut a = company("alpha", "Alpha", 1);
        a.anomalies = Some(vec!["Spike".into()]);
        let mut empty = company("beta", "Beta", 1);
        empty.anomalies = Some(vec![]);
        let companies = vec![z, empty, a];
        assert_eq!(slugs(&companies_with_anomalies(&companies)), vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_name_preview_suffix() {
        let companies: Vec<Company> = ["A", "B", "C", "D", "E"]
            .iter()
            .map(|n| company(&n.to_lowercase(), n, 1))
            .collect();
        let refs: Vec<&Company> = companies.iter().collect();
        assert_eq!(name_preview(&refs, 3), "A, B, C +2 more");
        assert_eq!(name_preview(&refs[..2], 3), "A, B");
    }

    #[test]
    fn test_filter_and_sort_parse_from_cli_values() {
        assert_eq!("growing".parse::<VelocityFilter>(), Ok(VelocityFilter::Up));
        assert_eq!("name".parse::<SortKey>(), Ok(SortKey::Name));
        assert!("size".parse::<SortKey>().is_err());
    }
}
