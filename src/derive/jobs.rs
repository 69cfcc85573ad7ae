// src/derive/jobs.rs
//! Search, filtering and grouping of job lists.

use std::collections::{BTreeSet, HashMap};

use crate::types::Job;

/// Case-insensitive substring match on title, company name or location.
pub fn matches_search(job: &Job, query: &str) -> bool {
    let needle = query.to_lowercase();
    if needle.is_empty() {
        return true;
    }

    let contains = |field: Option<&str>| {
        field
            .map(|value| value.to_lowercase().contains(&needle))
            .unwrap_or(false)
    };

    contains(Some(job.display_title()))
        || contains(job.company_name.as_deref())
        || contains(job.location_raw.as_deref())
}

/// Filters of the job directory. All set filters must hold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobFilter {
    pub search: Option<String>,
    /// Company slug, exact.
    pub company: Option<String>,
    /// Job function, exact.
    pub function: Option<String>,
}

impl JobFilter {
    pub fn matches(&self, job: &Job) -> bool {
        if let Some(query) = &self.search {
            if !matches_search(job, query) {
                return false;
            }
        }
        if let Some(slug) = &self.company {
            if &job.company_slug != slug {
                return false;
            }
        }
        if let Some(function) = &self.function {
            if job.function.as_deref() != Some(function.as_str()) {
                return false;
            }
        }
        true
    }
}

pub fn filter_jobs<'a>(jobs: &'a [Job], filter: &JobFilter) -> Vec<&'a Job> {
    jobs.iter().filter(|job| filter.matches(job)).collect()
}

/// Jobs of one company, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct JobGroup<'a> {
    pub company: String,
    pub jobs: Vec<&'a Job>,
}

/// Groups in first-appearance order.
fn collect_groups<'a>(jobs: &[&'a Job]) -> Vec<JobGroup<'a>> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<JobGroup<'a>> = Vec::new();

    for &job in jobs {
        let key = job.company_label();
        match index.get(key).copied() {
            Some(i) => groups[i].jobs.push(job),
            None => {
                index.insert(key, groups.len());
                groups.push(JobGroup {
                    company: key.to_string(),
                    jobs: vec![job],
                });
            }
        }
    }
    groups
}

/// Jobs keyed by company display name (slug when the name is absent).
pub fn group_by_company<'a>(jobs: &[&'a Job]) -> HashMap<String, Vec<&'a Job>> {
    collect_groups(jobs)
        .into_iter()
        .map(|group| (group.company, group.jobs))
        .collect()
}

/// Groups for display: largest first, equal sizes in first-appearance order.
pub fn groups_by_size<'a>(jobs: &[&'a Job]) -> Vec<JobGroup<'a>> {
    let mut groups = collect_groups(jobs);
    groups.sort_by(|a, b| b.jobs.len().cmp(&a.jobs.len()));
    groups
}

/// Distinct non-null functions, sorted.
pub fn distinct_functions<'a, I>(jobs: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Job>,
{
    jobs.into_iter()
        .filter_map(|job| job.function.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Occurrences of each non-null function, in first-encountered order.
pub fn function_counts<'a, I>(jobs: I) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a Job>,
{
    let mut counts: Vec<(String, usize)> = Vec::new();
    for function in jobs.into_iter().filter_map(|job| job.function.as_deref()) {
        match counts.iter().position(|(name, _)| name == function) {
            Some(i) => counts[i].1 += 1,
            None => counts.push((function.to_string(), 1)),
        }
    }
    counts
}
