// src/derive/profile.rs
//! Company-panel text derived from the profile markdown and the job list.
//!
//! The profile is free-form markdown written by the backend's profile loader.
//! The dashboard relies on one structural convention in it: a line reading
//! exactly `## Overview`, a blank line, then a single-line paragraph.

use crate::types::{CompanySummary, Job};

use super::jobs::function_counts;

pub const OVERVIEW_HEADING: &str = "## Overview";
pub const OVERVIEW_FALLBACK_CHARS: usize = 300;
pub const TRUNCATION_MARKER: &str = "...";
pub const NO_PROFILE: &str = "No profile available";

/// Number of functions used when focus areas have to be derived from jobs.
pub const DERIVED_FOCUS_AREAS: usize = 3;

/// Short overview for a company profile.
///
/// Returns the first non-empty line after `## Overview` and a blank line.
/// Without that structure, the first 300 characters of the body followed by
/// `...`.
pub fn extract_overview(markdown: &str) -> String {
    let marker = format!("{}\n\n", OVERVIEW_HEADING);

    for (start, _) in markdown.match_indices(&marker) {
        let rest = &markdown[start + marker.len()..];
        let line = rest.split('\n').next().unwrap_or("");
        if !line.is_empty() {
            return line.to_string();
        }
    }

    let head: String = markdown.chars().take(OVERVIEW_FALLBACK_CHARS).collect();
    format!("{}{}", head, TRUNCATION_MARKER)
}

/// Overview for an optional profile; absent profile gets a fixed notice.
pub fn overview_or_notice(markdown: Option<&str>) -> String {
    match markdown {
        Some(md) if !md.is_empty() => extract_overview(md),
        _ => NO_PROFILE.to_string(),
    }
}

/// Focus areas from the weekly summary, or the most frequent job functions.
///
/// Derived functions are ordered by count, ties by first appearance.
pub fn focus_areas(summary: Option<&CompanySummary>, jobs: &[Job]) -> Vec<String> {
    if let Some(areas) = summary.and_then(|s| s.focus_areas.as_ref()) {
        if !areas.is_empty() {
            return areas.clone();
        }
    }

    let mut counts = function_counts(jobs);
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(DERIVED_FOCUS_AREAS)
        .map(|(function, _)| function)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derive::test_support::{company_summary, job};

    #[test]
    fn test_overview_paragraph_after_heading() {
        let md = "## Overview\n\nWe build things.\n\n## Team";
        assert_eq!(extract_overview(md), "We build things.");
    }

    #[test]
    fn test_overview_heading_later_in_document() {
        let md = "# Acme\n\nIntro line\n\n## Overview\n\nFrontier lab.\nSecond line\n";
        assert_eq!(extract_overview(md), "Frontier lab.");
    }

    #[test]
    fn test_overview_fallback_truncates_long_body() {
        let md = "x".repeat(450);
        let overview = extract_overview(&md);
        assert_eq!(overview, format!("{}...", "x".repeat(300)));
    }

    #[test]
    fn test_overview_fallback_when_paragraph_missing() {
        let md = "Intro\n## Overview\n\n\n";
        assert_eq!(extract_overview(md), format!("{}...", md));
    }

    #[test]
    fn test_overview_fallback_counts_characters_not_bytes() {
        let md = "é".repeat(301);
        assert_eq!(extract_overview(&md).chars().count(), 303);
    }

    #[test]
    fn test_absent_profile_notice() {
        assert_eq!(overview_or_notice(None), "No profile available");
        assert_eq!(overview_or_notice(Some("## Overview\n\nHi")), "Hi");
    }

    #[test]
    fn test_summary_focus_areas_win_verbatim() {
        let mut summary = company_summary("acme");
        summary.focus_areas = Some(vec!["Agents".into(), "Evals".into(), "Infra".into(), "Safety".into()]);
        let jobs = vec![job("acme", Some("Acme"), "t")];
        assert_eq!(
            focus_areas(Some(&summary), &jobs),
            vec!["Agents", "Evals", "Infra", "Safety"]
        );
    }

    #[test]
    fn test_focus_areas_fall_back_to_top_functions() {
        let functions = [
            Some("sales"),
            Some("research"),
            None,
            Some("engineering"),
            Some("research"),
            Some("legal"),
            Some("engineering"),
        ];
        let jobs: Vec<Job> = functions
            .iter()
            .map(|f| {
                let mut j = job("acme", Some("Acme"), "t");
                j.function = f.map(String::from);
                j
            })
            .collect();

        let mut summary = company_summary("acme");
        summary.focus_areas = Some(vec![]);
        assert_eq!(
            focus_areas(Some(&summary), &jobs),
            vec!["research", "engineering", "sales"]
        );
        assert_eq!(focus_areas(None, &jobs), vec!["research", "engineering", "sales"]);
        assert!(focus_areas(None, &[]).is_empty());
    }
}
