// src/derive/trends.rs
//! Week-over-week series and labels.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::types::{CompanySummary, SectorSummary};

/// Trending roles/skills shown before "show all".
pub const COLLAPSED_LIST_LEN: usize = 10;

/// A weekly snapshot carrying added/removed counts.
pub trait WeeklyCounts {
    fn week_start(&self) -> NaiveDate;
    fn net_change(&self) -> i64;
}

impl WeeklyCounts for SectorSummary {
    fn week_start(&self) -> NaiveDate {
        self.week_start
    }

    fn net_change(&self) -> i64 {
        SectorSummary::net_change(self)
    }
}

impl WeeklyCounts for CompanySummary {
    fn week_start(&self) -> NaiveDate {
        self.week_start
    }

    fn net_change(&self) -> i64 {
        CompanySummary::net_change(self)
    }
}

/// Net change per week, oldest first, from a newest-first history.
pub fn net_change_series<S: WeeklyCounts>(history: &[S]) -> Vec<i64> {
    history.iter().rev().map(WeeklyCounts::net_change).collect()
}

/// Week of the year: weeks start on Sunday and the week holding January 1st
/// is week 1.
pub fn week_number(date: NaiveDate) -> u32 {
    let jan1 = NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date);
    let offset = date.ordinal0() + jan1.weekday().num_days_from_sunday() + 1;
    offset.div_ceil(7)
}

/// `Week 2, 2025`.
pub fn week_label(date: NaiveDate) -> String {
    format!("Week {}, {}", week_number(date), date.year())
}

/// An ordered list cut to its first entries unless expanded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollapsedList {
    pub visible: Vec<String>,
    pub total: usize,
    pub expandable: bool,
}

impl CollapsedList {
    pub fn new(items: &[String], expanded: bool) -> Self {
        let visible = if expanded {
            items.to_vec()
        } else {
            items.iter().take(COLLAPSED_LIST_LEN).cloned().collect()
        };
        Self {
            visible,
            total: items.len(),
            expandable: items.len() > COLLAPSED_LIST_LEN,
        }
    }

    pub fn hidden(&self) -> usize {
        self.total - self.visible.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derive::test_support::company_summary;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_series_is_oldest_first() {
        let mut newest = company_summary("acme");
        newest.jobs_added_count = Some(5);
        newest.jobs_removed_count = Some(1);
        let mut older = company_summary("acme");
        older.jobs_added_count = None;
        older.jobs_removed_count = Some(2);
        let mut oldest = company_summary("acme");
        oldest.jobs_added_count = Some(3);
        oldest.jobs_removed_count = None;

        assert_eq!(net_change_series(&[newest, older, oldest]), vec![3, -2, 4]);
        assert!(net_change_series::<CompanySummary>(&[]).is_empty());
    }

    #[test]
    fn test_week_number_sunday_start() {
        // 2025-01-01 is a Wednesday.
        assert_eq!(week_number(date(2025, 1, 1)), 1);
        assert_eq!(week_number(date(2025, 1, 4)), 1);
        assert_eq!(week_number(date(2025, 1, 5)), 2);
        // 2023-01-01 is a Sunday.
        assert_eq!(week_number(date(2023, 1, 7)), 1);
        assert_eq!(week_number(date(2023, 1, 8)), 2);
        assert_eq!(week_label(date(2025, 1, 6)), "Week 2, 2025");
    }

    #[test]
    fn test_collapsed_list() {
        let items: Vec<String> = (0..14).map(|i| format!("role {}", i)).collect();
        let collapsed = CollapsedList::new(&items, false);
        assert_eq!(collapsed.visible.len(), 10);
        assert_eq!(collapsed.hidden(), 4);
        assert!(collapsed.expandable);

        let expanded = CollapsedList::new(&items, true);
        assert_eq!(expanded.visible.len(), 14);

        let short = CollapsedList::new(&items[..3], false);
        assert!(!short.expandable);
        assert_eq!(short.hidden(), 0);
    }
}
