// src/derive/totals.rs
use serde::Serialize;

use crate::types::Company;

/// Sums across a company list. Absent counters contribute 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub companies: usize,
    pub jobs: i64,
    pub added: i64,
    pub removed: i64,
}

impl Totals {
    /// Signed weekly delta, `added - removed`.
    pub fn net_change(&self) -> i64 {
        self.added - self.removed
    }
}

pub fn aggregate_totals(companies: &[Company]) -> Totals {
    companies.iter().fold(
        Totals {
            companies: companies.len(),
            ..Totals::default()
        },
        |acc, company| Totals {
            jobs: acc.jobs + company.job_count(),
            added: acc.added + company.added_this_week(),
            removed: acc.removed + company.removed_this_week(),
            ..acc
        },
    )
}

/// `+12`, `-3`, `0`.
pub fn signed(value: i64) -> String {
    if value > 0 {
        format!("+{}", value)
    } else {
        value.to_string()
    }
}

/// Net change with its breakdown, e.g. `+7 (+10 / -3)`.
pub fn weekly_change_label(added: i64, removed: i64) -> String {
    format!("{} (+{} / -{})", signed(added - removed), added, removed)
}
