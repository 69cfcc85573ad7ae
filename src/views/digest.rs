// src/views/digest.rs
//! Weekly digest with older/newer paging through the sector history.
//!
//! Index 0 is the current week and takes its company breakdown from the live
//! company list. Past weeks only have the sector snapshot's aggregates, so the
//! breakdown is replaced by an explicit notice.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, warn};

use super::overview::NO_SYNTHESIS;
use super::PanelState;
use crate::core::DashboardSource;
use crate::derive::{
    aggregate_totals, name_preview, net_change_series, partition_by_velocity, top_movers,
    week_label, weekly_change_label, CollapsedList, TOP_MOVERS,
};
use crate::history::{History, NavigationError, Position};
use crate::types::{Company, SectorSummary};

/// Names listed under the growing/contracting counts.
pub const PREVIEW_NAMES: usize = 3;
pub const NO_DIGEST: &str =
    "Weekly synthesis has not been generated yet. Check back after the next synthesis run.";
pub const PAST_WEEK_NOTICE: &str = "Company-level breakdown is not available for past weeks.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeekTotals {
    pub companies: i64,
    pub active_jobs: i64,
    pub added: i64,
    pub removed: i64,
    pub net_change: i64,
}

impl WeekTotals {
    fn from_snapshot(summary: &SectorSummary) -> Self {
        Self {
            companies: summary.total_companies,
            active_jobs: summary.total_active_jobs,
            added: summary.total_jobs_added,
            removed: summary.total_jobs_removed,
            net_change: summary.net_change(),
        }
    }

    fn from_companies(companies: &[Company]) -> Self {
        let totals = aggregate_totals(companies);
        Self {
            companies: totals.companies as i64,
            active_jobs: totals.jobs,
            added: totals.added,
            removed: totals.removed,
            net_change: totals.net_change(),
        }
    }

    /// `+7 (+10 / -3)`.
    pub fn change_label(&self) -> String {
        weekly_change_label(self.added, self.removed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NameList {
    pub count: usize,
    /// First names joined by ", " with a `+N more` suffix; empty when count is 0.
    pub preview: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mover {
    pub slug: String,
    pub name: String,
    pub jobs: i64,
    pub added: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LiveBreakdown {
    pub growing: NameList,
    pub contracting: NameList,
    /// May be empty: nobody added jobs this week.
    pub top_movers: Vec<Mover>,
}

impl LiveBreakdown {
    pub fn build(companies: &[Company]) -> Self {
        let buckets = partition_by_velocity(companies);
        let names = |list: &[&Company]| NameList {
            count: list.len(),
            preview: name_preview(list, PREVIEW_NAMES),
        };

        Self {
            growing: names(&buckets.up),
            contracting: names(&buckets.down),
            top_movers: top_movers(companies, TOP_MOVERS)
                .into_iter()
                .map(|c| Mover {
                    slug: c.slug.clone(),
                    name: c.name.clone(),
                    jobs: c.job_count(),
                    added: c.added_this_week(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Breakdown {
    Live(LiveBreakdown),
    /// Viewing a past week.
    PastWeek { notice: String },
    /// Current week, but the company list could not be loaded.
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekDigest {
    pub index: usize,
    pub position: Position,
    pub week_start: NaiveDate,
    pub week_label: String,
    pub weeks_available: usize,
    pub can_go_older: bool,
    pub can_go_newer: bool,
    pub totals: WeekTotals,
    pub change_label: String,
    pub synthesis: String,
    pub lead_signal: Option<String>,
    /// Signals after the lead, listed only when there is more than one.
    pub other_signals: Vec<String>,
    pub trending_roles: CollapsedList,
    pub trending_skills: CollapsedList,
    pub breakdown: Breakdown,
    /// Oldest first.
    pub net_change_series: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Digest {
    NoHistory {
        message: String,
    },
    /// The requested week is past the oldest stored summary.
    OutOfRange {
        requested: usize,
        weeks_available: usize,
        message: String,
    },
    Week(Box<WeekDigest>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DigestView {
    pub digest: PanelState<Digest>,
}

impl Digest {
    /// Assemble the digest for week `history.cursor().index()`.
    pub fn build(
        history: &History<SectorSummary>,
        companies: Option<&[Company]>,
        expanded: bool,
    ) -> Self {
        let Some(selected) = history.selected() else {
            return Digest::NoHistory {
                message: NO_DIGEST.to_string(),
            };
        };
        let cursor = history.cursor();
        let current = cursor.position() == Position::Current;

        let totals = match (current, companies) {
            (true, Some(list)) => WeekTotals::from_companies(list),
            _ => WeekTotals::from_snapshot(selected),
        };
        let breakdown = match (current, companies) {
            (true, Some(list)) => Breakdown::Live(LiveBreakdown::build(list)),
            (true, None) => Breakdown::Unavailable,
            (false, _) => Breakdown::PastWeek {
                notice: PAST_WEEK_NOTICE.to_string(),
            },
        };

        let signals = selected.sector_signals();
        let other_signals = if signals.len() > 1 {
            signals[1..].to_vec()
        } else {
            Vec::new()
        };

        Digest::Week(Box::new(WeekDigest {
            index: cursor.index(),
            position: cursor.position(),
            week_start: selected.week_start,
            week_label: week_label(selected.week_start),
            weeks_available: cursor.len(),
            can_go_older: cursor.can_go_older(),
            can_go_newer: cursor.can_go_newer(),
            change_label: totals.change_label(),
            totals,
            synthesis: selected
                .summary_text
                .clone()
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| NO_SYNTHESIS.to_string()),
            lead_signal: selected.lead_signal().map(String::from),
            other_signals,
            trending_roles: CollapsedList::new(selected.trending_roles(), expanded),
            trending_skills: CollapsedList::new(selected.trending_skills(), expanded),
            breakdown,
            net_change_series: net_change_series(history.entries()),
        }))
    }

    /// Open the digest at `week`. A week past the oldest summary is rejected
    /// as `OutOfRange` rather than shown as some other week.
    pub fn open(
        mut history: History<SectorSummary>,
        week: usize,
        companies: Option<&[Company]>,
        expanded: bool,
    ) -> Self {
        let seek = history.seek(week).map(|_| ());
        match seek {
            Err(NavigationError::OutOfRange { index, len }) if len > 0 => {
                warn!("Rejecting digest week {}: history has {} weeks", index, len);
                Digest::OutOfRange {
                    requested: index,
                    weeks_available: len,
                    message: out_of_range_message(index, len),
                }
            }
            _ => Digest::build(&history, companies, expanded),
        }
    }
}

fn out_of_range_message(week: usize, len: usize) -> String {
    format!(
        "Week {} is not available. Choose 0 (current week) to {}.",
        week,
        len - 1
    )
}

/// Fetch the sector history and live companies, then open the digest at
/// `week`.
pub async fn load_digest<S>(
    source: &S,
    week: usize,
    history_limit: u32,
    expanded: bool,
) -> DigestView
where
    S: DashboardSource + ?Sized,
{
    let (history, companies) =
        tokio::join!(source.sector_history(history_limit), source.companies());
    let companies = PanelState::from_result("companies", companies);

    let digest = PanelState::from_result("sector history", history).map(|entries| {
        Digest::open(
            History::new(entries),
            week,
            companies.loaded().map(Vec::as_slice),
            expanded,
        )
    });

    if let Some(Digest::Week(opened)) = digest.loaded() {
        info!(
            "Digest for {} ({} weeks available)",
            opened.week_label, opened.weeks_available
        );
    }
    DigestView { digest }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derive::test_support::{company, sector_summary};
    use crate::velocity::Velocity;

    fn weeks() -> Vec<SectorSummary> {
        let mut current = sector_summary(NaiveDate::from_ymd_opt(2025, 1, 13).unwrap());
        current.total_jobs_added = 20;
        current.total_jobs_removed = 5;
        current.sector_signals = Some(vec!["lead".into()]);
        let mut past = sector_summary(NaiveDate::from_ymd_opt(2025, 1, 6).unwrap());
        past.total_companies = 12;
        past.total_active_jobs = 900;
        past.total_jobs_added = 4;
        past.total_jobs_removed = 9;
        past.sector_signals = Some(vec!["a".into(), "b".into(), "c".into()]);
        vec![current, past]
    }

    fn companies() -> Vec<Company> {
        ["a", "b", "c", "d"]
            .iter()
            .enumerate()
            .map(|(i, slug)| {
                let mut c = company(slug, &slug.to_uppercase(), 10);
                c.hiring_velocity = Some(Velocity::Up);
                c.jobs_added_this_week = Some(i as i64);
                c
            })
            .collect()
    }

    fn week(digest: Digest) -> WeekDigest {
        match digest {
            Digest::Week(w) => *w,
            other => panic!("expected a week, got {:?}", other),
        }
    }

    #[test]
    fn test_current_week_uses_live_companies() {
        let history = History::new(weeks());
        let list = companies();
        let w = week(Digest::build(&history, Some(&list), false));

        assert_eq!(w.position, Position::Current);
        assert_eq!(w.totals.active_jobs, 40);
        assert_eq!(w.change_label, "+6 (+6 / -0)");
        assert!(w.can_go_older && !w.can_go_newer);
        assert_eq!(w.lead_signal.as_deref(), Some("lead"));
        assert!(w.other_signals.is_empty());
        match w.breakdown {
            Breakdown::Live(live) => {
                assert_eq!(live.growing.count, 4);
                assert_eq!(live.growing.preview, "A, B, C +1 more");
                assert_eq!(live.contracting.count, 0);
                assert_eq!(live.top_movers.len(), 3);
                assert_eq!(live.top_movers[0].slug, "d");
            }
            other => panic!("expected live breakdown, got {:?}", other),
        }
        assert_eq!(w.net_change_series, vec![-5, 15]);
    }

    #[test]
    fn test_past_week_shows_notice_and_snapshot_totals() {
        let mut history = History::new(weeks());
        history.older().unwrap();
        let list = companies();
        let w = week(Digest::build(&history, Some(&list), false));

        assert_eq!(w.position, Position::Past(1));
        assert_eq!(w.totals.active_jobs, 900);
        assert_eq!(w.totals.net_change, -5);
        assert_eq!(
            w.breakdown,
            Breakdown::PastWeek {
                notice: PAST_WEEK_NOTICE.to_string()
            }
        );
        assert_eq!(w.other_signals, vec!["b", "c"]);
        assert_eq!(w.week_label, "Week 2, 2025");
    }

    #[test]
    fn test_empty_history_is_its_own_state() {
        let history: History<SectorSummary> = History::new(vec![]);
        assert_eq!(
            Digest::build(&history, None, false),
            Digest::NoHistory {
                message: NO_DIGEST.to_string()
            }
        );
    }

    #[test]
    fn test_no_movers_is_an_empty_list_not_unavailable() {
        let history = History::new(weeks());
        let list = vec![company("a", "A", 3)];
        let w = week(Digest::build(&history, Some(&list), false));
        assert!(matches!(w.breakdown, Breakdown::Live(ref live) if live.top_movers.is_empty()));

        let w = week(Digest::build(&history, None, false));
        assert_eq!(w.breakdown, Breakdown::Unavailable);
        assert_eq!(w.totals.net_change, 15);
    }

    #[test]
    fn test_week_past_the_oldest_is_rejected() {
        let list = companies();
        let digest = Digest::open(History::new(weeks()), 7, Some(&list), false);
        assert_eq!(
            digest,
            Digest::OutOfRange {
                requested: 7,
                weeks_available: 2,
                message: "Week 7 is not available. Choose 0 (current week) to 1.".to_string(),
            }
        );

        let w = week(Digest::open(History::new(weeks()), 1, Some(&list), false));
        assert_eq!(w.index, 1);

        let empty = Digest::open(History::new(Vec::new()), 3, None, false);
        assert!(matches!(empty, Digest::NoHistory { .. }));
    }
}
