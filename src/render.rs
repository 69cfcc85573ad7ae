// src/render.rs
//! Plain-text rendering of the view models for the terminal.

use crate::derive::{signed, CollapsedList};
use crate::views::company::CompanyProfile;
use crate::views::digest::{Breakdown, Digest, NameList, WeekDigest};
use crate::views::jobs::{JobDirectory, JobLayout, JobRow};
use crate::views::{
    CompanyView, DigestView, DirectoryView, FeedView, JobDirectoryView, OverviewView, PanelState,
    NO_DATA,
};

pub const NO_HISTORY: &str = "No history";

const BLOCKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// One block character per week, scaled between the series' min and max.
pub fn sparkline(series: &[i64]) -> String {
    let (Some(&min), Some(&max)) = (series.iter().min(), series.iter().max()) else {
        return NO_HISTORY.to_string();
    };
    let span = max.abs_diff(min) as f64;
    series
        .iter()
        .map(|&value| {
            if span == 0.0 {
                BLOCKS[BLOCKS.len() / 2]
            } else {
                let level = (value.abs_diff(min) as f64 / span * (BLOCKS.len() - 1) as f64).round();
                BLOCKS[level as usize]
            }
        })
        .collect()
}

fn panel<T>(
    state: &PanelState<T>,
    lines: &mut Vec<String>,
    render: impl FnOnce(&T, &mut Vec<String>),
) {
    match state {
        PanelState::Loaded(value) => render(value, lines),
        PanelState::Unavailable => lines.push(format!("  {}", NO_DATA)),
    }
}

fn collapsed(title: &str, list: &CollapsedList, lines: &mut Vec<String>) {
    if list.total == 0 {
        return;
    }
    lines.push(format!("{}: {}", title, list.visible.join(", ")));
    if list.hidden() > 0 {
        lines.push(format!("  (show all {})", list.total));
    }
}

pub fn render_overview(view: &OverviewView) -> String {
    let mut lines = vec!["== Companies ==".to_string()];
    panel(&view.companies, &mut lines, |table, lines| {
        lines.push(format!(
            "{} companies, {} open roles, net {} this week",
            table.totals.companies,
            table.totals.jobs,
            signed(table.net_change)
        ));
        for row in &table.rows {
            lines.push(format!(
                "  {:<28} {:>6} {:>5}  {:<6} {}",
                row.name,
                row.jobs,
                signed(row.change),
                row.velocity,
                row.focus.join(", ")
            ));
        }
    });

    lines.push(String::new());
    lines.push(format!(
        "== Signals ({} sector, {} company) ==",
        view.signals.sector_signal_count, view.signals.company_anomaly_count
    ));
    if let Some(notice) = &view.signals.empty_notice {
        lines.push(format!("  {}", notice));
    }
    for alert in &view.signals.alerts {
        lines.push(format!("  [{}] {}: {}", alert.kind.as_str(), alert.source, alert.message));
    }

    lines.push(String::new());
    lines.push("== Weekly report ==".to_string());
    panel(&view.report, &mut lines, |report, lines| {
        lines.push(report.synthesis.clone());
        collapsed("Trending roles", &report.trending_roles, lines);
        collapsed("Trending skills", &report.trending_skills, lines);
    });
    lines.join("\n")
}

pub fn render_directory(view: &DirectoryView) -> String {
    let mut lines = Vec::new();
    panel(&view.companies, &mut lines, |dir, lines| {
        lines.push(format!(
            "All {} | Growing {} | Stable {} | Declining {}",
            dir.buckets.all, dir.buckets.up, dir.buckets.stable, dir.buckets.down
        ));
        if let Some(notice) = &dir.empty_notice {
            lines.push(notice.clone());
        }
        for card in &dir.cards {
            lines.push(format!(
                "{} ({}) {} roles, +{} / -{}, {}",
                card.name, card.tier, card.jobs, card.added, card.removed, card.velocity_caption
            ));
            if !card.focus.is_empty() {
                lines.push(format!("    {}", card.focus.join(", ")));
            }
        }
    });
    lines.join("\n")
}

fn job_line(job: &JobRow) -> String {
    let mut line = format!("    {}", job.title);
    if let Some(location) = &job.location {
        line.push_str(&format!(" | {}", location));
    }
    if let Some(function) = &job.function {
        line.push_str(&format!(" | {}", function));
    }
    if !job.active {
        line.push_str(" (removed)");
    }
    line
}

fn job_directory(dir: &JobDirectory, lines: &mut Vec<String>) {
    lines.push(dir.summary_line());
    if let Some(notice) = &dir.empty_notice {
        lines.push(notice.clone());
    }
    match &dir.layout {
        JobLayout::Flat(rows) => lines.extend(rows.iter().map(job_line)),
        JobLayout::Grouped(groups) => {
            for group in groups {
                lines.push(format!("{} ({})", group.company, group.total));
                lines.extend(group.jobs.iter().map(job_line));
                if group.has_more {
                    lines.push(format!("    view all {}", group.total));
                }
            }
        }
    }
}

pub fn render_jobs(view: &JobDirectoryView) -> String {
    let mut lines = Vec::new();
    panel(&view.jobs, &mut lines, job_directory);
    lines.join("\n")
}

pub fn render_feed(view: &FeedView) -> String {
    let mut lines = Vec::new();
    panel(&view.feed, &mut lines, |feed, lines| {
        lines.push(format!("{} added, {} removed", feed.added, feed.removed));
        if let Some(notice) = &feed.empty_notice {
            lines.push(notice.clone());
        }
        for entry in &feed.entries {
            lines.push(format!(
                "  {} {:<7} {} at {}",
                entry.at.format("%Y-%m-%d %H:%M"),
                entry.event.as_str(),
                entry.title,
                entry.company
            ));
        }
    });
    lines.join("\n")
}

fn name_list(label: &str, list: &NameList) -> String {
    if list.count == 0 {
        format!("{}: 0", label)
    } else {
        format!("{}: {} ({})", label, list.count, list.preview)
    }
}

fn week_digest(week: &WeekDigest, lines: &mut Vec<String>) {
    let mut nav = format!("{} [{}/{}]", week.week_label, week.index + 1, week.weeks_available);
    if week.can_go_newer {
        nav.push_str("  < newer");
    }
    if week.can_go_older {
        nav.push_str("  older >");
    }
    lines.push(nav);
    lines.push(format!(
        "{} open positions across {} companies. Net change: {}",
        week.totals.active_jobs, week.totals.companies, week.change_label
    ));
    if let Some(lead) = &week.lead_signal {
        lines.push(format!("Lead signal: {}", lead));
    }
    lines.push(week.synthesis.clone());

    match &week.breakdown {
        Breakdown::Live(live) => {
            lines.push(name_list("Expanding", &live.growing));
            lines.push(name_list("Contracting", &live.contracting));
            if !live.top_movers.is_empty() {
                lines.push("Top movers this week:".to_string());
                for (i, mover) in live.top_movers.iter().enumerate() {
                    lines.push(format!(
                        "  {}. {} {} roles +{}",
                        i + 1,
                        mover.name,
                        mover.jobs,
                        mover.added
                    ));
                }
            }
        }
        Breakdown::PastWeek { notice } => lines.push(notice.clone()),
        Breakdown::Unavailable => lines.push(NO_DATA.to_string()),
    }

    collapsed("Trending roles", &week.trending_roles, lines);
    collapsed("Skills in demand", &week.trending_skills, lines);
    if !week.other_signals.is_empty() {
        lines.push("Sector signals:".to_string());
        lines.extend(week.other_signals.iter().map(|s| format!("  * {}", s)));
    }
    lines.push(format!("Trend: {}", sparkline(&week.net_change_series)));
}

pub fn render_digest(view: &DigestView) -> String {
    let mut lines = Vec::new();
    panel(&view.digest, &mut lines, |digest, lines| match digest {
        Digest::NoHistory { message } | Digest::OutOfRange { message, .. } => {
            lines.push(message.clone())
        }
        Digest::Week(week) => week_digest(week, lines),
    });
    lines.join("\n")
}

fn company_profile(profile: &CompanyProfile, lines: &mut Vec<String>) {
    lines.push(format!("{} ({})", profile.name, profile.tier));
    lines.push(format!(
        "Open roles: {}  Week delta: {}  Velocity: {}",
        profile.open_roles, profile.weekly_change_label, profile.velocity
    ));
    lines.push(profile.overview.clone());
    if !profile.focus_areas.is_empty() {
        lines.push(format!("Focus areas: {}", profile.focus_areas.join(", ")));
    }
    if let Some(summary) = &profile.summary_text {
        lines.push(summary.clone());
    }
    lines.extend(profile.notable_changes.iter().map(|c| format!("  + {}", c)));
    lines.extend(profile.anomalies.iter().map(|a| format!("  ! {}", a)));
    if let Some(url) = &profile.careers_url {
        lines.push(format!("Careers: {}", url));
    }

    let functions: Vec<String> = profile
        .functions
        .iter()
        .map(|f| format!("{} ({})", f.function, f.count))
        .collect();
    if !functions.is_empty() {
        lines.push(format!("Functions: {}", functions.join(", ")));
    }
    lines.push(format!("Jobs ({}):", profile.total_jobs));
    lines.extend(profile.jobs.iter().map(job_line));
}

pub fn render_company(view: &CompanyView) -> String {
    let mut lines = Vec::new();
    panel(&view.profile, &mut lines, company_profile);
    let trend = match &view.trend {
        PanelState::Loaded(series) => sparkline(series),
        PanelState::Unavailable => NO_HISTORY.to_string(),
    };
    lines.push(format!("Trend: {}", trend));
    lines.join("\n")
}
