// src/views/feed.rs
use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::info;

use super::PanelState;
use crate::core::DashboardSource;
use crate::types::{FeedEventType, JobFeedItem};

pub const NO_FEED_EVENTS: &str = "No job changes recorded yet.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedEntry {
    pub event: FeedEventType,
    pub at: NaiveDateTime,
    pub title: String,
    pub company: String,
    pub company_slug: String,
    pub function: Option<String>,
    pub url: Option<String>,
}

impl From<&JobFeedItem> for FeedEntry {
    fn from(item: &JobFeedItem) -> Self {
        let job = &item.job;
        Self {
            event: item.event_type,
            at: item.event_time,
            title: job.display_title().to_string(),
            company: job.company_label().to_string(),
            company_slug: job.company_slug.clone(),
            function: job.function.clone(),
            url: job.job_url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobFeed {
    pub added: usize,
    pub removed: usize,
    /// Backend order, newest event first.
    pub entries: Vec<FeedEntry>,
    pub empty_notice: Option<String>,
}

impl JobFeed {
    pub fn build(items: &[JobFeedItem]) -> Self {
        let added = items
            .iter()
            .filter(|i| i.event_type == FeedEventType::Added)
            .count();
        Self {
            added,
            removed: items.len() - added,
            entries: items.iter().map(FeedEntry::from).collect(),
            empty_notice: items.is_empty().then(|| NO_FEED_EVENTS.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedView {
    pub feed: PanelState<JobFeed>,
}

pub async fn load_feed<S>(source: &S, limit: u32) -> FeedView
where
    S: DashboardSource + ?Sized,
{
    let feed = PanelState::from_result("job feed", source.jobs_feed(limit).await)
        .map(|items| JobFeed::build(&items));
    if let Some(f) = feed.loaded() {
        info!("Job feed: {} added, {} removed", f.added, f.removed);
    }
    FeedView { feed }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FeedJob;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn item(event_type: FeedEventType, name: Option<&str>) -> JobFeedItem {
        JobFeedItem {
            event_type,
            event_time: NaiveDate::from_ymd_opt(2025, 1, 8)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap(),
            job: FeedJob {
                id: Uuid::new_v4(),
                company_slug: "acme".into(),
                company_name: name.map(String::from),
                title_raw: "ML Eng".into(),
                normalized_title: Some("Machine Learning Engineer".into()),
                function: None,
                seniority: None,
                job_url: None,
            },
        }
    }

    #[test]
    fn test_feed_counts_events() {
        let feed = JobFeed::build(&[
            item(FeedEventType::Added, Some("Acme")),
            item(FeedEventType::Removed, None),
            item(FeedEventType::Added, Some("")),
        ]);
        assert_eq!((feed.added, feed.removed), (2, 1));
        assert_eq!(feed.entries[0].title, "Machine Learning Engineer");
        assert_eq!(feed.entries[0].company, "Acme");
        assert_eq!(feed.entries[1].company, "acme");
        assert_eq!(feed.entries[2].company, "acme");
        assert_eq!(feed.empty_notice, None);
    }

    #[test]
    fn test_empty_feed_notice() {
        assert_eq!(
            JobFeed::build(&[]).empty_notice.as_deref(),
            Some(NO_FEED_EVENTS)
        );
    }
}
