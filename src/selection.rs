// src/selection.rs
//! Last-selection-wins publishing for the selected company panel.
//!
//! Every selection bumps a generation counter and hands out a `Ticket`. A
//! fetch completing later publishes with its ticket and is applied only if no
//! newer selection was made in the meantime.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, warn};

use crate::core::{ApiError, DashboardSource};
use crate::types::{CompanyDetail, CompanySummary};

/// Generation captured when a selection was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

impl Ticket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

#[derive(Debug)]
struct SlotState<T> {
    generation: u64,
    value: Option<T>,
}

/// Holds the view state of one selection-driven panel.
#[derive(Debug)]
pub struct SelectionSlot<T> {
    state: Mutex<SlotState<T>>,
}

impl<T> Default for SelectionSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SelectionSlot<T> {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(SlotState {
                generation: 0,
                value: None,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SlotState<T>> {
        // The state is always left consistent, so a poisoned lock is usable.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start a new selection. Results of every earlier ticket become stale.
    pub fn select(&self) -> Ticket {
        let mut state = self.lock();
        state.generation += 1;
        debug!("Selection generation is now {}", state.generation);
        Ticket(state.generation)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.lock().generation == ticket.0
    }

    /// Replace the slot's value if `ticket` is still the latest selection.
    /// Returns whether the value was applied.
    pub fn publish(&self, ticket: Ticket, value: T) -> bool {
        let mut state = self.lock();
        if state.generation != ticket.0 {
            warn!(
                "Discarding stale result for generation {} (current is {})",
                ticket.0, state.generation
            );
            return false;
        }
        state.value = Some(value);
        true
    }

    /// Drop the current value without starting a selection.
    pub fn clear(&self) {
        self.lock().value = None;
    }

    pub fn generation(&self) -> u64 {
        self.lock().generation
    }
}

impl<T: Clone> SelectionSlot<T> {
    pub fn current(&self) -> Option<T> {
        self.lock().value.clone()
    }
}

/// Company detail joined with its optional weekly summary.
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyPanel {
    pub detail: CompanyDetail,
    pub summary: Option<CompanySummary>,
}

/// Fetch detail and summary concurrently. The detail is required; a failed
/// summary fetch is logged and the panel proceeds without it.
pub async fn load_company_panel<S>(source: &S, slug: &str) -> Result<CompanyPanel, ApiError>
where
    S: DashboardSource + ?Sized,
{
    let (detail, summary) = tokio::join!(source.company(slug), source.company_summary(slug));
    let detail = detail?;

    let summary = match summary {
        Ok(summary) => Some(summary),
        Err(e) => {
            warn!("Proceeding without weekly summary for {}: {}", slug, e);
            None
        }
    };

    Ok(CompanyPanel { detail, summary })
}
