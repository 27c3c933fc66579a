//! Dashboard state
//!
//! Snapshot published to the renderer after every change.

use crate::api::{AnalyticsSummary, RealtimeSnapshot};
use crate::filter::{AppRegistry, FilterSelection};
use chrono::{DateTime, Utc};
use tokio::sync::watch;

/// Everything the view needs to draw the dashboard
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    /// Applications loaded at mount
    pub registry: AppRegistry,
    /// Current selection
    pub filter: FilterSelection,
    /// Last successfully fetched summary, kept while a new one loads
    pub summary: Option<AnalyticsSummary>,
    /// Last successfully fetched realtime snapshot
    pub realtime: Option<RealtimeSnapshot>,
    pub summary_updated_at: Option<DateTime<Utc>>,
    pub realtime_updated_at: Option<DateTime<Utc>>,
    summary_in_flight: usize,
}

impl DashboardState {
    pub fn new(filter: FilterSelection) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }

    /// True while at least one summary request is outstanding
    pub fn loading(&self) -> bool {
        self.summary_in_flight > 0
    }
}

/// Holds the loading flag up for as long as it lives
pub(crate) struct LoadingGuard<'a> {
    state: &'a watch::Sender<DashboardState>,
}

impl<'a> LoadingGuard<'a> {
    pub(crate) fn acquire(state: &'a watch::Sender<DashboardState>) -> Self {
        state.send_modify(|s| s.summary_in_flight += 1);
        Self { state }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.state
            .send_modify(|s| s.summary_in_flight = s.summary_in_flight.saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_sets_and_clears_loading() {
        let (tx, rx) = watch::channel(DashboardState::default());
        assert!(!rx.borrow().loading());

        {
            let _guard = LoadingGuard::acquire(&tx);
            assert!(rx.borrow().loading());
        }

        assert!(!rx.borrow().loading());
    }

    #[test]
    fn test_overlapping_guards() {
        let (tx, rx) = watch::channel(DashboardState::default());

        let first = LoadingGuard::acquire(&tx);
        let second = LoadingGuard::acquire(&tx);
        drop(first);
        assert!(rx.borrow().loading());

        drop(second);
        assert!(!rx.borrow().loading());
    }
}
