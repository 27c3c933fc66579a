//! Dashboard coordinator
//!
//! Ties filter state to the summary and realtime fetchers, owns the
//! realtime poller and publishes a [`DashboardState`] after every change.

use super::loader::load_apps;
use super::poller::{spawn_poller, PollHandle};
use super::sequence::RequestSequence;
use super::state::{DashboardState, LoadingGuard};
use crate::api::AnalyticsApi;
use crate::filter::{AppRegistry, AppSelection, FilterSelection, RealtimeParams, SummaryParams, TimeRange};
use crate::session::Session;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex};

/// Called when the backend rejects the session; the shell should re-login
pub type LogoutHook = Arc<dyn Fn() + Send + Sync>;

/// Default realtime polling cadence
pub const DEFAULT_REALTIME_INTERVAL: Duration = Duration::from_secs(30);

/// Coordinator configuration
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub realtime_interval: Duration,
    pub initial_filter: FilterSelection,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            realtime_interval: DEFAULT_REALTIME_INTERVAL,
            initial_filter: FilterSelection::default(),
        }
    }
}

/// A mounted dashboard.
///
/// Dropping it (or calling [`Dashboard::unmount`]) stops the poller.
pub struct Dashboard {
    inner: Arc<Inner>,
    poller: Mutex<Option<PollHandle>>,
}

/// Shared with the poller task
struct Inner {
    api: Arc<dyn AnalyticsApi>,
    session: Session,
    state: watch::Sender<DashboardState>,
    summary_seq: RequestSequence,
    realtime_seq: RequestSequence,
    on_logout: LogoutHook,
    realtime_interval: Duration,
}

impl Dashboard {
    /// Load the registry once, then run the first fetch cycle and start polling
    pub async fn mount(
        api: Arc<dyn AnalyticsApi>,
        session: Session,
        config: DashboardConfig,
        on_logout: LogoutHook,
    ) -> Self {
        let dashboard = Self::new(api, session, config, on_logout);
        dashboard.start().await;
        dashboard
    }

    /// Build an idle dashboard; nothing is fetched until [`Dashboard::start`]
    pub fn new(
        api: Arc<dyn AnalyticsApi>,
        session: Session,
        config: DashboardConfig,
        on_logout: LogoutHook,
    ) -> Self {
        let (state, _) = watch::channel(DashboardState::new(config.initial_filter));

        Self {
            inner: Arc::new(Inner {
                api,
                session,
                state,
                summary_seq: RequestSequence::default(),
                realtime_seq: RequestSequence::default(),
                on_logout,
                realtime_interval: config.realtime_interval,
            }),
            poller: Mutex::new(None),
        }
    }

    /// Load the registry, fetch both views and start polling
    pub async fn start(&self) {
        tracing::info!(
            interval_secs = self.inner.realtime_interval.as_secs(),
            "Mounting dashboard"
        );

        let apps = load_apps(self.inner.api.as_ref(), &self.inner.session).await;
        self.inner
            .state
            .send_modify(|s| s.registry = AppRegistry::new(apps));

        self.restart_cycle().await;
    }

    /// Receiver notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<DashboardState> {
        self.inner.state.subscribe()
    }

    pub fn snapshot(&self) -> DashboardState {
        self.inner.state.borrow().clone()
    }

    pub fn filter(&self) -> FilterSelection {
        self.inner.state.borrow().filter.clone()
    }

    pub fn session(&self) -> &Session {
        &self.inner.session
    }

    pub async fn set_time_range(&self, time_range: TimeRange) {
        let mut filter = self.filter();
        filter.time_range = time_range;
        self.set_filter(filter).await;
    }

    pub async fn select_app(&self, app: AppSelection) {
        let mut filter = self.filter();
        filter.app = app;
        self.set_filter(filter).await;
    }

    /// Apply a new selection; an unchanged selection is a no-op
    pub async fn set_filter(&self, filter: FilterSelection) {
        let changed = self.inner.state.send_if_modified(|s| {
            if s.filter == filter {
                false
            } else {
                s.filter = filter.clone();
                true
            }
        });

        if changed {
            tracing::info!(
                app = filter.app.key(),
                days = filter.time_range.days(),
                "Filter changed"
            );
            self.restart_cycle().await;
        }
    }

    /// Re-run both fetchers now, leaving the poll cadence alone
    pub async fn refresh(&self) {
        tokio::join!(self.inner.fetch_summary(), self.inner.fetch_realtime());
    }

    pub async fn is_polling(&self) -> bool {
        self.poller
            .lock()
            .await
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }

    /// Stop polling and tear the dashboard down
    pub async fn unmount(self) {
        if let Some(handle) = self.poller.lock().await.take() {
            handle.stop();
        }
        tracing::info!("Dashboard unmounted");
    }

    /// Replace the poller with a fresh one, then fetch both immediately
    async fn restart_cycle(&self) {
        {
            let mut slot = self.poller.lock().await;
            if let Some(old) = slot.take() {
                old.stop();
            }

            let inner = Arc::clone(&self.inner);
            *slot = Some(spawn_poller(self.inner.realtime_interval, move || {
                let inner = Arc::clone(&inner);
                async move { inner.fetch_realtime().await }
            }));
        }

        self.refresh().await;
    }
}

impl Inner {
    async fn fetch_summary(&self) {
        let request_id = self.summary_seq.issue();
        let params = {
            let state = self.state.borrow();
            SummaryParams::derive(&state.filter, &state.registry, Utc::now())
        };

        let _loading = LoadingGuard::acquire(&self.state);

        match self.api.summary(&self.session, &params).await {
            Ok(summary) => {
                if self.summary_seq.is_current(request_id) {
                    self.state.send_modify(|s| {
                        s.summary = Some(summary);
                        s.summary_updated_at = Some(Utc::now());
                    });
                } else {
                    tracing::debug!(request_id, "Discarding stale summary response");
                }
            }
            Err(e) if e.is_unauthorized() => {
                tracing::warn!("Summary request unauthorized, ending session");
                self.session.clear();
                (self.on_logout)();
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch analytics summary");
            }
        }
    }

    async fn fetch_realtime(&self) {
        let request_id = self.realtime_seq.issue();
        let params = {
            let state = self.state.borrow();
            RealtimeParams::derive(&state.filter, &state.registry)
        };

        match self.api.realtime(&self.session, &params).await {
            Ok(snapshot) => {
                if self.realtime_seq.is_current(request_id) {
                    self.state.send_modify(|s| {
                        s.realtime = Some(snapshot);
                        s.realtime_updated_at = Some(Utc::now());
                    });
                } else {
                    tracing::debug!(request_id, "Discarding stale realtime response");
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch realtime data");
            }
        }
    }
}
