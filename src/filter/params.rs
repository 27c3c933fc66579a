//! Request parameter derivation
//!
//! Turns the filter selection and the loaded registry into the query
//! parameters of the summary and realtime endpoints.

use super::registry::{sanitize, AppRegistry};
use super::selection::{AppSelection, FilterSelection, TimeRange};
use chrono::{DateTime, SecondsFormat, Utc};

/// App/domain pair sent to the API, already sanitized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppFilter {
    pub app_name: String,
    pub domain: String,
}

impl AppFilter {
    /// Resolve a selection against the registry.
    ///
    /// An unknown key (registry still loading, list changed) yields `None`,
    /// which the API treats as "all applications".
    pub fn resolve(selection: &AppSelection, registry: &AppRegistry) -> Option<Self> {
        let key = match selection {
            AppSelection::All => return None,
            AppSelection::App(key) => key,
        };

        match registry.find(key) {
            Some(app) => Some(Self {
                app_name: sanitize(&app.app_name),
                domain: sanitize(&app.domain),
            }),
            None => {
                tracing::debug!(key = %key, "Selected application not in registry, using all");
                None
            }
        }
    }

    fn push_query(&self, query: &mut Vec<(&'static str, String)>) {
        query.push(("app_name", self.app_name.clone()));
        query.push(("domain", self.domain.clone()));
    }
}

/// Start/end pair for a summary request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl SummaryWindow {
    pub fn ending_at(end: DateTime<Utc>, range: TimeRange) -> Self {
        Self {
            start: end - range.duration(),
            end,
        }
    }

    pub fn duration(&self) -> chrono::Duration {
        self.end - self.start
    }
}

/// Parameters of `GET /api/analytics/summary`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryParams {
    pub window: SummaryWindow,
    pub app: Option<AppFilter>,
}

impl SummaryParams {
    /// Derive parameters with the window ending at `now`
    pub fn derive(filter: &FilterSelection, registry: &AppRegistry, now: DateTime<Utc>) -> Self {
        Self {
            window: SummaryWindow::ending_at(now, filter.time_range),
            app: AppFilter::resolve(&filter.app, registry),
        }
    }

    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("start_date", format_timestamp(self.window.start)),
            ("end_date", format_timestamp(self.window.end)),
        ];
        if let Some(app) = &self.app {
            app.push_query(&mut query);
        }
        query
    }
}

/// Parameters of `GET /api/analytics/realtime`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RealtimeParams {
    pub app: Option<AppFilter>,
}

impl RealtimeParams {
    pub fn derive(filter: &FilterSelection, registry: &AppRegistry) -> Self {
        Self {
            app: AppFilter::resolve(&filter.app, registry),
        }
    }

    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(app) = &self.app {
            app.push_query(&mut query);
        }
        query
    }
}

/// RFC 3339, UTC, millisecond precision (`2024-01-01T00:00:00.000Z`)
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}
