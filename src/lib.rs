//! # Pulseboard
//!
//! Analytics dashboard client: authenticates against the analytics API,
//! fetches pre-aggregated metrics and realtime counters, and keeps them
//! fresh as the user changes filters.
//!
//! ## Modules
//!
//! - [`session`]: Bearer token storage
//! - [`api`]: REST client and the [`AnalyticsApi`] seam
//! - [`filter`]: Filter selection and request parameter derivation
//! - [`dashboard`]: Fetch orchestration and realtime polling
//! - [`render`]: Text presentation of the dashboard state
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pulseboard::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api: Arc<dyn AnalyticsApi> = Arc::new(AnalyticsClient::new(ClientConfig::default())?);
//!     let session = Session::in_memory();
//!
//!     session::login(api.as_ref(), &session, &Credentials::new("demo@analytics.com", "demo123")).await?;
//!
//!     let dashboard = Dashboard::mount(api, session, DashboardConfig::default(), Arc::new(|| {})).await;
//!     dashboard.set_time_range(TimeRange::Last24Hours).await;
//!
//!     println!("{}", render_dashboard(&dashboard.snapshot()));
//!
//!     dashboard.unmount().await;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod dashboard;
pub mod filter;
pub mod render;
pub mod session;
pub mod shell;

#[cfg(test)]
pub(crate) mod test_utils;

pub use api::{
    AnalyticsApi, AnalyticsClient, AnalyticsSummary, ApiError, ApiResult, AppDescriptor,
    ClientConfig, Credentials, RealtimeSnapshot,
};

pub use config::{Config, ConfigError, LoggingConfig};

pub use dashboard::{Dashboard, DashboardConfig, DashboardState, LogoutHook, PollHandle};

pub use filter::{
    AppFilter, AppRegistry, AppSelection, FilterError, FilterSelection, RealtimeParams,
    SummaryParams, TimeRange,
};

pub use render::render_dashboard;

pub use session::{FileTokenStore, MemoryTokenStore, Session, SessionError, TokenStore};
