//! Analytics API
//!
//! REST client for the analytics backend and the [`AnalyticsApi`] seam the
//! dashboard fetches through.
//!
//! ## Endpoints
//!
//! - `POST /api/auth/login` - exchange credentials for a bearer token
//! - `GET /api/apps` - applications known to the backend
//! - `GET /api/analytics/summary` - aggregate metrics plus trend series
//! - `GET /api/analytics/realtime` - last 30 minutes of activity
//!
//! Every authenticated call sends `Authorization: Bearer <token>` taken from
//! the [`Session`] passed in.

mod client;
mod dto;
mod error;

pub use client::{AnalyticsClient, ClientConfig, DEFAULT_API_URL};
pub use dto::{
    AnalyticsSummary, AppDescriptor, AppsResponse, CountryCount, Credentials, ErrorDetail,
    MinuteCount, RealtimeSnapshot, TokenResponse, TrendPoint,
};
pub use error::{ApiError, ApiResult, LOGIN_FAILED_MESSAGE};

use crate::filter::{RealtimeParams, SummaryParams};
use crate::session::Session;
use async_trait::async_trait;

/// Operations the dashboard needs from the analytics backend
#[async_trait]
pub trait AnalyticsApi: Send + Sync {
    /// Exchange credentials for an access token
    async fn login(&self, credentials: &Credentials) -> ApiResult<String>;

    /// List available applications
    async fn list_apps(&self, session: &Session) -> ApiResult<Vec<AppDescriptor>>;

    /// Fetch the summary for a window and optional app
    async fn summary(
        &self,
        session: &Session,
        params: &SummaryParams,
    ) -> ApiResult<AnalyticsSummary>;

    /// Fetch the realtime snapshot for an optional app
    async fn realtime(
        &self,
        session: &Session,
        params: &RealtimeParams,
    ) -> ApiResult<RealtimeSnapshot>;
}
