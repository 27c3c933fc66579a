//! Analytics REST API Client
//!
//! HTTP client for the analytics backend.

use super::dto::{
    AnalyticsSummary, AppDescriptor, AppsResponse, Credentials, ErrorDetail, RealtimeSnapshot,
    TokenResponse,
};
use super::error::{ApiError, ApiResult, LOGIN_FAILED_MESSAGE};
use super::AnalyticsApi;
use crate::filter::{RealtimeParams, SummaryParams};
use crate::session::Session;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

/// Default API location
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Header carrying the per-request correlation id
const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Configuration for the analytics client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL (e.g., "http://localhost:8000")
    pub base_url: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            request_timeout_ms: 30_000,
        }
    }
}

/// Analytics REST API client
pub struct AnalyticsClient {
    client: Client,
    config: ClientConfig,
}

impl AnalyticsClient {
    /// Create a new client with the given configuration
    pub fn new(config: ClientConfig) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(config.request_timeout_ms))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Attach the bearer token (when present) and a fresh request id
    fn authorize(&self, builder: RequestBuilder, session: &Session, request_id: &str) -> RequestBuilder {
        let builder = builder.header(REQUEST_ID_HEADER, request_id);
        match session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        session: &Session,
        query: &[(&'static str, String)],
    ) -> ApiResult<T> {
        let request_id = uuid::Uuid::new_v4().to_string();
        let builder = self.client.get(self.url(path)).query(query);
        let response = self.authorize(builder, session, &request_id).send().await?;

        tracing::debug!(
            request_id = %request_id,
            path,
            status = response.status().as_u16(),
            "Analytics API response"
        );

        let response = check_status(response).await?;
        Ok(response.json().await?)
    }
}

/// Map non-success statuses onto [`ApiError`]
async fn check_status(response: Response) -> ApiResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::UNAUTHORIZED {
        return Err(ApiError::Unauthorized);
    }

    Err(ApiError::Status {
        status: status.as_u16(),
        message: error_message(response).await.unwrap_or_default(),
    })
}

/// Prefer the `detail` field, fall back to the raw body
async fn error_message(response: Response) -> Option<String> {
    let text = response.text().await.ok()?;
    match serde_json::from_str::<ErrorDetail>(&text) {
        Ok(detail) => detail.message(),
        Err(_) if text.is_empty() => None,
        Err(_) => Some(text),
    }
}

/// Only a parsed `detail` is shown to the user
async fn detail_message(response: Response) -> Option<String> {
    response.json::<ErrorDetail>().await.ok()?.message()
}

#[async_trait]
impl AnalyticsApi for AnalyticsClient {
    async fn login(&self, credentials: &Credentials) -> ApiResult<String> {
        let request_id = uuid::Uuid::new_v4().to_string();
        let response = self
            .client
            .post(self.url("/api/auth/login"))
            .header(REQUEST_ID_HEADER, &request_id)
            .json(credentials)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!(request_id = %request_id, status = status.as_u16(), "Login response");

        if !status.is_success() {
            let message = detail_message(response)
                .await
                .unwrap_or_else(|| LOGIN_FAILED_MESSAGE.to_string());
            return Err(ApiError::LoginRejected(message));
        }

        let token: TokenResponse = response.json().await?;
        Ok(token.access_token)
    }

    async fn list_apps(&self, session: &Session) -> ApiResult<Vec<AppDescriptor>> {
        let response: AppsResponse = self.get_json("/api/apps", session, &[]).await?;
        Ok(response.apps)
    }

    async fn summary(
        &self,
        session: &Session,
        params: &SummaryParams,
    ) -> ApiResult<AnalyticsSummary> {
        self.get_json("/api/analytics/summary", session, &params.query())
            .await
    }

    async fn realtime(
        &self,
        session: &Session,
        params: &RealtimeParams,
    ) -> ApiResult<RealtimeSnapshot> {
        self.get_json("/api/analytics/realtime", session, &params.query())
            .await
    }
}
