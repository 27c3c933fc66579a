//! Test utilities
//!
//! Scriptable in-process [`AnalyticsApi`] used by the session, loader and
//! dashboard tests.

use crate::api::{
    AnalyticsApi, AnalyticsSummary, ApiError, ApiResult, AppDescriptor, CountryCount, Credentials,
    MinuteCount, RealtimeSnapshot, TrendPoint,
};
use crate::filter::{RealtimeParams, SummaryParams};
use crate::session::Session;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

pub const DEMO_EMAIL: &str = "demo@analytics.com";
pub const DEMO_PASSWORD: &str = "demo123";
pub const DEMO_TOKEN: &str = "demo-token";

/// How the fake answers an endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Reply {
    #[default]
    Ok,
    Unauthorized,
    ServerError,
}

impl Reply {
    fn into_result(self) -> ApiResult<()> {
        match self {
            Reply::Ok => Ok(()),
            Reply::Unauthorized => Err(ApiError::Unauthorized),
            Reply::ServerError => Err(ApiError::Status {
                status: 500,
                message: "internal error".to_string(),
            }),
        }
    }
}

/// Fake analytics backend.
///
/// Summaries report the window length in days as `total_users` and
/// realtime snapshots report the call ordinal as `active_users`, so tests
/// can tell which request a value came from.
#[derive(Default)]
pub struct FakeApi {
    apps: Vec<AppDescriptor>,
    pub apps_reply: Mutex<Reply>,
    pub summary_reply: Mutex<Reply>,
    pub realtime_reply: Mutex<Reply>,
    pub summary_delay: Mutex<Duration>,
    pub realtime_delay: Mutex<Duration>,
    pub apps_calls: AtomicUsize,
    pub summary_calls: Mutex<Vec<SummaryParams>>,
    pub realtime_calls: Mutex<Vec<RealtimeParams>>,
    pub tokens_seen: Mutex<Vec<Option<String>>>,
}

impl FakeApi {
    pub fn with_apps(apps: Vec<AppDescriptor>) -> Self {
        Self {
            apps,
            ..Self::default()
        }
    }

    pub fn set_summary_reply(&self, reply: Reply) {
        *self.summary_reply.lock().unwrap() = reply;
    }

    pub fn set_realtime_reply(&self, reply: Reply) {
        *self.realtime_reply.lock().unwrap() = reply;
    }

    pub fn set_apps_reply(&self, reply: Reply) {
        *self.apps_reply.lock().unwrap() = reply;
    }

    pub fn set_summary_delay(&self, delay: Duration) {
        *self.summary_delay.lock().unwrap() = delay;
    }

    pub fn set_realtime_delay(&self, delay: Duration) {
        *self.realtime_delay.lock().unwrap() = delay;
    }

    pub fn summary_count(&self) -> usize {
        self.summary_calls.lock().unwrap().len()
    }

    pub fn realtime_count(&self) -> usize {
        self.realtime_calls.lock().unwrap().len()
    }

    pub fn last_summary(&self) -> Option<SummaryParams> {
        self.summary_calls.lock().unwrap().last().cloned()
    }

    pub fn last_realtime(&self) -> Option<RealtimeParams> {
        self.realtime_calls.lock().unwrap().last().cloned()
    }
}

pub fn sample_summary(total_users: u64) -> AnalyticsSummary {
    AnalyticsSummary {
        total_users,
        total_users_change: 12.5,
        event_count: 12_345,
        event_count_change: -4.0,
        conversions: 17,
        conversions_change: 0.0,
        new_users: 40,
        new_users_change: 100.0,
        trend_data: vec![
            TrendPoint {
                date: "2024-03-08".to_string(),
                users: 10,
            },
            TrendPoint {
                date: "2024-03-09".to_string(),
                users: 20,
            },
        ],
    }
}

pub fn sample_realtime(active_users: u64) -> RealtimeSnapshot {
    RealtimeSnapshot {
        active_users,
        users_by_minute: vec![
            MinuteCount {
                minute: "12:00".to_string(),
                users: 1,
            },
            MinuteCount {
                minute: "12:01".to_string(),
                users: 3,
            },
        ],
        users_by_country: vec![CountryCount {
            country: "NL".to_string(),
            users: 2,
        }],
    }
}

#[async_trait]
impl AnalyticsApi for FakeApi {
    async fn login(&self, credentials: &Credentials) -> ApiResult<String> {
        if credentials.email == DEMO_EMAIL && credentials.password == DEMO_PASSWORD {
            Ok(DEMO_TOKEN.to_string())
        } else {
            Err(ApiError::LoginRejected(
                "Incorrect email or password".to_string(),
            ))
        }
    }

    async fn list_apps(&self, session: &Session) -> ApiResult<Vec<AppDescriptor>> {
        self.apps_calls.fetch_add(1, Ordering::SeqCst);
        self.tokens_seen.lock().unwrap().push(session.token());
        let reply = *self.apps_reply.lock().unwrap();
        reply.into_result()?;
        Ok(self.apps.clone())
    }

    async fn summary(
        &self,
        session: &Session,
        params: &SummaryParams,
    ) -> ApiResult<AnalyticsSummary> {
        self.summary_calls.lock().unwrap().push(params.clone());
        self.tokens_seen.lock().unwrap().push(session.token());
        let delay = *self.summary_delay.lock().unwrap();
        let reply = *self.summary_reply.lock().unwrap();

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        reply.into_result()?;
        Ok(sample_summary(params.window.duration().num_days() as u64))
    }

    async fn realtime(
        &self,
        session: &Session,
        params: &RealtimeParams,
    ) -> ApiResult<RealtimeSnapshot> {
        let ordinal = {
            let mut calls = self.realtime_calls.lock().unwrap();
            calls.push(params.clone());
            calls.len() as u64
        };
        self.tokens_seen.lock().unwrap().push(session.token());
        let delay = *self.realtime_delay.lock().unwrap();
        let reply = *self.realtime_reply.lock().unwrap();

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        reply.into_result()?;
        Ok(sample_realtime(ordinal))
    }
}
