//! Data Transfer Objects
//!
//! Request and response shapes of the analytics REST API.

use serde::{Deserialize, Serialize};

// ============================================
// Auth
// ============================================

/// Login credentials
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Successful login response
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Error body returned by the API (`{"detail": "..."}`)
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorDetail {
    pub detail: serde_json::Value,
}

impl ErrorDetail {
    /// Human-readable message; validation errors arrive as arrays
    pub fn message(&self) -> Option<String> {
        match &self.detail {
            serde_json::Value::String(s) if s.trim().is_empty() => None,
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

// ============================================
// Apps
// ============================================

/// An application (site) known to the analytics backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppDescriptor {
    pub app_name: String,
    pub domain: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_seen: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_seen: Option<String>,
}

impl AppDescriptor {
    pub fn new(app_name: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            domain: domain.into(),
            event_count: None,
            user_count: None,
            first_seen: None,
            last_seen: None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AppsResponse {
    #[serde(default)]
    pub apps: Vec<AppDescriptor>,
}

// ============================================
// Analytics
// ============================================

/// One point of the users trend series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: String,
    pub users: u64,
}

/// Aggregate metrics for the selected window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    pub total_users: u64,
    pub total_users_change: f64,
    pub event_count: u64,
    pub event_count_change: f64,
    pub conversions: u64,
    pub conversions_change: f64,
    pub new_users: u64,
    pub new_users_change: f64,
    #[serde(default)]
    pub trend_data: Vec<TrendPoint>,
}

/// Active users in one minute bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinuteCount {
    pub minute: String,
    pub users: u64,
}

/// Active users from one country
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryCount {
    pub country: String,
    pub users: u64,
}

/// Short-horizon (30 minute) view of activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RealtimeSnapshot {
    pub active_users: u64,
    #[serde(default)]
    pub users_by_minute: Vec<MinuteCount>,
    #[serde(default)]
    pub users_by_country: Vec<CountryCount>,
}
