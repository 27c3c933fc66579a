//! App registry loader

use crate::api::{AnalyticsApi, AppDescriptor};
use crate::session::Session;

/// Fetch the application list.
///
/// Never fails: any error (including `401`) is logged and an empty list is
/// returned so the rest of the dashboard keeps working.
pub async fn load_apps(api: &dyn AnalyticsApi, session: &Session) -> Vec<AppDescriptor> {
    match api.list_apps(session).await {
        Ok(apps) => {
            tracing::info!(count = apps.len(), "Loaded applications");
            apps
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch applications");
            Vec::new()
        }
    }
}
