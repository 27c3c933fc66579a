//! Application registry
//!
//! The list of applications loaded at mount, addressed by synthetic key.

use crate::api::AppDescriptor;
use std::collections::HashSet;

/// Name the backend assigns to events recorded before apps were tracked
const LEGACY_APP_NAME: &str = "legacy";

/// Synthetic key of a descriptor: raw `app_name` and `domain` joined by `_`
pub fn synthetic_key(app: &AppDescriptor) -> String {
    format!("{}_{}", app.app_name, app.domain)
}

/// Strip stray quote characters left by an old ingestion bug
pub fn sanitize(value: &str) -> String {
    value.replace('"', "")
}

/// Label shown in the app picker
pub fn display_label(app: &AppDescriptor) -> String {
    let name = sanitize(&app.app_name);
    let domain = sanitize(&app.domain);

    if name == LEGACY_APP_NAME {
        format!("Legacy Data ({})", domain)
    } else {
        format!("{} ({})", name, domain)
    }
}

/// Loaded applications with unique synthetic keys
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppRegistry {
    apps: Vec<AppDescriptor>,
}

impl AppRegistry {
    /// Build a registry, keeping the first descriptor for each synthetic key
    pub fn new(apps: Vec<AppDescriptor>) -> Self {
        let mut seen = HashSet::with_capacity(apps.len());
        let mut unique = Vec::with_capacity(apps.len());

        for app in apps {
            let key = synthetic_key(&app);
            if seen.insert(key.clone()) {
                unique.push(app);
            } else {
                tracing::warn!(key = %key, "Dropping application with duplicate key");
            }
        }

        Self { apps: unique }
    }

    pub fn find(&self, key: &str) -> Option<&AppDescriptor> {
        self.apps.iter().find(|app| synthetic_key(app) == key)
    }

    pub fn apps(&self) -> &[AppDescriptor] {
        &self.apps
    }

    /// `(synthetic key, label)` pairs in load order
    pub fn options(&self) -> Vec<(String, String)> {
        self.apps
            .iter()
            .map(|app| (synthetic_key(app), display_label(app)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.apps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }
}
