//! Filter State
//!
//! Selection of application and time range, the registry of known
//! applications, and the derivation of outbound query parameters.
//!
//! ## Derivation rules
//!
//! - `all` sends no `app_name`/`domain`
//! - a known synthetic key sends that descriptor's sanitized pair
//! - an unknown key silently falls back to `all`
//! - the summary window always ends at the moment of the fetch

mod params;
mod registry;
mod selection;

pub use params::{format_timestamp, AppFilter, RealtimeParams, SummaryParams, SummaryWindow};
pub use registry::{display_label, sanitize, synthetic_key, AppRegistry};
pub use selection::{AppSelection, FilterError, FilterSelection, TimeRange, ALL_APPS_KEY};
