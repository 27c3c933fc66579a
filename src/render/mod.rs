//! View Renderer
//!
//! Pure text presentation of a [`DashboardState`]: metric cards, the trend
//! chart and the realtime widget. Nothing here fetches or mutates state.

mod metric_card;
mod realtime;
mod trend;

pub use metric_card::{format_change, render_metric_card};
pub use realtime::render_realtime;
pub use trend::{render_trend, trend_label};

use crate::dashboard::DashboardState;
use crate::filter::{display_label, AppSelection};

/// Placeholder glyph for skeleton content
pub const SKELETON: &str = "░";

/// Render the whole dashboard
pub fn render_dashboard(state: &DashboardState) -> String {
    let loading = state.loading();
    let summary = state.summary.as_ref();
    let mut out = Vec::new();

    out.push(format!(
        "Analytics Dashboard  ·  {}  ·  {}{}",
        selected_app_label(state),
        state.filter.time_range.label(),
        if loading { "  ·  loading…" } else { "" }
    ));
    out.push(String::new());

    let cards = [
        (
            "Users",
            summary.map(|s| (s.total_users, s.total_users_change)),
        ),
        (
            "Event count",
            summary.map(|s| (s.event_count, s.event_count_change)),
        ),
        (
            "Conversions",
            summary.map(|s| (s.conversions, s.conversions_change)),
        ),
        (
            "New users",
            summary.map(|s| (s.new_users, s.new_users_change)),
        ),
    ];
    let rendered: Vec<Vec<String>> = cards
        .iter()
        .map(|(title, values)| {
            let (value, change) = values.unwrap_or((0, 0.0));
            render_metric_card(title, value, change, loading)
        })
        .collect();
    for row in 0..3 {
        let line: Vec<&str> = rendered.iter().map(|card| card[row].as_str()).collect();
        out.push(line.join("  ").trim_end().to_string());
    }
    out.push(String::new());

    out.push("Users trend".to_string());
    let trend = summary.map(|s| s.trend_data.as_slice()).unwrap_or(&[]);
    out.extend(render_trend(trend, state.filter.time_range, loading));
    out.push(String::new());

    out.extend(render_realtime(state.realtime.as_ref(), loading));

    out.join("\n")
}

fn selected_app_label(state: &DashboardState) -> String {
    match &state.filter.app {
        AppSelection::All => "All Apps".to_string(),
        AppSelection::App(key) => state
            .registry
            .find(key)
            .map(display_label)
            .unwrap_or_else(|| key.clone()),
    }
}

/// Integer with `,` thousands separators
pub fn format_number(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::AppDescriptor;
    use crate::filter::{AppRegistry, FilterSelection, TimeRange};
    use crate::test_utils::{sample_realtime, sample_summary};

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn test_render_full_dashboard() {
        let mut state = DashboardState::new(FilterSelection::new(
            AppSelection::from_key("site_a.com"),
            TimeRange::Last30Days,
        ));
        state.registry = AppRegistry::new(vec![AppDescriptor::new("site", "a.com")]);
        state.summary = Some(sample_summary(120));
        state.realtime = Some(sample_realtime(3));

        let text = render_dashboard(&state);
        assert!(text.starts_with("Analytics Dashboard  ·  site (a.com)  ·  Last 30 days"));
        assert!(text.contains("Event count"));
        assert!(text.contains("12,345"));
        assert!(text.contains("▼ -4.0% vs previous period"));
        assert!(text.contains("Mar 9"));
        assert!(text.contains("Real-time (Last 30 min)"));
        assert!(!text.contains(SKELETON));
    }

    #[test]
    fn test_render_before_data_arrives() {
        let state = DashboardState::default();
        let text = render_dashboard(&state);

        assert!(text.contains("All Apps"));
        assert!(text.contains("No trend data for this period"));
        // Realtime widget shows its skeleton until the first snapshot
        assert!(text.contains(SKELETON));
    }

    #[test]
    fn test_unknown_selection_shows_key() {
        let state = DashboardState::new(FilterSelection::new(
            AppSelection::from_key("gone_x.org"),
            TimeRange::Last7Days,
        ));
        assert!(render_dashboard(&state).contains("gone_x.org"));
    }
}
