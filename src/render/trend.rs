//! Trend chart
//!
//! Horizontal bar chart of users over the selected window.

use super::{format_number, SKELETON};
use crate::api::TrendPoint;
use crate::filter::TimeRange;
use chrono::{DateTime, NaiveDate, NaiveDateTime};

const BAR_WIDTH: usize = 40;
const BAR: &str = "█";

/// Render the chart, one row per point
pub fn render_trend(points: &[TrendPoint], range: TimeRange, loading: bool) -> Vec<String> {
    if loading {
        return (0..6).map(|_| SKELETON.repeat(BAR_WIDTH + 10)).collect();
    }
    if points.is_empty() {
        return vec!["No trend data for this period".to_string()];
    }

    let max = points.iter().map(|p| p.users).max().unwrap_or(0);
    let labels: Vec<String> = points.iter().map(|p| trend_label(&p.date, range)).collect();
    let label_width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);

    points
        .iter()
        .zip(labels)
        .map(|(point, label)| {
            format!(
                "{:>lw$} │{:<bw$} {}",
                label,
                bar(point.users, max),
                format_number(point.users),
                lw = label_width,
                bw = BAR_WIDTH
            )
        })
        .collect()
}

fn bar(users: u64, max: u64) -> String {
    if max == 0 || users == 0 {
        return String::new();
    }
    let len = ((users as f64 / max as f64) * BAR_WIDTH as f64).round() as usize;
    BAR.repeat(len.max(1))
}

/// `HH:MM` for the 24 hour range, `Mon D` otherwise; unparsable dates pass through
pub fn trend_label(date: &str, range: TimeRange) -> String {
    match parse_date(date) {
        Some(ts) if range == TimeRange::Last24Hours => ts.format("%H:%M").to_string(),
        Some(ts) => ts.format("%b %-d").to_string(),
        None => date.to_string(),
    }
}

fn parse_date(date: &str) -> Option<NaiveDateTime> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(date) {
        return Some(ts.naive_utc());
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(date, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}
