//! Realtime widget

use super::{format_number, SKELETON};
use crate::api::RealtimeSnapshot;

const TOP_COUNTRIES: usize = 5;
const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Render the widget; a skeleton is shown while loading or before any data
pub fn render_realtime(snapshot: Option<&RealtimeSnapshot>, loading: bool) -> Vec<String> {
    let snapshot = match snapshot {
        Some(snapshot) if !loading => snapshot,
        _ => {
            return vec![
                SKELETON.repeat(14),
                SKELETON.repeat(8),
                SKELETON.repeat(30),
                SKELETON.repeat(20),
            ]
        }
    };

    let mut lines = vec![
        "Real-time (Last 30 min)".to_string(),
        format_number(snapshot.active_users),
        "Active users right now".to_string(),
        String::new(),
        "Users per minute".to_string(),
        sparkline(snapshot.users_by_minute.iter().map(|m| m.users)),
        String::new(),
        "Users by country".to_string(),
    ];

    if snapshot.users_by_country.is_empty() {
        lines.push("No active users by country".to_string());
    } else {
        let width = snapshot
            .users_by_country
            .iter()
            .take(TOP_COUNTRIES)
            .map(|c| c.country.chars().count())
            .max()
            .unwrap_or(0);

        for country in snapshot.users_by_country.iter().take(TOP_COUNTRIES) {
            lines.push(format!(
                "{:<w$}  {}",
                country.country,
                format_number(country.users),
                w = width
            ));
        }
    }

    lines
}

fn sparkline(values: impl Iterator<Item = u64> + Clone) -> String {
    let max = values.clone().max().unwrap_or(0);
    values
        .map(|v| {
            if max == 0 {
                SPARK_LEVELS[0]
            } else {
                let level = (v * (SPARK_LEVELS.len() as u64 - 1)) / max;
                SPARK_LEVELS[level as usize]
            }
        })
        .collect()
}
