//! Metric card
//!
//! One headline number with its change against the previous period.

use super::{format_number, SKELETON};

/// Width of the card body in characters
const CARD_WIDTH: usize = 24;

/// Render a card as three lines: title, value, change
pub fn render_metric_card(title: &str, value: u64, change: f64, loading: bool) -> Vec<String> {
    if loading {
        return vec![
            pad(&SKELETON.repeat(CARD_WIDTH * 6 / 10)),
            pad(&SKELETON.repeat(CARD_WIDTH * 8 / 10)),
            pad(&SKELETON.repeat(CARD_WIDTH * 4 / 10)),
        ];
    }

    vec![
        pad(title),
        pad(&format_number(value)),
        pad(&format!("{} vs previous period", format_change(change))),
    ]
}

/// `+12.5%`, `-3.0%`; zero counts as positive
pub fn format_change(change: f64) -> String {
    let arrow = if change >= 0.0 { "▲" } else { "▼" };
    let sign = if change >= 0.0 { "+" } else { "" };
    format!("{} {}{:.1}%", arrow, sign, change)
}

fn pad(text: &str) -> String {
    format!("{:<width$}", text, width = CARD_WIDTH)
}
