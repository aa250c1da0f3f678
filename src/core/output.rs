//! Compact output rendering helpers for CLI surfaces.

use crate::core::model::RiskLevel;
use colored::{ColoredString, Colorize};

/// Collapse newlines/extra whitespace and bound length for terminal display.
pub fn compact_line(input: &str, max_chars: usize) -> String {
    let collapsed = input.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut chars = collapsed.chars();
    let preview: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{}...", preview)
    } else {
        preview
    }
}

/// Colored risk-level badge: green/amber/red, grey for Unknown.
pub fn risk_badge(level: RiskLevel) -> ColoredString {
    match level {
        RiskLevel::Low => "Low".green(),
        RiskLevel::Medium => "Medium".yellow(),
        RiskLevel::High => "High".red(),
        RiskLevel::Unknown => "Unknown".dimmed(),
    }
}

/// Render an optional field for table output.
pub fn or_dash(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => "-",
    }
}
