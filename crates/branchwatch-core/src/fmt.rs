//! Shared formatting helpers for the terminal UI and the dump tool.
//!
//! Pure string formatting only: no ratatui styles, no layout.

use chrono::{DateTime, Local, TimeZone};

/// Percentage with two decimals: `"72.78%"`.
pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value)
}

/// Interval as a short human-readable string: `"10s"`, `"1m"`, `"1m30s"`, `"1h"`.
pub fn format_interval_ms(ms: u64) -> String {
    if ms % 1000 != 0 || ms == 0 {
        return format!("{}ms", ms);
    }
    let secs = ms / 1000;
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        match secs % 60 {
            0 => format!("{}m", secs / 60),
            s => format!("{}m{}s", secs / 60, s),
        }
    } else {
        match (secs % 3600) / 60 {
            0 => format!("{}h", secs / 3600),
            m => format!("{}h{}m", secs / 3600, m),
        }
    }
}

/// Unix timestamp as local `"YYYY-MM-DD HH:MM:SS"`, or `"----"` if out of range.
pub fn format_local_time(timestamp: i64) -> String {
    Local
        .timestamp_opt(timestamp, 0)
        .single()
        .map(|dt: DateTime<Local>| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "----".to_string())
}

/// Truncates to `max_chars` characters, ending with `…` when cut.
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    if max_chars == 0 {
        return String::new();
    }
    let mut out: String = s.chars().take(max_chars - 1).collect();
    out.push('…');
    out
}
