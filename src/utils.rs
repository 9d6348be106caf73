use chrono::{DateTime, Local, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use std::env;
use tracing_subscriber::EnvFilter;

static MONTH_LABEL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{2})$").expect("valid month regex"));

pub fn format_kg(v: f64) -> String {
    format!("{v:.2} kg CO₂")
}

/// Analytics amounts are shown with one decimal.
pub fn format_kg_tenths(v: f64) -> String {
    format!("{v:.1} kg CO₂")
}

pub fn format_percent(v: f64) -> String {
    format!("{v:.1}%")
}

/// Creation date in the local timezone.
pub fn format_local_date(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%Y-%m-%d").to_string()
}

/// "2025-03" becomes "Mar 2025"; any other label is returned as-is.
pub fn format_month_label(label: &str) -> String {
    let Some(caps) = MONTH_LABEL_RE.captures(label.trim()) else {
        return label.to_string();
    };
    let (Ok(year), Ok(month)) = (caps[1].parse::<i32>(), caps[2].parse::<u32>()) else {
        return label.to_string();
    };
    match NaiveDate::from_ymd_opt(year, month, 1) {
        Some(date) => date.format("%b %Y").to_string(),
        None => label.to_string(),
    }
}

pub fn parse_bool_env(var: &str) -> bool {
    if let Ok(val) = env::var(var) {
        let trimmed = val.trim();
        trimmed == "1" || trimmed.eq_ignore_ascii_case("true")
    } else {
        false
    }
}

pub fn colors_disabled() -> bool {
    env::var("NO_COLOR").is_ok()
}

/// Logs go to stderr so stdout stays clean for text and JSON output.
/// `RUST_LOG` wins over `debug`.
pub fn init_logging(debug: bool) {
    let default_directive = if debug { "green_ledger=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
