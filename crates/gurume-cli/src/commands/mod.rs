//! Command handlers, called from `main` once the API client is built.

mod db;
mod options;
mod review;
mod search;
mod shop;

pub(crate) use db::{run_db, DbCommands};
pub(crate) use options::run_options;
pub(crate) use review::{run_review, ReviewArgs};
pub(crate) use search::{run_search, SearchArgs};
pub(crate) use shop::run_shop;

/// Placeholder for absent optional values in tabular output.
const EMPTY: &str = "\u{2014}";

fn or_empty(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or(EMPTY)
}

/// Truncates to `max` characters, appending `...` when cut.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        format!("{}...", text.chars().take(max).collect::<String>())
    } else {
        text.to_string()
    }
}
