//! Text normalization for untrusted feed content.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDateTime};
use regex::Regex;
use scraper::Html;
use unicode_segmentation::UnicodeSegmentation;

/// Output format for normalized publication dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Marker appended to truncated summaries.
pub const ELLIPSIS: &str = "...";

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Collapse runs of whitespace into single spaces and trim.
pub fn normalize_whitespace(s: &str) -> String {
    WHITESPACE.replace_all(s.trim(), " ").into_owned()
}

/// Reduce an HTML fragment to its text content.
pub fn strip_html(fragment: &str) -> String {
    if !fragment.contains('<') && !fragment.contains('&') {
        return normalize_whitespace(fragment);
    }
    let parsed = Html::parse_fragment(fragment);
    let text: Vec<&str> = parsed.root_element().text().collect();
    normalize_whitespace(&text.join(" "))
}

/// Cut `text` to at most `max` grapheme clusters, appending [`ELLIPSIS`]
/// when anything was removed. `max == 0` leaves the text untouched.
pub fn truncate(text: &str, max: usize) -> String {
    if max == 0 {
        return text.to_string();
    }
    match text.grapheme_indices(true).nth(max) {
        Some((cut, _)) => format!("{}{}", text[..cut].trim_end(), ELLIPSIS),
        None => text.to_string(),
    }
}

/// Normalize an RFC 2822 / RFC 3339 date to [`DATE_FORMAT`]; anything
/// else is returned trimmed but otherwise verbatim.
pub fn normalize_date(raw: &str) -> String {
    let raw = raw.trim();
    DateTime::parse_from_rfc2822(raw)
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .map(|d| d.naive_utc())
        .or_else(|_| NaiveDateTime::parse_from_str(raw, DATE_FORMAT))
        .map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_else(|_| raw.to_string())
}
