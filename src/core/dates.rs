use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::LazyLock;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d-%m-%Y", "%d/%m/%Y", "%d %B %Y", "%d %b %Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M"];

static ISO_LIKE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{4})[-/.](\d{1,2})[-/.](\d{1,2})").expect("valid regex"));
static DAY_MONTH_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{1,2})\s+([A-Za-zåäöÅÄÖ]+)\s+(\d{4})").expect("valid regex"));

/// Normalize a raw match date as shown in the widget to a calendar date
///
/// Accepts things like `Matchdatum: 2025-03-09 kl 19:00`, `09/03/2025` or
/// `9 mars 2025`. Returns `None` when nothing date-like is found.
pub fn normalize_date(raw: &str) -> Option<NaiveDate> {
    let text = raw.trim();
    let text = text.strip_prefix("Matchdatum:").unwrap_or(text);
    let text = text
        .split_whitespace()
        .filter(|token| !token.eq_ignore_ascii_case("kl"))
        .collect::<Vec<_>>()
        .join(" ");

    if text.is_empty() {
        return None;
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(&text, fmt) {
            return Some(date);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(&text, fmt) {
            return Some(dt.date());
        }
    }

    if let Some(caps) = ISO_LIKE.captures(&text) {
        let year = caps[1].parse().ok()?;
        let month = caps[2].parse().ok()?;
        let day = caps[3].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    if let Some(caps) = DAY_MONTH_YEAR.captures(&text) {
        let day = caps[1].parse().ok()?;
        let month = swedish_month(&caps[2])?;
        let year = caps[3].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    None
}

fn swedish_month(name: &str) -> Option<u32> {
    let month = match name.to_lowercase().as_str() {
        "januari" => 1,
        "februari" => 2,
        "mars" => 3,
        "april" => 4,
        "maj" => 5,
        "juni" => 6,
        "juli" => 7,
        "augusti" => 8,
        "september" => 9,
        "oktober" => 10,
        "november" => 11,
        "december" => 12,
        _ => return None,
    };
    Some(month)
}
