use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use rapidfuzz::distance::indel;

/// Days either side of the query date that still earn a proximity score
pub const DATE_WINDOW_DAYS: u64 = 30;

/// Earliest year accepted from a parse; anything below is a mis-read short year
const MIN_YEAR: i32 = 1000;

/// Two-digit-year layouts, tried before the four-digit ones.
/// `%y` pivots 70-99 to 19xx and 00-69 to 20xx.
const SHORT_YEAR_FORMATS: &[&str] = &["%m/%d/%y", "%d.%m.%y"];

/// Date-only layouts accepted in the dataset, tried in order.
/// Slash dates are read month-first.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d.%m.%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
];

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Name similarity (0-100)
///
/// Case-insensitive Levenshtein ratio: `100 * (1 - indel / (len_a + len_b))`,
/// truncated toward zero. A missing value on either side scores 0.
///
/// Truncation keeps the integer score from ever exceeding the raw ratio, so
/// a score of 95 or more always means a raw ratio of at least 95.
#[inline]
pub fn name_similarity(a: Option<&str>, b: Option<&str>) -> u8 {
    let (Some(a), Some(b)) = (a, b) else {
        return 0;
    };

    let a_lower = a.to_lowercase();
    let b_lower = b.to_lowercase();

    let total = a_lower.chars().count() + b_lower.chars().count();
    if total == 0 {
        return 100;
    }

    // integer division truncates exactly; 80% stays 80
    let distance = indel::distance(a_lower.chars(), b_lower.chars()).min(total);
    (100 * (total - distance) / total) as u8
}

/// Parse date-like text into a calendar date
///
/// Date-time values keep only their date part. Returns `None` for anything
/// that does not parse, and for parses landing before year 1000.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    parse_any_date(text.trim()).filter(|date| date.year() >= MIN_YEAR)
}

fn parse_any_date(text: &str) -> Option<NaiveDate> {
    if text.is_empty() {
        return None;
    }

    if let Some(date) = parse_compact_date(text) {
        return Some(date);
    }

    if let Some(date) = SHORT_YEAR_FORMATS
        .iter()
        .chain(DATE_FORMATS)
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
    {
        return Some(date);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.date_naive());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .map(|dt| dt.date())
}

/// `YYYYMMDD`
fn parse_compact_date(text: &str) -> Option<NaiveDate> {
    if text.len() != 8 || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let year = text[0..4].parse().ok()?;
    let month = text[4..6].parse().ok()?;
    let day = text[6..8].parse().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)
}

/// Date proximity (0-100) between a raw dataset value and the query date
///
/// Missing or unparseable values score 0.
#[inline]
pub fn date_proximity(a: Option<&str>, b: NaiveDate) -> f64 {
    match a.and_then(parse_date) {
        Some(date) => proximity_between(date, b),
        None => 0.0,
    }
}

/// Linear decay from 100 on the same day to 0 at the window edge
#[inline]
pub fn proximity_between(a: NaiveDate, b: NaiveDate) -> f64 {
    let diff = a.signed_duration_since(b).num_days().unsigned_abs();
    if diff > DATE_WINDOW_DAYS {
        return 0.0;
    }

    100.0 * (DATE_WINDOW_DAYS - diff) as f64 / DATE_WINDOW_DAYS as f64
}
